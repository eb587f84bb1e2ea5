//! In-memory repositories for service unit tests
//!
//! One [`MemoryStore`] implements every repository trait over shared state and
//! applies reactions through [`Ballot::transition`], like the PostgreSQL ledger.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use story_common::FeedConfig;
use story_core::entities::{
    NewReview, NewStory, NewSubStory, Review, ReviewVote, Story, StoryStatus, SubStory, Vote,
};
use story_core::error::DomainError;
use story_core::traits::{
    KeysetQuery, RepoResult, ReviewRepository, StoryRepository, StorySearch, SubStoryRepository,
    VoteRepository,
};
use story_core::value_objects::{
    Ballot, Id, OrderKey, ReactionWrite, ReviewBallot, ReviewTally, ScoreCursor, StoryBallot,
    StoryTally,
};

use super::context::ServiceContext;

#[derive(Default)]
struct State {
    last_id: i64,
    stories: Vec<Story>,
    reviews: Vec<Review>,
    sub_stories: Vec<SubStory>,
    votes: HashMap<(Id, Id), StoryBallot>,
    review_votes: HashMap<(Id, Id), ReviewBallot>,
}

impl State {
    fn next_id(&mut self) -> Id {
        self.last_id += 1;
        Id::new(self.last_id)
    }

    fn story_mut(&mut self, id: Id) -> RepoResult<&mut Story> {
        self.stories
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(DomainError::StoryNotFound(id))
    }

    fn vote_on_story(
        &mut self,
        story_id: Id,
        user_id: Id,
        ballot: StoryBallot,
    ) -> RepoResult<StoryTally> {
        self.story_mut(story_id)?;
        let delta = record(&mut self.votes, (story_id, user_id), ballot);
        let story = self.story_mut(story_id)?;
        story.up_vote += delta.up;
        story.down_vote += delta.down;
        Ok(story.tally())
    }
}

/// Apply one transition to a reaction map, returning the counter delta
fn record<B: Ballot>(reactions: &mut HashMap<(Id, Id), B>, key: (Id, Id), ballot: B) -> B::Tally {
    let transition = B::transition(reactions.get(&key).copied(), ballot);
    match transition.write {
        ReactionWrite::Skip => {}
        ReactionWrite::Insert | ReactionWrite::Update => {
            reactions.insert(key, ballot);
        }
    }
    transition.delta
}

fn newest_first<T, F>(rows: impl Iterator<Item = T>, query: &KeysetQuery<Id>, id_of: F) -> Vec<T>
where
    F: Fn(&T) -> Id,
{
    let mut rows: Vec<T> = rows
        .filter(|row| query.cursor.is_none_or(|c| id_of(row) <= c))
        .collect();
    rows.sort_by_key(|row| std::cmp::Reverse(id_of(row)));
    rows.truncate(query.fetch as usize);
    rows
}

fn ranked<T, F>(rows: impl Iterator<Item = T>, query: &KeysetQuery<ScoreCursor>, cursor_of: F) -> Vec<T>
where
    F: Fn(&T) -> ScoreCursor,
{
    let mut rows: Vec<T> = rows
        .filter(|row| {
            let at = cursor_of(row);
            query.cursor.is_none_or(|c| c.admits(at.score, at.id))
        })
        .collect();
    rows.sort_by(|a, b| {
        let (a, b) = (cursor_of(a), cursor_of(b));
        b.score.cmp(&a.score).then(b.id.cmp(&a.id))
    });
    rows.truncate(query.fetch as usize);
    rows
}

fn is_recent(created_at: DateTime<Utc>, since: Option<DateTime<Utc>>) -> bool {
    since.is_none_or(|cutoff| created_at > cutoff)
}

/// Shared in-memory backing for every repository trait
#[derive(Default)]
pub(crate) struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// A service context whose four repositories share one store
    pub(crate) fn context() -> (ServiceContext, Arc<MemoryStore>) {
        let store = Arc::new(Self::default());
        let ctx = ServiceContext::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            FeedConfig::default(),
        );
        (ctx, store)
    }

    pub(crate) fn context_with(feed: FeedConfig) -> ServiceContext {
        let store = Arc::new(Self::default());
        ServiceContext::new(store.clone(), store.clone(), store.clone(), store, feed)
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Move a story's creation time, for recency-window tests
    pub(crate) fn backdate_story(&self, id: Id, created_at: DateTime<Utc>) {
        let mut state = self.state();
        let story = state.story_mut(id).unwrap();
        story.created_at = created_at;
    }

    /// Stored story reactions, for ledger assertions
    pub(crate) fn story_vote_rows(&self) -> usize {
        self.state().votes.len()
    }

    /// Overwrite a sub-story key, for precision tests
    pub(crate) fn force_order_key(&self, id: Id, key: OrderKey) {
        let mut state = self.state();
        let item = state.sub_stories.iter_mut().find(|s| s.id == id).unwrap();
        item.order_key = key;
    }
}

#[async_trait]
impl StoryRepository for MemoryStore {
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Story>> {
        Ok(self.state().stories.iter().find(|s| s.id == id).cloned())
    }

    async fn create(&self, story: &NewStory) -> RepoResult<Story> {
        let mut state = self.state();
        let now = Utc::now();
        let story = Story {
            id: state.next_id(),
            title: story.title.clone(),
            overview: story.overview.clone(),
            cover_url: None,
            up_vote: 0,
            down_vote: 0,
            status: StoryStatus::Draft,
            tags: story.tags.clone(),
            creator_id: story.creator_id,
            created_at: now,
            updated_at: now,
        };
        state.stories.push(story.clone());
        Ok(story)
    }

    async fn update(&self, story: &Story) -> RepoResult<Story> {
        let mut state = self.state();
        let stored = state.story_mut(story.id)?;
        stored.title.clone_from(&story.title);
        stored.overview.clone_from(&story.overview);
        stored.tags.clone_from(&story.tags);
        stored.cover_url.clone_from(&story.cover_url);
        stored.status = story.status;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Id) -> RepoResult<()> {
        let mut state = self.state();
        state.story_mut(id)?;
        state.stories.retain(|s| s.id != id);
        state.reviews.retain(|r| r.story_id != id);
        state.sub_stories.retain(|s| s.story_id != id);
        state.votes.retain(|(story_id, _), _| *story_id != id);
        Ok(())
    }

    async fn find_top(&self, query: KeysetQuery<ScoreCursor>) -> RepoResult<Vec<Story>> {
        let state = self.state();
        let rows = state
            .stories
            .iter()
            .filter(|s| is_recent(s.created_at, query.since))
            .cloned();
        Ok(ranked(rows, &query, Story::score_cursor))
    }

    async fn find_newest(&self, query: KeysetQuery<Id>) -> RepoResult<Vec<Story>> {
        let state = self.state();
        let rows = state
            .stories
            .iter()
            .filter(|s| is_recent(s.created_at, query.since))
            .cloned();
        Ok(newest_first(rows, &query, |s: &Story| s.id))
    }

    async fn find_by_creator(
        &self,
        creator_id: Id,
        query: KeysetQuery<Id>,
    ) -> RepoResult<Vec<Story>> {
        let state = self.state();
        let rows = state
            .stories
            .iter()
            .filter(|s| s.is_created_by(creator_id))
            .cloned();
        Ok(newest_first(rows, &query, |s: &Story| s.id))
    }

    async fn search(&self, search: &StorySearch, query: KeysetQuery<Id>) -> RepoResult<Vec<Story>> {
        let state = self.state();
        let rows = state
            .stories
            .iter()
            .filter(|s| s.title.contains(&search.title))
            .filter(|s| {
                let tags = s.tag_list();
                search.tags.iter().all(|t| tags.contains(&t.as_str()))
            })
            .cloned();
        Ok(newest_first(rows, &query, |s: &Story| s.id))
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Review>> {
        Ok(self.state().reviews.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_author_and_story(
        &self,
        user_id: Id,
        story_id: Id,
    ) -> RepoResult<Option<Review>> {
        Ok(self
            .state()
            .reviews
            .iter()
            .find(|r| r.user_id == user_id && r.story_id == story_id)
            .cloned())
    }

    async fn create_with_story_vote(
        &self,
        review: &NewReview,
        vote: StoryBallot,
    ) -> RepoResult<(Review, StoryTally)> {
        let mut state = self.state();
        if state
            .reviews
            .iter()
            .any(|r| r.user_id == review.user_id && r.story_id == review.story_id)
        {
            return Err(DomainError::AlreadyReviewed);
        }

        let tally = state.vote_on_story(review.story_id, review.user_id, vote)?;

        let now = Utc::now();
        let review = Review {
            id: state.next_id(),
            text: review.text.clone(),
            review_type: review.review_type,
            helpful_score: 0,
            unhelpful_score: 0,
            funny_score: 0,
            user_id: review.user_id,
            story_id: review.story_id,
            created_at: now,
            updated_at: now,
        };
        state.reviews.push(review.clone());
        Ok((review, tally))
    }

    async fn update(&self, review: &Review) -> RepoResult<Review> {
        let mut state = self.state();
        let stored = state
            .reviews
            .iter_mut()
            .find(|r| r.id == review.id)
            .ok_or(DomainError::ReviewNotFound(review.id))?;
        stored.text.clone_from(&review.text);
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Id) -> RepoResult<()> {
        let mut state = self.state();
        if !state.reviews.iter().any(|r| r.id == id) {
            return Err(DomainError::ReviewNotFound(id));
        }
        state.reviews.retain(|r| r.id != id);
        state.review_votes.retain(|(review_id, _), _| *review_id != id);
        Ok(())
    }

    async fn find_helpful(
        &self,
        story_id: Id,
        query: KeysetQuery<ScoreCursor>,
    ) -> RepoResult<Vec<Review>> {
        let state = self.state();
        let rows = state
            .reviews
            .iter()
            .filter(|r| r.story_id == story_id && is_recent(r.created_at, query.since))
            .cloned();
        Ok(ranked(rows, &query, Review::helpful_cursor))
    }

    async fn find_recent_by_user(
        &self,
        user_id: Id,
        query: KeysetQuery<Id>,
    ) -> RepoResult<Vec<Review>> {
        let state = self.state();
        let rows = state
            .reviews
            .iter()
            .filter(|r| r.user_id == user_id && is_recent(r.created_at, query.since))
            .cloned();
        Ok(newest_first(rows, &query, |r: &Review| r.id))
    }
}

#[async_trait]
impl VoteRepository for MemoryStore {
    async fn apply_story_vote(
        &self,
        story_id: Id,
        user_id: Id,
        ballot: StoryBallot,
    ) -> RepoResult<StoryTally> {
        self.state().vote_on_story(story_id, user_id, ballot)
    }

    async fn apply_review_vote(
        &self,
        review_id: Id,
        user_id: Id,
        ballot: ReviewBallot,
    ) -> RepoResult<ReviewTally> {
        let mut state = self.state();
        if !state.reviews.iter().any(|r| r.id == review_id) {
            return Err(DomainError::ReviewNotFound(review_id));
        }

        let delta = record(&mut state.review_votes, (review_id, user_id), ballot);
        let review = state
            .reviews
            .iter_mut()
            .find(|r| r.id == review_id)
            .ok_or(DomainError::ReviewNotFound(review_id))?;
        review.helpful_score += delta.helpful;
        review.unhelpful_score += delta.unhelpful;
        review.funny_score += delta.funny;
        Ok(review.tally())
    }

    async fn find_story_vote(&self, story_id: Id, user_id: Id) -> RepoResult<Option<Vote>> {
        Ok(self
            .state()
            .votes
            .get(&(story_id, user_id))
            .map(|&value| Vote {
                user_id,
                story_id,
                value,
            }))
    }

    async fn find_review_vote(
        &self,
        review_id: Id,
        user_id: Id,
    ) -> RepoResult<Option<ReviewVote>> {
        Ok(self
            .state()
            .review_votes
            .get(&(review_id, user_id))
            .map(|&value| ReviewVote {
                user_id,
                review_id,
                value,
            }))
    }
}

#[async_trait]
impl SubStoryRepository for MemoryStore {
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<SubStory>> {
        Ok(self.state().sub_stories.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_story(&self, story_id: Id) -> RepoResult<Vec<SubStory>> {
        let mut items: Vec<SubStory> = self
            .state()
            .sub_stories
            .iter()
            .filter(|s| s.belongs_to(story_id))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.order_key
                .value()
                .total_cmp(&b.order_key.value())
                .then(a.id.cmp(&b.id))
        });
        Ok(items)
    }

    async fn create_appended(&self, sub_story: &NewSubStory) -> RepoResult<SubStory> {
        let mut state = self.state();
        state.story_mut(sub_story.story_id)?;

        let max = state
            .sub_stories
            .iter()
            .filter(|s| s.belongs_to(sub_story.story_id))
            .map(|s| s.order_key)
            .reduce(|a, b| if b > a { b } else { a });

        let order_key = OrderKey::after_last(max)?;

        let now = Utc::now();
        let item = SubStory {
            id: state.next_id(),
            story_id: sub_story.story_id,
            title: sub_story.title.clone(),
            text: sub_story.text.clone(),
            order_key,
            created_at: now,
            updated_at: now,
        };
        state.sub_stories.push(item.clone());
        Ok(item)
    }

    async fn update(&self, sub_story: &SubStory) -> RepoResult<SubStory> {
        let mut state = self.state();
        let stored = state
            .sub_stories
            .iter_mut()
            .find(|s| s.id == sub_story.id)
            .ok_or(DomainError::SubStoryNotFound(sub_story.id))?;
        stored.title.clone_from(&sub_story.title);
        stored.text.clone_from(&sub_story.text);
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn set_order_key(&self, id: Id, key: OrderKey) -> RepoResult<()> {
        let mut state = self.state();
        let stored = state
            .sub_stories
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(DomainError::SubStoryNotFound(id))?;
        stored.order_key = key;
        Ok(())
    }

    async fn rebalance(&self, story_id: Id) -> RepoResult<u64> {
        let ordered = SubStoryRepository::find_by_story(self, story_id).await?;
        let mut state = self.state();
        state.story_mut(story_id)?;

        let mut rewritten = 0;
        for (position, item) in ordered.iter().enumerate() {
            let key = OrderKey::rebalanced(position);
            if let Some(stored) = state.sub_stories.iter_mut().find(|s| s.id == item.id) {
                if stored.order_key != key {
                    stored.order_key = key;
                    rewritten += 1;
                }
            }
        }
        Ok(rewritten)
    }

    async fn delete(&self, id: Id) -> RepoResult<()> {
        let mut state = self.state();
        if !state.sub_stories.iter().any(|s| s.id == id) {
            return Err(DomainError::SubStoryNotFound(id));
        }
        state.sub_stories.retain(|s| s.id != id);
        Ok(())
    }
}
