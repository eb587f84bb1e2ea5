//! Keyset pagination and search integration tests
//!
//! Run with: cargo test -p integration-tests --test pagination

use std::collections::HashSet;

use integration_tests::{
    check_test_env, create_story, review_request, story_request, unique_actor, TestContext,
};
use story_core::{DomainError, Id, Review, ReviewType};
use story_service::dto::{CreateStoryRequest, SearchStoriesRequest};
use story_service::{ReviewService, StoryService, VoteService};

#[tokio::test]
async fn test_my_stories_pages_newest_first() {
    if !check_test_env() {
        return;
    }

    let test = TestContext::connect().await.expect("Failed to connect");
    let stories = StoryService::new(&test.ctx);
    let creator = unique_actor();

    let mut created = Vec::new();
    for n in 0..5 {
        created.push(create_story(&test.ctx, creator, &format!("Mine {n}")).await.id);
    }
    created.reverse();

    let mut seen = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0;
    loop {
        let page = stories
            .my_stories(creator, Some(2), cursor.as_deref())
            .await
            .unwrap();
        pages += 1;
        assert!(page.items.len() <= 2);
        seen.extend(page.items.iter().map(|s| s.id));

        match page.next_cursor {
            Some(next) => cursor = Some(next.to_string()),
            None => break,
        }
    }

    assert_eq!(pages, 3);
    assert_eq!(seen, created);
}

#[tokio::test]
async fn test_helpful_reviews_walk_ties_without_gaps() {
    if !check_test_env() {
        return;
    }

    let test = TestContext::connect().await.expect("Failed to connect");
    let reviews = ReviewService::new(&test.ctx);
    let votes = VoteService::new(&test.ctx);
    let story = create_story(&test.ctx, unique_actor(), "Debated").await;

    let mut written: Vec<Review> = Vec::new();
    for _ in 0..5 {
        let (review, _) = reviews
            .create_review(story.id, unique_actor(), review_request(ReviewType::Neutral))
            .await
            .unwrap();
        written.push(review);
    }

    // Scores 2, 1, 1, 1, 0 leave a three-way tie across page boundaries.
    let helpful_votes = [2, 1, 1, 1, 0];
    for (review, count) in written.iter().zip(helpful_votes) {
        for _ in 0..count {
            votes
                .apply_review_vote(review.id, unique_actor(), 1)
                .await
                .unwrap();
        }
    }

    let mut expected: Vec<(i32, Id)> = written
        .iter()
        .zip(helpful_votes)
        .map(|(r, count)| (count, r.id))
        .collect();
    expected.sort_by(|a, b| b.cmp(a));
    let expected: Vec<Id> = expected.into_iter().map(|(_, id)| id).collect();

    let mut seen = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = reviews
            .helpful_reviews(story.id, Some(2), cursor.as_deref(), None)
            .await
            .unwrap();
        seen.extend(page.items.iter().map(|r| r.id));

        match page.next_cursor {
            Some(next) => cursor = Some(next.to_string()),
            None => break,
        }
    }

    let unique: HashSet<Id> = seen.iter().copied().collect();
    assert_eq!(unique.len(), seen.len());
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_recent_user_reviews() {
    if !check_test_env() {
        return;
    }

    let test = TestContext::connect().await.expect("Failed to connect");
    let reviews = ReviewService::new(&test.ctx);
    let reader = unique_actor();

    for title in ["First read", "Second read"] {
        let story = create_story(&test.ctx, unique_actor(), title).await;
        reviews
            .create_review(story.id, reader, review_request(ReviewType::Positive))
            .await
            .unwrap();
    }

    let page = reviews
        .recent_user_reviews(reader, Some(1), None, None)
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    let next = page.next_cursor.expect("second review on the next page");

    let rest = reviews
        .recent_user_reviews(reader, Some(1), Some(&next.to_string()), None)
        .await
        .unwrap();
    assert_eq!(rest.items.len(), 1);
    assert!(rest.items[0].id < page.items[0].id);
    assert!(!rest.has_more());

    let err = reviews
        .recent_user_reviews(reader, None, Some("not-a-cursor"), None)
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::InvalidCursor(_))));
}

#[tokio::test]
async fn test_search_by_title_and_tags() {
    if !check_test_env() {
        return;
    }

    let test = TestContext::connect().await.expect("Failed to connect");
    let stories = StoryService::new(&test.ctx);
    let creator = unique_actor();
    let marker = format!("m{creator}");

    let create = |title: String, tags: &[&str]| CreateStoryRequest {
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..story_request(&title)
    };

    let percent = stories
        .create_story(creator, create(format!("{marker} 100% pure"), &["rust", "async"]))
        .await
        .unwrap();
    stories
        .create_story(creator, create(format!("{marker} 1000 pure"), &["rust"]))
        .await
        .unwrap();
    let underscore = stories
        .create_story(creator, create(format!("{marker} a_b"), &["async"]))
        .await
        .unwrap();
    stories
        .create_story(creator, create(format!("{marker} axb"), &["rustacean"]))
        .await
        .unwrap();

    let search = |title: String, tags: &[&str]| SearchStoriesRequest {
        title,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    };

    let found = stories
        .search_stories(search(format!("{marker} 100%"), &[]), None, None)
        .await
        .unwrap();
    assert_eq!(found.items.len(), 1);
    assert_eq!(found.items[0].id, percent.id);

    let found = stories
        .search_stories(search(format!("{marker} a_b"), &[]), None, None)
        .await
        .unwrap();
    assert_eq!(found.items.len(), 1);
    assert_eq!(found.items[0].id, underscore.id);

    // Whole-tag matches only: "rustacean" does not carry "rust".
    let found = stories
        .search_stories(search(marker.clone(), &["rust"]), None, None)
        .await
        .unwrap();
    assert_eq!(found.items.len(), 2);

    let found = stories
        .search_stories(search(marker.clone(), &["rust", "async"]), None, None)
        .await
        .unwrap();
    assert_eq!(found.items.len(), 1);
    assert_eq!(found.items[0].id, percent.id);

    let found = stories
        .search_stories(search(marker, &[]), Some(3), None)
        .await
        .unwrap();
    assert_eq!(found.items.len(), 3);
    assert!(found.has_more());
}
