//! Top stories feed integration test
//!
//! The feed is global, so this binary holds a single test that empties the
//! stories table first.
//!
//! Run with: cargo test -p integration-tests --test top_stories

use std::collections::HashSet;

use integration_tests::{check_test_env, create_story, unique_actor, TestContext};
use story_core::{Id, ScoreCursor, StoryTally};
use story_service::{StoryService, VoteService};

#[tokio::test]
async fn test_top_stories_order_and_cursor_walk() {
    if !check_test_env() {
        return;
    }

    let test = TestContext::connect().await.expect("Failed to connect");
    test.reset_stories().await.expect("Failed to reset stories");

    let stories = StoryService::new(&test.ctx);
    let votes = VoteService::new(&test.ctx);

    // S ends at (1, 1); T has no votes and ties S at net 0.
    let s = create_story(&test.ctx, unique_actor(), "S").await;
    let t = create_story(&test.ctx, unique_actor(), "T").await;
    let (a, b) = (unique_actor(), unique_actor());
    votes.apply_story_vote(s.id, a, 1).await.unwrap();
    votes.apply_story_vote(s.id, a, -1).await.unwrap();
    let tally = votes.apply_story_vote(s.id, b, 1).await.unwrap();
    assert_eq!(tally, StoryTally::new(1, 1));

    // U leads with +1, V trails with -1.
    let u = create_story(&test.ctx, unique_actor(), "U").await;
    votes.apply_story_vote(u.id, unique_actor(), 1).await.unwrap();
    let v = create_story(&test.ctx, unique_actor(), "V").await;
    votes.apply_story_vote(v.id, unique_actor(), -1).await.unwrap();

    let first = stories.top_stories(Some(1), None, None).await.unwrap();
    assert_eq!(first.items.len(), 1);
    assert_eq!(first.items[0].id, u.id);

    // Ties on net votes break by the newer id.
    let expected = vec![u.id, t.id, s.id, v.id];
    let mut seen: Vec<Id> = Vec::new();
    let mut cursor: Option<ScoreCursor> = None;
    loop {
        let raw = cursor.map(|c| c.to_string());
        let page = stories
            .top_stories(Some(1), raw.as_deref(), None)
            .await
            .unwrap();
        seen.extend(page.items.iter().map(|s| s.id));

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    let unique: HashSet<Id> = seen.iter().copied().collect();
    assert_eq!(unique.len(), seen.len());
    assert_eq!(seen, expected);

    let all = stories.top_stories(None, None, None).await.unwrap();
    assert_eq!(all.items.iter().map(|s| s.id).collect::<Vec<_>>(), expected);
    assert!(!all.has_more());
}
