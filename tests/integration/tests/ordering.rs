//! Sub-story ordering integration tests
//!
//! Run with: cargo test -p integration-tests --test ordering

use integration_tests::{check_test_env, create_story, sub_story_request, unique_actor, TestContext};
use story_core::{DomainError, Id, OrderKey};
use story_service::dto::{MoveSubStoryRequest, UpdateSubStoryRequest};
use story_service::SubStoryService;

fn keys(sub_stories: &[story_core::SubStory]) -> Vec<f64> {
    sub_stories.iter().map(|s| s.order_key.value()).collect()
}

fn titles(sub_stories: &[story_core::SubStory]) -> Vec<&str> {
    sub_stories.iter().map(|s| s.title.as_str()).collect()
}

#[tokio::test]
async fn test_append_and_move_between_neighbours() {
    if !check_test_env() {
        return;
    }

    let test = TestContext::connect().await.expect("Failed to connect");
    let service = SubStoryService::new(&test.ctx);
    let creator = unique_actor();
    let story = create_story(&test.ctx, creator, "Chapters").await;

    let mut ids = Vec::new();
    for title in ["one", "two", "three"] {
        let sub_story = service
            .create_sub_story(story.id, creator, sub_story_request(title))
            .await
            .unwrap();
        ids.push(sub_story.id);
    }

    let listed = service.list_sub_stories(story.id).await.unwrap();
    assert_eq!(keys(&listed), vec![1.0, 2.0, 3.0]);

    // Move "three" between "one" and "two".
    let key = service
        .move_sub_story(
            ids[2],
            story.id,
            creator,
            MoveSubStoryRequest {
                prev: Some(1.0),
                next: Some(2.0),
            },
        )
        .await
        .unwrap();
    assert_eq!(key, OrderKey::new(1.5));

    let listed = service.list_sub_stories(story.id).await.unwrap();
    assert_eq!(titles(&listed), vec!["one", "three", "two"]);

    // Appending after a fractional maximum lands on the next whole number.
    let moved_last = service
        .move_sub_story(
            ids[0],
            story.id,
            creator,
            MoveSubStoryRequest {
                prev: Some(2.0),
                next: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(moved_last, OrderKey::new(2.5));

    let appended = service
        .create_sub_story(story.id, creator, sub_story_request("four"))
        .await
        .unwrap();
    assert_eq!(appended.order_key, OrderKey::new(3.0));

    let listed = service.list_sub_stories(story.id).await.unwrap();
    assert_eq!(titles(&listed), vec!["three", "two", "one", "four"]);
}

#[tokio::test]
async fn test_exhausted_precision_and_rebalance() {
    if !check_test_env() {
        return;
    }

    let test = TestContext::connect().await.expect("Failed to connect");
    let service = SubStoryService::new(&test.ctx);
    let creator = unique_actor();
    let story = create_story(&test.ctx, creator, "Crowded").await;

    let mut ids = Vec::new();
    for title in ["a", "b", "c"] {
        let sub_story = service
            .create_sub_story(story.id, creator, sub_story_request(title))
            .await
            .unwrap();
        ids.push(sub_story.id);
    }

    let adjacent = f64::from_bits(1.0_f64.to_bits() + 1);
    let err = service
        .move_sub_story(
            ids[2],
            story.id,
            creator,
            MoveSubStoryRequest {
                prev: Some(1.0),
                next: Some(adjacent),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_domain(),
        Some(DomainError::PrecisionExhausted { .. })
    ));

    // Put the list into a fractional state, then renumber it.
    service
        .move_sub_story(
            ids[2],
            story.id,
            creator,
            MoveSubStoryRequest {
                prev: None,
                next: Some(1.0),
            },
        )
        .await
        .unwrap();

    let rewritten = service
        .rebalance_sub_stories(story.id, creator)
        .await
        .unwrap();
    assert_eq!(rewritten, 3);

    let listed = service.list_sub_stories(story.id).await.unwrap();
    assert_eq!(keys(&listed), vec![1.0, 2.0, 3.0]);
    assert_eq!(titles(&listed), vec!["c", "a", "b"]);
}

#[tokio::test]
async fn test_append_after_huge_key_is_rejected() {
    if !check_test_env() {
        return;
    }

    let test = TestContext::connect().await.expect("Failed to connect");
    let service = SubStoryService::new(&test.ctx);
    let creator = unique_actor();
    let story = create_story(&test.ctx, creator, "Far apart").await;

    service
        .create_sub_story(story.id, creator, sub_story_request("near"))
        .await
        .unwrap();
    let far = service
        .create_sub_story(story.id, creator, sub_story_request("far"))
        .await
        .unwrap();
    service
        .move_sub_story(
            far.id,
            story.id,
            creator,
            MoveSubStoryRequest {
                prev: Some(1e17),
                next: Some(3e17),
            },
        )
        .await
        .unwrap();

    let err = service
        .create_sub_story(story.id, creator, sub_story_request("lost"))
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_domain(),
        Some(DomainError::PrecisionExhausted { .. })
    ));

    let listed = service.list_sub_stories(story.id).await.unwrap();
    assert_eq!(keys(&listed), vec![1.0, 2e17]);
}

#[tokio::test]
async fn test_invalid_moves_are_rejected() {
    if !check_test_env() {
        return;
    }

    let test = TestContext::connect().await.expect("Failed to connect");
    let service = SubStoryService::new(&test.ctx);
    let creator = unique_actor();
    let story = create_story(&test.ctx, creator, "Strict").await;
    let sub_story = service
        .create_sub_story(story.id, creator, sub_story_request("only"))
        .await
        .unwrap();

    for request in [
        MoveSubStoryRequest::default(),
        MoveSubStoryRequest {
            prev: Some(2.0),
            next: Some(1.0),
        },
        MoveSubStoryRequest {
            prev: None,
            next: Some(f64::NAN),
        },
    ] {
        let err = service
            .move_sub_story(sub_story.id, story.id, creator, request)
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_domain(),
            Some(DomainError::InvalidMoveRequest(_))
        ));
    }

    let stored = service.get_sub_story(sub_story.id).await.unwrap();
    assert_eq!(stored.order_key, OrderKey::FIRST);
}

#[tokio::test]
async fn test_sub_story_must_belong_to_story() {
    if !check_test_env() {
        return;
    }

    let test = TestContext::connect().await.expect("Failed to connect");
    let service = SubStoryService::new(&test.ctx);
    let creator = unique_actor();
    let first = create_story(&test.ctx, creator, "First").await;
    let second = create_story(&test.ctx, creator, "Second").await;

    let sub_story = service
        .create_sub_story(first.id, creator, sub_story_request("stray"))
        .await
        .unwrap();

    let err = service
        .delete_sub_story(sub_story.id, second.id, creator)
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::SubStoryNotFound(_))));

    let err = service
        .create_sub_story(first.id, unique_actor(), sub_story_request("intruder"))
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::NotStoryCreator)));

    let updated = service
        .update_sub_story(
            sub_story.id,
            first.id,
            creator,
            UpdateSubStoryRequest {
                title: Some("found".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "found");
    assert_eq!(updated.text, sub_story.text);

    service
        .delete_sub_story(sub_story.id, first.id, creator)
        .await
        .unwrap();
    assert!(service.list_sub_stories(first.id).await.unwrap().is_empty());

    let err = service.list_sub_stories(Id::new(i64::MAX)).await.unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::StoryNotFound(_))));
}
