//! Reaction ledger - applies one reaction change and its counter delta
//!
//! Both reaction tables follow the same protocol inside the caller's
//! transaction:
//!
//! 1. lock the subject row (`FOR UPDATE`) so votes on one subject serialize
//! 2. read the actor's current reaction
//! 3. let [`Ballot::transition`] decide the row write and the counter delta
//! 4. write the reaction, then add the delta to the subject's counters
//!
//! Per-table SQL lives in the [`LedgerTable`] impls below.

use sqlx::postgres::{PgRow, Postgres};
use sqlx::{FromRow, Transaction};
use tracing::{debug, info};

use story_core::error::DomainError;
use story_core::traits::RepoResult;
use story_core::value_objects::{
    Ballot, Id, ReactionWrite, ReviewBallot, ReviewTally, StoryBallot, StoryTally,
};

use crate::models::{ReviewTallyModel, StoryTallyModel};

use super::error::{map_db_error, map_unique_violation, reaction_conflict};

/// Storage layout of one reaction table and the subject it counts into
pub(crate) trait LedgerTable: Ballot {
    /// Counter columns read from and returned by the subject row
    type Row: for<'r> FromRow<'r, PgRow> + Into<Self::Tally> + Send + Unpin;

    /// Name used in log events
    const SUBJECT: &'static str;

    /// `$1` subject id; returns the counter columns
    const LOCK_SUBJECT: &'static str;

    /// `$1` subject id, `$2` user id; returns `value`
    const FIND_REACTION: &'static str;

    /// `$1` subject id, `$2` user id, `$3` value
    const INSERT_REACTION: &'static str;

    /// `$1` subject id, `$2` user id, `$3` value
    const UPDATE_REACTION: &'static str;

    /// `$1` subject id, `$2..` one delta per counter; returns the counter columns
    const APPLY_DELTA: &'static str;

    /// Delta binds in the order `APPLY_DELTA` expects them
    fn delta_columns(delta: Self::Tally) -> Vec<i32>;

    fn subject_not_found(id: Id) -> DomainError;
}

impl LedgerTable for StoryBallot {
    type Row = StoryTallyModel;

    const SUBJECT: &'static str = "story";

    const LOCK_SUBJECT: &'static str = r#"
        SELECT up_vote, down_vote
        FROM stories
        WHERE id = $1
        FOR UPDATE
    "#;

    const FIND_REACTION: &'static str = r#"
        SELECT value FROM votes WHERE story_id = $1 AND user_id = $2
    "#;

    const INSERT_REACTION: &'static str = r#"
        INSERT INTO votes (story_id, user_id, value) VALUES ($1, $2, $3)
    "#;

    const UPDATE_REACTION: &'static str = r#"
        UPDATE votes SET value = $3 WHERE story_id = $1 AND user_id = $2
    "#;

    const APPLY_DELTA: &'static str = r#"
        UPDATE stories
        SET up_vote = up_vote + $2, down_vote = down_vote + $3
        WHERE id = $1
        RETURNING up_vote, down_vote
    "#;

    fn delta_columns(delta: StoryTally) -> Vec<i32> {
        vec![delta.up, delta.down]
    }

    fn subject_not_found(id: Id) -> DomainError {
        DomainError::StoryNotFound(id)
    }
}

impl LedgerTable for ReviewBallot {
    type Row = ReviewTallyModel;

    const SUBJECT: &'static str = "review";

    const LOCK_SUBJECT: &'static str = r#"
        SELECT helpful_score, unhelpful_score, funny_score
        FROM reviews
        WHERE id = $1
        FOR UPDATE
    "#;

    const FIND_REACTION: &'static str = r#"
        SELECT value FROM review_votes WHERE review_id = $1 AND user_id = $2
    "#;

    const INSERT_REACTION: &'static str = r#"
        INSERT INTO review_votes (review_id, user_id, value) VALUES ($1, $2, $3)
    "#;

    const UPDATE_REACTION: &'static str = r#"
        UPDATE review_votes SET value = $3 WHERE review_id = $1 AND user_id = $2
    "#;

    const APPLY_DELTA: &'static str = r#"
        UPDATE reviews
        SET helpful_score = helpful_score + $2,
            unhelpful_score = unhelpful_score + $3,
            funny_score = funny_score + $4
        WHERE id = $1
        RETURNING helpful_score, unhelpful_score, funny_score
    "#;

    fn delta_columns(delta: ReviewTally) -> Vec<i32> {
        vec![delta.helpful, delta.unhelpful, delta.funny]
    }

    fn subject_not_found(id: Id) -> DomainError {
        DomainError::ReviewNotFound(id)
    }
}

/// Apply `ballot` as `user_id`'s reaction to `subject_id` within `tx`,
/// returning the subject's counters afterwards
pub(crate) async fn apply<B: LedgerTable>(
    tx: &mut Transaction<'_, Postgres>,
    subject_id: Id,
    user_id: Id,
    ballot: B,
) -> RepoResult<B::Tally> {
    let current = sqlx::query_as::<_, B::Row>(B::LOCK_SUBJECT)
        .bind(subject_id.into_inner())
        .fetch_optional(&mut **tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| B::subject_not_found(subject_id))?;

    let previous = sqlx::query_scalar::<_, i32>(B::FIND_REACTION)
        .bind(subject_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&mut **tx)
        .await
        .map_err(map_db_error)?
        .map(B::from_value)
        .transpose()?;

    let transition = B::transition(previous, ballot);

    let statement = match transition.write {
        ReactionWrite::Skip => {
            debug!(
                subject = B::SUBJECT,
                subject_id = %subject_id,
                user_id = %user_id,
                value = ballot.value(),
                "Reaction unchanged"
            );
            return Ok(current.into());
        }
        ReactionWrite::Insert => B::INSERT_REACTION,
        ReactionWrite::Update => B::UPDATE_REACTION,
    };

    sqlx::query(statement)
        .bind(subject_id.into_inner())
        .bind(user_id.into_inner())
        .bind(ballot.value())
        .execute(&mut **tx)
        .await
        .map_err(|e| map_unique_violation(e, reaction_conflict))?;

    let mut query = sqlx::query_as::<_, B::Row>(B::APPLY_DELTA).bind(subject_id.into_inner());
    for delta in B::delta_columns(transition.delta) {
        query = query.bind(delta);
    }
    let updated = query.fetch_one(&mut **tx).await.map_err(map_db_error)?;

    info!(
        subject = B::SUBJECT,
        subject_id = %subject_id,
        user_id = %user_id,
        previous = ?transition.previous,
        next = ?transition.next,
        "Reaction applied"
    );

    Ok(updated.into())
}
