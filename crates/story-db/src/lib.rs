//! # story-db
//!
//! Database layer implementing the story-core repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and embedded SQL migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations; every mutation runs in one transaction
//!
//! ## Usage
//!
//! ```rust,ignore
//! use story_common::AppConfig;
//! use story_db::{create_pool, run_migrations, DatabaseConfig, PgVoteRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let pool = create_pool(&DatabaseConfig::from(&config.database)).await?;
//!     run_migrations(&pool).await?;
//!     let votes = PgVoteRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgReviewRepository, PgStoryRepository, PgSubStoryRepository, PgVoteRepository,
};
