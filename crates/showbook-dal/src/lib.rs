pub mod artist;
pub mod error;
pub mod show;
mod validation;
pub mod venue;

use std::str::FromStr as _;

pub use error::Error;
pub use sqlx::Error as SqlxError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::Result;

pub type ChosenDB = sqlx::Sqlite;
pub type ChosenRow = sqlx::sqlite::SqliteRow;
pub type Pool = sqlx::Pool<ChosenDB>;

/// Opens pool, database file is created if missing and foreign keys are
/// enforced on every connection (needed for cascading deletes of shows)
pub async fn new_pool(database_url: &str) -> Result<Pool, Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(50)
        .connect_with(options)
        .await?;
    Ok(pool)
}

pub async fn migrate(pool: &Pool) -> Result<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

/// Which side of the current moment a show falls on.
///
/// A show is upcoming iff its start is strictly after `now`, so every show is
/// exactly one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum When {
    Upcoming,
    Past,
}

impl When {
    pub(crate) fn condition(&self) -> &'static str {
        match self {
            When::Upcoming => "s.start_time > ?",
            When::Past => "s.start_time <= ?",
        }
    }
}

/// Case insensitive substring matcher for names.
///
/// SQLite `LIKE` folds only ASCII letters, so names are matched here with full
/// Unicode lowercasing. The term is taken literally, empty term matches every name.
pub(crate) struct NameMatcher {
    term: String,
}

impl NameMatcher {
    pub(crate) fn new(term: &str) -> Self {
        NameMatcher {
            term: term.to_lowercase(),
        }
    }

    pub(crate) fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.term)
    }
}
