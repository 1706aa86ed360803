use garde::Validate;
use serde::{Deserialize, Serialize};
use sqlx::{Acquire, Executor};
use time::PrimitiveDateTime;
use tracing::debug;

use crate::{ChosenDB, When, error::Result};

/// Venue and artist ids are not checked here, missing records are reported
/// by the foreign key constraint as [`crate::Error::ConstraintViolation`]
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct CreateShow {
    #[garde(range(min = 1))]
    pub venue_id: i64,
    #[garde(range(min = 1))]
    pub artist_id: i64,
    #[garde(skip)]
    pub start_time: PrimitiveDateTime,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Show {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: PrimitiveDateTime,
}

#[derive(Debug, Serialize, Clone, sqlx::FromRow)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: PrimitiveDateTime,
}

/// Show as seen from a venue page
#[derive(Debug, Serialize, Clone, sqlx::FromRow)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: PrimitiveDateTime,
}

/// Show as seen from an artist page
#[derive(Debug, Serialize, Clone, sqlx::FromRow)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: PrimitiveDateTime,
}

pub type ShowRepository = ShowRepositoryImpl<crate::Pool>;

pub struct ShowRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> ShowRepositoryImpl<E>
where
    for<'a> &'a E: Executor<'c, Database = ChosenDB> + Acquire<'c, Database = ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn create(&self, payload: CreateShow) -> Result<Show> {
        let mut tx = self.executor.begin().await?;
        sqlx::query("INSERT INTO show (venue_id, artist_id, start_time) VALUES (?, ?, ?)")
            .bind(payload.venue_id)
            .bind(payload.artist_id)
            .bind(payload.start_time)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        debug!(
            "Created show of artist {} at venue {}",
            payload.artist_id, payload.venue_id
        );

        Ok(Show {
            venue_id: payload.venue_id,
            artist_id: payload.artist_id,
            start_time: payload.start_time,
        })
    }

    pub async fn list(&self) -> Result<Vec<ShowListing>> {
        const SQL: &str = r#"
        SELECT s.venue_id, v.name AS venue_name, s.artist_id, a.name AS artist_name,
        a.image_link AS artist_image_link, s.start_time
        FROM show s
        JOIN venue v ON s.venue_id = v.id
        JOIN artist a ON s.artist_id = a.id
        ORDER BY s.start_time, s.venue_id, s.artist_id
        "#;
        let records = sqlx::query_as::<_, ShowListing>(SQL)
            .fetch_all(&self.executor)
            .await?;
        Ok(records)
    }

    pub async fn list_for_venue(
        &self,
        venue_id: i64,
        when: When,
        now: PrimitiveDateTime,
    ) -> Result<Vec<VenueShow>> {
        let sql = format!(
            "SELECT a.id AS artist_id, a.name AS artist_name, a.image_link AS artist_image_link, s.start_time
            FROM show s JOIN artist a ON s.artist_id = a.id
            WHERE s.venue_id = ? AND {}
            ORDER BY s.start_time",
            when.condition()
        );
        let records = sqlx::query_as::<_, VenueShow>(&sql)
            .bind(venue_id)
            .bind(now)
            .fetch_all(&self.executor)
            .await?;
        Ok(records)
    }

    pub async fn count_for_venue(
        &self,
        venue_id: i64,
        when: When,
        now: PrimitiveDateTime,
    ) -> Result<u64> {
        let sql = format!(
            "SELECT COUNT(*) FROM show s JOIN artist a ON s.artist_id = a.id WHERE s.venue_id = ? AND {}",
            when.condition()
        );
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(venue_id)
            .bind(now)
            .fetch_one(&self.executor)
            .await?;
        Ok(count as u64)
    }

    pub async fn list_for_artist(
        &self,
        artist_id: i64,
        when: When,
        now: PrimitiveDateTime,
    ) -> Result<Vec<ArtistShow>> {
        let sql = format!(
            "SELECT v.id AS venue_id, v.name AS venue_name, v.image_link AS venue_image_link, s.start_time
            FROM show s JOIN venue v ON s.venue_id = v.id
            WHERE s.artist_id = ? AND {}
            ORDER BY s.start_time",
            when.condition()
        );
        let records = sqlx::query_as::<_, ArtistShow>(&sql)
            .bind(artist_id)
            .bind(now)
            .fetch_all(&self.executor)
            .await?;
        Ok(records)
    }

    pub async fn count_for_artist(
        &self,
        artist_id: i64,
        when: When,
        now: PrimitiveDateTime,
    ) -> Result<u64> {
        let sql = format!(
            "SELECT COUNT(*) FROM show s JOIN venue v ON s.venue_id = v.id WHERE s.artist_id = ? AND {}",
            when.condition()
        );
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(artist_id)
            .bind(now)
            .fetch_one(&self.executor)
            .await?;
        Ok(count as u64)
    }
}
