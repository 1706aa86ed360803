use garde::Validate;
use serde::{Deserialize, Serialize};
use showbook_types::GenreList;
use sqlx::{Acquire, Executor};
use time::PrimitiveDateTime;
use tracing::debug;

use crate::{
    ChosenDB, Error,
    error::Result,
    NameMatcher,
    validation::{valid_genre, valid_state},
};

pub const DEFAULT_SEEKING_DESCRIPTION: &str = "No seeking for talents";

#[derive(Debug, Serialize, Deserialize, Clone, Default, Validate)]
pub struct CreateVenue {
    #[garde(length(min = 1, max = 255))]
    pub name: String,
    #[garde(length(min = 1, max = 120))]
    pub city: String,
    #[garde(custom(valid_state))]
    pub state: String,
    #[garde(length(min = 1, max = 120))]
    pub address: String,
    #[garde(length(max = 120), pattern(r"^[0-9+()./ -]{3,}$"))]
    pub phone: Option<String>,
    #[garde(length(max = 500), url)]
    pub image_link: Option<String>,
    #[garde(length(max = 120), url)]
    pub facebook_link: Option<String>,
    #[garde(length(max = 500), url)]
    pub website: Option<String>,
    #[garde(inner(custom(valid_genre)))]
    pub genres: Vec<String>,
    #[garde(skip)]
    pub seeking_talent: bool,
    #[garde(length(max = 5000))]
    pub seeking_description: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct VenueInt {
    id: i64,
    name: String,
    city: String,
    state: String,
    address: String,
    phone: Option<String>,
    image_link: Option<String>,
    facebook_link: Option<String>,
    website: Option<String>,
    genres: String,
    seeking_talent: bool,
    seeking_description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: GenreList,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl From<VenueInt> for Venue {
    fn from(value: VenueInt) -> Self {
        Self {
            id: value.id,
            name: value.name,
            city: value.city,
            state: value.state,
            address: value.address,
            phone: value.phone,
            image_link: value.image_link,
            facebook_link: value.facebook_link,
            website: value.website,
            genres: GenreList::decode(&value.genres),
            seeking_talent: value.seeking_talent,
            seeking_description: value.seeking_description,
        }
    }
}

impl From<Venue> for CreateVenue {
    fn from(value: Venue) -> Self {
        Self {
            name: value.name,
            city: value.city,
            state: value.state,
            address: value.address,
            phone: value.phone,
            image_link: value.image_link,
            facebook_link: value.facebook_link,
            website: value.website,
            genres: value.genres.into_inner(),
            seeking_talent: value.seeking_talent,
            seeking_description: value.seeking_description,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct VenueShort {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Venues sharing the same city and state
#[derive(Debug, Serialize, Clone)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

#[derive(Debug, sqlx::FromRow)]
struct VenueUpcomingInt {
    id: i64,
    name: String,
    city: String,
    state: String,
    num_upcoming_shows: i64,
}

pub type VenueRepository = VenueRepositoryImpl<crate::Pool>;

pub struct VenueRepositoryImpl<E> {
    executor: E,
}

const SELECT_VENUE: &str = "SELECT id, name, city, state, address, phone, image_link, facebook_link, website, genres, seeking_talent, seeking_description FROM venue";

impl<'c, E> VenueRepositoryImpl<E>
where
    for<'a> &'a E: Executor<'c, Database = ChosenDB> + Acquire<'c, Database = ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn create(&self, payload: CreateVenue) -> Result<Venue> {
        let genres = GenreList::from(payload.genres).encode();
        let seeking_description = payload
            .seeking_description
            .unwrap_or_else(|| DEFAULT_SEEKING_DESCRIPTION.to_string());
        let mut tx = self.executor.begin().await?;
        let result = sqlx::query(
            "INSERT INTO venue (name, city, state, address, phone, image_link, facebook_link, website, genres, seeking_talent, seeking_description)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&payload.name)
        .bind(&payload.city)
        .bind(&payload.state)
        .bind(&payload.address)
        .bind(&payload.phone)
        .bind(&payload.image_link)
        .bind(&payload.facebook_link)
        .bind(&payload.website)
        .bind(&genres)
        .bind(payload.seeking_talent)
        .bind(&seeking_description)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        let id = result.last_insert_rowid();
        debug!("Created venue {id}");
        self.get(id).await
    }

    /// Replaces all editable fields
    pub async fn update(&self, id: i64, payload: CreateVenue) -> Result<Venue> {
        let genres = GenreList::from(payload.genres).encode();
        let seeking_description = payload
            .seeking_description
            .unwrap_or_else(|| DEFAULT_SEEKING_DESCRIPTION.to_string());
        let mut tx = self.executor.begin().await?;
        let result = sqlx::query(
            "UPDATE venue SET name = ?, city = ?, state = ?, address = ?, phone = ?, image_link = ?,
            facebook_link = ?, website = ?, genres = ?, seeking_talent = ?, seeking_description = ?
            WHERE id = ?",
        )
        .bind(&payload.name)
        .bind(&payload.city)
        .bind(&payload.state)
        .bind(&payload.address)
        .bind(&payload.phone)
        .bind(&payload.image_link)
        .bind(&payload.facebook_link)
        .bind(&payload.website)
        .bind(&genres)
        .bind(payload.seeking_talent)
        .bind(&seeking_description)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RecordNotFound("Venue".to_string()));
        }
        tx.commit().await?;
        self.get(id).await
    }

    /// Deletes venue, its shows are removed by cascade
    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.executor.begin().await?;
        let res = sqlx::query("DELETE FROM venue WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if res.rows_affected() == 0 {
            Err(Error::RecordNotFound("Venue".to_string()))
        } else {
            tx.commit().await?;
            Ok(())
        }
    }

    pub async fn get(&self, id: i64) -> Result<Venue> {
        let sql = format!("{SELECT_VENUE} WHERE id = ?");
        sqlx::query_as::<_, VenueInt>(&sql)
            .bind(id)
            .fetch_optional(&self.executor)
            .await?
            .map(Venue::from)
            .ok_or_else(|| Error::RecordNotFound("Venue".to_string()))
    }

    pub async fn list_short(&self) -> Result<Vec<VenueShort>> {
        let records =
            sqlx::query_as::<_, VenueShort>("SELECT id, name FROM venue ORDER BY name, id")
                .fetch_all(&self.executor)
                .await?;
        Ok(records)
    }

    /// Case insensitive substring match on name, empty term matches everything
    pub async fn search(&self, term: &str) -> Result<Vec<VenueShort>> {
        let matcher = NameMatcher::new(term);
        let records = sqlx::query_as::<_, VenueShort>("SELECT id, name FROM venue ORDER BY id")
            .fetch_all(&self.executor)
            .await?;
        Ok(records
            .into_iter()
            .filter(|v| matcher.matches(&v.name))
            .collect())
    }

    /// All venues grouped by (city, state), each with count of shows starting after `now`
    pub async fn list_by_area(&self, now: PrimitiveDateTime) -> Result<Vec<VenueArea>> {
        const SQL: &str = r#"
        SELECT v.id, v.name, v.city, v.state,
        (SELECT COUNT(*) FROM show s WHERE s.venue_id = v.id AND s.start_time > ?) AS num_upcoming_shows
        FROM venue v
        ORDER BY v.state, v.city, v.id
        "#;
        let rows = sqlx::query_as::<_, VenueUpcomingInt>(SQL)
            .bind(now)
            .fetch_all(&self.executor)
            .await?;

        let mut areas: Vec<VenueArea> = Vec::new();
        for row in rows {
            let venue = VenueSummary {
                id: row.id,
                name: row.name,
                num_upcoming_shows: row.num_upcoming_shows,
            };
            match areas.last_mut() {
                Some(area) if area.city == row.city && area.state == row.state => {
                    area.venues.push(venue)
                }
                _ => areas.push(VenueArea {
                    city: row.city,
                    state: row.state,
                    venues: vec![venue],
                }),
            }
        }
        Ok(areas)
    }
}
