use garde::Validate;
use serde::{Deserialize, Serialize};
use showbook_types::GenreList;
use sqlx::{Acquire, Executor};
use tracing::debug;

use crate::{
    ChosenDB, Error,
    error::Result,
    NameMatcher,
    validation::{valid_genre, valid_state},
};

#[derive(Debug, Serialize, Deserialize, Clone, Default, Validate)]
pub struct CreateArtist {
    #[garde(length(min = 1, max = 255))]
    pub name: String,
    #[garde(length(min = 1, max = 120))]
    pub city: String,
    #[garde(custom(valid_state))]
    pub state: String,
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
    pub seeking_venue: bool,
    #[garde(length(max = 5000))]
    pub seeking_description: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ArtistInt {
    id: i64,
    name: String,
    city: String,
    state: String,
    phone: Option<String>,
    image_link: Option<String>,
    facebook_link: Option<String>,
    website: Option<String>,
    genres: String,
    seeking_venue: bool,
    seeking_description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: GenreList,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl From<ArtistInt> for Artist {
    fn from(value: ArtistInt) -> Self {
        Self {
            id: value.id,
            name: value.name,
            city: value.city,
            state: value.state,
            phone: value.phone,
            image_link: value.image_link,
            facebook_link: value.facebook_link,
            website: value.website,
            genres: GenreList::decode(&value.genres),
            seeking_venue: value.seeking_venue,
            seeking_description: value.seeking_description,
        }
    }
}

impl From<Artist> for CreateArtist {
    fn from(value: Artist) -> Self {
        Self {
            name: value.name,
            city: value.city,
            state: value.state,
            phone: value.phone,
            image_link: value.image_link,
            facebook_link: value.facebook_link,
            website: value.website,
            genres: value.genres.into_inner(),
            seeking_venue: value.seeking_venue,
            seeking_description: value.seeking_description,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct ArtistShort {
    pub id: i64,
    pub name: String,
}

pub type ArtistRepository = ArtistRepositoryImpl<crate::Pool>;

pub struct ArtistRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> ArtistRepositoryImpl<E>
where
    for<'a> &'a E: Executor<'c, Database = ChosenDB> + Acquire<'c, Database = ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn create(&self, payload: CreateArtist) -> Result<Artist> {
        let genres = GenreList::from(payload.genres).encode();
        let mut tx = self.executor.begin().await?;
        let result = sqlx::query(
            "INSERT INTO artist (name, city, state, phone, image_link, facebook_link, website, genres, seeking_venue, seeking_description)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&payload.name)
        .bind(&payload.city)
        .bind(&payload.state)
        .bind(&payload.phone)
        .bind(&payload.image_link)
        .bind(&payload.facebook_link)
        .bind(&payload.website)
        .bind(&genres)
        .bind(payload.seeking_venue)
        .bind(&payload.seeking_description)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        let id = result.last_insert_rowid();
        debug!("Created artist {id}");
        self.get(id).await
    }

    /// Replaces all editable fields in one statement
    pub async fn update(&self, id: i64, payload: CreateArtist) -> Result<Artist> {
        let genres = GenreList::from(payload.genres).encode();
        let mut tx = self.executor.begin().await?;
        let result = sqlx::query(
            "UPDATE artist SET name = ?, city = ?, state = ?, phone = ?, image_link = ?, facebook_link = ?,
            website = ?, genres = ?, seeking_venue = ?, seeking_description = ?
            WHERE id = ?",
        )
        .bind(&payload.name)
        .bind(&payload.city)
        .bind(&payload.state)
        .bind(&payload.phone)
        .bind(&payload.image_link)
        .bind(&payload.facebook_link)
        .bind(&payload.website)
        .bind(&genres)
        .bind(payload.seeking_venue)
        .bind(&payload.seeking_description)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RecordNotFound("Artist".to_string()));
        }
        tx.commit().await?;
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.executor.begin().await?;
        let res = sqlx::query("DELETE FROM artist WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if res.rows_affected() == 0 {
            Err(Error::RecordNotFound("Artist".to_string()))
        } else {
            tx.commit().await?;
            Ok(())
        }
    }

    pub async fn get(&self, id: i64) -> Result<Artist> {
        sqlx::query_as::<_, ArtistInt>(
            "SELECT id, name, city, state, phone, image_link, facebook_link, website, genres, seeking_venue, seeking_description
            FROM artist WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.executor)
        .await?
        .map(Artist::from)
        .ok_or_else(|| Error::RecordNotFound("Artist".to_string()))
    }

    /// Flat listing in insertion order
    pub async fn list(&self) -> Result<Vec<ArtistShort>> {
        let records = sqlx::query_as::<_, ArtistShort>("SELECT id, name FROM artist ORDER BY id")
            .fetch_all(&self.executor)
            .await?;
        Ok(records)
    }

    /// Case insensitive substring match on name, empty term matches everything
    pub async fn search(&self, term: &str) -> Result<Vec<ArtistShort>> {
        let matcher = NameMatcher::new(term);
        let records = self.list().await?;
        Ok(records
            .into_iter()
            .filter(|a| matcher.matches(&a.name))
            .collect())
    }
}
