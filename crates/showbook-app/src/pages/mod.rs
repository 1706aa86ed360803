use askama::Template;
use axum::{
    extract::{FromRequestParts, Path},
    response::{Html, IntoResponse, Response},
};
use http::{request::Parts, StatusCode};
use showbook_dal::show::{ArtistShow, VenueShow};
use showbook_types::{
    choices::{GENRES, STATES},
    datetime::format_show_time,
};

use crate::{
    error::{error_page, ApiError, ApiResult},
    flash::{Flash, Notification},
};

pub mod artist;
pub mod show;
pub mod venue;

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub notifications: Vec<Notification>,
}

#[derive(Template, Default)]
#[template(path = "errors/404.html")]
pub struct NotFoundTemplate {
    pub notifications: Vec<Notification>,
}

#[derive(Template, Default)]
#[template(path = "errors/500.html")]
pub struct ServerErrorTemplate {
    pub notifications: Vec<Notification>,
}

/// Option of a select element
pub struct Choice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl Choice {
    pub fn new(value: impl ToString, label: impl Into<String>, selected: bool) -> Self {
        Choice {
            value: value.to_string(),
            label: label.into(),
            selected,
        }
    }
}

pub fn state_choices(selected: &str) -> Vec<Choice> {
    STATES
        .iter()
        .map(|s| Choice::new(s, *s, *s == selected))
        .collect()
}

pub fn genre_choices(selected: &[String]) -> Vec<Choice> {
    GENRES
        .iter()
        .map(|g| Choice::new(g, *g, selected.iter().any(|s| s.as_str() == *g)))
        .collect()
}

/// Show on a detail page, pointing to the other side of the booking
pub struct ShowCard {
    pub id: i64,
    pub name: String,
    pub image_link: Option<String>,
    pub start_time: String,
}

impl From<VenueShow> for ShowCard {
    fn from(value: VenueShow) -> Self {
        ShowCard {
            id: value.artist_id,
            name: value.artist_name,
            image_link: value.artist_image_link,
            start_time: format_show_time(&value.start_time),
        }
    }
}

impl From<ArtistShow> for ShowCard {
    fn from(value: ArtistShow) -> Self {
        ShowCard {
            id: value.venue_id,
            name: value.venue_name,
            image_link: value.venue_image_link,
            start_time: format_show_time(&value.start_time),
        }
    }
}

/// Results of name search, same shape for venues and artists
#[derive(Template)]
#[template(path = "pages/search.html")]
pub struct SearchTemplate {
    pub notifications: Vec<Notification>,
    /// path prefix of found records
    pub kind: &'static str,
    pub search_term: String,
    pub count: usize,
    pub results: Vec<SearchHit>,
}

pub struct SearchHit {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

pub fn render<T: Template>(template: T) -> ApiResult<Html<String>> {
    Ok(Html(template.render()?))
}

pub fn home_page(flash: &Flash) -> ApiResult<Html<String>> {
    render(HomeTemplate {
        notifications: flash.take(),
    })
}

pub async fn home(flash: Flash) -> ApiResult<Html<String>> {
    home_page(&flash)
}

pub async fn not_found() -> Response {
    error_page(StatusCode::NOT_FOUND)
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Integer id from the path, anything else is treated as a missing record
pub struct EntityId(pub i64);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::NotFound(format!("Invalid path: {e}")))?;
        raw.parse::<i64>()
            .map(EntityId)
            .map_err(|_| ApiError::NotFound(format!("Invalid id {raw}")))
    }
}
