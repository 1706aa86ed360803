use askama::Template;
use axum::{response::Html, routing::get, Form};
use showbook_dal::{
    artist::ArtistRepository,
    show::{ShowListing, ShowRepository},
    venue::VenueRepository,
};
use showbook_types::datetime::{format_show_time, local_now};
use tracing::{info, warn};

use super::{home_page, render, Choice};
use crate::{
    error::ApiResult,
    flash::{Flash, Notification},
    forms::{self, Submitted},
    state::AppState,
};

crate::repository_from_request!(ShowRepository);

/// Row of the shows listing
struct ShowRow {
    venue_id: i64,
    venue_name: String,
    artist_id: i64,
    artist_name: String,
    artist_image_link: Option<String>,
    start_time: String,
}

impl From<ShowListing> for ShowRow {
    fn from(value: ShowListing) -> Self {
        ShowRow {
            venue_id: value.venue_id,
            venue_name: value.venue_name,
            artist_id: value.artist_id,
            artist_name: value.artist_name,
            artist_image_link: value.artist_image_link,
            start_time: format_show_time(&value.start_time),
        }
    }
}

#[derive(Template)]
#[template(path = "pages/shows.html")]
struct ShowsTemplate {
    notifications: Vec<Notification>,
    shows: Vec<ShowRow>,
}

#[derive(Template)]
#[template(path = "forms/show.html")]
struct ShowFormTemplate {
    notifications: Vec<Notification>,
    venues: Vec<Choice>,
    artists: Vec<Choice>,
    start_time: String,
}

pub async fn shows(repository: ShowRepository, flash: Flash) -> ApiResult<Html<String>> {
    let shows = repository.list().await?;
    render(ShowsTemplate {
        notifications: flash.take(),
        shows: shows.into_iter().map(ShowRow::from).collect(),
    })
}

pub async fn create_show_form(
    venues: VenueRepository,
    artists: ArtistRepository,
    flash: Flash,
) -> ApiResult<Html<String>> {
    let venues = venues
        .list_short()
        .await?
        .into_iter()
        .map(|v| Choice::new(v.id, v.name, false))
        .collect();
    let artists = artists
        .list()
        .await?
        .into_iter()
        .map(|a| Choice::new(a.id, a.name, false))
        .collect();
    render(ShowFormTemplate {
        notifications: flash.take(),
        venues,
        artists,
        start_time: format_show_time(&local_now()),
    })
}

pub async fn create_show(
    repository: ShowRepository,
    flash: Flash,
    Form(submitted): Form<Submitted>,
) -> ApiResult<Html<String>> {
    let outcome = match forms::parse_show(&submitted) {
        Ok(payload) => repository.create(payload).await.map_err(anyhow::Error::from),
        Err(e) => Err(e.into()),
    };
    match outcome {
        Ok(show) => {
            info!(
                "Show of artist {} at venue {} listed",
                show.artist_id, show.venue_id
            );
            flash.success("Show was successfully listed!");
        }
        Err(e) => {
            warn!("Show could not be listed: {e}");
            flash.error("An error occurred. Show could not be listed.");
        }
    }
    home_page(&flash)
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", get(shows))
        .route("/create", get(create_show_form).post(create_show))
}
