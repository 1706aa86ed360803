use askama::Template;
use axum::{
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Form,
};
use http::StatusCode;
use showbook_dal::{
    artist::{Artist, ArtistRepository, ArtistShort, CreateArtist},
    show::ShowRepository,
    When,
};
use showbook_types::datetime::local_now;
use tracing::{error, info, warn};

use super::{
    genre_choices, home_page, render, state_choices, Choice, EntityId, SearchForm, SearchHit,
    SearchTemplate, ShowCard,
};
use crate::{
    error::ApiResult,
    flash::{Flash, Notification},
    forms::{self, field_value, Submitted},
    state::AppState,
};

crate::repository_from_request!(ArtistRepository);

#[derive(Template)]
#[template(path = "pages/artists.html")]
struct ArtistsTemplate {
    notifications: Vec<Notification>,
    artists: Vec<ArtistShort>,
}

#[derive(Template)]
#[template(path = "pages/show_artist.html")]
struct ArtistDetailTemplate {
    notifications: Vec<Notification>,
    artist: Artist,
    past_shows: Vec<ShowCard>,
    upcoming_shows: Vec<ShowCard>,
    past_shows_count: u64,
    upcoming_shows_count: u64,
}

#[derive(Template)]
#[template(path = "forms/artist.html")]
struct ArtistFormTemplate {
    notifications: Vec<Notification>,
    heading: String,
    action: String,
    artist: CreateArtist,
    states: Vec<Choice>,
    genres: Vec<Choice>,
}

impl ArtistFormTemplate {
    fn new(flash: &Flash, heading: String, action: String, artist: CreateArtist) -> Self {
        ArtistFormTemplate {
            notifications: flash.take(),
            states: state_choices(&artist.state),
            genres: genre_choices(&artist.genres),
            heading,
            action,
            artist,
        }
    }
}

pub async fn artists(repository: ArtistRepository, flash: Flash) -> ApiResult<Html<String>> {
    let artists = repository.list().await?;
    render(ArtistsTemplate {
        notifications: flash.take(),
        artists,
    })
}

pub async fn search_artists(
    repository: ArtistRepository,
    flash: Flash,
    Form(form): Form<SearchForm>,
) -> ApiResult<Html<String>> {
    let results: Vec<SearchHit> = repository
        .search(&form.search_term)
        .await?
        .into_iter()
        .map(|a| SearchHit {
            id: a.id,
            name: a.name,
        })
        .collect();
    render(SearchTemplate {
        notifications: flash.take(),
        kind: "artists",
        search_term: form.search_term,
        count: results.len(),
        results,
    })
}

pub async fn show_artist(
    EntityId(id): EntityId,
    repository: ArtistRepository,
    shows: ShowRepository,
    flash: Flash,
) -> ApiResult<Html<String>> {
    let artist = repository.get(id).await?;
    let now = local_now();
    let past_shows = shows.list_for_artist(id, When::Past, now).await?;
    let upcoming_shows = shows.list_for_artist(id, When::Upcoming, now).await?;
    let past_shows_count = shows.count_for_artist(id, When::Past, now).await?;
    let upcoming_shows_count = shows.count_for_artist(id, When::Upcoming, now).await?;

    render(ArtistDetailTemplate {
        notifications: flash.take(),
        artist,
        past_shows: past_shows.into_iter().map(ShowCard::from).collect(),
        upcoming_shows: upcoming_shows.into_iter().map(ShowCard::from).collect(),
        past_shows_count,
        upcoming_shows_count,
    })
}

pub async fn create_artist_form(flash: Flash) -> ApiResult<Html<String>> {
    render(ArtistFormTemplate::new(
        &flash,
        "List a new artist".to_string(),
        "/artists/create".to_string(),
        CreateArtist::default(),
    ))
}

pub async fn create_artist(
    repository: ArtistRepository,
    flash: Flash,
    Form(submitted): Form<Submitted>,
) -> ApiResult<Html<String>> {
    let name = field_value(&submitted, "name").unwrap_or_default().to_string();
    let outcome = match forms::parse_artist(&submitted) {
        Ok(payload) => repository.create(payload).await.map_err(anyhow::Error::from),
        Err(e) => Err(e.into()),
    };
    match outcome {
        Ok(artist) => {
            info!("Artist {} listed with id {}", artist.name, artist.id);
            flash.success(format!("Artist {} was successfully listed!", artist.name));
        }
        Err(e) => {
            warn!("Artist {name} could not be listed: {e}");
            flash.error(format!(
                "An error occurred. Artist {name} could not be listed."
            ));
        }
    }
    home_page(&flash)
}

pub async fn edit_artist_form(
    EntityId(id): EntityId,
    repository: ArtistRepository,
    flash: Flash,
) -> ApiResult<Html<String>> {
    let artist = repository.get(id).await?;
    render(ArtistFormTemplate::new(
        &flash,
        format!("Edit artist {}", artist.name),
        format!("/artists/{id}/edit"),
        artist.into(),
    ))
}

pub async fn edit_artist(
    EntityId(id): EntityId,
    repository: ArtistRepository,
    flash: Flash,
    Form(submitted): Form<Submitted>,
) -> Redirect {
    let outcome = match forms::parse_artist(&submitted) {
        Ok(payload) => repository.update(id, payload).await.map_err(anyhow::Error::from),
        Err(e) => Err(e.into()),
    };
    match outcome {
        Ok(_) => {
            info!("Artist {id} updated");
            flash.success(format!("Artist {id} has been successfully updated"));
        }
        Err(e) => {
            warn!("Artist {id} could not be updated: {e}");
            flash.error(format!("An error occurred, Artist {id} cannot be updated"));
        }
    }
    Redirect::to(&format!("/artists/{id}"))
}

pub async fn delete_artist(
    EntityId(id): EntityId,
    repository: ArtistRepository,
    flash: Flash,
) -> impl IntoResponse {
    match repository.delete(id).await {
        Ok(()) => {
            info!("Artist {id} deleted");
            flash.success(format!("Artist with ID: {id} has been deleted"));
            StatusCode::NO_CONTENT
        }
        Err(e) if e.is_not_found() => {
            warn!("Artist {id} not deleted: {e}");
            flash.error(format!("Artist with ID: {id} cannot be deleted"));
            StatusCode::NOT_FOUND
        }
        Err(e) => {
            error!("Artist {id} not deleted: {e}");
            flash.error(format!("Artist with ID: {id} cannot be deleted"));
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", get(artists))
        .route("/search", post(search_artists))
        .route("/create", get(create_artist_form).post(create_artist))
        .route("/{id}", get(show_artist).delete(delete_artist))
        .route("/{id}/edit", get(edit_artist_form).post(edit_artist))
}
