use askama::Template;
use axum::{
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Form,
};
use http::StatusCode;
use showbook_dal::{
    show::ShowRepository,
    venue::{CreateVenue, Venue, VenueArea, VenueRepository},
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

crate::repository_from_request!(VenueRepository);

#[derive(Template)]
#[template(path = "pages/venues.html")]
struct VenuesTemplate {
    notifications: Vec<Notification>,
    areas: Vec<VenueArea>,
}

#[derive(Template)]
#[template(path = "pages/show_venue.html")]
struct VenueDetailTemplate {
    notifications: Vec<Notification>,
    venue: Venue,
    past_shows: Vec<ShowCard>,
    upcoming_shows: Vec<ShowCard>,
    past_shows_count: u64,
    upcoming_shows_count: u64,
}

#[derive(Template)]
#[template(path = "forms/venue.html")]
struct VenueFormTemplate {
    notifications: Vec<Notification>,
    heading: String,
    action: String,
    venue: CreateVenue,
    states: Vec<Choice>,
    genres: Vec<Choice>,
}

impl VenueFormTemplate {
    fn new(flash: &Flash, heading: String, action: String, venue: CreateVenue) -> Self {
        VenueFormTemplate {
            notifications: flash.take(),
            states: state_choices(&venue.state),
            genres: genre_choices(&venue.genres),
            heading,
            action,
            venue,
        }
    }
}

pub async fn venues(repository: VenueRepository, flash: Flash) -> ApiResult<Html<String>> {
    let areas = repository.list_by_area(local_now()).await?;
    render(VenuesTemplate {
        notifications: flash.take(),
        areas,
    })
}

pub async fn search_venues(
    repository: VenueRepository,
    flash: Flash,
    Form(form): Form<SearchForm>,
) -> ApiResult<Html<String>> {
    let results: Vec<SearchHit> = repository
        .search(&form.search_term)
        .await?
        .into_iter()
        .map(|v| SearchHit {
            id: v.id,
            name: v.name,
        })
        .collect();
    render(SearchTemplate {
        notifications: flash.take(),
        kind: "venues",
        search_term: form.search_term,
        count: results.len(),
        results,
    })
}

pub async fn show_venue(
    EntityId(id): EntityId,
    repository: VenueRepository,
    shows: ShowRepository,
    flash: Flash,
) -> ApiResult<Html<String>> {
    let venue = repository.get(id).await?;
    let now = local_now();
    let past_shows = shows.list_for_venue(id, When::Past, now).await?;
    let upcoming_shows = shows.list_for_venue(id, When::Upcoming, now).await?;
    let past_shows_count = shows.count_for_venue(id, When::Past, now).await?;
    let upcoming_shows_count = shows.count_for_venue(id, When::Upcoming, now).await?;

    render(VenueDetailTemplate {
        notifications: flash.take(),
        venue,
        past_shows: past_shows.into_iter().map(ShowCard::from).collect(),
        upcoming_shows: upcoming_shows.into_iter().map(ShowCard::from).collect(),
        past_shows_count,
        upcoming_shows_count,
    })
}

pub async fn create_venue_form(flash: Flash) -> ApiResult<Html<String>> {
    render(VenueFormTemplate::new(
        &flash,
        "List a new venue".to_string(),
        "/venues/create".to_string(),
        CreateVenue::default(),
    ))
}

pub async fn create_venue(
    repository: VenueRepository,
    flash: Flash,
    Form(submitted): Form<Submitted>,
) -> ApiResult<Html<String>> {
    let name = field_value(&submitted, "name").unwrap_or_default().to_string();
    let outcome = match forms::parse_venue(&submitted) {
        Ok(payload) => repository.create(payload).await.map_err(anyhow::Error::from),
        Err(e) => Err(e.into()),
    };
    match outcome {
        Ok(venue) => {
            info!("Venue {} listed with id {}", venue.name, venue.id);
            flash.success(format!("Venue {} was successfully listed!", venue.name));
        }
        Err(e) => {
            warn!("Venue {name} could not be listed: {e}");
            flash.error(format!(
                "An error occurred. Venue {name} could not be listed."
            ));
        }
    }
    home_page(&flash)
}

pub async fn edit_venue_form(
    EntityId(id): EntityId,
    repository: VenueRepository,
    flash: Flash,
) -> ApiResult<Html<String>> {
    let venue = repository.get(id).await?;
    render(VenueFormTemplate::new(
        &flash,
        format!("Edit venue {}", venue.name),
        format!("/venues/{id}/edit"),
        venue.into(),
    ))
}

pub async fn edit_venue(
    EntityId(id): EntityId,
    repository: VenueRepository,
    flash: Flash,
    Form(submitted): Form<Submitted>,
) -> Redirect {
    let outcome = match forms::parse_venue(&submitted) {
        Ok(payload) => repository.update(id, payload).await.map_err(anyhow::Error::from),
        Err(e) => Err(e.into()),
    };
    match outcome {
        Ok(_) => {
            info!("Venue {id} updated");
            flash.success(format!("Venue {id} has been successfully updated"));
        }
        Err(e) => {
            warn!("Venue {id} could not be updated: {e}");
            flash.error(format!("An error occurred, Venue {id} cannot be updated"));
        }
    }
    Redirect::to(&format!("/venues/{id}"))
}

pub async fn delete_venue(
    EntityId(id): EntityId,
    repository: VenueRepository,
    flash: Flash,
) -> impl IntoResponse {
    match repository.delete(id).await {
        Ok(()) => {
            info!("Venue {id} deleted");
            flash.success(format!("Venue with ID: {id} has been deleted"));
            StatusCode::NO_CONTENT
        }
        Err(e) if e.is_not_found() => {
            warn!("Venue {id} not deleted: {e}");
            flash.error(format!("Venue with ID: {id} cannot be deleted"));
            StatusCode::NOT_FOUND
        }
        Err(e) => {
            error!("Venue {id} not deleted: {e}");
            flash.error(format!("Venue with ID: {id} cannot be deleted"));
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", get(venues))
        .route("/search", post(search_venues))
        .route("/create", get(create_venue_form).post(create_venue))
        .route("/{id}", get(show_venue).delete(delete_venue))
        .route("/{id}/edit", get(edit_venue_form).post(edit_venue))
}
