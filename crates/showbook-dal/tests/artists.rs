mod common;

use common::{artist, init_db, venue};
use showbook_dal::{
    Error,
    artist::{ArtistRepositoryImpl, CreateArtist},
    show::{CreateShow, ShowRepositoryImpl},
    venue::VenueRepositoryImpl,
};
use time::macros::datetime;

#[tokio::test]
async fn test_artists_listing_and_search() {
    let conn = init_db().await;
    let repo = ArtistRepositoryImpl::new(conn);
    for name in ["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"] {
        repo.create(artist(name)).await.unwrap();
    }

    let all = repo.list().await.unwrap();
    let names = all.iter().map(|a| a.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, ["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"]);

    let found = repo.search("A").await.unwrap();
    assert_eq!(found.len(), 3);
    let found = repo.search("band").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "The Wild Sax Band");
    assert_eq!(repo.search("").await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_artist_search_non_ascii() {
    let conn = init_db().await;
    let repo = ArtistRepositoryImpl::new(conn);
    for name in ["Björk Guðmundsdóttir", "Ólafur Arnalds", "Guns N Petals"] {
        repo.create(artist(name)).await.unwrap();
    }

    let found = repo.search("BJÖRK").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Björk Guðmundsdóttir");
    assert_eq!(repo.search("ólafur").await.unwrap().len(), 1);
    assert_eq!(repo.search("ð").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_artist_update_and_delete() {
    let conn = init_db().await;
    let artists = ArtistRepositoryImpl::new(conn.clone());
    let venues = VenueRepositoryImpl::new(conn.clone());
    let shows = ShowRepositoryImpl::new(conn.clone());

    let created = artists.create(artist("Guns N Petals")).await.unwrap();
    assert_eq!(created.genres.as_slice(), &["Rock n Roll"]);
    assert_eq!(created.seeking_description, None);

    let update = CreateArtist {
        name: "Matt Quevedo".to_string(),
        city: "New York".to_string(),
        state: "NY".to_string(),
        phone: Some("300-400-5000".to_string()),
        image_link: None,
        facebook_link: Some("https://www.facebook.com/mattquevedo923251523".to_string()),
        website: None,
        genres: vec!["Jazz".to_string(), "Musical Theatre".to_string()],
        seeking_venue: true,
        seeking_description: Some("Looking for shows in NY".to_string()),
    };
    let updated = artists.update(created.id, update.clone()).await.unwrap();
    assert_eq!(updated.name, update.name);
    assert_eq!(updated.city, update.city);
    assert_eq!(updated.state, update.state);
    assert_eq!(updated.phone, update.phone);
    assert_eq!(updated.image_link, None);
    assert_eq!(updated.facebook_link, update.facebook_link);
    assert_eq!(updated.genres.as_slice(), &["Jazz", "Musical Theatre"]);
    assert!(updated.seeking_venue);
    assert_eq!(updated.seeking_description, update.seeking_description);

    let v = venues
        .create(venue("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    shows
        .create(CreateShow {
            venue_id: v.id,
            artist_id: created.id,
            start_time: datetime!(2035-04-01 20:00:00),
        })
        .await
        .unwrap();

    artists.delete(created.id).await.unwrap();
    assert!(shows.list().await.unwrap().is_empty());
    assert!(matches!(
        artists.delete(created.id).await,
        Err(Error::RecordNotFound(_))
    ));
    assert!(venues.get(v.id).await.is_ok());
}
