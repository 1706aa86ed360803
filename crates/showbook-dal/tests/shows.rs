mod common;

use common::{artist, init_db, init_file_db, venue};
use showbook_dal::{
    Error, When,
    artist::ArtistRepositoryImpl,
    show::{CreateShow, ShowRepositoryImpl},
    venue::VenueRepositoryImpl,
};
use time::macros::datetime;

#[tokio::test]
async fn test_show_requires_existing_records() {
    let conn = init_db().await;
    let venues = VenueRepositoryImpl::new(conn.clone());
    let shows = ShowRepositoryImpl::new(conn.clone());
    let v = venues
        .create(venue("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();

    let res = shows
        .create(CreateShow {
            venue_id: v.id,
            artist_id: 42,
            start_time: datetime!(2035-04-01 20:00:00),
        })
        .await;
    assert!(matches!(res, Err(Error::ConstraintViolation(_))));
    assert!(shows.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_show_rejected() {
    let (conn, _dir) = init_file_db().await;
    let venues = VenueRepositoryImpl::new(conn.clone());
    let artists = ArtistRepositoryImpl::new(conn.clone());
    let shows = ShowRepositoryImpl::new(conn.clone());
    let v = venues
        .create(venue("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let a = artists.create(artist("Guns N Petals")).await.unwrap();

    let payload = CreateShow {
        venue_id: v.id,
        artist_id: a.id,
        start_time: datetime!(2035-04-01 20:00:00),
    };
    let (first, second) = tokio::join!(shows.create(payload.clone()), shows.create(payload));
    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        results
            .iter()
            .filter(|r| matches!(r, Err(Error::ConstraintViolation(_))))
            .count(),
        1
    );
    assert_eq!(shows.list().await.unwrap().len(), 1);

    // same pair at another time is a different show
    shows
        .create(CreateShow {
            venue_id: v.id,
            artist_id: a.id,
            start_time: datetime!(2035-04-08 20:00:00),
        })
        .await
        .unwrap();
    assert_eq!(shows.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_past_and_upcoming_partition() {
    let conn = init_db().await;
    let venues = VenueRepositoryImpl::new(conn.clone());
    let artists = ArtistRepositoryImpl::new(conn.clone());
    let shows = ShowRepositoryImpl::new(conn.clone());
    let hop = venues
        .create(venue("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let park = venues
        .create(venue("Park Square Live Music", "San Francisco", "CA"))
        .await
        .unwrap();
    let petals = artists.create(artist("Guns N Petals")).await.unwrap();
    let sax = artists.create(artist("The Wild Sax Band")).await.unwrap();

    let bookings = [
        (hop.id, petals.id, datetime!(2019-05-21 21:30:00)),
        (park.id, sax.id, datetime!(2019-06-15 23:00:00)),
        (park.id, petals.id, datetime!(2035-04-01 20:00:00)),
        (park.id, sax.id, datetime!(2035-04-08 20:00:00)),
        (park.id, sax.id, datetime!(2035-04-15 20:00:00)),
    ];
    for (venue_id, artist_id, start_time) in bookings {
        shows
            .create(CreateShow {
                venue_id,
                artist_id,
                start_time,
            })
            .await
            .unwrap();
    }

    let now = datetime!(2025-01-01 00:00:00);

    let upcoming = shows
        .list_for_venue(park.id, When::Upcoming, now)
        .await
        .unwrap();
    let past = shows.list_for_venue(park.id, When::Past, now).await.unwrap();
    assert_eq!(upcoming.len(), 3);
    assert_eq!(past.len(), 1);
    assert_eq!(past[0].artist_name, "The Wild Sax Band");
    assert_eq!(upcoming[0].artist_name, "Guns N Petals");
    assert_eq!(upcoming[0].start_time, datetime!(2035-04-01 20:00:00));
    assert_eq!(
        shows
            .count_for_venue(park.id, When::Upcoming, now)
            .await
            .unwrap(),
        3
    );
    assert_eq!(
        shows.count_for_venue(park.id, When::Past, now).await.unwrap(),
        1
    );

    let sax_upcoming = shows
        .list_for_artist(sax.id, When::Upcoming, now)
        .await
        .unwrap();
    let sax_past = shows
        .list_for_artist(sax.id, When::Past, now)
        .await
        .unwrap();
    assert_eq!(sax_upcoming.len(), 2);
    assert_eq!(sax_past.len(), 1);
    assert_eq!(sax_past[0].venue_name, "Park Square Live Music");
    assert_eq!(
        shows
            .count_for_artist(sax.id, When::Upcoming, now)
            .await
            .unwrap()
            + shows
                .count_for_artist(sax.id, When::Past, now)
                .await
                .unwrap(),
        3
    );

    let hop_upcoming = shows
        .count_for_venue(hop.id, When::Upcoming, now)
        .await
        .unwrap();
    assert_eq!(hop_upcoming, 0);

    let all = shows.list().await.unwrap();
    assert_eq!(all.len(), bookings.len());
    assert_eq!(all[0].venue_name, "The Musical Hop");
    assert_eq!(all[0].artist_name, "Guns N Petals");
    assert_eq!(
        all[0].artist_image_link.as_deref(),
        Some("https://images.example.com/guns.jpg")
    );
}

#[tokio::test]
async fn test_show_starting_now_is_past() {
    let conn = init_db().await;
    let venues = VenueRepositoryImpl::new(conn.clone());
    let artists = ArtistRepositoryImpl::new(conn.clone());
    let shows = ShowRepositoryImpl::new(conn.clone());
    let hop = venues
        .create(venue("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let sax = artists.create(artist("The Wild Sax Band")).await.unwrap();

    let now = datetime!(2030-06-01 20:00:00);
    for start_time in [
        datetime!(2030-06-01 19:59:59),
        now,
        datetime!(2030-06-01 20:00:01),
    ] {
        shows
            .create(CreateShow {
                venue_id: hop.id,
                artist_id: sax.id,
                start_time,
            })
            .await
            .unwrap();
    }

    let past = shows.list_for_venue(hop.id, When::Past, now).await.unwrap();
    let upcoming = shows
        .list_for_venue(hop.id, When::Upcoming, now)
        .await
        .unwrap();
    assert_eq!(past.len(), 2);
    assert_eq!(past[1].start_time, now);
    assert_eq!(upcoming.len(), 1);
    assert!(upcoming.iter().all(|s| s.start_time > now));

    let artist_past = shows.list_for_artist(sax.id, When::Past, now).await.unwrap();
    assert!(artist_past.iter().any(|s| s.start_time == now));
    let artist_upcoming = shows
        .list_for_artist(sax.id, When::Upcoming, now)
        .await
        .unwrap();
    assert!(artist_upcoming.iter().all(|s| s.start_time != now));

    let past_count = shows.count_for_venue(hop.id, When::Past, now).await.unwrap();
    let upcoming_count = shows
        .count_for_venue(hop.id, When::Upcoming, now)
        .await
        .unwrap();
    assert_eq!(past_count, 2);
    assert_eq!(upcoming_count, 1);
    assert_eq!(past_count + upcoming_count, 3);
    assert_eq!(
        shows.count_for_artist(sax.id, When::Past, now).await.unwrap()
            + shows
                .count_for_artist(sax.id, When::Upcoming, now)
                .await
                .unwrap(),
        3
    );

    let areas = venues.list_by_area(now).await.unwrap();
    assert_eq!(areas[0].venues[0].num_upcoming_shows, 1);
}
