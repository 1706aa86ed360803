use showbook_e2e_tests::{launch_env, sample_artist};
use tracing::info;
use tracing_test::traced_test;

const WILD_SAX: &[(&str, &str)] = &[
    ("name", "The Wild Sax Band"),
    ("city", "San Francisco"),
    ("state", "CA"),
    ("phone", "432-325-5432"),
    ("genres", "Jazz"),
    ("genres", "Classical"),
    ("image_link", "https://images.example.com/sax.jpg"),
];

#[tokio::test]
#[traced_test]
async fn test_create_list_and_search_artists() {
    let env = launch_env("test_create_artist").await.unwrap();

    let (status, body) = env.post_form("/artists/create", WILD_SAX).await.unwrap();
    assert_eq!(status, 200);
    assert!(body.contains("Artist The Wild Sax Band was successfully listed!"));
    env.artists()
        .create(sample_artist("Matt Quevedo"))
        .await
        .unwrap();

    let (status, body) = env.get_page("/artists").await.unwrap();
    assert_eq!(status, 200);
    assert!(body.contains("The Wild Sax Band"));
    assert!(body.contains("Matt Quevedo"));

    let (_, body) = env
        .post_form("/artists/search", &[("search_term", "A")])
        .await
        .unwrap();
    assert!(body.contains(r#"Number of search results for "A": 2"#));
    let (_, body) = env
        .post_form("/artists/search", &[("search_term", "band")])
        .await
        .unwrap();
    assert!(body.contains(r#"Number of search results for "band": 1"#));

    let artist = &env.artists().search("Sax").await.unwrap()[0];
    let (status, body) = env.get_page(&format!("/artists/{}", artist.id)).await.unwrap();
    assert_eq!(status, 200);
    assert!(body.contains("Classical"));
    assert!(body.contains("Not currently seeking performance venues"));
}

#[tokio::test]
#[traced_test]
async fn test_create_artist_with_invalid_input() {
    let env = launch_env("test_invalid_artist").await.unwrap();

    let mut form = WILD_SAX.to_vec();
    form.push(("seeking_venue", "perhaps"));
    let (status, body) = env.post_form("/artists/create", &form).await.unwrap();
    info!("Rejected artist page: {body}");
    assert_eq!(status, 200);
    assert!(body.contains("An error occurred. Artist The Wild Sax Band could not be listed."));
    assert!(env.artists().search("").await.unwrap().is_empty());
}

#[tokio::test]
#[traced_test]
async fn test_edit_and_delete_artist() {
    let env = launch_env("test_edit_artist").await.unwrap();
    let artist = env
        .artists()
        .create(sample_artist("Guns N Petals"))
        .await
        .unwrap();
    let id = artist.id;

    let (status, body) = env.get_page(&format!("/artists/{id}/edit")).await.unwrap();
    assert_eq!(status, 200);
    assert!(body.contains(r#"value="Guns N Petals""#));
    assert!(body.contains(r#"<option value="Rock n Roll" selected>"#));

    let mut form = WILD_SAX.to_vec();
    form.push(("seeking_venue", "y"));
    form.push(("seeking_description", "Looking for a weekly residency"));
    let (status, body) = env
        .post_form(&format!("/artists/{id}/edit"), &form)
        .await
        .unwrap();
    assert_eq!(status, 200);
    assert!(body.contains(&format!("Artist {id} has been successfully updated")));
    assert!(body.contains("Currently seeking performance venues"));

    let updated = env.artists().get(id).await.unwrap();
    assert_eq!(updated.name, "The Wild Sax Band");
    assert_eq!(updated.phone.as_deref(), Some("432-325-5432"));
    assert_eq!(updated.genres.as_slice(), &["Jazz", "Classical"]);
    assert!(updated.seeking_venue);
    assert_eq!(
        updated.seeking_description.as_deref(),
        Some("Looking for a weekly residency")
    );

    let url = env.url(&format!("artists/{id}"));
    let response = env.client.delete(url.clone()).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 204);
    let response = env.client.delete(url).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 404);
    assert!(env.artists().get(id).await.is_err());
}
