#![allow(dead_code)]

use showbook_dal::{artist::CreateArtist, venue::CreateVenue};
use sqlx::Executor;
use tempfile::TempDir;

pub async fn init_db() -> showbook_dal::Pool {
    const DB_URL: &str = "sqlite::memory:";
    let conn = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect(DB_URL)
        .await
        .unwrap();
    conn.execute("PRAGMA foreign_keys = ON").await.unwrap();
    showbook_dal::migrate(&conn).await.unwrap();
    conn
}

/// File backed database with a pool of several connections, so that
/// concurrent transactions really run on separate connections
pub async fn init_file_db() -> (showbook_dal::Pool, TempDir) {
    let dir = TempDir::with_prefix("showbook_dal_").unwrap();
    let url = format!("sqlite://{}", dir.path().join("showbook.db").display());
    let pool = showbook_dal::new_pool(&url).await.unwrap();
    showbook_dal::migrate(&pool).await.unwrap();
    (pool, dir)
}

pub fn venue(name: &str, city: &str, state: &str) -> CreateVenue {
    CreateVenue {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: "1015 Folsom Street".to_string(),
        phone: Some("123-123-1234".to_string()),
        image_link: None,
        facebook_link: Some("https://www.facebook.com/TheMusicalHop".to_string()),
        website: None,
        genres: vec!["Jazz".to_string(), "Blues".to_string()],
        seeking_talent: true,
        seeking_description: None,
    }
}

pub fn artist(name: &str) -> CreateArtist {
    CreateArtist {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: Some("326-123-5000".to_string()),
        image_link: Some("https://images.example.com/guns.jpg".to_string()),
        facebook_link: None,
        website: None,
        genres: vec!["Rock n Roll".to_string()],
        seeking_venue: false,
        seeking_description: None,
    }
}
