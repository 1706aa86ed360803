use anyhow::Result;
use futures::FutureExt as _;
use reqwest::Url;
use showbook_dal::{
    Pool,
    artist::{ArtistRepository, CreateArtist},
    venue::{CreateVenue, VenueRepository},
};
use showbook_server::{
    build_state,
    config::{Parser, ServerConfig},
    run::serve,
};
use tempfile::TempDir;
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{error, info};

pub struct ConfigGuard {
    #[allow(dead_code)]
    data_dir: TempDir,
}

pub fn test_config(test_name: &str) -> Result<(ServerConfig, ConfigGuard)> {
    let tmp_data_dir = TempDir::with_prefix(format!("{}_", test_name))?;
    let data_dir = tmp_data_dir.path().to_string_lossy().to_string();
    let args = &[
        "showbook-e2e-tests",
        "--data-dir",
        &data_dir,
        "--listen-address",
        "127.0.0.1",
        "--port",
        "0",
        "--debug",
    ];
    let config = ServerConfig::try_parse_from(args)?;
    Ok((
        config,
        ConfigGuard {
            data_dir: tmp_data_dir,
        },
    ))
}

/// Running server, stopped when dropped
pub struct TestEnv {
    pub client: reqwest::Client,
    pub base_url: Url,
    pub pool: Pool,
    shutdown: Option<oneshot::Sender<()>>,
    _config_guard: ConfigGuard,
}

impl TestEnv {
    pub fn url(&self, path: &str) -> Url {
        self.base_url.join(path).unwrap()
    }

    pub fn venues(&self) -> VenueRepository {
        VenueRepository::new(self.pool.clone())
    }

    pub fn artists(&self) -> ArtistRepository {
        ArtistRepository::new(self.pool.clone())
    }

    pub async fn get_page(&self, path: &str) -> Result<(u16, String)> {
        let response = self.client.get(self.url(path)).send().await?;
        let status = response.status().as_u16();
        Ok((status, response.text().await?))
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<(u16, String)> {
        let response = self.client.post(self.url(path)).form(form).send().await?;
        let status = response.status().as_u16();
        Ok((status, response.text().await?))
    }
}

impl Drop for TestEnv {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

pub async fn launch_env(test_name: &str) -> Result<TestEnv> {
    let (args, config_guard) = test_config(test_name)?;
    let state = build_state(&args).await?;
    let pool = state.pool().clone();

    let listener = TcpListener::bind((args.listen_address.as_str(), args.port)).await?;
    let base_url = Url::parse(&format!("http://{}/", listener.local_addr()?))?;
    info!("Test server for {test_name} at {base_url}");

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        if let Err(e) = serve(listener, &args, state, rx.map(|_| ())).await {
            error!("Test server failed: {e}");
        }
    });

    let client = reqwest::Client::builder().cookie_store(true).build()?;
    Ok(TestEnv {
        client,
        base_url,
        pool,
        shutdown: Some(tx),
        _config_guard: config_guard,
    })
}

pub fn sample_venue(name: &str) -> CreateVenue {
    CreateVenue {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        address: "1015 Folsom Street".to_string(),
        phone: Some("123-123-1234".to_string()),
        image_link: None,
        facebook_link: None,
        website: Some("https://www.themusicalhop.com".to_string()),
        genres: vec!["Jazz".to_string(), "Folk".to_string()],
        seeking_talent: true,
        seeking_description: None,
    }
}

pub fn sample_artist(name: &str) -> CreateArtist {
    CreateArtist {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: Some("326-123-5000".to_string()),
        image_link: Some("https://images.example.com/artist.jpg".to_string()),
        facebook_link: None,
        website: None,
        genres: vec!["Rock n Roll".to_string()],
        seeking_venue: false,
        seeking_description: None,
    }
}
