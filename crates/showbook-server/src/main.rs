use showbook_server::{config::ServerConfig, init_logging, run::run, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerConfig::load()?;
    init_logging(&args)?;
    run(args).await
}
