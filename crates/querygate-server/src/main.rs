mod config;
mod gateway;
mod server;


use clap::Parser;
use config::Config;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "querygate", about = "Runs SQL statements posted over HTTP and answers in JSON")]
struct Args {
    /// TOML config file; built-in defaults apply when omitted
    #[arg(long)]
    config: Option<String>,
    #[arg(long)]
    listen_addr: Option<String>,
    #[arg(long, env = "QUERYGATE_DATABASE_URL")]
    database_url: Option<String>,
}

impl Args {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_path(path)?,
            None => Config::default(),
        };
        if let Some(addr) = &self.listen_addr {
            config.server.listen_addr = addr.clone();
        }
        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let result = match args.load_config() {
        Ok(config) => server::run(config).await,
        Err(err) => Err(err),
    };
    if let Err(err) = &result {
        error!("querygate exiting: {err:#}");
    }
    result
}
