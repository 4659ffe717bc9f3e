use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use structopt::StructOpt;
use tracing::{debug, info, warn};

use hit_counter::server::{self, AppState};
use hit_counter::{init_logging, AppConfig, CounterStore, MemoryStore, RedisStore, Result};

#[derive(Debug, StructOpt)]
#[structopt(name = "hit_counter", about = "Counts visits in a shared Redis counter")]
struct Opt {
    /// JSON configuration file; environment variables and flags override it
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Address to listen on
    #[structopt(long)]
    bind: Option<String>,

    /// Port to listen on
    #[structopt(short, long)]
    port: Option<u16>,

    /// Development mode: debug logs and error details in responses
    #[structopt(short, long)]
    debug: bool,

    /// Keep the counter in process memory instead of Redis
    #[structopt(long)]
    in_memory: bool,

    /// Emit logs as JSON
    #[structopt(long)]
    json_logs: bool,
}

impl Opt {
    fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let mut config = AppConfig::from_json_file(path)?;
                config.apply_env()?;
                config
            }
            None => AppConfig::from_env()?,
        };

        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.debug {
            config.server.debug = true;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let opt = Opt::from_args();
    let config = opt.load_config()?;

    init_logging(config.server.debug, opt.json_logs);
    debug!(config = %serde_json::to_string(&config)?, "Configuration loaded");

    let store: Arc<dyn CounterStore> = if opt.in_memory {
        info!("Using in-memory counter store");
        Arc::new(MemoryStore::new())
    } else {
        if config.store.host.is_empty() {
            warn!("REDIS_HOST is not set; every request will fail to reach the store");
        }
        info!(
            host = %config.store.host,
            port = config.store.port,
            key = %config.store.key,
            "Using Redis counter store"
        );
        Arc::new(RedisStore::connect(config.store.clone())?)
    };

    let state = AppState::new(store, &config);
    server::serve(&config.server, state).await
}
