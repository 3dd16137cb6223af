use anyhow::Result;
use clap::Parser;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use warden_infrastructure::{ConfigOverrides, CONFIG_ENV};

#[derive(Parser, Debug)]
#[command(name = "reforger-warden")]
#[command(about = "Watches the game server console log and kicks non-whitelisted players", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Whitelist backend: json or database
    #[arg(long, value_name = "TYPE")]
    whitelist_type: Option<String>,

    /// Path to the whitelist file (JSON document or SQLite database)
    #[arg(long, value_name = "PATH")]
    whitelist_path: Option<String>,

    /// Directory the game server writes its logs_* directories into
    #[arg(long, value_name = "DIR")]
    base_log_dir: Option<String>,

    /// Remote console host address
    #[arg(long)]
    rcon_host: Option<String>,

    /// Remote console port
    #[arg(long)]
    rcon_port: Option<u16>,

    /// Remote console password
    #[arg(long)]
    rcon_password: Option<String>,

    /// Seconds between liveness log messages
    #[arg(long, value_name = "SECONDS")]
    heartbeat: Option<u64>,

    /// Directory for this application's own log file
    #[arg(long, value_name = "DIR")]
    log_dir: Option<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            whitelist_type: self.whitelist_type.clone(),
            whitelist_path: self.whitelist_path.clone(),
            base_log_dir: self.base_log_dir.clone(),
            rcon_host: self.rcon_host.clone(),
            rcon_port: self.rcon_port,
            rcon_password: self.rcon_password.clone(),
            heartbeat_seconds: self.heartbeat,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = &args.config {
        std::env::set_var(CONFIG_ENV, config);
    }

    let log_dir = args
        .log_dir
        .clone()
        .or_else(|| std::env::var("WARDEN_LOG_DIR").ok())
        .unwrap_or_else(|| "./logs".to_string());
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::never(&log_dir, "whitelist.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(file_writer.and(std::io::stdout))
        .with_ansi(false)
        .init();

    warden_bootstrap::run_standalone(args.overrides()).await
}
