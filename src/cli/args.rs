use clap::Parser;
use std::env;

use crate::cli::command::Command;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Quote and contact intake backend for the Clique procurement site",
    long_about = "Accepts quote requests and contact messages, and serves testimonials and FAQ entries to the site front end over a JSON HTTP API.",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite://.clique/clique.sqlite",
        value_name = "URL",
        help = "Document store connection string"
    )]
    pub database_url: String,

    #[arg(
        long = "api-listen",
        env = "CLIQUE_API_LISTEN",
        value_name = "ADDR",
        default_value = "0.0.0.0:8001",
        help = "REST API listen address (host:port)"
    )]
    pub api_listen: std::net::SocketAddr,

    #[arg(
        long = "storage-timeout-ms",
        env = "CLIQUE_STORAGE_TIMEOUT_MS",
        default_value_t = 5000u64,
        value_name = "MS",
        help = "Fail a storage call that takes longer than MS milliseconds"
    )]
    pub storage_timeout_ms: u64,

    #[arg(
        long,
        default_value_t = false,
        help = "Reset all persisted state (delete the SQLite database) before starting"
    )]
    pub reset: bool,

    #[arg(
        long = "log-file",
        env = "CLIQUE_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    dotenvy::from_filename(&dotenv_path).ok();

    Cli::parse()
}
