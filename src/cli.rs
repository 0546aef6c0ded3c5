use std::net::SocketAddr;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8000")]
    pub addr: SocketAddr,

    /// Database connection string (falls back to `DATABASE_URL`).
    #[arg(long)]
    pub database_url: Option<String>,
}
