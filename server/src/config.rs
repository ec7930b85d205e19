//! Command-line and environment configuration.

use clap::Parser;

use crate::store::IdAssignment;
use crate::telemetry::LogFormat;

#[derive(Debug, Clone, Parser)]
#[command(name = "item-server", version, about = "In-memory item store over HTTP")]
pub struct Config {
    /// Address to bind.
    #[arg(long, env = "ITEM_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// How ids are handed to new items.
    #[arg(
        long,
        env = "ITEM_SERVER_ID_ASSIGNMENT",
        value_enum,
        default_value_t = IdAssignment::Sequence
    )]
    pub id_assignment: IdAssignment,

    #[arg(
        long,
        env = "ITEM_SERVER_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,
}

impl Config {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
