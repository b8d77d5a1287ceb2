use config::{Config as ConfigLoader, File};
use serde::Deserialize;

use crate::error::Error;

const DEFAULT_CONFIG_FILE: &str = "config/main";

lazy_static! {
    pub static ref C: Config = parse().expect("Config init failed.");
}

#[derive(Clone, Deserialize, Default, Debug)]
pub struct Config {
    pub db: ConfigDB,
    pub web: ConfigWeb,
    pub n8n: ConfigN8n,
    pub chat: ConfigChat,
}

#[derive(Clone, Deserialize, Default, Debug)]
pub struct ConfigDB {
    /// Full connection string. Wins over the split fields below when non-empty.
    pub url: String,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub db: String,
    pub pool_size: u32,
    /// Seconds to wait for a pooled connection before giving up.
    pub connection_timeout_secs: u64,
}

#[derive(Clone, Deserialize, Default, Debug)]
pub struct ConfigWeb {
    pub listen: String,
    pub port: u16,
}

#[derive(Clone, Deserialize, Default, Debug)]
pub struct ConfigN8n {
    /// Chat assistant webhook.
    pub chat_url: String,
    /// Knowledge base ingestion webhook.
    pub knowledge_base_url: String,
}

#[derive(Clone, Deserialize, Default, Debug)]
pub struct ConfigChat {
    pub dedup_window_secs: u64,
}

impl Config {
    pub fn database_url(&self) -> String {
        if !self.db.url.is_empty() {
            return self.db.url.clone();
        }
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.db.username, self.db.password, self.db.host, self.db.port, self.db.db
        )
    }
}

/// Environment variables the deployment already uses, mapped onto config keys.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("SUPABASE_DB_URL", "db.url"),
    ("DATABASE_URL", "db.url"),
    ("N8N_CHAT_API_URL", "n8n.chat_url"),
    ("N8N_SYNTHFLOW_DATABASE", "n8n.knowledge_base_url"),
    ("WEB_LISTEN", "web.listen"),
    ("WEB_PORT", "web.port"),
    ("CHAT_DEDUP_WINDOW_SECS", "chat.dedup_window_secs"),
];

fn parse() -> Result<Config, Error> {
    let config_file =
        std::env::var("MARKETING_API_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());
    let mut builder = ConfigLoader::builder()
        .set_default("db.url", "")?
        .set_default("db.host", "localhost")?
        .set_default("db.port", 5432_i64)?
        .set_default("db.username", "postgres")?
        .set_default("db.password", "")?
        .set_default("db.db", "postgres")?
        .set_default("db.pool_size", 4_i64)?
        .set_default("db.connection_timeout_secs", 5_i64)?
        .set_default("web.listen", "0.0.0.0")?
        .set_default("web.port", 8000_i64)?
        .set_default("n8n.chat_url", "")?
        .set_default("n8n.knowledge_base_url", "")?
        .set_default("chat.dedup_window_secs", 120_i64)?
        .add_source(File::with_name(&config_file).required(false));

    for (env_key, config_key) in ENV_OVERRIDES {
        if let Ok(value) = std::env::var(env_key) {
            builder = builder.set_override(*config_key, value)?;
        }
    }

    builder.build()?.try_deserialize().map_err(|e| e.into())
}
