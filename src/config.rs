use std::net::SocketAddr;

use anyhow::Context;

use crate::poster::{DEFAULT_EXTENSIONS, DEFAULT_MAX_BYTES, PosterPolicy};

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub poster: PosterPolicy,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://movies.db?mode=rwc".to_string());

        let max_bytes: u64 = std::env::var("POSTER_MAX_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_BYTES);

        let extensions = std::env::var("POSTER_EXTENSIONS")
            .unwrap_or_else(|_| DEFAULT_EXTENSIONS.join(","));

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            poster: parse_poster_policy(&extensions, max_bytes)?,
        })
    }

    /// Body ceiling for upload routes: the largest poster plus room for the text fields.
    pub fn body_limit(&self) -> usize {
        usize::try_from(self.poster.max_bytes).unwrap_or(usize::MAX).saturating_add(1 << 20)
    }
}

fn parse_poster_policy(extensions: &str, max_bytes: u64) -> anyhow::Result<PosterPolicy> {
    let policy = PosterPolicy::new(extensions.split(','), max_bytes);
    if policy.allowed_extensions.is_empty() {
        anyhow::bail!("POSTER_EXTENSIONS must name at least one extension");
    }
    Ok(policy)
}
