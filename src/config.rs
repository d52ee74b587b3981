use std::{
    net::SocketAddr,
    time::{SystemTime, UNIX_EPOCH},
};

pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub deploy_hook: Option<String>,
    pub bot_token: Option<String>,
    pub telegram_api_base: String,
    pub build_id: String,
}

impl Config {
    pub fn from_env() -> color_eyre::Result<Self> {
        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()?;

        Ok(Self {
            bind_addr,
            deploy_hook: std::env::var("DEPLOY_HOOK_URL").ok(),
            bot_token: std::env::var("BOT_TOKEN").ok(),
            telegram_api_base: std::env::var("TELEGRAM_API_BASE")
                .unwrap_or_else(|_| DEFAULT_TELEGRAM_API_BASE.to_string()),
            build_id: std::env::var("BUILD_ID")
                .unwrap_or_else(|_| build_id_from(std::env::var("GIT_COMMIT_SHA").ok())),
        })
    }
}

// Mini-app hosts cache the entry point aggressively, so the build id has to
// change on every deploy. Commit sha when the CI provides one, wall clock
// otherwise.
fn build_id_from(commit_sha: Option<String>) -> String {
    match commit_sha {
        Some(sha) if sha.len() >= 8 => sha[..8].to_string(),
        Some(sha) if !sha.is_empty() => sha,
        _ => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
            .to_string(),
    }
}
