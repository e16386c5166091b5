pub mod domain;
pub mod feed;
pub mod notify;
pub mod random;
pub mod scoring;
pub mod services;
pub mod storage;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_PORT: u16 = 5000;
    pub const DEFAULT_USER_ID: u64 = 1;
    pub const DEFAULT_NOTIFY_TIMEOUT_SECS: u64 = 10;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub port: u16,
        pub sentry_dsn: Option<String>,
        pub notify_webhook_url: Option<String>,
        pub notify_timeout_secs: u64,
        pub default_user_id: u64,
        pub rng_seed: Option<u64>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                port: parse_var("PORT")?.unwrap_or(DEFAULT_PORT),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
                notify_webhook_url: non_empty_var("NOTIFY_WEBHOOK_URL"),
                notify_timeout_secs: parse_var("NOTIFY_TIMEOUT_SECS")?
                    .unwrap_or(DEFAULT_NOTIFY_TIMEOUT_SECS),
                default_user_id: parse_var("DEFAULT_USER_ID")?.unwrap_or(DEFAULT_USER_ID),
                rng_seed: parse_var("RNG_SEED")?,
            })
        }

        pub fn require_notify_webhook_url(&self) -> anyhow::Result<&str> {
            self.notify_webhook_url
                .as_deref()
                .context("NOTIFY_WEBHOOK_URL is required")
        }
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                port: DEFAULT_PORT,
                sentry_dsn: None,
                notify_webhook_url: None,
                notify_timeout_secs: DEFAULT_NOTIFY_TIMEOUT_SECS,
                default_user_id: DEFAULT_USER_ID,
                rng_seed: None,
            }
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn parse_var<T>(key: &str) -> anyhow::Result<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match non_empty_var(key) {
            Some(raw) => raw
                .parse::<T>()
                .map(Some)
                .with_context(|| format!("{key} has an invalid value: {raw}")),
            None => Ok(None),
        }
    }
}
