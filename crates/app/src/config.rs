use std::fmt;
use std::time::Duration;

use storage::Latency;
use wordplay_core::model::GameRules;

pub const ENV_ROUND_SECS: &str = "WORDPLAY_ROUND_SECS";
pub const ENV_LATENCY_MS: &str = "WORDPLAY_LATENCY_MS";
pub const ENV_SEED: &str = "WORDPLAY_SEED";
pub const ENV_POLL_SECS: &str = "WORDPLAY_POLL_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub round_secs: u32,
    /// `None` keeps the mock's default 500 ms fetch / 300 ms create delays.
    pub latency: Option<Duration>,
    pub seed: Option<u64>,
    pub poll_period: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            round_secs: GameRules::DEFAULT_ROUND_SECONDS,
            latency: None,
            seed: None,
            poll_period: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    key: &'static str,
    raw: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} value: {}", self.key, self.raw)
    }
}

impl std::error::Error for ConfigError {}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError { key, raw }),
    }
}

impl AppConfig {
    /// Defaults overlaid with `WORDPLAY_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` naming the first variable that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(secs) = parse_var::<u32>(&lookup, ENV_ROUND_SECS)? {
            config.round_secs = secs;
        }
        if let Some(ms) = parse_var::<u64>(&lookup, ENV_LATENCY_MS)? {
            config.latency = Some(Duration::from_millis(ms));
        }
        config.seed = parse_var::<u64>(&lookup, ENV_SEED)?;
        if let Some(secs) = parse_var::<u64>(&lookup, ENV_POLL_SECS)? {
            config.poll_period = Duration::from_secs(secs.max(1));
        }
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `wordplay_core::Error::Rules` when the configured round length is zero.
    pub fn rules(&self) -> Result<GameRules, wordplay_core::Error> {
        Ok(GameRules::new(
            self.round_secs,
            GameRules::DEFAULT_POINTS_PER_SENTENCE,
        )?)
    }

    #[must_use]
    pub fn latency(&self) -> Latency {
        self.latency.map_or_else(Latency::mock, Latency::uniform)
    }
}
