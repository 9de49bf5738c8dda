use chrono_tz::Tz;
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Connection string of the Postgres database. When it is not given
    /// the application keeps all its data in memory.
    pub database_url: Option<String>,
    /// Timezone used for slot generation when the client does not provide one
    pub default_timezone: Tz,
    /// Endpoint receiving a POST request for every `Notification`.
    /// When it is not given `Notification`s are only logged.
    pub notification_webhook_url: Option<String>,
    /// How many times delivery of a queued `Notification` is attempted
    pub notification_max_attempts: usize,
    /// Seconds between each run of the periodic sweeps
    pub sweep_interval_secs: u64,
    pub disable_job_schedulers: bool,
}

const DEFAULT_PORT: usize = 5000;
const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Tokyo;
const DEFAULT_NOTIFICATION_MAX_ATTEMPTS: usize = 3;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

fn parse_or_default<T, F>(lookup: &F, name: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {:?}.",
                    name, value, default
                );
                default
            }
        },
        None => default,
    }
}

impl Config {
    pub fn new() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the `Config` from the variables returned by `lookup`
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let port = parse_or_default(&lookup, "PORT", DEFAULT_PORT);
        let default_timezone = parse_or_default(&lookup, "DEFAULT_TIMEZONE", DEFAULT_TIMEZONE);
        let notification_max_attempts = match parse_or_default(
            &lookup,
            "NOTIFICATION_MAX_ATTEMPTS",
            DEFAULT_NOTIFICATION_MAX_ATTEMPTS,
        ) {
            0 => {
                warn!("NOTIFICATION_MAX_ATTEMPTS must be at least 1, using 1.");
                1
            }
            attempts => attempts,
        };
        let sweep_interval_secs = match parse_or_default(
            &lookup,
            "SWEEP_INTERVAL_SECS",
            DEFAULT_SWEEP_INTERVAL_SECS,
        ) {
            0 => {
                warn!(
                    "SWEEP_INTERVAL_SECS must be positive, falling back to the default: {}.",
                    DEFAULT_SWEEP_INTERVAL_SECS
                );
                DEFAULT_SWEEP_INTERVAL_SECS
            }
            secs => secs,
        };
        let disable_job_schedulers = parse_or_default(&lookup, "DISABLE_JOB_SCHEDULERS", false);

        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        if database_url.is_none() {
            info!("Did not find DATABASE_URL environment variable. Data will be kept in memory.");
        }
        let notification_webhook_url =
            lookup("NOTIFICATION_WEBHOOK_URL").filter(|url| !url.is_empty());

        Self {
            port,
            database_url,
            default_timezone,
            notification_webhook_url,
            notification_max_attempts,
            sweep_interval_secs,
            disable_job_schedulers,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
