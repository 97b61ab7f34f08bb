use rocket::{
    fairing::{Fairing, Info, Kind},
    tokio::time::Duration,
    Build, Rocket,
};
use serde::Deserialize;

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_mutation_timeout_ms")]
    mutation_timeout_ms: u64,
    #[serde(default = "default_close_notices")]
    close_notices: bool,
}

fn default_mutation_timeout_ms() -> u64 {
    5000
}

fn default_close_notices() -> bool {
    true
}

impl Config {
    /// How long a mutation may wait for a lock before giving up.
    pub fn mutation_timeout(&self) -> Duration {
        Duration::from_millis(self.mutation_timeout_ms)
    }

    /// Whether to log each election's result when it ends.
    pub fn close_notices(&self) -> bool {
        self.close_notices
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mutation_timeout_ms: default_mutation_timeout_ms(),
            close_notices: default_close_notices(),
        }
    }
}

/// A fairing that loads the application config and puts it in managed state.
/// This could easily be achieved using `AdHoc::config`, but is written out
/// explicitly for symmetry with the other fairings and control over error
/// messages.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // A config placed in managed state up front takes precedence.
        if rocket.state::<Config>().is_some() {
            debug!("Using pre-supplied application config");
            return Ok(rocket);
        }

        // Load the config.
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };
        info!(
            "Loaded config: mutation timeout {:?}, close notices {}",
            config.mutation_timeout(),
            if config.close_notices { "on" } else { "off" }
        );

        // Manage the state.
        rocket = rocket.manage(config);
        Ok(rocket)
    }
}
