#[macro_use]
extern crate rocket;

#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;

pub use config::{Config, ConfigFairing};
use logging::LoggerFairing;
use store::StoreFairing;

/// Build the server, taking configuration from the Rocket figment.
pub fn build() -> Rocket<Build> {
    attach_all(rocket::build())
}

/// Build the server around an explicit config instead of the figment's.
pub fn rocket_for_config(config: Config) -> Rocket<Build> {
    attach_all(rocket::build().manage(config))
}

fn attach_all(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .attach(LoggerFairing)
        .attach(ConfigFairing)
        .attach(StoreFairing)
        .mount("/", api::routes())
        .register("/", api::catchers())
}
