use rocket::{http::Status, serde::json::Json, Catcher, Request, Route};

use crate::error::ErrorBody;

mod organizer;
mod public;
mod voting;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(organizer::routes());
    routes.extend(voting::routes());
    routes.extend(public::routes());
    routes
}

pub fn catchers() -> Vec<Catcher> {
    catchers![default_catcher]
}

/// Render failures that never reached a route (unknown paths, malformed
/// bodies) in the same shape as every other error.
#[catch(default)]
fn default_catcher(status: Status, _req: &Request) -> (Status, Json<ErrorBody>) {
    let body = ErrorBody {
        code: None,
        error: status.reason_lossy().to_string(),
    };
    (status, Json(body))
}
