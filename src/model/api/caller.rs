use rocket::{
    http::Status,
    request::{FromRequest, Outcome},
    Request,
};

use crate::error::Error;
use crate::model::common::Address;

/// Header carrying the address on whose behalf a mutation is submitted.
/// The upstream gateway is responsible for verifying it.
pub const CALLER_HEADER: &str = "X-Caller-Address";

/// The authorized identity behind a mutation request.
///
/// A request with no usable caller address never reached submission: the
/// caller withdrew (or never gave) authorization, which is reported as
/// [`Error::UserRejected`] rather than as a failure of the store.
/// Routes take `Result<Caller, Error>` so the rejection is rendered as a
/// regular error body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub Address);

impl Caller {
    pub fn address(&self) -> &Address {
        &self.0
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Caller {
    type Error = Error;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match req.headers().get_one(CALLER_HEADER).and_then(Address::parse) {
            Some(address) => Outcome::Success(Caller(address)),
            None => Outcome::Failure((Status::Unauthorized, Error::UserRejected)),
        }
    }
}
