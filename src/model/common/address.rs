use std::fmt::{Display, Formatter};

use rocket::request::FromParam;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// An account identity on the ledger: an organizer or a voter.
///
/// Every address is trimmed and must not be blank, whether it arrives in a
/// header, a path or a request body. Otherwise addresses are compared
/// exactly as given; no case folding is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse an address, rejecting blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Address {
    type Error = Error;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw).ok_or_else(|| Error::BadRequest("Blank address".to_string()))
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl<'a> FromParam<'a> for Address {
    type Error = Error;

    fn from_param(param: &'a str) -> Result<Self, Self::Error> {
        Self::parse(param).ok_or_else(|| Error::BadRequest("Blank address".to_string()))
    }
}
