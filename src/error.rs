use std::fmt::{Display, Formatter};

use argon2::Error as Argon2Error;
use rocket::{
    http::Status,
    response::{self, status, Responder},
    serde::json::Json,
    tokio::task::JoinError,
    Request,
};
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Which lower bound an election specification failed to meet.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// The election duration was below the minimum number of minutes.
    Duration,
    /// The election allowed fewer than the minimum number of candidates.
    CandidateCount,
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duration => write!(f, "Election Duration"),
            Self::CandidateCount => write!(f, "Total Candidate"),
        }
    }
}

/// Anything that went wrong that the caller could not have caused.
/// The detail is for operators only and never leaves the server.
#[derive(Debug, Error)]
pub enum Unexpected {
    #[error("pass-phrase hashing failed: {0}")]
    Argon2(#[from] Argon2Error),
    #[error("background task failed: {0}")]
    Join(#[from] JoinError),
    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Caller rejected the request before submission")]
    UserRejected,
    #[error("Caller is not the organizer required for this operation")]
    InvalidOrganizer,
    #[error("Pass-phrase must not be empty")]
    EmptyPassPhrase,
    #[error("Insufficient value: {0}")]
    InsufficientValue(ValueKind),
    #[error("Election name already in use: {0}")]
    DuplicateName(String),
    #[error("Election has ended")]
    ElectionEnded,
    #[error("Election has no free candidate slots")]
    CandidateOverflow,
    #[error("Election has no candidates")]
    ZeroCandidate,
    #[error("Incorrect pass-phrase")]
    InvalidPassPhrase,
    #[error("Voter has already voted in this election")]
    AlreadyVoted,
    #[error("Candidate index {0} is out of bound")]
    CandidateIndexOutOfBound(i64),
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] Unexpected),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Timed out waiting for {0}")]
    Timeout(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl Error {
    pub fn not_found(what: impl Display) -> Self {
        Self::NotFound(what.to_string())
    }

    /// The stable numeric code for domain errors.
    /// Transport and lookup failures have no code.
    pub fn code(&self) -> Option<ErrorCode> {
        let code = match self {
            Self::UserRejected => ErrorCode::UserRejected,
            Self::InvalidOrganizer => ErrorCode::InvalidOrganizer,
            Self::EmptyPassPhrase => ErrorCode::EmptyPassPhrase,
            Self::InsufficientValue(ValueKind::Duration) => ErrorCode::InsufficientDuration,
            Self::InsufficientValue(ValueKind::CandidateCount) => {
                ErrorCode::InsufficientCandidateCount
            }
            Self::DuplicateName(_) => ErrorCode::DuplicateName,
            Self::ElectionEnded => ErrorCode::ElectionEnded,
            Self::CandidateOverflow => ErrorCode::CandidateOverflow,
            Self::ZeroCandidate => ErrorCode::ZeroCandidate,
            Self::InvalidPassPhrase => ErrorCode::InvalidPassPhrase,
            Self::AlreadyVoted => ErrorCode::AlreadyVoted,
            Self::CandidateIndexOutOfBound(_) => ErrorCode::CandidateIndexOutOfBound,
            Self::Unexpected(_) => ErrorCode::UnexpectedError,
            Self::NotFound(_) | Self::Timeout(_) | Self::BadRequest(_) => return None,
        };
        Some(code)
    }

    pub fn status(&self) -> Status {
        match self {
            Self::UserRejected => Status::Unauthorized,
            Self::InvalidOrganizer => Status::Forbidden,
            Self::EmptyPassPhrase | Self::InsufficientValue(_) | Self::BadRequest(_) => {
                Status::BadRequest
            }
            Self::DuplicateName(_) | Self::AlreadyVoted => Status::Conflict,
            Self::ElectionEnded
            | Self::CandidateOverflow
            | Self::ZeroCandidate
            | Self::InvalidPassPhrase
            | Self::CandidateIndexOutOfBound(_) => Status::UnprocessableEntity,
            Self::Unexpected(_) => Status::InternalServerError,
            Self::NotFound(_) => Status::NotFound,
            Self::Timeout(_) => Status::ServiceUnavailable,
        }
    }
}

impl From<Argon2Error> for Error {
    fn from(err: Argon2Error) -> Self {
        Self::Unexpected(err.into())
    }
}

impl From<JoinError> for Error {
    fn from(err: JoinError) -> Self {
        Self::Unexpected(err.into())
    }
}

/// Stable numeric error codes, as understood by every client of the ledger.
/// These values must never change.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum ErrorCode {
    UserRejected = 0,
    InvalidOrganizer = 1,
    InsufficientDuration = 2,
    InsufficientCandidateCount = 3,
    InvalidPassPhrase = 4,
    CandidateIndexOutOfBound = 5,
    DuplicateName = 6,
    ZeroCandidate = 7,
    CandidateOverflow = 8,
    UnexpectedError = 9,
    AlreadyVoted = 10,
    ElectionEnded = 11,
    EmptyPassPhrase = 12,
}

/// The JSON body of every error response.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: Option<ErrorCode>,
    pub error: String,
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'o> {
        let error = match self {
            // Callers only ever see the generic code.
            Self::Unexpected(ref detail) => {
                error!("Unexpected error on {} {}: {detail}", req.method(), req.uri());
                "Unexpected error".to_string()
            }
            Self::UserRejected => {
                debug!("Caller withdrew authorization for {}", req.uri());
                self.to_string()
            }
            _ => self.to_string(),
        };
        let body = ErrorBody {
            code: self.code(),
            error,
        };
        status::Custom(self.status(), Json(body)).respond_to(req)
    }
}
