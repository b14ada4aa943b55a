use std::fmt::{Debug, Display};
use std::io::Error as IoError;

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use csv::Error as CsvError;
use derivative::Derivative;
use mongodb::bson::ser::Error as BsonError;
use mongodb::error::Error as DatabaseError;
use serde::{Serialize, Serializer};
use serde_json::Error as JsonError;

use crate::session::SessionId;

#[derive(Debug, Serialize, Derivative)]
#[derivative(PartialEq, Eq)]
#[serde(untagged)]
pub enum Error {
    // 400
    #[serde(serialize_with = "display")]
    InvalidJson(#[derivative(PartialEq = "ignore")] JsonPayloadError),
    #[serde(serialize_with = "display")]
    InvalidPath(#[derivative(PartialEq = "ignore")] PathError),
    #[serde(serialize_with = "display")]
    InvalidQuery(#[derivative(PartialEq = "ignore")] QueryPayloadError),
    InvalidUsername,
    FileParseError {
        reason: String,
    },
    InvalidShareLink {
        reason: String,
    },

    // 401
    NotAuthenticated,
    InvalidCredentials,

    // 404
    PathDoesNotExist,
    CampaignNotFound {
        index: usize,
    },

    // 409
    DuplicateAccount {
        username: String,
    },
    GenerationAlreadyPending {
        session_id: SessionId,
    },

    // 502
    ProviderError {
        reason: String,
    },

    // 500
    InvalidConfig {
        reason: String,
    },
    #[serde(serialize_with = "display")]
    FailedDatabaseCall(#[derivative(PartialEq = "ignore")] DatabaseError),
    #[serde(serialize_with = "display")]
    FailedToSerializeToBson(#[derivative(PartialEq = "ignore")] BsonError),
    #[serde(serialize_with = "display")]
    FailedToSerializeJson(#[derivative(PartialEq = "ignore")] JsonError),
    #[serde(serialize_with = "display")]
    FailedToWriteCsv(#[derivative(PartialEq = "ignore")] CsvError),
    #[serde(serialize_with = "display")]
    IoError(#[derivative(PartialEq = "ignore")] IoError),
}

impl Error {
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "E4001000",
            Error::InvalidPath(_) => "E4001001",
            Error::InvalidQuery(_) => "E4001002",
            Error::InvalidUsername => "E4001003",
            Error::FileParseError { .. } => "E4001004",
            Error::InvalidShareLink { .. } => "E4001005",
            Error::NotAuthenticated => "E4011000",
            Error::InvalidCredentials => "E4011001",
            Error::PathDoesNotExist => "E4041000",
            Error::CampaignNotFound { .. } => "E4041001",
            Error::DuplicateAccount { .. } => "E4091000",
            Error::GenerationAlreadyPending { .. } => "E4091001",
            Error::ProviderError { .. } => "E5021000",
            Error::InvalidConfig { .. } => "E5001000",
            Error::FailedDatabaseCall(_) => "E5001001",
            Error::FailedToSerializeToBson(_) => "E5001002",
            Error::FailedToSerializeJson(_) => "E5001003",
            Error::FailedToWriteCsv(_) => "E5001004",
            Error::IoError(_) => "E5001005",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "The given json could not be parsed",
            Error::InvalidPath(_) => "The given path could not be parsed",
            Error::InvalidQuery(_) => "The given query could not be parsed",
            Error::InvalidUsername => "The username must not be empty",
            Error::FileParseError { .. } => "The uploaded file could not be parsed as csv",
            Error::InvalidShareLink { .. } => "The given share link could not be decoded",
            Error::NotAuthenticated => "The request does not carry a valid session",
            Error::InvalidCredentials => "Invalid credentials. Please try again.",
            Error::PathDoesNotExist => "The requested path does not exist",
            Error::CampaignNotFound { .. } => "The requested campaign was not found",
            Error::DuplicateAccount { .. } => "Username already exists.",
            Error::GenerationAlreadyPending { .. } => {
                "A campaign is already being generated for this session"
            }
            Error::ProviderError { .. } => "The generation provider failed to produce ad copy",
            Error::InvalidConfig { .. } => "The server configuration is invalid",
            Error::FailedDatabaseCall(_) => {
                "An error occurred when communicating with the database"
            }
            Error::FailedToSerializeToBson(_) => {
                "An error occurred when serializing an object to bson"
            }
            Error::FailedToSerializeJson(_) => {
                "An error occurred when serializing an object to json"
            }
            Error::FailedToWriteCsv(_) => "An error occurred when writing csv",
            Error::IoError(_) => "An error occurred during an I/O operation",
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Error::InvalidPath(_) => StatusCode::BAD_REQUEST,
            Error::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Error::InvalidUsername => StatusCode::BAD_REQUEST,
            Error::FileParseError { .. } => StatusCode::BAD_REQUEST,
            Error::InvalidShareLink { .. } => StatusCode::BAD_REQUEST,
            Error::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::PathDoesNotExist => StatusCode::NOT_FOUND,
            Error::CampaignNotFound { .. } => StatusCode::NOT_FOUND,
            Error::DuplicateAccount { .. } => StatusCode::CONFLICT,
            Error::GenerationAlreadyPending { .. } => StatusCode::CONFLICT,
            Error::ProviderError { .. } => StatusCode::BAD_GATEWAY,
            Error::InvalidConfig { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::FailedDatabaseCall(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::FailedToSerializeToBson(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::FailedToSerializeJson(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::FailedToWriteCsv(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        #[derive(Serialize)]
        struct Dummy<'a> {
            error_code: &'static str,
            error_message: &'static str,
            error_meta: &'a Error,
        }

        HttpResponse::build(self.status_code()).json(&Dummy {
            error_code: self.error_code(),
            error_message: self.error_message(),
            error_meta: self,
        })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Debug::fmt(self, f)
    }
}

impl From<DatabaseError> for Error {
    fn from(error: DatabaseError) -> Error {
        Error::FailedDatabaseCall(error)
    }
}

impl From<BsonError> for Error {
    fn from(error: BsonError) -> Error {
        Error::FailedToSerializeToBson(error)
    }
}

impl From<JsonError> for Error {
    fn from(error: JsonError) -> Error {
        Error::FailedToSerializeJson(error)
    }
}

impl From<IoError> for Error {
    fn from(error: IoError) -> Error {
        Error::IoError(error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidJson(err) => Some(err),
            Error::InvalidPath(err) => Some(err),
            Error::InvalidQuery(err) => Some(err),
            Error::FailedDatabaseCall(err) => Some(err),
            Error::FailedToSerializeToBson(err) => Some(err),
            Error::FailedToSerializeJson(err) => Some(err),
            Error::FailedToWriteCsv(err) => Some(err),
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

fn display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}
