use std::str::FromStr;

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest};
use chrono::{DateTime, Utc};
use futures::future::{ready, Ready};
use serde::{Deserialize, Serialize};

use crate::campaign::Ledger;
use crate::error::Error;
use crate::typedid::{TypedId, TypedIdMarker};

pub mod db;
pub mod endpoints;
pub mod manager;
pub use endpoints::*;

pub type SessionId = TypedId<Session>;

/// The current-account marker. A session names exactly one account and owns
/// the campaigns generated while it is alive.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Session {
    #[serde(rename = "_id")]
    pub id: SessionId,
    pub username: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub ledger: Ledger,
}

impl TypedIdMarker for Session {
    fn tag() -> &'static str {
        "SES"
    }
}

/// Session id carried in an `Authorization: Bearer <id>` header. Only the
/// format is checked here; whether the session still exists is up to the
/// manager.
#[derive(Copy, Clone, Debug)]
pub struct SessionToken(pub SessionId);

impl SessionToken {
    pub fn parse(req: &HttpRequest) -> Result<SessionToken, Error> {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(Error::NotAuthenticated)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(Error::NotAuthenticated)?;

        let session_id = SessionId::from_str(token.trim()).map_err(|_| Error::NotAuthenticated)?;

        Ok(SessionToken(session_id))
    }
}

impl FromRequest for SessionToken {
    type Error = Error;
    type Future = Ready<Result<SessionToken, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(SessionToken::parse(req))
    }
}
