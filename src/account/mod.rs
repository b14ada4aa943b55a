use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod db;
pub mod endpoints;
pub mod manager;
pub mod password;
pub use endpoints::*;

use self::password::PasswordHash;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Account {
    #[serde(rename = "_id")]
    pub username: String,
    pub password: PasswordHash,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}
