use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub mod endpoints;
pub mod ledger;
pub mod manager;
pub mod pending;
pub mod prompt;
pub mod share;
pub use endpoints::*;

pub use self::ledger::Ledger;
pub use self::pending::PendingGenerations;
pub use self::share::{decode_share_link, share_link};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Google,
    Instagram,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Google => "google",
            Platform::Instagram => "instagram",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_str(self.as_str())
    }
}

/// A generated campaign. Records are never changed after creation and are
/// identified by their position in the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRecord {
    pub platform: Platform,
    pub product: String,
    pub audience: String,
    pub ad_copy: String,
}

/// Everything needed to ask the provider for ad copy.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CampaignRequest {
    pub platform: Platform,
    pub product: String,
    pub audience: String,
    /// Pasted insights, or the output of `insight::past_data_from_csv`.
    pub past_data: Option<String>,
}
