use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::Error;

use super::CampaignRecord;

pub const SHARE_PATH: &str = "/share?data=";

/// Characters left alone by javascript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn share_link(record: &CampaignRecord, base_url: &str) -> Result<String, Error> {
    let json = serde_json::to_string(record)?;
    let data = utf8_percent_encode(&json, URI_COMPONENT);

    Ok(format!(
        "{}{}{}",
        base_url.trim_end_matches('/'),
        SHARE_PATH,
        data
    ))
}

pub fn decode_share_link(link: &str) -> Result<CampaignRecord, Error> {
    let index = link.find(SHARE_PATH).ok_or_else(|| Error::InvalidShareLink {
        reason: format!("link does not contain {:?}", SHARE_PATH),
    })?;

    let data = &link[index + SHARE_PATH.len()..];
    let json = percent_decode_str(data)
        .decode_utf8()
        .map_err(|err| Error::InvalidShareLink {
            reason: err.to_string(),
        })?;

    serde_json::from_str(&json).map_err(|err| Error::InvalidShareLink {
        reason: err.to_string(),
    })
}
