use std::io::{Error as IoError, ErrorKind};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::error::Error;

use super::CampaignRecord;

pub const CSV_HEADER: &str = "Platform,Product,Audience,Ad Copy";

/// Append-only, insertion ordered list of the campaigns generated in a
/// session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    records: Vec<CampaignRecord>,
}

impl Ledger {
    pub fn new() -> Ledger {
        Ledger::default()
    }

    /// Returns the index of the appended record.
    pub fn append(&mut self, record: CampaignRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&CampaignRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CampaignRecord> {
        self.records.iter()
    }

    /// Header line, then one row per record with every field quoted.
    pub fn export_csv(&self) -> Result<String, Error> {
        let mut buffer = format!("{}\n", CSV_HEADER).into_bytes();

        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut buffer);

        for record in &self.records {
            writer
                .write_record(&[
                    record.platform.as_str(),
                    record.product.as_str(),
                    record.audience.as_str(),
                    record.ad_copy.as_str(),
                ])
                .map_err(Error::FailedToWriteCsv)?;
        }

        writer.flush()?;
        drop(writer);

        String::from_utf8(buffer).map_err(|err| IoError::new(ErrorKind::InvalidData, err).into())
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a CampaignRecord;
    type IntoIter = std::slice::Iter<'a, CampaignRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::Platform;

    fn record(platform: Platform, product: &str, audience: &str, ad_copy: &str) -> CampaignRecord {
        CampaignRecord {
            platform,
            product: product.into(),
            audience: audience.into(),
            ad_copy: ad_copy.into(),
        }
    }

    #[test]
    fn empty_ledger_exports_header_only() {
        let ledger = Ledger::new();

        assert_eq!(ledger.export_csv().unwrap(), "Platform,Product,Audience,Ad Copy\n");
    }

    #[test]
    fn export_quotes_every_field_and_doubles_quotes() {
        let mut ledger = Ledger::new();
        ledger.append(record(Platform::Facebook, "Shoes", "Teens", "Great \"deal\"!"));

        assert_eq!(
            ledger.export_csv().unwrap(),
            "Platform,Product,Audience,Ad Copy\n\
             \"facebook\",\"Shoes\",\"Teens\",\"Great \"\"deal\"\"!\"\n"
        );
    }

    #[test]
    fn export_keeps_insertion_order() {
        let mut ledger = Ledger::new();
        ledger.append(record(Platform::Google, "A", "a", "first"));
        ledger.append(record(Platform::Instagram, "B", "b", "second"));

        let csv = ledger.export_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "\"google\",\"A\",\"a\",\"first\"");
        assert_eq!(lines[2], "\"instagram\",\"B\",\"b\",\"second\"");
    }

    #[test]
    fn export_keeps_multiline_ad_copy_inside_quotes() {
        let mut ledger = Ledger::new();
        ledger.append(record(
            Platform::Facebook,
            "Shoes",
            "Teens, 13-19",
            "Line one\nLine two",
        ));

        assert_eq!(
            ledger.export_csv().unwrap(),
            "Platform,Product,Audience,Ad Copy\n\
             \"facebook\",\"Shoes\",\"Teens, 13-19\",\"Line one\nLine two\"\n"
        );
    }

    #[test]
    fn append_does_not_deduplicate() {
        let mut ledger = Ledger::new();
        let same = record(Platform::Facebook, "Shoes", "Teens", "Buy");

        assert_eq!(ledger.append(same.clone()), 0);
        assert_eq!(ledger.append(same.clone()), 1);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(1), Some(&same));
        assert_eq!(ledger.get(2), None);
    }
}
