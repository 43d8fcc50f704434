//! HTTP records module.
//!
//! This module contains the wire representation of letters and
//! reports, and their validation into domain types. Malformed records
//! are rejected one by one so that a single bad record does not cost
//! the whole collection.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::{Draft, Letter, Letters, Report, Reports};

use super::{Error, Result};

/// Represents a letter as returned by the letters collection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterRecord {
    #[serde(alias = "id")]
    pub uuid: Option<String>,
    #[serde(alias = "senderId")]
    pub sender_uuid: Option<String>,
    pub body: Option<String>,
    pub hue: Option<String>,
    pub timestamp: Option<Number>,
    pub in_response_to: Option<String>,
}

impl TryFrom<LetterRecord> for Letter {
    type Error = Error;

    fn try_from(record: LetterRecord) -> Result<Self> {
        let id = non_empty(record.uuid).ok_or(Error::MissingFieldError("uuid"))?;
        let sender_id =
            non_empty(record.sender_uuid).ok_or(Error::MissingFieldError("senderUuid"))?;
        let body = record.body.ok_or(Error::MissingFieldError("body"))?;
        let timestamp = record
            .timestamp
            .and_then(|ts| ts.as_i64().or_else(|| ts.as_f64().map(|ts| ts as i64)))
            .ok_or(Error::MissingFieldError("timestamp"))?;

        Ok(Letter {
            id,
            sender_id,
            body,
            hue: non_empty(record.hue),
            timestamp,
            in_response_to: non_empty(record.in_response_to),
        })
    }
}

/// Represents a letter as posted to the letters collection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLetterRecord<'a> {
    pub sender_uuid: &'a str,
    pub body: &'a str,
    pub hue: &'a str,
    pub timestamp: i64,
    pub in_response_to: Option<&'a str>,
}

impl<'a> NewLetterRecord<'a> {
    pub fn new(sender_id: &'a str, draft: &'a Draft, timestamp: i64) -> Self {
        Self {
            sender_uuid: sender_id,
            body: &draft.body,
            hue: &draft.hue,
            timestamp,
            in_response_to: draft.in_response_to.as_deref().filter(|id| !id.is_empty()),
        }
    }
}

/// Represents a report, on both directions of the reports
/// collection.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub letter_uuid: Option<String>,
    pub reporter_uuid: Option<String>,
    pub explanation: Option<String>,
}

impl TryFrom<ReportRecord> for Report {
    type Error = Error;

    fn try_from(record: ReportRecord) -> Result<Self> {
        Ok(Report {
            letter_id: non_empty(record.letter_uuid)
                .ok_or(Error::MissingFieldError("letterUuid"))?,
            reporter_id: non_empty(record.reporter_uuid)
                .ok_or(Error::MissingFieldError("reporterUuid"))?,
            explanation: record.explanation.unwrap_or_default(),
        })
    }
}

impl From<&Report> for ReportRecord {
    fn from(report: &Report) -> Self {
        Self {
            letter_uuid: Some(report.letter_id.clone()),
            reporter_uuid: Some(report.reporter_id.clone()),
            explanation: Some(report.explanation.clone()),
        }
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|field| !field.is_empty())
}

fn decode<R, T>(value: Value) -> Result<T>
where
    R: for<'de> Deserialize<'de>,
    T: TryFrom<R, Error = Error>,
{
    let record: R = serde_json::from_value(value).map_err(Error::ParseRecordError)?;
    T::try_from(record)
}

/// Decodes the raw letters collection, skipping malformed records.
pub fn decode_letters(values: Vec<Value>) -> Letters {
    let total = values.len();
    let letters: Letters = values
        .into_iter()
        .filter_map(|value| match decode::<LetterRecord, Letter>(value) {
            Ok(letter) => Some(letter),
            Err(err) => {
                warn!("skipping letter record: {}", err);
                None
            }
        })
        .collect();

    debug!("decoded {}/{} letter records", letters.len(), total);
    letters
}

/// Decodes the raw reports collection, skipping malformed records.
pub fn decode_reports(values: Vec<Value>) -> Reports {
    let total = values.len();
    let reports: Reports = values
        .into_iter()
        .filter_map(|value| match decode::<ReportRecord, Report>(value) {
            Ok(report) => Some(report),
            Err(err) => {
                warn!("skipping report record: {}", err);
                None
            }
        })
        .collect();

    debug!("decoded {}/{} report records", reports.len(), total);
    reports
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{Draft, Letter};

    use super::{decode_letters, decode_reports, NewLetterRecord};

    #[test]
    fn decode_letters_skips_malformed() {
        let values = vec![
            json!({
                "uuid": "a",
                "senderUuid": "u1",
                "body": "hi",
                "hue": "#ff0000",
                "timestamp": 100,
                "inResponseTo": null
            }),
            json!({
                "uuid": "b",
                "senderUuid": "u2",
                "body": "yo",
                "hue": "",
                "timestamp": 200.0,
                "inResponseTo": "a"
            }),
            json!({ "uuid": "c", "body": "no sender", "timestamp": 300 }),
            json!({ "uuid": "", "senderUuid": "u3", "body": "no id", "timestamp": 300 }),
            json!({ "uuid": "e", "senderUuid": "u3", "body": "no time" }),
            json!({ "uuid": "f", "senderUuid": "u3", "timestamp": 300 }),
            json!({ "uuid": 42, "senderUuid": "u3", "body": "bad id", "timestamp": 300 }),
            json!("not even an object"),
        ];

        let letters = decode_letters(values);
        assert_eq!(2, letters.len());

        assert_eq!(
            Letter {
                id: "a".into(),
                sender_id: "u1".into(),
                body: "hi".into(),
                hue: Some("#ff0000".into()),
                timestamp: 100,
                in_response_to: None,
            },
            letters[0]
        );
        assert_eq!(None, letters[1].hue);
        assert_eq!(200, letters[1].timestamp);
        assert_eq!(Some("a"), letters[1].parent());
    }

    #[test]
    fn decode_letters_with_alternate_names() {
        let values = vec![json!({
            "id": "a",
            "senderId": "u1",
            "body": "hi",
            "timestamp": 100,
            "inResponseTo": ""
        })];

        let letters = decode_letters(values);
        assert_eq!(1, letters.len());
        assert!(letters[0].is_root());
    }

    #[test]
    fn decode_reports_skips_malformed() {
        let values = vec![
            json!({ "letterUuid": "a", "reporterUuid": "me", "explanation": "rude" }),
            json!({ "letterUuid": "b", "reporterUuid": "me" }),
            json!({ "letterUuid": "c" }),
        ];

        let reports = decode_reports(values);
        assert_eq!(2, reports.len());
        assert_eq!("rude", reports[0].explanation);
        assert_eq!("", reports[1].explanation);
    }

    #[test]
    fn encode_new_letter() {
        let draft = Draft::new("hello");
        let record = NewLetterRecord::new("me", &draft, 100);
        assert_eq!(
            json!({
                "senderUuid": "me",
                "body": "hello",
                "hue": "#ffffff",
                "timestamp": 100,
                "inResponseTo": null
            }),
            serde_json::to_value(&record).unwrap()
        );

        let root = Letter {
            id: "a".into(),
            ..Letter::default()
        };
        let draft = Draft::reply_to(&root, "hello").hue("#000000");
        let record = NewLetterRecord::new("me", &draft, 100);
        assert_eq!(
            json!("a"),
            serde_json::to_value(&record).unwrap()["inResponseTo"]
        );
    }
}
