use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::{Result, StatementError};

/// Date format used by the service history (`2024/05/10`)
pub const RECORD_DATE_FORMAT: &str = "%Y/%m/%d";

/// One row of the history export, as supplied by the history collaborator
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RawRecord {
    pub date: String,
    pub facility: Option<String>,
    pub room: String,
    pub name: String,
    pub menu: String,
    pub price: Value,
}

/// A validated, billable service record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceRecord {
    pub date: NaiveDate,
    pub facility: Option<String>,
    pub room: String,
    pub name: String,
    pub menu: String,
    pub price: f64,
}

impl ServiceRecord {
    /// The date in the history's own slash-delimited form, used for month matching
    pub fn date_key(&self) -> String {
        self.date.format(RECORD_DATE_FORMAT).to_string()
    }
}

fn parse_price(value: &Value) -> Option<f64> {
    let price = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    price.is_finite().then_some(price)
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse a zero-padded `YYYY/MM/DD` date; the result must format back to the input
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date = NaiveDate::parse_from_str(value, RECORD_DATE_FORMAT).ok()?;
    (date.format(RECORD_DATE_FORMAT).to_string() == value).then_some(date)
}

/// Validate raw rows. Errors name the 1-based position of the first bad row.
pub fn ingest(raw: Vec<RawRecord>) -> Result<Vec<ServiceRecord>> {
    raw.into_iter()
        .enumerate()
        .map(|(i, r)| {
            let index = i + 1;
            let date = parse_date(&r.date).ok_or_else(|| StatementError::InvalidDate {
                index,
                value: r.date.clone(),
            })?;
            let price = parse_price(&r.price).ok_or_else(|| StatementError::InvalidPrice {
                index,
                value: describe(&r.price),
            })?;
            let facility = r.facility.filter(|f| !f.is_empty());

            Ok(ServiceRecord {
                date,
                facility,
                room: r.room,
                name: r.name,
                menu: r.menu,
                price,
            })
        })
        .collect()
}

/// Load and validate a JSON history export
pub fn load_records(path: &Path) -> Result<Vec<ServiceRecord>> {
    if !path.exists() {
        return Err(StatementError::RecordsNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let raw: Vec<RawRecord> =
        serde_json::from_str(&content).map_err(|e| StatementError::RecordsParse {
            path: path.to_path_buf(),
            source: e,
        })?;
    let records = ingest(raw)?;
    tracing::debug!(path = %path.display(), count = records.len(), "loaded service records");
    Ok(records)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn record(date: &str, facility: &str, name: &str, price: f64) -> ServiceRecord {
        ServiceRecord {
            date: NaiveDate::parse_from_str(date, RECORD_DATE_FORMAT).unwrap(),
            facility: (!facility.is_empty()).then(|| facility.to_string()),
            room: "101".to_string(),
            name: name.to_string(),
            menu: "Cut".to_string(),
            price,
        }
    }
}
