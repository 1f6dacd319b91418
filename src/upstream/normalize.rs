//! Date/time field normalization.
//!
//! # Responsibilities
//! - Parse fixed-format date strings the upstream embeds in its payloads
//! - Replace them in place with canonical chrono-serialized values
//! - Reject values that are present but do not match their format
//!
//! # Design Decisions
//! - Each field has exactly one accepted format; no format guessing
//! - Absent fields are skipped (pass-through), malformed fields are errors
//! - Non-object records are left untouched

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::upstream::error::{UpstreamError, UpstreamResult};

/// The fixed formats the upstream uses for date/time fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `2023-04-05T12:30:00+00:00`; the `+00:00` offset is rewritten to `Z`
    /// before parsing. Used by `created_at` on the account profile.
    Rfc3339Utc,
    /// `2023-04-05`. Used by `date` on traffic stat entries.
    CalendarDate,
    /// `2023-04-05 12:30:00`. Used by `booked_at` and `created_at` on
    /// transaction records.
    SpaceSeparated,
}

impl DateFormat {
    /// Parse a raw string into its canonical JSON representation.
    fn parse(self, raw: &str) -> Option<Value> {
        match self {
            DateFormat::Rfc3339Utc => {
                let rewritten = raw.replace("+00:00", "Z");
                NaiveDateTime::parse_from_str(&rewritten, "%Y-%m-%dT%H:%M:%SZ")
                    .ok()
                    .map(|dt| {
                        let utc: DateTime<Utc> = dt.and_utc();
                        Value::String(utc.to_rfc3339())
                    })
            }
            DateFormat::CalendarDate => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|d| Value::String(d.to_string())),
            DateFormat::SpaceSeparated => {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                    .ok()
                    .map(|dt| Value::String(dt.and_utc().to_rfc3339()))
            }
        }
    }
}

/// Normalize the listed date fields of a JSON object in place.
///
/// Fields that are absent are skipped. A field that is present but does not
/// parse under its format fails the whole record with `MalformedDate`, which
/// is an upstream-data error distinct from a network error.
pub fn normalize_fields(
    record: &mut Value,
    fields: &[(&str, DateFormat)],
) -> UpstreamResult<()> {
    let Some(map) = record.as_object_mut() else {
        return Ok(());
    };

    for &(field, format) in fields {
        let Some(value) = map.get(field) else {
            continue;
        };
        let Some(raw) = value.as_str() else {
            return Err(UpstreamError::MalformedDate {
                field: field.to_string(),
                value: value.to_string(),
            });
        };
        match format.parse(raw) {
            Some(parsed) => {
                map.insert(field.to_string(), parsed);
            }
            None => {
                return Err(UpstreamError::MalformedDate {
                    field: field.to_string(),
                    value: raw.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Normalize every element of a JSON array of records.
pub fn normalize_each(
    records: &mut [Value],
    fields: &[(&str, DateFormat)],
) -> UpstreamResult<()> {
    for record in records {
        normalize_fields(record, fields)?;
    }
    Ok(())
}
