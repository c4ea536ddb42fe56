//! Image reference rewriting.
//!
//! Logseq keeps every image in one flat `assets/` folder and expects the
//! file name to carry a timestamp suffix. Each `(../../resources/name.ext)`
//! reference in a page is rewritten to `(../assets/name_{ts}.ext)`, where
//! `ts` is the Unix timestamp of the page's `updated` header value, and the
//! `(original, new)` name pair is recorded so the copier can put the file in
//! place. No file is touched here.
//!
//! The timestamp is per page, not per image: two different images with the
//! same stem and extension on one page map to the same new name.

use crate::config::Dialect;
use chrono::{DateTime, Local, LocalResult, NaiveDateTime, Offset, TimeZone};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// One image to copy: its name in the resource folder and its name in the
/// output assets folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetReference {
    pub original_name: String,
    pub new_name: String,
}

/// Why an `updated` value could not be turned into a timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampError {
    pub value: String,
    pub format: &'static str,
    pub detail: String,
}

static RE_RESOURCE_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\.\./\.\./resources/(\w+)\.(\w+)\)").unwrap());

/// Parse a header `updated` value into a Unix timestamp (seconds).
///
/// Exporter-style values carry no offset and are read as local wall-clock
/// time, so the result depends on the machine's time zone. Converter-style
/// values carry an explicit `±HHMM` offset which is honoured.
pub fn parse_updated(value: &str, dialect: Dialect) -> Result<i64, TimestampError> {
    let format = dialect.date_format();
    let err = |e: chrono::ParseError| TimestampError {
        value: value.to_string(),
        format,
        detail: e.to_string(),
    };
    match dialect {
        Dialect::Exporter => {
            let naive = NaiveDateTime::parse_from_str(value.trim(), format).map_err(err)?;
            Ok(local_timestamp(&naive))
        }
        Dialect::Converter => {
            let dt = DateTime::parse_from_str(value.trim(), format).map_err(err)?;
            Ok(dt.timestamp())
        }
    }
}

/// Interpret a naive date-time in the local zone. Ambiguous times (DST
/// fall-back) take the earlier instant; times inside a DST gap are shifted
/// by the offset in force just before it.
fn local_timestamp(naive: &NaiveDateTime) -> i64 {
    match Local.from_local_datetime(naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.timestamp(),
        LocalResult::None => {
            let offset = Local.offset_from_utc_datetime(naive).fix();
            naive.and_utc().timestamp() - i64::from(offset.local_minus_utc())
        }
    }
}

/// Rewrite every resource reference in `text` using the timestamp derived
/// from `updated`. A page without an `updated` value uses the current time.
pub fn rewrite_asset_paths(
    text: &str,
    updated: Option<&str>,
    dialect: Dialect,
) -> Result<(String, Vec<AssetReference>), TimestampError> {
    let timestamp = match updated {
        Some(value) => parse_updated(value, dialect)?,
        None => Local::now().timestamp(),
    };
    Ok(rewrite_with_timestamp(text, timestamp))
}

/// Rewrite every resource reference in `text` with a fixed timestamp.
///
/// References are recorded in document order, duplicates included.
pub fn rewrite_with_timestamp(text: &str, timestamp: i64) -> (String, Vec<AssetReference>) {
    let mut assets = Vec::new();
    let rewritten = RE_RESOURCE_REF.replace_all(text, |caps: &Captures<'_>| {
        let stem = &caps[1];
        let ext = &caps[2];
        let new_name = format!("{stem}_{timestamp}.{ext}");
        let replacement = format!("(../assets/{new_name})");
        assets.push(AssetReference {
            original_name: format!("{stem}.{ext}"),
            new_name,
        });
        replacement
    });
    (rewritten.into_owned(), assets)
}
