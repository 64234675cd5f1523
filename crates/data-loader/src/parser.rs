//! Parsing for movie metadata fields and ranking fixtures.
//!
//! The metadata service sends most fields as loosely formatted strings:
//! - Year: "1994"
//! - Runtime: "2h 22min", "45min", "3h"
//! - Actors: "Tim Robbins, Morgan Freeman"
//! - Rating values: "91%"
//!
//! The field parsers here are total. Anything unparseable degrades to a
//! neutral value (`None`, 0, an empty list) instead of an error.

use crate::error::{DataLoadError, Result};
use crate::types::RankingFixture;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Character separating hours from minutes in a runtime string.
const HOUR_MARKER: char = 'h';

/// Parse a release year.
///
/// Example: "1994" -> Some(1994)
///          "N/A" -> None
///          "2010–2013" -> None
pub fn parse_year(year: &str) -> Option<i32> {
    year.trim().parse().ok()
}

/// Convert a runtime string into whole minutes.
///
/// The string is split on the first hour marker. The part before it is read
/// as hours and the part after it as minutes; each part contributes 0 when it
/// has no leading integer. Without an hour marker the whole string is read as
/// minutes.
///
/// Example: "2h 22min" -> 142
///          "45min" -> 45
///          "3h" -> 180
pub fn runtime_minutes(runtime: &str) -> u32 {
    let (hours, minutes) = match runtime.split_once(HOUR_MARKER) {
        Some((hours, rest)) => (leading_integer(hours), leading_integer(rest)),
        None => (0, leading_integer(runtime)),
    };
    hours.saturating_mul(60).saturating_add(minutes)
}

/// Split a comma-separated cast list, trimming whitespace and dropping empty
/// entries.
pub fn split_cast(actors: &str) -> Vec<&str> {
    actors
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Read the numeral in front of a percent sign.
///
/// Example: "91%" -> 91.0
///          "N/A" -> 0.0
pub fn extract_percentage(value: &str) -> f64 {
    let numeral = value.split('%').next().unwrap_or_default();
    f64::from(leading_integer(numeral))
}

/// Parse the integer at the start of `s`, ignoring leading whitespace.
///
/// Returns 0 when there is no leading digit or the value overflows.
fn leading_integer(s: &str) -> u32 {
    let s = s.trim_start();
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().unwrap_or(0)
}

/// Parse a ranking fixture file
///
/// Format: a JSON document `{ "prompt": { "movies": [...], "people": [...] }, "movies": [...] }`
pub fn parse_fixture(path: &Path) -> Result<RankingFixture> {
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    serde_json::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}
