//! Conversion of raw scraper records into UI-ready channel views.
//!
//! The scraper marks undeterminable fields with [`NOT_FOUND`]. Text fields
//! fall back to a readable default; the video count is parsed into an integer.
//! Each record is normalized on its own, so the output for one channel never
//! depends on its neighbours.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::{NOT_FOUND, RawChannel};

const UNKNOWN: &str = "Unknown";
const ZERO: &str = "0";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("channel {channel_url}: {field} value '{value}' is not a number")]
pub struct MalformedDataError {
    pub channel_url: String,
    pub field: &'static str,
    pub value: String,
}

/// Normalized channel, immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelView {
    /// Channel URL, used as the identity of the view
    pub id: String,
    pub display_name: String,
    pub nationality: String,
    pub joined_on: String,
    pub subscriber_count_text: String,
    pub video_count: u64,
    pub total_views_text: String,
}

pub fn normalize(raw: &RawChannel) -> Result<ChannelView, MalformedDataError> {
    Ok(ChannelView {
        id: raw.channel_url.clone(),
        display_name: display_name(&raw.channel_url),
        nationality: or_default(&raw.nationality, UNKNOWN),
        joined_on: or_default(&raw.joined_on, UNKNOWN),
        subscriber_count_text: or_default(&raw.subscribers, ZERO),
        video_count: video_count(raw)?,
        total_views_text: or_default(&raw.total_views, ZERO),
    })
}

/// Normalize every record; the first malformed record aborts the batch
pub fn normalize_all(raws: &[RawChannel]) -> Result<Vec<ChannelView>, MalformedDataError> {
    raws.iter().map(normalize).collect()
}

/// Channel handle after the first `@`, or the whole URL when there is none
fn display_name(channel_url: &str) -> String {
    match channel_url.split_once('@') {
        Some((_, handle)) if !handle.is_empty() => handle.to_string(),
        _ => channel_url.to_string(),
    }
}

fn or_default(value: &str, default: &str) -> String {
    if value == NOT_FOUND {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn video_count(raw: &RawChannel) -> Result<u64, MalformedDataError> {
    if raw.videos_count == NOT_FOUND {
        return Ok(0);
    }

    let digits: String = raw
        .videos_count
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    digits.parse::<u64>().map_err(|_| MalformedDataError {
        channel_url: raw.channel_url.clone(),
        field: "videos_count",
        value: raw.videos_count.clone(),
    })
}
