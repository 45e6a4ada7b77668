//! Response shapes returned to callers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::DeskError;

/// Result of one stale-ticket scan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub scanned: u32,
    pub notified: u32,
    pub window_hours: u32,
}

/// `{ ok, data | error }` envelope with the HTTP-class status of the outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope<T> {
    pub ok: bool,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    #[must_use]
    pub const fn success(data: T, status: u16) -> Self {
        Self {
            ok: true,
            status,
            data: Some(data),
            error: None,
        }
    }

    #[must_use]
    pub fn failure(error: &DeskError) -> Self {
        Self {
            ok: false,
            status: error.status_code(),
            data: None,
            error: Some(error.to_string()),
        }
    }
}
