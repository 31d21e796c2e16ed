//! Structured result envelope returned across the host/UI boundary.
//!
//! Engines return `EditResult<T>`; callers that cannot carry Rust errors
//! (a UI panel, a script bridge, the CLI's JSON output) wrap it in an
//! `Outcome` instead of surfacing failures as alerts.

use serde::Serialize;

use crate::error::{EditError, EditResult};

/// A successful report: a one-line description, and whether the host was
/// edited to produce it.
pub trait Summary {
    fn summary(&self) -> String;

    fn changed(&self) -> bool;
}

/// Whether the host holds edits after `result`.
///
/// An interrupted consolidation has already moved clips even though it failed.
pub fn host_changed<T: Summary>(result: &EditResult<T>) -> bool {
    match result {
        Ok(report) => report.changed(),
        Err(err) => matches!(err, EditError::ConsolidationInterrupted { .. }),
    }
}

/// `{success, error?, error_kind?, message?, data?}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Summary> Outcome<T> {
    pub fn from_result(result: EditResult<T>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                error: None,
                error_kind: None,
                message: Some(data.summary()),
                data: Some(data),
            },
            Err(err) => Self {
                success: false,
                error: Some(err.to_string()),
                error_kind: Some(err.kind()),
                message: None,
                data: None,
            },
        }
    }
}

impl<T: Summary> From<EditResult<T>> for Outcome<T> {
    fn from(result: EditResult<T>) -> Self {
        Self::from_result(result)
    }
}

impl<T: Serialize> Outcome<T> {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
