//! # Todo Data Model
//!
//! Wire types shared by the HTTP client, the benchmark runner and the local
//! todo service, plus the error type every service call returns.

use std::fmt;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Identifier assigned by the todo service.
///
/// Backends disagree on whether ids are numbers or strings, so both are
/// accepted and rendered back verbatim into request paths.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    Int(i64),
    Str(String),
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoId::Int(id) => write!(f, "{}", id),
            TodoId::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for TodoId {
    fn from(id: i64) -> Self {
        TodoId::Int(id)
    }
}

/// A todo as the service returns it. Every field may be missing from a
/// response body; `{"id": 7}` is a valid created todo.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Todo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TodoId>,
    pub title: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Body of `POST /todos`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub completed: bool,
    pub due_date: String,
}

impl NewTodo {
    /// A not-yet-completed todo due 1..=30 days after `today`.
    pub fn with_random_due_date<R: Rng + ?Sized>(
        title: impl Into<String>,
        today: NaiveDate,
        rng: &mut R,
    ) -> Self {
        Self {
            title: title.into(),
            completed: false,
            due_date: format_due_date(due_date_from(today, rng)),
        }
    }
}

/// Body of `PUT /todos/{id}`. Absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TodoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl TodoPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }
}

pub const MIN_DUE_DAYS: u64 = 1;
pub const MAX_DUE_DAYS: u64 = 30;

/// Picks a due date between `today + 1` and `today + 30` days, at noon UTC.
pub fn due_date_from<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> DateTime<Utc> {
    let days = rng.random_range(MIN_DUE_DAYS..=MAX_DUE_DAYS);
    let date = today
        .checked_add_days(Days::new(days))
        .expect("due date past chrono's maximum date");
    date.and_time(noon()).and_utc()
}

/// Formats a due date the way the todo API expects, e.g. `2026-10-20T12:00:00Z`.
pub fn format_due_date(due: DateTime<Utc>) -> String {
    due.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn noon() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default()
}

/// Failure of a single todo service call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect, DNS, timeout...).
    #[error("transport error: {0}")]
    Transport(String),
    /// The service answered with a non-2xx status.
    #[error("{method} {path} returned {status}: {body}")]
    Status {
        method: &'static str,
        path: String,
        status: u16,
        body: String,
    },
    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
