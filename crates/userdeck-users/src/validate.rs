//! Schema validation for untrusted user payloads.
//!
//! Raw JSON from the network or the cache goes through these functions
//! before it is allowed to become a [`User`]. Validation is
//! all-or-nothing per object: a failure reports every bad field at once
//! and never yields a partially filled value.

use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::types::{ApiInfo, ApiResponse, User, UserLocation, UserName, UserPicture};

/// A single failed constraint: which field, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Input failed the schema contract. Carries one issue per bad field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", format_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Error with a single issue, for shape-level failures.
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                path: path.into(),
                message: message.into(),
            }],
        }
    }
}

fn format_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Issues collected while walking one object.
#[derive(Default)]
struct Issues {
    list: Vec<FieldIssue>,
}

impl Issues {
    fn push(&mut self, path: &str, message: impl Into<String>) {
        self.list.push(FieldIssue {
            path: path.to_string(),
            message: message.into(),
        });
    }
}

fn lookup<'a>(raw: &'a Value, path: &str) -> Option<&'a Value> {
    let pointer = format!("/{}", path.replace('.', "/"));
    raw.pointer(&pointer)
}

/// Require a string at `path`, trimmed and non-empty after trimming.
fn require_string(raw: &Value, path: &str, issues: &mut Issues) -> Option<String> {
    match lookup(raw, path) {
        None | Some(Value::Null) => {
            issues.push(path, "required field is missing");
            None
        }
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                issues.push(path, "must be a non-empty string");
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(_) => {
            issues.push(path, "must be a string");
            None
        }
    }
}

/// Validate one raw user object.
///
/// All-or-nothing: on failure the error lists every offending field and
/// no `User` is produced.
pub fn validate_user(raw: &Value) -> Result<User, ValidationError> {
    if !raw.is_object() {
        return Err(ValidationError::single("", "user must be an object"));
    }

    let mut issues = Issues::default();
    let first = require_string(raw, "name.first", &mut issues);
    let last = require_string(raw, "name.last", &mut issues);
    let city = require_string(raw, "location.city", &mut issues);
    let country = require_string(raw, "location.country", &mut issues);

    let large = match require_string(raw, "picture.large", &mut issues) {
        Some(s) if Url::parse(&s).is_err() => {
            issues.push("picture.large", "must be an absolute URL");
            None
        }
        other => other,
    };

    match (first, last, city, country, large) {
        (Some(first), Some(last), Some(city), Some(country), Some(large))
            if issues.list.is_empty() =>
        {
            Ok(User {
                name: UserName { first, last },
                location: UserLocation { city, country },
                picture: UserPicture { large },
            })
        }
        _ => Err(ValidationError { issues: issues.list }),
    }
}

/// Validate the user-listing envelope.
///
/// `results` must be a non-empty array and every element must
/// independently pass [`validate_user`]. `info` is optional metadata
/// and is parsed leniently.
pub fn validate_api_response(raw: &Value) -> Result<ApiResponse, ValidationError> {
    if !raw.is_object() {
        return Err(ValidationError::single("", "response must be an object"));
    }

    let results = validate_user_array(raw.get("results"), "results")?;
    let info = parse_info(raw.get("info"));

    Ok(ApiResponse { results, info })
}

/// Validate a bare user list, as read back from the cache.
pub fn validate_users(raw: &Value) -> Result<Vec<User>, ValidationError> {
    validate_user_array(Some(raw), "")
}

fn parse_info(raw: Option<&Value>) -> Option<ApiInfo> {
    raw.and_then(|value| serde_json::from_value(value.clone()).ok())
}

fn validate_user_array(raw: Option<&Value>, path: &str) -> Result<Vec<User>, ValidationError> {
    let Some(Value::Array(items)) = raw else {
        return Err(ValidationError::single(path, "must be an array"));
    };
    if items.is_empty() {
        return Err(ValidationError::single(path, "must not be empty"));
    }

    let mut users = Vec::with_capacity(items.len());
    let mut issues = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match validate_user(item) {
            Ok(user) => users.push(user),
            Err(e) => issues.extend(e.issues.into_iter().map(|issue| FieldIssue {
                path: element_path(path, index, &issue.path),
                message: issue.message,
            })),
        }
    }

    if issues.is_empty() {
        Ok(users)
    } else {
        Err(ValidationError { issues })
    }
}

fn element_path(base: &str, index: usize, rest: &str) -> String {
    let element = if base.is_empty() {
        format!("[{}]", index)
    } else {
        format!("{}[{}]", base, index)
    };
    if rest.is_empty() {
        element
    } else {
        format!("{}.{}", element, rest)
    }
}
