//! Request helpers shared by the resource wrappers
//!
//! Query-string assembly and the local validation rules applied to
//! identifiers and option structs before a request leaves the client.

use std::fmt::Display;

use crate::error::{Result, TfeError};
use crate::hcp::ListOptions;

/// Incrementally built query string
///
/// Keys are written verbatim (the API uses bracketed keys such as
/// `page[number]`), values are percent-encoded.
#[derive(Debug, Default, Clone)]
pub struct Query {
    parts: Vec<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key/value pair
    pub fn push(&mut self, key: &str, value: impl Display) -> &mut Self {
        let value = value.to_string();
        self.parts
            .push(format!("{}={}", key, urlencoding::encode(&value)));
        self
    }

    /// Add a key/value pair if the value is present
    pub fn push_opt<V: Display>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.push(key, v);
        }
        self
    }

    /// Add a comma-separated list if it is not empty
    pub fn push_list<V: AsRef<str>>(&mut self, key: &str, values: &[V]) -> &mut Self {
        if !values.is_empty() {
            let joined = values
                .iter()
                .map(|v| urlencoding::encode(v.as_ref()).into_owned())
                .collect::<Vec<_>>()
                .join(",");
            self.parts.push(format!("{}={}", key, joined));
        }
        self
    }

    /// Add `page[number]` and `page[size]` from list options
    pub fn page(&mut self, options: &ListOptions) -> &mut Self {
        self.push_opt("page[number]", options.page_number);
        self.push_opt("page[size]", options.page_size);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Append the query to `path`, choosing `?` or `&` as needed
    pub fn append_to(&self, path: &str) -> String {
        if self.parts.is_empty() {
            return path.to_string();
        }
        let separator = if path.contains('?') { '&' } else { '?' };
        format!("{}{}{}", path, separator, self.parts.join("&"))
    }
}

/// Check that a string is non-empty
pub fn valid_string(value: &str) -> bool {
    !value.is_empty()
}

/// Check that a string can be used as an identifier in a URL path:
/// non-empty and made only of ASCII letters, digits, `-`, `.` and `_`
pub fn valid_string_id(value: &str) -> bool {
    valid_string(value)
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'))
}

/// Return a validation error unless `value` is a valid identifier
pub fn require_id(value: &str, what: &str) -> Result<()> {
    if valid_string_id(value) {
        Ok(())
    } else {
        Err(TfeError::validation(format!("invalid value for {}", what)))
    }
}

/// Return a validation error unless the optional identifier is absent or valid
pub fn require_optional_id(value: Option<&str>, what: &str) -> Result<()> {
    match value {
        Some(v) => require_id(v, what),
        None => Ok(()),
    }
}

/// Return a validation error unless `value` is present and non-empty
pub fn require_string(value: Option<&str>, what: &str) -> Result<()> {
    match value {
        Some(v) if valid_string(v) => Ok(()),
        _ => Err(TfeError::validation(format!("{} is required", what))),
    }
}

/// Return a validation error unless every id in the list is valid and the
/// list is not empty
pub fn require_ids(values: &[String], what: &str) -> Result<()> {
    if values.is_empty() {
        return Err(TfeError::validation(format!(
            "must provide at least one {}",
            what
        )));
    }
    for v in values {
        require_id(v, what)?;
    }
    Ok(())
}
