//! Form text to column value, by column type tag.

use crate::error::CoerceError;
use crate::sql::SqlValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored literal for a checked boolean column.
pub const TRUE_LITERAL: &str = "True";
/// Stored literal for an unchecked boolean column.
pub const FALSE_LITERAL: &str = "False";

const TRUTHY: &[&str] = &["1", "true", "yes", "on"];

/// Column type tag from the table configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Text,
    Int,
    Float,
    Date,
    Bool,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Date => "date",
            ValueKind::Bool => "bool",
        }
    }

    /// SQLite column affinity used when bootstrapping the table.
    pub fn affinity(&self) -> &'static str {
        match self {
            ValueKind::Int => "INTEGER",
            ValueKind::Float => "REAL",
            ValueKind::Text | ValueKind::Date | ValueKind::Bool => "TEXT",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert submitted text into the value written to a column of `kind`.
/// Whitespace is trimmed first; empty input is NULL except for `bool`, which is always a literal.
pub fn coerce(kind: ValueKind, raw: &str) -> Result<SqlValue, CoerceError> {
    let s = raw.trim();
    Ok(match kind {
        ValueKind::Text | ValueKind::Date => {
            if s.is_empty() {
                SqlValue::Null
            } else {
                SqlValue::Text(s.to_string())
            }
        }
        ValueKind::Int => {
            if s.is_empty() {
                SqlValue::Null
            } else {
                let n: i64 = s.parse().map_err(|_| invalid(kind, s))?;
                SqlValue::Integer(n)
            }
        }
        ValueKind::Float => {
            if s.is_empty() {
                SqlValue::Null
            } else {
                let f: f64 = s.parse().map_err(|_| invalid(kind, s))?;
                SqlValue::Real(f)
            }
        }
        ValueKind::Bool => SqlValue::Text(bool_literal(s).to_string()),
    })
}

/// `"True"` for a truthy form value, `"False"` otherwise.
pub fn bool_literal(s: &str) -> &'static str {
    if TRUTHY.iter().any(|t| s.eq_ignore_ascii_case(t)) {
        TRUE_LITERAL
    } else {
        FALSE_LITERAL
    }
}

/// Whether a stored cell reads as a checked boolean.
pub fn is_truthy(s: &str) -> bool {
    bool_literal(s.trim()) == TRUE_LITERAL
}

/// Non-empty and ASCII digits only.
pub fn is_whole_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn invalid(kind: ValueKind, value: &str) -> CoerceError {
    CoerceError::Invalid {
        kind,
        value: value.to_string(),
    }
}
