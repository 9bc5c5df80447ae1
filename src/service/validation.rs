//! Form submission to column values: type-tag coercion, or strict whole numbers.

use crate::coerce::{coerce, is_whole_number};
use crate::config::ResolvedTable;
use crate::sql::SqlValue;
use std::collections::HashMap;

/// Submitted form fields, by input name.
pub type FormValues = HashMap<String, String>;

/// Why a submission was rejected; shown to the user as a flash message.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub message: String,
}

pub struct FormValidator;

impl FormValidator {
    /// Coerce every configured column from the form. Missing fields count as empty.
    pub fn coerce_form(table: &ResolvedTable, form: &FormValues) -> Result<Vec<(String, SqlValue)>, FieldError> {
        let mut out = Vec::with_capacity(table.columns.len());
        for c in &table.columns {
            let raw = form.get(&c.name).map(String::as_str).unwrap_or("");
            let value = coerce(c.kind, raw).map_err(|e| FieldError {
                message: format!("Invalid value for {}: {}", c.name, e),
            })?;
            out.push((c.name.clone(), value));
        }
        Ok(out)
    }

    /// Every configured column must be a non-negative whole number.
    pub fn whole_numbers(table: &ResolvedTable, form: &FormValues) -> Result<Vec<(String, SqlValue)>, FieldError> {
        let mut out = Vec::with_capacity(table.columns.len());
        for c in &table.columns {
            let raw = form.get(&c.name).map(|s| s.trim()).unwrap_or("");
            let parsed = if is_whole_number(raw) { raw.parse::<i64>().ok() } else { None };
            match parsed {
                Some(n) => out.push((c.name.clone(), SqlValue::Integer(n))),
                None => return Err(Self::whole_number_error(table)),
            }
        }
        Ok(out)
    }

    fn whole_number_error(table: &ResolvedTable) -> FieldError {
        let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        let verb = if names.len() == 1 { "must be a whole number" } else { "must be whole numbers" };
        FieldError {
            message: format!("{} {}.", names.join(" and "), verb),
        }
    }
}
