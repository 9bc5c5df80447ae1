//! Config validation: identifiers, uniqueness, primary key placement.

use crate::config::TableConfig;
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;

const IDENTIFIER: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

fn check_identifier(re: &Regex, s: &str) -> Result<(), ConfigError> {
    if re.is_match(s) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier(s.to_string()))
    }
}

pub fn validate(tables: &[TableConfig]) -> Result<(), ConfigError> {
    if tables.is_empty() {
        return Err(ConfigError::Empty);
    }
    let re = Regex::new(IDENTIFIER).map_err(|e| ConfigError::Load(e.to_string()))?;
    let mut names = HashSet::new();
    for t in tables {
        check_identifier(&re, &t.name)?;
        check_identifier(&re, &t.primary_key)?;
        if !names.insert(t.name.as_str()) {
            return Err(ConfigError::DuplicateTable(t.name.clone()));
        }
        if t.columns.is_empty() {
            return Err(ConfigError::NoColumns(t.name.clone()));
        }
        let mut columns = HashSet::new();
        for c in &t.columns {
            check_identifier(&re, &c.name)?;
            if c.name == t.primary_key {
                return Err(ConfigError::PrimaryKeyEditable {
                    table: t.name.clone(),
                    column: c.name.clone(),
                });
            }
            if !columns.insert(c.name.as_str()) {
                return Err(ConfigError::DuplicateColumn {
                    table: t.name.clone(),
                    column: c.name.clone(),
                });
            }
        }
    }
    Ok(())
}
