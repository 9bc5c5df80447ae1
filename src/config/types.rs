//! Raw table config types matching the JSON override file.

use crate::coerce::ValueKind;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ValueKind,
}

/// One allow-listed table: integer primary key plus editable columns.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableConfig {
    pub name: String,
    pub primary_key: String,
    pub columns: Vec<ColumnConfig>,
}

impl TableConfig {
    fn new(name: &str, primary_key: &str, columns: &[(&str, ValueKind)]) -> Self {
        TableConfig {
            name: name.to_string(),
            primary_key: primary_key.to_string(),
            columns: columns
                .iter()
                .map(|(n, kind)| ColumnConfig {
                    name: (*n).to_string(),
                    kind: *kind,
                })
                .collect(),
        }
    }
}

/// The hand-maintained allow-list used when no override file is configured.
pub fn builtin_tables() -> Vec<TableConfig> {
    use ValueKind::*;
    vec![
        TableConfig::new(
            "Department",
            "department_id",
            &[("department_name", Text), ("location", Text)],
        ),
        TableConfig::new(
            "Job",
            "job_id",
            &[("job_title", Text), ("min_salary", Float), ("max_salary", Float)],
        ),
        TableConfig::new(
            "Employee",
            "employee_id",
            &[
                ("first_name", Text),
                ("last_name", Text),
                ("email", Text),
                ("hire_date", Date),
                ("department_id", Int),
                ("job_id", Int),
                ("is_active", Bool),
            ],
        ),
        TableConfig::new(
            "Salary",
            "salary_id",
            &[("employee_id", Int), ("salary_amount", Int)],
        ),
    ]
}
