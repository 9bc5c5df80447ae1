//! Resolved table registry: config validated and flattened for runtime use.

use crate::coerce::ValueKind;
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct ColumnInfo {
    pub name: String,
    pub kind: ValueKind,
}

#[derive(Clone, Debug)]
pub struct ResolvedTable {
    pub name: String,
    pub primary_key: String,
    /// Editable columns in form order; never includes the primary key.
    pub columns: Vec<ColumnInfo>,
}

impl ResolvedTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[derive(Clone, Debug)]
pub struct TableRegistry {
    pub tables: Vec<ResolvedTable>,
    by_name: HashMap<String, usize>,
}

impl TableRegistry {
    pub(crate) fn new(tables: Vec<ResolvedTable>) -> Self {
        let by_name = tables
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.clone(), i))
            .collect();
        TableRegistry { tables, by_name }
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, name: &str) -> Option<&ResolvedTable> {
        self.by_name.get(name).map(|&i| &self.tables[i])
    }
}
