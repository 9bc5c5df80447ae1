//! Server-rendered HTML pages.

mod form;
mod layout;
mod table;

pub use form::{render_form, FormMode, FormPage};
pub use layout::escape;
pub use table::{render_table, TableView};

use crate::sql::SqlValue;
use serde_json::Value;

/// Text for a stored cell: NULL is blank.
pub fn cell_text(v: &Value) -> String {
    SqlValue::from(v).display()
}
