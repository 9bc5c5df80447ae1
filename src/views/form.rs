//! Add/edit form page for one configured table.

use super::layout::{escape, page};
use crate::coerce::{is_truthy, ValueKind};
use crate::config::ResolvedTable;
use crate::response::listing_url;
use std::collections::HashMap;
use std::fmt::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(i64),
}

pub struct FormPage<'a> {
    pub table: &'a ResolvedTable,
    pub base_path: &'a str,
    pub mode: FormMode,
    /// Current field text by column name (stored row or rejected submission).
    pub values: &'a HashMap<String, String>,
    pub flash: Option<&'a str>,
}

fn input_for(kind: ValueKind, name: &str, value: &str) -> String {
    let name = escape(name);
    match kind {
        ValueKind::Bool => {
            let checked = if is_truthy(value) { " checked" } else { "" };
            format!("<input type=\"checkbox\" name=\"{}\" value=\"on\"{}>", name, checked)
        }
        ValueKind::Int => format!("<input type=\"number\" step=\"1\" name=\"{}\" value=\"{}\">", name, escape(value)),
        ValueKind::Float => format!("<input type=\"number\" step=\"any\" name=\"{}\" value=\"{}\">", name, escape(value)),
        ValueKind::Date => format!("<input type=\"date\" name=\"{}\" value=\"{}\">", name, escape(value)),
        ValueKind::Text => format!("<input type=\"text\" name=\"{}\" value=\"{}\">", name, escape(value)),
    }
}

pub fn render_form(form: &FormPage<'_>) -> String {
    let (title, action) = match form.mode {
        FormMode::Add => (format!("Add {}", form.table.name), format!("{}/add", form.base_path)),
        FormMode::Edit(id) => (
            format!("Edit {} #{}", form.table.name, id),
            format!("{}/edit/{}", form.base_path, id),
        ),
    };
    let mut body = String::new();
    let _ = write!(body, "<h1>{}</h1><form method=\"post\" action=\"{}\">", escape(&title), escape(&action));
    for c in &form.table.columns {
        let value = form.values.get(&c.name).map(String::as_str).unwrap_or("");
        let _ = write!(
            body,
            "<label>{} <small>({})</small> {}</label>",
            escape(&c.name),
            c.kind,
            input_for(c.kind, &c.name, value)
        );
    }
    let _ = write!(
        body,
        "<button type=\"submit\">Save</button> <a href=\"{}\">Cancel</a></form>",
        escape(&listing_url(&form.table.name))
    );
    page(&title, None, form.flash, &body)
}
