//! Table listing page.

use super::cell_text;
use super::layout::{escape, page};
use crate::config::ResolvedTable;
use serde_json::Value;
use std::fmt::Write;

pub struct TableView<'a> {
    pub tables: &'a [String],
    pub current_table: &'a str,
    pub col_names: &'a [String],
    pub rows: &'a [Vec<Value>],
    /// Present when the table is configured for editing, with the route prefix.
    pub editable: Option<(&'a ResolvedTable, &'a str)>,
    pub flash: Option<&'a str>,
}

pub fn render_table(view: &TableView<'_>) -> String {
    let mut body = String::new();
    let _ = write!(body, "<h1>{}</h1>", escape(view.current_table));

    let pk_index = view
        .editable
        .and_then(|(t, _)| view.col_names.iter().position(|c| *c == t.primary_key));
    if let Some((_, base)) = view.editable {
        let _ = write!(body, "<p><a href=\"{}/add\">Add row</a></p>", escape(base));
    }

    body.push_str("<table><thead><tr>");
    for c in view.col_names {
        let _ = write!(body, "<th>{}</th>", escape(c));
    }
    if pk_index.is_some() {
        body.push_str("<th>Actions</th>");
    }
    body.push_str("</tr></thead><tbody>");

    for row in view.rows {
        body.push_str("<tr>");
        for cell in row {
            let _ = write!(body, "<td>{}</td>", escape(&cell_text(cell)));
        }
        if let (Some(i), Some((_, base))) = (pk_index, view.editable) {
            let id = row.get(i).map(cell_text).unwrap_or_default();
            let id = escape(&id);
            let base = escape(base);
            let _ = write!(
                body,
                "<td><a href=\"{base}/edit/{id}\">Edit</a> \
                 <form class=\"inline\" method=\"post\" action=\"{base}/delete/{id}\" \
                 onsubmit=\"return confirm('Delete this row?');\"><button type=\"submit\">Delete</button></form></td>"
            );
        }
        body.push_str("</tr>");
    }
    body.push_str("</tbody></table>");
    if view.rows.is_empty() {
        body.push_str("<p>No rows.</p>");
    }

    page(view.current_table, Some((view.tables, view.current_table)), view.flash, &body)
}
