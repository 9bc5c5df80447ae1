//! Shared page shell and HTML escaping.

use crate::response::listing_url;
use std::fmt::Write;

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = "body{font-family:sans-serif;margin:0;display:flex}\
nav{min-width:12rem;padding:1rem;background:#f3f3f3;min-height:100vh}\
nav a{display:block;padding:.2rem 0}nav a.current{font-weight:bold}\
main{padding:1rem;flex:1}table{border-collapse:collapse}\
th,td{border:1px solid #ccc;padding:.25rem .5rem;text-align:left}\
.flash{background:#fff3cd;border:1px solid #e0c36a;padding:.5rem;margin-bottom:1rem}\
form.inline{display:inline}label{display:block;margin:.5rem 0}";

/// Full page: optional table navigation on the left, flash message above the body.
pub(crate) fn page(title: &str, nav: Option<(&[String], &str)>, flash: Option<&str>, body: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{}</title><style>{}</style></head><body>",
        escape(title),
        STYLE
    );
    if let Some((tables, current)) = nav {
        html.push_str("<nav><h3>Tables</h3>");
        for t in tables {
            let class = if t == current { " class=\"current\"" } else { "" };
            let _ = write!(html, "<a href=\"{}\"{}>{}</a>", escape(&listing_url(t)), class, escape(t));
        }
        html.push_str("</nav>");
    }
    html.push_str("<main>");
    if let Some(msg) = flash {
        let _ = write!(html, "<div class=\"flash\">{}</div>", escape(msg));
    }
    html.push_str(body);
    html.push_str("</main></body></html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
