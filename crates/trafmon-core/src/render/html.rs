// ── HTML table rendering ──
//
// Renders `TableView`s into the `<tr>` markup of the dashboard page's
// table bodies. Every cell value is escaped; buttons carry `data-action` /
// `data-id` attributes for a delegated click handler instead of inline
// script.

use std::fmt::Write as _;

use serde::Serialize;

use crate::table::{TableRow, TableView};

/// Escape `& < > " '` for use in element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn row(out: &mut String, row: &TableRow, with_actions: bool) {
    out.push_str("<tr>");
    for cell in &row.cells {
        let _ = write!(out, "<td>{}</td>", escape(cell));
    }
    if with_actions {
        out.push_str("<td>");
        if let Some(action) = &row.action {
            let _ = write!(
                out,
                r#"<button class="btn btn-sm btn-{}" data-action="{}" data-id="{}">{}</button>"#,
                action.kind.style(),
                action.kind.name(),
                action.id,
                escape(action.label),
            );
        }
        out.push_str("</td>");
    }
    out.push_str("</tr>");
}

/// The rows of a table, as the inner HTML of its `<tbody>`.
pub fn table_body(view: &TableView) -> String {
    let mut out = String::new();
    let with_actions = view.id.has_actions();
    for r in &view.rows {
        row(&mut out, r, with_actions);
        out.push('\n');
    }
    out
}

/// One rendered table body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub dom_id: &'static str,
    pub html: String,
}

impl Fragment {
    /// The fragment wrapped in its `<tbody id=...>` element.
    pub fn to_tbody(&self) -> String {
        format!("<tbody id=\"{}\">\n{}</tbody>", self.dom_id, self.html)
    }
}

/// Render every given table body, keyed by its DOM id, in input order.
pub fn snapshot(views: &[TableView]) -> Vec<Fragment> {
    views
        .iter()
        .map(|view| Fragment {
            dom_id: view.id.dom_id(),
            html: table_body(view),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alert, Interface, Timestamp, User};
    use crate::table::{alerts_table, interfaces_table, users_table};

    #[test]
    fn escapes_all_five_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn interface_row_markup() {
        let view = interfaces_table(&[Interface {
            id: 3,
            name: "eth0".into(),
            ip_address: Some("10.0.0.1".into()),
            mac_address: Some("aa:bb:cc:dd:ee:ff".into()),
            status: Some("up".into()),
            is_monitored: true,
        }]);
        insta::assert_snapshot!(
            table_body(&view).trim_end(),
            @r#"<tr><td>eth0</td><td>10.0.0.1</td><td>aa:bb:cc:dd:ee:ff</td><td>up</td><td>Yes</td><td><button class="btn btn-sm btn-primary" data-action="toggle-monitoring" data-id="3">Stop Monitoring</button></td></tr>"#
        );
    }

    #[test]
    fn record_data_cannot_inject_markup() {
        let view = alerts_table(&[Alert {
            id: 1,
            timestamp: Timestamp::Raw("now".into()),
            alert_type: "<script>alert(1)</script>".into(),
            severity: None,
            description: Some("\" onmouseover=\"x".into()),
            is_resolved: true,
        }]);
        let html = table_body(&view);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("&quot; onmouseover=&quot;x"));
        assert!(html.contains("<td></td></tr>"), "resolved alert has an empty action cell");
    }

    #[test]
    fn snapshot_is_keyed_by_dom_id() {
        let views = [
            interfaces_table(&[]),
            users_table(&[User {
                id: 2,
                name: "erin".into(),
                role: None,
                created_at: None,
                last_login: None,
            }]),
        ];
        let fragments = snapshot(&views);
        assert_eq!(fragments[0].dom_id, "interfacesTable");
        assert_eq!(fragments[0].html, "");
        assert_eq!(fragments[1].dom_id, "usersTable");
        assert!(fragments[1].html.contains(r#"data-action="delete-user" data-id="2""#));
        assert!(fragments[1].to_tbody().starts_with(r#"<tbody id="usersTable">"#));
    }
}
