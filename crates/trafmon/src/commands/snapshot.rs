//! `snapshot`: every dashboard table in one go.
//!
//! Fetches interfaces, alerts, packets and users concurrently, then renders
//! the four table models either as terminal tables or, with `--html`, as the
//! `<tbody>` fragments of the dashboard page keyed by DOM id.

use tabled::builder::Builder;
use tabled::settings::Style;
use trafmon_core::render::html;
use trafmon_core::{Dashboard, TableId, TableView};

use crate::cli::{GlobalOpts, OutputFormat, SnapshotArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    dashboard: &Dashboard,
    args: &SnapshotArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let [a, b, c, d] = TableId::ALL.map(|id| dashboard.load(id.resource()));
    tokio::try_join!(a, b, c, d)?;

    let store = dashboard.store();
    let views: Vec<TableView> = TableId::ALL.iter().map(|&id| store.table(id)).collect();

    let out = if args.html {
        render_html(global.output(), &views)?
    } else {
        render_views(global.output(), &views)?
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

fn render_html(format: OutputFormat, views: &[TableView]) -> Result<String, CliError> {
    let fragments = html::snapshot(views);
    match format {
        OutputFormat::Table | OutputFormat::Plain => Ok(fragments
            .iter()
            .map(html::Fragment::to_tbody)
            .collect::<Vec<_>>()
            .join("\n")),
        structured => output::render_single(structured, &fragments, |_| String::new(), |_| {
            String::new()
        }),
    }
}

fn render_views(format: OutputFormat, views: &[TableView]) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(views
            .iter()
            .map(|view| format!("{}\n{}", view.id.resource().title(), view_table(view)))
            .collect::<Vec<_>>()
            .join("\n\n")),
        OutputFormat::Plain => Ok(views
            .iter()
            .map(|view| format!("{} {}", view.id.dom_id(), view.len()))
            .collect::<Vec<_>>()
            .join("\n")),
        structured => output::render_single(structured, views, |_| String::new(), |_| {
            String::new()
        }),
    }
}

/// A `TableView` as a terminal table, with the row button's label as the
/// last column.
fn view_table(view: &TableView) -> String {
    let with_actions = view.id.has_actions();
    let mut builder = Builder::default();

    let mut header: Vec<String> = view.headers.iter().map(|h| (*h).to_owned()).collect();
    if with_actions {
        header.push("Action".into());
    }
    builder.push_record(header);

    for row in &view.rows {
        let mut cells = row.cells.clone();
        if with_actions {
            cells.push(row.action.as_ref().map(|a| a.label.to_owned()).unwrap_or_default());
        }
        builder.push_record(cells);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}
