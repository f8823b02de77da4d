//! Traffic screen: summary strip, bytes in/out chart and protocol mix.
//!
//! ┌─ Summary ─────────────────────────────────────────────────────────┐
//! │ Packets 1204 │ Bytes 1.5 MB │ Connections 12 │ Alerts 3            │
//! └───────────────────────────────────────────────────────────────────┘
//! ┌─ Traffic ─────────────────────────────┐┌─ Protocols ──────────────┐
//! │ Braille line chart, y axis from zero  ││ TCP   ████████   12  60% │
//! └───────────────────────────────────────┘└──────────────────────────┘

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph};

use trafmon_core::{Resource, Series, TrafficSummary, TrafficView};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::bytes_fmt::format_bytes;

pub struct TrafficScreen {
    view: TrafficView,
    summary: Option<TrafficSummary>,
    focused: bool,
    loaded: bool,
}

impl TrafficScreen {
    pub fn new() -> Self {
        Self {
            view: TrafficView::new(),
            summary: None,
            focused: false,
            loaded: false,
        }
    }

    fn block(&self, title: &str) -> Block<'static> {
        Block::default()
            .title(format!(" {title} "))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            })
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect) {
        let block = self.block("Summary");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(s) = self.summary else {
            frame.render_widget(
                Paragraph::new("  Loading summary\u{2026}").style(theme::key_hint()),
                inner,
            );
            return;
        };

        let sep = || Span::styled(" \u{2502} ", theme::key_hint());
        let value = |v: String| Span::styled(v, theme::title_style());
        let label = |l: &'static str| Span::styled(l, theme::table_row());

        let line = Line::from(vec![
            label(" Packets "),
            value(s.total_packets.to_string()),
            sep(),
            label("Bytes "),
            value(format_bytes(s.total_bytes)),
            sep(),
            label("Connections "),
            value(s.active_connections.to_string()),
            sep(),
            label("Alerts "),
            Span::styled(
                s.alert_count.to_string(),
                if s.alert_count > 0 {
                    Style::default().fg(theme::ERROR_RED)
                } else {
                    theme::title_style()
                },
            ),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect) {
        let block = self.block("Traffic");
        let chart = &self.view.charts.traffic;

        if chart.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let text = if self.loaded {
                "  No traffic samples yet"
            } else {
                "  Waiting for the first fetch\u{2026}"
            };
            frame.render_widget(Paragraph::new(text).style(theme::key_hint()), inner);
            return;
        }

        let incoming = points(&chart.incoming.data);
        let outgoing = points(&chart.outgoing.data);
        let y_max = y_bound(chart.max_value());

        let datasets = vec![
            dataset(&chart.incoming, &incoming),
            dataset(&chart.outgoing, &outgoing),
        ];

        let axis_style = Style::default().fg(theme::MUTED);
        let x_labels: Vec<Span> = [chart.labels.first(), chart.labels.last()]
            .into_iter()
            .flatten()
            .map(|l| Span::styled(l.clone(), axis_style))
            .collect();
        let y_labels = [0.0, y_max / 2.0, y_max]
            .into_iter()
            .map(|v| Span::styled(axis_bytes(v), axis_style))
            .collect::<Vec<_>>();

        let widget = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .bounds([0.0, x_max(chart.labels.len())])
                    .labels(x_labels)
                    .style(axis_style),
            )
            .y_axis(
                Axis::default()
                    .bounds([0.0, y_max])
                    .labels(y_labels)
                    .style(axis_style),
            );

        frame.render_widget(widget, area);
    }

    fn render_protocols(&self, frame: &mut Frame, area: Rect) {
        let block = self.block("Protocols");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let protocols = &self.view.charts.protocols;
        let total = protocols.tally.total();
        let budget = usize::from(inner.width.saturating_sub(20));

        let lines: Vec<Line> = protocols
            .slices()
            .map(|(name, color, count)| {
                let bar = "\u{2588}".repeat(bar_width(count, total, budget));
                Line::from(vec![
                    Span::styled(format!(" {name:<6}"), theme::table_row()),
                    Span::styled(format!("{bar:<budget$}"), Style::default().fg(theme::rgb(color))),
                    Span::styled(
                        format!(" {count:>5} {:>4}", percent(count, total)),
                        theme::table_row(),
                    ),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Default for TrafficScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TrafficScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::TrafficUpdated(view) => self.view = view.clone(),
            Action::SummaryUpdated(summary) => self.summary = Some(*summary),
            Action::Fetched(Resource::Traffic, _) => self.loaded = true,
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Length(3), // summary
            Constraint::Min(8),    // charts
            Constraint::Length(1), // hints
        ])
        .split(area);
        let charts = Layout::horizontal([Constraint::Percentage(68), Constraint::Percentage(32)])
            .split(rows[1]);

        self.render_summary(frame, rows[0]);
        self.render_chart(frame, charts[0]);
        self.render_protocols(frame, charts[1]);

        let hints = Line::from(vec![
            Span::styled("  R ", theme::key_hint_key()),
            Span::styled("refresh  ", theme::key_hint()),
            Span::styled("Tab ", theme::key_hint_key()),
            Span::styled("next tab", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), rows[2]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "trafficChart"
    }
}

// ── Chart helpers ──────────────────────────────────────────────────────

fn dataset<'a>(series: &Series, data: &'a [(f64, f64)]) -> Dataset<'a> {
    Dataset::default()
        .name(series.label)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme::rgb(series.color)))
        .data(data)
}

/// `(sample index, value)` pairs for a chart series.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn points(data: &[u64]) -> Vec<(f64, f64)> {
    data.iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v as f64))
        .collect()
}

/// Right edge of the x axis; a single sample still gets a visible span.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn x_max(samples: usize) -> f64 {
    (samples.saturating_sub(1) as f64).max(1.0)
}

/// Top of the y axis: the axis starts at zero and keeps some headroom.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn y_bound(max: u64) -> f64 {
    if max == 0 { 1.0 } else { max as f64 * 1.1 }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
fn axis_bytes(v: f64) -> String {
    format_bytes(v.round() as u64)
}

/// Bar length for `count` out of `total` in `budget` cells.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
fn bar_width(count: u64, total: u64, budget: usize) -> usize {
    if total == 0 || count == 0 {
        return 0;
    }
    let width = (count as f64 / total as f64 * budget as f64).round() as usize;
    width.clamp(1, budget.max(1))
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
fn percent(count: u64, total: u64) -> String {
    if total == 0 {
        return "0%".into();
    }
    format!("{}%", (count as f64 / total as f64 * 100.0).round() as u64)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn points_follow_sample_order() {
        assert_eq!(points(&[10, 30]), vec![(0.0, 10.0), (1.0, 30.0)]);
    }

    #[test]
    fn y_axis_starts_at_zero_with_headroom() {
        assert_eq!(y_bound(0), 1.0);
        assert!(y_bound(100) > 100.0);
    }

    #[test]
    fn single_sample_still_spans_the_axis() {
        assert_eq!(x_max(0), 1.0);
        assert_eq!(x_max(1), 1.0);
        assert_eq!(x_max(5), 4.0);
    }

    #[test]
    fn bars_scale_with_share() {
        assert_eq!(bar_width(0, 10, 20), 0);
        assert_eq!(bar_width(5, 10, 20), 10);
        assert_eq!(bar_width(10, 10, 20), 20);
        assert_eq!(bar_width(1, 1000, 20), 1);
        assert_eq!(bar_width(3, 0, 20), 0);
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(percent(1, 3), "33%");
        assert_eq!(percent(0, 0), "0%");
    }

    #[test]
    fn summary_and_view_updates_are_kept() {
        let mut screen = TrafficScreen::new();
        let summary = TrafficSummary {
            total_packets: 4,
            total_bytes: 2048,
            active_connections: 1,
            alert_count: 0,
        };
        screen.update(&Action::SummaryUpdated(summary)).unwrap();
        assert_eq!(screen.summary, Some(summary));
        assert!(!screen.loaded);

        screen
            .update(&Action::Fetched(Resource::Traffic, chrono::Utc::now()))
            .unwrap();
        assert!(screen.loaded);
    }
}
