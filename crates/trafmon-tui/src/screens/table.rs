//! Record table screen, shared by the interfaces, alerts, packets and
//! users tabs.
//!
//! Renders a core `TableView` as-is; the row button becomes the last
//! column and its key binding (`t`/`Enter`, `r`, `d`) asks the app to run
//! it for the selected row.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use trafmon_core::{ActionKind, TableId, TableView};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct TableScreen {
    id: TableId,
    view: TableView,
    table_state: TableState,
    focused: bool,
    /// Set once the first fetch for this table has been applied.
    loaded: bool,
}

impl TableScreen {
    pub fn new(id: TableId) -> Self {
        Self {
            id,
            view: TableView::empty(id),
            table_state: TableState::default(),
            focused: false,
            loaded: false,
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    /// Keep the selection on a real row after the rows changed.
    fn clamp_selection(&mut self) {
        let len = self.view.len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            self.table_state
                .select(Some(self.selected_index().min(len - 1)));
        }
    }

    fn move_down(&mut self) {
        let len = self.view.len();
        if len > 0 {
            self.table_state
                .select(Some((self.selected_index() + 1).min(len - 1)));
        }
    }

    fn move_up(&mut self) {
        if !self.view.is_empty() {
            self.table_state
                .select(Some(self.selected_index().saturating_sub(1)));
        }
    }

    /// The request for the selected row's button, if it does `kind`.
    fn request(&self, kind: ActionKind) -> Option<Action> {
        let row = self.view.rows.get(self.table_state.selected()?)?;
        let button = row.action.as_ref().filter(|a| a.kind == kind)?;
        Some(match kind {
            ActionKind::ToggleMonitoring => Action::RequestToggle(button.id),
            ActionKind::ResolveAlert => Action::RequestResolve(button.id),
            ActionKind::DeleteUser => Action::RequestDelete(button.id),
        })
    }

    fn hints(&self) -> Line<'static> {
        let mut spans = vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
        ];
        match self.id {
            TableId::Interfaces => {
                spans.push(Span::styled("t/Enter ", theme::key_hint_key()));
                spans.push(Span::styled("toggle monitoring  ", theme::key_hint()));
            }
            TableId::Alerts => {
                spans.push(Span::styled("r ", theme::key_hint_key()));
                spans.push(Span::styled("resolve  ", theme::key_hint()));
            }
            TableId::Users => {
                spans.push(Span::styled("d ", theme::key_hint_key()));
                spans.push(Span::styled("delete  ", theme::key_hint()));
            }
            TableId::Packets => {}
        }
        spans.push(Span::styled("R ", theme::key_hint_key()));
        spans.push(Span::styled("refresh", theme::key_hint()));
        Line::from(spans)
    }
}

impl Component for TableScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_down();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_up();
                None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                if !self.view.is_empty() {
                    self.table_state.select(Some(0));
                }
                None
            }
            KeyCode::Char('G') | KeyCode::End => {
                if !self.view.is_empty() {
                    self.table_state.select(Some(self.view.len() - 1));
                }
                None
            }
            KeyCode::Enter | KeyCode::Char('t') => self.request(ActionKind::ToggleMonitoring),
            KeyCode::Char('r') => self.request(ActionKind::ResolveAlert),
            KeyCode::Char('d') => self.request(ActionKind::DeleteUser),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::TableUpdated(view) if view.id == self.id => {
                self.view = view.clone();
                self.clamp_selection();
            }
            Action::Fetched(resource, _) if *resource == self.id.resource() => {
                self.loaded = true;
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = self.id.resource().title();
        let block = Block::default()
            .title(format!(" {title} ({}) ", self.view.len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        if self.view.is_empty() {
            let text = if self.loaded {
                format!("  No {} yet", title.to_lowercase())
            } else {
                "  Waiting for the first fetch\u{2026}".to_owned()
            };
            frame.render_widget(Paragraph::new(text).style(theme::key_hint()), layout[0]);
            frame.render_widget(Paragraph::new(self.hints()), layout[1]);
            return;
        }

        let with_actions = self.id.has_actions();

        let mut header_cells: Vec<Cell> = self
            .view
            .headers
            .iter()
            .map(|h| Cell::from(*h).style(theme::table_header()))
            .collect();
        if with_actions {
            header_cells.push(Cell::from("Action").style(theme::table_header()));
        }

        let rows: Vec<Row> = self
            .view
            .rows
            .iter()
            .map(|row| {
                let mut cells: Vec<Cell> = row.cells.iter().map(|c| Cell::from(c.as_str())).collect();
                if with_actions {
                    cells.push(match row.action {
                        Some(ref button) => {
                            Cell::from(button.label).style(theme::row_action(button.kind))
                        }
                        None => Cell::from(""),
                    });
                }
                Row::new(cells).style(theme::table_row())
            })
            .collect();

        let mut widths = vec![Constraint::Fill(1); self.view.headers.len()];
        if with_actions {
            widths.push(Constraint::Length(18));
        }

        let table = Table::new(rows, widths)
            .header(Row::new(header_cells))
            .row_highlight_style(theme::table_selected())
            .highlight_symbol("\u{25b8} ");

        let mut state = self.table_state;
        frame.render_stateful_widget(table, layout[0], &mut state);
        frame.render_widget(Paragraph::new(self.hints()), layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        self.id.dom_id()
    }
}
