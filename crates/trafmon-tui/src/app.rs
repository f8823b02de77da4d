//! Application core: the event loop, screen management and action dispatch.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use chrono::{DateTime, Local, Utc};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use trafmon_core::{ActionKind, ActionOutcome, Dashboard, Preapproved, Resource};

use crate::action::{Action, ConfirmAction, Notification, NotificationLevel, Toast};
use crate::component::Component;
use crate::data_bridge::spawn_data_bridge;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    /// Action sender; spawned tasks report back through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver, drained by the main loop.
    action_rx: mpsc::UnboundedReceiver<Action>,
    dashboard: Dashboard,
    /// Cancellation token for the data bridge task.
    data_cancel: CancellationToken,
    /// Pending confirmation dialog (blocks other input while active).
    pending_confirm: Option<ConfirmAction>,
    notification: Option<Toast>,
    /// Row actions sent but not yet answered; repeats are ignored.
    in_flight: HashSet<(ActionKind, i64)>,
    /// When each resource last had a fetch applied.
    last_fetch: HashMap<Resource, DateTime<Utc>>,
}

impl App {
    pub fn new(dashboard: Dashboard) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            active_screen: ScreenId::default(),
            screens: create_screens().into_iter().collect(),
            running: true,
            help_visible: false,
            action_tx,
            action_rx,
            dashboard,
            data_cancel: CancellationToken::new(),
            pending_confirm: None,
            notification: None,
            in_flight: HashSet::new(),
            last_fetch: HashMap::new(),
        }
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }

        let bridge = tokio::spawn(spawn_data_bridge(
            self.dashboard.clone(),
            self.action_tx.clone(),
            self.data_cancel.clone(),
        ));
        self.dashboard.start().await;
        self.fetch_summary();

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            // Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if matches!(action, Action::Render | Action::Resize(..)) {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.data_cancel.cancel();
        events.stop();
        self.dashboard.stop().await;
        let _ = bridge.await;
        tui.exit();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Confirmation dialog captures all input
        if self.pending_confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),

            // Shift state varies by terminal for upper-case letters
            (_, KeyCode::Char('R')) => return Ok(Some(Action::Refresh)),

            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='5')) => {
                let screen = c
                    .to_digit(10)
                    .and_then(|d| u8::try_from(d).ok())
                    .and_then(ScreenId::from_number);
                if let Some(screen) = screen {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (_, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            (KeyModifiers::NONE, KeyCode::Esc) if self.notification.is_some() => {
                return Ok(Some(Action::DismissNotification));
            }

            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Process a single action: update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|toast| toast.is_expired(Instant::now()))
                {
                    self.notification = None;
                }
            }

            // Drawing happens in the main loop
            Action::Render | Action::Resize(..) => {}

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                        debug!(screen = screen.id(), "switched screen");
                    }

                    self.dashboard.select(target.resource());
                    if *target == ScreenId::Traffic {
                        self.fetch_summary();
                    }
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::Refresh => {
                let resource = self.active_screen.resource();
                self.dashboard.refresh(resource);
                if resource == Resource::Traffic {
                    self.fetch_summary();
                }
                self.action_tx.send(Action::Notify(Notification::info(format!(
                    "Refreshing {}\u{2026}",
                    resource.title().to_lowercase()
                ))))?;
            }

            Action::Fetched(resource, at) => {
                self.last_fetch.insert(*resource, *at);
                self.broadcast(action)?;
            }

            // Data updates go to ALL screens so hidden tabs stay current
            Action::TrafficUpdated(_) | Action::TableUpdated(_) | Action::SummaryUpdated(_) => {
                self.broadcast(action)?;
            }

            // ── Row actions ───────────────────────────────────────────

            Action::RequestToggle(id) => self.run_row_action(ActionKind::ToggleMonitoring, *id),

            Action::RequestResolve(id) => self.run_row_action(ActionKind::ResolveAlert, *id),

            Action::RequestDelete(id) => {
                if self.in_flight.contains(&(ActionKind::DeleteUser, *id)) {
                    debug!(id, "delete already in flight, ignoring");
                } else {
                    let name = self.resolve_user_name(*id);
                    self.action_tx
                        .send(Action::ShowConfirm(ConfirmAction::DeleteUser { id: *id, name }))?;
                }
            }

            Action::ActionFinished(kind, id) => {
                self.in_flight.remove(&(*kind, *id));
            }

            // ── Confirmation dialog ───────────────────────────────────

            Action::ShowConfirm(confirm) => {
                self.pending_confirm = Some(confirm.clone());
            }

            Action::ConfirmYes => {
                if let Some(ConfirmAction::DeleteUser { id, .. }) = self.pending_confirm.take() {
                    self.run_row_action(ActionKind::DeleteUser, id);
                }
            }

            Action::ConfirmNo => {
                if let Some(confirm) = self.pending_confirm.take() {
                    debug!(%confirm, "confirmation declined");
                }
            }

            // ── Notifications ─────────────────────────────────────────

            Action::Notify(n) => {
                self.notification = Some(Toast::new(n.clone(), Instant::now()));
            }

            Action::DismissNotification => {
                self.notification = None;
            }
        }

        Ok(())
    }

    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn resolve_user_name(&self, id: i64) -> String {
        self.dashboard
            .store()
            .users()
            .iter()
            .find(|u| u.id == id)
            .map_or_else(|| format!("user {id}"), |u| u.name.clone())
    }

    // ── Backend calls ─────────────────────────────────────────────

    /// Send a row action in the background. Reports `ActionFinished` and a
    /// toast when the backend answers. Repeats for the same row are ignored
    /// until then.
    fn run_row_action(&mut self, kind: ActionKind, id: i64) {
        if !self.in_flight.insert((kind, id)) {
            debug!(action = kind.name(), id, "already in flight, ignoring");
            return;
        }

        let dashboard = self.dashboard.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = match kind {
                ActionKind::ToggleMonitoring => dashboard
                    .toggle_monitoring(id)
                    .await
                    .map(|()| toggle_message(&dashboard, id)),
                ActionKind::ResolveAlert => dashboard
                    .resolve_alert(id)
                    .await
                    .map(|()| format!("Alert {id} resolved")),
                // The dialog was already answered
                ActionKind::DeleteUser => dashboard
                    .delete_user(id, &Preapproved(true))
                    .await
                    .map(|outcome| match outcome {
                        ActionOutcome::Applied => format!("User {id} deleted"),
                        ActionOutcome::Declined => "Deletion cancelled".to_owned(),
                    }),
            };

            let notification = match result {
                Ok(message) => Notification::success(message),
                Err(e) => {
                    warn!(action = kind.name(), id, error = %e, "row action failed");
                    Notification::error(e.to_string())
                }
            };
            let _ = tx.send(Action::ActionFinished(kind, id));
            let _ = tx.send(Action::Notify(notification));
        });
    }

    /// Fetch the traffic summary for the header strip.
    fn fetch_summary(&self) {
        let dashboard = self.dashboard.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match dashboard.summary().await {
                Ok(summary) => {
                    let _ = tx.send(Action::SummaryUpdated(summary));
                }
                Err(e) => warn!(error = %e, "summary fetch failed, keeping previous"),
            }
        });
    }

    // ── Rendering ─────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }
        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        // Overlays, last = topmost
        if let Some(ref toast) = self.notification {
            render_notification(frame, area, &toast.notification);
        }
        if let Some(ref confirm) = self.pending_confirm {
            render_confirm_dialog(frame, area, confirm);
        }
        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(format!(" {} {} ", id.number(), id.label()), style))
            })
            .collect();

        let selected = ScreenId::ALL
            .iter()
            .position(|&s| s == self.active_screen)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(selected);

        frame.render_widget(tabs, area);
    }

    /// Backend URL, busy marker, freshness of the active tab, key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(" \u{25cf} ", Style::default().fg(theme::SUCCESS_GREEN)),
            Span::styled(self.dashboard.config().url.to_string(), theme::tab_inactive()),
        ];

        if !self.in_flight.is_empty() {
            spans.push(Span::styled(
                format!("  \u{25d0} working ({})", self.in_flight.len()),
                Style::default().fg(theme::WARN_YELLOW),
            ));
        }

        let freshness = match self.last_fetch.get(&self.active_screen.resource()) {
            Some(at) => format!(
                "  updated {}",
                at.with_timezone(&Local).format("%H:%M:%S")
            ),
            None => "  waiting for data".to_owned(),
        };
        spans.push(Span::styled(freshness, theme::key_hint()));
        spans.push(Span::styled(
            " \u{2502} ? help  R refresh  q quit",
            theme::key_hint(),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

// Covers early returns out of `run()`, which skip its orderly shutdown.
impl Drop for App {
    fn drop(&mut self) {
        self.data_cancel.cancel();
        self.dashboard.cancel();
    }
}

/// Success text for a toggle, read back from the re-fetched interfaces.
fn toggle_message(dashboard: &Dashboard, id: i64) -> String {
    let interfaces = dashboard.store().interfaces();
    match interfaces.iter().find(|i| i.id == id) {
        Some(iface) if iface.is_monitored => format!("Monitoring started on {}", iface.name),
        Some(iface) => format!("Monitoring stopped on {}", iface.name),
        None => format!("Toggled monitoring on interface {id}"),
    }
}

/// `width` x `height` rectangle centred in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn overlay_block(title: &'static str, border: Style) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .style(Style::default().bg(theme::BG_DARK))
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_area = centered(area, 52, 17);
    frame.render_widget(Clear, help_area);

    let block = overlay_block(" Keyboard Shortcuts ", theme::border_focused());
    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let entry = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<12}"), theme::key_hint_key()),
            Span::styled(what, theme::key_hint()),
        ])
    };
    let heading = |text: &'static str| {
        Line::from(Span::styled(text, Style::default().fg(theme::ACCENT)))
    };

    let help_text = vec![
        heading("  Navigation"),
        entry("1-5", "Jump to tab"),
        entry("Tab/S-Tab", "Next / previous tab"),
        entry("j/k \u{2191}/\u{2193}", "Move selection"),
        entry("g/G", "Top / bottom"),
        Line::from(""),
        heading("  Actions"),
        entry("t/Enter", "Toggle interface monitoring"),
        entry("r", "Resolve alert"),
        entry("d", "Delete user (asks first)"),
        entry("R", "Refresh current tab"),
        Line::from(""),
        entry("?", "This help"),
        entry("q", "Quit"),
        Line::from(Span::styled("                    Esc or ? to close", theme::key_hint())),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}

fn render_confirm_dialog(frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
    let dialog_area = centered(area, 64, 5);
    frame.render_widget(Clear, dialog_area);

    let block = overlay_block(" Confirm ", Style::default().fg(theme::WARN_YELLOW));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let text = vec![
        Line::from(Span::styled(format!("  {confirm}"), theme::table_row())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y ", theme::key_hint_key()),
            Span::styled("confirm    ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(text), inner);
}

/// Toast in the bottom-right corner, above the tab and status bars.
fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
    let msg_len = u16::try_from(notif.message.chars().count()).unwrap_or(u16::MAX);
    let width = msg_len.saturating_add(6).clamp(20, 60).min(area.width);
    let height = 3u16.min(area.height);

    let x = area.width.saturating_sub(width + 1);
    let y = area.height.saturating_sub(height + 2);
    let toast_area = Rect::new(area.x + x, area.y + y, width, height);

    let (color, icon) = match notif.level {
        NotificationLevel::Success => (theme::SUCCESS_GREEN, "\u{2713}"),
        NotificationLevel::Error => (theme::ERROR_RED, "\u{2717}"),
        NotificationLevel::Info => (theme::ACCENT, "\u{b7}"),
    };

    frame.render_widget(Clear, toast_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);

    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(color)),
        Span::styled(notif.message.as_str(), theme::table_row()),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}
