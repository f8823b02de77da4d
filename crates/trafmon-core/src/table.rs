// ── Table view models ──
//
// Each renderer maps a record slice to a `TableView`: fixed headers and one
// row of plain-text cells per record, in response order. What a row's
// button does is data (`RowAction`), not markup, so the HTML renderer and
// the TUI render the same model.

use serde::Serialize;

use crate::model::{Alert, Interface, Packet, Resource, User};

/// Shown when a user has never logged in.
pub const NEVER: &str = "Never";

// ── Identity ────────────────────────────────────────────────────────

/// The four dashboard tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TableId {
    Interfaces,
    Alerts,
    Packets,
    Users,
}

impl TableId {
    pub const ALL: [TableId; 4] = [
        TableId::Interfaces,
        TableId::Alerts,
        TableId::Packets,
        TableId::Users,
    ];

    /// Id of the `<tbody>` element the table renders into.
    pub fn dom_id(self) -> &'static str {
        match self {
            Self::Interfaces => "interfacesTable",
            Self::Alerts => "alertsTable",
            Self::Packets => "packetsTable",
            Self::Users => "usersTable",
        }
    }

    pub fn resource(self) -> Resource {
        match self {
            Self::Interfaces => Resource::Interfaces,
            Self::Alerts => Resource::Alerts,
            Self::Packets => Resource::Packets,
            Self::Users => Resource::Users,
        }
    }

    pub fn headers(self) -> &'static [&'static str] {
        match self {
            Self::Interfaces => &["Name", "IP Address", "MAC Address", "Status", "Monitored"],
            Self::Alerts => &["Time", "Type", "Severity", "Description", "Status"],
            Self::Packets => &[
                "Time",
                "Source",
                "Destination",
                "Protocol",
                "Length",
                "Flags",
            ],
            Self::Users => &["Name", "Role", "Created", "Last Login"],
        }
    }

    /// Whether rows of this table can carry an action button.
    pub fn has_actions(self) -> bool {
        !matches!(self, Self::Packets)
    }
}

// ── Row actions ─────────────────────────────────────────────────────

/// What a row button triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    ToggleMonitoring,
    ResolveAlert,
    DeleteUser,
}

impl ActionKind {
    /// Stable machine name (`data-action` attribute value).
    pub fn name(self) -> &'static str {
        match self {
            Self::ToggleMonitoring => "toggle-monitoring",
            Self::ResolveAlert => "resolve-alert",
            Self::DeleteUser => "delete-user",
        }
    }

    /// Visual weight of the button: primary, success or danger.
    pub fn style(self) -> &'static str {
        match self {
            Self::ToggleMonitoring => "primary",
            Self::ResolveAlert => "success",
            Self::DeleteUser => "danger",
        }
    }
}

/// A button attached to a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowAction {
    pub kind: ActionKind,
    pub id: i64,
    pub label: &'static str,
}

// ── Rows and tables ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub action: Option<RowAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub id: TableId,
    pub headers: &'static [&'static str],
    pub rows: Vec<TableRow>,
}

impl TableView {
    fn new(id: TableId, rows: Vec<TableRow>) -> Self {
        Self {
            id,
            headers: id.headers(),
            rows,
        }
    }

    /// A table with headers and no rows yet.
    pub fn empty(id: TableId) -> Self {
        Self::new(id, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_owned()
}

// ── Renderers ───────────────────────────────────────────────────────

pub fn monitor_label(is_monitored: bool) -> &'static str {
    if is_monitored {
        "Stop Monitoring"
    } else {
        "Start Monitoring"
    }
}

pub fn interfaces_table(interfaces: &[Interface]) -> TableView {
    let rows = interfaces
        .iter()
        .map(|iface| TableRow {
            cells: vec![
                iface.name.clone(),
                text(iface.ip_address.as_deref()),
                text(iface.mac_address.as_deref()),
                text(iface.status.as_deref()),
                if iface.is_monitored { "Yes" } else { "No" }.to_owned(),
            ],
            action: Some(RowAction {
                kind: ActionKind::ToggleMonitoring,
                id: iface.id,
                label: monitor_label(iface.is_monitored),
            }),
        })
        .collect();
    TableView::new(TableId::Interfaces, rows)
}

/// Resolved alerts get no button.
pub fn alerts_table(alerts: &[Alert]) -> TableView {
    let rows = alerts
        .iter()
        .map(|alert| TableRow {
            cells: vec![
                alert.timestamp.datetime_label(),
                alert.alert_type.clone(),
                text(alert.severity.as_deref()),
                text(alert.description.as_deref()),
                alert.status_label().to_owned(),
            ],
            action: (!alert.is_resolved).then_some(RowAction {
                kind: ActionKind::ResolveAlert,
                id: alert.id,
                label: "Resolve",
            }),
        })
        .collect();
    TableView::new(TableId::Alerts, rows)
}

pub fn packets_table(packets: &[Packet]) -> TableView {
    let rows = packets
        .iter()
        .map(|packet| TableRow {
            cells: vec![
                packet.timestamp.datetime_label(),
                packet.source.to_string(),
                packet.destination.to_string(),
                text(packet.protocol.as_deref()),
                packet.length.to_string(),
                text(packet.flags.as_deref()),
            ],
            action: None,
        })
        .collect();
    TableView::new(TableId::Packets, rows)
}

pub fn users_table(users: &[User]) -> TableView {
    let rows = users
        .iter()
        .map(|user| TableRow {
            cells: vec![
                user.name.clone(),
                text(user.role.as_deref()),
                user.created_at
                    .as_ref()
                    .map(crate::model::Timestamp::datetime_label)
                    .unwrap_or_default(),
                user.last_login
                    .as_ref()
                    .map_or_else(|| NEVER.to_owned(), crate::model::Timestamp::datetime_label),
            ],
            action: Some(RowAction {
                kind: ActionKind::DeleteUser,
                id: user.id,
                label: "Delete",
            }),
        })
        .collect();
    TableView::new(TableId::Users, rows)
}
