//! Screen identifiers and their tab order.

use std::fmt;

use trafmon_core::{Resource, TableId};

/// One tab per polled resource, navigable by number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Traffic, // 1
    Interfaces, // 2
    Alerts,     // 3
    Packets,    // 4
    Users,      // 5
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 5] = [
        Self::Traffic,
        Self::Interfaces,
        Self::Alerts,
        Self::Packets,
        Self::Users,
    ];

    pub fn number(self) -> u8 {
        match self {
            Self::Traffic => 1,
            Self::Interfaces => 2,
            Self::Alerts => 3,
            Self::Packets => 4,
            Self::Users => 5,
        }
    }

    /// Screen from a numeric key (1-5). Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == n)
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous screen in tab order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// The resource refreshed when this tab is selected.
    pub fn resource(self) -> Resource {
        match self {
            Self::Traffic => Resource::Traffic,
            Self::Interfaces => Resource::Interfaces,
            Self::Alerts => Resource::Alerts,
            Self::Packets => Resource::Packets,
            Self::Users => Resource::Users,
        }
    }

    /// The table shown on this tab; the traffic tab shows charts instead.
    pub fn table(self) -> Option<TableId> {
        match self {
            Self::Traffic => None,
            Self::Interfaces => Some(TableId::Interfaces),
            Self::Alerts => Some(TableId::Alerts),
            Self::Packets => Some(TableId::Packets),
            Self::Users => Some(TableId::Users),
        }
    }

    pub fn label(self) -> &'static str {
        self.resource().title()
    }
}

impl From<TableId> for ScreenId {
    fn from(id: TableId) -> Self {
        match id {
            TableId::Interfaces => Self::Interfaces,
            TableId::Alerts => Self::Alerts,
            TableId::Packets => Self::Packets,
            TableId::Users => Self::Users,
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
