// ── Backend resource collections ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// One of the five record collections the dashboard polls.
///
/// Also names the dashboard tabs: selecting a tab refreshes exactly the
/// resource of the same name. Parsing is case-insensitive, so `"Alerts"`
/// and `"alerts"` both select [`Resource::Alerts`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Traffic,
    Interfaces,
    Alerts,
    Packets,
    Users,
}

impl Resource {
    /// Path under `/api/` the resource is listed from.
    pub fn path(self) -> &'static str {
        self.into()
    }

    /// Human-readable title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Traffic => "Traffic",
            Self::Interfaces => "Interfaces",
            Self::Alerts => "Alerts",
            Self::Packets => "Packets",
            Self::Users => "Users",
        }
    }
}
