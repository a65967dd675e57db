//! Host-supplied settings.
//!
//! Every field has a default, so hosts can deserialize partial documents and
//! only override what they care about.

use serde::{Deserialize, Serialize};

use crate::stroke::PencilStyle;
use crate::transform::MODIFIED_TOLERANCE;

/// Settings for an [`crate::EditSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How far from the full frame a crop may be and still count as untouched
    pub modified_tolerance: f64,
    /// Maximum number of drawing snapshots kept; `None` keeps all
    pub history_limit: Option<usize>,
    /// Pencil used when the host has never stored one
    pub default_pencil: PencilStyle,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            modified_tolerance: MODIFIED_TOLERANCE,
            history_limit: None,
            default_pencil: PencilStyle::default(),
        }
    }
}

/// Settings for the [`crate::drawer::AnimationDrawer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerConfig {
    /// Preset search queries offered as reaction sets
    pub reactions: Vec<String>,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        let reactions = [
            "\u{1F44D}", "\u{1F44E}", "\u{1F60D}", "\u{1F602}", "\u{1F62F}", "\u{1F615}",
            "\u{1F622}", "\u{1F621}", "\u{1F4AA}", "\u{1F44F}", "\u{1F648}", "\u{1F612}",
        ];
        Self {
            reactions: reactions.iter().map(|r| r.to_string()).collect(),
        }
    }
}
