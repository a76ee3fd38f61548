//! Admin UI preferences stored as key/value JSON per user.

use serde::{Deserialize, Serialize};

/// Preference key for the admin sidebar state.
pub const SIDEBAR_PREFERENCE_KEY: &str = "sidebar";

/// Collapse state of the admin sidebar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarPreference {
    #[serde(default)]
    pub collapsed: bool,
}

impl SidebarPreference {
    /// Read a stored value, falling back to the default for missing or
    /// malformed JSON.
    pub fn from_stored(value: Option<serde_json::Value>) -> Self {
        value
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    pub fn to_value(self) -> serde_json::Value {
        serde_json::json!({ "collapsed": self.collapsed })
    }
}
