//! The principal permission checks are evaluated against.

use classvault_core::config::SessionConfig;
use serde::{Deserialize, Serialize};

/// The user the browser acts for, as far as permissions are concerned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Display name, compared against creator/uploader name fields.
    pub display_name: String,
    /// Opaque user id, compared only when no name field matched.
    pub user_id: Option<String>,
    /// Whether the user holds the administrator role.
    pub administrator: bool,
}

impl Actor {
    /// A regular user.
    pub fn named(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            user_id: None,
            administrator: false,
        }
    }

    /// An administrator.
    pub fn administrator(display_name: impl Into<String>) -> Self {
        Self {
            administrator: true,
            ..Self::named(display_name)
        }
    }

    /// Build from session configuration.
    pub fn from_session(session: &SessionConfig) -> Self {
        Self {
            display_name: session.display_name.clone(),
            user_id: session.user_id.clone().filter(|id| !id.is_empty()),
            administrator: session.administrator,
        }
    }
}
