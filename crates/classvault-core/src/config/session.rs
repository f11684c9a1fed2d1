//! Session identity configuration.

use serde::{Deserialize, Serialize};

/// Who the browser acts as.
///
/// `impersonated_credential` is set when a parent browses a child's
/// workspace; it replaces `credential` on every outgoing request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// The logged-in user's own bearer credential.
    #[serde(default)]
    pub credential: String,
    /// Credential of the identity being browsed on behalf of.
    #[serde(default)]
    pub impersonated_credential: Option<String>,
    /// Display name used for ownership matching.
    #[serde(default)]
    pub display_name: String,
    /// Optional opaque user id, used only as a last-resort ownership check.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Whether the user holds the administrator role.
    #[serde(default)]
    pub administrator: bool,
}
