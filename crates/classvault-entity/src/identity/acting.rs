//! The credential actually sent with requests.

use classvault_core::config::SessionConfig;
use std::fmt;

/// The caller's own credential and, when browsing on behalf of someone
/// else, the impersonated one.
///
/// Passed explicitly into every tree call; nothing reads credentials from
/// ambient storage.
#[derive(Clone, PartialEq, Eq)]
pub struct ActingIdentity {
    own_credential: String,
    impersonated_credential: Option<String>,
}

impl ActingIdentity {
    /// Identity acting as itself.
    pub fn own(credential: impl Into<String>) -> Self {
        Self {
            own_credential: credential.into(),
            impersonated_credential: None,
        }
    }

    /// Identity acting on behalf of another credential.
    pub fn acting_as(own: impl Into<String>, impersonated: impl Into<String>) -> Self {
        Self {
            own_credential: own.into(),
            impersonated_credential: Some(impersonated.into()),
        }
    }

    /// Build from session configuration. Blank impersonated credentials are
    /// treated as absent.
    pub fn from_session(session: &SessionConfig) -> Self {
        Self {
            own_credential: session.credential.clone(),
            impersonated_credential: session
                .impersonated_credential
                .clone()
                .filter(|c| !c.trim().is_empty()),
        }
    }

    /// The credential to put on the wire.
    pub fn effective_credential(&self) -> &str {
        self.impersonated_credential
            .as_deref()
            .unwrap_or(&self.own_credential)
    }

    /// The caller's own credential.
    pub fn own_credential(&self) -> &str {
        &self.own_credential
    }

    /// Whether requests are sent on behalf of someone else.
    pub fn is_impersonating(&self) -> bool {
        self.impersonated_credential.is_some()
    }
}

impl fmt::Debug for ActingIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActingIdentity")
            .field("impersonating", &self.is_impersonating())
            .finish_non_exhaustive()
    }
}
