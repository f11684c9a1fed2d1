//! Why a navigation request was issued, and how it ended.

use classvault_entity::navigation::NavigationPathEntry;

/// What the caller wants the navigation to do.
///
/// Only `UserDescend` ever pushes a breadcrumb entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationIntent {
    /// The user opened a folder.
    UserDescend(NavigationPathEntry),
    /// The user pressed back.
    UserAscend,
    /// Reload the current location after a mutation or a refresh.
    ProgrammaticReload,
    /// Clear the breadcrumb and show the workspace root.
    ReturnToRoot,
}

impl NavigationIntent {
    /// Short label used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserDescend(_) => "user_descend",
            Self::UserAscend => "user_ascend",
            Self::ProgrammaticReload => "programmatic_reload",
            Self::ReturnToRoot => "return_to_root",
        }
    }
}

/// Result of a navigation request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// The response was applied; the view changed.
    Committed,
    /// A newer request was issued while this one was in flight; nothing
    /// changed.
    Discarded,
    /// Back was pressed at the root; the caller should close the browser.
    ExitRequested,
    /// Nothing to do (e.g. closing an overlay that is not open).
    Unchanged,
}

impl NavOutcome {
    /// Whether the view now reflects this request.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed)
    }
}
