//! Effective permission resolver for browser actions.
//!
//! Resolution order:
//! 1. Administrator: always granted.
//! 2. Root-level folders: delete is restricted to administrators.
//! 3. Server-declared per-item flag, when present: honored directly.
//! 4. Ownership: the actor created or uploaded the item.
//! 5. Folder management: the folder grants management rights to everyone.
//! 6. Default deny.

use serde::{Deserialize, Serialize};
use tracing::debug;

use classvault_core::error::AppError;
use classvault_entity::folder::Folder;
use classvault_entity::identity::Actor;
use classvault_entity::permission::PermissionAction;
use classvault_entity::workspace::{BrowserItem, ItemKind};

use super::ownership::{owns_file, owns_folder};

/// Result of resolving a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectivePermission {
    /// Whether the action is allowed.
    pub granted: bool,
    /// Which rule decided.
    pub source: PermissionSource,
}

impl EffectivePermission {
    fn grant(source: PermissionSource) -> Self {
        Self {
            granted: true,
            source,
        }
    }

    fn deny(source: PermissionSource) -> Self {
        Self {
            granted: false,
            source,
        }
    }
}

/// Where a decision came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionSource {
    /// The actor is an administrator.
    Administrator,
    /// The item is a root-level folder and the actor is not an administrator.
    RootRestricted,
    /// The server declared a flag for this item.
    ServerFlag,
    /// The actor owns the item.
    Owner,
    /// The folder grants management rights.
    FolderManage,
    /// No rule granted access.
    Denied,
}

/// What is being deleted and where it sits.
#[derive(Debug, Clone, Copy)]
pub struct DeleteTarget<'a> {
    /// The item itself.
    pub item: &'a BrowserItem,
    /// The folder currently displaying the item (None at the workspace root
    /// or in workspace-wide listings).
    pub container: Option<&'a Folder>,
    /// Whether the item is a direct child of the workspace.
    pub root_level: bool,
}

/// Resolves upload, create-folder, and delete permissions locally.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionResolver;

impl PermissionResolver {
    /// Creates a new resolver.
    pub fn new() -> Self {
        Self
    }

    /// Resolves whether the actor may upload into `folder`.
    pub fn resolve_upload(&self, actor: &Actor, folder: &Folder) -> EffectivePermission {
        self.resolve_folder_action(actor, folder, PermissionAction::Upload)
    }

    /// Resolves whether the actor may create a sub-folder in `folder`.
    pub fn resolve_create_folder(&self, actor: &Actor, folder: &Folder) -> EffectivePermission {
        self.resolve_folder_action(actor, folder, PermissionAction::CreateFolder)
    }

    /// Resolves whether the actor may delete the target.
    pub fn resolve_delete(&self, actor: &Actor, target: DeleteTarget<'_>) -> EffectivePermission {
        let decision = if actor.administrator {
            EffectivePermission::grant(PermissionSource::Administrator)
        } else if target.root_level && target.item.kind() == ItemKind::Folder {
            EffectivePermission::deny(PermissionSource::RootRestricted)
        } else {
            let (declared, owned, item_manage) = match target.item {
                BrowserItem::Folder(folder) => (
                    folder.permissions.can_delete,
                    owns_folder(actor, folder),
                    folder.can_manage,
                ),
                BrowserItem::File(file) => (None, owns_file(actor, file), false),
            };
            let manage = item_manage || target.container.is_some_and(|c| c.can_manage);
            Self::chain(declared, owned, manage)
        };

        debug!(
            item_id = %target.item.id(),
            kind = %target.item.kind(),
            root_level = target.root_level,
            granted = decision.granted,
            source = ?decision.source,
            "Resolved delete permission"
        );
        decision
    }

    /// Whether the actor may upload into `folder`.
    pub fn can_upload(&self, actor: &Actor, folder: &Folder) -> bool {
        self.resolve_upload(actor, folder).granted
    }

    /// Whether the actor may create a sub-folder in `folder`.
    pub fn can_create_folder(&self, actor: &Actor, folder: &Folder) -> bool {
        self.resolve_create_folder(actor, folder).granted
    }

    /// Whether the actor may delete the target.
    pub fn can_delete(&self, actor: &Actor, target: DeleteTarget<'_>) -> bool {
        self.resolve_delete(actor, target).granted
    }

    /// Fails with `PermissionDenied` unless the actor may upload.
    pub fn require_upload(&self, actor: &Actor, folder: &Folder) -> Result<(), AppError> {
        if self.can_upload(actor, folder) {
            Ok(())
        } else {
            Err(AppError::permission_denied(format!(
                "You don't have permission to upload to '{}'",
                folder.name
            )))
        }
    }

    /// Fails with `PermissionDenied` unless the actor may create a folder.
    pub fn require_create_folder(&self, actor: &Actor, folder: &Folder) -> Result<(), AppError> {
        if self.can_create_folder(actor, folder) {
            Ok(())
        } else {
            Err(AppError::permission_denied(format!(
                "You don't have permission to create folders in '{}'",
                folder.name
            )))
        }
    }

    /// Fails with `PermissionDenied` unless the actor may delete.
    pub fn require_delete(&self, actor: &Actor, target: DeleteTarget<'_>) -> Result<(), AppError> {
        let decision = self.resolve_delete(actor, target);
        if decision.granted {
            return Ok(());
        }
        let message = match decision.source {
            PermissionSource::RootRestricted => format!(
                "Only administrators can delete the top-level folder '{}'",
                target.item.name()
            ),
            _ => format!(
                "You don't have permission to delete '{}'",
                target.item.name()
            ),
        };
        Err(AppError::permission_denied(message))
    }

    fn resolve_folder_action(
        &self,
        actor: &Actor,
        folder: &Folder,
        action: PermissionAction,
    ) -> EffectivePermission {
        let decision = if actor.administrator {
            EffectivePermission::grant(PermissionSource::Administrator)
        } else {
            Self::chain(
                folder.permissions.declared(action),
                owns_folder(actor, folder),
                folder.can_manage,
            )
        };

        debug!(
            folder_id = %folder.id,
            action = %action,
            granted = decision.granted,
            source = ?decision.source,
            "Resolved folder permission"
        );
        decision
    }

    /// Rules 3 to 6 for a non-administrator.
    fn chain(declared: Option<bool>, owned: bool, manage: bool) -> EffectivePermission {
        if let Some(allowed) = declared {
            return if allowed {
                EffectivePermission::grant(PermissionSource::ServerFlag)
            } else {
                EffectivePermission::deny(PermissionSource::ServerFlag)
            };
        }
        if owned {
            return EffectivePermission::grant(PermissionSource::Owner);
        }
        if manage {
            return EffectivePermission::grant(PermissionSource::FolderManage);
        }
        EffectivePermission::deny(PermissionSource::Denied)
    }
}
