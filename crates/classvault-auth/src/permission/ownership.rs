//! Ownership matching against the name fields the server returns.

use classvault_entity::file::File;
use classvault_entity::folder::Folder;
use classvault_entity::identity::Actor;

/// Whether any of the server's name fields equals the actor's display name,
/// or, when no name field is present, the creator id equals the actor's id.
fn matches<'a>(
    actor: &Actor,
    mut names: impl Iterator<Item = &'a str>,
    owner_id: Option<&str>,
) -> bool {
    let own_name = actor.display_name.trim();
    let mut saw_name = false;

    let name_match = names.any(|name| {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        saw_name = true;
        !own_name.is_empty() && name == own_name
    });
    if name_match {
        return true;
    }
    if saw_name {
        return false;
    }

    match (owner_id, actor.user_id.as_deref()) {
        (Some(owner), Some(own)) => !owner.is_empty() && owner == own,
        _ => false,
    }
}

/// Whether the actor created the folder.
pub fn owns_folder(actor: &Actor, folder: &Folder) -> bool {
    matches(actor, folder.creator_names(), folder.creator_id.as_deref())
}

/// Whether the actor uploaded the file.
pub fn owns_file(actor: &Actor, file: &File) -> bool {
    matches(actor, file.uploader_names(), file.uploader_id.as_deref())
}
