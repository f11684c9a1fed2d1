//! Demo school workspace for sandbox sessions.

use chrono::{DateTime, TimeZone, Utc};

use classvault_entity::file::File;
use classvault_entity::folder::{Folder, FolderKind};
use classvault_entity::permission::PermissionFlags;

use super::tree::MemoryWorkspace;

fn at(day: u32, hour: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2024, 9, day, hour, 0, 0).single()
}

fn folder(id: &str, name: &str, kind: FolderKind, creator: &str) -> Folder {
    let mut folder = Folder::new(id, name);
    folder.kind = kind;
    folder.creator_name = Some(creator.to_string());
    folder.created_at = at(1, 8);
    folder
}

fn file(id: &str, name: &str, mime: &str, size: u64, uploader: &str, day: u32) -> File {
    let mut file = File::new(id, name, mime);
    file.size_bytes = size;
    file.uploaded_by = Some(uploader.to_string());
    file.created_at = at(day, 9);
    file
}

/// Builds the demo tree with `display_name` as the owner of the
/// personal folders.
pub(crate) fn demo_workspace(display_name: &str) -> MemoryWorkspace {
    let mut root = folder("branch-root", "Main Campus", FolderKind::BranchRoot, "Administration");
    root.permissions = PermissionFlags {
        can_upload: Some(false),
        can_create_folder: Some(false),
        can_delete: Some(false),
    };

    let mut shared = folder(
        "shared-projects",
        "Shared Projects",
        FolderKind::SharedProjects,
        "Administration",
    );
    shared.can_manage = true;

    let mut library = folder("library", "Library", FolderKind::Library, "Administration");
    library.permissions.can_upload = Some(false);

    MemoryWorkspace::new(root)
        .owned_by(display_name)
        .with_folder(
            None,
            folder("homework", "Homework", FolderKind::HomeworkParent, display_name),
        )
        .with_folder(
            Some("homework"),
            folder("homework-week-1", "Week 1", FolderKind::Homework, display_name),
        )
        .with_folder(
            Some("homework"),
            folder("homework-week-2", "Week 2", FolderKind::Homework, display_name),
        )
        .with_folder(None, shared)
        .with_folder(None, library)
        .with_folder(
            Some("library"),
            folder("library-reading", "Reading Lists", FolderKind::Curriculum, "Librarian"),
        )
        .with_file(
            Some("homework-week-1"),
            file("fi-1", "Fractions worksheet.pdf", "application/pdf", 182_044, display_name, 2),
        )
        .with_file(
            Some("homework-week-2"),
            file(
                "fi-2",
                "Essay rubric.docx",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                48_310,
                display_name,
                9,
            ),
        )
        .with_file(
            Some("shared-projects"),
            file("fi-3", "Science fair.jpg", "image/jpeg", 2_411_724, "Mr. Okafor", 12),
        )
        .with_file(
            Some("library-reading"),
            file("fi-4", "Year 5 reading list.txt", "text/plain", 3_120, "Librarian", 5),
        )
        .with_file(
            None,
            file("fi-5", "Term calendar.pdf", "application/pdf", 96_512, "Administration", 1),
        )
}
