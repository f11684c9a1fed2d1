//! One credential's tree, held in memory.

use chrono::Utc;
use uuid::Uuid;

use classvault_core::error::AppError;
use classvault_core::format::format_bytes;
use classvault_core::result::AppResult;
use classvault_core::types::FolderId;
use classvault_entity::file::File;
use classvault_entity::folder::{Folder, FolderContents};
use classvault_entity::workspace::{CategoryCount, SearchResults, Workspace, WorkspaceStats};

#[derive(Debug, Clone)]
struct FolderNode {
    parent: Option<FolderId>,
    folder: Folder,
}

#[derive(Debug, Clone)]
struct FileNode {
    parent: Option<FolderId>,
    file: File,
}

/// A workspace tree served by [`MemoryTreeClient`](super::MemoryTreeClient).
///
/// Nodes without a parent sit directly under the root folder. Counts and
/// sizes on folders are computed on every read.
#[derive(Debug, Clone)]
pub struct MemoryWorkspace {
    root: Folder,
    owner_name: String,
    folders: Vec<FolderNode>,
    files: Vec<FileNode>,
}

impl MemoryWorkspace {
    /// Creates an empty tree under `root`.
    pub fn new(root: Folder) -> Self {
        Self {
            owner_name: root.creator_name.clone().unwrap_or_default(),
            root,
            folders: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Name stamped on folders and files created through the client.
    pub fn owned_by(mut self, display_name: impl Into<String>) -> Self {
        self.owner_name = display_name.into();
        self
    }

    /// Adds a folder under `parent` (None for top level).
    pub fn with_folder(mut self, parent: Option<&str>, folder: Folder) -> Self {
        self.folders.push(FolderNode {
            parent: parent.map(FolderId::from),
            folder,
        });
        self
    }

    /// Adds a file under `parent` (None for the root).
    pub fn with_file(mut self, parent: Option<&str>, file: File) -> Self {
        self.files.push(FileNode {
            parent: parent.map(FolderId::from),
            file,
        });
        self
    }

    /// The root folder's id.
    pub fn root_id(&self) -> &FolderId {
        &self.root.id
    }

    /// Whether a folder exists anywhere in the tree.
    pub fn contains_folder(&self, id: &str) -> bool {
        self.folders.iter().any(|n| n.folder.id.as_str() == id)
    }

    /// Whether a file exists anywhere in the tree.
    pub fn contains_file(&self, id: &str) -> bool {
        self.files.iter().any(|n| n.file.id.as_str() == id)
    }

    /// Maps the root id onto the top-level slot.
    fn slot(&self, id: Option<&FolderId>) -> Option<FolderId> {
        id.filter(|id| *id != &self.root.id).cloned()
    }

    fn with_totals(&self, folder: &Folder) -> Folder {
        let id = self.slot(Some(&folder.id));
        let mut folder = folder.clone();
        let direct = self.files.iter().filter(|n| n.parent == id);
        folder.file_count = direct.clone().count() as u64;
        folder.total_size = direct.map(|n| n.file.size_bytes).sum();
        folder
    }

    fn children(&self, parent: Option<&FolderId>) -> (Vec<Folder>, Vec<File>) {
        let parent = self.slot(parent);
        let folders = self
            .folders
            .iter()
            .filter(|n| n.parent == parent)
            .map(|n| self.with_totals(&n.folder))
            .collect();
        let files = self
            .files
            .iter()
            .filter(|n| n.parent == parent)
            .map(|n| n.file.clone())
            .collect();
        (folders, files)
    }

    pub(crate) fn workspace(&self) -> Workspace {
        let (folders, _) = self.children(None);
        Workspace {
            root_folder: self.with_totals(&self.root),
            folders,
        }
    }

    pub(crate) fn contents(&self, id: &FolderId) -> AppResult<FolderContents> {
        let folder = if id == &self.root.id {
            self.root.clone()
        } else {
            self.folders
                .iter()
                .find(|n| &n.folder.id == id)
                .map(|n| n.folder.clone())
                .ok_or_else(|| folder_not_found(id.as_str()))?
        };
        let (folders, files) = self.children(Some(id));
        Ok(FolderContents {
            folder: self.with_totals(&folder),
            folders,
            files,
        })
    }

    fn ensure_parent(&self, parent: Option<&FolderId>) -> AppResult<()> {
        match self.slot(parent) {
            Some(id) if !self.contains_folder(id.as_str()) => Err(folder_not_found(id.as_str())),
            _ => Ok(()),
        }
    }

    pub(crate) fn create_folder(
        &mut self,
        parent: Option<&FolderId>,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Folder> {
        self.ensure_parent(parent)?;
        let parent = self.slot(parent);
        let name = name.trim();
        let duplicate = self
            .folders
            .iter()
            .any(|n| n.parent == parent && n.folder.name.eq_ignore_ascii_case(name));
        if duplicate {
            return Err(AppError::remote(
                409,
                format!("A folder named '{name}' already exists here"),
            ));
        }

        let mut folder = Folder::new(Uuid::new_v4().to_string(), name);
        folder.description = description.map(str::to_string);
        folder.creator_name = Some(self.owner_name.clone()).filter(|n| !n.is_empty());
        folder.created_at = Some(Utc::now());
        self.folders.push(FolderNode {
            parent,
            folder: folder.clone(),
        });
        Ok(folder)
    }

    pub(crate) fn add_file(
        &mut self,
        parent: Option<&FolderId>,
        name: &str,
        mime_type: &str,
        size_bytes: u64,
    ) -> AppResult<File> {
        self.ensure_parent(parent)?;
        let mut file = File::new(Uuid::new_v4().to_string(), name, mime_type);
        file.size_bytes = size_bytes;
        file.size_formatted = Some(format_bytes(size_bytes));
        file.uploaded_by = Some(self.owner_name.clone()).filter(|n| !n.is_empty());
        file.created_at = Some(Utc::now());
        self.files.push(FileNode {
            parent: self.slot(parent),
            file: file.clone(),
        });
        Ok(file)
    }

    /// Removes a folder and everything below it.
    pub(crate) fn remove_folder(&mut self, id: &str) -> AppResult<()> {
        if !self.contains_folder(id) {
            return Err(folder_not_found(id));
        }

        let mut doomed = vec![FolderId::from(id)];
        let mut cursor = 0;
        while cursor < doomed.len() {
            let current = doomed[cursor].clone();
            doomed.extend(
                self.folders
                    .iter()
                    .filter(|n| n.parent.as_ref() == Some(&current))
                    .map(|n| n.folder.id.clone()),
            );
            cursor += 1;
        }

        self.folders.retain(|n| !doomed.contains(&n.folder.id));
        self.files
            .retain(|n| !n.parent.as_ref().is_some_and(|p| doomed.contains(p)));
        Ok(())
    }

    pub(crate) fn remove_file(&mut self, id: &str) -> AppResult<()> {
        let before = self.files.len();
        self.files.retain(|n| n.file.id.as_str() != id);
        if self.files.len() == before {
            return Err(AppError::remote(404, "File not found"));
        }
        Ok(())
    }

    pub(crate) fn search(&self, query: &str) -> SearchResults {
        let needle = query.trim().to_lowercase();
        SearchResults {
            query: query.to_string(),
            folders: self
                .folders
                .iter()
                .filter(|n| n.folder.name.to_lowercase().contains(&needle))
                .map(|n| self.with_totals(&n.folder))
                .collect(),
            files: self
                .files
                .iter()
                .filter(|n| n.file.name.to_lowercase().contains(&needle))
                .map(|n| n.file.clone())
                .collect(),
        }
    }

    pub(crate) fn recent(&self, limit: u32) -> Vec<File> {
        let mut files: Vec<File> = self.files.iter().map(|n| n.file.clone()).collect();
        files.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        files.truncate(limit as usize);
        files
    }

    pub(crate) fn stats(&self) -> WorkspaceStats {
        let mut by_category: Vec<CategoryCount> = Vec::new();
        for node in &self.files {
            let category = node.file.category();
            match by_category.iter_mut().find(|c| c.category == category) {
                Some(entry) => entry.count += 1,
                None => by_category.push(CategoryCount { category, count: 1 }),
            }
        }

        let total_size_bytes = self.files.iter().map(|n| n.file.size_bytes).sum();
        WorkspaceStats {
            total_files: self.files.len() as u64,
            total_folders: self.folders.len() as u64,
            total_size_bytes,
            total_size_formatted: Some(format_bytes(total_size_bytes)),
            files_by_category: by_category,
        }
    }
}

fn folder_not_found(id: &str) -> AppError {
    AppError::remote(404, format!("Folder '{id}' not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryWorkspace {
        MemoryWorkspace::new(Folder::new("root", "Branch"))
            .owned_by("Ms. Rivera")
            .with_folder(None, Folder::new("hw", "Homework"))
            .with_folder(Some("hw"), Folder::new("wk1", "Week 1"))
            .with_file(Some("wk1"), File::new("f1", "sheet.pdf", "application/pdf"))
            .with_file(None, File::new("f2", "notice.txt", "text/plain"))
    }

    #[test]
    fn test_root_lists_top_level_only() {
        let tree = sample();
        let ws = tree.workspace();
        assert_eq!(ws.folders.len(), 1);
        assert_eq!(ws.folders[0].name, "Homework");
        assert_eq!(ws.root_folder.file_count, 1);

        let root = tree.contents(&FolderId::from("root")).unwrap();
        assert_eq!(root.files.len(), 1);
    }

    #[test]
    fn test_duplicate_folder_is_conflict() {
        let mut tree = sample();
        let err = tree
            .create_folder(None, "homework", None)
            .unwrap_err();
        assert_eq!(err.status, Some(409));

        let created = tree
            .create_folder(Some(&FolderId::from("hw")), "Week 2", None)
            .unwrap();
        assert_eq!(created.creator_name.as_deref(), Some("Ms. Rivera"));
    }

    #[test]
    fn test_remove_folder_is_recursive() {
        let mut tree = sample();
        tree.remove_folder("hw").unwrap();
        assert!(!tree.contains_folder("wk1"));
        assert!(!tree.contains_file("f1"));
        assert!(tree.contains_file("f2"));
        assert_eq!(tree.remove_folder("hw").unwrap_err().status, Some(404));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let results = sample().search("WEEK");
        assert_eq!(results.folders.len(), 1);
        assert!(results.files.is_empty());
    }

    #[test]
    fn test_stats_count_categories() {
        let stats = sample().stats();
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.total_folders, 2);
        assert_eq!(stats.files_by_category.len(), 2);
    }
}
