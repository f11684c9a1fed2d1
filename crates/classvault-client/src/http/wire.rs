//! Wire payloads of the workspace REST API and their normalization into
//! domain entities.
//!
//! The service has grown several payload shapes over time. All of the
//! sniffing happens here, once; the rest of the workspace only sees the
//! canonical entities.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use classvault_core::error::{AppError, ErrorKind};
use classvault_core::format::{FileCategory, category_for_mime, decode_name};
use classvault_core::result::AppResult;
use classvault_core::types::{FileId, FolderId};
use classvault_entity::file::{File, Thumbnail};
use classvault_entity::folder::{Folder, FolderContents, FolderKind};
use classvault_entity::permission::PermissionFlags;
use classvault_entity::workspace::{CategoryCount, SearchResults, Workspace, WorkspaceStats};

/// `{success, data, message}` envelope every endpoint answers with.
///
/// Missing `Option` fields read as `None`; `T` itself needs no `Default`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub success: Option<bool>,
    pub data: Option<T>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// The server's own explanation, if any.
    pub fn server_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|m| !m.trim().is_empty())
    }
}

/// Body of an error response whose `data` we do not care about.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
    }
}

/// Identifiers arrive as strings or numbers depending on the endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireId {
    Text(String),
    Number(i64),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// Reference fields (`createdBy`, ...) may be a bare id or an embedded
/// user object.
fn loose_id(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Object(map) => map.get("id").or_else(|| map.get("_id")).and_then(loose_id),
        _ => None,
    }
}

/// Sizes arrive as numbers or as decimal strings (Drive-style).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireSize {
    Number(u64),
    Text(String),
}

impl WireSize {
    fn bytes(&self) -> u64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse().unwrap_or(0),
        }
    }
}

/// Nested `permissions: {canUpload, ...}` shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WirePermissionObject {
    #[serde(default)]
    pub can_upload: Option<bool>,
    #[serde(default)]
    pub can_create_folder: Option<bool>,
    #[serde(default)]
    pub can_delete: Option<bool>,
}

/// One entry of a folder's `members` array.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireMember {
    #[serde(default)]
    pub user_id: Option<serde_json::Value>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Every spelling of one value is its own field, so a payload carrying two
/// of them at once still decodes; the conversions take the first present.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireFolder {
    #[serde(default)]
    pub id: Option<WireId>,
    #[serde(default, rename = "_id")]
    pub mongo_id: Option<WireId>,
    #[serde(default)]
    pub folder_id: Option<WireId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub folder_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub folder_type: Option<String>,
    #[serde(default)]
    pub file_count: Option<u64>,
    #[serde(default)]
    pub total_size: Option<WireSize>,
    #[serde(default)]
    pub color_hint: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub can_manage: Option<bool>,
    #[serde(default)]
    pub creator_name: Option<String>,
    #[serde(default)]
    pub created_by_name: Option<String>,
    #[serde(default)]
    pub created_by_id: Option<serde_json::Value>,
    #[serde(default)]
    pub created_by: Option<serde_json::Value>,
    #[serde(default)]
    pub creator_id: Option<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub created_time: Option<String>,
    // Shape 1: flat flags.
    #[serde(default)]
    pub user_can_upload: Option<bool>,
    #[serde(default)]
    pub user_can_create_folder: Option<bool>,
    #[serde(default)]
    pub user_can_delete: Option<bool>,
    // Shape 2: nested object.
    #[serde(default)]
    pub permissions: Option<WirePermissionObject>,
    // Shape 3: list of granted action names, top-level or per member.
    #[serde(default)]
    pub user_permissions: Option<Vec<String>>,
    #[serde(default)]
    pub member_permissions: Option<Vec<String>>,
    #[serde(default)]
    pub members: Option<Vec<WireMember>>,
}

/// Collapse the three historical permission shapes into one.
///
/// Flat flags win over the nested object, which wins over the list.
pub(crate) fn normalize_permissions(
    flat_upload: Option<bool>,
    flat_create: Option<bool>,
    flat_delete: Option<bool>,
    nested: Option<&WirePermissionObject>,
    listed: Option<&[String]>,
) -> PermissionFlags {
    let listed_has = |names: &[&str]| {
        listed.map(|list| {
            list.iter().any(|granted| {
                let granted = granted.trim().to_ascii_lowercase().replace(['-', ' '], "_");
                names.contains(&granted.as_str())
            })
        })
    };

    PermissionFlags {
        can_upload: flat_upload
            .or(nested.and_then(|n| n.can_upload))
            .or_else(|| listed_has(&["upload", "write"])),
        can_create_folder: flat_create
            .or(nested.and_then(|n| n.can_create_folder))
            .or_else(|| listed_has(&["create_folder", "createfolder", "write"])),
        can_delete: flat_delete
            .or(nested.and_then(|n| n.can_delete))
            .or_else(|| listed_has(&["delete"])),
    }
}

/// The server scopes `members` to the requesting user, so every entry's
/// grants apply to the caller.
fn member_grants(members: &[WireMember]) -> Vec<String> {
    members
        .iter()
        .flat_map(|m| m.permissions.iter().cloned())
        .collect()
}

fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn missing_id(what: &str, name: &str) -> AppError {
    AppError::new(
        ErrorKind::Serialization,
        format!("The server sent a {what} without an id ('{name}')"),
    )
}

impl WireFolder {
    pub fn into_folder(self) -> AppResult<Folder> {
        let name = non_blank(self.name).or(self.folder_name).unwrap_or_default();
        let id = self
            .id
            .or(self.mongo_id)
            .or(self.folder_id)
            .ok_or_else(|| missing_id("folder", &name))?;

        let listed = self
            .user_permissions
            .or(self.member_permissions)
            .or_else(|| self.members.as_deref().map(member_grants));
        let permissions = normalize_permissions(
            self.user_can_upload,
            self.user_can_create_folder,
            self.user_can_delete,
            self.permissions.as_ref(),
            listed.as_deref(),
        );

        Ok(Folder {
            id: FolderId::new(id.into_string()),
            name: decode_name(&name),
            description: non_blank(self.description),
            kind: self
                .kind
                .or(self.folder_type)
                .as_deref()
                .map(FolderKind::from_wire)
                .unwrap_or_default(),
            file_count: self.file_count.unwrap_or(0),
            total_size: self.total_size.as_ref().map(WireSize::bytes).unwrap_or(0),
            color_hint: non_blank(self.color_hint).or(non_blank(self.color)),
            can_manage: self.can_manage.unwrap_or(false),
            creator_name: non_blank(self.creator_name),
            created_by_name: non_blank(self.created_by_name),
            creator_id: [&self.created_by_id, &self.created_by, &self.creator_id]
                .into_iter()
                .flatten()
                .find_map(loose_id),
            created_at: parse_timestamp(self.created_at.or(self.created_time).as_deref()),
            permissions,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireThumbnail {
    #[serde(default)]
    pub has_thumbnail: bool,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireFile {
    #[serde(default)]
    pub id: Option<WireId>,
    #[serde(default, rename = "_id")]
    pub mongo_id: Option<WireId>,
    #[serde(default)]
    pub file_id: Option<WireId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub mimetype: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub size: Option<WireSize>,
    #[serde(default)]
    pub size_bytes: Option<WireSize>,
    #[serde(default)]
    pub file_size: Option<WireSize>,
    #[serde(default)]
    pub size_formatted: Option<String>,
    #[serde(default)]
    pub formatted_size: Option<String>,
    #[serde(default)]
    pub uploaded_by: Option<String>,
    #[serde(default)]
    pub uploader_name: Option<String>,
    #[serde(default)]
    pub uploaded_by_name: Option<String>,
    #[serde(default)]
    pub uploader_id: Option<serde_json::Value>,
    #[serde(default)]
    pub uploaded_by_id: Option<serde_json::Value>,
    #[serde(default)]
    pub web_view_link: Option<String>,
    #[serde(default)]
    pub web_content_link: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<WireThumbnail>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

impl WireFile {
    pub fn into_file(self) -> AppResult<File> {
        let name = [self.name, self.file_name, self.original_name]
            .into_iter()
            .find_map(non_blank)
            .unwrap_or_default();
        let id = self
            .id
            .or(self.mongo_id)
            .or(self.file_id)
            .ok_or_else(|| missing_id("file", &name))?;

        Ok(File {
            id: FileId::new(id.into_string()),
            name: decode_name(&name),
            mime_type: [self.mime_type, self.mimetype, self.file_type]
                .into_iter()
                .find_map(non_blank)
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            size_bytes: [&self.size, &self.size_bytes, &self.file_size]
                .into_iter()
                .flatten()
                .next()
                .map(WireSize::bytes)
                .unwrap_or(0),
            size_formatted: non_blank(self.size_formatted).or(non_blank(self.formatted_size)),
            uploaded_by: non_blank(self.uploaded_by),
            uploader_name: non_blank(self.uploader_name).or(non_blank(self.uploaded_by_name)),
            uploader_id: [&self.uploader_id, &self.uploaded_by_id]
                .into_iter()
                .flatten()
                .find_map(loose_id),
            web_view_link: non_blank(self.web_view_link),
            web_content_link: non_blank(self.web_content_link),
            thumbnail: self.thumbnail.map(|t| Thumbnail {
                has_thumbnail: t.has_thumbnail,
                thumbnail_url: non_blank(t.thumbnail_url).or(non_blank(t.url)),
            }),
            created_at: parse_timestamp(
                self.created_at
                    .or(self.created_time)
                    .or(self.uploaded_at)
                    .as_deref(),
            ),
        })
    }
}

fn folders(list: Vec<WireFolder>) -> AppResult<Vec<Folder>> {
    list.into_iter().map(WireFolder::into_folder).collect()
}

fn files(list: Vec<WireFile>) -> AppResult<Vec<File>> {
    list.into_iter().map(WireFile::into_file).collect()
}

/// `GET /workspace/structure`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireStructure {
    #[serde(default)]
    pub root_folder: Option<WireFolder>,
    #[serde(default)]
    pub root: Option<WireFolder>,
    #[serde(default)]
    pub folders: Vec<WireFolder>,
}

impl WireStructure {
    pub fn into_workspace(self) -> AppResult<Workspace> {
        let root = self.root_folder.or(self.root).ok_or_else(|| {
            AppError::new(
                ErrorKind::Serialization,
                "The workspace structure has no root folder",
            )
        })?;
        Ok(Workspace {
            root_folder: root.into_folder()?,
            folders: folders(self.folders)?,
        })
    }
}

/// `GET /workspace/folders/{id}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireFolderContents {
    pub folder: WireFolder,
    #[serde(default)]
    pub folders: Vec<WireFolder>,
    #[serde(default, rename = "subfolders")]
    pub subfolders_lower: Vec<WireFolder>,
    #[serde(default)]
    pub sub_folders: Vec<WireFolder>,
    #[serde(default)]
    pub files: Vec<WireFile>,
}

impl WireFolderContents {
    pub fn into_contents(self) -> AppResult<FolderContents> {
        let mut children = self.folders;
        children.extend(self.subfolders_lower);
        children.extend(self.sub_folders);
        Ok(FolderContents {
            folder: self.folder.into_folder()?,
            folders: folders(children)?,
            files: files(self.files)?,
        })
    }
}

/// `GET /workspace/search`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireSearch {
    #[serde(default)]
    pub folders: Vec<WireFolder>,
    #[serde(default)]
    pub files: Vec<WireFile>,
}

impl WireSearch {
    pub fn into_results(self, query: &str) -> AppResult<SearchResults> {
        Ok(SearchResults {
            query: query.to_string(),
            folders: folders(self.folders)?,
            files: files(self.files)?,
        })
    }
}

/// `GET /workspace/recent` answers either with a bare list or `{files}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireRecent {
    List(Vec<WireFile>),
    Wrapped {
        #[serde(default)]
        files: Vec<WireFile>,
    },
}

impl WireRecent {
    pub fn into_files(self) -> AppResult<Vec<File>> {
        match self {
            Self::List(list) | Self::Wrapped { files: list } => files(list),
        }
    }
}

/// `GET /workspace/stats`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireStats {
    #[serde(default)]
    pub total_files: u64,
    #[serde(default)]
    pub total_folders: u64,
    #[serde(default)]
    pub total_size: Option<WireSize>,
    #[serde(default)]
    pub total_size_bytes: Option<WireSize>,
    #[serde(default)]
    pub total_size_formatted: Option<String>,
    /// Keyed by MIME type or by category name.
    #[serde(default)]
    pub files_by_type: BTreeMap<String, u64>,
    #[serde(default)]
    pub files_by_category: BTreeMap<String, u64>,
}

fn category_from_key(key: &str) -> FileCategory {
    if key.contains('/') {
        return category_for_mime(key);
    }
    match key.trim().to_ascii_lowercase().as_str() {
        "image" | "images" => FileCategory::Image,
        "video" | "videos" => FileCategory::Video,
        "audio" => FileCategory::Audio,
        "pdf" | "pdfs" => FileCategory::Pdf,
        "document" | "documents" => FileCategory::Document,
        "spreadsheet" | "spreadsheets" => FileCategory::Spreadsheet,
        "presentation" | "presentations" => FileCategory::Presentation,
        "archive" | "archives" => FileCategory::Archive,
        "text" => FileCategory::Text,
        _ => FileCategory::Other,
    }
}

impl WireStats {
    pub fn into_stats(self) -> WorkspaceStats {
        // Servers sending both maps send the same counts twice.
        let by_key = if self.files_by_type.is_empty() {
            &self.files_by_category
        } else {
            &self.files_by_type
        };
        let mut counts: BTreeMap<&'static str, CategoryCount> = BTreeMap::new();
        for (key, count) in by_key {
            let category = category_from_key(key);
            counts
                .entry(category.as_str())
                .or_insert(CategoryCount { category, count: 0 })
                .count += count;
        }

        WorkspaceStats {
            total_files: self.total_files,
            total_folders: self.total_folders,
            total_size_bytes: self
                .total_size
                .as_ref()
                .or(self.total_size_bytes.as_ref())
                .map(WireSize::bytes)
                .unwrap_or(0),
            total_size_formatted: non_blank(self.total_size_formatted),
            files_by_category: counts.into_values().collect(),
        }
    }
}
