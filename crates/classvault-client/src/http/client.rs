//! HTTP implementation of [`TreeClient`] over the workspace REST API.
//!
//! Auth: `Authorization: Bearer {effective credential}`
//! Envelope: `{ success, data, message }`
//! IDs: opaque strings (numeric ids are stringified)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use classvault_core::config::ApiConfig;
use classvault_core::error::{AppError, ErrorKind};
use classvault_core::result::AppResult;
use classvault_core::types::FolderId;
use classvault_entity::file::File;
use classvault_entity::folder::{CreateFolder, Folder, FolderContents};
use classvault_entity::identity::ActingIdentity;
use classvault_entity::workspace::{ItemKind, SearchResults, Workspace, WorkspaceStats};

use super::wire::{
    Envelope, ErrorBody, WireFile, WireFolder, WireFolderContents, WireRecent, WireSearch,
    WireStats, WireStructure,
};
use crate::traits::{TreeClient, UploadRequest};

/// JSON body of `POST /workspace/folders`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateFolderBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_folder_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

/// Tree client talking to the remote workspace service.
#[derive(Debug, Clone)]
pub struct HttpTreeClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTreeClient {
    /// Creates a client from API configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(AppError::configuration("api.base_url must not be empty"));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        info!(base_url = %base_url, "Workspace tree client ready");
        Ok(Self { http, base_url })
    }

    /// Full URL for an API path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// A request carrying the effective credential.
    fn request(&self, method: Method, path: &str, identity: &ActingIdentity) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .bearer_auth(identity.effective_credential())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
    }

    /// Sends a request and unwraps the `{success, data}` envelope.
    ///
    /// Non-2xx statuses and `success: false` become `RemoteRejection` with
    /// the server's message; no response at all becomes `Transport`.
    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> AppResult<Option<T>> {
        debug!(operation, "Sending workspace request");
        let response = builder.send().await.map_err(|e| {
            warn!(operation, error = %e, "Workspace request failed without a response");
            AppError::from(e)
        })?;
        Self::read_envelope(operation, response).await
    }

    async fn read_envelope<T: DeserializeOwned>(
        operation: &'static str,
        response: Response,
    ) -> AppResult<Option<T>> {
        let status = response.status();
        let body = response.text().await.map_err(AppError::from)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::into_message)
                .unwrap_or_else(|| fallback_message(status));
            warn!(operation, status = status.as_u16(), message = %message, "Workspace request rejected");
            return Err(AppError::remote(status.as_u16(), message));
        }

        if body.trim().is_empty() {
            return Ok(None);
        }

        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        if envelope.success == Some(false) {
            let message = envelope
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| format!("The server could not complete '{operation}'"));
            warn!(operation, status = status.as_u16(), message = %message, "Workspace request rejected");
            return Err(AppError::remote(status.as_u16(), message));
        }

        Ok(envelope.data)
    }

    /// Like [`send`](Self::send) but the response must carry `data`.
    async fn send_data<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> AppResult<T> {
        self.send(operation, builder).await?.ok_or_else(|| {
            AppError::new(
                ErrorKind::Serialization,
                format!("Response to '{operation}' carried no data"),
            )
        })
    }
}

/// Message used when an error response has no readable body.
fn fallback_message(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("Request failed: {} {reason}", status.as_u16()),
        None => format!("Request failed with status {}", status.as_u16()),
    }
}

/// Local path of a picked asset URI.
fn asset_path(uri: &str) -> &str {
    uri.strip_prefix("file://").unwrap_or(uri)
}

#[async_trait]
impl TreeClient for HttpTreeClient {
    async fn list_root(&self, identity: &ActingIdentity) -> AppResult<Workspace> {
        let builder = self.request(Method::GET, "/workspace/structure", identity);
        let structure: WireStructure = self.send_data("list_root", builder).await?;
        structure.into_workspace()
    }

    async fn list_folder(
        &self,
        identity: &ActingIdentity,
        folder_id: &FolderId,
    ) -> AppResult<FolderContents> {
        let path = format!("/workspace/folders/{}", urlencoding::encode(folder_id.as_str()));
        let builder = self.request(Method::GET, &path, identity);
        let contents: WireFolderContents = self.send_data("list_folder", builder).await?;
        contents.into_contents()
    }

    async fn upload(&self, identity: &ActingIdentity, request: UploadRequest) -> AppResult<File> {
        let bytes = tokio::fs::read(asset_path(&request.asset.uri)).await?;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(request.display_name.clone())
            .mime_str(&request.mime_type)
            .map_err(|e| {
                AppError::validation(format!("Invalid MIME type '{}': {e}", request.mime_type))
            })?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("description", request.description.clone());
        if let Some(folder_id) = &request.folder_id {
            form = form.text("folderId", folder_id.to_string());
        }

        let builder = self
            .request(Method::POST, "/workspace/files", identity)
            .multipart(form);
        let file: WireFile = self.send_data("upload", builder).await?;
        let file = file.into_file()?;

        info!(
            file_id = %file.id,
            folder_id = ?request.folder_id.as_ref().map(FolderId::as_str),
            name = %file.name,
            "File uploaded"
        );
        Ok(file)
    }

    async fn create_folder(
        &self,
        identity: &ActingIdentity,
        request: CreateFolder,
    ) -> AppResult<Folder> {
        let body = CreateFolderBody {
            name: &request.name,
            parent_folder_id: request.parent_id.as_ref().map(FolderId::as_str),
            description: request.description.as_deref(),
        };
        let builder = self
            .request(Method::POST, "/workspace/folders", identity)
            .json(&body);
        let folder: WireFolder = self.send_data("create_folder", builder).await?;
        let folder = folder.into_folder()?;

        info!(folder_id = %folder.id, name = %folder.name, "Folder created");
        Ok(folder)
    }

    async fn delete_item(
        &self,
        identity: &ActingIdentity,
        item_id: &str,
        kind: ItemKind,
    ) -> AppResult<()> {
        let collection = match kind {
            ItemKind::Folder => "folders",
            ItemKind::File => "files",
        };
        let path = format!("/workspace/{collection}/{}", urlencoding::encode(item_id));
        let builder = self.request(Method::DELETE, &path, identity);
        self.send::<serde_json::Value>("delete_item", builder).await?;

        info!(item_id, kind = %kind, "Item deleted");
        Ok(())
    }

    async fn search(&self, identity: &ActingIdentity, query: &str) -> AppResult<SearchResults> {
        let path = format!("/workspace/search?query={}", urlencoding::encode(query));
        let builder = self.request(Method::GET, &path, identity);
        let results: Option<WireSearch> = self.send("search", builder).await?;
        results.unwrap_or_default().into_results(query)
    }

    async fn list_recent(&self, identity: &ActingIdentity, limit: u32) -> AppResult<Vec<File>> {
        let path = format!("/workspace/recent?limit={limit}");
        let builder = self.request(Method::GET, &path, identity);
        let recent: Option<WireRecent> = self.send("list_recent", builder).await?;
        recent.map_or_else(|| Ok(Vec::new()), WireRecent::into_files)
    }

    async fn get_statistics(&self, identity: &ActingIdentity) -> AppResult<WorkspaceStats> {
        let builder = self.request(Method::GET, "/workspace/stats", identity);
        let stats: Option<WireStats> = self.send("get_statistics", builder).await?;
        Ok(stats.unwrap_or_default().into_stats())
    }
}
