//! Artifact Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::SampleStoragePort;
use crate::application::queries::GetArtifact;
use crate::domain::callout::ArtifactName;

/// 产物响应（文件句柄，由 HTTP 层流式返回）
#[derive(Debug)]
pub struct ArtifactResponse {
    pub name: ArtifactName,
    pub file: tokio::fs::File,
    pub size: u64,
    pub content_type: &'static str,
}

/// GetArtifact Handler
pub struct GetArtifactHandler {
    storage: Arc<dyn SampleStoragePort>,
}

impl GetArtifactHandler {
    pub fn new(storage: Arc<dyn SampleStoragePort>) -> Self {
        Self { storage }
    }

    pub async fn handle(&self, query: GetArtifact) -> Result<ArtifactResponse, ApplicationError> {
        let name = ArtifactName::parse(&query.filename).map_err(|e| {
            tracing::warn!(filename = %query.filename.escape_debug(), "Rejected download filename");
            ApplicationError::from(e)
        })?;

        let (file, size) = self.storage.open_artifact(&name).await?;

        Ok(ArtifactResponse {
            content_type: name.content_type(),
            name,
            file,
            size,
        })
    }
}
