//! Supabase Storage backend.

use crate::{ObjectStorage, StoredObject, validate_key};
use folio_error::{ConfigError, FolioResult, StorageError, StorageErrorKind};
use tracing::instrument;

/// Client for the Supabase Storage REST API.
///
/// Uploads go to `POST {project_url}/storage/v1/object/{bucket}/{key}` with
/// `x-upsert: false`; objects in public buckets are served from
/// `{project_url}/storage/v1/object/public/{bucket}/{key}`.
#[derive(Debug, Clone)]
pub struct SupabaseStorage {
    project_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl SupabaseStorage {
    /// Create a client for the given project.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if either value is empty.
    pub fn new(project_url: impl Into<String>, api_key: impl Into<String>) -> FolioResult<Self> {
        Self::with_client(project_url, api_key, reqwest::Client::new())
    }

    /// Create a client that reuses an existing connection pool.
    #[instrument(skip_all)]
    pub fn with_client(
        project_url: impl Into<String>,
        api_key: impl Into<String>,
        client: reqwest::Client,
    ) -> FolioResult<Self> {
        let project_url = project_url.into().trim_end_matches('/').to_string();
        let api_key = api_key.into();

        if project_url.is_empty() {
            return Err(ConfigError::new("Supabase project URL is empty").into());
        }
        if api_key.is_empty() {
            return Err(ConfigError::new("Supabase API key is empty").into());
        }

        tracing::debug!(project_url = %project_url, "Creating Supabase storage client");
        Ok(Self {
            project_url,
            api_key,
            client,
        })
    }
}

#[async_trait::async_trait]
impl ObjectStorage for SupabaseStorage {
    #[instrument(skip(self, data), fields(size = data.len()))]
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> FolioResult<StoredObject> {
        validate_key(bucket)?;
        validate_key(key)?;

        let url = format!("{}/storage/v1/object/{}/{}", self.project_url, bucket, key);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(data.to_vec())
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Upload request failed: {}", e);
                StorageError::new(StorageErrorKind::Unavailable(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %message, "Supabase rejected upload");
            let kind = if status == reqwest::StatusCode::CONFLICT {
                StorageErrorKind::AlreadyExists(format!("{}/{}", bucket, key))
            } else {
                StorageErrorKind::Rejected {
                    status: status.as_u16(),
                    message,
                }
            };
            return Err(StorageError::new(kind).into());
        }

        tracing::debug!("Upload accepted");
        Ok(StoredObject::new(
            bucket,
            key,
            data.len() as u64,
            content_type,
            self.backend_name(),
        ))
    }

    fn public_url(&self, bucket: &str, key: &str) -> FolioResult<String> {
        validate_key(bucket)?;
        validate_key(key)?;
        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            self.project_url, bucket, key
        ))
    }

    fn backend_name(&self) -> &'static str {
        "supabase"
    }
}
