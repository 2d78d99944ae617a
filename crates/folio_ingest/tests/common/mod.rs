//! Shared test doubles.

#![allow(dead_code)]

use folio_error::{FolioResult, StorageError, StorageErrorKind};
use folio_ingest::{ContentFetcher, FetchError, FetchErrorKind, Rendition};
use folio_storage::{ObjectStorage, StoredObject};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Storage that records uploads in memory and tracks concurrency.
#[derive(Default)]
pub struct RecordingStorage {
    pub uploads: Mutex<Vec<StoredObject>>,
    pub bodies: Mutex<Vec<Vec<u8>>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    delay: Duration,
    fail_uploads: bool,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ObjectStorage for RecordingStorage {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> FolioResult<StoredObject> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_uploads {
            return Err(StorageError::new(StorageErrorKind::Rejected {
                status: 500,
                message: "simulated outage".to_string(),
            })
            .into());
        }

        let stored = StoredObject::new(bucket, key, data.len() as u64, content_type, "memory");
        self.uploads.lock().unwrap().push(stored.clone());
        self.bodies.lock().unwrap().push(data.to_vec());
        Ok(stored)
    }

    fn public_url(&self, bucket: &str, key: &str) -> FolioResult<String> {
        Ok(format!("https://storage.test/{}/{}", bucket, key))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// Fetcher that always returns the same rendition.
pub struct StaticFetcher(pub Rendition);

#[async_trait::async_trait]
impl ContentFetcher for StaticFetcher {
    async fn fetch(&self, _source_url: &str) -> Result<Rendition, FetchError> {
        Ok(self.0.clone())
    }
}

/// Fetcher that always fails.
pub struct FailingFetcher;

#[async_trait::async_trait]
impl ContentFetcher for FailingFetcher {
    async fn fetch(&self, _source_url: &str) -> Result<Rendition, FetchError> {
        Err(FetchError::new(FetchErrorKind::Status(502)))
    }
}

/// Fetcher that counts how often it was called.
#[derive(Default)]
pub struct CountingFetcher {
    pub calls: AtomicUsize,
    pub text: String,
}

#[async_trait::async_trait]
impl ContentFetcher for CountingFetcher {
    async fn fetch(&self, _source_url: &str) -> Result<Rendition, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Rendition::reader(self.text.clone()))
    }
}
