//! In-process stand-ins for the profile service, used by tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use qwikcard_protocol::{CreateProfileRequest, ProfileRecord};

use crate::store::{Profile, ProfileStore, StoreError};

#[derive(Default)]
struct Inner {
    profiles: Mutex<BTreeMap<String, CreateProfileRequest>>,
    next_id: AtomicUsize,
    create_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
    failing_creates: AtomicUsize,
}

/// Profile store keeping everything in memory. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryProfileStore {
    inner: Arc<Inner>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `request` directly, bypassing call accounting.
    pub fn insert(&self, request: CreateProfileRequest) -> String {
        let n = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        let id = format!("mem{n:06}");
        self.inner
            .profiles
            .lock()
            .expect("profiles lock")
            .insert(id.clone(), request);
        id
    }

    /// Make the next `count` create calls answer with HTTP 500.
    pub fn fail_next_creates(&self, count: usize) {
        self.inner.failing_creates.store(count, Ordering::SeqCst);
    }

    pub fn request(&self, profile_id: &str) -> Option<CreateProfileRequest> {
        self.inner
            .profiles
            .lock()
            .expect("profiles lock")
            .get(profile_id)
            .cloned()
    }

    pub fn create_calls(&self) -> usize {
        self.inner.create_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.inner.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn create_profile(&self, request: &CreateProfileRequest) -> Result<String, StoreError> {
        self.inner.create_calls.fetch_add(1, Ordering::SeqCst);
        let failing = self.inner.failing_creates.load(Ordering::SeqCst);
        if failing > 0 {
            self.inner.failing_creates.store(failing - 1, Ordering::SeqCst);
            return Err(StoreError::Status { status: 500 });
        }
        Ok(self.insert(request.clone()))
    }

    async fn fetch_profile(&self, profile_id: &str) -> Result<Profile, StoreError> {
        self.inner.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let request = self
            .request(profile_id)
            .ok_or(StoreError::Status { status: 404 })?;
        let record = ProfileRecord {
            id: Some(profile_id.to_string()),
            name: request.name,
            fields: request.fields,
        };
        Ok(Profile::from_record(profile_id, record))
    }
}
