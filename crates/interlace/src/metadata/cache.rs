//! Shared metadata cache
//!
//! Metadata is derived once per class and then only read, so the cache
//! hands out `Arc`s and takes the write lock only on a miss.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::{read_interceptor_metadata, read_target_class_metadata, InterceptorMetadata};
use crate::class::ClassRegistry;
use crate::config::InterceptionConfig;
use crate::error::ConfigError;
use crate::model::InterceptorId;

/// Cache key: class name plus whether it is read as a target class
type CacheKey = (String, bool);

/// Caching metadata reader over a class registry
#[derive(Debug)]
pub struct MetadataCache {
    registry: Arc<ClassRegistry>,
    config: Arc<InterceptionConfig>,
    entries: RwLock<FxHashMap<CacheKey, Arc<InterceptorMetadata>>>,
}

impl MetadataCache {
    /// Create a cache reading from `registry` with `config`
    pub fn new(registry: Arc<ClassRegistry>, config: Arc<InterceptionConfig>) -> Self {
        Self {
            registry,
            config,
            entries: RwLock::new(FxHashMap::default()),
        }
    }

    /// Class registry backing this cache
    pub fn registry(&self) -> &Arc<ClassRegistry> {
        &self.registry
    }

    /// Configuration used to read metadata
    pub fn config(&self) -> &Arc<InterceptionConfig> {
        &self.config
    }

    /// Metadata for an interceptor class
    pub fn interceptor_metadata(
        &self,
        interceptor: &InterceptorId,
    ) -> Result<Arc<InterceptorMetadata>, ConfigError> {
        self.get_or_read(interceptor.class_name(), false)
    }

    /// Self-interception metadata for a target class
    pub fn target_class_metadata(
        &self,
        class_name: &str,
    ) -> Result<Arc<InterceptorMetadata>, ConfigError> {
        self.get_or_read(class_name, true)
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn get_or_read(
        &self,
        class_name: &str,
        target_class: bool,
    ) -> Result<Arc<InterceptorMetadata>, ConfigError> {
        let key = (class_name.to_string(), target_class);
        if let Some(metadata) = self.entries.read().get(&key) {
            return Ok(Arc::clone(metadata));
        }

        // Read outside the lock; a racing reader may do the same work, the
        // first insert wins.
        let metadata = if target_class {
            read_target_class_metadata(&self.registry, &self.config, class_name)?
        } else {
            read_interceptor_metadata(&self.registry, &self.config, class_name)?
        };

        let mut entries = self.entries.write();
        Ok(Arc::clone(
            entries.entry(key).or_insert_with(|| Arc::new(metadata)),
        ))
    }
}
