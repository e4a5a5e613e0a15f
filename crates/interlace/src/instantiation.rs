//! Interceptor instantiation
//!
//! The chain never constructs interceptors itself. An [`InterceptorInstantiator`]
//! produces one instance per interceptor class for every intercepted target.

use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::chain::Invocable;
use crate::error::ConfigError;
use crate::model::InterceptorId;

/// Produces interceptor instances
pub trait InterceptorInstantiator: Send + Sync {
    /// Create a fresh instance of the interceptor class `interceptor`
    fn create_for(&self, interceptor: &InterceptorId) -> Result<Arc<dyn Invocable>, ConfigError>;
}

/// An interceptor constructor
pub type InterceptorConstructor = Arc<dyn Fn() -> Arc<dyn Invocable> + Send + Sync>;

// ============================================================================
// Factory Instantiator (name-based construction)
// ============================================================================

/// Instantiator backed by constructors registered per class name
#[derive(Default)]
pub struct FactoryInstantiator {
    constructors: FxHashMap<String, InterceptorConstructor>,
}

impl FactoryInstantiator {
    /// Create an instantiator with no constructors
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the constructor for `class_name`, replacing any previous one
    pub fn register(
        &mut self,
        class_name: &str,
        constructor: impl Fn() -> Arc<dyn Invocable> + Send + Sync + 'static,
    ) -> &mut Self {
        self.constructors
            .insert(class_name.to_string(), Arc::new(constructor));
        self
    }

    /// Check if a constructor is registered
    pub fn contains(&self, class_name: &str) -> bool {
        self.constructors.contains_key(class_name)
    }

    /// Number of registered constructors
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Check if no constructors are registered
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl InterceptorInstantiator for FactoryInstantiator {
    fn create_for(&self, interceptor: &InterceptorId) -> Result<Arc<dyn Invocable>, ConfigError> {
        let constructor = self
            .constructors
            .get(interceptor.class_name())
            .ok_or_else(|| ConfigError::Instantiation {
                interceptor: interceptor.to_string(),
                reason: "no constructor registered".to_string(),
            })?;
        Ok(constructor())
    }
}

impl std::fmt::Debug for FactoryInstantiator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("FactoryInstantiator")
            .field("constructors", &names)
            .finish()
    }
}
