//! Interception Model
//!
//! Per-target-type registry of which interceptors apply to which operation.
//!
//! ## Layout
//!
//! - global bindings: role → ordered interceptor ids, applied to every call
//!   of that role
//! - method bindings: role → signature → ordered interceptor ids
//! - exclusion sets: signatures that skip global interceptors, and
//!   (independently) signatures that skip default interceptors
//!
//! ## Resolution
//!
//! Lifecycle roles resolve to the global list. Around roles resolve to the
//! global list (unless the method excludes globals) followed by the method
//! list, so global interceptors always run outside method-specific ones.
//!
//! Models are assembled with [`InterceptionModelBuilder`] and frozen behind
//! an `Arc` once built.

mod builder;

pub use builder::{InterceptionModelBuilder, MethodInterceptorDescriptor};

use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::role::InterceptionRole;
use crate::signature::MethodSignature;

/// Identity of an interceptor class
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterceptorId(Arc<str>);

impl InterceptorId {
    /// Create an id for the interceptor class `class_name`
    pub fn new(class_name: &str) -> Self {
        Self(Arc::from(class_name))
    }

    /// Interceptor class name
    pub fn class_name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InterceptorId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for InterceptorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Interceptor bindings for one intercepted type
#[derive(Debug, Clone, Default)]
pub struct InterceptionModel {
    /// Name of the intercepted class
    intercepted_entity: String,
    /// Type-wide bindings
    global: FxHashMap<InterceptionRole, Vec<InterceptorId>>,
    /// Per-method bindings (around roles only)
    method_bound: FxHashMap<InterceptionRole, FxHashMap<MethodSignature, Vec<InterceptorId>>>,
    /// Methods that skip global interceptors
    methods_ignoring_globals: FxHashSet<MethodSignature>,
    /// Methods that skip default interceptors
    methods_ignoring_defaults: FxHashSet<MethodSignature>,
    /// Whole model skips default interceptors
    exclude_defaults_globally: bool,
    /// Every referenced interceptor, in first-reference order
    all_interceptors: Vec<InterceptorId>,
}

impl InterceptionModel {
    /// Create an empty model for `intercepted_entity`
    pub fn new(intercepted_entity: &str) -> Self {
        Self {
            intercepted_entity: intercepted_entity.to_string(),
            ..Self::default()
        }
    }

    /// Name of the intercepted class
    pub fn intercepted_entity(&self) -> &str {
        &self.intercepted_entity
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Resolve the ordered interceptor list for `role`
    ///
    /// `method` must be `None` for lifecycle roles and `Some` for around
    /// roles.
    pub fn get_interceptors(
        &self,
        role: InterceptionRole,
        method: Option<&MethodSignature>,
    ) -> Result<Vec<InterceptorId>, ConfigError> {
        check_binding_key(role, method)?;

        let Some(method) = method else {
            return Ok(self.global.get(&role).cloned().unwrap_or_default());
        };

        let mut resolved = Vec::new();
        if !self.methods_ignoring_globals.contains(method) {
            if let Some(globals) = self.global.get(&role) {
                resolved.extend(globals.iter().cloned());
            }
        }
        if let Some(bound) = self.method_bound.get(&role).and_then(|m| m.get(method)) {
            resolved.extend(bound.iter().cloned());
        }
        Ok(resolved)
    }

    /// Every interceptor referenced by any binding, de-duplicated, in
    /// first-reference order
    pub fn get_all_interceptors(&self) -> &[InterceptorId] {
        &self.all_interceptors
    }

    /// Whether `method` skips global interceptors
    pub fn is_excluding_global_interceptors(&self, method: &MethodSignature) -> bool {
        self.methods_ignoring_globals.contains(method)
    }

    /// Whether `method` skips default interceptors
    pub fn is_excluding_default_interceptors(&self, method: &MethodSignature) -> bool {
        self.methods_ignoring_defaults.contains(method)
    }

    /// Whether the whole model skips default interceptors
    pub fn is_excluding_default_interceptors_globally(&self) -> bool {
        self.exclude_defaults_globally
    }

    // ========================================================================
    // Mutation (builder only)
    // ========================================================================

    /// Append interceptors to the global list (`method == None`) or to a
    /// method's list
    ///
    /// The whole batch is validated before anything is recorded.
    pub(crate) fn append_interceptors(
        &mut self,
        role: InterceptionRole,
        method: Option<&MethodSignature>,
        interceptors: &[InterceptorId],
    ) -> Result<(), ConfigError> {
        self.check_append(role, method, interceptors)?;

        let list = match method {
            None => self.global.entry(role).or_default(),
            Some(sig) => self
                .method_bound
                .entry(role)
                .or_default()
                .entry(sig.clone())
                .or_default(),
        };
        list.extend(interceptors.iter().cloned());

        for interceptor in interceptors {
            if !self.all_interceptors.contains(interceptor) {
                self.all_interceptors.push(interceptor.clone());
            }
        }
        Ok(())
    }

    /// Validate an append without recording it
    pub(crate) fn check_append(
        &self,
        role: InterceptionRole,
        method: Option<&MethodSignature>,
        interceptors: &[InterceptorId],
    ) -> Result<(), ConfigError> {
        if role.is_lifecycle_callback() && method.is_some() {
            return Err(ConfigError::IllegalArgument(format!(
                "lifecycle role {} cannot be bound to a method",
                role
            )));
        }

        let globals = self.global.get(&role).map(Vec::as_slice).unwrap_or(&[]);
        let existing: &[InterceptorId] = match method {
            None => globals,
            Some(sig) => self
                .method_bound
                .get(&role)
                .and_then(|m| m.get(sig))
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        };

        for (i, interceptor) in interceptors.iter().enumerate() {
            let duplicate = existing.contains(interceptor)
                || (method.is_some() && globals.contains(interceptor))
                || interceptors[..i].contains(interceptor);
            if duplicate {
                return Err(ConfigError::DuplicateBinding {
                    interceptor: interceptor.to_string(),
                    role,
                });
            }
        }
        Ok(())
    }

    pub(crate) fn exclude_global_interceptors(&mut self, method: MethodSignature) {
        self.methods_ignoring_globals.insert(method);
    }

    pub(crate) fn exclude_default_interceptors(&mut self, method: MethodSignature) {
        self.methods_ignoring_defaults.insert(method);
    }

    pub(crate) fn exclude_default_interceptors_globally(&mut self) {
        self.exclude_defaults_globally = true;
    }
}

/// Lifecycle roles never carry a method; around roles always do
pub(crate) fn check_binding_key(
    role: InterceptionRole,
    method: Option<&MethodSignature>,
) -> Result<(), ConfigError> {
    match (role.is_lifecycle_callback(), method) {
        (true, Some(sig)) => Err(ConfigError::IllegalArgument(format!(
            "On a lifecycle callback ({}), the associated method must be absent, got {}",
            role, sig
        ))),
        (false, None) => Err(ConfigError::IllegalArgument(format!(
            "{} interceptors are defined only for a given method",
            role
        ))),
        _ => Ok(()),
    }
}
