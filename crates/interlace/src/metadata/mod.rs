//! Interceptor Metadata
//!
//! For every interceptor class (and every target class acting as its own
//! interceptor) records which of its methods implement which role, in the
//! order the chain must run them. Built once per class by the
//! [`reader`](self::reader) and shared through the [`MetadataCache`].

mod cache;
mod reader;

pub use cache::MetadataCache;
pub use reader::{read_interceptor_metadata, read_target_class_metadata, validate_interceptor_method};

use rustc_hash::FxHashMap;

use crate::model::InterceptorId;
use crate::role::InterceptionRole;
use crate::signature::MethodRef;

/// One method eligible for a role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptorMethod {
    /// Method to dispatch
    pub method: MethodRef,
    /// Whether the method receives the invocation context.
    /// Lifecycle callbacks declared on the target class take no arguments.
    pub expects_context: bool,
}

/// Role → eligible methods for one class
#[derive(Debug, Clone)]
pub struct InterceptorMetadata {
    reference: InterceptorId,
    target_class: bool,
    methods: FxHashMap<InterceptionRole, Vec<InterceptorMethod>>,
}

impl InterceptorMetadata {
    pub(crate) fn new(
        reference: InterceptorId,
        target_class: bool,
        methods: FxHashMap<InterceptionRole, Vec<InterceptorMethod>>,
    ) -> Self {
        Self {
            reference,
            target_class,
            methods,
        }
    }

    /// The class this metadata describes
    pub fn reference(&self) -> &InterceptorId {
        &self.reference
    }

    /// Whether this describes a target class intercepting itself
    pub fn is_target_class(&self) -> bool {
        self.target_class
    }

    /// Methods for `role`, superclass methods first
    pub fn interceptor_methods(&self, role: InterceptionRole) -> &[InterceptorMethod] {
        self.methods.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any method implements `role`
    pub fn is_eligible_for(&self, role: InterceptionRole) -> bool {
        !self.interceptor_methods(role).is_empty()
    }
}
