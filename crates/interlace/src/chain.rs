//! Interception Chain
//!
//! The per-call list of invocation units, executed by repeatedly advancing
//! the cursor held in the [`InvocationContext`].
//!
//! ## Execution
//!
//! `proceed()` on a context at position `i`:
//! - runs unit `i` with the cursor advanced to `i + 1`
//! - restores the cursor to `i` once the unit returns
//! - at the end of the list, invokes the target operation (around roles) or
//!   returns `Value::Null` (lifecycle roles)
//!
//! Restoring the cursor is what makes re-entrance well defined: an
//! interceptor that calls `proceed()` twice runs the rest of the chain twice,
//! and one that never calls it cuts the chain short.
//!
//! Units whose method takes no context (lifecycle callbacks declared on the
//! target class) cannot call `proceed()` themselves, so the chain continues
//! past them automatically.

use std::sync::Arc;
use tracing::trace;

use crate::class::ClassRegistry;
use crate::context::InvocationContext;
use crate::error::InvocationError;
use crate::metadata::InterceptorMethod;
use crate::role::InterceptionRole;
use crate::signature::MethodRef;
use crate::types::Value;

/// How an instance method is being called
#[derive(Debug)]
pub enum MethodCall<'c, 'a> {
    /// Interceptor method receiving the invocation context
    Intercept(&'c mut InvocationContext<'a>),
    /// Zero-argument lifecycle callback on the target
    Callback,
    /// The real business operation with its arguments
    Business(&'c [Value]),
}

/// An object the chain can dispatch into
///
/// Implemented by interceptor instances and by targets. This is the seam a
/// proxy generator (or hand-written wrapper) fills in: map a [`MethodRef`]
/// to the actual method body.
pub trait Invocable: Send + Sync {
    /// Runtime class name of this instance
    fn class_name(&self) -> &str;

    /// Run `method` on this instance
    ///
    /// Return `InvocationError::NoSuchMethod` for methods the instance does
    /// not implement.
    fn invoke(&self, method: &MethodRef, call: MethodCall<'_, '_>) -> Result<Value, InvocationError>;
}

/// One (instance, method) position in the chain
#[derive(Clone)]
pub struct InvocationUnit {
    instance: Arc<dyn Invocable>,
    method: InterceptorMethod,
}

impl InvocationUnit {
    /// Create a unit dispatching `method` on `instance`
    pub fn new(instance: Arc<dyn Invocable>, method: InterceptorMethod) -> Self {
        Self { instance, method }
    }

    /// Method this unit runs
    pub fn method(&self) -> &MethodRef {
        &self.method.method
    }

    fn invoke(&self, call: MethodCall<'_, '_>) -> Result<Value, InvocationError> {
        trace!(method = %self.method.method, "invoking interceptor method");
        self.instance
            .invoke(&self.method.method, call)
            .map_err(|err| wrap_dispatch_failure(&self.method.method, err))
    }
}

impl std::fmt::Debug for InvocationUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvocationUnit")
            .field("instance", &self.instance.class_name())
            .field("method", &self.method)
            .finish()
    }
}

/// Dispatch failures surface as faults; everything else passes through
fn wrap_dispatch_failure(method: &MethodRef, err: InvocationError) -> InvocationError {
    match err {
        InvocationError::NoSuchMethod { .. } => InvocationError::fault(method.to_string(), err),
        other => other,
    }
}

/// Fixed list of units for one invocation, plus the target operation
pub struct InterceptionChain {
    role: InterceptionRole,
    units: Vec<InvocationUnit>,
    target: Arc<dyn Invocable>,
    method: Option<MethodRef>,
    registry: Arc<ClassRegistry>,
}

impl InterceptionChain {
    /// Create a chain for `role` ending in `method` on `target`
    ///
    /// `method` is `None` for lifecycle roles.
    pub fn new(
        role: InterceptionRole,
        units: Vec<InvocationUnit>,
        target: Arc<dyn Invocable>,
        method: Option<MethodRef>,
        registry: Arc<ClassRegistry>,
    ) -> Self {
        Self {
            role,
            units,
            target,
            method,
            registry,
        }
    }

    /// Role being executed
    pub fn role(&self) -> InterceptionRole {
        self.role
    }

    /// Target instance
    pub fn target(&self) -> &Arc<dyn Invocable> {
        &self.target
    }

    /// Intercepted method, `None` for lifecycle chains
    pub fn method(&self) -> Option<&MethodRef> {
        self.method.as_ref()
    }

    /// Class registry used for parameter checks
    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    /// Units in execution order
    pub fn units(&self) -> &[InvocationUnit] {
        &self.units
    }

    /// Number of units
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if the chain has no units
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Run the unit at the context's cursor, or the target once exhausted
    ///
    /// Called by [`InvocationContext::proceed`], which owns cursor
    /// save/restore.
    pub(crate) fn invoke_next(
        &self,
        ctx: &mut InvocationContext<'_>,
    ) -> Result<Value, InvocationError> {
        let Some(unit) = self.units.get(ctx.position()) else {
            return self.invoke_target(ctx);
        };
        ctx.advance();
        if unit.method.expects_context {
            unit.invoke(MethodCall::Intercept(ctx))
        } else {
            unit.invoke(MethodCall::Callback)?;
            self.invoke_next(ctx)
        }
    }

    fn invoke_target(&self, ctx: &InvocationContext<'_>) -> Result<Value, InvocationError> {
        match (&self.method, self.role.is_around()) {
            (Some(method), true) => {
                trace!(method = %method, "invoking target method");
                let params = ctx.current_parameters();
                self.target
                    .invoke(method, MethodCall::Business(params))
                    .map_err(|err| wrap_dispatch_failure(method, err))
            }
            _ => Ok(Value::Null),
        }
    }
}

impl std::fmt::Debug for InterceptionChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptionChain")
            .field("role", &self.role)
            .field("units", &self.units)
            .field("target", &self.target.class_name())
            .field("method", &self.method)
            .finish()
    }
}
