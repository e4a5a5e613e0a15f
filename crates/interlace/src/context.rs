//! Invocation Context
//!
//! The per-call object handed to every interceptor: exposes the target, the
//! intercepted method, the (overridable) parameters, free-form context data,
//! and `proceed()` to run the rest of the chain.

use rustc_hash::FxHashMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::chain::{InterceptionChain, Invocable};
use crate::class::ClassRegistry;
use crate::error::InvocationError;
use crate::role::InterceptionRole;
use crate::signature::MethodRef;
use crate::types::{TypeDesc, Value};

// ============================================================================
// Context input
// ============================================================================

/// Call data a context is created with
#[derive(Debug, Clone, PartialEq)]
pub enum ContextInput {
    /// Lifecycle callback: no parameters
    None,
    /// Business method arguments
    Parameters(Vec<Value>),
    /// Timer object for a timeout method
    Timer(Value),
}

// ============================================================================
// Invocation context
// ============================================================================

/// Per-invocation state shared by every unit of one chain
pub struct InvocationContext<'a> {
    chain: &'a InterceptionChain,
    position: usize,
    parameters: Option<Vec<Value>>,
    timer: Option<Value>,
    context_data: FxHashMap<String, Value>,
    attachment: Option<Box<dyn Any + Send>>,
}

impl<'a> InvocationContext<'a> {
    /// Create a context positioned at the start of `chain`
    pub fn new(chain: &'a InterceptionChain, input: ContextInput) -> Self {
        let (parameters, timer) = match input {
            ContextInput::None => (None, None),
            ContextInput::Parameters(params) => (Some(params), None),
            ContextInput::Timer(timer) => {
                // A timeout method receives the timer as its argument when it
                // declares one.
                let parameters = chain.method().map(|method| {
                    if method.signature.arity() == 1 {
                        vec![timer.clone()]
                    } else {
                        Vec::new()
                    }
                });
                (parameters, Some(timer))
            }
        };
        Self {
            chain,
            position: 0,
            parameters,
            timer,
            context_data: FxHashMap::default(),
            attachment: None,
        }
    }

    /// Attach factory-specific data
    pub fn with_attachment<T: Any + Send>(mut self, attachment: T) -> Self {
        self.attachment = Some(Box::new(attachment));
        self
    }

    /// Run the next unit of the chain, or the target once the chain is exhausted
    ///
    /// The cursor is restored when the call returns, so calling `proceed()`
    /// again re-runs the remainder of the chain.
    pub fn proceed(&mut self) -> Result<Value, InvocationError> {
        let chain = self.chain;
        let saved = self.position;
        let result = chain.invoke_next(self);
        self.position = saved;
        result
    }

    /// Role being executed
    pub fn role(&self) -> InterceptionRole {
        self.chain.role()
    }

    /// Target instance
    pub fn target(&self) -> &Arc<dyn Invocable> {
        self.chain.target()
    }

    /// Intercepted method, `None` for lifecycle callbacks
    pub fn method(&self) -> Option<&MethodRef> {
        self.chain.method()
    }

    /// Timer object for timeout invocations
    pub fn timer(&self) -> Option<&Value> {
        self.timer.as_ref()
    }

    /// Current parameters
    pub fn parameters(&self) -> Result<&[Value], InvocationError> {
        match &self.parameters {
            Some(params) if self.chain.method().is_some() => Ok(params),
            _ => Err(InvocationError::IllegalState(
                "Illegal invocation to getParameters() during lifecycle invocation".to_string(),
            )),
        }
    }

    /// Replace the parameters passed to the target
    ///
    /// Each value must be assignable to the declared parameter type:
    /// - exact type match
    /// - primitive widening (`int` → `long`)
    /// - boxing followed by reference widening (`int` → `Integer` → `Number`)
    /// - unboxing followed by primitive widening (`Integer` → `int` → `long`)
    /// - reference widening through the class registry
    ///
    /// `null` is accepted for reference parameters only.
    pub fn set_parameters(&mut self, params: Vec<Value>) -> Result<(), InvocationError> {
        let Some(method) = self.chain.method() else {
            return Err(InvocationError::IllegalState(
                "Illegal invocation to setParameters() during lifecycle invocation".to_string(),
            ));
        };
        let expected = method.signature.parameter_types();
        if expected.len() != params.len() {
            return Err(InvocationError::IllegalArgument(format!(
                "Wrong number of parameters: method has {}, attempting to set {}",
                expected.len(),
                params.len()
            )));
        }
        for (index, (value, declared)) in params.iter().zip(expected).enumerate() {
            check_parameter(self.chain.registry(), index, value, declared)?;
        }
        self.parameters = Some(params);
        Ok(())
    }

    /// Data shared between interceptors of this invocation
    pub fn context_data(&self) -> &FxHashMap<String, Value> {
        &self.context_data
    }

    /// Mutable access to the shared data
    pub fn context_data_mut(&mut self) -> &mut FxHashMap<String, Value> {
        &mut self.context_data
    }

    /// Factory-specific attachment, if one of type `T` was set
    pub fn attachment<T: Any>(&self) -> Option<&T> {
        self.attachment.as_ref()?.downcast_ref()
    }

    /// Mutable factory-specific attachment
    pub fn attachment_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.attachment.as_mut()?.downcast_mut()
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn advance(&mut self) {
        self.position += 1;
    }

    /// Parameters to hand to the target; empty for lifecycle calls
    pub(crate) fn current_parameters(&self) -> &[Value] {
        self.parameters.as_deref().unwrap_or(&[])
    }
}

impl fmt::Debug for InvocationContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationContext")
            .field("role", &self.chain.role())
            .field("method", &self.chain.method())
            .field("position", &self.position)
            .field("parameters", &self.parameters)
            .field("context_data", &self.context_data)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Parameter compatibility
// ============================================================================

fn check_parameter(
    registry: &ClassRegistry,
    index: usize,
    value: &Value,
    declared: &TypeDesc,
) -> Result<(), InvocationError> {
    let Some(actual) = value.runtime_type() else {
        if declared.is_primitive() {
            return Err(InvocationError::IllegalArgument(format!(
                "Trying to set a null value on a {}",
                declared
            )));
        }
        return Ok(());
    };
    if is_compatible(registry, &actual, declared) {
        return Ok(());
    }
    Err(InvocationError::IllegalArgument(format!(
        "Incompatible parameter type on position: {}. Parameter type: {}. Expected type: {}",
        index, actual, declared
    )))
}

fn is_compatible(registry: &ClassRegistry, actual: &TypeDesc, declared: &TypeDesc) -> bool {
    if actual == declared {
        return true;
    }
    match (actual, declared) {
        (TypeDesc::Primitive(from), TypeDesc::Primitive(to)) => from.widens_to(*to),
        (TypeDesc::Primitive(_), _) => registry.is_assignable(&actual.boxed(), declared),
        (_, TypeDesc::Primitive(to)) => match actual.unboxed() {
            TypeDesc::Primitive(from) => from == *to || from.widens_to(*to),
            _ => false,
        },
        _ => registry.is_assignable(actual, declared),
    }
}

// ============================================================================
// Context factory
// ============================================================================

/// Creates the context object for each invocation
///
/// Replace the default to hand interceptors a context carrying extra state
/// via [`InvocationContext::with_attachment`].
pub trait InvocationContextFactory: Send + Sync {
    /// Create a context for one run of `chain`
    ///
    /// The target and intercepted method are those of the chain.
    fn new_invocation_context<'a>(
        &self,
        chain: &'a InterceptionChain,
        input: ContextInput,
    ) -> InvocationContext<'a>;
}

/// Factory producing plain contexts
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultInvocationContextFactory;

impl InvocationContextFactory for DefaultInvocationContextFactory {
    fn new_invocation_context<'a>(
        &self,
        chain: &'a InterceptionChain,
        input: ContextInput,
    ) -> InvocationContext<'a> {
        InvocationContext::new(chain, input)
    }
}
