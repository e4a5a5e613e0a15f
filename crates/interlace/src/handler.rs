//! Intercepted instances
//!
//! [`InterceptedInstance`] is the glue a forwarding object (generated proxy
//! or hand-written wrapper) delegates into. It owns one instance of every
//! interceptor the model references, builds a fresh chain for each call, and
//! drives the lifecycle roles.
//!
//! ```rust,ignore
//! let instance = InterceptedInstance::new(
//!     Arc::new(FootballTeam::new("Ajax")),
//!     model,
//!     &cache,
//!     &instantiator,
//!     Arc::new(DefaultInvocationContextFactory),
//! )?;
//! instance.post_construct()?;
//! let name = instance.invoke(&MethodSignature::nullary("getName"), Vec::new())?;
//! ```

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::chain::{InterceptionChain, Invocable, InvocationUnit};
use crate::class::ClassRegistry;
use crate::context::{ContextInput, InvocationContextFactory};
use crate::error::{ConfigError, InvocationError};
use crate::instantiation::InterceptorInstantiator;
use crate::metadata::{InterceptorMetadata, MetadataCache};
use crate::model::{InterceptionModel, InterceptorId};
use crate::role::InterceptionRole;
use crate::signature::{MethodRef, MethodSignature};
use crate::types::Value;

/// A pre-instantiated interceptor and its metadata
struct BoundInterceptor {
    instance: Arc<dyn Invocable>,
    metadata: Arc<InterceptorMetadata>,
}

/// A target wired to its interceptors
pub struct InterceptedInstance {
    target: Arc<dyn Invocable>,
    model: Arc<InterceptionModel>,
    registry: Arc<ClassRegistry>,
    interceptors: FxHashMap<InterceptorId, BoundInterceptor>,
    target_metadata: Arc<InterceptorMetadata>,
    context_factory: Arc<dyn InvocationContextFactory>,
}

impl InterceptedInstance {
    /// Wire `target` to the interceptors of `model`
    ///
    /// Instantiates every interceptor the model references and reads all
    /// metadata up front, so configuration errors surface here rather than
    /// on the first call.
    pub fn new(
        target: Arc<dyn Invocable>,
        model: Arc<InterceptionModel>,
        cache: &MetadataCache,
        instantiator: &dyn InterceptorInstantiator,
        context_factory: Arc<dyn InvocationContextFactory>,
    ) -> Result<Self, ConfigError> {
        let target_class = model.intercepted_entity();
        if target.class_name() != target_class {
            return Err(ConfigError::IllegalArgument(format!(
                "Target instance of {} does not match the model for {}",
                target.class_name(),
                target_class
            )));
        }
        cache.registry().require(target_class)?;
        let target_metadata = cache.target_class_metadata(target_class)?;

        let mut interceptors = FxHashMap::default();
        for id in model.get_all_interceptors() {
            let metadata = cache.interceptor_metadata(id)?;
            let instance = instantiator.create_for(id)?;
            interceptors.insert(id.clone(), BoundInterceptor { instance, metadata });
        }

        debug!(
            target_class,
            interceptors = interceptors.len(),
            "created intercepted instance"
        );
        Ok(Self {
            target,
            registry: Arc::clone(cache.registry()),
            model,
            interceptors,
            target_metadata,
            context_factory,
        })
    }

    /// Target instance
    pub fn target(&self) -> &Arc<dyn Invocable> {
        &self.target
    }

    /// Intercepted class name
    pub fn target_class(&self) -> &str {
        self.model.intercepted_entity()
    }

    /// Interception model in use
    pub fn model(&self) -> &Arc<InterceptionModel> {
        &self.model
    }

    /// The instance created for `interceptor`, if the model references it
    pub fn interceptor_instance(&self, interceptor: &InterceptorId) -> Option<&Arc<dyn Invocable>> {
        self.interceptors.get(interceptor).map(|bound| &bound.instance)
    }

    // ========================================================================
    // Business and timeout methods
    // ========================================================================

    /// Call `method` on the target through its interceptors
    ///
    /// Methods marked as timeout methods run the `AroundTimeout` chain with
    /// the first argument as the timer; all others run `AroundInvoke`. A
    /// timeout method takes at most one argument.
    pub fn invoke(
        &self,
        method: &MethodSignature,
        args: Vec<Value>,
    ) -> Result<Value, InvocationError> {
        let (method_ref, timeout) = self.resolve_method(method)?;
        if args.len() != method.arity() {
            return Err(InvocationError::IllegalArgument(format!(
                "Wrong number of arguments for {}: expected {}, got {}",
                method_ref,
                method.arity(),
                args.len()
            )));
        }
        if timeout && method.arity() > 1 {
            return Err(InvocationError::IllegalArgument(format!(
                "Timeout method {} takes at most one argument, declares {}",
                method_ref,
                method.arity()
            )));
        }

        let (role, input) = if timeout {
            let timer = args.into_iter().next().unwrap_or(Value::Null);
            (InterceptionRole::AroundTimeout, ContextInput::Timer(timer))
        } else {
            (InterceptionRole::AroundInvoke, ContextInput::Parameters(args))
        };
        let units = self.units_for(role, Some(method))?;
        let chain = InterceptionChain::new(
            role,
            units,
            Arc::clone(&self.target),
            Some(method_ref),
            Arc::clone(&self.registry),
        );
        let mut ctx = self.context_factory.new_invocation_context(&chain, input);
        ctx.proceed()
    }

    fn resolve_method(&self, method: &MethodSignature) -> Result<(MethodRef, bool), InvocationError> {
        match self.registry.find_method(self.target_class(), method)? {
            Some((method_ref, descriptor)) => Ok((method_ref, descriptor.timeout)),
            None => Err(InvocationError::NoSuchMethod {
                class: self.target_class().to_string(),
                method: method.to_string(),
            }),
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Run the chain for a lifecycle role
    pub fn lifecycle(&self, role: InterceptionRole) -> Result<(), InvocationError> {
        if !role.is_lifecycle_callback() {
            return Err(InvocationError::IllegalArgument(format!(
                "{} is not a lifecycle callback",
                role
            )));
        }
        let units = self.units_for(role, None)?;
        let chain = InterceptionChain::new(
            role,
            units,
            Arc::clone(&self.target),
            None,
            Arc::clone(&self.registry),
        );
        let mut ctx = self
            .context_factory
            .new_invocation_context(&chain, ContextInput::None);
        ctx.proceed()?;
        Ok(())
    }

    /// Run `PostConstruct` callbacks
    pub fn post_construct(&self) -> Result<(), InvocationError> {
        self.lifecycle(InterceptionRole::PostConstruct)
    }

    /// Run `PreDestroy` callbacks
    pub fn pre_destroy(&self) -> Result<(), InvocationError> {
        self.lifecycle(InterceptionRole::PreDestroy)
    }

    /// Run `PrePassivate` callbacks
    pub fn pre_passivate(&self) -> Result<(), InvocationError> {
        self.lifecycle(InterceptionRole::PrePassivate)
    }

    /// Run `PostActivate` callbacks
    pub fn post_activate(&self) -> Result<(), InvocationError> {
        self.lifecycle(InterceptionRole::PostActivate)
    }

    /// Run `PrePassivate` callbacks, then serialize `state`
    pub fn passivate<S: Serialize>(&self, state: &S) -> Result<String, InvocationError> {
        self.pre_passivate()?;
        serde_json::to_string(state)
            .map_err(|err| InvocationError::fault(format!("passivation of {}", self.target_class()), err))
    }

    /// Deserialize persisted state, then run `PostActivate` callbacks
    pub fn activate<T: DeserializeOwned>(&self, raw: &str) -> Result<T, InvocationError> {
        let state = serde_json::from_str(raw)
            .map_err(|err| InvocationError::fault(format!("activation of {}", self.target_class()), err))?;
        self.post_activate()?;
        Ok(state)
    }

    // ========================================================================
    // Chain assembly
    // ========================================================================

    /// Units for one call: bound interceptors in model order, then the
    /// target's own methods
    fn units_for(
        &self,
        role: InterceptionRole,
        method: Option<&MethodSignature>,
    ) -> Result<Vec<InvocationUnit>, InvocationError> {
        let mut units = Vec::new();
        for id in self.model.get_interceptors(role, method)? {
            let bound = self.interceptors.get(&id).ok_or_else(|| {
                InvocationError::IllegalState(format!("Interceptor {} was not instantiated", id))
            })?;
            units.extend(
                bound
                    .metadata
                    .interceptor_methods(role)
                    .iter()
                    .map(|m| InvocationUnit::new(Arc::clone(&bound.instance), m.clone())),
            );
        }
        units.extend(
            self.target_metadata
                .interceptor_methods(role)
                .iter()
                .map(|m| InvocationUnit::new(Arc::clone(&self.target), m.clone())),
        );
        Ok(units)
    }
}

impl std::fmt::Debug for InterceptedInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptedInstance")
            .field("target", &self.target.class_name())
            .field("interceptors", &self.model.get_all_interceptors())
            .finish_non_exhaustive()
    }
}
