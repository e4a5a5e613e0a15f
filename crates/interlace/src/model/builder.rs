//! Fluent construction of interception models
//!
//! ```rust,ignore
//! let mut builder = InterceptionModelBuilder::new_for("FootballTeam");
//! builder.intercept_all().with(&[InterceptorId::new("Audit")])?;
//! builder
//!     .intercept_around_invoke(MethodSignature::nullary("getName"))
//!     .with(&[InterceptorId::new("Cache")])?;
//! builder.exclude_global_interceptors(MethodSignature::nullary("getName"));
//! let model = builder.build();
//! ```

use std::sync::Arc;
use tracing::debug;

use super::{InterceptionModel, InterceptorId};
use crate::error::ConfigError;
use crate::role::InterceptionRole;
use crate::signature::MethodSignature;

/// Builder for an [`InterceptionModel`]
#[derive(Debug)]
pub struct InterceptionModelBuilder {
    model: InterceptionModel,
}

impl InterceptionModelBuilder {
    /// Start an empty model for the class `intercepted_entity`
    pub fn new_for(intercepted_entity: &str) -> Self {
        Self {
            model: InterceptionModel::new(intercepted_entity),
        }
    }

    /// Continue building from an existing model
    ///
    /// `model` itself is left untouched; `build` yields a new one.
    pub fn change_builder_for(model: &InterceptionModel) -> Self {
        Self {
            model: model.clone(),
        }
    }

    /// Name of the intercepted class
    pub fn intercepted_entity(&self) -> &str {
        self.model.intercepted_entity()
    }

    /// Bind interceptors globally for every role
    pub fn intercept_all(&mut self) -> MethodInterceptorDescriptor<'_> {
        self.descriptor(None, InterceptionRole::ALL.to_vec())
    }

    /// Bind `AroundInvoke` interceptors to one method
    pub fn intercept_around_invoke(
        &mut self,
        method: MethodSignature,
    ) -> MethodInterceptorDescriptor<'_> {
        self.descriptor(Some(method), vec![InterceptionRole::AroundInvoke])
    }

    /// Bind `AroundTimeout` interceptors to one timer method
    pub fn intercept_around_timeout(
        &mut self,
        method: MethodSignature,
    ) -> MethodInterceptorDescriptor<'_> {
        self.descriptor(Some(method), vec![InterceptionRole::AroundTimeout])
    }

    /// Bind `PostConstruct` interceptors
    pub fn intercept_post_construct(&mut self) -> MethodInterceptorDescriptor<'_> {
        self.descriptor(None, vec![InterceptionRole::PostConstruct])
    }

    /// Bind `PreDestroy` interceptors
    pub fn intercept_pre_destroy(&mut self) -> MethodInterceptorDescriptor<'_> {
        self.descriptor(None, vec![InterceptionRole::PreDestroy])
    }

    /// Bind `PrePassivate` interceptors
    pub fn intercept_pre_passivate(&mut self) -> MethodInterceptorDescriptor<'_> {
        self.descriptor(None, vec![InterceptionRole::PrePassivate])
    }

    /// Bind `PostActivate` interceptors
    pub fn intercept_post_activate(&mut self) -> MethodInterceptorDescriptor<'_> {
        self.descriptor(None, vec![InterceptionRole::PostActivate])
    }

    /// Bind interceptors for an explicit role and optional method
    pub fn intercept(
        &mut self,
        role: InterceptionRole,
        method: Option<MethodSignature>,
    ) -> MethodInterceptorDescriptor<'_> {
        self.descriptor(method, vec![role])
    }

    /// Make `method` skip global interceptors
    pub fn exclude_global_interceptors(&mut self, method: MethodSignature) -> &mut Self {
        self.model.exclude_global_interceptors(method);
        self
    }

    /// Make `method` skip default interceptors
    pub fn exclude_default_interceptors(&mut self, method: MethodSignature) -> &mut Self {
        self.model.exclude_default_interceptors(method);
        self
    }

    /// Make the whole model skip default interceptors
    pub fn exclude_default_interceptors_globally(&mut self) -> &mut Self {
        self.model.exclude_default_interceptors_globally();
        self
    }

    /// Freeze the model
    pub fn build(self) -> Arc<InterceptionModel> {
        debug!(
            target_class = self.model.intercepted_entity(),
            interceptors = self.model.get_all_interceptors().len(),
            "built interception model"
        );
        Arc::new(self.model)
    }

    fn descriptor(
        &mut self,
        method: Option<MethodSignature>,
        roles: Vec<InterceptionRole>,
    ) -> MethodInterceptorDescriptor<'_> {
        MethodInterceptorDescriptor {
            model: &mut self.model,
            method,
            roles,
        }
    }
}

/// Pending binding of one or more roles, completed by [`with`](Self::with)
#[derive(Debug)]
pub struct MethodInterceptorDescriptor<'a> {
    model: &'a mut InterceptionModel,
    method: Option<MethodSignature>,
    roles: Vec<InterceptionRole>,
}

impl MethodInterceptorDescriptor<'_> {
    /// Append `interceptors` for every role of this descriptor
    ///
    /// Nothing is recorded unless every role accepts the batch.
    pub fn with(self, interceptors: &[InterceptorId]) -> Result<(), ConfigError> {
        for &role in &self.roles {
            self.model
                .check_append(role, self.method.as_ref(), interceptors)?;
        }
        for role in self.roles {
            self.model
                .append_interceptors(role, self.method.as_ref(), interceptors)?;
        }
        Ok(())
    }
}
