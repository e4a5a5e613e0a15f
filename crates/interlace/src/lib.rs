//! Interlace: method interception engine
//!
//! This crate lets interceptors wrap calls to target objects, including:
//! - Interception models binding interceptor classes to roles and methods
//! - Metadata reading over a class registry (which methods implement which role)
//! - Re-entrant interception chains with parameter overriding
//! - Lifecycle callbacks (post-construct, pre-destroy, passivation, activation)
//!
//! Generating the forwarding object is left to the host. A forwarding object
//! holds an [`InterceptedInstance`] and routes each call through
//! [`InterceptedInstance::invoke`].

#![warn(missing_docs)]

pub mod chain;
pub mod class;
pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod instantiation;
pub mod metadata;
pub mod model;
pub mod role;
pub mod signature;
pub mod types;

pub use chain::{InterceptionChain, Invocable, InvocationUnit, MethodCall};
pub use class::{ClassDescriptor, ClassRegistry, MethodDescriptor};
pub use config::InterceptionConfig;
pub use context::{
    ContextInput, DefaultInvocationContextFactory, InvocationContext, InvocationContextFactory,
};
pub use error::{BoxError, ConfigError, InvocationError};
pub use handler::InterceptedInstance;
pub use instantiation::{FactoryInstantiator, InterceptorConstructor, InterceptorInstantiator};
pub use metadata::{InterceptorMetadata, InterceptorMethod, MetadataCache};
pub use model::{InterceptionModel, InterceptionModelBuilder, InterceptorId};
pub use role::InterceptionRole;
pub use signature::{MethodRef, MethodSignature};
pub use types::{ObjectRef, Primitive, PrimitiveKind, TypeDesc, Value};
