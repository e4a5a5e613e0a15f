//! Interception errors
//!
//! Two families:
//! - [`ConfigError`]: raised while building models, metadata, or handlers;
//!   always fatal to the build step
//! - [`InvocationError`]: raised while a call travels through a chain

use std::error::Error as StdError;
use thiserror::Error;

use crate::role::InterceptionRole;

/// Boxed error raised by application code (interceptor bodies, targets)
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors raised at configuration time
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The same interceptor was bound twice for one role/method combination
    #[error("Duplicate interceptor class definition when binding {interceptor} on {role}")]
    DuplicateBinding {
        /// Interceptor class name
        interceptor: String,
        /// Role being bound
        role: InterceptionRole,
    },

    /// Malformed role/binding key combination, or similar misuse
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    /// A method marked with a role does not have a valid signature for it
    #[error("Method {method} defined on class {class} is annotated with @{role}, but {reason}")]
    InvalidInterceptorMethod {
        /// Declaring class
        class: String,
        /// Offending method
        method: String,
        /// Role the method is marked with
        role: InterceptionRole,
        /// What is wrong with the signature
        reason: String,
    },

    /// One class declares two methods for the same role
    #[error("Same interception type {role} cannot be specified twice on class {class}")]
    DuplicateRole {
        /// Class declaring the methods
        class: String,
        /// Repeated role
        role: InterceptionRole,
    },

    /// A class name could not be resolved in the class registry
    #[error("Unknown class: {0}")]
    UnknownClass(String),

    /// The instantiator could not produce an interceptor instance
    #[error("Cannot instantiate interceptor {interceptor}: {reason}")]
    Instantiation {
        /// Interceptor class name
        interceptor: String,
        /// Why instantiation failed
        reason: String,
    },

    /// Failed to read a configuration or descriptor file
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Failed to parse JSON class descriptors
    #[error("Failed to parse class descriptors: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while invoking through an interception chain
#[derive(Debug, Error)]
pub enum InvocationError {
    /// Call-site contract violation (bad parameter count or type)
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    /// Operation not valid for this kind of invocation
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// An instance was asked to run a method it does not implement
    #[error("No such method {method} on {class}")]
    NoSuchMethod {
        /// Class of the instance
        class: String,
        /// Requested method
        method: String,
    },

    /// Failure raised by an interceptor body or the target operation
    #[error(transparent)]
    Application(BoxError),

    /// Unexpected failure wrapped at the chain boundary
    #[error("Interceptor fault in {context}: {source}")]
    Fault {
        /// Where the fault occurred
        context: String,
        /// Underlying cause
        #[source]
        source: BoxError,
    },

    /// Configuration error surfaced during a call
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl InvocationError {
    /// Wrap an application error so it propagates through the chain unchanged
    pub fn application<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        InvocationError::Application(error.into())
    }

    /// Wrap an unexpected error as an interceptor fault
    pub fn fault<E>(context: impl Into<String>, error: E) -> Self
    where
        E: Into<BoxError>,
    {
        InvocationError::Fault {
            context: context.into(),
            source: error.into(),
        }
    }

    /// Borrow the application error, if this is one
    pub fn as_application(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            InvocationError::Application(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    /// Whether this is a call-site argument error
    pub fn is_illegal_argument(&self) -> bool {
        matches!(
            self,
            InvocationError::IllegalArgument(_)
                | InvocationError::Config(ConfigError::IllegalArgument(_))
        )
    }
}
