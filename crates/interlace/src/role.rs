//! Interception roles
//!
//! The closed set of hook categories an interceptor method can implement.
//! Roles split into two families:
//! - around roles (`AroundInvoke`, `AroundTimeout`), always bound to a
//!   specific target method
//! - lifecycle roles, which fire once per lifecycle event of the target and
//!   never carry a method

use serde::{Deserialize, Serialize};
use std::fmt;

/// A category of interception hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InterceptionRole {
    /// Wraps an ordinary business method call
    AroundInvoke,
    /// Wraps a timer callback method
    AroundTimeout,
    /// Runs after the target has been constructed
    PostConstruct,
    /// Runs before the target is discarded
    PreDestroy,
    /// Runs before the target's state is written out
    PrePassivate,
    /// Runs after the target's state has been read back
    PostActivate,
}

impl InterceptionRole {
    /// All roles in declaration order
    pub const ALL: [InterceptionRole; 6] = [
        InterceptionRole::AroundInvoke,
        InterceptionRole::AroundTimeout,
        InterceptionRole::PostConstruct,
        InterceptionRole::PreDestroy,
        InterceptionRole::PrePassivate,
        InterceptionRole::PostActivate,
    ];

    /// Whether this role is a lifecycle callback (no associated method)
    pub fn is_lifecycle_callback(self) -> bool {
        !self.is_around()
    }

    /// Whether this role wraps a method call
    pub fn is_around(self) -> bool {
        matches!(
            self,
            InterceptionRole::AroundInvoke | InterceptionRole::AroundTimeout
        )
    }

    /// Marker name carried by methods implementing this role
    pub fn marker(self) -> &'static str {
        match self {
            InterceptionRole::AroundInvoke => "AroundInvoke",
            InterceptionRole::AroundTimeout => "AroundTimeout",
            InterceptionRole::PostConstruct => "PostConstruct",
            InterceptionRole::PreDestroy => "PreDestroy",
            InterceptionRole::PrePassivate => "PrePassivate",
            InterceptionRole::PostActivate => "PostActivate",
        }
    }

    /// Look up a role by its marker name
    pub fn from_marker(marker: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.marker() == marker)
    }
}

impl fmt::Display for InterceptionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}
