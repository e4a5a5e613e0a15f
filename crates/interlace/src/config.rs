//! Interception configuration
//!
//! Resolved once at startup and handed to the metadata reader and instance
//! handlers. Controls which roles are recognized and how malformed
//! interceptor methods are treated.
//!
//! ```toml
//! supported_roles = ["AroundInvoke", "PostConstruct", "PreDestroy"]
//! strict_signatures = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::role::InterceptionRole;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterceptionConfig {
    /// Roles the engine recognizes; markers for other roles are ignored
    #[serde(default = "default_supported_roles")]
    pub supported_roles: Vec<InterceptionRole>,

    /// Fail metadata construction on malformed interceptor methods.
    /// When false, such methods are logged and skipped.
    #[serde(default = "default_strict_signatures")]
    pub strict_signatures: bool,
}

fn default_supported_roles() -> Vec<InterceptionRole> {
    InterceptionRole::ALL.to_vec()
}

fn default_strict_signatures() -> bool {
    true
}

impl Default for InterceptionConfig {
    fn default() -> Self {
        Self {
            supported_roles: default_supported_roles(),
            strict_signatures: default_strict_signatures(),
        }
    }
}

impl InterceptionConfig {
    /// Parse configuration from a TOML string
    pub fn from_str(toml: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Whether `role` is recognized
    pub fn is_supported(&self, role: InterceptionRole) -> bool {
        self.supported_roles.contains(&role)
    }

    /// Recognized roles in declaration order, without duplicates
    pub fn roles(&self) -> impl Iterator<Item = InterceptionRole> + '_ {
        InterceptionRole::ALL
            .into_iter()
            .filter(|role| self.is_supported(*role))
    }
}
