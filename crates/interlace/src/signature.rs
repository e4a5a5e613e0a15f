//! Method signature keys
//!
//! A [`MethodSignature`] identifies a method by name and exact parameter
//! type list. It is the binding key of the interception model; the declaring
//! class is deliberately not part of equality.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::types::TypeDesc;

/// Name plus ordered parameter types of a method
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSignature {
    name: String,
    #[serde(default)]
    parameter_types: Vec<TypeDesc>,
}

impl MethodSignature {
    /// Create a signature from a name and parameter types
    pub fn new(name: &str, parameter_types: Vec<TypeDesc>) -> Self {
        Self {
            name: name.to_string(),
            parameter_types,
        }
    }

    /// Signature of a method taking no parameters
    pub fn nullary(name: &str) -> Self {
        Self::new(name, Vec::new())
    }

    /// Parse parameter descriptors (`"int"`, `"String[]"`, ...)
    ///
    /// Returns `None` if any descriptor is malformed.
    pub fn parse(name: &str, parameter_types: &[&str]) -> Option<Self> {
        let parameter_types = parameter_types
            .iter()
            .map(|ty| TypeDesc::parse(ty))
            .collect::<Option<Vec<_>>>()?;
        Some(Self::new(name, parameter_types))
    }

    /// Method name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter types in declaration order
    pub fn parameter_types(&self) -> &[TypeDesc] {
        &self.parameter_types
    }

    /// Number of parameters
    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, ty) in self.parameter_types.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", ty)?;
        }
        write!(f, ")")
    }
}

/// A signature resolved against the class that declares it
///
/// Used for dispatching into instances; two methods with the same signature
/// on different classes are distinct references.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodRef {
    /// Declaring class name
    pub declaring_class: Arc<str>,
    /// Method signature
    pub signature: MethodSignature,
}

impl MethodRef {
    /// Create a reference to `signature` declared on `declaring_class`
    pub fn new(declaring_class: &str, signature: MethodSignature) -> Self {
        Self {
            declaring_class: Arc::from(declaring_class),
            signature,
        }
    }

    /// Method name
    pub fn name(&self) -> &str {
        self.signature.name()
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.declaring_class, self.signature)
    }
}
