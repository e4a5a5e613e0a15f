//! Class metadata for interception
//!
//! Describes classes the way the interception engine needs to see them:
//! name, superclass link, implemented interfaces, and declared methods with
//! their role markers. Descriptors are plain serializable data, so they can
//! be produced by hand, by a code generator, or loaded from JSON.
//!
//! The [`ClassRegistry`] also answers the assignability questions used by
//! parameter replacement.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::role::InterceptionRole;
use crate::signature::{MethodRef, MethodSignature};
use crate::types::{PrimitiveKind, TypeDesc, NUMBER_CLASS, OBJECT_CLASS, STRING_CLASS};

/// Metadata for one declared method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Method name and parameter types
    #[serde(flatten)]
    pub signature: MethodSignature,
    /// Return type
    #[serde(default = "void_type")]
    pub return_type: TypeDesc,
    /// Interception roles this method is marked with
    #[serde(default)]
    pub roles: Vec<InterceptionRole>,
    /// Private methods are never overridden
    #[serde(default)]
    pub private: bool,
    /// Marked as a timer callback (dispatched as `AroundTimeout`)
    #[serde(default)]
    pub timeout: bool,
}

fn void_type() -> TypeDesc {
    TypeDesc::Void
}

impl MethodDescriptor {
    /// A public method with no role markers
    pub fn new(signature: MethodSignature, return_type: TypeDesc) -> Self {
        Self {
            signature,
            return_type,
            roles: Vec::new(),
            private: false,
            timeout: false,
        }
    }

    /// Add a role marker
    pub fn with_role(mut self, role: InterceptionRole) -> Self {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    /// Mark as private
    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }

    /// Mark as a timer callback
    pub fn timeout(mut self) -> Self {
        self.timeout = true;
        self
    }

    /// Whether the method carries the marker for `role`
    pub fn supports(&self, role: InterceptionRole) -> bool {
        self.roles.contains(&role)
    }
}

/// Metadata for one class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    /// Class name
    pub name: String,
    /// Superclass name; `None` means the universal root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    /// Implemented interfaces
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// Methods declared directly on this class
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

impl ClassDescriptor {
    /// Create a class with no superclass and no methods
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            superclass: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Set the superclass
    pub fn extends(mut self, superclass: &str) -> Self {
        self.superclass = Some(superclass.to_string());
        self
    }

    /// Add an implemented interface
    pub fn implements(mut self, interface: &str) -> Self {
        self.interfaces.push(interface.to_string());
        self
    }

    /// Add a declared method
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Find a declared method by signature
    pub fn declared_method(&self, signature: &MethodSignature) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| &m.signature == signature)
    }
}

/// Registry of class descriptors keyed by name
///
/// Pre-populated with the built-in classes (`Object`, `String`, `Number`,
/// the primitive wrappers, and `InvocationContext`).
#[derive(Debug, Clone)]
pub struct ClassRegistry {
    classes: FxHashMap<String, ClassDescriptor>,
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassRegistry {
    /// Create a registry holding only the built-in classes
    pub fn new() -> Self {
        let mut registry = Self {
            classes: FxHashMap::default(),
        };
        registry.register(ClassDescriptor::new(OBJECT_CLASS));
        registry.register(ClassDescriptor::new(STRING_CLASS));
        registry.register(ClassDescriptor::new(NUMBER_CLASS));
        registry.register(ClassDescriptor::new(crate::types::INVOCATION_CONTEXT_CLASS));
        for kind in [
            PrimitiveKind::Byte,
            PrimitiveKind::Short,
            PrimitiveKind::Int,
            PrimitiveKind::Long,
            PrimitiveKind::Float,
            PrimitiveKind::Double,
        ] {
            registry.register(ClassDescriptor::new(kind.wrapper_class()).extends(NUMBER_CLASS));
        }
        registry.register(ClassDescriptor::new(PrimitiveKind::Boolean.wrapper_class()));
        registry.register(ClassDescriptor::new(PrimitiveKind::Char.wrapper_class()));
        registry
    }

    /// Load descriptors from a JSON array and register them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let classes: Vec<ClassDescriptor> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for class in classes {
            registry.register(class);
        }
        Ok(registry)
    }

    /// Load descriptors from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Register (or replace) a class descriptor
    pub fn register(&mut self, class: ClassDescriptor) {
        self.classes.insert(class.name.clone(), class);
    }

    /// Get a class by name
    pub fn get(&self, name: &str) -> Option<&ClassDescriptor> {
        self.classes.get(name)
    }

    /// Get a class by name, failing with `UnknownClass`
    pub fn require(&self, name: &str) -> Result<&ClassDescriptor, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::UnknownClass(name.to_string()))
    }

    /// Check if a class is registered
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Number of registered classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// The class chain from `name` up to, but excluding, the root class
    ///
    /// Most-derived class first. Fails if any link is not registered.
    pub fn hierarchy(&self, name: &str) -> Result<Vec<&ClassDescriptor>, ConfigError> {
        let mut chain = Vec::new();
        let mut current = Some(name);
        while let Some(class_name) = current {
            if class_name == OBJECT_CLASS {
                break;
            }
            if chain.iter().any(|c: &&ClassDescriptor| c.name == class_name) {
                return Err(ConfigError::IllegalArgument(format!(
                    "circular superclass chain through {}",
                    class_name
                )));
            }
            let class = self.require(class_name)?;
            chain.push(class);
            current = class.superclass.as_deref();
        }
        Ok(chain)
    }

    /// Resolve a method by signature, searching from `class` upwards
    pub fn find_method(
        &self,
        class: &str,
        signature: &MethodSignature,
    ) -> Result<Option<(MethodRef, &MethodDescriptor)>, ConfigError> {
        for level in self.hierarchy(class)? {
            if let Some(method) = level.declared_method(signature) {
                return Ok(Some((MethodRef::new(&level.name, signature.clone()), method)));
            }
        }
        Ok(None)
    }

    /// Check if class `sub` is `sup` or inherits from it (superclass or interface)
    pub fn is_subclass_of(&self, sub: &str, sup: &str) -> bool {
        if sub == sup || sup == OBJECT_CLASS {
            return true;
        }
        let mut pending = vec![sub];
        let mut visited: Vec<&str> = Vec::new();
        while let Some(name) = pending.pop() {
            if name == sup {
                return true;
            }
            if visited.contains(&name) {
                continue;
            }
            visited.push(name);
            if let Some(class) = self.get(name) {
                if let Some(parent) = class.superclass.as_deref() {
                    pending.push(parent);
                }
                pending.extend(class.interfaces.iter().map(String::as_str));
            }
        }
        false
    }

    /// Reference assignability: can a value of type `from` be stored where
    /// `to` is expected without conversion?
    ///
    /// Primitives are only assignable to themselves; boxing and widening are
    /// handled by the caller.
    pub fn is_assignable(&self, from: &TypeDesc, to: &TypeDesc) -> bool {
        if from == to {
            return true;
        }
        match (from, to) {
            (TypeDesc::Class(sub), TypeDesc::Class(sup)) => self.is_subclass_of(sub, sup),
            // Every array is an Object
            (TypeDesc::Array(_), TypeDesc::Class(sup)) => &**sup == OBJECT_CLASS,
            // Reference arrays are covariant; primitive arrays are invariant
            (TypeDesc::Array(a), TypeDesc::Array(b)) => {
                a.is_reference() && b.is_reference() && self.is_assignable(a, b)
            }
            _ => false,
        }
    }
}
