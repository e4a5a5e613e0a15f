//! Metadata reading
//!
//! Walks a class hierarchy from the most-derived class up to (but not
//! including) the root, collecting methods marked with interception roles.
//!
//! Rules:
//! - a method whose signature was already seen lower in the hierarchy is
//!   overridden and skipped, unless it is private
//! - one class level may mark at most one method per role
//! - methods are prepended as the scan climbs, so superclass methods run
//!   before subclass methods

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use super::{InterceptorMetadata, InterceptorMethod};
use crate::class::{ClassRegistry, MethodDescriptor};
use crate::config::InterceptionConfig;
use crate::error::ConfigError;
use crate::model::InterceptorId;
use crate::role::InterceptionRole;
use crate::signature::{MethodRef, MethodSignature};
use crate::types::{TypeDesc, INVOCATION_CONTEXT_CLASS};

/// Read metadata for a standalone interceptor class
pub fn read_interceptor_metadata(
    registry: &ClassRegistry,
    config: &InterceptionConfig,
    class_name: &str,
) -> Result<InterceptorMetadata, ConfigError> {
    let methods = build_interceptor_method_map(registry, config, class_name, false)?;
    Ok(InterceptorMetadata::new(
        InterceptorId::new(class_name),
        false,
        methods,
    ))
}

/// Read self-interception metadata for a target class
pub fn read_target_class_metadata(
    registry: &ClassRegistry,
    config: &InterceptionConfig,
    class_name: &str,
) -> Result<InterceptorMetadata, ConfigError> {
    let methods = build_interceptor_method_map(registry, config, class_name, true)?;
    Ok(InterceptorMetadata::new(
        InterceptorId::new(class_name),
        true,
        methods,
    ))
}

/// Check whether `method` implements `role`
///
/// Returns `Ok(false)` if the method is not marked with the role, `Ok(true)`
/// if it is marked and well-formed, and an error if it is marked but its
/// signature does not fit the role.
pub fn validate_interceptor_method(
    registry: &ClassRegistry,
    role: InterceptionRole,
    class_name: &str,
    method: &MethodDescriptor,
    for_target_class: bool,
) -> Result<bool, ConfigError> {
    if !method.supports(role) {
        return Ok(false);
    }

    let invalid = |reason: &str| ConfigError::InvalidInterceptorMethod {
        class: class_name.to_string(),
        method: method.signature.to_string(),
        role,
        reason: reason.to_string(),
    };
    let params = method.signature.parameter_types();
    let takes_context = params.len() == 1
        && registry.is_assignable(&params[0], &TypeDesc::class(INVOCATION_CONTEXT_CLASS));

    if role.is_lifecycle_callback() {
        if method.return_type != TypeDesc::Void {
            return Err(invalid("does not have a void return type"));
        }
        if for_target_class && !params.is_empty() {
            return Err(invalid("is defined on the target class and does not have 0 arguments"));
        }
        if !for_target_class && params.len() != 1 {
            return Err(invalid("does not have exactly one parameter"));
        }
        if !for_target_class && !takes_context {
            return Err(invalid("its single argument is not an InvocationContext"));
        }
    } else {
        if method.return_type != TypeDesc::object() {
            return Err(invalid("does not return an Object"));
        }
        if params.len() != 1 {
            return Err(invalid("does not have exactly 1 parameter"));
        }
        if !takes_context {
            return Err(invalid("does not have an InvocationContext parameter"));
        }
    }
    Ok(true)
}

fn build_interceptor_method_map(
    registry: &ClassRegistry,
    config: &InterceptionConfig,
    class_name: &str,
    for_target_class: bool,
) -> Result<FxHashMap<InterceptionRole, Vec<InterceptorMethod>>, ConfigError> {
    let mut method_map: FxHashMap<InterceptionRole, Vec<InterceptorMethod>> = FxHashMap::default();
    let mut found_methods: FxHashSet<MethodSignature> = FxHashSet::default();

    for class in registry.hierarchy(class_name)? {
        let mut detected_roles: FxHashSet<InterceptionRole> = FxHashSet::default();

        for method in &class.methods {
            let overridden = found_methods.contains(&method.signature);
            if overridden && !method.private {
                continue;
            }

            for role in config.roles() {
                let eligible = match validate_interceptor_method(
                    registry,
                    role,
                    &class.name,
                    method,
                    for_target_class,
                ) {
                    Ok(eligible) => eligible,
                    Err(err) if !config.strict_signatures => {
                        warn!("{}; method will not be used for interception", err);
                        false
                    }
                    Err(err) => return Err(err),
                };
                if !eligible {
                    continue;
                }

                if !detected_roles.insert(role) {
                    return Err(ConfigError::DuplicateRole {
                        class: class.name.clone(),
                        role,
                    });
                }

                method_map.entry(role).or_default().insert(
                    0,
                    InterceptorMethod {
                        method: MethodRef::new(&class.name, method.signature.clone()),
                        expects_context: !method.signature.parameter_types().is_empty(),
                    },
                );
            }

            found_methods.insert(method.signature.clone());
        }
    }

    debug!(
        class = class_name,
        target_class = for_target_class,
        roles = method_map.len(),
        "read interceptor metadata"
    );
    Ok(method_map)
}
