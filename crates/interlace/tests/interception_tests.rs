//! Integration tests for interception chains
//!
//! Drives a football team target through method-bound, global, and mixed
//! interceptor bindings and checks the exact order interceptors, lifecycle
//! callbacks and the target run in.

use interlace::{
    ClassDescriptor, ClassRegistry, DefaultInvocationContextFactory, FactoryInstantiator,
    InterceptedInstance, InterceptionConfig, InterceptionModel, InterceptionModelBuilder,
    InterceptionRole, InterceptorId, Invocable, InvocationError, MetadataCache, MethodCall,
    MethodDescriptor, MethodRef, MethodSignature, Primitive, TypeDesc, Value,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const TEAM_NAME: &str = "Ajax Amsterdam";

type Log = Arc<Mutex<Vec<String>>>;

fn record(log: &Log, class: &str, event: &str) {
    log.lock().push(format!("{}_{}", class, event));
}

// ============================================================================
// Fixtures
// ============================================================================

struct FootballTeam {
    name: String,
    log: Log,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct TeamState {
    name: String,
}

struct ValueBearerImpl(i32);

impl Invocable for FootballTeam {
    fn class_name(&self) -> &str {
        "FootballTeam"
    }

    fn invoke(&self, method: &MethodRef, call: MethodCall<'_, '_>) -> Result<Value, InvocationError> {
        match (&*method.declaring_class, method.name(), call) {
            ("Team", "teamPostConstruct", MethodCall::Callback) => {
                record(&self.log, "Team", "postConstruct");
                Ok(Value::Null)
            }
            (_, "afterConstruction", MethodCall::Callback) => {
                record(&self.log, "FootballTeam", "postConstruct");
                Ok(Value::Null)
            }
            (_, "beforePassivating", MethodCall::Callback) => {
                record(&self.log, "FootballTeam", "prePassivating");
                Ok(Value::Null)
            }
            (_, "afterActivating", MethodCall::Callback) => {
                record(&self.log, "FootballTeam", "postActivating");
                Ok(Value::Null)
            }
            (_, "itsMe", MethodCall::Intercept(ctx)) => {
                record(&self.log, "FootballTeam", "aroundInvokeBefore");
                let result = ctx.proceed()?;
                record(&self.log, "FootballTeam", "aroundInvokeAfter");
                Ok(result)
            }
            (_, "getName", MethodCall::Business(_)) => {
                record(&self.log, "FootballTeam", "getName");
                Ok(Value::str(&self.name))
            }
            (_, "doNothing", MethodCall::Business(_)) => Ok(Value::Null),
            (_, "echo", MethodCall::Business(args)) => {
                let text = args[0].as_str().unwrap_or_default();
                text.parse::<i32>()
                    .map(Value::int)
                    .map_err(InvocationError::application)
            }
            (_, "echo2", MethodCall::Business(args)) => {
                let bearer = args[0]
                    .as_object()
                    .and_then(|obj| obj.downcast_ref::<ValueBearerImpl>())
                    .map(|bearer| bearer.0)
                    .unwrap_or_default();
                Ok(Value::int(bearer))
            }
            (_, name, MethodCall::Business(args)) if name.starts_with("echo") => Ok(args[0].clone()),
            _ => Err(InvocationError::NoSuchMethod {
                class: "FootballTeam".to_string(),
                method: method.to_string(),
            }),
        }
    }
}

/// Interceptor logging its around and lifecycle methods
struct LoggingInterceptor {
    class: &'static str,
    log: Log,
}

impl Invocable for LoggingInterceptor {
    fn class_name(&self) -> &str {
        self.class
    }

    fn invoke(&self, method: &MethodRef, call: MethodCall<'_, '_>) -> Result<Value, InvocationError> {
        let MethodCall::Intercept(ctx) = call else {
            return Err(InvocationError::NoSuchMethod {
                class: self.class.to_string(),
                method: method.to_string(),
            });
        };
        match method.name() {
            "aroundInvoke" => {
                record(&self.log, self.class, "aroundInvokeBefore");
                let result = ctx.proceed()?;
                record(&self.log, self.class, "aroundInvokeAfter");
                Ok(result)
            }
            event => {
                record(&self.log, self.class, event);
                ctx.proceed()
            }
        }
    }
}

/// Interceptor replacing the single parameter of (selected) calls
struct ParameterOverriding {
    class: &'static str,
    only: Option<&'static str>,
    replacement: Value,
}

impl Invocable for ParameterOverriding {
    fn class_name(&self) -> &str {
        self.class
    }

    fn invoke(&self, _method: &MethodRef, call: MethodCall<'_, '_>) -> Result<Value, InvocationError> {
        let MethodCall::Intercept(ctx) = call else {
            return Ok(Value::Null);
        };
        let applies = match (self.only, ctx.method()) {
            (Some(only), Some(target)) => target.name() == only,
            _ => true,
        };
        if applies {
            ctx.set_parameters(vec![self.replacement.clone()])?;
        }
        ctx.proceed()
    }
}

fn ctx_param() -> Vec<TypeDesc> {
    vec![TypeDesc::class("InvocationContext")]
}

fn sig(name: &str, params: &[&str]) -> MethodSignature {
    MethodSignature::parse(name, params).unwrap()
}

fn business(name: &str, params: &[&str], returns: &str) -> MethodDescriptor {
    MethodDescriptor::new(sig(name, params), TypeDesc::parse(returns).unwrap())
}

fn around(name: &str) -> MethodDescriptor {
    MethodDescriptor::new(MethodSignature::new(name, ctx_param()), TypeDesc::object())
        .with_role(InterceptionRole::AroundInvoke)
}

fn interceptor_callback(name: &str, role: InterceptionRole) -> MethodDescriptor {
    MethodDescriptor::new(MethodSignature::new(name, ctx_param()), TypeDesc::Void).with_role(role)
}

fn target_callback(name: &str, role: InterceptionRole) -> MethodDescriptor {
    MethodDescriptor::new(MethodSignature::nullary(name), TypeDesc::Void).with_role(role)
}

const OVERRIDING_INTERCEPTORS: [&str; 9] = [
    "ParameterOverridingInterceptor",
    "ParameterOverridingInterceptor2",
    "ParameterOverridingInterceptorWithInteger",
    "ParameterOverridingInterceptorWithLong",
    "ParameterOverridingInterceptorWithLongArray",
    "ParameterOverridingInterceptorWithChar",
    "ParameterOverridingInterceptorWithCharacter",
    "ParameterOverridingInterceptorWithCharacterAndLong",
    "ParameterOverridingInterceptorWithNull",
];

fn football_registry() -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    registry.register(ClassDescriptor::new("ValueBearer"));
    registry.register(ClassDescriptor::new("ValueBearerImpl").implements("ValueBearer"));
    registry.register(
        ClassDescriptor::new("Team").method(target_callback(
            "teamPostConstruct",
            InterceptionRole::PostConstruct,
        )),
    );
    registry.register(
        ClassDescriptor::new("FootballTeam")
            .extends("Team")
            .method(business("getName", &[], "String"))
            .method(business("echo", &["String"], "int"))
            .method(business("echo2", &["ValueBearer"], "int"))
            .method(business("echoInt", &["int"], "int"))
            .method(business("echoLong", &["long"], "long"))
            .method(business("echoLongAsObject", &["Long"], "Long"))
            .method(business("echoObjectArray", &["Object[]"], "Object[]"))
            .method(business("echoStringArray", &["String[]"], "String[]"))
            .method(business("echoChar", &["char"], "char"))
            .method(business("echoBoolean", &["boolean"], "boolean"))
            .method(business("echoCharacter", &["Character"], "Character"))
            .method(business("echoBooleanAsObject", &["Boolean"], "Boolean"))
            .method(business("doNothing", &[], "void"))
            .method(target_callback("beforePassivating", InterceptionRole::PrePassivate))
            .method(target_callback("afterActivating", InterceptionRole::PostActivate))
            .method(around("itsMe"))
            .method(target_callback("afterConstruction", InterceptionRole::PostConstruct)),
    );
    registry.register(
        ClassDescriptor::new("FirstInterceptor")
            .method(around("aroundInvoke"))
            .method(interceptor_callback("postConstruct", InterceptionRole::PostConstruct)),
    );
    registry.register(
        ClassDescriptor::new("SecondInterceptor")
            .method(around("aroundInvoke"))
            .method(interceptor_callback("preDestroy", InterceptionRole::PreDestroy)),
    );
    for name in OVERRIDING_INTERCEPTORS {
        registry.register(ClassDescriptor::new(name).method(around("override")));
    }
    registry
}

struct Harness {
    log: Log,
    cache: MetadataCache,
    instantiator: FactoryInstantiator,
}

impl Harness {
    fn new() -> Self {
        let log = Log::default();
        let mut instantiator = FactoryInstantiator::new();
        for class in ["FirstInterceptor", "SecondInterceptor"] {
            let log = Arc::clone(&log);
            instantiator.register(class, move || {
                Arc::new(LoggingInterceptor {
                    class,
                    log: Arc::clone(&log),
                })
            });
        }
        Self {
            log,
            cache: MetadataCache::new(
                Arc::new(football_registry()),
                Arc::new(InterceptionConfig::default()),
            ),
            instantiator,
        }
    }

    fn overriding(mut self, class: &'static str, only: Option<&'static str>, replacement: Value) -> Self {
        self.instantiator.register(class, move || {
            Arc::new(ParameterOverriding {
                class,
                only,
                replacement: replacement.clone(),
            })
        });
        self
    }

    fn create(&self, model: Arc<InterceptionModel>) -> InterceptedInstance {
        InterceptedInstance::new(
            Arc::new(FootballTeam {
                name: TEAM_NAME.to_string(),
                log: Arc::clone(&self.log),
            }),
            model,
            &self.cache,
            &self.instantiator,
            Arc::new(DefaultInvocationContextFactory),
        )
        .unwrap()
    }

    fn logged(&self) -> Vec<String> {
        self.log.lock().clone()
    }
}

fn id(name: &str) -> InterceptorId {
    InterceptorId::new(name)
}

fn get_name(team: &InterceptedInstance) -> Value {
    team.invoke(&MethodSignature::nullary("getName"), Vec::new())
        .unwrap()
}

fn run_lifecycle_and_get_name(harness: &Harness, model: Arc<InterceptionModel>) {
    let team = harness.create(model);
    team.post_construct().unwrap();
    assert_eq!(get_name(&team), Value::str(TEAM_NAME));
    team.pre_destroy().unwrap();
}

const EXPECTED_LOGGED_VALUES: [&str; 11] = [
    "FirstInterceptor_postConstruct",
    "Team_postConstruct",
    "FootballTeam_postConstruct",
    "FirstInterceptor_aroundInvokeBefore",
    "SecondInterceptor_aroundInvokeBefore",
    "FootballTeam_aroundInvokeBefore",
    "FootballTeam_getName",
    "FootballTeam_aroundInvokeAfter",
    "SecondInterceptor_aroundInvokeAfter",
    "FirstInterceptor_aroundInvokeAfter",
    "SecondInterceptor_preDestroy",
];

// ============================================================================
// Binding scenarios
// ============================================================================

#[test]
fn test_interception_with_method_registered_interceptors() {
    let harness = Harness::new();
    let mut builder = InterceptionModelBuilder::new_for("FootballTeam");
    builder
        .intercept_around_invoke(MethodSignature::nullary("getName"))
        .with(&[id("FirstInterceptor"), id("SecondInterceptor")])
        .unwrap();
    builder.intercept_post_construct().with(&[id("FirstInterceptor")]).unwrap();
    builder.intercept_pre_destroy().with(&[id("SecondInterceptor")]).unwrap();

    run_lifecycle_and_get_name(&harness, builder.build());
    assert_eq!(harness.logged(), EXPECTED_LOGGED_VALUES);
}

#[test]
fn test_interception_with_global_interceptors() {
    let harness = Harness::new();
    let mut builder = InterceptionModelBuilder::new_for("FootballTeam");
    builder
        .intercept_all()
        .with(&[id("FirstInterceptor"), id("SecondInterceptor")])
        .unwrap();

    run_lifecycle_and_get_name(&harness, builder.build());
    assert_eq!(harness.logged(), EXPECTED_LOGGED_VALUES);
}

#[test]
fn test_interception_with_mixed_interceptors() {
    let harness = Harness::new();
    let mut builder = InterceptionModelBuilder::new_for("FootballTeam");
    builder.intercept_all().with(&[id("FirstInterceptor")]).unwrap();
    builder.intercept_pre_destroy().with(&[id("SecondInterceptor")]).unwrap();
    builder
        .intercept_around_invoke(MethodSignature::nullary("getName"))
        .with(&[id("SecondInterceptor")])
        .unwrap();

    run_lifecycle_and_get_name(&harness, builder.build());
    assert_eq!(harness.logged(), EXPECTED_LOGGED_VALUES);
}

#[test]
fn test_interception_with_globals_ignored() {
    let harness = Harness::new();
    let mut builder = InterceptionModelBuilder::new_for("FootballTeam");
    builder.intercept_all().with(&[id("FirstInterceptor")]).unwrap();
    builder.intercept_pre_destroy().with(&[id("SecondInterceptor")]).unwrap();
    builder
        .intercept_around_invoke(MethodSignature::nullary("getName"))
        .with(&[id("SecondInterceptor")])
        .unwrap();
    builder.exclude_global_interceptors(MethodSignature::nullary("getName"));

    run_lifecycle_and_get_name(&harness, builder.build());
    assert_eq!(
        harness.logged(),
        [
            "FirstInterceptor_postConstruct",
            "Team_postConstruct",
            "FootballTeam_postConstruct",
            "SecondInterceptor_aroundInvokeBefore",
            "FootballTeam_aroundInvokeBefore",
            "FootballTeam_getName",
            "FootballTeam_aroundInvokeAfter",
            "SecondInterceptor_aroundInvokeAfter",
            "SecondInterceptor_preDestroy",
        ]
    );
}

#[test]
fn test_interception_with_passivation() {
    let harness = Harness::new();
    let mut builder = InterceptionModelBuilder::new_for("FootballTeam");
    builder
        .intercept_around_invoke(MethodSignature::nullary("getName"))
        .with(&[id("FirstInterceptor"), id("SecondInterceptor")])
        .unwrap();
    builder.intercept_post_construct().with(&[id("FirstInterceptor")]).unwrap();
    builder.intercept_pre_destroy().with(&[id("SecondInterceptor")]).unwrap();
    let team = harness.create(builder.build());

    team.post_construct().unwrap();
    let state = TeamState {
        name: TEAM_NAME.to_string(),
    };
    let raw = team.passivate(&state).unwrap();
    let restored: TeamState = team.activate(&raw).unwrap();
    assert_eq!(restored, state);
    assert_eq!(get_name(&team), Value::str(TEAM_NAME));

    assert_eq!(
        harness.logged(),
        [
            "FirstInterceptor_postConstruct",
            "Team_postConstruct",
            "FootballTeam_postConstruct",
            "FootballTeam_prePassivating",
            "FootballTeam_postActivating",
            "FirstInterceptor_aroundInvokeBefore",
            "SecondInterceptor_aroundInvokeBefore",
            "FootballTeam_aroundInvokeBefore",
            "FootballTeam_getName",
            "FootballTeam_aroundInvokeAfter",
            "SecondInterceptor_aroundInvokeAfter",
            "FirstInterceptor_aroundInvokeAfter",
        ]
    );
}

#[test]
fn test_activation_of_corrupt_state_is_a_fault() {
    let harness = Harness::new();
    let team = harness.create(InterceptionModelBuilder::new_for("FootballTeam").build());
    let err = team.activate::<TeamState>("{not json").unwrap_err();
    assert!(matches!(err, InvocationError::Fault { .. }));
    // PostActivate never ran
    assert!(harness.logged().is_empty());
}

#[test]
fn test_without_interceptors_only_self_interception_runs() {
    let harness = Harness::new();
    run_lifecycle_and_get_name(&harness, InterceptionModelBuilder::new_for("FootballTeam").build());
    assert_eq!(
        harness.logged(),
        [
            "Team_postConstruct",
            "FootballTeam_postConstruct",
            "FootballTeam_aroundInvokeBefore",
            "FootballTeam_getName",
            "FootballTeam_aroundInvokeAfter",
        ]
    );
}

#[test]
fn test_duplicate_binding_rejected() {
    let mut builder = InterceptionModelBuilder::new_for("FootballTeam");
    builder.intercept_all().with(&[id("FirstInterceptor")]).unwrap();
    let err = builder
        .intercept_around_invoke(MethodSignature::nullary("getName"))
        .with(&[id("FirstInterceptor")])
        .unwrap_err();
    assert!(err.to_string().contains("FirstInterceptor"));
}

#[test]
fn test_application_error_surfaces_unchanged() {
    let harness = Harness::new();
    let mut builder = InterceptionModelBuilder::new_for("FootballTeam");
    builder.intercept_all().with(&[id("FirstInterceptor")]).unwrap();
    let team = harness.create(builder.build());

    let err = team
        .invoke(&sig("echo", &["String"]), vec![Value::str("not a number")])
        .unwrap_err();
    let source = err.as_application().unwrap();
    assert!(source.is::<std::num::ParseIntError>());
    // Interceptors saw the call but not its completion
    assert_eq!(
        harness.logged(),
        [
            "FirstInterceptor_aroundInvokeBefore",
            "FootballTeam_aroundInvokeBefore",
        ]
    );
}

// ============================================================================
// Parameter overriding
// ============================================================================

fn overriding_team(
    harness: &Harness,
    method: MethodSignature,
    interceptor: &str,
) -> InterceptedInstance {
    let mut builder = InterceptionModelBuilder::new_for("FootballTeam");
    builder
        .intercept_around_invoke(method)
        .with(&[id(interceptor)])
        .unwrap();
    harness.create(builder.build())
}

fn long_array(items: &[i64]) -> Value {
    Value::Array {
        element: TypeDesc::class("Long"),
        items: items.iter().map(|v| Value::Boxed(Primitive::Long(*v))).collect(),
    }
}

#[test]
fn test_method_parameter_overriding() {
    let harness =
        Harness::new().overriding("ParameterOverridingInterceptor", None, Value::str("42"));
    let method = sig("echo", &["String"]);
    let team = overriding_team(&harness, method.clone(), "ParameterOverridingInterceptor");
    assert_eq!(team.invoke(&method, vec![Value::str("1")]).unwrap(), Value::int(42));
}

#[test]
fn test_method_parameter_overriding_with_primitive() {
    let harness = Harness::new().overriding(
        "ParameterOverridingInterceptorWithInteger",
        None,
        Value::Boxed(Primitive::Int(42)),
    );
    let method = sig("echoInt", &["int"]);
    let team = overriding_team(&harness, method.clone(), "ParameterOverridingInterceptorWithInteger");
    let result = team.invoke(&method, vec![Value::int(1)]).unwrap();
    assert_eq!(result.as_i64(), Some(42));
}

#[test]
fn test_method_parameter_overriding_with_object_fails() {
    let harness = Harness::new().overriding(
        "ParameterOverridingInterceptorWithInteger",
        None,
        Value::Boxed(Primitive::Int(42)),
    );
    let method = sig("echoLongAsObject", &["Long"]);
    let team = overriding_team(&harness, method.clone(), "ParameterOverridingInterceptorWithInteger");
    let err = team
        .invoke(&method, vec![Value::Boxed(Primitive::Long(1))])
        .unwrap_err();
    assert!(err.is_illegal_argument());
}

#[test]
fn test_method_parameter_overriding_with_object_succeeds() {
    let harness = Harness::new().overriding(
        "ParameterOverridingInterceptorWithLong",
        None,
        Value::Boxed(Primitive::Long(42)),
    );
    let method = sig("echoLongAsObject", &["Long"]);
    let team = overriding_team(&harness, method.clone(), "ParameterOverridingInterceptorWithLong");
    assert_eq!(
        team.invoke(&method, vec![Value::Boxed(Primitive::Long(1))]).unwrap(),
        Value::Boxed(Primitive::Long(42))
    );
}

#[test]
fn test_method_parameter_overriding_with_primitive_widening() {
    let harness = Harness::new().overriding(
        "ParameterOverridingInterceptorWithInteger",
        None,
        Value::Boxed(Primitive::Int(42)),
    );
    let method = sig("echoLong", &["long"]);
    let team = overriding_team(&harness, method.clone(), "ParameterOverridingInterceptorWithInteger");
    let result = team.invoke(&method, vec![Value::long(1)]).unwrap();
    assert_eq!(result.as_i64(), Some(42));
}

#[test]
fn test_method_parameter_overriding_with_primitive_narrowing_fails() {
    let harness = Harness::new().overriding(
        "ParameterOverridingInterceptorWithLong",
        None,
        Value::Boxed(Primitive::Long(42)),
    );
    let method = sig("echoInt", &["int"]);
    let team = overriding_team(&harness, method.clone(), "ParameterOverridingInterceptorWithLong");
    assert!(team
        .invoke(&method, vec![Value::int(1)])
        .unwrap_err()
        .is_illegal_argument());
}

#[test]
fn test_method_parameter_overriding_with_array() {
    let harness = Harness::new().overriding(
        "ParameterOverridingInterceptorWithLongArray",
        None,
        long_array(&[42]),
    );
    let method = sig("echoObjectArray", &["Object[]"]);
    let team = overriding_team(&harness, method.clone(), "ParameterOverridingInterceptorWithLongArray");
    let empty = Value::Array {
        element: TypeDesc::object(),
        items: Vec::new(),
    };
    assert_eq!(team.invoke(&method, vec![empty]).unwrap(), long_array(&[42]));
}

#[test]
fn test_method_parameter_overriding_with_array_on_string_fails() {
    let harness = Harness::new().overriding(
        "ParameterOverridingInterceptorWithLongArray",
        None,
        long_array(&[42]),
    );
    let method = sig("echoStringArray", &["String[]"]);
    let team = overriding_team(&harness, method.clone(), "ParameterOverridingInterceptorWithLongArray");
    let empty = Value::Array {
        element: TypeDesc::class("String"),
        items: Vec::new(),
    };
    assert!(team
        .invoke(&method, vec![empty])
        .unwrap_err()
        .is_illegal_argument());
}

#[test]
fn test_method_parameter_overriding_with_subclass() {
    let harness = Harness::new().overriding(
        "ParameterOverridingInterceptor2",
        None,
        Value::object("ValueBearerImpl", ValueBearerImpl(42)),
    );
    let method = sig("echo2", &["ValueBearer"]);
    let team = overriding_team(&harness, method.clone(), "ParameterOverridingInterceptor2");
    team.invoke(&MethodSignature::nullary("doNothing"), Vec::new())
        .unwrap();
    assert_eq!(
        team.invoke(&method, vec![Value::object("ValueBearerImpl", ValueBearerImpl(1))])
            .unwrap(),
        Value::int(42)
    );
}

#[test]
fn test_method_parameter_overriding_with_char() {
    let z = 'z' as u16;
    let harness = Harness::new()
        .overriding(
            "ParameterOverridingInterceptorWithChar",
            Some("echoChar"),
            Value::Primitive(Primitive::Char(z)),
        )
        .overriding(
            "ParameterOverridingInterceptorWithCharacter",
            Some("echoCharacter"),
            Value::Boxed(Primitive::Char(z)),
        );
    let mut builder = InterceptionModelBuilder::new_for("FootballTeam");
    builder
        .intercept_all()
        .with(&[
            id("ParameterOverridingInterceptorWithChar"),
            id("ParameterOverridingInterceptorWithCharacter"),
        ])
        .unwrap();
    let team = harness.create(builder.build());

    let a = 'a' as u16;
    assert_eq!(
        team.invoke(&sig("echoChar", &["char"]), vec![Value::Primitive(Primitive::Char(a))])
            .unwrap(),
        Value::Primitive(Primitive::Char(z))
    );
    assert_eq!(
        team.invoke(&sig("echoCharacter", &["Character"]), vec![Value::Boxed(Primitive::Char(a))])
            .unwrap(),
        Value::Boxed(Primitive::Char(z))
    );
}

#[test]
fn test_method_parameter_overriding_with_character_and_long() {
    let harness = Harness::new().overriding(
        "ParameterOverridingInterceptorWithCharacterAndLong",
        Some("echoLong"),
        Value::Boxed(Primitive::Char('z' as u16)),
    );
    let mut builder = InterceptionModelBuilder::new_for("FootballTeam");
    builder
        .intercept_all()
        .with(&[id("ParameterOverridingInterceptorWithCharacterAndLong")])
        .unwrap();
    let team = harness.create(builder.build());

    let result = team
        .invoke(&sig("echoLong", &["long"]), vec![Value::long('a' as i64)])
        .unwrap();
    assert_eq!(result.as_i64(), Some('z' as i64));
}

#[test]
fn test_method_parameter_overriding_with_boolean() {
    let harness = Harness::new()
        .overriding(
            "ParameterOverridingInterceptorWithChar",
            Some("echoBoolean"),
            Value::Boxed(Primitive::Boolean(false)),
        )
        .overriding(
            "ParameterOverridingInterceptorWithCharacter",
            Some("echoBooleanAsObject"),
            Value::Primitive(Primitive::Boolean(false)),
        );
    let mut builder = InterceptionModelBuilder::new_for("FootballTeam");
    builder
        .intercept_all()
        .with(&[
            id("ParameterOverridingInterceptorWithChar"),
            id("ParameterOverridingInterceptorWithCharacter"),
        ])
        .unwrap();
    let team = harness.create(builder.build());

    let result = team
        .invoke(
            &sig("echoBoolean", &["boolean"]),
            vec![Value::Primitive(Primitive::Boolean(true))],
        )
        .unwrap();
    assert_eq!(result.as_primitive(), Some(Primitive::Boolean(false)));
    let result = team
        .invoke(
            &sig("echoBooleanAsObject", &["Boolean"]),
            vec![Value::Boxed(Primitive::Boolean(true))],
        )
        .unwrap();
    assert_eq!(result.as_primitive(), Some(Primitive::Boolean(false)));
}

#[test]
fn test_method_parameter_overriding_with_null() {
    let harness =
        Harness::new().overriding("ParameterOverridingInterceptorWithNull", None, Value::Null);

    let method = sig("echoLongAsObject", &["Long"]);
    let team = overriding_team(&harness, method.clone(), "ParameterOverridingInterceptorWithNull");
    assert_eq!(
        team.invoke(&method, vec![Value::Boxed(Primitive::Long(1))]).unwrap(),
        Value::Null
    );

    let method = sig("echoInt", &["int"]);
    let team = overriding_team(&harness, method.clone(), "ParameterOverridingInterceptorWithNull");
    let err = team.invoke(&method, vec![Value::int(1)]).unwrap_err();
    assert!(err.is_illegal_argument());
    assert!(err.to_string().contains("null value on a int"));
}
