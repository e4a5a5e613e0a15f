//! Type descriptors and runtime values
//!
//! Interception works over a small nominal type system: primitives, their
//! boxed wrapper classes, named classes, and arrays. Method signatures are
//! keyed on [`TypeDesc`] and call arguments travel as [`Value`]s, each of
//! which knows its own runtime type.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Name of the universal root class
pub const OBJECT_CLASS: &str = "Object";
/// Name of the string class
pub const STRING_CLASS: &str = "String";
/// Name of the common superclass of the numeric wrappers
pub const NUMBER_CLASS: &str = "Number";
/// Name of the invocation context type accepted by interceptor methods
pub const INVOCATION_CONTEXT_CLASS: &str = "InvocationContext";

/// Primitive type kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `boolean`
    Boolean,
    /// `byte` (8-bit signed)
    Byte,
    /// `char` (16-bit code unit)
    Char,
    /// `short` (16-bit signed)
    Short,
    /// `int` (32-bit signed)
    Int,
    /// `long` (64-bit signed)
    Long,
    /// `float` (32-bit IEEE 754)
    Float,
    /// `double` (64-bit IEEE 754)
    Double,
}

impl PrimitiveKind {
    const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Char,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    /// Keyword used in type descriptors
    pub fn type_name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    /// Name of the boxed wrapper class
    pub fn wrapper_class(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Byte => "Byte",
            PrimitiveKind::Char => "Character",
            PrimitiveKind::Short => "Short",
            PrimitiveKind::Int => "Integer",
            PrimitiveKind::Long => "Long",
            PrimitiveKind::Float => "Float",
            PrimitiveKind::Double => "Double",
        }
    }

    /// Reverse of [`wrapper_class`](Self::wrapper_class)
    pub fn from_wrapper_class(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.wrapper_class() == name)
    }

    fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_name() == name)
    }

    /// Primitive widening conversion table
    ///
    /// Returns true if a value of kind `self` may be widened to `target`.
    /// Identity is not a widening.
    pub fn widens_to(self, target: PrimitiveKind) -> bool {
        use PrimitiveKind::*;
        match self {
            Byte => matches!(target, Short | Int | Long | Float | Double),
            Short | Char => matches!(target, Int | Long | Float | Double),
            Int => matches!(target, Long | Float | Double),
            Long => matches!(target, Float | Double),
            Float => matches!(target, Double),
            Boolean | Double => false,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A type descriptor
///
/// Rendered and parsed as plain strings: `void`, `int`, `String`, `Object[]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeDesc {
    /// No value (method return type only)
    Void,
    /// Primitive type
    Primitive(PrimitiveKind),
    /// Named class or interface
    Class(Arc<str>),
    /// Array of the element type
    Array(Box<TypeDesc>),
}

impl TypeDesc {
    /// Descriptor for a named class
    pub fn class(name: &str) -> Self {
        TypeDesc::Class(Arc::from(name))
    }

    /// Descriptor for an array of `element`
    pub fn array(element: TypeDesc) -> Self {
        TypeDesc::Array(Box::new(element))
    }

    /// Descriptor for the universal root class
    pub fn object() -> Self {
        Self::class(OBJECT_CLASS)
    }

    /// Parse a descriptor string
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(element) = text.strip_suffix("[]") {
            return match Self::parse(element)? {
                TypeDesc::Void => None,
                element => Some(Self::array(element)),
            };
        }
        if text.is_empty() || text.contains(char::is_whitespace) {
            return None;
        }
        if text == "void" {
            return Some(TypeDesc::Void);
        }
        Some(match PrimitiveKind::from_type_name(text) {
            Some(kind) => TypeDesc::Primitive(kind),
            None => Self::class(text),
        })
    }

    /// Whether this is a primitive type
    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeDesc::Primitive(_))
    }

    /// Whether values of this type are references (class or array)
    pub fn is_reference(&self) -> bool {
        matches!(self, TypeDesc::Class(_) | TypeDesc::Array(_))
    }

    /// Get the primitive kind if this is a primitive
    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self {
            TypeDesc::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Boxing conversion: primitive → wrapper class, other types unchanged
    pub fn boxed(&self) -> TypeDesc {
        match self {
            TypeDesc::Primitive(kind) => Self::class(kind.wrapper_class()),
            other => other.clone(),
        }
    }

    /// Unboxing conversion: wrapper class → primitive, other types unchanged
    pub fn unboxed(&self) -> TypeDesc {
        match self {
            TypeDesc::Class(name) => match PrimitiveKind::from_wrapper_class(name) {
                Some(kind) => TypeDesc::Primitive(kind),
                None => self.clone(),
            },
            other => other.clone(),
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Void => write!(f, "void"),
            TypeDesc::Primitive(kind) => write!(f, "{}", kind),
            TypeDesc::Class(name) => write!(f, "{}", name),
            TypeDesc::Array(element) => write!(f, "{}[]", element),
        }
    }
}

impl TryFrom<String> for TypeDesc {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TypeDesc::parse(&value).ok_or_else(|| format!("invalid type descriptor '{}'", value))
    }
}

impl From<TypeDesc> for String {
    fn from(value: TypeDesc) -> Self {
        value.to_string()
    }
}

/// A primitive value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// `boolean` value
    Boolean(bool),
    /// `byte` value
    Byte(i8),
    /// `char` value
    Char(u16),
    /// `short` value
    Short(i16),
    /// `int` value
    Int(i32),
    /// `long` value
    Long(i64),
    /// `float` value
    Float(f32),
    /// `double` value
    Double(f64),
}

impl Primitive {
    /// Kind of this primitive
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Boolean(_) => PrimitiveKind::Boolean,
            Primitive::Byte(_) => PrimitiveKind::Byte,
            Primitive::Char(_) => PrimitiveKind::Char,
            Primitive::Short(_) => PrimitiveKind::Short,
            Primitive::Int(_) => PrimitiveKind::Int,
            Primitive::Long(_) => PrimitiveKind::Long,
            Primitive::Float(_) => PrimitiveKind::Float,
            Primitive::Double(_) => PrimitiveKind::Double,
        }
    }

    /// Integral value, widened to i64 (chars as their code unit)
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Primitive::Byte(v) => Some(v as i64),
            Primitive::Char(v) => Some(v as i64),
            Primitive::Short(v) => Some(v as i64),
            Primitive::Int(v) => Some(v as i64),
            Primitive::Long(v) => Some(v),
            _ => None,
        }
    }
}

/// A host object handed across the interception boundary
///
/// Carries its runtime class name so assignability can be checked against
/// the class registry.
#[derive(Clone)]
pub struct ObjectRef {
    class: Arc<str>,
    data: Arc<dyn Any + Send + Sync>,
}

impl ObjectRef {
    /// Wrap `data` as an instance of `class`
    pub fn new<T: Any + Send + Sync>(class: &str, data: T) -> Self {
        Self {
            class: Arc::from(class),
            data: Arc::new(data),
        }
    }

    /// Runtime class name
    pub fn class_name(&self) -> &str {
        &self.class
    }

    /// Borrow the payload as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:p}", self.class, Arc::as_ptr(&self.data))
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class && Arc::ptr_eq(&self.data, &other.data)
    }
}

/// A runtime argument or result value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The null reference (also the result of void methods)
    Null,
    /// An unboxed primitive
    Primitive(Primitive),
    /// A primitive boxed in its wrapper class
    Boxed(Primitive),
    /// A string
    Str(Arc<str>),
    /// An array with its declared element type
    Array {
        /// Element type
        element: TypeDesc,
        /// Elements
        items: Vec<Value>,
    },
    /// A host object
    Object(ObjectRef),
}

impl Value {
    /// Unboxed `int`
    pub fn int(v: i32) -> Self {
        Value::Primitive(Primitive::Int(v))
    }

    /// Unboxed `long`
    pub fn long(v: i64) -> Self {
        Value::Primitive(Primitive::Long(v))
    }

    /// String value
    pub fn str(s: &str) -> Self {
        Value::Str(Arc::from(s))
    }

    /// Host object value
    pub fn object<T: Any + Send + Sync>(class: &str, data: T) -> Self {
        Value::Object(ObjectRef::new(class, data))
    }

    /// Dynamic type of this value, `None` for null
    pub fn runtime_type(&self) -> Option<TypeDesc> {
        match self {
            Value::Null => None,
            Value::Primitive(p) => Some(TypeDesc::Primitive(p.kind())),
            Value::Boxed(p) => Some(TypeDesc::class(p.kind().wrapper_class())),
            Value::Str(_) => Some(TypeDesc::class(STRING_CLASS)),
            Value::Array { element, .. } => Some(TypeDesc::array(element.clone())),
            Value::Object(obj) => Some(TypeDesc::class(obj.class_name())),
        }
    }

    /// Primitive payload, boxed or not
    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            Value::Primitive(p) | Value::Boxed(p) => Some(*p),
            _ => None,
        }
    }

    /// Integral payload widened to i64
    pub fn as_i64(&self) -> Option<i64> {
        self.as_primitive().and_then(|p| p.as_i64())
    }

    /// String payload
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Host object payload
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }
}
