//! Action model types consumed by the document builder.
//!
//! An upstream collaborator inspects a web API and hands over one [`ActionDescriptor`] per
//! endpoint, together with a catalog of composite types (see [`crate::type_resolver`]).
//! Everything here is plain owned data: nothing is resolved lazily and nothing refers back
//! to a live type system.
//!
//! All types derive serde so the model can be supplied as a JSON or YAML file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A single controller action (endpoint) of the analyzed API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    /// Controller identifier, substituted for `[controller]` in route templates
    pub controller: String,
    /// Action identifier, substituted for `[action]` in route templates
    pub action: String,
    /// Explicit route template (e.g. `"api/[controller]/{id}"`), if the action has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_template: Option<String>,
    /// Parameters in declaration order
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
    /// Declared return type
    #[serde(default)]
    pub return_type: TypeDescriptor,
    /// HTTP method metadata attached to the action
    #[serde(default)]
    pub verbs: VerbMetadata,
}

/// HTTP method metadata of an action.
///
/// An explicit constraint takes precedence over endpoint-level metadata, even when the
/// constraint lists no methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbMetadata {
    /// Methods from an explicit HTTP-method constraint on the action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Vec<HttpMethod>>,
    /// Methods from endpoint-level metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Vec<HttpMethod>>,
}

/// A parameter of an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Parameter name; unnamed parameters are emitted as `"param"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Declared type
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    /// Binding annotations present on the parameter (empty when unannotated)
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub bindings: BTreeSet<BindingSource>,
    /// Whether the declared type accepts null
    #[serde(default)]
    pub nullable: bool,
}

/// Binding annotation kinds. Absence of any annotation is an empty set, not a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingSource {
    /// Value comes from the request body
    Body,
    /// Value comes from a route segment
    Route,
    /// Value comes from the query string
    Query,
    /// Value comes from a request header
    Header,
}

/// Static type information for a parameter, property or return value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// A scalar with a fixed schema mapping
    Primitive(PrimitiveKind),
    /// A sequence of elements
    Array(Box<TypeDescriptor>),
    /// An enumeration; rendered as a plain string
    Enum,
    /// A structured type, by qualified name; its properties live in the type catalog
    Composite(String),
    /// A nullable wrapper around a value type
    Optional(Box<TypeDescriptor>),
    /// An asynchronous result; `None` for a task that yields no value
    AsyncWrapper(Option<Box<TypeDescriptor>>),
    /// An action-result wrapper; `None` for the untyped form
    ResultWrapper(Option<Box<TypeDescriptor>>),
    /// No value
    #[default]
    Void,
    /// Any kind the model has no structural information for
    Other(String),
}

/// Scalar kinds with a fixed `type`/`format` mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    String,
    Uuid,
    DateTimeOffset,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    Decimal,
    DateTime,
    DateOnly,
    TimeOnly,
}

impl TypeDescriptor {
    /// Shorthand for `Primitive(kind)`
    pub fn primitive(kind: PrimitiveKind) -> Self {
        TypeDescriptor::Primitive(kind)
    }

    /// Shorthand for the string primitive
    pub fn string() -> Self {
        TypeDescriptor::Primitive(PrimitiveKind::String)
    }

    /// Shorthand for a composite reference
    pub fn composite(qualified_name: impl Into<String>) -> Self {
        TypeDescriptor::Composite(qualified_name.into())
    }

    /// Wrap `inner` in an array
    pub fn array(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Array(Box::new(inner))
    }

    /// Wrap `inner` in a nullable wrapper
    pub fn optional(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Optional(Box::new(inner))
    }

    /// Wrap `inner` in an async wrapper
    pub fn async_of(inner: TypeDescriptor) -> Self {
        TypeDescriptor::AsyncWrapper(Some(Box::new(inner)))
    }

    /// Wrap `inner` in a typed result wrapper
    pub fn result_of(inner: TypeDescriptor) -> Self {
        TypeDescriptor::ResultWrapper(Some(Box::new(inner)))
    }

    /// Whether this is the string primitive, possibly behind a nullable wrapper
    pub fn is_string(&self) -> bool {
        match self {
            TypeDescriptor::Primitive(kind) => *kind == PrimitiveKind::String,
            TypeDescriptor::Optional(inner) => inner.is_string(),
            _ => false,
        }
    }

    /// Whether values of this type are passed by reference (objects, sequences, strings).
    ///
    /// Scalars, enums and nullable wrappers around them are value types.
    pub fn is_reference_type(&self) -> bool {
        match self {
            TypeDescriptor::Primitive(kind) => *kind == PrimitiveKind::String,
            TypeDescriptor::Array(_)
            | TypeDescriptor::Composite(_)
            | TypeDescriptor::AsyncWrapper(_)
            | TypeDescriptor::ResultWrapper(_)
            | TypeDescriptor::Other(_) => true,
            TypeDescriptor::Optional(inner) => inner.is_reference_type(),
            TypeDescriptor::Enum | TypeDescriptor::Void => false,
        }
    }
}

impl ParameterDescriptor {
    /// Create an unannotated, non-nullable parameter
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: Some(name.into()),
            ty,
            bindings: BTreeSet::new(),
            nullable: false,
        }
    }

    /// Add a binding annotation
    pub fn with_binding(mut self, source: BindingSource) -> Self {
        self.bindings.insert(source);
        self
    }

    /// Mark the parameter as nullable
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn has_binding(&self, source: BindingSource) -> bool {
        self.bindings.contains(&source)
    }

    /// Whether the parameter accepts null, either by flag or by its declared wrapper type
    pub fn is_nullable(&self) -> bool {
        self.nullable || matches!(self.ty, TypeDescriptor::Optional(_))
    }
}

impl ActionDescriptor {
    /// Create an action with no route template, parameters or verbs, returning nothing
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
            route_template: None,
            parameters: Vec::new(),
            return_type: TypeDescriptor::Void,
            verbs: VerbMetadata::default(),
        }
    }

    pub fn with_route(mut self, template: impl Into<String>) -> Self {
        self.route_template = Some(template.into());
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn returning(mut self, return_type: TypeDescriptor) -> Self {
        self.return_type = return_type;
        self
    }

    /// Attach an explicit HTTP-method constraint
    pub fn with_methods(mut self, methods: Vec<HttpMethod>) -> Self {
        self.verbs.constraint = Some(methods);
        self
    }
}

/// HTTP methods an operation can be registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    /// Upper-case method token
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            "put" => Ok(HttpMethod::Put),
            "delete" => Ok(HttpMethod::Delete),
            "patch" => Ok(HttpMethod::Patch),
            "head" => Ok(HttpMethod::Head),
            "options" => Ok(HttpMethod::Options),
            "trace" => Ok(HttpMethod::Trace),
            _ => Err(format!("unsupported HTTP method: {}", s)),
        }
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        method.as_str().to_string()
    }
}
