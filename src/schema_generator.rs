use crate::descriptor::{PrimitiveKind, TypeDescriptor};
use crate::type_resolver::TypeResolver;
use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Schema generator - converts type descriptors to OpenAPI schemas.
///
/// Composite types are registered once under a stable id and referenced from everywhere
/// they are used. One generator serves exactly one document build.
pub struct SchemaGenerator<'a> {
    /// Catalog of composite type definitions
    type_resolver: &'a TypeResolver,
    /// Registered composite schemas, keyed by schema id
    schemas: IndexMap<String, Schema>,
    /// Schema ids whose definition is currently being generated
    building: HashSet<String>,
    /// Qualified name each schema id was first generated from
    origins: HashMap<String, String>,
}

/// OpenAPI Schema definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// The type of the schema (string, integer, object, array, etc.)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Format for primitive types (e.g., "int32", "uuid", "date-time")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Properties for object types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,
    /// Required property names for object types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Items schema for array types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Reference to a registered schema
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Schema {
    fn typed(schema_type: &str, format: Option<&str>) -> Self {
        Self {
            schema_type: Some(schema_type.to_string()),
            format: format.map(str::to_string),
            ..Self::default()
        }
    }

    /// Generic `{type: object}` schema
    pub fn object() -> Self {
        Self::typed("object", None)
    }

    /// `{type: array, items}` schema
    pub fn array(items: Schema) -> Self {
        Self {
            schema_type: Some("array".to_string()),
            items: Some(Box::new(items)),
            ..Self::default()
        }
    }

    /// Reference to the registered schema `schema_id`
    pub fn reference(schema_id: &str) -> Self {
        Self {
            reference: Some(format!("{}{}", SCHEMA_REF_PREFIX, schema_id)),
            ..Self::default()
        }
    }

    /// The schema id this schema refers to, if it is a reference
    pub fn reference_id(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .and_then(|r| r.strip_prefix(SCHEMA_REF_PREFIX))
    }
}

impl<'a> SchemaGenerator<'a> {
    /// Create a new SchemaGenerator backed by a TypeResolver
    pub fn new(type_resolver: &'a TypeResolver) -> Self {
        debug!("Initializing SchemaGenerator with {} composite types", type_resolver.len());
        Self {
            type_resolver,
            schemas: IndexMap::new(),
            building: HashSet::new(),
            origins: HashMap::new(),
        }
    }

    /// Generate a schema for a type.
    ///
    /// Returns `None` when the type carries no value (`Void`, a bare async wrapper or an
    /// untyped result wrapper). Composite types come back as references.
    pub fn generate_schema(&mut self, ty: &TypeDescriptor) -> Option<Schema> {
        let ty = Self::normalize(ty)?;

        let schema = match ty {
            TypeDescriptor::Primitive(kind) => Self::primitive_to_schema(*kind),
            TypeDescriptor::Array(element) => {
                let items = self.generate_schema(element).unwrap_or_else(Schema::object);
                Schema::array(items)
            }
            TypeDescriptor::Enum => Schema::typed("string", None),
            TypeDescriptor::Composite(qualified_name) => self.composite_schema(qualified_name),
            other => {
                debug!("Unsupported type {:?}, using object placeholder", other);
                Schema::object()
            }
        };

        Some(schema)
    }

    /// Generate the schema for an action's return type.
    ///
    /// `None` means the response has no body schema.
    pub fn generate_response_schema(&mut self, return_type: &TypeDescriptor) -> Option<Schema> {
        if Self::normalize(return_type).is_none() {
            debug!("Return type {:?} carries no value", return_type);
            return None;
        }
        self.generate_schema(return_type)
    }

    /// Strip nullable, async and result wrappers. `None` when nothing is left.
    fn normalize(ty: &TypeDescriptor) -> Option<&TypeDescriptor> {
        match ty {
            TypeDescriptor::Optional(inner) => Self::normalize(inner),
            TypeDescriptor::AsyncWrapper(Some(inner)) | TypeDescriptor::ResultWrapper(Some(inner)) => {
                Self::normalize(inner)
            }
            TypeDescriptor::AsyncWrapper(None)
            | TypeDescriptor::ResultWrapper(None)
            | TypeDescriptor::Void => None,
            other => Some(other),
        }
    }

    /// Convert a primitive kind to an OpenAPI schema
    fn primitive_to_schema(kind: PrimitiveKind) -> Schema {
        let (schema_type, format) = match kind {
            PrimitiveKind::String => ("string", None),
            PrimitiveKind::Uuid => ("string", Some("uuid")),
            PrimitiveKind::DateTimeOffset | PrimitiveKind::DateTime => ("string", Some("date-time")),
            PrimitiveKind::DateOnly => ("string", Some("date")),
            PrimitiveKind::TimeOnly => ("string", Some("time")),
            PrimitiveKind::Boolean => ("boolean", None),
            PrimitiveKind::Int8 | PrimitiveKind::Int16 | PrimitiveKind::Int32 => {
                ("integer", Some("int32"))
            }
            PrimitiveKind::Int64 => ("integer", Some("int64")),
            PrimitiveKind::Float => ("number", Some("float")),
            PrimitiveKind::Double => ("number", Some("double")),
            PrimitiveKind::Decimal => ("number", Some("decimal")),
        };

        Schema::typed(schema_type, format)
    }

    /// Register the schema of a composite type (once) and return a reference to it.
    ///
    /// An id that is registered or still being built is referenced without recursing, so
    /// recursion depth is bounded by the number of distinct composite types.
    fn composite_schema(&mut self, qualified_name: &str) -> Schema {
        let schema_id = Self::schema_id(qualified_name);

        if self.schemas.contains_key(&schema_id) || self.building.contains(&schema_id) {
            match self.origins.get(&schema_id) {
                Some(origin) if origin != qualified_name => warn!(
                    "Composite types {} and {} share schema id {}, reusing the schema of {}",
                    origin, qualified_name, schema_id, origin
                ),
                _ => debug!("Schema for {} already exists or is being built", schema_id),
            }
            return Schema::reference(&schema_id);
        }

        let type_resolver = self.type_resolver;
        let Some(definition) = type_resolver.resolve_type(qualified_name) else {
            warn!("Composite type {} has no definition, using object placeholder", qualified_name);
            return Schema::object();
        };

        debug!("Generating composite schema for: {}", schema_id);
        self.building.insert(schema_id.clone());
        self.origins.insert(schema_id.clone(), qualified_name.to_string());

        let mut properties = IndexMap::new();
        let mut required = Vec::new();

        for (name, property) in &definition.properties {
            if !property.readable {
                continue;
            }

            let schema = self
                .generate_schema(&property.ty)
                .unwrap_or_else(Schema::object);
            properties.insert(name.clone(), schema);

            if !property.is_nullable() {
                required.push(name.clone());
            }
        }

        let schema = Schema {
            properties: Some(properties),
            required: if required.is_empty() {
                None
            } else {
                Some(required)
            },
            ..Schema::object()
        };

        self.schemas.insert(schema_id.clone(), schema);
        self.building.remove(&schema_id);

        Schema::reference(&schema_id)
    }

    /// Stable schema id: every character other than alphanumerics and `_` becomes `_`.
    pub fn schema_id(qualified_name: &str) -> String {
        qualified_name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
            .collect()
    }

    /// Get all registered schemas
    pub fn get_schemas(&self) -> &IndexMap<String, Schema> {
        &self.schemas
    }

    /// Consume the generator, handing over the schema registry
    pub fn into_schemas(self) -> IndexMap<String, Schema> {
        self.schemas
    }
}
