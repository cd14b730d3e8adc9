use crate::descriptor::TypeDescriptor;
use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Type resolver - looks up composite type definitions by qualified name.
///
/// Composite [`TypeDescriptor`]s only carry a qualified name. Their properties are kept
/// here, which lets a model describe self-referencing and mutually-referencing types
/// without any shared ownership.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeResolver {
    /// Composite definitions keyed by qualified name
    types: IndexMap<String, CompositeType>,
}

/// Composite type definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeType {
    /// Properties in declaration order
    #[serde(default)]
    pub properties: IndexMap<String, PropertyDescriptor>,
}

/// Property definition on a composite type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    /// Declared type of the property
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    /// Whether the declared type accepts null
    #[serde(default)]
    pub nullable: bool,
    /// Whether the property has a public getter
    #[serde(default = "default_readable")]
    pub readable: bool,
}

fn default_readable() -> bool {
    true
}

impl PropertyDescriptor {
    /// A readable, non-nullable property
    pub fn new(ty: TypeDescriptor) -> Self {
        Self {
            ty,
            nullable: false,
            readable: true,
        }
    }

    /// A readable, nullable property
    pub fn nullable(ty: TypeDescriptor) -> Self {
        Self {
            ty,
            nullable: true,
            readable: true,
        }
    }

    /// Whether the property accepts null, either by flag or by its declared wrapper type
    pub fn is_nullable(&self) -> bool {
        self.nullable || matches!(self.ty, TypeDescriptor::Optional(_))
    }
}

impl CompositeType {
    /// Builder-style helper for adding a property
    pub fn with_property(mut self, name: impl Into<String>, property: PropertyDescriptor) -> Self {
        self.properties.insert(name.into(), property);
        self
    }
}

impl TypeResolver {
    /// Create an empty TypeResolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a composite definition. Returns the replaced definition, if any.
    pub fn insert(
        &mut self,
        qualified_name: impl Into<String>,
        definition: CompositeType,
    ) -> Option<CompositeType> {
        let qualified_name = qualified_name.into();
        debug!("Registering composite type: {}", qualified_name);
        self.types.insert(qualified_name, definition)
    }

    /// Builder-style variant of [`TypeResolver::insert`]
    pub fn with_type(mut self, qualified_name: impl Into<String>, definition: CompositeType) -> Self {
        self.insert(qualified_name, definition);
        self
    }

    /// Look up a composite definition by qualified name
    pub fn resolve_type(&self, qualified_name: &str) -> Option<&CompositeType> {
        let resolved = self.types.get(qualified_name);
        if resolved.is_none() {
            warn!("No definition for composite type: {}", qualified_name);
        }
        resolved
    }

    /// Merge another catalog into this one. Later definitions replace earlier ones.
    pub fn extend(&mut self, other: TypeResolver) {
        for (name, definition) in other.types {
            if self.types.insert(name.clone(), definition).is_some() {
                warn!("Composite type {} defined more than once, keeping the last definition", name);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::PrimitiveKind;

    fn user_type() -> CompositeType {
        CompositeType::default()
            .with_property("Id", PropertyDescriptor::new(TypeDescriptor::primitive(PrimitiveKind::Int32)))
            .with_property("Name", PropertyDescriptor::nullable(TypeDescriptor::string()))
    }

    #[test]
    fn test_resolve_registered_type() {
        let resolver = TypeResolver::new().with_type("App.User", user_type());

        let resolved = resolver.resolve_type("App.User").unwrap();
        let names: Vec<_> = resolved.properties.keys().cloned().collect();
        assert_eq!(names, vec!["Id", "Name"]);
    }

    #[test]
    fn test_resolve_unknown_type() {
        let resolver = TypeResolver::new();
        assert!(resolver.resolve_type("App.Missing").is_none());
    }

    #[test]
    fn test_extend_last_definition_wins() {
        let mut first = TypeResolver::new().with_type("App.User", user_type());
        let second = TypeResolver::new().with_type("App.User", CompositeType::default());

        first.extend(second);

        assert_eq!(first.len(), 1);
        assert!(first.resolve_type("App.User").unwrap().properties.is_empty());
    }

    #[test]
    fn test_catalog_json_shape() {
        let resolver: TypeResolver = serde_json::from_str(
            r#"{
                "App.Node": {
                    "properties": {
                        "Next": { "type": { "composite": "App.Node" }, "nullable": true },
                        "Secret": { "type": { "primitive": "string" }, "readable": false }
                    }
                }
            }"#,
        )
        .unwrap();

        let node = resolver.resolve_type("App.Node").unwrap();
        assert!(node.properties["Next"].is_nullable());
        assert!(node.properties["Next"].readable);
        assert!(!node.properties["Secret"].readable);
    }

    #[test]
    fn test_optional_property_is_nullable() {
        let property = PropertyDescriptor::new(TypeDescriptor::optional(TypeDescriptor::primitive(
            PrimitiveKind::Int64,
        )));
        assert!(property.is_nullable());
    }
}
