//! OpenAPI from Actions - OpenAPI documents from a description of a web API's actions.
//!
//! An upstream collaborator inspects a web API and describes every controller action: its
//! route template, HTTP methods, parameters with their binding annotations, and return type,
//! along with the structure of the composite types involved. This library turns that action
//! model into a complete OpenAPI 3.0 document.
//!
//! # Architecture
//!
//! 1. [`descriptor`] - Action, parameter and type descriptors (the input model)
//! 2. [`type_resolver`] - Catalog of composite type definitions by qualified name
//! 3. [`extractor`] - Resolves path templates, route parameter names and HTTP methods
//! 4. [`classifier`] - Decides where each parameter is bound and whether it is required
//! 5. [`schema_generator`] - Converts types to schemas, registering composite types once
//! 6. [`openapi_builder`] - Assembles operations into paths and the final document
//! 7. [`model`] / [`scanner`] - Load action model files from disk
//! 8. [`serializer`] - Encodes the document as JSON or YAML
//!
//! # Example Usage
//!
//! ```
//! use openapi_from_actions::descriptor::{
//!     ActionDescriptor, HttpMethod, ParameterDescriptor, PrimitiveKind, TypeDescriptor,
//! };
//! use openapi_from_actions::model::ActionModel;
//! use openapi_from_actions::openapi_builder::{build_document, Info};
//! use openapi_from_actions::serializer::serialize_json;
//! use openapi_from_actions::type_resolver::{CompositeType, PropertyDescriptor, TypeResolver};
//!
//! let types = TypeResolver::new().with_type(
//!     "Shop.Widget",
//!     CompositeType::default()
//!         .with_property("Id", PropertyDescriptor::new(TypeDescriptor::primitive(PrimitiveKind::Int32))),
//! );
//!
//! let action = ActionDescriptor::new("Widgets", "Get")
//!     .with_route("[controller]/{id}")
//!     .with_methods(vec![HttpMethod::Get])
//!     .with_parameter(ParameterDescriptor::new("id", TypeDescriptor::primitive(PrimitiveKind::Int32)))
//!     .returning(TypeDescriptor::composite("Shop.Widget"));
//!
//! let model = ActionModel { types, actions: vec![action] };
//! let document = build_document(&model, Info::default());
//!
//! assert!(document.paths.contains_key("Widgets/{id}"));
//! assert!(document.components.schemas.contains_key("Shop_Widget"));
//! println!("{}", serialize_json(&document).unwrap());
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod cli;
pub mod descriptor;
pub mod type_resolver;
pub mod extractor;
pub mod classifier;
pub mod schema_generator;
pub mod openapi_builder;
pub mod model;
pub mod scanner;
pub mod serializer;
pub mod error;
