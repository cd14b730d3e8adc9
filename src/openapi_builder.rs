use crate::classifier::ParameterClassifier;
use crate::descriptor::{ActionDescriptor, HttpMethod};
use crate::extractor::{RouteExtractor, RouteInfo};
use crate::model::ActionModel;
use crate::schema_generator::{Schema, SchemaGenerator};
use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

const JSON_CONTENT_TYPE: &str = "application/json";
const OPENAPI_VERSION: &str = "3.0.1";

/// OpenAPI document builder
pub struct OpenApiBuilder {
    /// OpenAPI info section
    info: Info,
    /// Paths collection (URL path -> PathItem)
    paths: IndexMap<String, PathItem>,
}

/// OpenAPI Info object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title
    pub title: String,
    /// API version
    pub version: String,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            title: "API".to_string(),
            version: "1.0".to_string(),
        }
    }
}

/// OpenAPI PathItem object - represents all operations for a single path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
}

impl PathItem {
    fn slot(&mut self, method: HttpMethod) -> &mut Option<Operation> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Options => &mut self.options,
            HttpMethod::Head => &mut self.head,
            HttpMethod::Patch => &mut self.patch,
            HttpMethod::Trace => &mut self.trace,
        }
    }

    /// The operation registered under `method`, if any
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }

    /// Store an operation under `method`, returning the one it replaced
    pub fn set_operation(&mut self, method: HttpMethod, operation: Operation) -> Option<Operation> {
        self.slot(method).replace(operation)
    }
}

/// OpenAPI Operation object - represents a single API operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation ID (`{controller}_{action}`)
    #[serde(rename = "operationId")]
    pub operation_id: String,
    /// Parameters (path, query, header)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
    /// Request body
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code
    pub responses: IndexMap<String, Response>,
}

/// OpenAPI Parameter object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Parameter location (path, query, header)
    #[serde(rename = "in")]
    pub location: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// OpenAPI RequestBody object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    pub required: bool,
    /// Content types and their schemas
    pub content: IndexMap<String, MediaType>,
}

/// OpenAPI MediaType object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// OpenAPI Response object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<IndexMap<String, MediaType>>,
}

/// OpenAPI Components object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Schema definitions keyed by schema id
    pub schemas: IndexMap<String, Schema>,
}

/// Complete OpenAPI document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version
    pub openapi: String,
    pub info: Info,
    pub paths: IndexMap<String, PathItem>,
    pub components: Components,
}

/// Build a complete document for an action model.
///
/// The schema registry and cycle guard live only for the duration of this call.
pub fn build_document(model: &ActionModel, info: Info) -> OpenApiDocument {
    let mut schema_gen = SchemaGenerator::new(&model.types);
    let mut builder = OpenApiBuilder::new().with_info(info);

    for action in &model.actions {
        builder.add_action(action, &mut schema_gen);
    }

    builder.build(schema_gen)
}

fn json_content(schema: Option<Schema>) -> IndexMap<String, MediaType> {
    let mut content = IndexMap::new();
    content.insert(JSON_CONTENT_TYPE.to_string(), MediaType { schema });
    content
}

impl OpenApiBuilder {
    /// Create a new OpenApiBuilder with default info
    pub fn new() -> Self {
        debug!("Initializing OpenApiBuilder");
        Self {
            info: Info::default(),
            paths: IndexMap::new(),
        }
    }

    /// Set custom info for the API
    pub fn with_info(mut self, info: Info) -> Self {
        self.info = info;
        self
    }

    /// Add one operation per HTTP method of the action.
    ///
    /// Actions without any method contribute nothing. An operation already registered for
    /// the same path and method is replaced.
    pub fn add_action(&mut self, action: &ActionDescriptor, schema_gen: &mut SchemaGenerator) {
        let route = RouteExtractor::extract(action);

        if route.methods.is_empty() {
            warn!(
                "Skipping {}.{}: no HTTP methods resolved",
                action.controller, action.action
            );
            return;
        }

        for &method in &route.methods {
            debug!("Adding operation: {} {}", method, route.path);
            let operation = Self::build_operation(action, &route, method, schema_gen);

            let path_item = self.paths.entry(route.path.clone()).or_default();
            if let Some(previous) = path_item.set_operation(method, operation) {
                warn!(
                    "{} {} was already defined by {}, replacing it with {}_{}",
                    method, route.path, previous.operation_id, action.controller, action.action
                );
            }
        }
    }

    fn build_operation(
        action: &ActionDescriptor,
        route: &RouteInfo,
        method: HttpMethod,
        schema_gen: &mut SchemaGenerator,
    ) -> Operation {
        let response_schema = schema_gen.generate_response_schema(&action.return_type);
        let response = Response {
            description: "Success".to_string(),
            content: response_schema.map(|schema| json_content(Some(schema))),
        };

        let mut responses = IndexMap::new();
        responses.insert("200".to_string(), response);

        let parameters: Vec<Parameter> = action
            .parameters
            .iter()
            .filter_map(|param| {
                let location =
                    ParameterClassifier::location(param, &route.route_parameters, method)?;
                Some(Parameter {
                    name: param.name.clone().unwrap_or_else(|| "param".to_string()),
                    location: location.to_string(),
                    required: ParameterClassifier::is_required(param, Some(location)),
                    schema: schema_gen.generate_schema(&param.ty),
                })
            })
            .collect();

        // First body parameter in declaration order wins
        let request_body = if ParameterClassifier::accepts_body(method) {
            action
                .parameters
                .iter()
                .find(|param| ParameterClassifier::is_body_parameter(param))
                .map(|param| RequestBody {
                    required: ParameterClassifier::is_required(param, None),
                    content: json_content(schema_gen.generate_schema(&param.ty)),
                })
        } else {
            None
        };

        Operation {
            operation_id: format!("{}_{}", action.controller, action.action),
            parameters: if parameters.is_empty() {
                None
            } else {
                Some(parameters)
            },
            request_body,
            responses,
        }
    }

    /// Build the final OpenAPI document
    pub fn build(self, schema_gen: SchemaGenerator) -> OpenApiDocument {
        debug!("Building final OpenAPI document with {} paths", self.paths.len());

        OpenApiDocument {
            openapi: OPENAPI_VERSION.to_string(),
            info: self.info,
            paths: self.paths,
            components: Components {
                schemas: schema_gen.into_schemas(),
            },
        }
    }
}

impl Default for OpenApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}
