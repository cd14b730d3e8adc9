//! Parameter binding classification.
//!
//! Decides where each action parameter is read from (path, query string or header), whether
//! it is the request body, and whether it is required.

use crate::descriptor::{BindingSource, HttpMethod, ParameterDescriptor};
use crate::extractor::RouteParameters;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Methods for which a request body is attached to the operation.
pub const BODY_METHODS: [HttpMethod; 2] = [HttpMethod::Post, HttpMethod::Put];

/// The location where a parameter value is extracted from in an HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Path parameter embedded in the URL (e.g., `/users/{id}`)
    Path,
    /// Query string parameter (e.g., `?page=1&limit=10`)
    Query,
    /// HTTP header parameter
    Header,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter classifier
pub struct ParameterClassifier;

impl ParameterClassifier {
    /// Binding location of a parameter for an operation using `method`.
    ///
    /// `None` means the parameter gets no `parameters[]` entry: it is either explicitly
    /// bound to the body or an implicit body candidate.
    pub fn location(
        param: &ParameterDescriptor,
        route_parameters: &RouteParameters,
        method: HttpMethod,
    ) -> Option<ParameterLocation> {
        if param.has_binding(BindingSource::Body) {
            return None;
        }

        let annotated = param.has_binding(BindingSource::Route)
            || param.has_binding(BindingSource::Query)
            || param.has_binding(BindingSource::Header);
        let named_in_route = param
            .name
            .as_deref()
            .is_some_and(|name| route_parameters.contains(name));

        if param.has_binding(BindingSource::Route) || (!annotated && named_in_route) {
            Some(ParameterLocation::Path)
        } else if param.has_binding(BindingSource::Query) {
            Some(ParameterLocation::Query)
        } else if param.has_binding(BindingSource::Header) {
            Some(ParameterLocation::Header)
        } else if !param.ty.is_reference_type() || param.ty.is_string() || method == HttpMethod::Get
        {
            Some(ParameterLocation::Query)
        } else {
            None
        }
    }

    /// Whether the parameter supplies the request body: explicitly bound to the body, or an
    /// unannotated reference type other than string.
    pub fn is_body_parameter(param: &ParameterDescriptor) -> bool {
        if param.has_binding(BindingSource::Body) {
            return true;
        }

        !param.has_binding(BindingSource::Route)
            && !param.has_binding(BindingSource::Header)
            && !param.has_binding(BindingSource::Query)
            && param.ty.is_reference_type()
            && !param.ty.is_string()
    }

    /// Path parameters are always required; everything else unless nullable.
    pub fn is_required(param: &ParameterDescriptor, location: Option<ParameterLocation>) -> bool {
        location == Some(ParameterLocation::Path) || !param.is_nullable()
    }

    /// Whether operations using `method` carry a request body
    pub fn accepts_body(method: HttpMethod) -> bool {
        BODY_METHODS.contains(&method)
    }
}
