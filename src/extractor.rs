//! Route and verb extraction for controller actions.
//!
//! Resolves the path template an action is served under, the names of the route parameters
//! embedded in that path, and the HTTP methods the action answers to.

use crate::descriptor::{ActionDescriptor, HttpMethod};
use log::debug;
use std::collections::HashSet;

/// Route extractor for [`ActionDescriptor`]s
pub struct RouteExtractor;

/// Path and methods resolved for one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    /// The resolved path template (e.g. `"Widgets/{id}"` or `"/Widgets/Get"`)
    pub path: String,
    /// Names of the `{...}` placeholders in `path`
    pub route_parameters: RouteParameters,
    /// HTTP methods in declaration order; empty if the action has none
    pub methods: Vec<HttpMethod>,
}

/// Case-insensitive set of route parameter names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParameters {
    names: HashSet<String>,
}

impl RouteParameters {
    pub fn insert(&mut self, name: &str) {
        self.names.insert(name.to_lowercase());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl RouteExtractor {
    /// Resolve path, route parameter names and methods for an action
    pub fn extract(action: &ActionDescriptor) -> RouteInfo {
        let path = Self::resolve_path(action);
        let route_parameters = Self::route_parameter_names(&path);
        let methods = Self::http_methods(action);

        debug!(
            "Resolved {}.{} to {} with {} route parameter(s) and methods {:?}",
            action.controller,
            action.action,
            path,
            route_parameters.len(),
            methods
        );

        RouteInfo {
            path,
            route_parameters,
            methods,
        }
    }

    /// Substitute `[controller]` and `[action]` in the route template, or fall back to
    /// the conventional `/{controller}/{action}` path.
    pub fn resolve_path(action: &ActionDescriptor) -> String {
        match &action.route_template {
            Some(template) => template
                .replace("[controller]", &action.controller)
                .replace("[action]", &action.action),
            None => format!("/{}/{}", action.controller, action.action),
        }
    }

    /// Collect the names of `{...}` placeholders, scanning left to right.
    ///
    /// An unmatched `{` ends the scan; names found before it are kept.
    pub fn route_parameter_names(path: &str) -> RouteParameters {
        let mut names = RouteParameters::default();
        let mut rest = path;

        while let Some(start) = rest.find('{') {
            let after_open = &rest[start + 1..];
            let Some(end) = after_open.find('}') else {
                break;
            };

            let name = after_open[..end].trim();
            if !name.is_empty() {
                names.insert(name);
            }
            rest = &after_open[end + 1..];
        }

        names
    }

    /// Explicit method constraint first, then endpoint metadata, else nothing.
    pub fn http_methods(action: &ActionDescriptor) -> Vec<HttpMethod> {
        if let Some(constraint) = &action.verbs.constraint {
            return constraint.clone();
        }

        if let Some(endpoint) = &action.verbs.endpoint {
            return endpoint.clone();
        }

        Vec::new()
    }
}
