//! Route translator - renders route groups into Swagger path items.
//!
//! Each route becomes one operation on its path item: path parameters are
//! extracted from `:name` segments, query/header parameters from the request
//! type's tagged members, and non-GET routes with a named request type get a
//! single body parameter referencing the request definition. Group
//! annotations supply the path prefix, operation tags and the JWT security
//! requirement.

use crate::ir::{unquote, Member, Route, RouteGroup, ServiceDefinition, TypeDefinition, TypeRef};
use crate::kind::{primitive_schema, Kind};
use crate::swagger::{
    security_requirement, Operation, Parameter, ParameterLocation, PathItem, ResponseObject,
    SchemaObject, API_KEY_SCHEME,
};
use crate::tag::TagConstraints;
use indexmap::IndexMap;
use log::debug;
use std::collections::HashSet;

/// Reserved documentation endpoints, never rendered.
const EXCLUDE_PATHS: [&str; 2] = ["/swagger", "/swagger-json"];

const SUCCESS_DESCRIPTION: &str = "A successful response.";

/// Result of translating all routes of a service.
pub struct TranslatedPaths {
    /// Path template to path item, in first-seen route order
    pub paths: IndexMap<String, PathItem>,
    /// Every schema `$ref` recorded from parameters; available for pruning,
    /// unused by default
    pub referenced: HashSet<String>,
}

/// Renders the paths section from the service and the shared type table.
pub struct RouteTranslator<'a> {
    service: &'a ServiceDefinition,
    types: &'a [TypeDefinition],
    paths: IndexMap<String, PathItem>,
    referenced: HashSet<String>,
}

impl<'a> RouteTranslator<'a> {
    pub fn new(service: &'a ServiceDefinition, types: &'a [TypeDefinition]) -> Self {
        debug!(
            "Initializing RouteTranslator for service {} ({} groups)",
            service.name,
            service.groups.len()
        );
        Self {
            service,
            types,
            paths: IndexMap::new(),
            referenced: HashSet::new(),
        }
    }

    /// Translate every route of every group.
    pub fn render_routes(mut self) -> TranslatedPaths {
        let service = self.service;
        for group in &service.groups {
            for route in &group.routes {
                self.render_route(group, route);
            }
        }
        TranslatedPaths {
            paths: self.paths,
            referenced: self.referenced,
        }
    }

    fn render_route(&mut self, group: &RouteGroup, route: &Route) {
        let mut path = format!("{}{}", group.annotation.get("prefix"), route.path);
        if !path.starts_with('/') {
            path = format!("/{}", path);
        }

        if EXCLUDE_PATHS.contains(&path.as_str()) {
            debug!("Skipping reserved path {}", path);
            return;
        }

        let mut parameters: Vec<Parameter> = Vec::new();

        // :name segments become {name} plus a required string path parameter
        if path.contains(':') {
            let mut segments: Vec<String> = Vec::new();
            for part in path.split('/') {
                match part.strip_prefix(':') {
                    Some(key) => {
                        segments.push(format!("{{{}}}", key));
                        let mut parameter = Parameter::path(key);
                        let doc = route.at_doc.get(key);
                        if !doc.is_empty() {
                            parameter.description = unquote(doc).to_string();
                        }
                        parameters.push(parameter);
                    }
                    None => segments.push(part.to_string()),
                }
            }
            path = segments.join("/");
        }

        if let Some(request) = &route.request_type {
            for member in self.request_members(request) {
                let tags = member.tags();
                if tags.iter().any(|tag| tag.key == "path") {
                    continue;
                }

                if member.is_anonymous() && member.ty.is_structured() {
                    for inner in &member.ty.members {
                        let surfaced = inner
                            .tags()
                            .iter()
                            .any(|tag| tag.key == "header" || tag.key == "form");
                        if surfaced {
                            parameters.push(render_member_parameter(inner));
                        }
                    }
                    continue;
                }

                if tags.iter().any(|tag| tag.key == "header" || tag.key == "form") {
                    if member.ty.is_structured() {
                        for inner in &member.ty.members {
                            parameters.push(render_member_parameter(inner));
                        }
                    } else {
                        parameters.push(render_member_parameter(member));
                    }
                }
            }

            if !route.method.eq_ignore_ascii_case("get") && !request.name().is_empty() {
                parameters.push(body_parameter(request));
            }
        }

        for parameter in &parameters {
            if let Some(schema) = &parameter.schema {
                if !schema.reference.is_empty() {
                    self.referenced.insert(schema.reference.clone());
                }
            }
        }

        let operation = self.build_operation(group, route, parameters);

        let item = self.paths.entry(path.clone()).or_default();
        match route.method.to_uppercase().as_str() {
            "GET" => item.get = Some(operation),
            "POST" => item.post = Some(operation),
            "PUT" => item.put = Some(operation),
            "PATCH" => item.patch = Some(operation),
            "DELETE" => item.delete = Some(operation),
            other => debug!("Dropping route {} {}: unsupported method", other, path),
        }
    }

    fn build_operation(
        &self,
        group: &RouteGroup,
        route: &Route,
        parameters: Vec<Parameter>,
    ) -> Operation {
        // swtags beats group beats the service name
        let mut tag = self.service.name.clone();
        let group_tag = group.annotation.get("group");
        if !group_tag.is_empty() {
            tag = group_tag.to_string();
        }
        let swtags = group.annotation.get("swtags");
        if !swtags.is_empty() {
            tag = swtags.to_string();
        }

        let response_schema = match &route.response_type {
            Some(response) if !response.name().is_empty() => {
                SchemaObject::reference(format!("#/definitions/{}", response.name()))
            }
            _ => SchemaObject::default(),
        };
        let mut responses = IndexMap::new();
        responses.insert(
            "200".to_string(),
            ResponseObject {
                description: SUCCESS_DESCRIPTION.to_string(),
                schema: response_schema,
            },
        );

        let security = if group.annotation.get("jwt").is_empty() {
            None
        } else {
            Some(vec![security_requirement(API_KEY_SCHEME)])
        };

        Operation {
            tags: vec![tag],
            summary: route.joined_doc().replace('"', ""),
            description: unquote(route.at_doc.get("description")).replace('"', ""),
            operation_id: route.handler.clone(),
            parameters,
            responses,
            security,
        }
    }

    /// The request type's members: inlined on the occurrence, or looked up in
    /// the shared type table by name.
    fn request_members<'b>(&'b self, ty: &'b TypeRef) -> &'b [Member] {
        if ty.is_structured() {
            return &ty.members;
        }
        self.types
            .iter()
            .find(|definition| definition.name == ty.raw_name)
            .map(|definition| definition.members.as_slice())
            .unwrap_or(&[])
    }
}

/// The single required body parameter for a named request type.
fn body_parameter(request: &TypeRef) -> Parameter {
    let mut parameter = Parameter::body(format!("#/definitions/{}", request.name()));
    let doc = request.docs.join(",").replace("//", "");
    if !doc.is_empty() {
        parameter.description = doc;
    }
    parameter
}

/// A query/header parameter for one tagged member.
fn render_member_parameter(member: &Member) -> Parameter {
    let token = member.ty.name();
    let stripped = token.replace("[]", "");
    let (param_type, format) = match primitive_schema(Kind::from_token(&stripped), &stripped) {
        Some(pair) => pair,
        None => (token.to_string(), "UNKNOWN".to_string()),
    };

    let mut parameter = Parameter::new("", ParameterLocation::Query, false);
    parameter.param_type = param_type;
    parameter.format = format;

    for (index, tag) in member.tags().iter().enumerate() {
        parameter.name = tag.name.clone();
        // the transport location tag leads; later tags only rename
        if index == 0 {
            parameter.location = if tag.key == "header" {
                ParameterLocation::Header
            } else {
                ParameterLocation::Query
            };
        }

        if tag.options.is_empty() {
            parameter.required = true;
            continue;
        }

        let constraints = TagConstraints::from_options(&tag.options);
        if let Some(values) = constraints.enum_values {
            parameter.enum_values = Some(values);
        }
        if constraints.minimum.is_some() {
            parameter.minimum = constraints.minimum;
            parameter.maximum = constraints.maximum;
        }
        if let Some(value) = constraints.default {
            parameter.default = Some(value);
        }
        if let Some(value) = constraints.example {
            parameter.example = Some(value);
        }
        parameter.required = constraints.required;
    }

    parameter.description = member.comment_text();
    parameter
}
