//! Swagger document builder - fixed scaffold plus assembly of the rendered
//! paths and definitions.

use crate::ir::{unquote, ApiDescription};
use crate::route_translator::RouteTranslator;
use crate::swagger::{
    security_requirement, SecurityScheme, SwaggerDocument, SwaggerInfo, API_KEY_SCHEME,
};
use crate::type_resolver::TypeResolver;
use indexmap::IndexMap;
use log::debug;

/// Assembles the final document from an API description.
///
/// `host` and `base_path` are recorded verbatim when non-empty; they have no
/// effect on the translation itself.
pub struct SwaggerBuilder<'a> {
    description: &'a ApiDescription,
    host: String,
    base_path: String,
}

impl<'a> SwaggerBuilder<'a> {
    pub fn new(description: &'a ApiDescription) -> Self {
        debug!("Initializing SwaggerBuilder");
        Self {
            description,
            host: String::new(),
            base_path: String::new(),
        }
    }

    /// Set the API request address.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the URL request prefix.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Build the complete document.
    pub fn build(self) -> SwaggerDocument {
        let info = SwaggerInfo {
            title: unquote(self.description.info.get("title")).to_string(),
            version: unquote(self.description.info.get("version")).to_string(),
            description: unquote(self.description.info.get("desc")).to_string(),
        };

        let mut security_definitions = IndexMap::new();
        security_definitions.insert(
            API_KEY_SCHEME.to_string(),
            SecurityScheme {
                scheme_type: "apiKey".to_string(),
                description: "Enter JWT Bearer token **_only_**".to_string(),
                name: "Authorization".to_string(),
                location: "header".to_string(),
            },
        );

        let translated =
            RouteTranslator::new(&self.description.service, &self.description.types)
                .render_routes();
        debug!(
            "Collected {} parameter schema references",
            translated.referenced.len()
        );

        let definitions = TypeResolver::new(&self.description.types).render_definitions();
        debug!(
            "Assembled {} paths and {} definitions",
            translated.paths.len(),
            definitions.len()
        );

        SwaggerDocument {
            swagger: "2.0".to_string(),
            info,
            host: self.host,
            base_path: self.base_path,
            schemes: vec!["http".to_string(), "https".to_string()],
            consumes: vec!["application/json".to_string()],
            produces: vec!["application/json".to_string()],
            security_definitions,
            security: vec![security_requirement(API_KEY_SCHEME)],
            paths: translated.paths,
            definitions,
        }
    }
}
