//! Swagger Generator - Swagger 2.0 documents from a parsed REST API definition.
//!
//! This library translates an immutable intermediate representation (IR) of a
//! REST API definition - a service with route groups, routes, and a table of
//! named structured types with field tags - into a Swagger 2.0 document
//! object graph. The translation classifies each field into its transport
//! location (path/query/header/body), resolves type references recursively
//! (arrays, embedded structs, interface and map shapes), and converts the tag
//! option language into validation constraints (required, default, enum,
//! numeric range, example).
//!
//! # Architecture
//!
//! The library is organized into several modules that work together:
//!
//! 1. [`ir`] - The immutable input model handed over by the host tool
//! 2. [`loader`] - Reads and decodes the IR payload from a file or stdin
//! 3. [`tag`] - Parses field tags and their constraint options
//! 4. [`kind`] - Classifies primitive type tokens into Swagger type/format pairs
//! 5. [`type_resolver`] - Renders the type table into schema definitions
//! 6. [`route_translator`] - Renders route groups into path items
//! 7. [`builder`] - Assembles the scaffold, paths and definitions
//! 8. [`swagger`] - The serializable Swagger 2.0 object model
//! 9. [`serializer`] - Serializes the document to JSON or YAML
//!
//! # Example Usage
//!
//! ```no_run
//! use swagger_from_api::builder::SwaggerBuilder;
//! use swagger_from_api::loader::load_description;
//! use swagger_from_api::serializer::serialize_json;
//! use std::path::Path;
//!
//! // Load the parsed API description
//! let description = load_description(Path::new("api.json")).unwrap();
//!
//! // Build the Swagger document
//! let document = SwaggerBuilder::new(&description)
//!     .with_host("api.example.com")
//!     .with_base_path("/v1")
//!     .build();
//!
//! // Serialize to JSON
//! let json = serialize_json(&document).unwrap();
//! println!("{}", json);
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which provides a complete
//! CLI application.

pub mod builder;
pub mod cli;
pub mod error;
pub mod ir;
pub mod kind;
pub mod loader;
pub mod route_translator;
pub mod serializer;
pub mod swagger;
pub mod tag;
pub mod type_resolver;
