//! Type resolver - renders the IR type table into Swagger definitions.
//!
//! Every named structured type becomes exactly one `definitions` entry keyed
//! and titled by the type's name. Members tagged for a non-body transport
//! location (`path`, `header`, `form`) are surface parameters and stay out of
//! the body schema; anonymous structured members are flattened one level into
//! the enclosing schema.

use crate::ir::{Member, TypeDefinition};
use crate::kind::{primitive_schema, Kind};
use crate::swagger::SchemaObject;
use crate::tag::TagConstraints;
use indexmap::IndexMap;
use log::{debug, warn};

/// Tag keys whose members are parameters, never body properties.
const EXCLUDED_TAG_KEYS: [&str; 3] = ["header", "path", "form"];

/// Renders schema definitions from the immutable type table.
pub struct TypeResolver<'a> {
    types: &'a [TypeDefinition],
}

impl<'a> TypeResolver<'a> {
    pub fn new(types: &'a [TypeDefinition]) -> Self {
        debug!("Initializing TypeResolver with {} types", types.len());
        Self { types }
    }

    /// One definition per type, in type-table order.
    pub fn render_definitions(&self) -> IndexMap<String, SchemaObject> {
        let mut definitions = IndexMap::new();
        for definition in self.types {
            definitions.insert(definition.name.clone(), self.render_definition(definition));
        }
        definitions
    }

    fn render_definition(&self, definition: &TypeDefinition) -> SchemaObject {
        debug!("Rendering definition for type {}", definition.name);

        let mut schema = SchemaObject::object();
        schema.title = definition.name.clone();

        let mut properties: IndexMap<String, SchemaObject> = IndexMap::new();
        let mut required: Vec<String> = Vec::new();

        for member in &definition.members {
            // one level of flattening for embedded structured members
            if member.is_anonymous() && member.ty.is_structured() {
                for inner in &member.ty.members {
                    if inner.tags().iter().any(|tag| tag.key == "header") {
                        continue;
                    }
                    if let Some(inner_schema) = member_schema(inner) {
                        properties.insert(inner.property_name(), inner_schema);
                    }
                }
                continue;
            }

            if has_excluded_tag(member) {
                continue;
            }

            if let Some(member_schema) = member_schema(member) {
                properties.insert(member.property_name(), member_schema);
            }

            accumulate_required(member, &mut required);
        }

        if !properties.is_empty() {
            schema.properties = Some(properties);
        }
        schema.required = required;
        schema
    }
}

/// True when any tag places the member outside the body schema.
fn has_excluded_tag(member: &Member) -> bool {
    member
        .tags()
        .iter()
        .any(|tag| EXCLUDED_TAG_KEYS.contains(&tag.key.as_str()))
}

/// Collect the member's wire name into the required list.
///
/// A tag with no options is required by default; `optional`/`omitempty`
/// exclude the member. The literal name `required` is a validator marker,
/// not a field name, and never enters the list. Names are deduplicated.
fn accumulate_required(member: &Member, required: &mut Vec<String>) {
    for tag in member.tags() {
        if tag.options.is_empty() {
            if tag.name != "required" && !required.contains(&tag.name) {
                required.push(tag.name.clone());
            }
            continue;
        }

        let constraints = TagConstraints::from_options(&tag.options);
        if constraints.required && !required.contains(&tag.name) {
            required.push(tag.name.clone());
        }
    }
}

/// Resolve one member's shape into a schema.
///
/// Returns `None` only for unsupported map shapes; everything else resolves,
/// falling back to the raw token with format `UNKNOWN` when the kind table
/// does not know it.
fn member_schema(member: &Member) -> Option<SchemaObject> {
    let token = member.ty.name();
    let kind = Kind::from_token(token);

    let mut schema = match kind {
        Kind::Sequence => {
            let element = token.replace("[]", "");
            SchemaObject::array(element_schema(&element))
        }
        Kind::Unresolved => {
            let ref_name = strip_decorations(token);

            let core = if ref_name == "interface" || ref_name == "mapstringstring" {
                // free-form object; property-level map typing is not supported
                SchemaObject::object()
            } else if let Some(rest) = ref_name.strip_prefix("[]") {
                let element = rest.replace("[]", "");
                SchemaObject::array(element_schema(&element))
            } else if token.starts_with("map") {
                warn!(
                    "map type {} is not supported, dropping member {}",
                    token,
                    member.property_name()
                );
                return None;
            } else {
                SchemaObject::reference(format!("#/definitions/{}", ref_name))
            };

            // []User resolves to a reference; the raw token still says array
            if token.starts_with("[]") {
                SchemaObject::array(core)
            } else {
                core
            }
        }
        _ => match primitive_schema(kind, token) {
            Some((schema_type, format)) => SchemaObject::primitive(schema_type, format),
            None => SchemaObject::primitive(token, "UNKNOWN"),
        },
    };

    schema.description = member.comment_text();
    apply_constraints(member, &mut schema);
    Some(schema)
}

fn element_schema(element: &str) -> SchemaObject {
    match primitive_schema(Kind::from_token(element), element) {
        Some((schema_type, format)) => SchemaObject::primitive(schema_type, format),
        None => SchemaObject::primitive(element, "UNKNOWN"),
    }
}

/// Remove one level of array/pointer/brace decoration from a type token.
fn strip_decorations(token: &str) -> String {
    token
        .replacen('[', "", 1)
        .replacen(']', "", 1)
        .replacen('*', "", 1)
        .replacen('{', "", 1)
        .replacen('}', "", 1)
}

fn apply_constraints(member: &Member, schema: &mut SchemaObject) {
    for tag in member.tags() {
        if tag.options.is_empty() {
            continue;
        }
        let constraints = TagConstraints::from_options(&tag.options);
        if let Some(value) = constraints.default {
            schema.default = Some(value);
        }
        if let Some(values) = constraints.enum_values {
            schema.enum_values = Some(values);
        }
        if constraints.minimum.is_some() {
            schema.minimum = constraints.minimum;
            schema.maximum = constraints.maximum;
        }
        if let Some(value) = constraints.example {
            schema.example = Some(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TypeRef;

    fn member(name: &str, token: &str, tag: &str, comment: &str) -> Member {
        Member {
            name: name.to_string(),
            ty: TypeRef {
                raw_name: token.to_string(),
                ..Default::default()
            },
            tag: tag.to_string(),
            comment: comment.to_string(),
        }
    }

    fn type_def(name: &str, members: Vec<Member>) -> TypeDefinition {
        TypeDefinition {
            name: name.to_string(),
            members,
        }
    }

    fn render(types: &[TypeDefinition]) -> IndexMap<String, SchemaObject> {
        TypeResolver::new(types).render_definitions()
    }

    fn render_one(types: &[TypeDefinition], name: &str) -> SchemaObject {
        let mut definitions = render(types);
        definitions.shift_remove(name).expect("definition rendered")
    }

    #[test]
    fn test_one_definition_per_type_with_title() {
        let types = vec![
            type_def("UserReply", vec![member("Name", "string", "json:\"name\"", "")]),
            type_def("LoginRequest", vec![]),
        ];

        let definitions = render(&types);

        assert_eq!(definitions.len(), 2);
        let user = &definitions["UserReply"];
        assert_eq!(user.schema_type, "object");
        assert_eq!(user.title, "UserReply");
        assert_eq!(definitions["LoginRequest"].title, "LoginRequest");
    }

    #[test]
    fn test_definitions_preserve_table_order() {
        let types = vec![
            type_def("Zebra", vec![]),
            type_def("Alpha", vec![]),
            type_def("Mango", vec![]),
        ];

        let definitions = render(&types);
        let names: Vec<&String> = definitions.keys().collect();
        let expected = ["Zebra", "Alpha", "Mango"];
        assert!(names.iter().map(|n| n.as_str()).eq(expected));
    }

    #[test]
    fn test_primitive_properties_in_declaration_order() {
        let types = vec![type_def(
            "UserReply",
            vec![
                member("Name", "string", "json:\"name\"", ""),
                member("Age", "int64", "json:\"age\"", ""),
                member("Score", "float64", "json:\"score\"", ""),
            ],
        )];

        let schema = render_one(&types, "UserReply");
        let properties = schema.properties.as_ref().unwrap();

        let keys: Vec<&String> = properties.keys().collect();
        assert!(keys.iter().map(|k| k.as_str()).eq(["name", "age", "score"]));
        assert_eq!(properties["name"].schema_type, "string");
        assert_eq!(properties["age"].format, "int64");
        assert_eq!(properties["score"].format, "double");
    }

    #[test]
    fn test_property_key_falls_back_to_member_name() {
        let types = vec![type_def("Msg", vec![member("Body", "string", "", "")])];

        let schema = render_one(&types, "Msg");
        assert!(schema.properties.as_ref().unwrap().contains_key("Body"));
    }

    #[test]
    fn test_surface_members_stay_out_of_body_schema() {
        let types = vec![type_def(
            "UploadRequest",
            vec![
                member("Who", "string", "path:\"who\"", ""),
                member("Auth", "string", "header:\"auth\"", ""),
                member("Where", "string", "form:\"where\"", ""),
                member("Data", "string", "json:\"data\"", ""),
            ],
        )];

        let schema = render_one(&types, "UploadRequest");
        let properties = schema.properties.as_ref().unwrap();

        assert_eq!(properties.len(), 1);
        assert!(properties.contains_key("data"));
        assert_eq!(schema.required, vec!["data".to_string()]);
    }

    #[test]
    fn test_required_accumulation_and_dedup() {
        let types = vec![type_def(
            "Form",
            vec![
                member("A", "string", "json:\"a\"", ""),
                // duplicate wire name contributes once
                member("B", "string", "json:\"a\"", ""),
                member("C", "string", "json:\"c,optional\"", ""),
                member("D", "string", "json:\"d,default=x\"", ""),
            ],
        )];

        let schema = render_one(&types, "Form");
        assert_eq!(schema.required, vec!["a".to_string(), "d".to_string()]);
    }

    #[test]
    fn test_required_marker_name_is_not_a_field() {
        let types = vec![type_def(
            "Form",
            vec![member("A", "string", "json:\"a\" validate:\"required\"", "")],
        )];

        let schema = render_one(&types, "Form");
        assert_eq!(schema.required, vec!["a".to_string()]);
    }

    #[test]
    fn test_anonymous_structured_member_flattens_one_level() {
        let inner = vec![
            member("Auth", "string", "header:\"auth\"", ""),
            member("Page", "int", "json:\"page\"", ""),
        ];
        let embedded = Member {
            name: String::new(),
            ty: TypeRef {
                raw_name: "Pagination".to_string(),
                members: inner,
                docs: Vec::new(),
            },
            tag: String::new(),
            comment: String::new(),
        };
        let types = vec![type_def(
            "SearchRequest",
            vec![embedded, member("Keyword", "string", "json:\"keyword\"", "")],
        )];

        let schema = render_one(&types, "SearchRequest");
        let properties = schema.properties.as_ref().unwrap();

        // header-tagged inner member is dropped, the rest become direct properties
        assert_eq!(properties.len(), 2);
        assert!(properties.contains_key("page"));
        assert!(properties.contains_key("keyword"));
        // flattened members do not contribute to the required list
        assert_eq!(schema.required, vec!["keyword".to_string()]);
    }

    #[test]
    fn test_array_of_primitive() {
        let types = vec![type_def(
            "Reply",
            vec![member("Ids", "[]int64", "json:\"ids\"", "")],
        )];

        let schema = render_one(&types, "Reply");
        let ids = &schema.properties.as_ref().unwrap()["ids"];

        assert_eq!(ids.schema_type, "array");
        let items = ids.items.as_ref().unwrap();
        assert_eq!(items.schema_type, "integer");
        assert_eq!(items.format, "int64");
    }

    #[test]
    fn test_array_of_struct_becomes_array_of_refs() {
        for token in ["[]Item", "[]*Item"] {
            let types = vec![type_def("Reply", vec![member("Items", token, "json:\"items\"", "")])];

            let schema = render_one(&types, "Reply");
            let items_property = &schema.properties.as_ref().unwrap()["items"];

            assert_eq!(items_property.schema_type, "array", "token {}", token);
            let items = items_property.items.as_ref().unwrap();
            assert_eq!(items.reference, "#/definitions/Item", "token {}", token);
        }
    }

    #[test]
    fn test_named_and_pointer_references() {
        let types = vec![type_def(
            "Reply",
            vec![
                member("User", "UserInfo", "json:\"user\"", ""),
                member("Owner", "*UserInfo", "json:\"owner\"", ""),
            ],
        )];

        let schema = render_one(&types, "Reply");
        let properties = schema.properties.as_ref().unwrap();
        assert_eq!(properties["user"].reference, "#/definitions/UserInfo");
        assert_eq!(properties["owner"].reference, "#/definitions/UserInfo");
    }

    #[test]
    fn test_interface_and_string_map_become_objects() {
        let types = vec![type_def(
            "Reply",
            vec![
                member("Extra", "interface{}", "json:\"extra\"", ""),
                member("Labels", "map[string]string", "json:\"labels\"", ""),
            ],
        )];

        let schema = render_one(&types, "Reply");
        let properties = schema.properties.as_ref().unwrap();
        assert_eq!(properties["extra"].schema_type, "object");
        assert!(properties["extra"].reference.is_empty());
        assert_eq!(properties["labels"].schema_type, "object");
    }

    #[test]
    fn test_unsupported_map_is_dropped_without_aborting() {
        let types = vec![type_def(
            "Reply",
            vec![
                member("Counters", "map[string]int64", "json:\"counters\"", ""),
                member("Name", "string", "json:\"name\"", ""),
            ],
        )];

        let schema = render_one(&types, "Reply");
        let properties = schema.properties.as_ref().unwrap();

        assert!(!properties.contains_key("counters"));
        assert!(properties.contains_key("name"));
    }

    #[test]
    fn test_array_of_unrecognized_token_treated_as_reference() {
        let types = vec![type_def(
            "Reply",
            vec![member("Flags", "[]complex128", "json:\"flags\"", "")],
        )];

        let schema = render_one(&types, "Reply");
        let flags = &schema.properties.as_ref().unwrap()["flags"];
        assert_eq!(flags.schema_type, "array");
        // the element token is not in the kind table
        let items = flags.items.as_ref().unwrap();
        assert_eq!(items.reference, "#/definitions/complex128");
    }

    #[test]
    fn test_int32_token_resolves_as_reference() {
        let types = vec![type_def(
            "Reply",
            vec![member("Count", "int32", "json:\"count\"", "")],
        )];

        let schema = render_one(&types, "Reply");
        let count = &schema.properties.as_ref().unwrap()["count"];
        assert_eq!(count.reference, "#/definitions/int32");
    }

    #[test]
    fn test_comment_becomes_description() {
        let types = vec![type_def(
            "Reply",
            vec![member("Name", "string", "json:\"name\"", "// display name")],
        )];

        let schema = render_one(&types, "Reply");
        let name = &schema.properties.as_ref().unwrap()["name"];
        assert_eq!(name.description, "display name");
    }

    #[test]
    fn test_constraints_applied_to_property() {
        let types = vec![type_def(
            "Form",
            vec![member(
                "Age",
                "int",
                "json:\"age,default=20,options=18|20|30,range=[18:30],example=20\"",
                "",
            )],
        )];

        let schema = render_one(&types, "Form");
        let age = &schema.properties.as_ref().unwrap()["age"];

        assert_eq!(age.default.as_deref(), Some("20"));
        assert_eq!(
            age.enum_values,
            Some(vec!["18".to_string(), "20".to_string(), "30".to_string()])
        );
        assert_eq!(age.minimum, Some(18.0));
        assert_eq!(age.maximum, Some(30.0));
        assert_eq!(age.example.as_deref(), Some("20"));
    }

    #[test]
    fn test_reversed_range_collapses_on_property() {
        let types = vec![type_def(
            "Form",
            vec![member("Age", "int", "json:\"age,range=[10:2]\"", "")],
        )];

        let schema = render_one(&types, "Form");
        let age = &schema.properties.as_ref().unwrap()["age"];
        assert_eq!(age.minimum, Some(10.0));
        assert_eq!(age.maximum, Some(10.0));
    }

    #[test]
    fn test_strip_decorations() {
        assert_eq!(strip_decorations("*User"), "User");
        assert_eq!(strip_decorations("[]*User"), "User");
        assert_eq!(strip_decorations("interface{}"), "interface");
        assert_eq!(strip_decorations("map[string]string"), "mapstringstring");
    }
}
