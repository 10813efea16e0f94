//! Immutable intermediate representation of a parsed REST API definition.
//!
//! The generator does not parse API definition files itself; a host tool hands
//! it a fully materialized description as a JSON payload (see [`crate::loader`]).
//! The types in this module mirror that payload: a service made of route
//! groups, routes with optional request/response types, and a flat table of
//! named structured types whose members carry a raw tag string and an inline
//! comment.
//!
//! Nothing here is mutated after deserialization; the translation passes only
//! traverse and look up.

use crate::tag::{parse_tag, TagSpec};
use serde::Deserialize;
use std::collections::HashMap;

/// The complete IR payload handed to the generator.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDescription {
    /// Document-level properties (`title`, `version`, `desc`); values may be quoted
    #[serde(default)]
    pub info: Annotations,
    /// The service with its route groups
    pub service: ServiceDefinition,
    /// Flat table of named structured types, in declaration order
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
}

/// A string-to-string annotation lookup.
///
/// Missing keys read as the empty string, which keeps call sites free of
/// `Option` plumbing for the common "annotation absent" case.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Annotations {
    properties: HashMap<String, String>,
}

impl Annotations {
    /// Look up an annotation value, returning `""` when absent.
    pub fn get(&self, key: &str) -> &str {
        self.properties.get(key).map(String::as_str).unwrap_or("")
    }

    /// True when no annotations are present.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl FromIterator<(String, String)> for Annotations {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().collect(),
        }
    }
}

/// A named service: an ordered sequence of route groups.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDefinition {
    pub name: String,
    #[serde(default)]
    pub groups: Vec<RouteGroup>,
}

/// A group of routes sharing annotations (`prefix`, `group`, `swtags`, `jwt`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteGroup {
    #[serde(default)]
    pub annotation: Annotations,
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// One route of a group.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// HTTP method as written in the definition (any casing)
    pub method: String,
    /// Raw path template; may contain `:name` segments
    pub path: String,
    #[serde(default)]
    pub request_type: Option<TypeRef>,
    #[serde(default)]
    pub response_type: Option<TypeRef>,
    /// Handler name, used as the operation id
    pub handler: String,
    /// Keyed documentation annotations (`summary`, `description`, per-parameter entries)
    #[serde(default)]
    pub at_doc: AtDoc,
    /// Free-text documentation lines
    #[serde(default)]
    pub docs: Vec<String>,
}

impl Route {
    /// All documentation for the route joined into one line: the doc
    /// annotation text, the `summary` property, then the free-text lines.
    pub fn joined_doc(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if !self.at_doc.text.is_empty() {
            parts.push(&self.at_doc.text);
        }
        let summary = self.at_doc.get("summary");
        if !summary.is_empty() {
            parts.push(summary);
        }
        parts.extend(self.docs.iter().map(String::as_str).filter(|s| !s.is_empty()));
        parts.join(" ").trim().to_string()
    }
}

/// Keyed documentation annotations attached to a route, plus free text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtDoc {
    #[serde(default)]
    pub properties: HashMap<String, String>,
    #[serde(default)]
    pub text: String,
}

impl AtDoc {
    /// Look up a documentation property, returning `""` when absent.
    pub fn get(&self, key: &str) -> &str {
        self.properties.get(key).map(String::as_str).unwrap_or("")
    }
}

/// One occurrence of a type: a raw token plus, for structured types, the
/// member list inlined by the host parser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    /// String encoding of the type: `string`, `[]int64`, `*User`,
    /// `map[string]string`, `interface{}`, ...
    #[serde(default)]
    pub raw_name: String,
    /// Members, non-empty when this occurrence is a structured type
    #[serde(default)]
    pub members: Vec<Member>,
    /// Documentation lines attached to the type
    #[serde(default)]
    pub docs: Vec<String>,
}

impl TypeRef {
    pub fn name(&self) -> &str {
        &self.raw_name
    }

    /// True when the host parser inlined a member list for this occurrence.
    pub fn is_structured(&self) -> bool {
        !self.members.is_empty()
    }
}

/// One named structured type in the IR's type table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
}

/// One member of a structured type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Member name; empty for embedded/anonymous members
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Raw tag string, e.g. `json:"id,optional" header:"auth"`
    #[serde(default)]
    pub tag: String,
    /// Inline `//` comment
    #[serde(default)]
    pub comment: String,
}

impl Member {
    /// True for embedded/anonymous members.
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    /// Parsed view of the raw tag string.
    pub fn tags(&self) -> Vec<TagSpec> {
        parse_tag(&self.tag)
    }

    /// The wire name of the member: the first tag's name when present,
    /// otherwise the member's own name.
    pub fn property_name(&self) -> String {
        match self.tags().into_iter().next() {
            Some(tag) if !tag.name.is_empty() => tag.name,
            _ => self.name.clone(),
        }
    }

    /// The inline comment with `//` markers removed and surrounding
    /// whitespace trimmed.
    pub fn comment_text(&self) -> String {
        self.comment.replace("//", "").trim().to_string()
    }
}

/// Strip one pair of surrounding double quotes, if present.
pub fn unquote(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotations_lookup() {
        let annotations: Annotations = [("prefix".to_string(), "/v1".to_string())]
            .into_iter()
            .collect();

        assert_eq!(annotations.get("prefix"), "/v1");
        assert_eq!(annotations.get("missing"), "");
        assert!(!annotations.is_empty());
        assert!(Annotations::default().is_empty());
    }

    #[test]
    fn test_joined_doc_combines_sources() {
        let route = Route {
            method: "get".to_string(),
            path: "/".to_string(),
            request_type: None,
            response_type: None,
            handler: "IndexHandler".to_string(),
            at_doc: AtDoc {
                properties: [("summary".to_string(), "\"Get Cart\"".to_string())]
                    .into_iter()
                    .collect(),
                text: "\"front page\"".to_string(),
            },
            docs: vec!["extra line".to_string()],
        };

        assert_eq!(route.joined_doc(), "\"front page\" \"Get Cart\" extra line");
    }

    #[test]
    fn test_member_property_name_prefers_tag() {
        let member = Member {
            name: "Name".to_string(),
            ty: TypeRef {
                raw_name: "string".to_string(),
                ..Default::default()
            },
            tag: "json:\"name,optional\"".to_string(),
            comment: String::new(),
        };

        assert_eq!(member.property_name(), "name");
    }

    #[test]
    fn test_member_property_name_falls_back_to_member_name() {
        let member = Member {
            name: "Name".to_string(),
            ty: TypeRef::default(),
            tag: String::new(),
            comment: String::new(),
        };

        assert_eq!(member.property_name(), "Name");
    }

    #[test]
    fn test_comment_text_strips_markers() {
        let member = Member {
            comment: "// the user id".to_string(),
            ..Default::default()
        };

        assert_eq!(member.comment_text(), "the user id");
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"title\""), "title");
        assert_eq!(unquote("title"), "title");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote(""), "");
    }

    #[test]
    fn test_deserialize_description() {
        let payload = r#"{
            "info": {"title": "\"demo\""},
            "service": {
                "name": "user-api",
                "groups": [{
                    "annotation": {"prefix": "/v1"},
                    "routes": [{
                        "method": "get",
                        "path": "/users/:id",
                        "handler": "GetUserHandler",
                        "responseType": {"rawName": "UserReply"}
                    }]
                }]
            },
            "types": [{
                "name": "UserReply",
                "members": [{
                    "name": "Name",
                    "type": {"rawName": "string"},
                    "tag": "json:\"name\""
                }]
            }]
        }"#;

        let description: ApiDescription = serde_json::from_str(payload).unwrap();

        assert_eq!(description.service.name, "user-api");
        assert_eq!(description.info.get("title"), "\"demo\"");
        let group = &description.service.groups[0];
        assert_eq!(group.annotation.get("prefix"), "/v1");
        let route = &group.routes[0];
        assert_eq!(route.method, "get");
        assert_eq!(route.response_type.as_ref().unwrap().name(), "UserReply");
        assert!(route.request_type.is_none());
        assert_eq!(description.types[0].members[0].property_name(), "name");
    }
}
