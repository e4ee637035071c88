//! OpenAPI-shaped intermediate representation
//!
//! The parser produces an [`OpenApi`] document, plugins rewrite it, and the
//! generator consumes it. Only the subset of OpenAPI 3 that the pipeline needs
//! is modelled. Data the format has no native construct for travels in typed
//! vendor extensions (`x-*` fields on [`Schema`]).
//!
//! All maps that end up in generated output are ordered: component schemas
//! and paths by key, object properties by insertion. Identical input therefore
//! always serializes to identical bytes.

use crate::location::{SchemaLocation, SchemaRoot, SchemaStep};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix of every component schema reference.
pub const COMPONENTS_SCHEMAS_REF: &str = "#/components/schemas/";

/// Media type used for request and response bodies.
pub const JSON_MEDIA_TYPE: &str = "application/json";

const OPENAPI_VERSION: &str = "3.0.1";

/// Root of the intermediate document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApi {
    pub openapi: String,

    pub info: Info,

    /// One tag per endpoint class.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,

    /// Endpoint method routes.
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,

    #[serde(default)]
    pub components: Components,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub version: String,
}

/// Operation group descriptor for an endpoint class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,

    /// Fully-qualified name of the endpoint class.
    #[serde(rename = "x-class-name", default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: BTreeMap<String, Schema>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,

    #[serde(default)]
    pub responses: BTreeMap<String, Response>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    pub content: BTreeMap<String, MediaType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    pub schema: Schema,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<BTreeMap<String, MediaType>>,
}

/// Discriminator hint for `oneOf` unions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discriminator {
    pub property_name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mapping: BTreeMap<String, String>,
}

/// A validation constraint captured from a member annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// Simple name of the constraint annotation, e.g. `Size`.
    pub name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

/// A schema node.
///
/// An empty schema (no type, no reference, no composition) is the opaque
/// "unknown" schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<Schema>>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,

    /// Host type name of an opaque schema.
    #[serde(rename = "x-java-type", default, skip_serializing_if = "Option::is_none")]
    pub java_type: Option<String>,

    /// Type parameter names of a generic template schema.
    #[serde(rename = "x-type-parameters", default, skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<Vec<String>>,

    /// Placeholder for a class-level type variable inside a template.
    #[serde(rename = "x-type-variable", default, skip_serializing_if = "Option::is_none")]
    pub type_variable: Option<String>,

    /// Type arguments at a generic use site.
    #[serde(rename = "x-type-arguments", default, skip_serializing_if = "Option::is_none")]
    pub type_arguments: Option<Vec<Schema>>,

    /// Base class of a synthesized subtype union.
    #[serde(rename = "x-union-of", default, skip_serializing_if = "Option::is_none")]
    pub union_of: Option<String>,

    #[serde(rename = "x-validation", default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Vec<Constraint>>,

    /// Any other vendor extension.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, serde_json::Value>,
}

impl OpenApi {
    /// Create an empty document
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            openapi: OPENAPI_VERSION.to_string(),
            info: Info {
                title: title.into(),
                version: version.into(),
            },
            tags: Vec::new(),
            paths: BTreeMap::new(),
            components: Components::default(),
        }
    }

    /// Register a component schema.
    ///
    /// First registration wins: returns `false` and leaves the existing schema
    /// untouched when `name` is already present.
    pub fn register_schema(&mut self, name: impl Into<String>, schema: Schema) -> bool {
        match self.components.schemas.entry(name.into()) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(schema);
                true
            }
        }
    }

    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.components.schemas.get(name)
    }

    pub fn contains_schema(&self, name: &str) -> bool {
        self.components.schemas.contains_key(name)
    }

    /// Add an endpoint tag, ignoring duplicates by name
    pub fn add_tag(&mut self, tag: Tag) {
        if !self.tags.iter().any(|t| t.name == tag.name) {
            self.tags.push(tag);
        }
    }

    /// Add a POST operation under `route`.
    ///
    /// Returns `false` when the route already carries an operation.
    pub fn add_operation(&mut self, route: impl Into<String>, operation: Operation) -> bool {
        let item = self.paths.entry(route.into()).or_default();
        if item.post.is_some() {
            return false;
        }
        item.post = Some(operation);
        true
    }

    /// Resolve a location to the schema it addresses
    pub fn schema_at(&self, location: &SchemaLocation) -> Option<&Schema> {
        let mut current = match &location.root {
            SchemaRoot::Component(name) => self.components.schemas.get(name)?,
            SchemaRoot::RequestBody(route) => self.paths.get(route)?.post.as_ref()?.request_schema()?,
            SchemaRoot::Response(route) => self.paths.get(route)?.post.as_ref()?.response_schema()?,
        };
        for step in &location.steps {
            current = current.child(step)?;
        }
        Some(current)
    }

    /// Resolve a location to a mutable schema
    pub fn schema_at_mut(&mut self, location: &SchemaLocation) -> Option<&mut Schema> {
        let mut current = match &location.root {
            SchemaRoot::Component(name) => self.components.schemas.get_mut(name)?,
            SchemaRoot::RequestBody(route) => self
                .paths
                .get_mut(route)?
                .post
                .as_mut()?
                .request_schema_mut()?,
            SchemaRoot::Response(route) => self
                .paths
                .get_mut(route)?
                .post
                .as_mut()?
                .response_schema_mut()?,
        };
        for step in &location.steps {
            current = current.child_mut(step)?;
        }
        Some(current)
    }

    /// Visit every root schema of every operation (request bodies and responses)
    pub fn for_each_operation_schema_mut(&mut self, mut visit: impl FnMut(&mut Schema)) {
        for item in self.paths.values_mut() {
            if let Some(operation) = item.post.as_mut() {
                if let Some(schema) = operation.request_schema_mut() {
                    visit(schema);
                }
                if let Some(schema) = operation.response_schema_mut() {
                    visit(schema);
                }
            }
        }
    }

    /// Names of every component referenced from anywhere in the document
    pub fn referenced_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut collect = |schema: &Schema| {
            schema.walk(&mut |s| {
                if let Some(name) = s.ref_name() {
                    names.push(name.to_string());
                }
            })
        };
        for schema in self.components.schemas.values() {
            collect(schema);
        }
        for item in self.paths.values() {
            if let Some(operation) = &item.post {
                if let Some(schema) = operation.request_schema() {
                    collect(schema);
                }
                if let Some(schema) = operation.response_schema() {
                    collect(schema);
                }
            }
        }
        names.sort();
        names.dedup();
        names
    }
}

impl Operation {
    /// Create an operation with an empty `200` response
    pub fn new(operation_id: impl Into<String>, tag: impl Into<String>) -> Self {
        let mut responses = BTreeMap::new();
        responses.insert(
            "200".to_string(),
            Response {
                description: String::new(),
                content: None,
            },
        );
        Self {
            operation_id: operation_id.into(),
            tags: vec![tag.into()],
            request_body: None,
            responses,
        }
    }

    pub fn with_request_schema(mut self, schema: Schema) -> Self {
        let mut content = BTreeMap::new();
        content.insert(JSON_MEDIA_TYPE.to_string(), MediaType { schema });
        self.request_body = Some(RequestBody { content });
        self
    }

    pub fn with_response_schema(mut self, schema: Schema) -> Self {
        let mut content = BTreeMap::new();
        content.insert(JSON_MEDIA_TYPE.to_string(), MediaType { schema });
        self.responses.insert(
            "200".to_string(),
            Response {
                description: String::new(),
                content: Some(content),
            },
        );
        self
    }

    pub fn request_schema(&self) -> Option<&Schema> {
        self.request_body
            .as_ref()?
            .content
            .get(JSON_MEDIA_TYPE)
            .map(|m| &m.schema)
    }

    pub fn request_schema_mut(&mut self) -> Option<&mut Schema> {
        self.request_body
            .as_mut()?
            .content
            .get_mut(JSON_MEDIA_TYPE)
            .map(|m| &mut m.schema)
    }

    pub fn response_schema(&self) -> Option<&Schema> {
        self.responses
            .get("200")?
            .content
            .as_ref()?
            .get(JSON_MEDIA_TYPE)
            .map(|m| &m.schema)
    }

    pub fn response_schema_mut(&mut self) -> Option<&mut Schema> {
        self.responses
            .get_mut("200")?
            .content
            .as_mut()?
            .get_mut(JSON_MEDIA_TYPE)
            .map(|m| &mut m.schema)
    }
}

impl Schema {
    /// The opaque schema. `java_type` records the host type it stands for.
    pub fn unknown(java_type: Option<String>) -> Self {
        Self {
            java_type,
            ..Self::default()
        }
    }

    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    pub fn string() -> Self {
        Self::of_type(SchemaType::String)
    }

    pub fn string_with_format(format: &str) -> Self {
        Self {
            format: Some(format.to_string()),
            ..Self::string()
        }
    }

    pub fn boolean() -> Self {
        Self::of_type(SchemaType::Boolean)
    }

    pub fn number(format: Option<&str>) -> Self {
        Self {
            format: format.map(str::to_string),
            ..Self::of_type(SchemaType::Number)
        }
    }

    pub fn integer(format: Option<&str>) -> Self {
        Self {
            format: format.map(str::to_string),
            ..Self::of_type(SchemaType::Integer)
        }
    }

    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of_type(SchemaType::Array)
        }
    }

    /// String-keyed map with the given value schema
    pub fn map(values: Schema) -> Self {
        Self {
            additional_properties: Some(Box::new(values)),
            ..Self::of_type(SchemaType::Object)
        }
    }

    /// Object with no properties yet
    pub fn object() -> Self {
        Self {
            properties: Some(IndexMap::new()),
            ..Self::of_type(SchemaType::Object)
        }
    }

    pub fn string_enum(values: Vec<String>) -> Self {
        Self {
            enum_values: Some(values),
            ..Self::string()
        }
    }

    /// Reference to a component schema by name
    pub fn reference(name: &str) -> Self {
        Self {
            reference: Some(format!("{COMPONENTS_SCHEMAS_REF}{name}")),
            ..Self::default()
        }
    }

    pub fn any_of(schemas: Vec<Schema>) -> Self {
        Self {
            any_of: Some(schemas),
            ..Self::default()
        }
    }

    pub fn one_of(schemas: Vec<Schema>) -> Self {
        Self {
            one_of: Some(schemas),
            ..Self::default()
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable.then_some(true);
        self
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable.unwrap_or(false)
    }

    /// Whether this is the opaque schema
    pub fn is_unknown(&self) -> bool {
        self.reference.is_none()
            && self.schema_type.is_none()
            && self.any_of.is_none()
            && self.one_of.is_none()
            && self.type_variable.is_none()
    }

    /// Name of the referenced component, if this is a reference
    pub fn ref_name(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .and_then(|r| r.strip_prefix(COMPONENTS_SCHEMAS_REF))
    }

    /// Point this schema at another component, keeping other attributes
    pub fn set_ref_name(&mut self, name: &str) {
        self.reference = Some(format!("{COMPONENTS_SCHEMAS_REF}{name}"));
    }

    /// Add a property to an object schema, creating the property map if needed
    pub fn add_property(&mut self, name: impl Into<String>, schema: Schema) {
        self.properties
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), schema);
    }

    pub fn child(&self, step: &SchemaStep) -> Option<&Schema> {
        match step {
            SchemaStep::Property(name) => self.properties.as_ref()?.get(name),
            SchemaStep::Items => self.items.as_deref(),
            SchemaStep::AdditionalProperties => self.additional_properties.as_deref(),
            SchemaStep::AnyOf(index) => self.any_of.as_ref()?.get(*index),
            SchemaStep::OneOf(index) => self.one_of.as_ref()?.get(*index),
            SchemaStep::TypeArgument(index) => self.type_arguments.as_ref()?.get(*index),
        }
    }

    pub fn child_mut(&mut self, step: &SchemaStep) -> Option<&mut Schema> {
        match step {
            SchemaStep::Property(name) => self.properties.as_mut()?.get_mut(name),
            SchemaStep::Items => self.items.as_deref_mut(),
            SchemaStep::AdditionalProperties => self.additional_properties.as_deref_mut(),
            SchemaStep::AnyOf(index) => self.any_of.as_mut()?.get_mut(*index),
            SchemaStep::OneOf(index) => self.one_of.as_mut()?.get_mut(*index),
            SchemaStep::TypeArgument(index) => self.type_arguments.as_mut()?.get_mut(*index),
        }
    }

    /// Depth-first visit of this schema and every nested schema
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Schema)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Depth-first mutable visit, parent before children
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Schema)) {
        visit(self);
        if let Some(properties) = self.properties.as_mut() {
            for child in properties.values_mut() {
                child.walk_mut(visit);
            }
        }
        if let Some(items) = self.items.as_deref_mut() {
            items.walk_mut(visit);
        }
        if let Some(values) = self.additional_properties.as_deref_mut() {
            values.walk_mut(visit);
        }
        for list in [
            self.any_of.as_mut(),
            self.one_of.as_mut(),
            self.type_arguments.as_mut(),
        ]
        .into_iter()
        .flatten()
        {
            for child in list.iter_mut() {
                child.walk_mut(visit);
            }
        }
    }

    fn children(&self) -> impl Iterator<Item = &Schema> {
        let properties = self.properties.iter().flat_map(|p| p.values());
        let single = self
            .items
            .as_deref()
            .into_iter()
            .chain(self.additional_properties.as_deref());
        let lists = [&self.any_of, &self.one_of, &self.type_arguments]
            .into_iter()
            .flatten()
            .flat_map(|list| list.iter());
        properties.chain(single).chain(lists)
    }
}
