//! Addressing schemas nested inside the intermediate document
//!
//! Plugins that run after the backbone need to find the schema produced for a
//! particular getter, field or parameter. The backbone records a
//! [`SchemaLocation`] for each one; later plugins resolve it with
//! [`OpenApi::schema_at_mut`](crate::OpenApi::schema_at_mut).

use std::fmt;

/// The document node a location starts from
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SchemaRoot {
    /// `components.schemas[name]`
    Component(String),
    /// Request body schema of the operation at a route
    RequestBody(String),
    /// `200` response schema of the operation at a route
    Response(String),
}

/// One step down from a schema to a nested schema
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SchemaStep {
    Property(String),
    Items,
    AdditionalProperties,
    AnyOf(usize),
    OneOf(usize),
    TypeArgument(usize),
}

/// Path from a document root to a nested schema
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaLocation {
    pub root: SchemaRoot,
    pub steps: Vec<SchemaStep>,
}

impl SchemaLocation {
    pub fn component(name: impl Into<String>) -> Self {
        Self {
            root: SchemaRoot::Component(name.into()),
            steps: Vec::new(),
        }
    }

    pub fn request_body(route: impl Into<String>) -> Self {
        Self {
            root: SchemaRoot::RequestBody(route.into()),
            steps: Vec::new(),
        }
    }

    pub fn response(route: impl Into<String>) -> Self {
        Self {
            root: SchemaRoot::Response(route.into()),
            steps: Vec::new(),
        }
    }

    /// A new location one step below this one
    pub fn child(&self, step: SchemaStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self {
            root: self.root.clone(),
            steps,
        }
    }

    pub fn property(&self, name: impl Into<String>) -> Self {
        self.child(SchemaStep::Property(name.into()))
    }

    /// Component name when rooted at `components.schemas`
    pub fn component_name(&self) -> Option<&str> {
        match &self.root {
            SchemaRoot::Component(name) => Some(name),
            _ => None,
        }
    }
}

// JSON pointer token escaping (RFC 6901)
fn escape(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

impl fmt::Display for SchemaLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            SchemaRoot::Component(name) => write!(f, "#/components/schemas/{}", escape(name))?,
            SchemaRoot::RequestBody(route) => write!(
                f,
                "#/paths/{}/post/requestBody/content/application~1json/schema",
                escape(route)
            )?,
            SchemaRoot::Response(route) => write!(
                f,
                "#/paths/{}/post/responses/200/content/application~1json/schema",
                escape(route)
            )?,
        }
        for step in &self.steps {
            match step {
                SchemaStep::Property(name) => write!(f, "/properties/{}", escape(name))?,
                SchemaStep::Items => f.write_str("/items")?,
                SchemaStep::AdditionalProperties => f.write_str("/additionalProperties")?,
                SchemaStep::AnyOf(i) => write!(f, "/anyOf/{i}")?,
                SchemaStep::OneOf(i) => write!(f, "/oneOf/{i}")?,
                SchemaStep::TypeArgument(i) => write!(f, "/x-type-arguments/{i}")?,
            }
        }
        Ok(())
    }
}
