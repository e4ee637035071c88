//! Annotation model

use crate::reflect::ReflectAnnotation;
use crate::scan::AnnotationDescriptor;
use std::collections::BTreeMap;

/// An annotation instance with its parameter values
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationInfoModel {
    name: String,
    values: BTreeMap<String, serde_json::Value>,
}

impl AnnotationInfoModel {
    pub fn new(name: impl Into<String>, values: BTreeMap<String, serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Fully-qualified annotation class name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    pub fn values(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.values
    }

    pub fn value(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    /// A parameter value that is a string
    pub fn string_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.as_str())
    }
}

impl From<&AnnotationDescriptor> for AnnotationInfoModel {
    fn from(descriptor: &AnnotationDescriptor) -> Self {
        Self::new(descriptor.name.clone(), descriptor.values.clone())
    }
}

impl From<&ReflectAnnotation> for AnnotationInfoModel {
    fn from(annotation: &ReflectAnnotation) -> Self {
        Self::new(annotation.name.clone(), annotation.values.clone())
    }
}

/// Last segment of a binary class name, nested classes included
pub(crate) fn simple_name(name: &str) -> &str {
    let tail = name.rsplit('.').next().unwrap_or(name);
    tail.rsplit('$').next().unwrap_or(tail)
}

pub(crate) fn has_annotation(annotations: &[AnnotationInfoModel], name: &str) -> bool {
    annotations.iter().any(|a| a.name == name)
}
