//! Non-null annotations
//!
//! Any schema whose origin carries one of the configured annotations, on the
//! member or on the type use, loses its `nullable` flag.

use crate::error::ParserResult;
use crate::plugin::{Plugin, Scope};
use crate::storage::SharedStorage;
use tracing::debug;
use tsbridge_core::SchemaLocation;

pub const NAME: &str = "nonnull";

pub struct NonnullPlugin;

impl Plugin for NonnullPlugin {
    fn name(&self) -> &'static str {
        NAME
    }

    fn order(&self) -> i32 {
        10
    }

    fn requires(&self) -> &'static [&'static str] {
        &["backbone"]
    }

    fn execute(&self, _scope: &Scope, mut storage: SharedStorage) -> ParserResult<SharedStorage> {
        let annotations = storage.config().nonnull.annotations.clone();
        if annotations.is_empty() {
            return Ok(storage);
        }
        let targets: Vec<SchemaLocation> = storage
            .associations()
            .filter(|(_, association)| association.has_any_annotation(&annotations))
            .map(|(location, _)| location.clone())
            .collect();

        let mut cleared = 0;
        for location in &targets {
            if let Some(schema) = storage.openapi_mut().schema_at_mut(location) {
                schema.nullable = None;
                cleared += 1;
            }
        }
        debug!(cleared, "Applied non-null annotations");
        Ok(storage)
    }
}
