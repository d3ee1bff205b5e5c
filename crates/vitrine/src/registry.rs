//! Tool registry: the single source of truth mapping tool names to
//! (descriptor, schema, handler).
//!
//! Built once during startup and read-only afterwards, so concurrent
//! lookups from in-flight requests need no locking. Duplicate registration
//! is a configuration error that aborts startup; it never surfaces as a
//! request-time condition.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::schema::{InputSchema, ValueRecord};
use crate::widget::{CatalogEntry, WidgetDescriptor};

/// Successful handler output: a one-line summary for the model plus the
/// structured content rendered by the widget front-end.
#[derive(Debug, Clone)]
pub struct WidgetReply {
    pub summary: String,
    pub structured: Value,
}

impl WidgetReply {
    pub fn new(summary: impl Into<String>, structured: Value) -> Self {
        Self {
            summary: summary.into(),
            structured,
        }
    }
}

/// Pure transformation from a validated record to a widget reply.
///
/// Errors are domain-specific, actionable text surfaced verbatim to the
/// caller in the error envelope.
pub type Handler = fn(&ValueRecord) -> Result<WidgetReply, String>;

/// One registered tool.
pub struct ToolEntry {
    pub descriptor: WidgetDescriptor,
    pub schema: InputSchema,
    pub handler: Handler,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("tool '{0}' is already registered; widget identifiers must be unique")]
    Duplicate(String),
}

/// Name -> entry map with deterministic iteration order for `tools/list`.
#[derive(Default)]
pub struct ToolRegistry {
    entries: BTreeMap<&'static str, ToolEntry>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Startup-time only; duplicates are fatal.
    pub fn register(&mut self, entry: ToolEntry) -> Result<(), RegistryError> {
        let name = entry.descriptor.identifier;
        if self.entries.contains_key(name) {
            return Err(RegistryError::Duplicate(name.to_string()));
        }
        self.entries.insert(name, entry);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&ToolEntry> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolEntry> {
        self.entries.values()
    }

    /// Registered tool names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    /// Host-facing catalog: one entry per registered widget.
    pub fn catalog(&self) -> Vec<CatalogEntry> {
        self.iter().map(|e| e.descriptor.catalog_entry()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSpec;
    use serde_json::json;

    fn demo_entry(identifier: &'static str) -> ToolEntry {
        ToolEntry {
            descriptor: WidgetDescriptor {
                identifier,
                title: "Demo",
                description: "Render the demo widget.",
                template_uri: "ui://widget/demo.html",
                invoking: "Rendering",
                invoked: "Rendered",
            },
            schema: InputSchema::new().field(FieldSpec::integer("count", 0)),
            handler: |record| Ok(WidgetReply::new("ok", json!({"count": record["count"]}))),
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(demo_entry("show_demo")).unwrap();
        assert!(registry.lookup("show_demo").is_some());
        assert!(registry.lookup("missing").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration_is_fatal() {
        let mut registry = ToolRegistry::new();
        registry.register(demo_entry("show_demo")).unwrap();
        let err = registry.register(demo_entry("show_demo")).unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate(_)));
        assert!(err.to_string().contains("show_demo"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let mut registry = ToolRegistry::new();
        registry.register(demo_entry("show_demo")).unwrap();
        let first = registry.lookup("show_demo").unwrap().descriptor;
        let second = registry.lookup("show_demo").unwrap().descriptor;
        assert_eq!(first, second);
    }

    #[test]
    fn test_names_are_sorted() {
        let mut registry = ToolRegistry::new();
        registry.register(demo_entry("show_b")).unwrap();
        registry.register(demo_entry("show_a")).unwrap();
        assert_eq!(registry.names(), vec!["show_a", "show_b"]);
    }

    #[test]
    fn test_catalog_export() {
        let mut registry = ToolRegistry::new();
        registry.register(demo_entry("show_demo")).unwrap();
        let catalog = serde_json::to_value(registry.catalog()).unwrap();
        assert_eq!(catalog.as_array().unwrap().len(), 1);
        assert_eq!(catalog[0]["identifier"], "show_demo");
        assert_eq!(catalog[0]["templateRef"], "ui://widget/demo.html");
    }
}
