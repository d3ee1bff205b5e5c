//! The widget table: every display widget shipped with the server.
//!
//! Each submodule owns one widget end to end — descriptor, input schema,
//! and pure handler. `build_registry` is the single startup entry point;
//! nothing registers tools after it returns.

pub mod card;
pub mod catalog;
pub mod countdown;

use crate::registry::{RegistryError, ToolRegistry};

/// Build the tool registry from the static widget table.
pub fn build_registry() -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    registry.register(catalog::entry())?;
    registry.register(card::entry())?;
    registry.register(countdown::entry())?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::UI_SCHEME;
    use std::collections::BTreeSet;

    #[test]
    fn test_identifiers_follow_tool_naming() {
        for entry in build_registry().unwrap().iter() {
            let id = entry.descriptor.identifier;
            assert!(
                id.chars().next().is_some_and(|c| c.is_ascii_lowercase()),
                "identifier '{}' must start with a lowercase letter",
                id
            );
            assert!(
                id.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
                "identifier '{}' must be lowercase with underscores",
                id
            );
            assert!(id.contains('_'), "identifier '{}' should be verb_noun", id);
        }
    }

    #[test]
    fn test_template_uris_use_ui_scheme_and_html() {
        for entry in build_registry().unwrap().iter() {
            let uri = entry.descriptor.template_uri;
            assert!(uri.starts_with(UI_SCHEME), "'{}' must start with ui://", uri);
            assert!(uri.ends_with(".html"), "'{}' must end with .html", uri);
        }
    }

    #[test]
    fn test_template_uris_are_unique() {
        let registry = build_registry().unwrap();
        let uris: BTreeSet<_> = registry.iter().map(|e| e.descriptor.template_uri).collect();
        assert_eq!(uris.len(), registry.len());
    }

    #[test]
    fn test_every_widget_accepts_empty_arguments() {
        for entry in build_registry().unwrap().iter() {
            let record = entry
                .schema
                .validate(&serde_json::Map::new())
                .unwrap_or_else(|e| {
                    panic!("{} rejects empty args: {}", entry.descriptor.identifier, e)
                });
            assert_eq!(record.len(), entry.schema.field_names().len());
        }
    }

    #[test]
    fn test_status_strings_are_non_empty() {
        for entry in build_registry().unwrap().iter() {
            assert!(!entry.descriptor.invoking.trim().is_empty());
            assert!(!entry.descriptor.invoked.trim().is_empty());
        }
    }

    #[test]
    fn test_descriptions_document_the_contract() {
        for entry in build_registry().unwrap().iter() {
            let description = entry.descriptor.description;
            assert!(
                description.contains("Example:"),
                "{} description must include an example call",
                entry.descriptor.identifier
            );
            assert!(
                description.contains("Returns"),
                "{} description must document the return shape",
                entry.descriptor.identifier
            );
        }
    }
}
