//! Static widget metadata and the MCP Apps contract constants.

use serde::Serialize;
use serde_json::{json, Map, Value};

/// MIME type required by the MCP Apps extension for UI resources.
pub const MIME_TYPE: &str = "text/html;profile=mcp-app";

/// URI scheme for widget UI templates.
pub const UI_SCHEME: &str = "ui://";

/// Static metadata for one widget tool.
///
/// Constructed once from the widget table at startup and never mutated.
/// The `description` is contract text, not decoration: the calling host
/// uses it for tool selection, so it documents usage triggers, arguments,
/// the return shape, and one example call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetDescriptor {
    /// Stable tool name, `verb_noun` convention (e.g. `show_catalog`).
    pub identifier: &'static str,
    /// Short display label.
    pub title: &'static str,
    /// Host-facing contract text.
    pub description: &'static str,
    /// Opaque `ui://` reference resolved by the bundle cache.
    pub template_uri: &'static str,
    /// Status string surfaced while the tool runs.
    pub invoking: &'static str,
    /// Status string surfaced after the tool ran.
    pub invoked: &'static str,
}

/// Host-facing catalog entry, the introspection companion to `tools/list`.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub identifier: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    #[serde(rename = "templateRef")]
    pub template_ref: &'static str,
}

impl WidgetDescriptor {
    pub fn catalog_entry(&self) -> CatalogEntry {
        CatalogEntry {
            identifier: self.identifier,
            title: self.title,
            description: self.description,
            template_ref: self.template_uri,
        }
    }

    /// The `_meta.ui` block attached to the tool listing and to every
    /// successful call.
    ///
    /// `base_url` is the server origin; it must appear in the CSP resource
    /// domains so the sandboxed widget may load assets from this server.
    pub fn ui_meta(&self, base_url: &str) -> Map<String, Value> {
        let mut meta = Map::new();
        meta.insert(
            "ui".to_string(),
            json!({
                "resourceUri": self.template_uri,
                "csp": {
                    "resourceDomains": [base_url],
                    "connectDomains": [],
                },
            }),
        );
        meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTOR: WidgetDescriptor = WidgetDescriptor {
        identifier: "show_demo",
        title: "Demo",
        description: "Render the demo widget.",
        template_uri: "ui://widget/demo.html",
        invoking: "Rendering",
        invoked: "Rendered",
    };

    #[test]
    fn test_catalog_entry_shape() {
        let entry = serde_json::to_value(DESCRIPTOR.catalog_entry()).unwrap();
        assert_eq!(entry["identifier"], "show_demo");
        assert_eq!(entry["templateRef"], "ui://widget/demo.html");
    }

    #[test]
    fn test_ui_meta_carries_resource_uri_and_origin() {
        let meta = DESCRIPTOR.ui_meta("http://127.0.0.1:8090");
        let ui = &meta["ui"];
        assert_eq!(ui["resourceUri"], "ui://widget/demo.html");
        assert_eq!(ui["csp"]["resourceDomains"][0], "http://127.0.0.1:8090");
        assert_eq!(ui["csp"]["connectDomains"], serde_json::json!([]));
    }
}
