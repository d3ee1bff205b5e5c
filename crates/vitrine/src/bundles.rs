//! Process-lifetime cache of pre-built widget HTML bundles.
//!
//! Bundles are compiled out of band and embedded into the binary from
//! `widgets/dist/`. The cache is populated once at startup and read-only
//! afterwards; request handling never touches storage. Rebuilding the
//! widget sources requires a process restart to take effect.

use std::collections::HashMap;

use rust_embed::RustEmbed;
use thiserror::Error;

use crate::widget::{WidgetDescriptor, UI_SCHEME};

#[derive(RustEmbed)]
#[folder = "../../widgets/dist/"]
struct Assets;

/// A loaded UI bundle: self-contained HTML with embedded assets.
#[derive(Debug, Clone)]
pub struct Bundle {
    pub html: String,
}

/// Startup-fatal bundle problems. These abort the process before it
/// accepts traffic; a registered widget without a resident bundle must
/// never reach request handling.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("widget '{identifier}' has a malformed template URI '{uri}' (must be ui://<path>/<file>.html)")]
    BadTemplateUri {
        identifier: &'static str,
        uri: &'static str,
    },
    #[error("no bundle '{file}' for widget '{identifier}'; build the widget sources into widgets/dist/ and restart")]
    Missing {
        identifier: &'static str,
        file: String,
    },
    #[error("bundle '{file}' is not valid UTF-8")]
    NotUtf8 { file: String },
    #[error("bundle '{file}' is empty; rebuild the widget sources and restart")]
    Empty { file: String },
}

/// Template URI -> bundle map, immutable after `load`.
#[derive(Debug, Default)]
pub struct BundleCache {
    by_uri: HashMap<String, Bundle>,
    // bundle file name -> template URI, for the asset-serving path
    files: HashMap<String, String>,
}

impl BundleCache {
    /// Load the bundle for every registered widget.
    ///
    /// Runs once at startup; any missing or unusable bundle is fatal.
    pub fn load<'a>(
        descriptors: impl IntoIterator<Item = &'a WidgetDescriptor>,
    ) -> Result<Self, BundleError> {
        let mut cache = Self::default();
        for descriptor in descriptors {
            let file = template_file(descriptor.template_uri).ok_or(
                BundleError::BadTemplateUri {
                    identifier: descriptor.identifier,
                    uri: descriptor.template_uri,
                },
            )?;
            let asset = Assets::get(file).ok_or_else(|| BundleError::Missing {
                identifier: descriptor.identifier,
                file: file.to_string(),
            })?;
            let html = String::from_utf8(asset.data.into_owned())
                .map_err(|_| BundleError::NotUtf8 { file: file.to_string() })?;
            if html.trim().is_empty() {
                return Err(BundleError::Empty { file: file.to_string() });
            }
            log::debug!(
                "Loaded bundle {} for {} ({} bytes)",
                file,
                descriptor.identifier,
                html.len()
            );
            cache
                .files
                .insert(file.to_string(), descriptor.template_uri.to_string());
            cache
                .by_uri
                .insert(descriptor.template_uri.to_string(), Bundle { html });
        }
        Ok(cache)
    }

    /// O(1) lookup by template URI.
    pub fn get(&self, template_uri: &str) -> Option<&Bundle> {
        self.by_uri.get(template_uri)
    }

    /// Lookup by bundle file name (the HTTP asset path).
    pub fn get_file(&self, file: &str) -> Option<&Bundle> {
        self.files.get(file).and_then(|uri| self.by_uri.get(uri))
    }

    /// Template URIs with a resident bundle.
    pub fn uris(&self) -> impl Iterator<Item = &str> {
        self.by_uri.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_uri.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_uri.is_empty()
    }
}

/// Resolve a `ui://` template URI to its bundle file name
/// (`ui://widget/catalog.html` -> `catalog.html`).
fn template_file(uri: &str) -> Option<&str> {
    let rest = uri.strip_prefix(UI_SCHEME)?;
    let file = rest.rsplit('/').next()?;
    if file.is_empty() {
        None
    } else {
        Some(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets;

    #[test]
    fn test_template_file_parsing() {
        assert_eq!(template_file("ui://widget/catalog.html"), Some("catalog.html"));
        assert_eq!(template_file("ui://a/b/c/deep.html"), Some("deep.html"));
        assert_eq!(template_file("http://example.com/x.html"), None);
        assert_eq!(template_file("ui://widget/"), None);
    }

    #[test]
    fn test_load_all_registered_widgets() {
        let registry = widgets::build_registry().unwrap();
        let cache = BundleCache::load(registry.iter().map(|e| &e.descriptor)).unwrap();
        assert_eq!(cache.len(), registry.len());
        for entry in registry.iter() {
            let bundle = cache.get(entry.descriptor.template_uri).unwrap();
            assert!(!bundle.html.trim().is_empty());
        }
    }

    #[test]
    fn test_missing_bundle_is_fatal() {
        let ghost = WidgetDescriptor {
            identifier: "show_ghost",
            title: "Ghost",
            description: "A widget with no built bundle.",
            template_uri: "ui://widget/ghost.html",
            invoking: "Summoning",
            invoked: "Summoned",
        };
        let err = BundleCache::load([&ghost]).unwrap_err();
        assert!(matches!(err, BundleError::Missing { .. }));
        assert!(err.to_string().contains("ghost.html"));
        assert!(err.to_string().contains("restart"));
    }

    #[test]
    fn test_bad_template_uri_is_fatal() {
        let odd = WidgetDescriptor {
            identifier: "show_odd",
            title: "Odd",
            description: "A widget with a malformed template reference.",
            template_uri: "file:///etc/passwd",
            invoking: "Loading",
            invoked: "Loaded",
        };
        let err = BundleCache::load([&odd]).unwrap_err();
        assert!(matches!(err, BundleError::BadTemplateUri { .. }));
    }

    #[test]
    fn test_lookup_by_file_name() {
        let registry = widgets::build_registry().unwrap();
        let cache = BundleCache::load(registry.iter().map(|e| &e.descriptor)).unwrap();
        assert!(cache.get_file("card.html").is_some());
        assert!(cache.get_file("nope.html").is_none());
    }
}
