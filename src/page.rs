//! Page input surface.
//!
//! The embedding host supplies the current URL parts and raw scroll geometry;
//! this module extracts query parameters and derives the scrollable document
//! height from the box-model measurements.

/// URL parts of the page being instrumented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Hostname, e.g. `shop.example.com`.
    pub host: String,
    /// Path component, e.g. `/products/tee`.
    pub path: String,
    /// Raw query string, with or without the leading `?`.
    pub query: String,
}

impl PageContext {
    /// Create a page context from URL parts.
    pub fn new(host: impl Into<String>, path: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
            query: query.into(),
        }
    }

    /// Look up a query parameter by name.
    ///
    /// Returns `Some("")` for a parameter present without a value and `None`
    /// when the parameter is absent. `+` is treated as a space and
    /// percent-escapes are decoded.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query.trim_start_matches('?');
        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (pair, None),
            };
            if key != name {
                continue;
            }
            let raw = match value {
                Some(v) => v.replace('+', " "),
                None => return Some(String::new()),
            };
            return Some(
                urlencoding::decode(&raw)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or(raw),
            );
        }
        None
    }

    /// The `utm_source` parameter, if present.
    pub fn utm_source(&self) -> Option<String> {
        self.query_param("utm_source")
    }
}

/// Raw scroll measurements for one scroll signal.
///
/// The document height is taken as the maximum across the box-model
/// measurements, which tolerates quirks across browsers and DOM states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollGeometry {
    /// Pixels scrolled from the top of the document.
    pub scroll_top: f64,
    /// Visible viewport height.
    pub viewport_height: f64,
    pub body_scroll_height: f64,
    pub body_offset_height: f64,
    pub document_client_height: f64,
    pub document_scroll_height: f64,
    pub document_offset_height: f64,
}

impl ScrollGeometry {
    /// The effective document height: the maximum across all measurements.
    pub fn document_height(&self) -> f64 {
        self.body_scroll_height
            .max(self.body_offset_height)
            .max(self.document_client_height)
            .max(self.document_scroll_height)
            .max(self.document_offset_height)
    }
}
