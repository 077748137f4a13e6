use crate::options::PluginOptions;
use crate::text::{js_literal, js_string};
use crate::MAPS_PACKAGE;
use serde_json::Value;

pub const PROVIDER_COMPONENT: &str = "APIProvider";

/// The `<APIProvider>` element spliced around the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderElement {
    api_key: String,
    libraries: Vec<String>,
}

impl ProviderElement {
    pub fn new(api_key: impl Into<String>, libraries: Vec<String>) -> Self {
        Self {
            api_key: api_key.into(),
            libraries,
        }
    }

    /// A missing key still produces a provider (with an empty key) in
    /// development builds; production builds never get this far.
    pub fn from_options(options: &PluginOptions) -> Self {
        Self::new(
            options.api_key.clone().unwrap_or_default(),
            options.libraries.clone(),
        )
    }

    pub fn import_statement() -> String {
        format!(
            "import {{ {} }} from {};",
            PROVIDER_COMPONENT,
            js_string(MAPS_PACKAGE)
        )
    }

    pub fn opening_tag(&self) -> String {
        let libraries = Value::Array(self.libraries.iter().cloned().map(Value::String).collect());
        format!(
            "<{} apiKey={{{}}} libraries={{{}}}>",
            PROVIDER_COMPONENT,
            js_string(&self.api_key),
            js_literal(&libraries)
        )
    }

    pub fn closing_tag() -> String {
        format!("</{}>", PROVIDER_COMPONENT)
    }

    /// Wraps a complete JSX child, one per line.
    pub fn wrap(&self, child: &str) -> String {
        format!("{}\n{}\n{}", self.opening_tag(), child, Self::closing_tag())
    }

    /// Wraps existing children in place, keeping their own whitespace.
    pub fn wrap_inline(&self, children: &str) -> String {
        format!("{}{}{}", self.opening_tag(), children, Self::closing_tag())
    }
}
