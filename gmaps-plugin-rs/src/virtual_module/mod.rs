//! The `@google-maps/map` virtual module.
//!
//! Importing the specifier resolves to a private `\0`-prefixed id that no
//! file on disk can collide with. Loading that id yields a module exporting a
//! `Map` component with the configured defaults merged beneath caller props,
//! and the devtools panel mounted beside it when `debug` is on.

mod devtools;

use crate::codegen::element::Element;
use crate::codegen::{Expr, Function, Import, ModuleBuilder, Node, Props, Stmt};
use crate::options::PluginOptions;
use crate::MAPS_PACKAGE;
use serde_json::Value;

pub use devtools::PANEL_COMPONENT;

/// The specifier application code imports.
pub const VIRTUAL_MODULE_ID: &str = "@google-maps/map";

/// The id the specifier resolves to inside the build pipeline.
pub const RESOLVED_VIRTUAL_MODULE_ID: &str = "\0@google-maps/map";

/// Name of the component the module exports.
pub const MAP_COMPONENT: &str = "Map";

const API_KEY_PREVIEW_CHARS: usize = 5;

pub fn resolve_id(id: &str) -> Option<String> {
    (id == VIRTUAL_MODULE_ID).then(|| RESOLVED_VIRTUAL_MODULE_ID.to_string())
}

pub fn is_resolved_id(id: &str) -> bool {
    id == RESOLVED_VIRTUAL_MODULE_ID
}

/// Shows only the head of the key; the panel is visible to anyone using the page.
fn api_key_preview(api_key: Option<&str>) -> String {
    let head: String = api_key
        .unwrap_or_default()
        .chars()
        .take(API_KEY_PREVIEW_CHARS)
        .collect();
    format!("{}...****", head)
}

fn map_component() -> Function {
    let base = Element::component("GoogleMapBase").props(Props::Spread(vec!["MAP_DEFAULTS", "props"]));
    let tree = Element::component("React.Fragment")
        .child(Node::Element(base))
        .child(Node::When("DEBUG", Element::component(PANEL_COMPONENT)));

    Function::new(MAP_COMPONENT)
        .exported()
        .param("props")
        .stmt(Stmt::Return(Expr::Element(tree)))
}

/// Generates the module source. Pure function of `options`.
pub fn generate(options: &PluginOptions) -> String {
    ModuleBuilder::new()
        .import(
            Import::from("react")
                .default_as("React")
                .named("useEffect")
                .named("useRef")
                .named("useState"),
        )
        .import(
            Import::from(MAPS_PACKAGE)
                .named_as("Map", "GoogleMapBase")
                .named("useMap"),
        )
        .constant("DEBUG", Value::Bool(options.debug))
        .constant(
            "API_KEY_PREVIEW",
            Value::String(api_key_preview(options.api_key.as_deref())),
        )
        .constant("LIBRARIES", Value::String(options.libraries.join(", ")))
        .constant("MAP_DEFAULTS", Value::Object(options.map_defaults.to_object()))
        .function(devtools::devtools_panel())
        .function(map_component())
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_only_the_virtual_specifier() {
        assert_eq!(
            resolve_id("@google-maps/map").as_deref(),
            Some("\0@google-maps/map")
        );
        assert_eq!(resolve_id("@google-maps/map/extra"), None);
        assert_eq!(resolve_id("\0@google-maps/map"), None);
    }

    #[test]
    fn test_api_key_preview() {
        assert_eq!(api_key_preview(Some("AIzaTest123")), "AIzaT...****");
        assert_eq!(api_key_preview(Some("abc")), "abc...****");
        assert_eq!(api_key_preview(None), "...****");
    }

    #[test]
    fn test_map_component_merges_defaults_first() {
        let code = ModuleBuilder::new().function(map_component()).render();
        assert!(code.contains("export function Map(props) {"));
        assert!(code.contains("React.createElement(GoogleMapBase, { ...MAP_DEFAULTS, ...props })"));
        assert!(code.contains("DEBUG && React.createElement(DevtoolsPanel)"));
    }
}
