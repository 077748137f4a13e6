use gmaps_plugin_rs::entry::parse::{find_render_calls, SourceKind};
use gmaps_plugin_rs::options::LatLng;
use gmaps_plugin_rs::{
    BuildContext, BuildMode, BuildPlugin, GoogleMapsPlugin, MapDefaults, PluginOptions,
    PluginPipeline, RESOLVED_VIRTUAL_MODULE_ID, VIRTUAL_MODULE_ID,
};
use rstest::rstest;

fn plugin_with(options: PluginOptions) -> GoogleMapsPlugin {
    GoogleMapsPlugin::new(options, &BuildContext::new(BuildMode::Development, ".")).unwrap()
}

fn load(options: PluginOptions) -> String {
    let plugin = plugin_with(options);
    let id = plugin.resolve_id(VIRTUAL_MODULE_ID).unwrap();
    plugin.load(&id).unwrap()
}

#[test]
fn test_resolve_is_stable() {
    let plugin = plugin_with(PluginOptions::new("AIzaTest123"));
    for _ in 0..3 {
        assert_eq!(
            plugin.resolve_id(VIRTUAL_MODULE_ID).as_deref(),
            Some(RESOLVED_VIRTUAL_MODULE_ID)
        );
    }
    assert_eq!(plugin.resolve_id("./App"), None);
}

#[test]
fn test_load_is_deterministic_and_exports_map() {
    let plugin = plugin_with(PluginOptions::new("AIzaTest123"));
    let first = plugin.load(RESOLVED_VIRTUAL_MODULE_ID).unwrap();
    let second = plugin.load(RESOLVED_VIRTUAL_MODULE_ID).unwrap();
    assert!(!first.is_empty());
    assert_eq!(first, second);
    assert!(first.contains("export function Map(props)"));
    assert!(first.contains(
        "import { Map as GoogleMapBase, useMap } from \"@vis.gl/react-google-maps\";"
    ));
}

#[rstest]
#[case(false)]
#[case(true)]
fn test_generated_module_parses(#[case] debug: bool) {
    let defaults = MapDefaults {
        default_center: Some(LatLng { lat: 40.4168, lng: -3.7038 }),
        default_zoom: Some(12.0),
        ..Default::default()
    };
    let code = load(
        PluginOptions::new("AIzaTest123")
            .with_debug(debug)
            .with_map_defaults(defaults),
    );
    assert!(find_render_calls(&code, "virtual-map.jsx", SourceKind::Jsx).is_ok());
}

#[rstest]
#[case(false, "const DEBUG = false;")]
#[case(true, "const DEBUG = true;")]
fn test_debug_flag_is_embedded(#[case] debug: bool, #[case] expected: &str) {
    let code = load(PluginOptions::new("AIzaTest123").with_debug(debug));
    assert!(code.contains(expected));
    // the panel is always present; the flag decides whether it renders
    assert!(code.contains("function DevtoolsPanel()"));
    assert!(code.contains("DEBUG && React.createElement(DevtoolsPanel)"));
}

#[test]
fn test_defaults_sit_beneath_props() {
    let defaults = MapDefaults {
        map_id: Some("abc".to_string()),
        default_zoom: Some(12.0),
        ..Default::default()
    };
    let code = load(PluginOptions::new("AIzaTest123").with_map_defaults(defaults));
    let line = code
        .lines()
        .find(|line| line.starts_with("const MAP_DEFAULTS = "))
        .unwrap();
    assert!(line.contains(r#""defaultZoom":12.0"#));
    assert!(line.contains(r#""mapId":"abc""#));
    assert!(code.contains("{ ...MAP_DEFAULTS, ...props }"));
}

#[test]
fn test_panel_only_shows_a_key_preview() {
    let code = load(PluginOptions::new("AIzaTest123").with_libraries(["places", "drawing"]));
    assert!(code.contains(r#"const API_KEY_PREVIEW = "AIzaT...****";"#));
    assert!(code.contains(r#"const LIBRARIES = "places, drawing";"#));
    assert!(!code.contains("AIzaTest123"));
}

#[test]
fn test_hostile_library_names_stay_literals() {
    let code = load(PluginOptions::new("k").with_libraries(["\"; alert(1); //", "</script>"]));
    assert!(code.contains(r#"const LIBRARIES = "\"; alert(1); //, <\/script>";"#));
    assert!(find_render_calls(&code, "virtual-map.jsx", SourceKind::Jsx).is_ok());
}

#[test]
fn test_pipeline_serves_virtual_module() {
    let pipeline = PluginPipeline::new().with_plugin(plugin_with(PluginOptions::new("k")));
    let code = pipeline.import(VIRTUAL_MODULE_ID).unwrap();
    assert!(code.contains("export function Map(props)"));
    assert_eq!(pipeline.import("react"), None);
}
