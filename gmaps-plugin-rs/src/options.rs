//! Plugin configuration.
//!
//! Options are read from camelCase JSON (the shape users already write in
//! their build config) and are immutable once the plugin is constructed.

use crate::error::PluginError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_LIBRARY: &str = "places";

fn default_libraries() -> Vec<String> {
    vec![DEFAULT_LIBRARY.to_string()]
}

/// Configuration accepted by [`crate::GoogleMapsPlugin`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginOptions {
    /// Google Maps API key. Anything that is not a JSON string is treated as
    /// missing so that construction-time validation decides what happens.
    #[serde(default, deserialize_with = "string_or_none")]
    pub api_key: Option<String>,

    /// Extra Google Maps libraries to load, in order.
    #[serde(default = "default_libraries")]
    pub libraries: Vec<String>,

    /// Mount the devtools panel next to every map.
    #[serde(default)]
    pub debug: bool,

    /// Defaults applied beneath the props of every `Map` instance.
    #[serde(default)]
    pub map_defaults: MapDefaults,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            api_key: None,
            libraries: default_libraries(),
            debug: false,
            map_defaults: MapDefaults::default(),
        }
    }
}

impl PluginOptions {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    pub fn with_libraries<I, S>(mut self, libraries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.libraries = libraries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_map_defaults(mut self, map_defaults: MapDefaults) -> Self {
        self.map_defaults = map_defaults;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, PluginError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, PluginError> {
        let json = std::fs::read_to_string(path).map_err(|source| PluginError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// The API key if it is present and not blank.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureHandling {
    Cooperative,
    Greedy,
    None,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Default options for every generated `Map` component.
///
/// Known Google Maps options are typed; anything else is carried through
/// `extra` untouched. Unset options are left out of the generated literal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapDefaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gesture_handling: Option<GestureHandling>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_center: Option<LatLng>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_zoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullscreen_control: Option<bool>,
    #[serde(rename = "disableDefaultUI", skip_serializing_if = "Option::is_none")]
    pub disable_default_ui: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_control: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_type_control: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_control: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_view_control: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate_control: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MapDefaults {
    /// The defaults as the JSON object that is embedded in generated code.
    pub fn to_object(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Layer `overrides` on top of these defaults; keys present in
    /// `overrides` win. This is the same precedence the generated component
    /// applies between `MAP_DEFAULTS` and per-instance props.
    pub fn merge(&self, overrides: &Map<String, Value>) -> Map<String, Value> {
        let mut merged = self.to_object();
        for (key, value) in overrides {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Like [`MapDefaults::merge`], re-validating the result as typed defaults.
    pub fn merged(&self, overrides: &Map<String, Value>) -> Result<MapDefaults, PluginError> {
        Ok(serde_json::from_value(Value::Object(self.merge(overrides)))?)
    }

    pub fn is_empty(&self) -> bool {
        self.to_object().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    #[default]
    Development,
    Production,
}

impl BuildMode {
    /// Reads `NODE_ENV`; only the exact value `production` selects a
    /// production build.
    pub fn from_env() -> Self {
        Self::from_node_env(std::env::var("NODE_ENV").ok().as_deref())
    }

    pub fn from_node_env(node_env: Option<&str>) -> Self {
        match node_env {
            Some("production") => BuildMode::Production,
            _ => BuildMode::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == BuildMode::Production
    }
}

impl FromStr for BuildMode {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(BuildMode::Development),
            "production" | "prod" => Ok(BuildMode::Production),
            _ => Err(PluginError::InvalidOptions(format!(
                "unknown build mode `{}`, expected `development` or `production`",
                s
            ))),
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Development => write!(f, "development"),
            BuildMode::Production => write!(f, "production"),
        }
    }
}

/// Where and how the plugin is being constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    pub mode: BuildMode,
    /// Project root, used to look for installed packages.
    pub root: PathBuf,
}

impl BuildContext {
    pub fn new(mode: BuildMode, root: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            root: root.into(),
        }
    }

    pub fn from_env() -> Self {
        let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(BuildMode::from_env(), root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_when_fields_missing() {
        let opts = PluginOptions::from_json_str(r#"{"apiKey": "abc"}"#).unwrap();
        assert_eq!(opts.api_key.as_deref(), Some("abc"));
        assert_eq!(opts.libraries, vec!["places".to_string()]);
        assert!(!opts.debug);
        assert!(opts.map_defaults.is_empty());
    }

    #[test]
    fn test_non_string_api_key_is_missing() {
        let opts = PluginOptions::from_json_str(r#"{"apiKey": 42}"#).unwrap();
        assert_eq!(opts.api_key, None);
        assert_eq!(opts.usable_api_key(), None);
    }

    #[test]
    fn test_blank_api_key_is_not_usable() {
        let opts = PluginOptions::new("   ");
        assert_eq!(opts.usable_api_key(), None);
    }

    #[test]
    fn test_map_defaults_camel_case_round_trip() {
        let defaults: MapDefaults = serde_json::from_value(json!({
            "mapId": "abc",
            "gestureHandling": "greedy",
            "defaultCenter": {"lat": 1.5, "lng": 2.5},
            "disableDefaultUI": true,
            "colorScheme": "DARK"
        }))
        .unwrap();
        assert_eq!(defaults.gesture_handling, Some(GestureHandling::Greedy));
        assert_eq!(defaults.disable_default_ui, Some(true));
        assert_eq!(defaults.extra.get("colorScheme"), Some(&json!("DARK")));

        let object = defaults.to_object();
        assert_eq!(object.get("disableDefaultUI"), Some(&json!(true)));
        assert!(!object.contains_key("defaultZoom"));
    }

    #[test]
    fn test_merge_overrides_win() {
        let defaults = MapDefaults {
            default_zoom: Some(8.0),
            map_id: Some("base".to_string()),
            ..Default::default()
        };
        let overrides = json!({"defaultZoom": 12, "tilt": 45});
        let merged = defaults.merge(overrides.as_object().unwrap());
        assert_eq!(merged.get("defaultZoom"), Some(&json!(12)));
        assert_eq!(merged.get("mapId"), Some(&json!("base")));
        assert_eq!(merged.get("tilt"), Some(&json!(45)));
    }

    #[test]
    fn test_merged_rejects_invalid_gesture_handling() {
        let overrides = json!({"gestureHandling": "sideways"});
        assert!(MapDefaults::default()
            .merged(overrides.as_object().unwrap())
            .is_err());
    }

    #[test]
    fn test_build_mode_from_node_env() {
        assert_eq!(
            BuildMode::from_node_env(Some("production")),
            BuildMode::Production
        );
        assert_eq!(
            BuildMode::from_node_env(Some("test")),
            BuildMode::Development
        );
        assert_eq!(BuildMode::from_node_env(None), BuildMode::Development);
        assert_eq!("PROD".parse::<BuildMode>().unwrap(), BuildMode::Production);
        assert!("staging".parse::<BuildMode>().is_err());
    }
}
