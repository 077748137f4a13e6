//! The hook surface a host build tool drives, and the Google Maps plugin
//! implementing it.

use crate::entry::provider::ProviderElement;
use crate::entry::EntryTransformer;
use crate::error::PluginError;
use crate::options::{BuildContext, PluginOptions};
use crate::validate::{check_api_key, check_maps_package};
use crate::virtual_module;
use serde::Serialize;
use std::collections::BTreeMap;

pub const PLUGIN_NAME: &str = "vite-google-maps";

/// When a plugin runs relative to the host's own plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Enforce {
    Pre,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    pub code: String,
    /// Always `None`: the rewrite does not produce a source map.
    pub map: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolveConfig {
    pub alias: BTreeMap<String, String>,
}

/// Partial host configuration returned by [`BuildPlugin::config`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigPatch {
    pub resolve: ResolveConfig,
}

/// Hooks a host build pipeline calls for every module. A `None` result means
/// "not mine, ask the next plugin".
pub trait BuildPlugin {
    fn name(&self) -> &str;

    fn enforce(&self) -> Option<Enforce> {
        None
    }

    fn config(&self) -> ConfigPatch {
        ConfigPatch::default()
    }

    fn resolve_id(&self, _id: &str) -> Option<String> {
        None
    }

    fn load(&self, _id: &str) -> Option<String> {
        None
    }

    fn transform(&self, _code: &str, _id: &str) -> Option<TransformOutput> {
        None
    }
}

/// Wraps the app entry in `<APIProvider>` and serves `@google-maps/map`.
#[derive(Debug, Clone)]
pub struct GoogleMapsPlugin {
    options: PluginOptions,
    entry: EntryTransformer,
}

impl GoogleMapsPlugin {
    /// Validates `options` for the given build and builds the plugin.
    ///
    /// Fails only for a missing API key in a production build; every other
    /// problem is reported as a warning.
    pub fn new(options: PluginOptions, ctx: &BuildContext) -> Result<Self, PluginError> {
        check_api_key(&options, ctx)?;
        check_maps_package(ctx);

        let entry = EntryTransformer::new(ProviderElement::from_options(&options));
        Ok(Self { options, entry })
    }

    /// Same as [`GoogleMapsPlugin::new`] with the mode taken from `NODE_ENV`
    /// and the current directory as project root.
    pub fn from_env(options: PluginOptions) -> Result<Self, PluginError> {
        Self::new(options, &BuildContext::from_env())
    }

    pub fn options(&self) -> &PluginOptions {
        &self.options
    }
}

impl BuildPlugin for GoogleMapsPlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn enforce(&self) -> Option<Enforce> {
        Some(Enforce::Pre)
    }

    fn config(&self) -> ConfigPatch {
        ConfigPatch::default()
    }

    fn resolve_id(&self, id: &str) -> Option<String> {
        virtual_module::resolve_id(id)
    }

    fn load(&self, id: &str) -> Option<String> {
        virtual_module::is_resolved_id(id).then(|| virtual_module::generate(&self.options))
    }

    fn transform(&self, code: &str, id: &str) -> Option<TransformOutput> {
        self.entry
            .transform(code, id)
            .map(|code| TransformOutput { code, map: None })
    }
}
