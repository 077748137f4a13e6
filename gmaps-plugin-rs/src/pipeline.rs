//! A minimal host for [`BuildPlugin`]s, enough to drive the hooks outside a
//! JavaScript bundler (the CLI, tests).

use crate::plugin::{BuildPlugin, ConfigPatch, Enforce, TransformOutput};
use itertools::Itertools;
use log::debug;

#[derive(Default)]
pub struct PluginPipeline {
    plugins: Vec<Box<dyn BuildPlugin>>,
}

impl PluginPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plugin. `Pre` plugins run before unordered ones, `Post`
    /// plugins after; insertion order is kept within each group.
    pub fn with_plugin(mut self, plugin: impl BuildPlugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self.plugins.sort_by_key(|p| match p.enforce() {
            Some(Enforce::Pre) => 0,
            None => 1,
            Some(Enforce::Post) => 2,
        });
        self
    }

    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Alias tables of all plugins, later plugins overriding earlier ones.
    pub fn config(&self) -> ConfigPatch {
        let mut merged = ConfigPatch::default();
        for plugin in &self.plugins {
            merged.resolve.alias.extend(plugin.config().resolve.alias);
        }
        merged
    }

    pub fn resolve_id(&self, id: &str) -> Option<String> {
        self.plugins.iter().find_map(|plugin| {
            let resolved = plugin.resolve_id(id)?;
            debug!("{} resolved {:?} to {:?}", plugin.name(), id, resolved);
            Some(resolved)
        })
    }

    pub fn load(&self, id: &str) -> Option<String> {
        self.plugins.iter().find_map(|plugin| plugin.load(id))
    }

    /// Resolves then loads `specifier`.
    pub fn import(&self, specifier: &str) -> Option<String> {
        self.load(&self.resolve_id(specifier)?)
    }

    /// Runs every plugin's transform in order, each on the previous output.
    /// Returns `None` if no plugin changed the code.
    pub fn transform(&self, code: &str, id: &str) -> Option<TransformOutput> {
        let mut current: Option<TransformOutput> = None;
        for plugin in &self.plugins {
            let input = current.as_ref().map_or(code, |out| out.code.as_str());
            if let Some(out) = plugin.transform(input, id) {
                debug!("{} transformed {}", plugin.name(), id);
                current = Some(out);
            }
        }
        current
    }
}

impl std::fmt::Debug for PluginPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PluginPipeline[{}]", self.plugin_names().iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    struct Named(&'static str, Option<Enforce>);

    impl BuildPlugin for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn enforce(&self) -> Option<Enforce> {
            self.1
        }

        fn resolve_id(&self, id: &str) -> Option<String> {
            (id == self.0).then(|| format!("\0{}", self.0))
        }

        fn transform(&self, code: &str, _id: &str) -> Option<TransformOutput> {
            Some(TransformOutput {
                code: format!("{}|{}", code, self.0),
                map: None,
            })
        }

        fn config(&self) -> ConfigPatch {
            let mut patch = ConfigPatch::default();
            patch.resolve.alias = BTreeMap::from([("shared".to_string(), self.0.to_string())]);
            patch
        }
    }

    #[test]
    fn test_enforce_ordering() {
        let pipeline = PluginPipeline::new()
            .with_plugin(Named("post", Some(Enforce::Post)))
            .with_plugin(Named("plain", None))
            .with_plugin(Named("pre", Some(Enforce::Pre)));
        assert_eq!(pipeline.plugin_names(), vec!["pre", "plain", "post"]);
    }

    #[test]
    fn test_transforms_chain() {
        let pipeline = PluginPipeline::new()
            .with_plugin(Named("a", None))
            .with_plugin(Named("b", None));
        assert_eq!(pipeline.transform("x", "id").unwrap().code, "x|a|b");
    }

    #[test]
    fn test_first_resolver_wins() {
        let pipeline = PluginPipeline::new()
            .with_plugin(Named("a", None))
            .with_plugin(Named("b", None));
        assert_eq!(pipeline.resolve_id("b").as_deref(), Some("\0b"));
        assert_eq!(pipeline.resolve_id("c"), None);
    }

    #[test]
    fn test_config_later_plugins_override() {
        let pipeline = PluginPipeline::new()
            .with_plugin(Named("a", None))
            .with_plugin(Named("b", None));
        assert_eq!(pipeline.config().resolve.alias.get("shared").map(String::as_str), Some("b"));
    }
}
