//! Entry file instrumentation.
//!
//! Wraps whatever the application's `main.tsx` / `main.jsx` renders in an
//! `<APIProvider>`. Any failure to instrument is logged and the file is left
//! as it was: a broken transform would break every build.
//!
//! - `parse`: finds the render call with the swc parser
//! - `provider`: the provider element and its import

pub mod parse;
pub mod provider;

use crate::text::strip_bom;
use crate::MAPS_PACKAGE;
use anyhow::anyhow;
use log::{debug, warn};
use parse::{find_render_calls, SourceKind};
use provider::{ProviderElement, PROVIDER_COMPONENT};
use regex::Regex;

lazy_static! {
    static ref ENTRY_FILE_RE: Regex = Regex::new(r"[\\/]main\.(tsx|jsx)$").unwrap();
}

pub fn is_entry_file(id: &str) -> bool {
    ENTRY_FILE_RE.is_match(id)
}

/// True if the file already mentions the provider or the maps package.
pub fn already_instrumented(code: &str) -> bool {
    code.contains(PROVIDER_COMPONENT) || code.contains(MAPS_PACKAGE)
}

#[derive(Debug, Clone)]
pub struct EntryTransformer {
    provider: ProviderElement,
}

impl EntryTransformer {
    pub fn new(provider: ProviderElement) -> Self {
        Self { provider }
    }

    /// Returns the rewritten source, or `None` when the file is left alone.
    pub fn transform(&self, code: &str, id: &str) -> Option<String> {
        if !is_entry_file(id) {
            return None;
        }
        if already_instrumented(code) {
            debug!("{} already references {}, skipping", id, PROVIDER_COMPONENT);
            return None;
        }

        match self.instrument(code, id) {
            Ok(Some(code)) => {
                debug!("Wrapped render call of {} in {}", id, PROVIDER_COMPONENT);
                Some(code)
            }
            Ok(None) => {
                warn!("[vite-plugin-google-maps] Could not find a .render() call in {}", id);
                None
            }
            Err(err) => {
                warn!("[vite-plugin-google-maps] Could not instrument {}: {}", id, err);
                None
            }
        }
    }

    fn instrument(&self, code: &str, id: &str) -> Result<Option<String>, anyhow::Error> {
        let source = strip_bom(code);
        let kind = SourceKind::from_id(id)
            .ok_or_else(|| anyhow!("Unsupported entry file extension: {}", id))?;

        let calls = find_render_calls(source, id, kind)?;
        let Some((call, earlier)) = calls.split_last() else {
            return Ok(None);
        };
        if !earlier.is_empty() {
            debug!(
                "{} has {} top-level render calls, only the last one is wrapped",
                id,
                calls.len()
            );
        }

        let (range, replacement) = match &call.strict_children {
            Some(children) => (
                children.clone(),
                self.provider.wrap_inline(&source[children.clone()]),
            ),
            None => {
                let argument = &source[call.argument.clone()];
                let child = if call.argument_is_jsx {
                    argument.to_string()
                } else {
                    format!("{{{}}}", argument)
                };
                (call.argument.clone(), self.provider.wrap(&child))
            }
        };

        let import = ProviderElement::import_statement();
        let mut out = String::with_capacity(import.len() + source.len() + replacement.len() + 1);
        out.push_str(&import);
        out.push('\n');
        out.push_str(&source[..range.start]);
        out.push_str(&replacement);
        out.push_str(&source[range.end..]);
        Ok(Some(out))
    }
}
