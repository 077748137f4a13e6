//! Ambient TypeScript declarations for the virtual module, so that
//! `import { Map } from "@google-maps/map"` type-checks in the application.

use crate::text::js_string;
use crate::virtual_module::{MAP_COMPONENT, VIRTUAL_MODULE_ID};
use crate::MAPS_PACKAGE;

pub fn type_declarations() -> String {
    format!(
        "declare module {module} {{\n  \
         import type {{ MapProps }} from {package};\n\n  \
         /** `Map` with the plugin's `mapDefaults` applied beneath `props`. */\n  \
         export function {component}(props: MapProps): JSX.Element;\n\
         }}\n",
        module = js_string(VIRTUAL_MODULE_ID),
        package = js_string(MAPS_PACKAGE),
        component = MAP_COMPONENT,
    )
}
