//! Text helpers shared by the entry transformer and the code generator.
//!
//! Every piece of configuration that ends up inside emitted JavaScript goes
//! through [`js_literal`].

use serde_json::Value;

/// Strips the UTF-8 BOM (U+FEFF) from the beginning of text if present.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{FEFF}').unwrap_or(text)
}

/// Serializes a JSON value as a JavaScript expression literal.
///
/// JSON is already valid JavaScript; on top of that `</` is broken up so the
/// literal can sit inside an inline `<script>`, and the two line separators
/// JavaScript engines before ES2019 reject in string literals are escaped.
pub fn js_literal(value: &Value) -> String {
    escape_js_literal(&value.to_string())
}

/// Shorthand for a string literal.
pub fn js_string(s: &str) -> String {
    js_literal(&Value::String(s.to_string()))
}

fn escape_js_literal(json: &str) -> String {
    let mut result = String::with_capacity(json.len());
    let mut prev = '\0';
    for c in json.chars() {
        match c {
            '\u{2028}' => result.push_str("\\u2028"),
            '\u{2029}' => result.push_str("\\u2029"),
            // Only reachable inside string literals, where `\/` is just `/`
            '/' if prev == '<' => result.push_str("\\/"),
            c => result.push(c),
        }
        prev = c;
    }
    result
}
