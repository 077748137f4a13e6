//! `React.createElement` trees.
//!
//! Static code (tags, prop names, expressions) is `&'static str`. Values that
//! come from configuration can only enter as [`PropValue::Literal`] or
//! [`Node::Text`], both of which are serialized by [`js_literal`].

use crate::text::{js_literal, js_string};
use serde_json::Value;

use super::INDENT;

#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    /// A DOM element such as `div`, emitted as a string.
    Intrinsic(&'static str),
    /// A component reference such as `React.Fragment`, emitted as-is.
    Component(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Literal(Value),
    Expr(&'static str),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Props {
    #[default]
    Null,
    Object(Vec<(&'static str, PropValue)>),
    /// `{ ...a, ...b }`, later entries win.
    Spread(Vec<&'static str>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Expr(&'static str),
    /// `cond && <element>`
    When(&'static str, Element),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub props: Props,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            props: Props::Null,
            children: Vec::new(),
        }
    }

    pub fn intrinsic(tag: &'static str) -> Self {
        Self::new(Tag::Intrinsic(tag))
    }

    pub fn component(name: &'static str) -> Self {
        Self::new(Tag::Component(name))
    }

    pub fn props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn style(self, style: Value) -> Self {
        self.prop("style", PropValue::Literal(style))
    }

    /// Adds one entry to an object prop list, converting `Null` if needed.
    pub fn prop(mut self, name: &'static str, value: PropValue) -> Self {
        match &mut self.props {
            Props::Object(entries) => entries.push((name, value)),
            _ => self.props = Props::Object(vec![(name, value)]),
        }
        self
    }

    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn expr(self, expr: &'static str) -> Self {
        self.child(Node::Expr(expr))
    }

    /// Renders the call expression. `depth` is the indentation level of the
    /// line the expression starts on.
    pub fn render(&self, depth: usize) -> String {
        let mut args = vec![self.tag.render(), self.props.render()];
        if self.children.is_empty() {
            if matches!(self.props, Props::Null) {
                args.pop();
            }
            return format!("React.createElement({})", args.join(", "));
        }
        args.extend(self.children.iter().map(|child| child.render(depth + 1)));

        let inner = INDENT.repeat(depth + 1);
        let outer = INDENT.repeat(depth);
        format!(
            "React.createElement(\n{inner}{}\n{outer})",
            args.join(&format!(",\n{inner}"))
        )
    }
}

impl Tag {
    fn render(&self) -> String {
        match self {
            Tag::Intrinsic(name) => js_string(name),
            Tag::Component(name) => name.to_string(),
        }
    }
}

impl Props {
    fn render(&self) -> String {
        match self {
            Props::Null => "null".to_string(),
            Props::Object(entries) => {
                let fields: Vec<String> = entries
                    .iter()
                    .map(|(key, value)| format!("{}: {}", property_key(key), value.render()))
                    .collect();
                format!("{{ {} }}", fields.join(", "))
            }
            Props::Spread(sources) => {
                let fields: Vec<String> = sources.iter().map(|s| format!("...{}", s)).collect();
                format!("{{ {} }}", fields.join(", "))
            }
        }
    }
}

impl PropValue {
    fn render(&self) -> String {
        match self {
            PropValue::Literal(value) => js_literal(value),
            PropValue::Expr(expr) => expr.to_string(),
        }
    }
}

impl Node {
    fn render(&self, depth: usize) -> String {
        match self {
            Node::Element(element) => element.render(depth),
            Node::Text(text) => js_string(text),
            Node::Expr(expr) => expr.to_string(),
            Node::When(cond, element) => format!("{} && {}", cond, element.render(depth)),
        }
    }
}

fn property_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_ident = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if is_ident {
        key.to_string()
    } else {
        js_string(key)
    }
}
