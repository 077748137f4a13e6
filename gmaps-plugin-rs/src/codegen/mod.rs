//! A small builder for the ES modules the plugin serves.
//!
//! The generated code is assembled from typed pieces (imports, constant
//! bindings, functions, element trees) instead of one big format string.
//! Configuration only reaches the output through [`crate::text::js_literal`].
//!
//! - `element`: `React.createElement` trees

pub mod element;

use crate::text::{js_literal, js_string};
use element::Element;
use serde_json::Value;

pub use element::{Node, PropValue, Props, Tag};

pub(crate) const INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub default: Option<&'static str>,
    /// `(imported, local alias)`
    pub named: Vec<(&'static str, Option<&'static str>)>,
    pub from: &'static str,
}

impl Import {
    pub fn from(source: &'static str) -> Self {
        Self {
            default: None,
            named: Vec::new(),
            from: source,
        }
    }

    pub fn default_as(mut self, local: &'static str) -> Self {
        self.default = Some(local);
        self
    }

    pub fn named(mut self, name: &'static str) -> Self {
        self.named.push((name, None));
        self
    }

    pub fn named_as(mut self, name: &'static str, alias: &'static str) -> Self {
        self.named.push((name, Some(alias)));
        self
    }

    fn render(&self) -> String {
        let mut clauses = Vec::new();
        if let Some(default) = self.default {
            clauses.push(default.to_string());
        }
        if !self.named.is_empty() {
            let names: Vec<String> = self
                .named
                .iter()
                .map(|(name, alias)| match alias {
                    Some(alias) => format!("{} as {}", name, alias),
                    None => name.to_string(),
                })
                .collect();
            clauses.push(format!("{{ {} }}", names.join(", ")));
        }
        if clauses.is_empty() {
            format!("import {};", js_string(self.from))
        } else {
            format!("import {} from {};", clauses.join(", "), js_string(self.from))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Ident(&'static str),
    Element(Element),
}

impl Expr {
    fn render(&self, depth: usize) -> String {
        match self {
            Expr::Literal(value) => js_literal(value),
            Expr::Ident(ident) => ident.to_string(),
            Expr::Element(element) => element.render(depth),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Static code, written flush-left and re-indented to the enclosing block.
    Code(&'static str),
    Return(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: &'static str,
    pub params: Vec<&'static str>,
    pub exported: bool,
    pub body: Vec<Stmt>,
}

impl Function {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            params: Vec::new(),
            exported: false,
            body: Vec::new(),
        }
    }

    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }

    pub fn param(mut self, param: &'static str) -> Self {
        self.params.push(param);
        self
    }

    pub fn stmt(mut self, stmt: Stmt) -> Self {
        self.body.push(stmt);
        self
    }

    fn write(&self, w: &mut CodeWriter) {
        let export = if self.exported { "export " } else { "" };
        w.line(&format!(
            "{}function {}({}) {{",
            export,
            self.name,
            self.params.join(", ")
        ));
        w.indent();
        for (i, stmt) in self.body.iter().enumerate() {
            if i > 0 {
                w.blank();
            }
            match stmt {
                Stmt::Code(code) => w.code(code),
                Stmt::Return(expr) => {
                    let rendered = expr.render(w.depth);
                    w.line(&format!("return {};", rendered));
                }
            }
        }
        w.dedent();
        w.line("}");
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Item {
    Const(&'static str, Value),
    Function(Function),
}

/// Collects the parts of a module and renders them in a fixed layout:
/// imports, constants, then functions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleBuilder {
    imports: Vec<Import>,
    items: Vec<Item>,
}

impl ModuleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }

    /// `const <name> = <literal>;`
    pub fn constant(mut self, name: &'static str, value: Value) -> Self {
        self.items.push(Item::Const(name, value));
        self
    }

    pub fn function(mut self, function: Function) -> Self {
        self.items.push(Item::Function(function));
        self
    }

    pub fn render(&self) -> String {
        let mut w = CodeWriter::default();
        for import in &self.imports {
            w.line(&import.render());
        }

        let mut prev_was_const = false;
        for item in &self.items {
            match item {
                Item::Const(name, value) => {
                    if !prev_was_const {
                        w.blank();
                    }
                    w.line(&format!("const {} = {};", name, js_literal(value)));
                    prev_was_const = true;
                }
                Item::Function(function) => {
                    w.blank();
                    function.write(&mut w);
                    prev_was_const = false;
                }
            }
        }
        w.finish()
    }
}

#[derive(Debug, Default)]
struct CodeWriter {
    buf: String,
    depth: usize,
}

impl CodeWriter {
    fn line(&mut self, line: &str) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
        self.buf.push_str(line);
        self.buf.push('\n');
    }

    fn blank(&mut self) {
        self.buf.push('\n');
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Writes a static block line by line at the current depth.
    fn code(&mut self, code: &str) {
        for line in code.trim_matches('\n').lines() {
            if line.trim().is_empty() {
                self.blank();
            } else {
                self.line(line);
            }
        }
    }

    fn finish(self) -> String {
        self.buf
    }
}
