//! Locating the render call of an entry file.
//!
//! The file is parsed with the swc parser that ships with deno_ast and only
//! the top-level statements are inspected, so render calls inside strings,
//! comments or nested functions are never matched.

use std::ops::Range;

use anyhow::{anyhow, bail};
use deno_ast::swc::ast::{
    CallExpr, Callee, EsVersion, Expr, JSXElementName, MemberProp, ModuleItem, Stmt,
};
use deno_ast::swc::common::comments::SingleThreadedComments;
use deno_ast::swc::common::sync::Lrc;
use deno_ast::swc::common::{BytePos, FileName, Globals, SourceMap, Spanned, GLOBALS};
use deno_ast::swc::parser::lexer::Lexer;
use deno_ast::swc::parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

/// Wrapper element whose children get the provider instead of the wrapper itself.
pub const STRICT_MODE: &str = "StrictMode";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Tsx,
    Jsx,
}

impl SourceKind {
    pub fn from_id(id: &str) -> Option<Self> {
        if id.ends_with(".tsx") {
            Some(SourceKind::Tsx)
        } else if id.ends_with(".jsx") {
            Some(SourceKind::Jsx)
        } else {
            None
        }
    }

    fn syntax(self) -> Syntax {
        match self {
            SourceKind::Tsx => Syntax::Typescript(TsSyntax {
                tsx: true,
                decorators: true,
                dts: false,
                no_early_errors: true,
                disallow_ambiguous_jsx_like: false,
            }),
            SourceKind::Jsx => Syntax::Es(EsSyntax {
                jsx: true,
                ..Default::default()
            }),
        }
    }
}

/// A top-level `<expr>.render(<argument>, ...)` statement. Ranges are byte
/// offsets into the parsed source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCall {
    /// The first argument, without surrounding parentheses.
    pub argument: Range<usize>,
    /// Whether the argument is a JSX element or fragment.
    pub argument_is_jsx: bool,
    /// Set when the argument is `<StrictMode>...</StrictMode>`: the text
    /// between the opening and the closing tag.
    pub strict_children: Option<Range<usize>>,
}

/// Returns every top-level render call in source order.
pub fn find_render_calls(
    source: &str,
    id: &str,
    kind: SourceKind,
) -> Result<Vec<RenderCall>, anyhow::Error> {
    let globals = Globals::new();

    GLOBALS.set(&globals, || {
        let source_map = Lrc::new(SourceMap::default());
        let source_file = source_map.new_source_file(
            FileName::Custom(id.to_string()).into(),
            source.to_string(),
        );
        let start = source_file.start_pos;
        let offset = |pos: BytePos| (pos.0 - start.0) as usize;

        let comments = SingleThreadedComments::default();
        let input = StringInput::from(&*source_file);
        let lexer = Lexer::new(kind.syntax(), EsVersion::EsNext, input, Some(&comments));
        let mut parser = Parser::new_from(lexer);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Parse error: {:?}", e))?;
        let errors = parser.take_errors();
        if let Some(first) = errors.first() {
            bail!("Parse error: {:?} ({} total)", first, errors.len());
        }

        let calls: Vec<RenderCall> = module
            .body
            .iter()
            .filter_map(|item| match item {
                ModuleItem::Stmt(Stmt::Expr(stmt)) => as_render_call(&stmt.expr),
                _ => None,
            })
            .filter_map(|call| {
                let first = call.args.first().filter(|arg| arg.spread.is_none())?;
                let argument = unparen(&first.expr);
                let span = argument.span();

                let strict_children = match argument {
                    Expr::JSXElement(element) if is_strict_mode(&element.opening.name) => element
                        .closing
                        .as_ref()
                        .map(|closing| offset(element.opening.span.hi)..offset(closing.span.lo)),
                    _ => None,
                };

                Some(RenderCall {
                    argument: offset(span.lo)..offset(span.hi),
                    argument_is_jsx: matches!(argument, Expr::JSXElement(_) | Expr::JSXFragment(_)),
                    strict_children,
                })
            })
            .collect();

        Ok(calls)
    })
}

fn unparen(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unparen(&paren.expr),
        other => other,
    }
}

fn as_render_call(expr: &Expr) -> Option<&CallExpr> {
    let Expr::Call(call) = unparen(expr) else {
        return None;
    };
    let Callee::Expr(callee) = &call.callee else {
        return None;
    };
    let Expr::Member(member) = unparen(callee) else {
        return None;
    };
    match &member.prop {
        MemberProp::Ident(prop) if &*prop.sym == "render" => Some(call),
        _ => None,
    }
}

fn is_strict_mode(name: &JSXElementName) -> bool {
    match name {
        JSXElementName::Ident(ident) => &*ident.sym == STRICT_MODE,
        JSXElementName::JSXMemberExpr(member) => &*member.prop.sym == STRICT_MODE,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calls(source: &str) -> Vec<RenderCall> {
        find_render_calls(source, "/src/main.tsx", SourceKind::Tsx).unwrap()
    }

    #[test]
    fn test_source_kind_from_id() {
        assert_eq!(SourceKind::from_id("/a/main.tsx"), Some(SourceKind::Tsx));
        assert_eq!(SourceKind::from_id("/a/main.jsx"), Some(SourceKind::Jsx));
        assert_eq!(SourceKind::from_id("/a/main.ts"), None);
    }

    #[test]
    fn test_finds_create_root_render() {
        let src = "import App from './App';\ncreateRoot(document.getElementById('root')!).render(<App />);\n";
        let found = calls(src);
        assert_eq!(found.len(), 1);
        assert_eq!(&src[found[0].argument.clone()], "<App />");
        assert!(found[0].argument_is_jsx);
        assert_eq!(found[0].strict_children, None);
    }

    #[test]
    fn test_strict_mode_children_range() {
        let src = "ReactDOM.createRoot(root).render(\n  <StrictMode>\n    <App />\n  </StrictMode>,\n);\n";
        let found = calls(src);
        let children = found[0].strict_children.clone().unwrap();
        assert_eq!(&src[children], "\n    <App />\n  ");
    }

    #[test]
    fn test_react_strict_mode_member_name() {
        let src = "root.render(<React.StrictMode><App /></React.StrictMode>);";
        let found = calls(src);
        assert_eq!(&src[found[0].strict_children.clone().unwrap()], "<App />");
    }

    #[test]
    fn test_parenthesized_argument_is_unwrapped() {
        let src = "root.render((\n  <App />\n));";
        let found = calls(src);
        assert_eq!(&src[found[0].argument.clone()], "<App />");
    }

    #[test]
    fn test_only_first_argument_of_legacy_render() {
        let src = "ReactDOM.render(<App />, document.getElementById('root'));";
        let found = calls(src);
        assert_eq!(&src[found[0].argument.clone()], "<App />");
    }

    #[test]
    fn test_nested_and_textual_renders_are_ignored() {
        let src = "const s = 'x.render(<A />)';\nfunction f() { root.render(<B />); }\n// root.render(<C />)\n";
        assert!(calls(src).is_empty());
    }

    #[test]
    fn test_multiple_top_level_renders_in_order() {
        let src = "a.render(<A />);\nb.render(<B />);\n";
        let found = calls(src);
        assert_eq!(found.len(), 2);
        assert_eq!(&src[found[1].argument.clone()], "<B />");
    }

    #[test]
    fn test_non_jsx_argument() {
        let src = "root.render(React.createElement(App));";
        let found = calls(src);
        assert!(!found[0].argument_is_jsx);
        assert_eq!(&src[found[0].argument.clone()], "React.createElement(App)");
    }

    #[test]
    fn test_jsx_syntax_for_jsx_files() {
        let src = "root.render(<App />);";
        let found = find_render_calls(src, "/src/main.jsx", SourceKind::Jsx).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_malformed_source_is_an_error() {
        assert!(find_render_calls("root.render(<App>);", "/src/main.tsx", SourceKind::Tsx).is_err());
    }
}
