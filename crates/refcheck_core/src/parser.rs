use anyhow::{Context, Result};
use log::{debug, trace};
use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_parser::{Parser as OxcParser, ParserReturn};
use oxc_span::SourceType;
use std::{fmt, fs, path::Path, str::FromStr};

use crate::lexical::scan_imports;
use crate::types::{SpecKind, Specifier};

/// Which back end turns file text into specifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractMode {
    /// Regex scan over the raw text.
    #[default]
    Lexical,
    /// Full parse with oxc, visiting import/export declarations and load calls.
    Ast,
}

impl FromStr for ExtractMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lexical" => Ok(ExtractMode::Lexical),
            "ast" => Ok(ExtractMode::Ast),
            other => Err(format!("unknown parser '{}' (expected 'lexical' or 'ast')", other)),
        }
    }
}

impl fmt::Display for ExtractMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractMode::Lexical => write!(f, "lexical"),
            ExtractMode::Ast => write!(f, "ast"),
        }
    }
}

/// Reads `file` and extracts its module specifiers in source order.
///
/// Fails only when the file cannot be read; callers decide how to treat that.
pub fn imports_for(file: &Path, mode: ExtractMode) -> Result<Vec<Specifier>> {
    trace!("Extracting imports ({}) from: {}", mode, file.display());
    let src =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let specs = match mode {
        ExtractMode::Lexical => scan_imports(&src),
        ExtractMode::Ast => parse_imports(file, &src),
    };

    debug!("Found {} import specifiers in {}", specs.len(), file.display());
    Ok(specs)
}

/// Parses `src` as the dialect implied by `path` and collects specifiers.
///
/// Type-only imports are kept: they still have to point at a file.
pub fn parse_imports(path: &Path, src: &str) -> Vec<Specifier> {
    let st = source_type_for(path);
    let allocator = Allocator::default();
    let ParserReturn { program, .. } = OxcParser::new(&allocator, src, st).parse();

    let mut specs: Vec<Specifier> = Vec::new();
    for stmt in &program.body {
        visit_statement(stmt, &mut specs);
    }
    specs
}

fn visit_statement(stmt: &Statement, specs: &mut Vec<Specifier>) {
    match stmt {
        Statement::ImportDeclaration(decl) => {
            trace!("Found static import: '{}'", decl.source.value);
            specs.push(Specifier { request: decl.source.value.to_string(), kind: SpecKind::Static });
        }
        Statement::ExportAllDeclaration(decl) => {
            trace!("Found re-export: '{}'", decl.source.value);
            specs.push(Specifier { request: decl.source.value.to_string(), kind: SpecKind::Static });
        }
        Statement::ExportNamedDeclaration(decl) => {
            if let Some(source) = &decl.source {
                trace!("Found named re-export: '{}'", source.value);
                specs.push(Specifier { request: source.value.to_string(), kind: SpecKind::Static });
            }
            // export const load = () => require('...')
            if let Some(declaration) = &decl.declaration {
                visit_declaration(declaration, specs);
            }
        }
        Statement::ExportDefaultDeclaration(decl) => match &decl.declaration {
            ExportDefaultDeclarationKind::FunctionDeclaration(f) => visit_function(f, specs),
            ExportDefaultDeclarationKind::ClassDeclaration(c) => visit_class(c, specs),
            other => {
                if let Some(expr) = other.as_expression() {
                    extract_load_calls(expr, specs);
                }
            }
        },
        Statement::ExpressionStatement(es) => {
            extract_load_calls(&es.expression, specs);
        }
        Statement::VariableDeclaration(vd) => visit_variables(vd, specs),
        Statement::FunctionDeclaration(f) => visit_function(f, specs),
        Statement::ClassDeclaration(c) => visit_class(c, specs),
        Statement::ReturnStatement(rs) => {
            if let Some(arg) = &rs.argument {
                extract_load_calls(arg, specs);
            }
        }
        Statement::BlockStatement(block) => visit_block(&block.body, specs),
        Statement::IfStatement(is) => {
            extract_load_calls(&is.test, specs);
            visit_statement(&is.consequent, specs);
            if let Some(alternate) = &is.alternate {
                visit_statement(alternate, specs);
            }
        }
        Statement::TryStatement(ts) => {
            visit_block(&ts.block.body, specs);
            if let Some(handler) = &ts.handler {
                visit_block(&handler.body.body, specs);
            }
            if let Some(finalizer) = &ts.finalizer {
                visit_block(&finalizer.body, specs);
            }
        }
        Statement::ForStatement(fs) => visit_statement(&fs.body, specs),
        Statement::ForInStatement(fs) => visit_statement(&fs.body, specs),
        Statement::ForOfStatement(fs) => visit_statement(&fs.body, specs),
        Statement::WhileStatement(ws) => visit_statement(&ws.body, specs),
        Statement::DoWhileStatement(ds) => visit_statement(&ds.body, specs),
        Statement::LabeledStatement(ls) => visit_statement(&ls.body, specs),
        Statement::SwitchStatement(ss) => {
            for case in &ss.cases {
                visit_block(&case.consequent, specs);
            }
        }
        _ => {}
    }
}

fn visit_block(stmts: &[Statement], specs: &mut Vec<Specifier>) {
    for stmt in stmts {
        visit_statement(stmt, specs);
    }
}

fn visit_declaration(declaration: &Declaration, specs: &mut Vec<Specifier>) {
    match declaration {
        Declaration::VariableDeclaration(vd) => visit_variables(vd, specs),
        Declaration::FunctionDeclaration(f) => visit_function(f, specs),
        Declaration::ClassDeclaration(c) => visit_class(c, specs),
        _ => {}
    }
}

fn visit_variables(vd: &VariableDeclaration, specs: &mut Vec<Specifier>) {
    // const x = require('...') or const x = lazy(() => import('...'))
    for decl in &vd.declarations {
        if let Some(init) = &decl.init {
            extract_load_calls(init, specs);
        }
    }
}

fn visit_function(f: &Function, specs: &mut Vec<Specifier>) {
    if let Some(body) = &f.body {
        visit_block(&body.statements, specs);
    }
}

fn visit_class(c: &Class, specs: &mut Vec<Specifier>) {
    for element in &c.body.body {
        match element {
            ClassElement::MethodDefinition(m) => visit_function(&m.value, specs),
            ClassElement::PropertyDefinition(p) => {
                if let Some(value) = &p.value {
                    extract_load_calls(value, specs);
                }
            }
            _ => {}
        }
    }
}

fn extract_load_calls(expr: &Expression, specs: &mut Vec<Specifier>) {
    match expr {
        Expression::CallExpression(ce) => {
            if let Expression::Identifier(callee_ident) = &ce.callee
                && callee_ident.name.as_str() == "require"
                && !ce.arguments.is_empty()
                && let Some(Expression::StringLiteral(sl)) = ce.arguments[0].as_expression()
            {
                trace!("Found require() call: '{}'", sl.value);
                specs.push(Specifier { request: sl.value.to_string(), kind: SpecKind::Dynamic });
            }
            for arg in &ce.arguments {
                if let Some(arg_expr) = arg.as_expression() {
                    extract_load_calls(arg_expr, specs);
                }
            }
            extract_load_calls(&ce.callee, specs);
        }
        Expression::ImportExpression(ie) => {
            if let Expression::StringLiteral(sl) = &ie.source {
                trace!("Found dynamic import(): '{}'", sl.value);
                specs.push(Specifier { request: sl.value.to_string(), kind: SpecKind::Dynamic });
            }
        }
        Expression::ArrowFunctionExpression(af) => visit_block(&af.body.statements, specs),
        Expression::FunctionExpression(f) => visit_function(f, specs),
        // import('./x').then(...)
        Expression::StaticMemberExpression(me) => extract_load_calls(&me.object, specs),
        Expression::LogicalExpression(le) => {
            extract_load_calls(&le.left, specs);
            extract_load_calls(&le.right, specs);
        }
        Expression::SequenceExpression(se) => {
            for expr in &se.expressions {
                extract_load_calls(expr, specs);
            }
        }
        Expression::AwaitExpression(ae) => {
            extract_load_calls(&ae.argument, specs);
        }
        Expression::ArrayExpression(ae) => {
            for elem in &ae.elements {
                if let Some(expr) = elem.as_expression() {
                    extract_load_calls(expr, specs);
                }
            }
        }
        Expression::ObjectExpression(oe) => {
            for prop in &oe.properties {
                if let Some(expr) = prop.as_property() {
                    extract_load_calls(&expr.value, specs);
                }
            }
        }
        Expression::ConditionalExpression(ce) => {
            extract_load_calls(&ce.test, specs);
            extract_load_calls(&ce.consequent, specs);
            extract_load_calls(&ce.alternate, specs);
        }
        Expression::AssignmentExpression(ae) => {
            extract_load_calls(&ae.right, specs);
        }
        Expression::ParenthesizedExpression(pe) => {
            extract_load_calls(&pe.expression, specs);
        }
        _ => {}
    }
}

fn source_type_for(path: &Path) -> SourceType {
    let ext = path.extension().and_then(|e| e.to_str());

    SourceType::default()
        .with_jsx(matches!(ext, Some("tsx") | Some("jsx")))
        .with_typescript(matches!(ext, Some("ts") | Some("tsx")))
        .with_module(true)
}
