//! Read-only views of the AST and the symbol table: an indented tree dump,
//! Graphviz DOT export and a bordered symbol report.

use std::fmt::Write;

use crate::ast::{Ast, NodeId};
use crate::symbols::SymbolTable;

/// Sideways tree: right subtree above, left subtree below, one level of
/// indentation per depth.
pub fn render_tree(ast: &Ast, root: NodeId) -> String {
    let mut out = String::new();
    render_node(ast, root, 0, &mut out);
    if out.is_empty() {
        out.push_str("(empty tree)\n");
    }
    out
}

fn render_node(ast: &Ast, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = ast.get(id) else {
        return;
    };
    render_node(ast, node.right(), depth + 1, out);
    let _ = writeln!(out, "{}{} ({})", "    ".repeat(depth), node.tag(), node.id());
    render_node(ast, node.left(), depth + 1, out);
}

pub fn to_dot(ast: &Ast, root: NodeId) -> String {
    let mut out = String::new();
    out.push_str("digraph AST {\n");
    out.push_str("    node [shape=record];\n");
    dot_node(ast, root, &mut out);
    out.push_str("}\n");
    out
}

fn dot_node(ast: &Ast, id: NodeId, out: &mut String) {
    let Some(node) = ast.get(id) else {
        return;
    };
    let label = escape_record_label(&format!("{} ({})", node.tag(), node.id()));
    let _ = writeln!(out, "    n{} [label=\"{}\"];", node.id(), label);

    for child in [node.left(), node.right()] {
        if let Some(child) = ast.get(child) {
            let _ = writeln!(out, "    n{} -> n{};", node.id(), child.id());
            dot_node(ast, child.id(), out);
        }
    }
}

fn escape_record_label(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '"' | '<' | '>' | '{' | '}' | '|') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

const NAME_WIDTH: usize = 32;
const TYPE_WIDTH: usize = 12;
const VALUE_WIDTH: usize = 32;
const LENGTH_WIDTH: usize = 8;

pub fn symbol_report(symbols: &SymbolTable) -> String {
    let border = format!(
        "+{}+{}+{}+{}+",
        "-".repeat(NAME_WIDTH + 2),
        "-".repeat(TYPE_WIDTH + 2),
        "-".repeat(VALUE_WIDTH + 2),
        "-".repeat(LENGTH_WIDTH + 2)
    );

    let mut out = String::new();
    let _ = writeln!(out, "{}", border);
    let _ = writeln!(
        out,
        "| {:<nw$} | {:<tw$} | {:<vw$} | {:<lw$} |",
        "NAME",
        "TYPE",
        "VALUE",
        "LENGTH",
        nw = NAME_WIDTH,
        tw = TYPE_WIDTH,
        vw = VALUE_WIDTH,
        lw = LENGTH_WIDTH
    );
    let _ = writeln!(out, "{}", border);

    for entry in symbols.iter() {
        let ty = entry.data_type.map(|t| t.name()).unwrap_or("");
        let value = entry.value.as_deref().unwrap_or("");
        let length = entry.length.map(|l| l.to_string()).unwrap_or_default();
        let _ = writeln!(
            out,
            "| {:<nw$} | {:<tw$} | {:<vw$} | {:<lw$} |",
            entry.name,
            ty,
            value,
            length,
            nw = NAME_WIDTH,
            tw = TYPE_WIDTH,
            vw = VALUE_WIDTH,
            lw = LENGTH_WIDTH
        );
    }

    let _ = writeln!(out, "{}", border);
    out
}
