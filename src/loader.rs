//! Builds an [`Ast`] and a [`SymbolTable`] from an S-expression program
//! description:
//!
//! ```text
//! (program
//!   (decls (x float) (greeting string "hola"))
//!   (seq (= x (+ 1 2))
//!        (while (< x 10) (= x (+ x 1)))))
//! ```
//!
//! Every list in the statement tree is `(tag [left [right]])`; bare atoms are
//! leaves. `seq` stands for `;` and `body` for the `cuerpo` wrapper.

use sexp::Atom::{F, I, S};
use sexp::Sexp;
use tracing::debug;

use crate::ast::{Ast, NodeId};
use crate::error::LoadError;
use crate::symbols::{DataType, SymbolEntry, SymbolTable};

#[derive(Debug, Clone, Default)]
pub struct Program {
    pub ast: Ast,
    pub symbols: SymbolTable,
    pub root: NodeId,
}

pub fn load(source: &str) -> Result<Program, LoadError> {
    let parsed = sexp::parse(source).map_err(|e| LoadError::Syntax(e.to_string()))?;

    let Sexp::List(items) = parsed else {
        return Err(LoadError::Shape("expected `(program ...)`".to_string()));
    };
    match items.first() {
        Some(Sexp::Atom(S(head))) if head == "program" => {}
        _ => return Err(LoadError::Shape("expected `(program ...)`".to_string())),
    }

    let mut program = Program::default();
    let mut rest = &items[1..];

    if let Some(Sexp::List(decls)) = rest.first() {
        if matches!(decls.first(), Some(Sexp::Atom(S(head))) if head == "decls") {
            for decl in &decls[1..] {
                program.symbols.insert(parse_decl(decl)?);
            }
            rest = &rest[1..];
        }
    }

    match rest {
        [] => {}
        [tree] => program.root = build_node(&mut program.ast, tree)?,
        _ => {
            return Err(LoadError::Shape(
                "a program holds one statement tree; join statements with `seq`".to_string(),
            ));
        }
    }

    debug!(
        nodes = program.ast.len(),
        symbols = program.symbols.len(),
        root = %program.root,
        "program loaded"
    );
    Ok(program)
}

fn parse_decl(decl: &Sexp) -> Result<SymbolEntry, LoadError> {
    let Sexp::List(parts) = decl else {
        return Err(LoadError::Shape(format!("declaration must be a list, got {}", decl)));
    };
    let (name, ty, value) = match parts.as_slice() {
        [name, ty] => (name, ty, None),
        [name, ty, value] => (name, ty, Some(value)),
        _ => {
            return Err(LoadError::Shape(format!(
                "declaration must be `(name type [value])`, got {}",
                decl
            )));
        }
    };

    let name = atom_text(name)?;
    let ty_name = atom_text(ty)?;
    let data_type: DataType = ty_name.parse().map_err(|ty| LoadError::UnknownType {
        name: name.clone(),
        ty,
    })?;

    let mut entry = SymbolEntry::new(&name).with_type(data_type);
    if let Some(value) = value {
        entry = entry.with_value(&atom_text(value)?);
    }
    Ok(entry)
}

fn build_node(ast: &mut Ast, expr: &Sexp) -> Result<NodeId, LoadError> {
    match expr {
        Sexp::Atom(_) => Ok(ast.leaf(&tag_for(&atom_text(expr)?))),
        Sexp::List(items) => {
            let Some((head, children)) = items.split_first() else {
                return Err(LoadError::Shape("empty list in statement tree".to_string()));
            };
            let tag = tag_for(&atom_text(head)?);
            match children {
                [] => Ok(ast.leaf(&tag)),
                [child] => {
                    let child = build_node(ast, child)?;
                    Ok(ast.unary(&tag, child))
                }
                [left, right] => {
                    let left = build_node(ast, left)?;
                    let right = build_node(ast, right)?;
                    Ok(ast.binary(&tag, left, right))
                }
                _ => Err(LoadError::Arity {
                    tag,
                    count: children.len(),
                }),
            }
        }
    }
}

fn tag_for(word: &str) -> String {
    match word {
        "seq" => ";".to_string(),
        "body" => "cuerpo".to_string(),
        other => other.to_string(),
    }
}

fn atom_text(expr: &Sexp) -> Result<String, LoadError> {
    match expr {
        Sexp::Atom(S(s)) => Ok(s.clone()),
        Sexp::Atom(I(n)) => Ok(n.to_string()),
        Sexp::Atom(F(f)) => Ok(f.to_string()),
        Sexp::List(_) => Err(LoadError::Shape(format!("expected an atom, got {}", expr))),
    }
}
