//! Code generator for a small float-only imperative language, targeting
//! 16-bit MASM with the x87 floating-point stack.
//!
//! The front end hands over an [`ast::Ast`] arena, the root [`ast::NodeId`]
//! and a [`symbols::SymbolTable`]; [`codegen::CodeGenerator`] turns them into
//! a data section followed by a code section.

pub mod ast;
pub mod codegen;
pub mod config;
pub mod error;
pub mod loader;
pub mod report;
pub mod symbols;

pub use ast::{Ast, NodeId, NodeKind};
pub use codegen::{CodeGenerator, CodegenOptions, ComparisonMode, LiteralStyle, ModuloRounding};
pub use error::{Error, LoadError};
pub use symbols::{DataType, SymbolEntry, SymbolTable};
