use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::{debug, info, trace, warn};

use crate::ast::{ArithOp, Ast, CmpOp, Node, NodeId, NodeKind};
use crate::error::Error;
use crate::symbols::{DataType, SymbolTable, normalize_name};

/// How a relational expression materializes its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparisonMode {
    /// `1.0` when the relation holds, `0.0` otherwise.
    #[default]
    Boolean,
    /// Legacy tail: both paths meet before the store and the result is
    /// always `0.0`.
    AlwaysZero,
}

/// Rounding used when the modulo quotient is converted to an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuloRounding {
    /// Switch the FPU to round-down for the conversion.
    #[default]
    Floor,
    /// Whatever rounding mode the FPU is running with (round-to-nearest
    /// after reset), so quotients past a half come out one too high.
    Ambient,
}

/// How numeric literal slots are initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiteralStyle {
    /// Integer-looking lexemes get a `.0` so the assembler emits a real.
    #[default]
    Real,
    Verbatim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodegenOptions {
    pub comparison: ComparisonMode,
    pub modulo: ModuloRounding,
    pub literals: LiteralStyle,
}

impl CodegenOptions {
    /// Options that reproduce the legacy output semantics.
    pub fn reference() -> Self {
        CodegenOptions {
            comparison: ComparisonMode::AlwaysZero,
            modulo: ModuloRounding::Ambient,
            literals: LiteralStyle::Verbatim,
        }
    }
}

/// Compiler-internal numeric cells declared after the user symbols.
const SCRATCH_CELLS: [&str; 4] = [
    "@c    DD 0.0",
    "@sum  DD 0.0",
    "@mult DD 1.0",
    "@aux  DD 0.0",
];

const CW_SAVE: &str = "@cwSave";
const CW_FLOOR: &str = "@cwFloor";

/// Per-run state: the two output buffers and the name counters.
#[derive(Debug, Default)]
struct Emission {
    data: String,
    code: String,
    temp_counter: usize,
    label_counter: usize,
    int_slot_counter: usize,
}

impl Emission {
    fn declare(&mut self, line: &str) {
        self.data.push_str(line);
        self.data.push('\n');
    }

    fn emit(&mut self, line: &str) {
        self.code.push_str(line);
        self.code.push('\n');
    }

    fn new_temp(&mut self) -> String {
        self.temp_counter += 1;
        let temp = format!("@tmp{}", self.temp_counter);
        self.declare(&format!("{} DD 0.0", temp));
        trace!(%temp, "allocated temporary");
        temp
    }

    fn new_literal(&mut self, value: &str) -> String {
        self.temp_counter += 1;
        let lit = format!("@lit{}", self.temp_counter);
        self.declare(&format!("{} DD {}", lit, value));
        trace!(%lit, value, "allocated literal");
        lit
    }

    fn new_int_slot(&mut self) -> String {
        self.int_slot_counter += 1;
        let slot = format!("@intSlot{}", self.int_slot_counter);
        self.declare(&format!("{} DD 0", slot));
        slot
    }

    /// One suffix per construct; its label pair shares the number.
    fn new_label_id(&mut self) -> usize {
        self.label_counter += 1;
        self.label_counter
    }

    fn finish(self) -> String {
        let mut out = self.data;
        out.push_str(&self.code);
        out
    }
}

pub struct CodeGenerator<'a> {
    ast: &'a Ast,
    symbols: &'a SymbolTable,
    options: CodegenOptions,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(ast: &'a Ast, symbols: &'a SymbolTable) -> Self {
        CodeGenerator {
            ast,
            symbols,
            options: CodegenOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CodegenOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> CodegenOptions {
        self.options
    }

    /// Compiles the statement rooted at `root` into a complete program:
    /// the data section followed by the code section.
    pub fn generate(&self, root: NodeId) -> String {
        let mut cx = Emission::default();

        self.emit_data_header(&mut cx);
        self.emit_user_vars(&mut cx);
        for cell in SCRATCH_CELLS {
            cx.declare(cell);
        }
        if self.options.modulo == ModuloRounding::Floor {
            cx.declare(&format!("{} DW 0", CW_SAVE));
            cx.declare(&format!("{} DW 0", CW_FLOOR));
        }

        self.emit_code_header(&mut cx);
        self.gen_statement(&mut cx, root);
        self.emit_footer(&mut cx);

        info!(
            temporaries = cx.temp_counter,
            labels = cx.label_counter,
            int_slots = cx.int_slot_counter,
            "code generation finished"
        );
        cx.finish()
    }

    pub fn generate_to<W: Write>(&self, root: NodeId, out: &mut W) -> Result<(), Error> {
        let asm = self.generate(root);
        out.write_all(asm.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    pub fn generate_file(&self, root: NodeId, path: &Path) -> Result<(), Error> {
        let asm = self.generate(root);
        fs::write(path, asm).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "assembly written");
        Ok(())
    }

    fn emit_data_header(&self, cx: &mut Emission) {
        cx.declare("; *************** DATA SECTION ***************");
        cx.declare(".MODEL LARGE");
        cx.declare(".386");
        cx.declare(".STACK 200h");
        cx.declare("");
        cx.declare(".DATA");
        cx.declare("");
    }

    fn emit_user_vars(&self, cx: &mut Emission) {
        for entry in self.symbols.iter() {
            let storage = match entry.data_type() {
                DataType::Integer => "DD 0",
                DataType::String => "DB 256 DUP (?)",
                DataType::Float
                | DataType::IntegerConst
                | DataType::FloatConst
                | DataType::StringConst
                | DataType::Identifier => "DD 0.0",
            };
            if entry.data_type.is_none() {
                debug!(name = %entry.name, "symbol without type declared as float");
            }
            cx.declare(&format!("{} {}", entry.name, storage));
        }
        cx.declare("");
    }

    fn emit_code_header(&self, cx: &mut Emission) {
        cx.emit("; *************** CODE SECTION ***************");
        cx.emit(".CODE");
        cx.emit("");
        cx.emit("mov AX,@DATA");
        cx.emit("mov DS,AX");
        cx.emit("mov ES,AX");
        cx.emit("");
    }

    fn emit_footer(&self, cx: &mut Emission) {
        cx.emit("");
        cx.emit("; End of program");
        cx.emit("mov ax,4c00h");
        cx.emit("int 21h");
        cx.emit("End");
    }

    fn gen_statement(&self, cx: &mut Emission, id: NodeId) {
        let Some(node) = self.ast.get(id) else {
            return;
        };

        match node.kind() {
            NodeKind::Sequence => {
                self.gen_statement(cx, node.left());
                self.gen_statement(cx, node.right());
            }
            NodeKind::If => self.gen_if(cx, node.left(), node.right()),
            NodeKind::While => self.gen_while(cx, node.left(), node.right()),
            NodeKind::Assign => self.gen_assign(cx, node.left(), node.right()),
            NodeKind::Body
            | NodeKind::Arithmetic(_)
            | NodeKind::Comparison(_)
            | NodeKind::Literal
            | NodeKind::Identifier => {
                self.gen_expr(cx, id);
            }
        }
    }

    /// Loads `temp`, compares it with zero and pops it again. `SAHF` leaves
    /// ZF set when the value was zero; the pop does not touch CPU flags.
    fn emit_zero_test(&self, cx: &mut Emission, temp: &str) {
        cx.emit(&format!("\tFLD [{}]", temp));
        cx.emit("\tFTST");
        cx.emit("\tFSTSW AX");
        cx.emit("\tSAHF");
        cx.emit("\tFSTP ST0");
    }

    fn gen_if(&self, cx: &mut Emission, cond: NodeId, body: NodeId) {
        let cond_temp = self.gen_expr(cx, cond);

        let n = cx.new_label_id();
        let else_label = format!("ELSE{}", n);
        let end_label = format!("END_IF{}", n);
        debug!(label = n, "if statement");

        cx.emit("");
        cx.emit("; --- IF statement ---");
        self.emit_zero_test(cx, &cond_temp);
        cx.emit(&format!("\tJE {}", else_label));

        match self.ast.get(body) {
            Some(wrapper) if wrapper.kind() == NodeKind::Body => {
                self.gen_statement(cx, wrapper.left());
                cx.emit(&format!("\tjmp {}", end_label));
                cx.emit(&format!("{}:", else_label));
                self.gen_statement(cx, wrapper.right());
            }
            _ => {
                self.gen_statement(cx, body);
                cx.emit(&format!("{}:", else_label));
            }
        }

        cx.emit(&format!("{}:", end_label));
    }

    fn gen_while(&self, cx: &mut Emission, cond: NodeId, body: NodeId) {
        let n = cx.new_label_id();
        let top_label = format!("WHILE{}", n);
        let end_label = format!("ENDWHILE{}", n);
        debug!(label = n, "while statement");

        cx.emit("");
        cx.emit("; --- WHILE statement ---");
        cx.emit(&format!("{}:", top_label));

        // The back jump lands above the condition so it is evaluated on
        // every pass.
        let cond_temp = self.gen_expr(cx, cond);
        self.emit_zero_test(cx, &cond_temp);
        cx.emit(&format!("\tJE {}", end_label));

        self.gen_statement(cx, body);

        cx.emit(&format!("\tjmp {}", top_label));
        cx.emit(&format!("{}:", end_label));
    }

    fn gen_assign(&self, cx: &mut Emission, target: NodeId, value: NodeId) {
        let target = match self.ast.get(target) {
            Some(node) if node.kind() == NodeKind::Identifier => node,
            Some(node) => {
                warn!(target = node.tag(), "assignment target is not an identifier, skipped");
                return;
            }
            None => {
                warn!("assignment without target, skipped");
                return;
            }
        };

        cx.emit("");
        cx.emit("; --- Assignment ---");
        let value_temp = self.gen_expr(cx, value);
        cx.emit(&format!("\tFLD  [{}]", value_temp));
        cx.emit(&format!("\tFSTP [{}]", normalize_name(target.tag())));
    }

    /// Compiles an expression and returns the temporary holding its value.
    fn gen_expr(&self, cx: &mut Emission, id: NodeId) -> String {
        let Some(node) = self.ast.get(id) else {
            return self.gen_zero(cx, "absent operand");
        };

        match node.kind() {
            NodeKind::Arithmetic(ArithOp::Rem) => self.gen_modulo(cx, node.left(), node.right()),
            NodeKind::Arithmetic(op) => self.gen_binary(cx, op, node.left(), node.right()),
            NodeKind::Comparison(op) => self.gen_comparison(cx, op, node.left(), node.right()),
            NodeKind::Literal | NodeKind::Identifier => self.gen_leaf(cx, node),
            NodeKind::Sequence
            | NodeKind::If
            | NodeKind::While
            | NodeKind::Assign
            | NodeKind::Body => {
                warn!(tag = node.tag(), id = %node.id(), "statement node used as a value");
                self.gen_zero(cx, "statement used as value")
            }
        }
    }

    fn gen_zero(&self, cx: &mut Emission, why: &str) -> String {
        let temp = cx.new_temp();
        cx.emit(&format!("; {} -> 0.0", why));
        cx.emit("\tFLDZ");
        cx.emit(&format!("\tFSTP [{}]", temp));
        temp
    }

    fn gen_leaf(&self, cx: &mut Emission, node: &Node) -> String {
        let temp = cx.new_temp();
        let lexeme = node.tag();

        if node.kind() == NodeKind::Literal {
            let lit = cx.new_literal(&self.literal_value(lexeme));
            cx.emit("");
            cx.emit(&format!("; load literal {}", lexeme));
            cx.emit(&format!("\tFLD [{}]", lit));
        } else {
            cx.emit("");
            cx.emit(&format!("; load variable {}", lexeme));
            cx.emit(&format!("\tFLD [{}]", normalize_name(lexeme)));
        }
        cx.emit(&format!("\tFSTP [{}]", temp));
        temp
    }

    fn literal_value(&self, lexeme: &str) -> String {
        let lexeme = lexeme.trim();
        match self.options.literals {
            LiteralStyle::Verbatim => lexeme.to_string(),
            LiteralStyle::Real => {
                let (mantissa, exponent) = match lexeme.find(['e', 'E']) {
                    Some(at) => lexeme.split_at(at),
                    None => (lexeme, ""),
                };
                if mantissa.contains('.') {
                    lexeme.to_string()
                } else {
                    format!("{}.0{}", mantissa, exponent)
                }
            }
        }
    }

    /// `+ - * /`: ST0 = left, ST1 = right, combine, store and pop both.
    fn gen_binary(&self, cx: &mut Emission, op: ArithOp, left: NodeId, right: NodeId) -> String {
        let left_temp = self.gen_expr(cx, left);
        let right_temp = self.gen_expr(cx, right);
        let result = cx.new_temp();

        let instr = match op {
            ArithOp::Add => "FADD",
            ArithOp::Sub => "FSUB",
            ArithOp::Mul => "FMUL",
            ArithOp::Div | ArithOp::Rem => "FDIV",
        };

        cx.emit("");
        cx.emit(&format!("; --- BinOp {} ---", op.symbol()));
        cx.emit(&format!("\tFLD [{}]", right_temp));
        cx.emit(&format!("\tFLD [{}]", left_temp));
        cx.emit(&format!("\t{} ST0, ST1", instr));
        cx.emit(&format!("\tFSTP [{}]", result));
        cx.emit("\tFSTP ST0");
        cx.emit("");
        result
    }

    /// `left - trunc(left / right) * right`, with the truncation governed by
    /// [`ModuloRounding`].
    fn gen_modulo(&self, cx: &mut Emission, left: NodeId, right: NodeId) -> String {
        cx.emit("");
        cx.emit("; --- Modulo (left % right) ---");
        let left_temp = self.gen_expr(cx, left);
        let right_temp = self.gen_expr(cx, right);

        let quotient = cx.new_temp();
        cx.emit("\t; quotient = left / right");
        cx.emit(&format!("\tFLD [{}]", right_temp));
        cx.emit(&format!("\tFLD [{}]", left_temp));
        cx.emit("\tFDIV ST0, ST1");
        cx.emit(&format!("\tFSTP [{}]", quotient));
        cx.emit("\tFSTP ST0");

        let int_slot = cx.new_int_slot();
        match self.options.modulo {
            ModuloRounding::Ambient => {
                cx.emit("\t; quotient -> int (current rounding mode)");
                cx.emit(&format!("\tFLD [{}]", quotient));
                cx.emit(&format!("\tFISTP [{}]", int_slot));
            }
            ModuloRounding::Floor => {
                cx.emit("\t; quotient -> int (round toward -inf)");
                cx.emit(&format!("\tFLD [{}]", quotient));
                cx.emit(&format!("\tFSTCW [{}]", CW_SAVE));
                cx.emit(&format!("\tMOV AX,[{}]", CW_SAVE));
                cx.emit("\tAND AX,0F3FFh");
                cx.emit("\tOR AX,0400h");
                cx.emit(&format!("\tMOV [{}],AX", CW_FLOOR));
                cx.emit(&format!("\tFLDCW [{}]", CW_FLOOR));
                cx.emit(&format!("\tFISTP [{}]", int_slot));
                cx.emit(&format!("\tFLDCW [{}]", CW_SAVE));
            }
        }

        let whole = cx.new_temp();
        cx.emit(&format!("\tFILD [{}]", int_slot));
        cx.emit(&format!("\tFSTP [{}]", whole));

        let product = cx.new_temp();
        cx.emit("");
        cx.emit("; product = whole quotient * right");
        cx.emit(&format!("\tFLD [{}]", right_temp));
        cx.emit(&format!("\tFLD [{}]", whole));
        cx.emit("\tFMUL ST0, ST1");
        cx.emit(&format!("\tFSTP [{}]", product));
        cx.emit("\tFSTP ST0");

        let result = cx.new_temp();
        cx.emit("");
        cx.emit("; mod = left - product");
        cx.emit(&format!("\tFLD [{}]", left_temp));
        cx.emit(&format!("\tFSUB [{}]", product));
        cx.emit(&format!("\tFSTP [{}]", result));
        debug!(%result, "modulo synthesized");
        result
    }

    /// Subtracts right from left, tests the difference against zero and
    /// skips the true path when the relation does not hold.
    fn gen_comparison(&self, cx: &mut Emission, op: CmpOp, left: NodeId, right: NodeId) -> String {
        let left_temp = self.gen_expr(cx, left);
        let right_temp = self.gen_expr(cx, right);
        let result = cx.new_temp();

        cx.emit("");
        cx.emit(&format!("; --- Comparison {} ---", op.symbol()));
        cx.emit(&format!("\tFLD [{}]", left_temp));
        cx.emit(&format!("\tFSUB [{}]", right_temp));
        cx.emit("\tFTST");
        cx.emit("\tFSTSW AX");
        cx.emit("\tSAHF");

        let n = cx.new_label_id();
        let true_label = format!("CMPTRUE{}", n);
        let end_label = format!("CMPEND{}", n);

        match self.options.comparison {
            ComparisonMode::Boolean => {
                // FTST reports through C0 (CF) and C3 (ZF), so the skip
                // uses the unsigned condition codes.
                let skip = match op {
                    CmpOp::Eq => "JNE",
                    CmpOp::Ne => "JE",
                    CmpOp::Lt => "JAE",
                    CmpOp::Gt => "JBE",
                    CmpOp::Le => "JA",
                    CmpOp::Ge => "JB",
                };
                cx.emit("\tFSTP ST0");
                cx.emit("\tFLDZ");
                cx.emit(&format!("\t{} {}", skip, end_label));
                cx.emit(&format!("{}:", true_label));
                cx.emit("\tFSTP ST0");
                cx.emit("\tFLD1");
                cx.emit(&format!("{}:", end_label));
                cx.emit(&format!("\tFSTP [{}]", result));
            }
            ComparisonMode::AlwaysZero => {
                let skip = match op {
                    CmpOp::Eq => "JNE",
                    CmpOp::Ne => "JE ",
                    CmpOp::Lt => "JGE",
                    CmpOp::Gt => "JLE",
                    CmpOp::Le => "JG ",
                    CmpOp::Ge => "JL ",
                };
                cx.emit(&format!("\t{} {}", skip, end_label));
                cx.emit(&format!("{}:", true_label));
                cx.emit("\tFLD1");
                cx.emit(&format!("\tJMP {}", end_label));
                cx.emit(&format!("{}:", end_label));
                cx.emit("\tFSTP ST0");
                cx.emit("\tFLDZ");
                cx.emit(&format!("\tFSTP [{}]", result));
            }
        }
        cx.emit("");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SymbolEntry;

    fn lines(asm: &str) -> Vec<&str> {
        asm.lines().collect()
    }

    fn position(asm: &str, needle: &str) -> usize {
        lines(asm)
            .iter()
            .position(|l| *l == needle)
            .unwrap_or_else(|| panic!("`{}` not found in:\n{}", needle, asm))
    }

    #[test]
    fn empty_program_has_sections_in_order() {
        let ast = Ast::new();
        let symbols = SymbolTable::new();
        let asm = CodeGenerator::new(&ast, &symbols).generate(NodeId::NONE);

        let data = position(&asm, ".DATA");
        let scratch = position(&asm, "@mult DD 1.0");
        let code = position(&asm, ".CODE");
        let exit = position(&asm, "int 21h");
        assert!(data < scratch && scratch < code && code < exit);
        assert!(asm.ends_with("End\n"));
        assert!(!asm.contains("@tmp"));
    }

    #[test]
    fn user_vars_are_sized_by_type() {
        let ast = Ast::new();
        let mut symbols = SymbolTable::new();
        symbols.insert(SymbolEntry::new("n").with_type(DataType::Integer));
        symbols.insert(SymbolEntry::new("s").with_type(DataType::String));
        symbols.insert(SymbolEntry::new("f").with_type(DataType::Float));
        symbols.insert(SymbolEntry::new("u"));
        let asm = CodeGenerator::new(&ast, &symbols).generate(NodeId::NONE);

        assert!(asm.contains("\nn DD 0\n"));
        assert!(asm.contains("\ns DB 256 DUP (?)\n"));
        assert!(asm.contains("\nf DD 0.0\n"));
        assert!(asm.contains("\nu DD 0.0\n"));
        assert!(position(&asm, "f DD 0.0") < position(&asm, "n DD 0"));
    }

    #[test]
    fn bare_leaf_statement_loads_into_a_temporary() {
        let mut ast = Ast::new();
        let root = ast.leaf("x");
        let symbols = SymbolTable::new();
        let asm = CodeGenerator::new(&ast, &symbols).generate(root);

        assert!(asm.contains("@tmp1 DD 0.0"));
        assert!(asm.contains("\tFLD [x]\n\tFSTP [@tmp1]"));
    }

    #[test]
    fn literal_styles() {
        let mut ast = Ast::new();
        let root = ast.leaf("3");
        let symbols = SymbolTable::new();

        let real = CodeGenerator::new(&ast, &symbols).generate(root);
        assert!(real.contains("@lit2 DD 3.0"));

        let verbatim = CodeGenerator::new(&ast, &symbols)
            .with_options(CodegenOptions::reference())
            .generate(root);
        assert!(verbatim.contains("@lit2 DD 3\n"));
    }

    #[test]
    fn real_literals_keep_their_exponent() {
        let symbols = SymbolTable::new();
        for (lexeme, expected) in [
            ("1e5", "@lit2 DD 1.0e5\n"),
            ("2E-3", "@lit2 DD 2.0E-3\n"),
            ("1.5e2", "@lit2 DD 1.5e2\n"),
        ] {
            let mut ast = Ast::new();
            let root = ast.leaf(lexeme);
            let asm = CodeGenerator::new(&ast, &symbols).generate(root);
            assert!(asm.contains(expected), "`{}` declared as:\n{}", lexeme, asm);
        }
    }

    #[test]
    fn assignment_to_literal_is_skipped() {
        let mut ast = Ast::new();
        let target = ast.leaf("5");
        let value = ast.leaf("1");
        let root = ast.binary("=", target, value);
        let symbols = SymbolTable::new();
        let asm = CodeGenerator::new(&ast, &symbols).generate(root);

        assert!(!asm.contains("Assignment"));
        assert!(!asm.contains("@tmp"));
    }

    #[test]
    fn statement_in_value_position_is_zero() {
        let mut ast = Ast::new();
        let x = ast.leaf("x");
        let one = ast.leaf("1");
        let assign = ast.binary("=", x, one);
        let root = ast.binary("+", assign, one);
        let symbols = SymbolTable::new();
        let asm = CodeGenerator::new(&ast, &symbols).generate(root);

        assert!(asm.contains("; statement used as value -> 0.0\n\tFLDZ\n\tFSTP [@tmp1]"));
        assert!(!asm.contains("FSTP [x]"));
    }

    #[test]
    fn floor_mode_declares_control_words_once() {
        let mut ast = Ast::new();
        let a = ast.leaf("7");
        let b = ast.leaf("3");
        let m1 = ast.binary("%", a, b);
        let m2 = ast.binary("%", a, b);
        let root = ast.binary(";", m1, m2);
        let symbols = SymbolTable::new();
        let asm = CodeGenerator::new(&ast, &symbols).generate(root);

        assert_eq!(asm.matches("@cwSave DW 0").count(), 1);
        assert_eq!(asm.matches("@cwFloor DW 0").count(), 1);
        assert_eq!(asm.matches("\tFLDCW [@cwFloor]").count(), 2);
        assert!(asm.contains("@intSlot2 DD 0"));
    }

    #[test]
    fn ambient_mode_has_no_control_word_switch() {
        let mut ast = Ast::new();
        let a = ast.leaf("7");
        let b = ast.leaf("3");
        let root = ast.binary("%", a, b);
        let symbols = SymbolTable::new();
        let options = CodegenOptions {
            modulo: ModuloRounding::Ambient,
            ..CodegenOptions::default()
        };
        let asm = CodeGenerator::new(&ast, &symbols)
            .with_options(options)
            .generate(root);

        assert!(!asm.contains("FLDCW"));
        assert!(!asm.contains("@cwSave"));
        assert!(asm.contains("\tFISTP [@intSlot1]\n\tFILD [@intSlot1]"));
    }

    #[test]
    fn generate_to_writes_the_same_text() {
        let mut ast = Ast::new();
        let root = ast.leaf("x");
        let symbols = SymbolTable::new();
        let generator = CodeGenerator::new(&ast, &symbols);

        let mut buf = Vec::new();
        generator.generate_to(root, &mut buf).expect("write to vec");
        assert_eq!(String::from_utf8(buf).expect("utf8"), generator.generate(root));
    }

    #[test]
    fn each_run_starts_counters_from_one() {
        let mut ast = Ast::new();
        let root = ast.leaf("x");
        let symbols = SymbolTable::new();
        let generator = CodeGenerator::new(&ast, &symbols);
        assert_eq!(generator.generate(root), generator.generate(root));
    }
}
