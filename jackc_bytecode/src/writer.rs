use crate::{
    instr::Instr,
    opc::{ArithOp, BinOpKind, Segment, UnOpKind},
};
use jackc_parse::symtab::SymKind;

/// Append-only log of VM instructions. The writer knows instruction formats
/// and how symbol kinds map to segments, but nothing about the grammar. Labels
/// are supplied by the caller.
#[derive(Debug, Default)]
pub struct VmWriter {
    prog: Vec<Instr>,
}

impl VmWriter {
    pub fn new() -> VmWriter {
        VmWriter::default()
    }

    pub fn write_push(&mut self, seg: Segment, idx: usize) {
        self.push_op(Instr::Push { seg, idx });
    }

    pub fn write_pop(&mut self, seg: Segment, idx: usize) {
        self.push_op(Instr::Pop { seg, idx });
    }

    /// Push the variable stored at `idx` of the segment backing `kind`.
    pub fn write_push_sym(&mut self, kind: SymKind, idx: usize) {
        self.write_push(Segment::from(kind), idx);
    }

    /// Pop into the variable stored at `idx` of the segment backing `kind`.
    pub fn write_pop_sym(&mut self, kind: SymKind, idx: usize) {
        self.write_pop(Segment::from(kind), idx);
    }

    pub fn write_arith(&mut self, op: ArithOp) {
        self.push_op(Instr::Arith(op));
    }

    /// Multiplication and division have no VM command and lower to calls into
    /// the OS `Math` class.
    pub fn write_binary(&mut self, kind: BinOpKind) {
        match kind {
            BinOpKind::Add => self.write_arith(ArithOp::Add),
            BinOpKind::Sub => self.write_arith(ArithOp::Sub),
            BinOpKind::And => self.write_arith(ArithOp::And),
            BinOpKind::Or => self.write_arith(ArithOp::Or),
            BinOpKind::Lt => self.write_arith(ArithOp::Lt),
            BinOpKind::Gt => self.write_arith(ArithOp::Gt),
            BinOpKind::Eq => self.write_arith(ArithOp::Eq),
            BinOpKind::Mul => self.write_call("Math.multiply", 2),
            BinOpKind::Div => self.write_call("Math.divide", 2),
        }
    }

    pub fn write_unary(&mut self, kind: UnOpKind) {
        match kind {
            UnOpKind::Nneg => self.write_arith(ArithOp::Neg),
            UnOpKind::Lnot => self.write_arith(ArithOp::Not),
        }
    }

    pub fn write_label(&mut self, lbl: &str) {
        self.push_op(Instr::Label(String::from(lbl)));
    }

    pub fn write_goto(&mut self, lbl: &str) {
        self.push_op(Instr::Goto(String::from(lbl)));
    }

    /// Jump to `lbl` when the value on top of the stack is false: the value is
    /// negated before the conditional jump.
    pub fn write_if(&mut self, lbl: &str) {
        self.write_arith(ArithOp::Not);
        self.push_op(Instr::IfGoto(String::from(lbl)));
    }

    pub fn write_call(&mut self, name: &str, nargs: usize) {
        self.push_op(Instr::Call {
            name: String::from(name),
            nargs,
        });
    }

    pub fn write_function(&mut self, name: &str, nlocals: usize) {
        self.push_op(Instr::Function {
            name: String::from(name),
            nlocals,
        });
    }

    pub fn write_return(&mut self) {
        self.push_op(Instr::Return);
    }

    pub fn write_comment(&mut self, text: &str) {
        self.push_op(Instr::Comment(String::from(text)));
    }

    /// Builds a string object one character at a time: `String.new` is given
    /// the length as capacity, then each char code is appended.
    pub fn write_str_const(&mut self, s: &str) {
        let codes: Vec<u32> = s.chars().map(|ch| ch as u32).collect();

        self.write_push(Segment::Constant, codes.len());
        self.write_call("String.new", 1);
        for code in codes {
            self.write_push(Segment::Constant, code as usize);
            self.write_call("String.appendChar", 2);
        }
    }

    /// Instructions written so far.
    pub fn prog(&self) -> &[Instr] {
        &self.prog
    }

    pub fn into_prog(self) -> Vec<Instr> {
        self.prog
    }

    fn push_op(&mut self, instr: Instr) {
        self.prog.push(instr);
    }
}
