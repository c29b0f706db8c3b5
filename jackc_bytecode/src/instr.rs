use crate::opc::{ArithOp, Segment};
use std::fmt;

/// A single virtual machine instruction. Instructions carry no structure
/// beyond their operands; `Display` renders the textual form written to
/// `.vm` files.
#[derive(Clone, Debug, PartialEq)]
pub enum Instr {
    Push { seg: Segment, idx: usize },
    Pop { seg: Segment, idx: usize },
    Arith(ArithOp),
    Label(String),
    Goto(String),
    /// Jumps when the popped value is not false.
    IfGoto(String),
    Call { name: String, nargs: usize },
    Function { name: String, nlocals: usize },
    Return,
    Comment(String),
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Instr::Push { seg, idx } => write!(f, "push {} {}", seg, idx),
            Instr::Pop { seg, idx } => write!(f, "pop {} {}", seg, idx),
            Instr::Arith(op) => write!(f, "{}", op),
            Instr::Label(lbl) => write!(f, "label {}", lbl),
            Instr::Goto(lbl) => write!(f, "goto {}", lbl),
            Instr::IfGoto(lbl) => write!(f, "if-goto {}", lbl),
            Instr::Call { name, nargs } => write!(f, "call {} {}", name, nargs),
            Instr::Function { name, nlocals } => write!(f, "function {} {}", name, nlocals),
            Instr::Return => write!(f, "return"),
            Instr::Comment(text) => write!(f, "// {}", text),
        }
    }
}

/// Renders a program one instruction per line, each line newline terminated.
pub fn prog_to_string(prog: &[Instr]) -> String {
    let mut out = String::new();
    for instr in prog {
        out.push_str(&instr.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_stack_ops() {
        let push = Instr::Push {
            seg: Segment::Constant,
            idx: 7,
        };
        let pop = Instr::Pop {
            seg: Segment::This,
            idx: 2,
        };

        assert_eq!(push.to_string(), "push constant 7");
        assert_eq!(pop.to_string(), "pop this 2");
    }

    #[test]
    fn test_display_flow_ops() {
        assert_eq!(Instr::Label(String::from("L0")).to_string(), "label L0");
        assert_eq!(Instr::Goto(String::from("L0")).to_string(), "goto L0");
        assert_eq!(Instr::IfGoto(String::from("L1")).to_string(), "if-goto L1");
        assert_eq!(Instr::Return.to_string(), "return");
        assert_eq!(Instr::Arith(ArithOp::Not).to_string(), "not");
    }

    #[test]
    fn test_display_fn_ops() {
        let call = Instr::Call {
            name: String::from("Math.multiply"),
            nargs: 2,
        };
        let func = Instr::Function {
            name: String::from("Main.main"),
            nlocals: 3,
        };

        assert_eq!(call.to_string(), "call Math.multiply 2");
        assert_eq!(func.to_string(), "function Main.main 3");
        assert_eq!(
            Instr::Comment(String::from("hello")).to_string(),
            "// hello"
        );
    }

    #[test]
    fn test_prog_to_string_empty() {
        assert_eq!(prog_to_string(&[]), "");
    }

    #[test]
    fn test_prog_to_string() {
        let prog = vec![
            Instr::Push {
                seg: Segment::Constant,
                idx: 0,
            },
            Instr::Return,
        ];

        assert_eq!(prog_to_string(&prog), "push constant 0\nreturn\n");
    }
}
