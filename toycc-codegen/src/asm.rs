//! RISC-V assembly instruction definitions
//!
//! This module defines the register set and instruction subset the emitter
//! uses, together with their textual (GNU assembler) rendering.

use std::fmt;

/// RISC-V registers used by the emitter
///
/// Only a handful are needed: `t0`-`t2` as scratch for operand
/// materialization, `a0`-`a7` for the calling convention, `ra`/`sp`
/// for the activation record, and `x0` for comparisons against zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg {
    /// Hard-wired zero
    Zero,
    /// Return address
    Ra,
    /// Stack pointer
    Sp,
    // Scratch
    T0,
    T1,
    T2,
    // Argument / return value
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    A7,
}

impl Reg {
    pub fn to_str(self) -> &'static str {
        match self {
            Reg::Zero => "x0",
            Reg::Ra => "ra",
            Reg::Sp => "sp",
            Reg::T0 => "t0",
            Reg::T1 => "t1",
            Reg::T2 => "t2",
            Reg::A0 => "a0",
            Reg::A1 => "a1",
            Reg::A2 => "a2",
            Reg::A3 => "a3",
            Reg::A4 => "a4",
            Reg::A5 => "a5",
            Reg::A6 => "a6",
            Reg::A7 => "a7",
        }
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// RISC-V assembly instructions
///
/// The emitter's working subset of the RV32 integer ISA plus the standard
/// pseudo-instructions the assembler expands (`li`, `mv`, `neg`, `seqz`,
/// `snez`, `sgt`, `j`, `call`, `ret`).
#[derive(Debug, Clone, PartialEq)]
pub enum AsmInst {
    // Memory
    Lw(Reg, i32, Reg), // rd = mem[base + offset]
    Sw(Reg, i32, Reg), // mem[base + offset] = rs
    Li(Reg, i32),      // rd = immediate
    Mv(Reg, Reg),      // rd = rs

    // Arithmetic
    Add(Reg, Reg, Reg),
    Sub(Reg, Reg, Reg),
    Mul(Reg, Reg, Reg),
    Div(Reg, Reg, Reg),
    Rem(Reg, Reg, Reg),
    Addi(Reg, Reg, i32),
    Neg(Reg, Reg),

    // Comparison
    Slt(Reg, Reg, Reg),  // rd = (rs < rt) ? 1 : 0
    Sgt(Reg, Reg, Reg),  // rd = (rs > rt) ? 1 : 0
    Seqz(Reg, Reg),      // rd = (rs == 0) ? 1 : 0
    Snez(Reg, Reg),      // rd = (rs != 0) ? 1 : 0
    Xori(Reg, Reg, i32),

    // Bitwise
    And(Reg, Reg, Reg),
    Or(Reg, Reg, Reg),

    // Control flow
    Beq(Reg, Reg, String),
    Bne(Reg, Reg, String),
    J(String),
    Call(String),
    Ret,

    // Assembly structure
    Label(String),
    Directive(String),
}

impl AsmInst {
    /// Whether this line is rendered flush-left (labels and directives)
    pub fn is_unindented(&self) -> bool {
        matches!(self, AsmInst::Label(_) | AsmInst::Directive(_))
    }
}

impl fmt::Display for AsmInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmInst::Lw(rd, offset, base) => write!(f, "lw {rd}, {offset}({base})"),
            AsmInst::Sw(rs, offset, base) => write!(f, "sw {rs}, {offset}({base})"),
            AsmInst::Li(rd, imm) => write!(f, "li {rd}, {imm}"),
            AsmInst::Mv(rd, rs) => write!(f, "mv {rd}, {rs}"),

            AsmInst::Add(rd, rs, rt) => write!(f, "add {rd}, {rs}, {rt}"),
            AsmInst::Sub(rd, rs, rt) => write!(f, "sub {rd}, {rs}, {rt}"),
            AsmInst::Mul(rd, rs, rt) => write!(f, "mul {rd}, {rs}, {rt}"),
            AsmInst::Div(rd, rs, rt) => write!(f, "div {rd}, {rs}, {rt}"),
            AsmInst::Rem(rd, rs, rt) => write!(f, "rem {rd}, {rs}, {rt}"),
            AsmInst::Addi(rd, rs, imm) => write!(f, "addi {rd}, {rs}, {imm}"),
            AsmInst::Neg(rd, rs) => write!(f, "neg {rd}, {rs}"),

            AsmInst::Slt(rd, rs, rt) => write!(f, "slt {rd}, {rs}, {rt}"),
            AsmInst::Sgt(rd, rs, rt) => write!(f, "sgt {rd}, {rs}, {rt}"),
            AsmInst::Seqz(rd, rs) => write!(f, "seqz {rd}, {rs}"),
            AsmInst::Snez(rd, rs) => write!(f, "snez {rd}, {rs}"),
            AsmInst::Xori(rd, rs, imm) => write!(f, "xori {rd}, {rs}, {imm}"),

            AsmInst::And(rd, rs, rt) => write!(f, "and {rd}, {rs}, {rt}"),
            AsmInst::Or(rd, rs, rt) => write!(f, "or {rd}, {rs}, {rt}"),

            AsmInst::Beq(rs, rt, label) => write!(f, "beq {rs}, {rt}, {label}"),
            AsmInst::Bne(rs, rt, label) => write!(f, "bne {rs}, {rt}, {label}"),
            AsmInst::J(label) => write!(f, "j {label}"),
            AsmInst::Call(label) => write!(f, "call {label}"),
            AsmInst::Ret => write!(f, "ret"),

            AsmInst::Label(label) => write!(f, "{label}:"),
            AsmInst::Directive(text) => write!(f, "{text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_display() {
        assert_eq!(Reg::Zero.to_str(), "x0");
        assert_eq!(Reg::Sp.to_str(), "sp");
        assert_eq!(Reg::T0.to_str(), "t0");
        assert_eq!(Reg::A7.to_str(), "a7");
    }

    #[test]
    fn test_instruction_display() {
        assert_eq!(format!("{}", AsmInst::Lw(Reg::T0, 8, Reg::Sp)), "lw t0, 8(sp)");
        assert_eq!(
            format!("{}", AsmInst::Sw(Reg::A0, -1600, Reg::Sp)),
            "sw a0, -1600(sp)"
        );
        assert_eq!(format!("{}", AsmInst::Li(Reg::A0, 42)), "li a0, 42");
        assert_eq!(
            format!("{}", AsmInst::Bne(Reg::T0, Reg::Zero, "L1".to_string())),
            "bne t0, x0, L1"
        );
        assert_eq!(format!("{}", AsmInst::Label("main".to_string())), "main:");
        assert_eq!(format!("{}", AsmInst::Ret), "ret");
    }

    #[test]
    fn test_indentation_classes() {
        assert!(AsmInst::Label("main".to_string()).is_unindented());
        assert!(AsmInst::Directive(".text".to_string()).is_unindented());
        assert!(!AsmInst::Ret.is_unindented());
    }
}
