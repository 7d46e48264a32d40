//! IR → RISC-V assembly emission
//!
//! A single pass over each function's instruction list. Every operand
//! lives in a stack slot; instructions load their operands into scratch
//! registers, compute, and store the result back. No register allocation.

use crate::asm::{AsmInst, Reg};
use crate::frame::{CallingConvention, Frame, FRAME_SIZE};
use log::debug;
use thiserror::Error;
use toycc_frontend::{BinaryOp, UnaryOp};
use toycc_ir::{Instruction, IrFunction, IrProgram, Operand};

/// Code generation errors
///
/// All of these are breaches of inter-stage invariants: they indicate a
/// bug in the lowering pass, not a problem with the source program.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodegenError {
    #[error("constant operand used as a destination: {inst}")]
    ConstantDestination { inst: String },

    #[error("instruction reserved for a future memory model: {inst}")]
    ReservedInstruction { inst: String },
}

impl From<CodegenError> for toycc_common::CompilerError {
    fn from(err: CodegenError) -> Self {
        toycc_common::CompilerError::codegen_error(err.to_string())
    }
}

/// Emit a whole program as assembly text
pub fn emit_program(program: &IrProgram) -> Result<String, CodegenError> {
    let mut asm = vec![
        AsmInst::Directive(".text".to_string()),
        AsmInst::Directive(".global main".to_string()),
    ];

    for func in &program.functions {
        let mut emitter = FunctionEmitter::new();
        emitter.emit_function(func)?;
        asm.extend(emitter.asm);
    }

    Ok(render(&asm))
}

/// Render the instruction list as assembler text
fn render(asm: &[AsmInst]) -> String {
    let mut text = String::new();
    for inst in asm {
        if inst.is_unindented() {
            text.push_str(&format!("{inst}\n"));
        } else {
            text.push_str(&format!("    {inst}\n"));
        }
    }
    text
}

/// Per-function emission state
struct FunctionEmitter {
    frame: Frame,
    asm: Vec<AsmInst>,
}

impl FunctionEmitter {
    fn new() -> Self {
        Self {
            frame: Frame::new(),
            asm: Vec::new(),
        }
    }

    fn push(&mut self, inst: AsmInst) {
        self.asm.push(inst);
    }

    /// Emit one function: prologue, body, and an implicit epilogue if the
    /// IR does not end with a `Return`
    fn emit_function(&mut self, func: &IrFunction) -> Result<(), CodegenError> {
        debug!("emitting function '{}'", func.name);

        self.push(AsmInst::Label(func.name.clone()));
        self.push(AsmInst::Addi(Reg::Sp, Reg::Sp, -FRAME_SIZE));

        // Stack parameters first: their incoming area starts at offset 0,
        // which is also the first allocatable slot. Copying them before
        // anything else writes to the frame keeps the two uses of that
        // address from clashing.
        for (i, param) in func.parameters.iter().enumerate() {
            if i >= CallingConvention::MAX_REG_ARGS {
                let incoming = CallingConvention::incoming_stack_offset(i);
                self.push(AsmInst::Lw(Reg::T0, incoming, Reg::Sp));
                let slot = self.frame.slot(param);
                self.push(AsmInst::Sw(Reg::T0, slot, Reg::Sp));
            }
        }

        for (i, param) in func.parameters.iter().enumerate() {
            if i < CallingConvention::MAX_REG_ARGS {
                let slot = self.frame.slot(param);
                self.push(AsmInst::Sw(CallingConvention::ARG_REGS[i], slot, Reg::Sp));
            }
        }

        // Save the return address after parameter setup
        let ra_slot = self.frame.slot("ra");
        self.push(AsmInst::Sw(Reg::Ra, ra_slot, Reg::Sp));

        for inst in &func.instructions {
            self.emit_instruction(inst)?;
        }

        if !matches!(func.instructions.last(), Some(Instruction::Return(_))) {
            self.emit_epilogue();
        }

        Ok(())
    }

    /// Restore `ra`, release the frame, return
    fn emit_epilogue(&mut self) {
        let ra_slot = self.frame.slot("ra");
        self.push(AsmInst::Lw(Reg::Ra, ra_slot, Reg::Sp));
        self.push(AsmInst::Addi(Reg::Sp, Reg::Sp, FRAME_SIZE));
        self.push(AsmInst::Ret);
    }

    /// The frame key of an operand used as storage
    fn operand_key(&self, operand: &Operand, inst: &Instruction) -> Result<String, CodegenError> {
        match operand {
            Operand::Name(name) => Ok(name.clone()),
            Operand::Temp(id) => Ok(format!("t{id}")),
            Operand::Const(_) => Err(CodegenError::ConstantDestination {
                inst: inst.to_string(),
            }),
        }
    }

    /// Materialize an operand's value into a register
    fn load_operand(&mut self, operand: &Operand, reg: Reg) {
        match operand {
            Operand::Const(value) => self.push(AsmInst::Li(reg, *value)),
            Operand::Name(name) => {
                let slot = self.frame.slot(name);
                self.push(AsmInst::Lw(reg, slot, Reg::Sp));
            }
            Operand::Temp(id) => {
                let slot = self.frame.slot(&format!("t{id}"));
                self.push(AsmInst::Lw(reg, slot, Reg::Sp));
            }
        }
    }

    /// Store a register into an operand's slot
    fn store_result(
        &mut self,
        dest: &Operand,
        reg: Reg,
        inst: &Instruction,
    ) -> Result<(), CodegenError> {
        let key = self.operand_key(dest, inst)?;
        let slot = self.frame.slot(&key);
        self.push(AsmInst::Sw(reg, slot, Reg::Sp));
        Ok(())
    }

    /// Translate one IR instruction
    fn emit_instruction(&mut self, inst: &Instruction) -> Result<(), CodegenError> {
        match inst {
            Instruction::Binary { dest, op, lhs, rhs } => {
                self.load_operand(lhs, Reg::T1);
                self.load_operand(rhs, Reg::T2);
                self.emit_binary_op(*op);
                self.store_result(dest, Reg::T0, inst)
            }

            Instruction::Unary { dest, op, src } => {
                self.load_operand(src, Reg::T1);
                match op {
                    UnaryOp::Neg => self.push(AsmInst::Neg(Reg::T0, Reg::T1)),
                    UnaryOp::Not => self.push(AsmInst::Seqz(Reg::T0, Reg::T1)),
                    UnaryOp::Plus => self.push(AsmInst::Mv(Reg::T0, Reg::T1)),
                }
                self.store_result(dest, Reg::T0, inst)
            }

            Instruction::Move { dest, src } => {
                self.load_operand(src, Reg::T0);
                self.store_result(dest, Reg::T0, inst)
            }

            Instruction::Label(label) => {
                self.push(AsmInst::Label(label.clone()));
                Ok(())
            }

            Instruction::Jump(label) => {
                self.push(AsmInst::J(label.clone()));
                Ok(())
            }

            Instruction::CJump {
                condition,
                true_label,
                false_label,
            } => {
                self.load_operand(condition, Reg::T0);
                self.push(AsmInst::Bne(Reg::T0, Reg::Zero, true_label.clone()));
                self.push(AsmInst::J(false_label.clone()));
                Ok(())
            }

            Instruction::Call {
                dest,
                function,
                args,
            } => {
                for (i, arg) in args.iter().enumerate() {
                    if i < CallingConvention::MAX_REG_ARGS {
                        self.load_operand(arg, CallingConvention::ARG_REGS[i]);
                    } else {
                        self.load_operand(arg, Reg::T0);
                        let offset = CallingConvention::outgoing_stack_offset(i);
                        self.push(AsmInst::Sw(Reg::T0, offset, Reg::Sp));
                    }
                }

                self.push(AsmInst::Call(function.clone()));

                if let Some(dest) = dest {
                    self.store_result(dest, Reg::A0, inst)?;
                }
                Ok(())
            }

            Instruction::Return(value) => {
                if let Some(value) = value {
                    self.load_operand(value, Reg::A0);
                }
                self.emit_epilogue();
                Ok(())
            }

            Instruction::Load { .. } | Instruction::Store { .. } => {
                Err(CodegenError::ReservedInstruction {
                    inst: inst.to_string(),
                })
            }
        }
    }

    /// Compute `t0 = t1 op t2`
    fn emit_binary_op(&mut self, op: BinaryOp) {
        match op {
            BinaryOp::Add => self.push(AsmInst::Add(Reg::T0, Reg::T1, Reg::T2)),
            BinaryOp::Sub => self.push(AsmInst::Sub(Reg::T0, Reg::T1, Reg::T2)),
            BinaryOp::Mul => self.push(AsmInst::Mul(Reg::T0, Reg::T1, Reg::T2)),
            BinaryOp::Div => self.push(AsmInst::Div(Reg::T0, Reg::T1, Reg::T2)),
            BinaryOp::Mod => self.push(AsmInst::Rem(Reg::T0, Reg::T1, Reg::T2)),

            BinaryOp::Equal => {
                self.push(AsmInst::Sub(Reg::T0, Reg::T1, Reg::T2));
                self.push(AsmInst::Seqz(Reg::T0, Reg::T0));
            }
            BinaryOp::NotEqual => {
                self.push(AsmInst::Sub(Reg::T0, Reg::T1, Reg::T2));
                self.push(AsmInst::Snez(Reg::T0, Reg::T0));
            }
            BinaryOp::Less => self.push(AsmInst::Slt(Reg::T0, Reg::T1, Reg::T2)),
            BinaryOp::Greater => self.push(AsmInst::Sgt(Reg::T0, Reg::T1, Reg::T2)),
            BinaryOp::LessEqual => {
                self.push(AsmInst::Sgt(Reg::T0, Reg::T1, Reg::T2));
                self.push(AsmInst::Xori(Reg::T0, Reg::T0, 1));
            }
            BinaryOp::GreaterEqual => {
                self.push(AsmInst::Slt(Reg::T0, Reg::T1, Reg::T2));
                self.push(AsmInst::Xori(Reg::T0, Reg::T0, 1));
            }

            // Operands are materialized unconditionally, so the logical
            // operators reduce to their bitwise counterparts.
            BinaryOp::LogicalAnd => self.push(AsmInst::And(Reg::T0, Reg::T1, Reg::T2)),
            BinaryOp::LogicalOr => self.push(AsmInst::Or(Reg::T0, Reg::T1, Reg::T2)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toycc_frontend::Frontend;
    use toycc_ir::lower_unit;

    fn compile(source: &str) -> String {
        let unit = Frontend::analyze_source(source).unwrap();
        let program = lower_unit(&unit).unwrap();
        emit_program(&program).unwrap()
    }

    #[test]
    fn test_program_prologue() {
        let asm = compile("int main() { return 0; }");
        let lines: Vec<&str> = asm.lines().collect();

        assert_eq!(lines[0], ".text");
        assert_eq!(lines[1], ".global main");
        assert_eq!(lines[2], "main:");
    }

    #[test]
    fn test_frame_reserved_and_released() {
        let asm = compile("int main() { return 0; }");

        assert!(asm.contains("addi sp, sp, -1600"));
        assert!(asm.contains("addi sp, sp, 1600"));
        assert!(asm.trim_end().ends_with("ret"));
    }

    #[test]
    fn test_parameters_stored_from_arg_registers() {
        let asm = compile("int add(int a, int b) { return a + b; }\nint main() { return add(1, 2); }");

        // a and b get the first two slots; ra the next one
        assert!(asm.contains("sw a0, 0(sp)"));
        assert!(asm.contains("sw a1, 4(sp)"));
        assert!(asm.contains("sw ra, 8(sp)"));
    }

    #[test]
    fn test_arguments_loaded_into_arg_registers() {
        let asm = compile("int add(int a, int b) { return a + b; }\nint main() { return add(1, 2); }");

        assert!(asm.contains("li a0, 1"));
        assert!(asm.contains("li a1, 2"));
        assert!(asm.contains("call add"));
    }

    #[test]
    fn test_nine_argument_call_abi() {
        let source = r#"
int f(int a, int b, int c, int d, int e, int g, int h, int i, int j) { return j; }
int main() { return f(0, 0, 0, 0, 0, 0, 0, 0, 7); }
"#;
        let asm = compile(source);

        // Caller: the ninth argument goes below the caller's frame
        assert!(asm.contains("li t0, 7"));
        assert!(asm.contains("sw t0, -1600(sp)"));

        // Callee: the ninth parameter is copied from the incoming area
        // (offset 0) into its own slot before a0..a7 are stored, and the
        // return reads it back.
        assert!(asm.contains("lw t0, 0(sp)"));
        assert!(asm.contains("sw a7, 32(sp)"));
        assert!(asm.contains("lw a0, 0(sp)"));
    }

    #[test]
    fn test_comparison_selection() {
        let asm = compile("int main() { int a = 1; int b = 2; return a == b; }");
        assert!(asm.contains("sub t0, t1, t2"));
        assert!(asm.contains("seqz t0, t0"));

        let asm = compile("int main() { int a = 1; int b = 2; return a <= b; }");
        assert!(asm.contains("sgt t0, t1, t2"));
        assert!(asm.contains("xori t0, t0, 1"));
    }

    #[test]
    fn test_logical_ops_are_bitwise() {
        let asm = compile("int main() { int a = 1; int b = 2; return a && b; }");
        assert!(asm.contains("and t0, t1, t2"));

        let asm = compile("int main() { int a = 1; int b = 2; return a || b; }");
        assert!(asm.contains("or t0, t1, t2"));
    }

    #[test]
    fn test_cjump_selection() {
        let asm = compile("int main() { if (1) { return 1; } return 0; }");

        assert!(asm.contains("bne t0, x0, L0"));
        assert!(asm.contains("j L1"));
        assert!(asm.contains("L0:"));
        assert!(asm.contains("L1:"));
    }

    #[test]
    fn test_implicit_epilogue_for_void_function() {
        let asm = compile("void f() { } int main() { f(); return 0; }");

        // f has no Return in its IR; the epilogue is appended anyway
        let f_body: String = asm
            .lines()
            .skip_while(|line| *line != "f:")
            .take_while(|line| *line != "main:")
            .collect::<Vec<_>>()
            .join("\n");
        assert!(f_body.contains("addi sp, sp, 1600"));
        assert!(f_body.contains("ret"));
    }

    #[test]
    fn test_void_call_result_still_stored() {
        // The lowering gives void calls a destination temp; the emitter
        // stores a0 into it and nothing ever reads it.
        let asm = compile("void f() { } int main() { f(); return 0; }");
        assert!(asm.contains("call f"));
    }

    #[test]
    fn test_reserved_instructions_rejected() {
        let program = IrProgram {
            functions: vec![IrFunction {
                name: "main".to_string(),
                parameters: vec![],
                instructions: vec![Instruction::Load {
                    dest: Operand::Temp(0),
                    addr: Operand::Name("p@1".to_string()),
                }],
            }],
        };

        let result = emit_program(&program);
        assert!(matches!(
            result,
            Err(CodegenError::ReservedInstruction { .. })
        ));
    }

    #[test]
    fn test_constant_destination_rejected() {
        let program = IrProgram {
            functions: vec![IrFunction {
                name: "main".to_string(),
                parameters: vec![],
                instructions: vec![Instruction::Move {
                    dest: Operand::Const(1),
                    src: Operand::Const(2),
                }],
            }],
        };

        let result = emit_program(&program);
        assert!(matches!(
            result,
            Err(CodegenError::ConstantDestination { .. })
        ));
    }

    #[test]
    fn test_shadowed_variables_use_distinct_slots() {
        let asm = compile("int main() { int x = 1; { int x = 2; } return x; }");

        // x@1 is initialized before x@2; their stores must target
        // different offsets.
        let stores: Vec<&str> = asm
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with("sw t0"))
            .collect();
        assert!(stores.len() >= 2);
        assert_ne!(stores[0], stores[1]);
    }
}
