//! ToyC Compiler - Code Generation Backend
//!
//! This crate handles the final phase of compilation: generating RISC-V
//! (RV32) assembly from the three-address IR. It includes:
//!
//! - Assembly instruction definitions and text rendering
//! - Naive per-function stack frame allocation
//! - Calling convention implementation (`a0`-`a7`, stack overflow args)
//! - Per-IR-opcode instruction selection

pub mod asm;
pub mod emit;
pub mod frame;

pub use asm::{AsmInst, Reg};
pub use emit::{emit_program, CodegenError};
pub use frame::{CallingConvention, Frame, FRAME_SIZE};

use toycc_common::CompilerError;
use toycc_ir::IrProgram;

/// Main entry point for code generation
pub fn generate_assembly(program: &IrProgram) -> Result<String, CompilerError> {
    emit_program(program).map_err(CompilerError::from)
}
