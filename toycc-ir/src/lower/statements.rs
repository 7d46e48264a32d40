//! Statement lowering
//!
//! Assignments and initializers lower to `Move` instructions on qualified
//! names. `if`/`while` expand into label/jump shapes; `break`/`continue`
//! jump to the targets threaded through the context's label stacks.

use crate::instructions::Instruction;
use crate::lower::LoweringContext;
use crate::values::Operand;
use toycc_common::CompilerError;
use toycc_frontend::{Statement, StatementKind};

impl LoweringContext {
    /// Lower a statement
    pub(crate) fn lower_statement(&mut self, stmt: &Statement) -> Result<(), CompilerError> {
        match &stmt.kind {
            StatementKind::Block(statements) => {
                self.push_scope();
                for stmt in statements {
                    self.lower_statement(stmt)?;
                }
                self.pop_scope();
                Ok(())
            }

            StatementKind::Empty => Ok(()),

            StatementKind::Expression(expr) => {
                // Keep the instructions, discard the result operand.
                self.lower_expression(expr)?;
                Ok(())
            }

            StatementKind::Declaration {
                name, initializer, ..
            } => {
                let qualified = self.declare(name);
                if let Some(init) = initializer {
                    let src = self.lower_expression(init)?;
                    self.emit(Instruction::Move {
                        dest: Operand::Name(qualified),
                        src,
                    });
                }
                // No instruction for the allocation itself; the back-end
                // assigns the slot on first touch.
                Ok(())
            }

            StatementKind::Assignment { name, value } => {
                let qualified = self.resolve(name)?;
                let src = self.lower_expression(value)?;
                self.emit(Instruction::Move {
                    dest: Operand::Name(qualified),
                    src,
                });
                Ok(())
            }

            StatementKind::If {
                condition,
                then_stmt,
                else_stmt,
            } => self.lower_if(condition, then_stmt, else_stmt.as_deref()),

            StatementKind::While { condition, body } => self.lower_while(condition, body),

            StatementKind::Break => {
                let Some(target) = self.break_labels.last().cloned() else {
                    return Err(CompilerError::internal_error(
                        "'break' lowered outside of a loop",
                    ));
                };
                self.emit(Instruction::Jump(target));
                Ok(())
            }

            StatementKind::Continue => {
                let Some(target) = self.continue_labels.last().cloned() else {
                    return Err(CompilerError::internal_error(
                        "'continue' lowered outside of a loop",
                    ));
                };
                self.emit(Instruction::Jump(target));
                Ok(())
            }

            StatementKind::Return(value) => {
                let operand = match value {
                    Some(expr) => Some(self.lower_expression(expr)?),
                    None => None,
                };
                self.emit(Instruction::Return(operand));
                Ok(())
            }
        }
    }

    /// Lower an if statement
    ///
    /// With an else branch:
    ///   cond; CJump c, L_t, L_f; L_t: then; Jump L_end; L_f: else; L_end:
    /// Without one, the false label terminates the statement.
    fn lower_if(
        &mut self,
        condition: &toycc_frontend::Expression,
        then_stmt: &Statement,
        else_stmt: Option<&Statement>,
    ) -> Result<(), CompilerError> {
        let condition = self.lower_expression(condition)?;
        let true_label = self.labels.new_label();
        let false_label = self.labels.new_label();

        self.emit(Instruction::CJump {
            condition,
            true_label: true_label.clone(),
            false_label: false_label.clone(),
        });
        self.emit(Instruction::Label(true_label));
        self.lower_statement(then_stmt)?;

        if let Some(else_stmt) = else_stmt {
            let end_label = self.labels.new_label();
            self.emit(Instruction::Jump(end_label.clone()));
            self.emit(Instruction::Label(false_label));
            self.lower_statement(else_stmt)?;
            self.emit(Instruction::Label(end_label));
        } else {
            self.emit(Instruction::Label(false_label));
        }

        Ok(())
    }

    /// Lower a while statement
    ///
    ///   L_start: cond; CJump c, L_body, L_end; L_body: body; Jump L_start; L_end:
    ///
    /// The body is lowered with `L_end` as the break target and `L_start`
    /// as the continue target.
    fn lower_while(
        &mut self,
        condition: &toycc_frontend::Expression,
        body: &Statement,
    ) -> Result<(), CompilerError> {
        let start_label = self.labels.new_label();
        let body_label = self.labels.new_label();
        let end_label = self.labels.new_label();

        self.emit(Instruction::Label(start_label.clone()));
        let condition = self.lower_expression(condition)?;
        self.emit(Instruction::CJump {
            condition,
            true_label: body_label.clone(),
            false_label: end_label.clone(),
        });
        self.emit(Instruction::Label(body_label));

        self.break_labels.push(end_label.clone());
        self.continue_labels.push(start_label.clone());
        let result = self.lower_statement(body);
        self.break_labels.pop();
        self.continue_labels.pop();
        result?;

        self.emit(Instruction::Jump(start_label));
        self.emit(Instruction::Label(end_label));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toycc_frontend::Frontend;

    fn lower_main(source: &str) -> Vec<Instruction> {
        let unit = Frontend::analyze_source(source).unwrap();
        let program = crate::lower::lower_unit(&unit).unwrap();
        program
            .functions
            .into_iter()
            .find(|f| f.name == "main")
            .unwrap()
            .instructions
    }

    #[test]
    fn test_if_without_else_shape() {
        let instructions = lower_main("int main() { int x = 1; if (x) { x = 2; } return x; }");

        // CJump, then-label, move, false-label; no unconditional jump
        assert!(!instructions
            .iter()
            .any(|inst| matches!(inst, Instruction::Jump(_))));

        let label_count = instructions
            .iter()
            .filter(|inst| matches!(inst, Instruction::Label(_)))
            .count();
        assert_eq!(label_count, 2);
    }

    #[test]
    fn test_if_else_shape() {
        let instructions =
            lower_main("int main() { int x = 1; if (x) { x = 2; } else { x = 3; } return x; }");

        let label_count = instructions
            .iter()
            .filter(|inst| matches!(inst, Instruction::Label(_)))
            .count();
        assert_eq!(label_count, 3);

        let jump_count = instructions
            .iter()
            .filter(|inst| matches!(inst, Instruction::Jump(_)))
            .count();
        assert_eq!(jump_count, 1);
    }

    #[test]
    fn test_break_jumps_to_loop_end() {
        let instructions = lower_main("int main() { while (1) { break; } return 0; }");

        // The loop end label is the CJump's false target; break must jump
        // to the same label.
        let false_label = instructions
            .iter()
            .find_map(|inst| match inst {
                Instruction::CJump { false_label, .. } => Some(false_label.clone()),
                _ => None,
            })
            .unwrap();

        assert!(instructions
            .iter()
            .any(|inst| matches!(inst, Instruction::Jump(label) if *label == false_label)));
    }

    #[test]
    fn test_continue_jumps_to_loop_start() {
        let instructions =
            lower_main("int main() { int i = 0; while (i < 3) { i = i + 1; continue; } return i; }");

        // The loop start label is the first label emitted; both continue
        // and the loop back-edge jump to it.
        let start_label = instructions
            .iter()
            .find_map(|inst| match inst {
                Instruction::Label(label) => Some(label.clone()),
                _ => None,
            })
            .unwrap();

        let jumps_to_start = instructions
            .iter()
            .filter(|inst| matches!(inst, Instruction::Jump(label) if *label == start_label))
            .count();
        assert_eq!(jumps_to_start, 2);
    }

    #[test]
    fn test_nested_loop_break_targets_inner_loop() {
        let source = r#"
int main() {
    int i = 0;
    while (i < 2) {
        while (1) { break; }
        i = i + 1;
    }
    return i;
}
"#;
        let instructions = lower_main(source);

        // The inner CJump's false label and the break jump must agree.
        let cjump_false_labels: Vec<_> = instructions
            .iter()
            .filter_map(|inst| match inst {
                Instruction::CJump { false_label, .. } => Some(false_label.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(cjump_false_labels.len(), 2);
        let inner_end = &cjump_false_labels[1];

        assert!(instructions
            .iter()
            .any(|inst| matches!(inst, Instruction::Jump(label) if label == inner_end)));
    }

    #[test]
    fn test_declaration_without_initializer_emits_nothing() {
        let instructions = lower_main("int main() { int x; return 0; }");
        assert_eq!(
            instructions,
            vec![Instruction::Return(Some(Operand::Const(0)))]
        );
    }

    #[test]
    fn test_void_return_lowers_without_operand() {
        let source = "void f() { return; } int main() { f(); return 0; }";
        let unit = Frontend::analyze_source(source).unwrap();
        let program = crate::lower::lower_unit(&unit).unwrap();
        let f = program.functions.iter().find(|f| f.name == "f").unwrap();

        assert_eq!(f.instructions, vec![Instruction::Return(None)]);
    }
}
