use tracing::{debug, trace, warn};

use crate::{analyze, compile, Kind, Program, RuntimeError, SyntaxError};

/// A stack machine that compiles a mask expression once and evaluates it
/// against many input vectors.
///
/// # Examples
///
/// ```
/// use boolcalc::Evaluator;
///
/// let mut calc = Evaluator::default();
/// calc.compile("(#1 || #2) && !#3").unwrap();
/// assert_eq!(calc.max_local(), 3);
/// assert_eq!(calc.run(&[true, false, false]), Ok(true));
/// assert_eq!(calc.run(&[true, false, true]), Ok(false));
/// ```
///
/// An evaluator is not meant to be shared between threads; give every
/// thread its own copy instead.
#[derive(Debug, Default, Clone)]
pub struct Evaluator {
    expr: String,
    program: Program,
    max_local: usize,
    max_depth: usize,
    stack: Vec<bool>,
}

impl Evaluator {
    /// Create an evaluator holding the compiled form of `expr`.
    pub fn with_expression(expr: &str) -> Result<Self, SyntaxError> {
        let mut calc = Self::default();
        calc.compile(expr)?;
        Ok(calc)
    }

    /// Compile the expression and keep it for later runs, replacing whatever
    /// was compiled before. On error the previous program is left in place.
    pub fn compile(&mut self, expr: &str) -> Result<(), SyntaxError> {
        let program = compile(expr)?;
        self.max_local = analyze::max_local(&program);
        self.max_depth = analyze::max_depth(&program);
        self.program = program;
        self.expr = expr.to_string();
        self.stack = Vec::with_capacity(self.max_depth);
        debug!(
            expr,
            program = %self.program,
            max_local = self.max_local,
            max_depth = self.max_depth,
            "compiled mask expression"
        );
        Ok(())
    }

    /// Run the compiled program with `inputs[i]` standing for local variable
    /// `#(i+1)`.
    ///
    /// The length of `inputs` is not compared with [`Evaluator::max_local`];
    /// only variables that fall outside of it are reported.
    pub fn run(&mut self, inputs: &[bool]) -> Result<bool, RuntimeError> {
        self.stack.clear();
        for (pc, token) in self.program.iter().enumerate() {
            trace!(pc, token = %token, stack = ?self.stack);
            match token.kind {
                Kind::Variable(n) => {
                    let val = *inputs
                        .get(n.get() - 1)
                        .ok_or(RuntimeError::ArityMismatch {
                            expected: self.max_local,
                            actual: inputs.len(),
                        })?;
                    self.stack.push(val);
                }
                Kind::Not => {
                    let v = pop(&mut self.stack, pc)?;
                    self.stack.push(!v);
                }
                Kind::And => {
                    let b = pop(&mut self.stack, pc)?;
                    let a = pop(&mut self.stack, pc)?;
                    self.stack.push(a && b);
                }
                Kind::Or => {
                    let b = pop(&mut self.stack, pc)?;
                    let a = pop(&mut self.stack, pc)?;
                    self.stack.push(a || b);
                }
                Kind::GroupOpen | Kind::GroupClose | Kind::End => {
                    unreachable!("Compiler never emits {}", token.kind)
                }
            }
        }
        if self.stack.len() != 1 {
            let remaining = self.stack.len();
            self.stack.clear();
            return Err(RuntimeError::UnbalancedStack { remaining });
        }
        pop(&mut self.stack, self.program.len())
    }

    /// Return true if the program references exactly the variables
    /// `#1..=#expected` and no others, each at least once.
    pub fn check_args(&self, expected: usize) -> bool {
        let slots = analyze::referenced_slots(&self.program);
        if slots.len() != expected {
            warn!(
                expr = %self.expr,
                expected,
                found = slots.len(),
                "mask expression references the wrong number of distinct variables"
            );
            return false;
        }
        if let Some(slot) = slots.iter().find(|&&slot| slot >= expected) {
            warn!(
                expr = %self.expr,
                expected,
                variable = slot + 1,
                "mask expression references a variable out of range"
            );
            return false;
        }
        true
    }

    /// Return true if the program contains a union (`||`).
    pub fn has_union(&self) -> bool {
        analyze::has_union(&self.program)
    }

    /// Highest 1-based variable index referenced by the program.
    pub fn max_local(&self) -> usize {
        self.max_local
    }

    /// Estimated stack depth needed to run the program.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The compiled program.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// The text the current program was compiled from.
    pub fn expression(&self) -> &str {
        &self.expr
    }

    /// Render the compiled program in human readable format.
    pub fn dump_program(&self) -> String {
        let mut out = Vec::new();
        // Writing in to a Vec can not fail.
        let _ = self.program.disassemble(&self.expr, &mut out);
        String::from_utf8_lossy(&out).into_owned()
    }
}

fn pop(stack: &mut Vec<bool>, pc: usize) -> Result<bool, RuntimeError> {
    stack.pop().ok_or(RuntimeError::StackUnderflow { pc })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_of_or_and() {
        let mut calc = Evaluator::with_expression("#1||#2&&#3").unwrap();
        assert_eq!(calc.run(&[false, true, false]), Ok(false));
        assert_eq!(calc.run(&[false, true, true]), Ok(true));
        assert_eq!(calc.run(&[true, false, false]), Ok(true));
    }

    #[test]
    fn negation_precedence() {
        let mut calc = Evaluator::with_expression("!#1&&#2").unwrap();
        assert_eq!(calc.run(&[true, true]), Ok(false));
        assert_eq!(calc.run(&[false, true]), Ok(true));
    }

    #[test]
    fn operands_are_applied_in_order() {
        // a && !b is not commutative once negation is involved
        let mut calc = Evaluator::with_expression("#1&&!#2").unwrap();
        assert_eq!(calc.run(&[true, false]), Ok(true));
        assert_eq!(calc.run(&[false, true]), Ok(false));
    }

    #[test]
    fn stack_is_empty_after_each_run() {
        let mut calc = Evaluator::with_expression("(#1||#2)&&!#3").unwrap();
        for _ in 0..3 {
            assert_eq!(calc.run(&[true, false, false]), Ok(true));
            assert!(calc.stack.is_empty());
        }
    }

    #[test]
    fn variable_out_of_range_is_an_arity_mismatch() {
        let mut calc = Evaluator::with_expression("#1&&#2").unwrap();
        assert_eq!(
            calc.run(&[true]),
            Err(RuntimeError::ArityMismatch {
                expected: 2,
                actual: 1
            })
        );
        // The evaluator recovers for the next call.
        assert_eq!(calc.run(&[true, true]), Ok(true));
    }

    #[test]
    fn extra_inputs_are_ignored() {
        let mut calc = Evaluator::with_expression("#1").unwrap();
        assert_eq!(calc.run(&[true, false, false]), Ok(true));
    }

    #[test]
    fn malformed_programs_fail_at_runtime() {
        let mut calc = Evaluator::with_expression("#1 #2").unwrap();
        let err = calc.run(&[true, true]).unwrap_err();
        assert_eq!(err, RuntimeError::UnbalancedStack { remaining: 2 });
        assert!(err.is_internal());

        let mut calc = Evaluator::with_expression("#1 &&").unwrap();
        assert_eq!(
            calc.run(&[true]),
            Err(RuntimeError::StackUnderflow { pc: 1 })
        );

        let mut calc = Evaluator::default();
        assert_eq!(
            calc.run(&[]),
            Err(RuntimeError::UnbalancedStack { remaining: 0 })
        );
    }

    #[test]
    fn failed_compile_keeps_previous_program() {
        let mut calc = Evaluator::with_expression("#1||#2").unwrap();
        assert!(calc.compile("#1||(#2").is_err());
        assert_eq!(calc.expression(), "#1||#2");
        assert_eq!(calc.max_local(), 2);
        assert_eq!(calc.run(&[false, true]), Ok(true));
    }

    #[test]
    fn recompiling_replaces_program() {
        let mut calc = Evaluator::with_expression("#1||#2||#3").unwrap();
        calc.compile("!#1").unwrap();
        assert_eq!(calc.max_local(), 1);
        assert_eq!(calc.max_depth(), 1);
        assert!(!calc.has_union());
        assert_eq!(calc.run(&[true]), Ok(false));
    }

    #[test]
    fn check_args_requires_every_variable() {
        let calc = Evaluator::with_expression("#1||#3").unwrap();
        assert!(!calc.check_args(3));
        assert!(!calc.check_args(2));

        let calc = Evaluator::with_expression("#2&&(#1||!#3)&&#2").unwrap();
        assert!(calc.check_args(3));
        assert!(!calc.check_args(4));
    }

    #[test]
    fn debug_events_are_not_compiled_out() {
        use tracing::level_filters::{LevelFilter, STATIC_MAX_LEVEL};
        assert!(STATIC_MAX_LEVEL >= LevelFilter::DEBUG);
    }

    #[test]
    fn dump_lists_each_token() {
        let calc = Evaluator::with_expression("!#1").unwrap();
        let dump = calc.dump_program();
        assert!(dump.starts_with("== !#1 ==\n"));
        assert!(dump.contains("OP_LOCAL"));
        assert!(dump.contains("OP_NOT"));
    }
}
