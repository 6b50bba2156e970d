//! Static passes over a compiled program.

use rustc_hash::FxHashSet;

use crate::{Kind, Program};

/// Return the highest 1-based variable index referenced by the program, or 0
/// when it references none.
pub fn max_local(program: &Program) -> usize {
    program
        .iter()
        .filter_map(|t| t.kind.as_variable())
        .max()
        .unwrap_or(0)
}

/// Estimate how many values the evaluator stack must hold at once.
///
/// The running depth is reset to zero by any token other than a variable,
/// `&&` or `||`. Values still live across a `!` are therefore not counted,
/// so the estimate can fall short of the real peak (`!#1&&(#2&&#3)` needs 3
/// slots but is reported as 2). Callers only use it to pre-size the stack.
pub fn max_depth(program: &Program) -> usize {
    let mut depth: isize = 0;
    let mut max: isize = 0;
    for token in program {
        match token.kind {
            Kind::Variable(_) | Kind::And | Kind::Or => depth += token.kind.stack_delta(),
            _ => depth = 0,
        }
        max = max.max(depth);
    }
    max as usize
}

/// The distinct 0-based input slots referenced by the program.
pub fn referenced_slots(program: &Program) -> FxHashSet<usize> {
    program
        .iter()
        .filter_map(|t| t.kind.as_variable())
        .map(|n| n - 1)
        .collect()
}

/// Return true if the program contains at least one `||`.
pub fn has_union(program: &Program) -> bool {
    program.iter().any(|t| t.kind == Kind::Or)
}
