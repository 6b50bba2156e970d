use thiserror::Error;

/// Error while scanning mask expression source text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// Invalid character
    #[error("unexpected character '{ch}'")]
    UnexpectedCharacter {
        /// Offset of the character
        pos: usize,
        /// The character itself
        ch: char,
    },
    /// A '#' that is not followed by a positive decimal index
    #[error("local variable must be '#' followed by a positive integer")]
    InvalidVariable {
        /// Offset of the '#'
        pos: usize,
    },
}

impl ScanError {
    /// Offset in the source text where scanning failed.
    pub fn pos(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { pos, .. } | Self::InvalidVariable { pos } => *pos,
        }
    }
}

/// Error while turning a token sequence into a program
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The number of '(' and ')' differ
    #[error("unbalanced groups ({opens} opening, {closes} closing)")]
    UnbalancedGroups {
        /// Number of '(' characters
        opens: usize,
        /// Number of ')' characters
        closes: usize,
    },
    /// A ')' with no '(' before it
    #[error("unmatched closing group")]
    UnmatchedClose {
        /// Offset of the ')'
        pos: usize,
    },
    /// A '(' that is never closed
    #[error("unmatched opening group")]
    UnmatchedOpen {
        /// Offset of the '('
        pos: usize,
    },
}

/// The reason an expression was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    /// The scanner failed
    #[error(transparent)]
    Scan(#[from] ScanError),
    /// The compiler failed
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A mask expression could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at offset {pos} in \"{expr}\": {kind}")]
pub struct SyntaxError {
    /// The full expression text
    pub expr: String,
    /// 0-based character offset where compilation failed
    pub pos: usize,
    /// What went wrong
    pub kind: SyntaxErrorKind,
}

impl SyntaxError {
    /// Attach the expression text to a scanner error.
    pub fn scan(expr: &str, err: ScanError) -> Self {
        Self {
            expr: expr.to_string(),
            pos: err.pos(),
            kind: err.into(),
        }
    }

    /// Attach the expression text to a compiler error. Errors that do not
    /// point at a single token are reported at the end of the text.
    pub fn parse(expr: &str, err: ParseError) -> Self {
        let pos = match err {
            ParseError::UnmatchedClose { pos } | ParseError::UnmatchedOpen { pos } => pos,
            ParseError::UnbalancedGroups { .. } => expr.chars().count(),
        };
        Self {
            expr: expr.to_string(),
            pos,
            kind: err.into(),
        }
    }
}

/// Evaluator errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The supplied inputs do not cover the variables the program references
    #[error("expected {expected} inputs, got {actual}")]
    ArityMismatch {
        /// Number of inputs the program references
        expected: usize,
        /// Number of inputs supplied
        actual: usize,
    },
    /// Pop on an empty stack
    #[error("evaluator stack underflows at instruction {pc}")]
    StackUnderflow {
        /// Index of the instruction that popped
        pc: usize,
    },
    /// The program did not leave exactly one value on the stack
    #[error("evaluator stack holds {remaining} values after the program ends, expected 1")]
    UnbalancedStack {
        /// Number of values left on the stack
        remaining: usize,
    },
}

impl RuntimeError {
    /// Return true if the error indicates a malformed program rather than bad
    /// caller input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::StackUnderflow { .. } | Self::UnbalancedStack { .. }
        )
    }
}

/// Errors raised while combining mask planes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaneError {
    /// Nothing to combine
    #[error("no planes to combine")]
    NoPlanes,
    /// A plane's dimensions differ from the first plane's
    #[error("plane {index} is {}x{}, expected {}x{}", .actual.0, .actual.1, .expected.0, .expected.1)]
    DimensionMismatch {
        /// Index of the offending plane
        index: usize,
        /// (nx, ny) of the first plane
        expected: (usize, usize),
        /// (nx, ny) of the offending plane
        actual: (usize, usize),
    },
    /// Evaluating a cell failed
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Boolean calculator errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A compilation error happened
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// A runtime error happened
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// Combining planes failed
    #[error(transparent)]
    Plane(#[from] PlaneError),
}
