use std::{fmt, num::NonZeroUsize};

/// Mask expression token. Every token remembers where it was found in the
/// source text so that errors can point back at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// What this token is
    pub kind: Kind,
    /// 0-based character offset of the token in the source text.
    pub pos: usize,
}

impl Token {
    /// Create a token of the given kind found at `pos`.
    pub fn new(kind: Kind, pos: usize) -> Self {
        Self { kind, pos }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// Token kinds. Only variables carry data, the index of the caller-supplied
/// input they refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Double character '&&'
    And,
    /// Double character '||'
    Or,
    /// Single character '!'
    Not,
    /// Local variable '#N', holding its 1-based index `N`
    Variable(NonZeroUsize),
    /// Single character '('
    GroupOpen,
    /// Single character ')'
    GroupClose,
    /// End of the source text
    End,
}

impl Kind {
    /// Variable `#index`, or `None` for index 0.
    pub fn variable(index: usize) -> Option<Self> {
        NonZeroUsize::new(index).map(Self::Variable)
    }

    /// Precedence of the token when it arrives at the operator stack.
    pub fn in_precedence(&self) -> u8 {
        match self {
            Self::Or => 2,
            Self::And => 4,
            Self::Not => 10,
            Self::GroupOpen | Self::GroupClose => 100,
            Self::Variable(_) | Self::End => 0,
        }
    }

    /// Precedence of the token while it sits on the operator stack.
    pub fn out_precedence(&self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 3,
            Self::Not => 10,
            Self::GroupOpen | Self::GroupClose => 100,
            Self::Variable(_) | Self::End => 0,
        }
    }

    /// Number of values pushed minus the number of values popped when the
    /// token is executed.
    pub fn stack_delta(&self) -> isize {
        match self {
            Self::Variable(_) => 1,
            Self::And | Self::Or => -1,
            Self::Not | Self::GroupOpen | Self::GroupClose | Self::End => 0,
        }
    }

    /// Return true if this is one of the logical operators.
    pub fn is_operator(&self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Not)
    }

    /// Return the 1-based index if this is a variable.
    pub fn as_variable(&self) -> Option<usize> {
        match self {
            Self::Variable(n) => Some(n.get()),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "&&"),
            Self::Or => write!(f, "||"),
            Self::Not => write!(f, "!"),
            Self::Variable(n) => write!(f, "#{}", n),
            Self::GroupOpen => write!(f, "("),
            Self::GroupClose => write!(f, ")"),
            Self::End => write!(f, "<end>"),
        }
    }
}
