//! This module deals with compiled programs.

use std::{fmt, io};

use itertools::Itertools;

use crate::{Kind, Token};

/// Program is the postfix sequence of tokens that will be written to by the
/// compiler and later run by the evaluator. Grouping tokens never appear in
/// a program, they are consumed during compilation.
///
/// # Examples
///
/// ```
/// use boolcalc::compile;
///
/// let program = compile("#1 || #2 && #3").unwrap();
/// assert_eq!(program.to_string(), "#1 #2 #3 && ||");
/// assert_eq!(program.get(0).and_then(|t| t.kind.as_variable()), Some(1));
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Program {
    tokens: Vec<Token>,
}

impl Program {
    /// Add a new token to the end of the program.
    pub(crate) fn push(&mut self, token: Token) {
        debug_assert!(
            !matches!(token.kind, Kind::GroupOpen | Kind::GroupClose | Kind::End),
            "{} can not be part of a program",
            token.kind
        );
        self.tokens.push(token);
    }

    /// Read the token at the index.
    pub fn get(&self, idx: usize) -> Option<&Token> {
        self.tokens.get(idx)
    }

    /// Number of tokens in the program.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Return true if nothing has been compiled in to the program.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over the tokens in execution order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Go through the tokens in the program and write them in human-readable
    /// format, one per line, together with their offsets in the source text.
    pub fn disassemble<W: io::Write>(&self, name: &str, mut w: W) -> io::Result<()> {
        writeln!(w, "== {} ==", name)?;
        for (idx, token) in self.tokens.iter().enumerate() {
            write!(w, "{:04} {:4} ", idx, token.pos)?;
            match token.kind {
                Kind::Variable(n) => writeln!(w, "{:-16} {:4}", "OP_LOCAL", n.get())?,
                Kind::And => writeln!(w, "OP_AND")?,
                Kind::Or => writeln!(w, "OP_OR")?,
                Kind::Not => writeln!(w, "OP_NOT")?,
                kind => writeln!(w, "{:-16} {}", "OP_INVALID", kind)?,
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.iter().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn var(n: usize) -> Kind {
        Kind::variable(n).unwrap()
    }

    fn program(kinds: &[Kind]) -> Program {
        let mut p = Program::default();
        for (pos, kind) in kinds.iter().enumerate() {
            p.push(Token::new(*kind, pos));
        }
        p
    }

    #[test]
    fn displays_postfix_order() {
        let p = program(&[var(1), Kind::Not, var(2), Kind::And]);
        assert_eq!(p.to_string(), "#1 ! #2 &&");
        assert_eq!(p.len(), 4);
    }

    #[test]
    fn empty_program() {
        let p = Program::default();
        assert!(p.is_empty());
        assert_eq!(p.to_string(), "");
        assert!(p.get(0).is_none());
    }

    #[test]
    fn disassembles_with_offsets() {
        let p = program(&[var(1), var(12), Kind::Or]);
        let mut out = Vec::new();
        p.disassemble("mask", &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "== mask ==\n\
             0000    0 OP_LOCAL            1\n\
             0001    1 OP_LOCAL           12\n\
             0002    2 OP_OR\n"
        );
    }
}
