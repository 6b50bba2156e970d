use std::cmp::Ordering;

use crate::{
    scan::Scanner,
    token::{Kind, Token},
    ParseError, Program, SyntaxError,
};

/// Compile the given mask expression in to a postfix program that can be
/// run by the evaluator.
///
/// Grouping characters are counted before any token is scanned, so an
/// expression with a different number of '(' and ')' is rejected without
/// looking at the rest of it.
pub fn compile(src: &str) -> Result<Program, SyntaxError> {
    check_groups(src).map_err(|err| SyntaxError::parse(src, err))?;

    let mut scanner = Scanner::new(src);
    let mut compiler = Compiler::default();
    loop {
        let token = scanner.scan().map_err(|err| SyntaxError::scan(src, err))?;
        if token.kind == Kind::End {
            break;
        }
        compiler
            .token(token)
            .map_err(|err| SyntaxError::parse(src, err))?;
    }
    compiler.finish().map_err(|err| SyntaxError::parse(src, err))
}

fn check_groups(src: &str) -> Result<(), ParseError> {
    let (opens, closes) = src.chars().fold((0, 0), |(o, c), ch| match ch {
        '(' => (o + 1, c),
        ')' => (o, c + 1),
        _ => (o, c),
    });
    if opens != closes {
        return Err(ParseError::UnbalancedGroups { opens, closes });
    }
    Ok(())
}

/// Operator holding area used while converting infix to postfix.
#[derive(Debug, Default)]
pub struct CompileStack {
    tokens: Vec<Token>,
}

impl CompileStack {
    /// Push a token on top of the stack.
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Remove and return the token on top of the stack.
    pub fn pop(&mut self) -> Option<Token> {
        self.tokens.pop()
    }

    /// Look at the token on top of the stack.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// Return true if the stack holds no token.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Shunting-yard compiler. Operands go straight to the output program while
/// operators wait on the stack until an operator that binds less tightly,
/// a closing group, or the end of the expression releases them.
#[derive(Debug, Default)]
pub struct Compiler {
    program: Program,
    stack: CompileStack,
}

impl Compiler {
    /// Feed one token, in source order, to the compiler.
    pub fn token(&mut self, token: Token) -> Result<(), ParseError> {
        match token.kind {
            Kind::GroupOpen => self.stack.push(token),
            Kind::Variable(_) => self.program.push(token),
            Kind::And | Kind::Or | Kind::Not => self.operator(token),
            Kind::GroupClose => self.close_group(token)?,
            Kind::End => {}
        }
        Ok(())
    }

    /// Drain the remaining operators and return the compiled program.
    pub fn finish(mut self) -> Result<Program, ParseError> {
        while let Some(top) = self.stack.pop() {
            if top.kind == Kind::GroupOpen {
                return Err(ParseError::UnmatchedOpen { pos: top.pos });
            }
            self.program.push(top);
        }
        Ok(self.program)
    }

    fn operator(&mut self, token: Token) {
        let top = match self.stack.peek() {
            Some(top) => top.kind,
            None => {
                self.stack.push(token);
                return;
            }
        };
        match token.kind.in_precedence().cmp(&top.out_precedence()) {
            Ordering::Greater | Ordering::Equal => {}
            Ordering::Less => {
                while let Some(top) = self.stack.peek() {
                    if top.kind == Kind::GroupOpen
                        || token.kind.in_precedence() > top.kind.out_precedence()
                    {
                        break;
                    }
                    if let Some(top) = self.stack.pop() {
                        self.program.push(top);
                    }
                }
            }
        }
        self.stack.push(token);
    }

    fn close_group(&mut self, token: Token) -> Result<(), ParseError> {
        while let Some(top) = self.stack.pop() {
            if top.kind == Kind::GroupOpen {
                return Ok(());
            }
            self.program.push(top);
        }
        Err(ParseError::UnmatchedClose { pos: token.pos })
    }
}
