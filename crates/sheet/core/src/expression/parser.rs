//! Recursive-descent parser producing [`Expr`] trees.

use core::str::FromStr;

use crate::expression::{BinaryOp, EvalError, Expr, Function};

/// Parse a formula into an expression tree.
pub fn parse(text: &str) -> Result<Expr, EvalError> {
    let mut parser = Parser::new(text);
    parser.skip_whitespace();
    if parser.at_end() {
        return Err(EvalError::Empty);
    }
    let expr = parser.expression()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(expr),
        Some(ch) => Err(EvalError::UnexpectedChar {
            ch,
            index: parser.pos,
        }),
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn unexpected(&self) -> EvalError {
        match self.peek() {
            Some(ch) => EvalError::UnexpectedChar {
                ch,
                index: self.pos,
            },
            None => EvalError::UnexpectedEnd,
        }
    }

    // ------------------------------------------------------------------------
    // Precedence levels
    // ------------------------------------------------------------------------

    fn expression(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.term()?;
        loop {
            self.skip_whitespace();
            let op = match self.peek() {
                Some('+') => BinaryOp::Add,
                Some('-') => BinaryOp::Subtract,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn term(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.unary()?;
        loop {
            self.skip_whitespace();
            let op = match self.peek() {
                Some('*') => BinaryOp::Multiply,
                Some('/') => BinaryOp::Divide,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<Expr, EvalError> {
        self.skip_whitespace();
        match self.peek() {
            Some('-') => {
                self.pos += 1;
                let operand = self.unary()?;
                Ok(Expr::Negate(Box::new(operand)))
            }
            Some('+') => {
                self.pos += 1;
                self.unary()
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, EvalError> {
        self.skip_whitespace();
        match self.peek() {
            Some('(') => {
                let open = self.pos;
                self.pos += 1;
                let inner = self.expression()?;
                self.close_paren(open)?;
                Ok(inner)
            }
            Some('$') => self.variable(),
            Some(ch) if ch.is_ascii_digit() || ch == '.' => self.number(),
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.call(),
            _ => Err(self.unexpected()),
        }
    }

    // ------------------------------------------------------------------------
    // Terminals
    // ------------------------------------------------------------------------

    fn number(&mut self) -> Result<Expr, EvalError> {
        let start = self.pos;
        while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.peek() == Some('.') {
            self.pos += 1;
            while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        // Exponent only when digits follow, so `2e` stays an error below.
        if matches!(self.peek(), Some('e' | 'E')) {
            let digits_at = match self.peek_at(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self.peek_at(digits_at).is_some_and(|ch| ch.is_ascii_digit()) {
                self.pos += digits_at;
                while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
                    self.pos += 1;
                }
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse::<f64>()
            .map(Expr::Number)
            .map_err(|_| EvalError::InvalidNumber { text })
    }

    fn variable(&mut self) -> Result<Expr, EvalError> {
        let dollar = self.pos;
        self.pos += 1;
        let start = self.pos;
        while let Some(ch) = self.peek() {
            let valid = ch == '_'
                || ch == '.'
                || ch == '#'
                || ch.is_ascii_alphabetic()
                || (self.pos != start && ch.is_ascii_digit());
            if !valid {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Err(EvalError::InvalidVariable { index: dollar });
        }
        Ok(Expr::Variable(self.chars[start..self.pos].iter().collect()))
    }

    fn call(&mut self) -> Result<Expr, EvalError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        {
            self.pos += 1;
        }
        let name: String = self.chars[start..self.pos].iter().collect();
        let function =
            Function::from_str(&name).map_err(|_| EvalError::UnknownFunction(name.clone()))?;

        self.skip_whitespace();
        if self.peek() != Some('(') {
            return Err(self.unexpected());
        }
        let open = self.pos;
        self.pos += 1;

        let mut args = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(')') {
            self.pos += 1;
        } else {
            loop {
                args.push(self.expression()?);
                self.skip_whitespace();
                match self.peek() {
                    Some(',') => self.pos += 1,
                    Some(')') => {
                        self.pos += 1;
                        break;
                    }
                    Some(ch) => {
                        return Err(EvalError::UnexpectedChar {
                            ch,
                            index: self.pos,
                        });
                    }
                    None => return Err(EvalError::UnclosedParen { index: open }),
                }
            }
        }

        if !function.accepts(args.len()) {
            return Err(EvalError::ArgumentCount {
                function,
                count: args.len(),
            });
        }
        Ok(Expr::Call { function, args })
    }

    fn close_paren(&mut self, open: usize) -> Result<(), EvalError> {
        self.skip_whitespace();
        match self.peek() {
            Some(')') => {
                self.pos += 1;
                Ok(())
            }
            None => Err(EvalError::UnclosedParen { index: open }),
            Some(ch) => Err(EvalError::UnexpectedChar {
                ch,
                index: self.pos,
            }),
        }
    }
}
