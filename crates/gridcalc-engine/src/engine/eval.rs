//! Formula evaluation.
//!
//! A precedence-climbing parser that computes the value as it parses. Each
//! binary operator has a left and a right binding power; a subexpression
//! parsed at power `p` keeps consuming operators whose left power is at
//! least `p`, parsing their right operand at the operator's right power.
//! Equal powers give right associativity (`^`), a higher right power gives
//! left associativity.
//!
//! Only the first error is kept. Failing discards the rest of the input, so
//! the remainder of the parse runs against [`Token::End`] and is a no-op.
//!
//! Parentheses, unary minus and `^` chains recurse. Past [`MAX_NESTING`]
//! levels the formula fails with [`ErrorKind::SyntaxTooDeep`] rather than
//! growing the stack.

use super::lexer::{Ident, Lexer, Op, Token};
use super::{ErrorKind, policy};

/// Where `@` references are looked up.
pub trait Resolver {
    /// Whether `(row, col)` names a cell of the grid.
    fn in_bounds(&self, row: usize, col: usize) -> bool;

    /// Value of the in-bounds cell at `(row, col)`, computing it if needed.
    fn resolve(&mut self, row: usize, col: usize) -> Result<f64, ErrorKind>;
}

/// Deepest recursion of the parser, counting each nested subexpression and
/// each unary minus.
const MAX_NESTING: usize = 1000;

/// Left and right binding powers of an infix operator.
fn binding_power(op: Op) -> Option<(u8, u8)> {
    match op {
        Op::Add | Op::Sub => Some((1, 2)),
        Op::Mul | Op::Div | Op::Rem => Some((3, 4)),
        Op::Pow => Some((5, 5)),
        Op::At => Some((7, 8)),
        Op::LParen | Op::RParen => None,
    }
}

/// Evaluate a formula body for the cell at `(row, col)`.
pub fn evaluate<R>(body: &str, row: usize, col: usize, resolver: &mut R) -> Result<f64, ErrorKind>
where
    R: Resolver + ?Sized,
{
    Evaluator {
        row,
        col,
        lexer: Lexer::new(body),
        token: Token::End,
        first_error: None,
        depth: 0,
        resolver,
    }
    .run()
}

struct Evaluator<'s, 'r, R: ?Sized> {
    row: usize,
    col: usize,
    lexer: Lexer<'s>,
    token: Token,
    first_error: Option<ErrorKind>,
    depth: usize,
    resolver: &'r mut R,
}

impl<R: Resolver + ?Sized> Evaluator<'_, '_, R> {
    fn run(mut self) -> Result<f64, ErrorKind> {
        self.advance();
        let value = self.parse_expr(0);
        if self.token != Token::End {
            self.fail(ErrorKind::SyntaxTrailingToken);
        }
        match self.first_error {
            Some(kind) => Err(kind),
            None => Ok(value),
        }
    }

    fn fail(&mut self, kind: ErrorKind) {
        if self.first_error.is_none() {
            self.first_error = Some(kind);
            self.lexer.skip_to_end();
        }
    }

    fn advance(&mut self) {
        self.token = match self.lexer.next_token() {
            Token::Bad(_) => {
                self.fail(ErrorKind::SyntaxBadToken);
                Token::End
            }
            token => token,
        };
    }

    /// Run `parse` one nesting level deeper, or fail if that is too deep.
    fn nested(&mut self, parse: impl FnOnce(&mut Self) -> f64) -> f64 {
        if self.depth >= MAX_NESTING {
            self.fail(ErrorKind::SyntaxTooDeep);
            self.token = Token::End;
            return 0.0;
        }
        self.depth += 1;
        let v = parse(self);
        self.depth -= 1;
        v
    }

    fn parse_expr(&mut self, min_power: u8) -> f64 {
        self.nested(|p| p.parse_operators(min_power))
    }

    fn parse_operators(&mut self, min_power: u8) -> f64 {
        let mut lhs = self.parse_factor();
        loop {
            let Token::Op(op) = self.token else {
                return lhs;
            };
            let Some((left, right)) = binding_power(op) else {
                return lhs;
            };
            if left < min_power {
                return lhs;
            }
            self.advance();
            let rhs = self.parse_expr(right);
            lhs = self.apply(op, lhs, rhs);
        }
    }

    fn parse_factor(&mut self) -> f64 {
        match self.token {
            Token::Number(v) => {
                self.advance();
                v
            }
            Token::Op(Op::Sub) => {
                self.advance();
                -self.nested(Self::parse_factor)
            }
            Token::Ident(Ident::Col) => {
                self.advance();
                self.col as f64
            }
            Token::Ident(Ident::Row) => {
                self.advance();
                self.row as f64
            }
            Token::Op(Op::LParen) => {
                self.advance();
                let v = self.parse_expr(0);
                if self.token != Token::Op(Op::RParen) {
                    self.fail(ErrorKind::SyntaxMissingParen);
                }
                self.advance();
                v
            }
            _ => {
                self.fail(ErrorKind::SyntaxFactorExpected);
                self.advance();
                0.0
            }
        }
    }

    fn apply(&mut self, op: Op, lhs: f64, rhs: f64) -> f64 {
        match op {
            Op::Add => lhs + rhs,
            Op::Sub => lhs - rhs,
            Op::Mul => lhs * rhs,
            Op::Div | Op::Rem if rhs == 0.0 => {
                self.fail(ErrorKind::DivByZero);
                0.0
            }
            Op::Div => lhs / rhs,
            // f64 `%` is C's fmod: the result takes the sign of `lhs`.
            Op::Rem => lhs % rhs,
            Op::Pow => lhs.powf(rhs),
            Op::At => self.refer(lhs, rhs),
            Op::LParen | Op::RParen => {
                debug_assert!(false, "parenthesis applied as an infix operator");
                0.0
            }
        }
    }

    /// The `row @ col` operation.
    fn refer(&mut self, row: f64, col: f64) -> f64 {
        if row != row.trunc() || col != col.trunc() {
            self.fail(ErrorKind::NonIntegerCoord);
            return 0.0;
        }
        let target = to_index(row)
            .zip(to_index(col))
            .filter(|&(r, c)| self.resolver.in_bounds(r, c));
        let Some((r, c)) = target else {
            self.fail(ErrorKind::OutOfRange);
            return 0.0;
        };
        match self.resolver.resolve(r, c) {
            Ok(v) => v,
            Err(kind) => {
                self.fail(policy::propagate(kind));
                0.0
            }
        }
    }
}

/// Integral coordinate to index; negative and infinite values have none.
fn to_index(v: f64) -> Option<usize> {
    (v >= 0.0 && v.is_finite()).then_some(v as usize)
}
