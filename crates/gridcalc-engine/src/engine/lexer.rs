//! Formula tokenizer.
//!
//! Consumes a formula body (the text after `=`) one token at a time. The
//! lexer is single pass: once [`Lexer::skip_to_end`] has been called every
//! further fetch yields [`Token::End`].

use super::cell::BLANKS;

/// Operator characters recognised by the formula language.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    /// `row @ col` cell reference.
    At,
    LParen,
    RParen,
}

impl Op {
    fn from_char(ch: char) -> Option<Op> {
        Some(match ch {
            '+' => Op::Add,
            '-' => Op::Sub,
            '*' => Op::Mul,
            '/' => Op::Div,
            '%' => Op::Rem,
            '^' => Op::Pow,
            '@' => Op::At,
            '(' => Op::LParen,
            ')' => Op::RParen,
            _ => return None,
        })
    }
}

/// The coordinate identifiers: `c` and `r` of the evaluating cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ident {
    Col,
    Row,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Op(Op),
    Ident(Ident),
    End,
    /// Any other non-blank character.
    Bad(char),
}

pub struct Lexer<'a> {
    rest: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer { rest: source }
    }

    /// Scan the next token and advance past it.
    pub fn next_token(&mut self) -> Token {
        self.rest = self.rest.trim_start_matches(BLANKS);
        let Some(ch) = self.rest.chars().next() else {
            return Token::End;
        };

        if ch.is_ascii_digit() {
            return self.scan_number();
        }

        let token = if let Some(op) = Op::from_char(ch) {
            Token::Op(op)
        } else {
            match ch {
                'c' => Token::Ident(Ident::Col),
                'r' => Token::Ident(Ident::Row),
                other => Token::Bad(other),
            }
        };
        self.rest = &self.rest[ch.len_utf8()..];
        token
    }

    /// Discard the remaining input.
    pub fn skip_to_end(&mut self) {
        self.rest = "";
    }

    /// Greedy decimal literal: digits, optional fraction, optional exponent.
    fn scan_number(&mut self) -> Token {
        let bytes = self.rest.as_bytes();
        let mut end = digits_from(bytes, 0);
        if bytes.get(end) == Some(&b'.') {
            end = digits_from(bytes, end + 1);
        }
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp = end + 1;
            if matches!(bytes.get(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            let exp_end = digits_from(bytes, exp);
            // "2e" or "2e+" leave the exponent marker for the next token.
            if exp_end > exp {
                end = exp_end;
            }
        }

        let (literal, rest) = self.rest.split_at(end);
        self.rest = rest;
        match literal.parse::<f64>() {
            Ok(v) => Token::Number(v),
            Err(_) => Token::Bad(literal.chars().next().unwrap_or('0')),
        }
    }
}

fn digits_from(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    end
}
