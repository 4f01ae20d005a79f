//! Parser for the textual rule expression language.
//!
//! Grammar, lowest precedence first, all binary levels left-associative:
//!
//! ```text
//! expr  := or
//! or    := and ("||" and)*
//! and   := cmp ("&&" cmp)*
//! cmp   := unary (("==" | "!=" | ">" | "<" | ">=" | "<=") unary)?
//! unary := ("!" | "!!") unary | atom
//! atom  := literal | ident | "(" expr ")"
//! ```
//!
//! The output is the same closed [`Expr`] tree the JSON codec produces --
//! there are no constructs beyond comparison and logical composition.

use crate::error::ParseError;
use crate::expr::{BinOp, Expr, UnaryOp};
use crate::lexer::{lex, Spanned, Token};

/// Parse a textual rule expression into an expression tree.
pub fn parse(src: &str) -> Result<Expr, ParseError> {
    let tokens = lex(src)?;
    let mut parser = Parser::new(&tokens);
    let expr = parser.parse_or()?;
    parser.expect_end()?;
    Ok(expr)
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned]) -> Parser<'a> {
        Parser { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    /// Line of the current token, or of the last token at end of input.
    fn line(&self) -> u32 {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|s| s.line)
            .unwrap_or(1)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let spanned = self.tokens.get(self.pos).cloned();
        if spanned.is_some() {
            self.pos += 1;
        }
        spanned
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while self.peek() == Some(&Token::OrOr) {
            self.advance();
            let right = self.parse_and()?;
            left = Expr::binary(left, right, BinOp::Or);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_cmp()?;
        while self.peek() == Some(&Token::AndAnd) {
            self.advance();
            let right = self.parse_cmp()?;
            left = Expr::binary(left, right, BinOp::And);
        }
        Ok(left)
    }

    fn parse_cmp(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_unary()?;
        let op = match self.peek() {
            Some(Token::EqEq) => BinOp::Eq,
            Some(Token::NotEq) => BinOp::NotEq,
            Some(Token::Gt) => BinOp::Gt,
            Some(Token::Lt) => BinOp::Lt,
            Some(Token::GtEq) => BinOp::GtEq,
            Some(Token::LtEq) => BinOp::LtEq,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_unary()?;
        Ok(Expr::binary(left, right, op))
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(Token::Bang) => {
                self.advance();
                Ok(Expr::unary(self.parse_unary()?, UnaryOp::Not))
            }
            Some(Token::BangBang) => {
                self.advance();
                Ok(Expr::unary(self.parse_unary()?, UnaryOp::Exists))
            }
            _ => self.parse_atom(),
        }
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        let line = self.line();
        let Some(spanned) = self.advance() else {
            return Err(ParseError::new(line, "unexpected end of input"));
        };

        match spanned.token {
            Token::Ident(name) => Ok(Expr::ident(name)),
            Token::Str(value) => Ok(Expr::str(value)),
            Token::Int(value) => Ok(Expr::int(value)),
            Token::Float(value) => Ok(Expr::float(value)),
            Token::True => Ok(Expr::bool(true)),
            Token::False => Ok(Expr::bool(false)),
            Token::LParen => {
                let inner = self.parse_or()?;
                match self.advance() {
                    Some(Spanned {
                        token: Token::RParen,
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(ParseError::new(
                        other.line,
                        format!("expected ')', got {:?}", other.token),
                    )),
                    None => Err(ParseError::new(spanned.line, "missing closing ')'")),
                }
            }
            other => Err(ParseError::new(
                spanned.line,
                format!("unexpected token {:?}", other),
            )),
        }
    }

    fn expect_end(&mut self) -> Result<(), ParseError> {
        match self.advance() {
            None => Ok(()),
            Some(spanned) => Err(ParseError::new(
                spanned.line,
                format!("unexpected token {:?} after expression", spanned.token),
            )),
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
