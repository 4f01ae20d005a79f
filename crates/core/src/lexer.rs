//! Lexer for the textual rule expression language.
//!
//! The surface syntax is the small comparison-and-connective language rule
//! authors type, e.g. `userType == "admin" && (beta || score > 1_000.25)`.
//! Tokens: identifiers, the keywords `true`/`false`, double-quoted string
//! literals with backslash escapes, integer and float literals with
//! optional `_` separators, the comparison/logical/unary operators, and
//! parentheses.

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifier (a metadata key).
    Ident(String),
    /// String literal, quotes stripped and escapes resolved.
    Str(String),
    Int(i64),
    Float(f64),
    True,
    False,
    // Comparison operators
    EqEq,
    NotEq,
    Gt,
    Lt,
    GtEq,
    LtEq,
    // Logical operators
    AndAnd,
    OrOr,
    Bang,
    BangBang,
    // Grouping
    LParen,
    RParen,
}

/// A token plus the line it started on.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub line: u32,
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Tokenize a rule expression source string.
pub fn lex(src: &str) -> Result<Vec<Spanned>, ParseError> {
    let chars: Vec<char> = src.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0usize;
    let mut line: u32 = 1;

    while pos < chars.len() {
        let c = chars[pos];

        if c == '\n' {
            line += 1;
            pos += 1;
            continue;
        }
        if c.is_whitespace() {
            pos += 1;
            continue;
        }

        if c == '(' {
            tokens.push(Spanned {
                token: Token::LParen,
                line,
            });
            pos += 1;
            continue;
        }
        if c == ')' {
            tokens.push(Spanned {
                token: Token::RParen,
                line,
            });
            pos += 1;
            continue;
        }

        // String literal
        if c == '"' {
            let start_line = line;
            pos += 1;
            let mut buf = String::new();
            loop {
                if pos >= chars.len() {
                    return Err(ParseError::new(start_line, "unterminated string literal"));
                }
                match chars[pos] {
                    '"' => {
                        pos += 1;
                        break;
                    }
                    '\\' => {
                        // An escape resolves to the escaped character itself.
                        if pos + 1 >= chars.len() {
                            return Err(ParseError::new(
                                start_line,
                                "unterminated string literal",
                            ));
                        }
                        buf.push(chars[pos + 1]);
                        pos += 2;
                    }
                    '\n' => {
                        return Err(ParseError::new(start_line, "unterminated string literal"));
                    }
                    ch => {
                        buf.push(ch);
                        pos += 1;
                    }
                }
            }
            tokens.push(Spanned {
                token: Token::Str(buf),
                line: start_line,
            });
            continue;
        }

        // Number literal, `_` separators allowed
        if c.is_ascii_digit() {
            let mut buf = String::new();
            while pos < chars.len() && (chars[pos].is_ascii_digit() || chars[pos] == '_') {
                if chars[pos] != '_' {
                    buf.push(chars[pos]);
                }
                pos += 1;
            }

            let is_float = pos < chars.len()
                && chars[pos] == '.'
                && pos + 1 < chars.len()
                && chars[pos + 1].is_ascii_digit();
            if is_float {
                buf.push('.');
                pos += 1;
                while pos < chars.len() && (chars[pos].is_ascii_digit() || chars[pos] == '_') {
                    if chars[pos] != '_' {
                        buf.push(chars[pos]);
                    }
                    pos += 1;
                }
                let val: f64 = buf
                    .parse()
                    .map_err(|_| ParseError::new(line, format!("invalid float literal '{}'", buf)))?;
                tokens.push(Spanned {
                    token: Token::Float(val),
                    line,
                });
            } else {
                let val: i64 = buf.parse().map_err(|_| {
                    ParseError::new(line, format!("integer literal out of range '{}'", buf))
                })?;
                tokens.push(Spanned {
                    token: Token::Int(val),
                    line,
                });
            }
            continue;
        }

        // Identifier or keyword
        if is_ident_start(c) {
            let mut buf = String::new();
            while pos < chars.len() && is_ident_continue(chars[pos]) {
                buf.push(chars[pos]);
                pos += 1;
            }
            let token = match buf.as_str() {
                "true" => Token::True,
                "false" => Token::False,
                _ => Token::Ident(buf),
            };
            tokens.push(Spanned { token, line });
            continue;
        }

        // Operators
        let next = chars.get(pos + 1).copied();
        let (token, width) = match (c, next) {
            ('=', Some('=')) => (Token::EqEq, 2),
            ('=', _) => {
                return Err(ParseError::new(line, "unexpected '=', did you mean '=='?"));
            }
            ('!', Some('=')) => (Token::NotEq, 2),
            ('!', Some('!')) => (Token::BangBang, 2),
            ('!', _) => (Token::Bang, 1),
            ('&', Some('&')) => (Token::AndAnd, 2),
            ('&', _) => {
                return Err(ParseError::new(line, "unexpected '&', did you mean '&&'?"));
            }
            ('|', Some('|')) => (Token::OrOr, 2),
            ('|', _) => {
                return Err(ParseError::new(line, "unexpected '|', did you mean '||'?"));
            }
            ('>', Some('=')) => (Token::GtEq, 2),
            ('>', _) => (Token::Gt, 1),
            ('<', Some('=')) => (Token::LtEq, 2),
            ('<', _) => (Token::Lt, 1),
            _ => {
                return Err(ParseError::new(
                    line,
                    format!("unexpected character '{}'", c),
                ));
            }
        };
        tokens.push(Spanned { token, line });
        pos += width;
    }

    Ok(tokens)
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<Token> {
        lex(src).unwrap().into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn lex_simple_comparison() {
        assert_eq!(
            kinds(r#"userType == "admin""#),
            vec![
                Token::Ident("userType".into()),
                Token::EqEq,
                Token::Str("admin".into()),
            ]
        );
    }

    #[test]
    fn lex_numbers_with_separators() {
        assert_eq!(
            kinds("age > 18 && bill < 1_000.25"),
            vec![
                Token::Ident("age".into()),
                Token::Gt,
                Token::Int(18),
                Token::AndAnd,
                Token::Ident("bill".into()),
                Token::Lt,
                Token::Float(1000.25),
            ]
        );
    }

    #[test]
    fn lex_grouped_expression() {
        assert_eq!(
            kinds(r#"userType == "admin" && (flag == true || otherFlag == false)"#),
            vec![
                Token::Ident("userType".into()),
                Token::EqEq,
                Token::Str("admin".into()),
                Token::AndAnd,
                Token::LParen,
                Token::Ident("flag".into()),
                Token::EqEq,
                Token::True,
                Token::OrOr,
                Token::Ident("otherFlag".into()),
                Token::EqEq,
                Token::False,
                Token::RParen,
            ]
        );
    }

    #[test]
    fn lex_unary_operators() {
        assert_eq!(
            kinds("!beta && !!score"),
            vec![
                Token::Bang,
                Token::Ident("beta".into()),
                Token::AndAnd,
                Token::BangBang,
                Token::Ident("score".into()),
            ]
        );
    }

    #[test]
    fn lex_string_escapes() {
        assert_eq!(
            kinds(r#"name == "say \"hi\"""#),
            vec![
                Token::Ident("name".into()),
                Token::EqEq,
                Token::Str(r#"say "hi""#.into()),
            ]
        );
    }

    #[test]
    fn lex_errors_carry_lines() {
        let err = lex("a == 1 &&\nb = 2").unwrap_err();
        assert_eq!(err.line, 2);

        let err = lex(r#"name == "unterminated"#).unwrap_err();
        assert!(err.message.contains("unterminated"));

        let err = lex("price > 99999999999999999999").unwrap_err();
        assert!(err.message.contains("out of range"));
    }
}
