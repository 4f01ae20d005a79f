//! switchyard-core: the rule expression engine.
//!
//! A toggle's targeting rules are small typed expression trees evaluated
//! against a per-request metadata context. This crate owns everything about
//! those trees:
//!
//! - [`Value`] -- the closed set of comparable literal kinds
//! - [`Expr`] -- the expression AST ([`BinOp`], [`UnaryOp`])
//! - [`evaluate()`] -- pure, total evaluation against a [`Metadata`] context
//! - [`expr_to_json()`] / [`expr_from_json()`] -- the tagged JSON wire codec
//! - [`Rule`] / [`evaluate_rules()`] -- the ordered left-fold that turns a
//!   toggle's rule list into one boolean decision
//! - [`parse()`] -- the textual rule language (`userType == "admin" && beta`)
//!
//! Evaluation never fails; decoding and parsing fail loudly with
//! [`DecodeError`] and [`ParseError`].

pub mod codec;
pub mod error;
pub mod eval;
pub mod expr;
pub mod lexer;
pub mod metadata;
pub mod parser;
pub mod rules;
pub mod value;

// ── Convenience re-exports ───────────────────────────────────────────

pub use codec::{expr_from_json, expr_to_json, DecodeError};
pub use error::ParseError;
pub use eval::evaluate;
pub use expr::{BinOp, Expr, UnaryOp};
pub use metadata::Metadata;
pub use parser::parse;
pub use rules::{evaluate_rules, InvalidRuleOp, Rule, Rules};
pub use value::Value;
