//! Expression evaluation.
//!
//! Evaluation is a pure function of the tree and the context: it never
//! mutates either, never performs I/O, and never fails. Anything that would
//! be a type error in a stricter interpreter degrades to a boolean:
//!
//! - an identifier missing from the context evaluates to `Bool(false)`
//!   rather than erroring, so a typo'd identifier name silently disables
//!   the clause that uses it (pinned by `missing_ident_is_false`);
//! - `<` is evaluated as the negation of `>`, not as an independent
//!   less-than. Where `gt` is constant-false (cross-kind operands,
//!   booleans) both `<` and `>=` hold at once;
//! - the `!!` ("exists") operator has no semantics yet and evaluates to
//!   `Bool(true)` regardless of its operand.

use crate::expr::{BinOp, Expr, UnaryOp};
use crate::metadata::Metadata;
use crate::value::Value;

/// Evaluate an expression tree against a metadata context.
///
/// Composite nodes always produce a `Bool`; literal and identifier leaves
/// produce their underlying value.
pub fn evaluate(expr: &Expr, metadata: &Metadata) -> Value {
    match expr {
        Expr::Literal(value) => value.clone(),

        Expr::Ident(name) => metadata
            .get(name)
            .cloned()
            .unwrap_or(Value::Bool(false)),

        Expr::Binary { left, right, op } => {
            let l = evaluate(left, metadata);
            let r = evaluate(right, metadata);
            Value::Bool(match op {
                BinOp::Eq => l == r,
                BinOp::NotEq => l != r,
                BinOp::Gt => l.gt(&r),
                BinOp::GtEq => l.gt(&r) || l == r,
                BinOp::Lt => !l.gt(&r),
                BinOp::LtEq => l == r || !l.gt(&r),
                BinOp::And => l.is_true() && r.is_true(),
                BinOp::Or => l.is_true() || r.is_true(),
            })
        }

        Expr::Unary { expr, op } => {
            let val = evaluate(expr, metadata);
            Value::Bool(match op {
                UnaryOp::Not => !val.is_true(),
                // TODO: !! should check metadata presence instead of the
                // operand's value; until then it holds unconditionally.
                UnaryOp::Exists => true,
            })
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
