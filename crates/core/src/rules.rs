//! Rules and rule folding.
//!
//! A toggle stores an ordered list of rules; each rule carries the logical
//! operator that joins it onto the running decision. Folding is strictly
//! left-to-right with no precedence between rules:
//! `(((true OP1 r1) OP2 r2) OP3 r3)`. Reordering the list changes the
//! result, so the stored order is load-bearing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::eval::evaluate;
use crate::expr::{BinOp, Expr};
use crate::metadata::Metadata;

/// A (logical operator, expression) pair attached to a toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub op: BinOp,
    #[serde(rename = "expression")]
    pub expr: Expr,
}

/// An ordered rule list as stored on a toggle.
pub type Rules = Vec<Rule>;

impl Rule {
    pub fn new(op: BinOp, expr: Expr) -> Rule {
        Rule { op, expr }
    }

    /// A rule's operator joins it onto the running fold, so only the
    /// logical connectives are allowed.
    pub fn validate(&self) -> Result<(), InvalidRuleOp> {
        if self.op.is_logical() {
            Ok(())
        } else {
            Err(InvalidRuleOp(self.op))
        }
    }
}

/// Returned when a rule's operator is not `&&` or `||`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRuleOp(pub BinOp);

impl fmt::Display for InvalidRuleOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rule op must be logical (&& or ||), got '{}'",
            self.0.as_str()
        )
    }
}

impl std::error::Error for InvalidRuleOp {}

/// Fold a toggle's rules into a single decision.
///
/// Seeds the fold with the literal `true` and wraps each rule in list
/// order into a new binary node. An empty rule list is therefore
/// unconditionally on. The fold is kept as repeated binary composition
/// rather than flattened into AND/OR groups: rule order decides the shape
/// of the tree, and with it the result.
pub fn evaluate_rules(metadata: &Metadata, rules: &[Rule]) -> bool {
    let mut running = Expr::bool(true);
    for rule in rules {
        running = Expr::binary(running, rule.expr.clone(), rule.op);
    }

    evaluate(&running, metadata).is_true()
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
