//! Formula language for attribute bases.
//!
//! Attribute definitions describe their base value as a short formula that
//! may reference other attributes by `$id`:
//!
//! ```text
//! 10
//! $iq
//! ($dx+$ht)/4
//! floor($basic_speed)
//! ```
//!
//! ## Grammar
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | primary
//! primary := number | '$' ident | function '(' args? ')' | '(' expr ')'
//! args    := expr (',' expr)*
//! ```
//!
//! `* /` bind tighter than `+ -`; every binary operator is left-associative.
//! Signs stack, so `--3` is 3.
//!
//! ## Examples
//!
//! ```
//! # use std::collections::HashMap;
//! # use sheet_core::expression::Evaluator;
//! let mut vars = HashMap::new();
//! vars.insert("dx".to_string(), 12.0);
//! vars.insert("ht".to_string(), 11.0);
//!
//! let speed = Evaluator::new(&vars).evaluate("($dx+$ht)/4").unwrap();
//! assert_eq!(speed, 5.75);
//! ```

pub mod error;
pub mod evaluate;
pub mod parser;

pub use error::EvalError;
pub use evaluate::{Evaluator, NoVariables, VariableResolver};
pub use parser::parse;

// ============================================================================
// Expression Tree
// ============================================================================

/// Parsed formula.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Numeric literal.
    Number(f64),

    /// `$name` reference, resolved through a [`VariableResolver`].
    Variable(String),

    /// Unary minus.
    Negate(Box<Expr>),

    /// Arithmetic on two sub-expressions.
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// Built-in function call.
    Call { function: Function, args: Vec<Expr> },
}

impl Expr {
    pub(crate) fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Names of every variable referenced by this expression, in source order.
    pub fn variables(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expr::Number(_) => {}
            Expr::Variable(name) => names.push(name),
            Expr::Negate(inner) => inner.collect_variables(names),
            Expr::Binary { lhs, rhs, .. } => {
                lhs.collect_variables(names);
                rhs.collect_variables(names);
            }
            Expr::Call { args, .. } => {
                for arg in args {
                    arg.collect_variables(names);
                }
            }
        }
    }
}

/// Binary arithmetic operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum BinaryOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Subtract,
    #[strum(serialize = "*")]
    Multiply,
    #[strum(serialize = "/")]
    Divide,
}

/// Built-in functions.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Function {
    Floor,
    Ceil,
    Round,
    Abs,
    Min,
    Max,
    Sqrt,
}

impl Function {
    /// Returns true if the function can be called with `count` arguments.
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Function::Min | Function::Max => count >= 1,
            _ => count == 1,
        }
    }
}
