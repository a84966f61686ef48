//! Formula evaluation logic.
//!
//! This module evaluates [`Expr`] trees against a [`VariableResolver`] that
//! answers `$name` lookups.

use std::collections::{BTreeMap, HashMap};

use crate::expression::{BinaryOp, EvalError, Expr, Function, parse};

// ============================================================================
// Variable Resolution
// ============================================================================

/// Supplies values for `$name` references.
///
/// Exclusions let an attribute evaluate its own base formula without
/// resolving itself: the attribute excludes its id for the duration of the
/// evaluation, and any lookup of an excluded name reports "unresolved".
/// Resolvers that never recurse can ignore them.
pub trait VariableResolver {
    /// Returns the value of `name`, or `None` if it is unknown or excluded.
    fn resolve_variable(&self, name: &str) -> Option<f64>;

    /// Marks `name` as unresolvable until the matching `remove_exclusion`.
    fn add_exclusion(&self, _name: &str) {}

    /// Reverts the most recent `add_exclusion` for `name`.
    fn remove_exclusion(&self, _name: &str) {}
}

/// Resolver with no variables at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoVariables;

impl VariableResolver for NoVariables {
    fn resolve_variable(&self, _name: &str) -> Option<f64> {
        None
    }
}

impl VariableResolver for HashMap<String, f64> {
    fn resolve_variable(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl VariableResolver for BTreeMap<String, f64> {
    fn resolve_variable(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

// ============================================================================
// Evaluator
// ============================================================================

/// Parses and evaluates formulas against a resolver.
#[derive(Clone, Copy)]
pub struct Evaluator<'a> {
    resolver: &'a dyn VariableResolver,
}

impl<'a> Evaluator<'a> {
    pub fn new(resolver: &'a dyn VariableResolver) -> Self {
        Self { resolver }
    }

    /// Parse `text` without evaluating it.
    pub fn parse(text: &str) -> Result<Expr, EvalError> {
        parse(text)
    }

    /// Evaluate `text` to a number.
    pub fn evaluate(&self, text: &str) -> Result<f64, EvalError> {
        let expr = parse(text)?;
        let value = expr.evaluate(self.resolver)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite)
        }
    }

    /// Evaluate `text` and floor the result to an integer.
    pub fn evaluate_to_integer(&self, text: &str) -> Result<i32, EvalError> {
        self.evaluate(text).map(|value| value.floor() as i32)
    }
}

impl core::fmt::Debug for Evaluator<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Evaluator").finish_non_exhaustive()
    }
}

impl Expr {
    /// Evaluate this expression.
    ///
    /// ## Error Handling
    /// - `UnresolvedVariable` if the resolver has no value for a `$name`
    /// - `DivisionByZero` if a divisor evaluates to zero
    pub fn evaluate(&self, resolver: &dyn VariableResolver) -> Result<f64, EvalError> {
        match self {
            Expr::Number(value) => Ok(*value),

            Expr::Variable(name) => resolver
                .resolve_variable(name)
                .ok_or_else(|| EvalError::UnresolvedVariable(name.clone())),

            Expr::Negate(inner) => Ok(-inner.evaluate(resolver)?),

            Expr::Binary { op, lhs, rhs } => {
                let lhs = lhs.evaluate(resolver)?;
                let rhs = rhs.evaluate(resolver)?;
                op.apply(lhs, rhs)
            }

            Expr::Call { function, args } => {
                let values = args
                    .iter()
                    .map(|arg| arg.evaluate(resolver))
                    .collect::<Result<Vec<_>, _>>()?;
                function.apply(&values)
            }
        }
    }
}

impl BinaryOp {
    fn apply(self, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
        match self {
            BinaryOp::Add => Ok(lhs + rhs),
            BinaryOp::Subtract => Ok(lhs - rhs),
            BinaryOp::Multiply => Ok(lhs * rhs),
            BinaryOp::Divide if rhs == 0.0 => Err(EvalError::DivisionByZero),
            BinaryOp::Divide => Ok(lhs / rhs),
        }
    }
}

impl Function {
    fn apply(self, args: &[f64]) -> Result<f64, EvalError> {
        let first = match args.first() {
            Some(value) if self.accepts(args.len()) => *value,
            _ => {
                return Err(EvalError::ArgumentCount {
                    function: self,
                    count: args.len(),
                });
            }
        };
        Ok(match self {
            Function::Floor => first.floor(),
            Function::Ceil => first.ceil(),
            // Halves round toward positive infinity.
            Function::Round => (first + 0.5).floor(),
            Function::Abs => first.abs(),
            Function::Sqrt => first.sqrt(),
            Function::Min => args.iter().copied().fold(first, f64::min),
            Function::Max => args.iter().copied().fold(first, f64::max),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn evaluates_attribute_formulas() {
        let resolver = vars(&[("dx", 12.0), ("ht", 11.0), ("basic_speed", 5.75)]);
        let evaluator = Evaluator::new(&resolver);

        assert_eq!(evaluator.evaluate("10").unwrap(), 10.0);
        assert_eq!(evaluator.evaluate("$dx").unwrap(), 12.0);
        assert_eq!(evaluator.evaluate("($dx+$ht)/4").unwrap(), 5.75);
        assert_eq!(evaluator.evaluate("floor($basic_speed)").unwrap(), 5.0);
        assert_eq!(evaluator.evaluate("$dx - -1").unwrap(), 13.0);
    }

    #[test]
    fn functions_follow_their_definitions() {
        let evaluator = Evaluator::new(&NoVariables);
        assert_eq!(evaluator.evaluate("ceil(2.1)").unwrap(), 3.0);
        assert_eq!(evaluator.evaluate("round(2.5)").unwrap(), 3.0);
        assert_eq!(evaluator.evaluate("round(-2.5)").unwrap(), -2.0);
        assert_eq!(evaluator.evaluate("abs(-4)").unwrap(), 4.0);
        assert_eq!(evaluator.evaluate("sqrt(16)").unwrap(), 4.0);
        assert_eq!(evaluator.evaluate("min(3, 1, 2)").unwrap(), 1.0);
        assert_eq!(evaluator.evaluate("max(3, 1, 2)").unwrap(), 3.0);
        assert_eq!(evaluator.evaluate("floor(-1.5)").unwrap(), -2.0);
    }

    #[test]
    fn evaluate_to_integer_floors() {
        let evaluator = Evaluator::new(&NoVariables);
        assert_eq!(evaluator.evaluate_to_integer("7 / 2").unwrap(), 3);
        assert_eq!(evaluator.evaluate_to_integer("-7 / 2").unwrap(), -4);
    }

    #[test]
    fn unknown_variables_are_errors() {
        let evaluator = Evaluator::new(&NoVariables);
        assert_eq!(
            evaluator.evaluate("$iq + 1").unwrap_err(),
            EvalError::UnresolvedVariable("iq".to_string())
        );
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let evaluator = Evaluator::new(&NoVariables);
        assert_eq!(
            evaluator.evaluate("1 / (2 - 2)").unwrap_err(),
            EvalError::DivisionByZero
        );
        assert_eq!(
            evaluator.evaluate("sqrt(-1)").unwrap_err(),
            EvalError::NonFinite
        );
    }
}
