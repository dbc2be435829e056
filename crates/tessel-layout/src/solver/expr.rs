//! Variables, linear expressions, and constraints.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::Strength;

static NEXT_VARIABLE: AtomicUsize = AtomicUsize::new(0);

/// An unknown the solver assigns a value to.
///
/// Each call to [`Variable::new`] yields a distinct variable.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(usize);

impl Variable {
    /// Create a fresh variable.
    #[must_use]
    pub fn new() -> Self {
        Self(NEXT_VARIABLE.fetch_add(1, Ordering::Relaxed))
    }

    /// `self == rhs`, required.
    #[must_use]
    pub fn equal_to(self, rhs: impl Into<Expression>) -> LinearConstraint {
        Expression::from(self).equal_to(rhs)
    }

    /// `self <= rhs`, required.
    #[must_use]
    pub fn less_or_equal(self, rhs: impl Into<Expression>) -> LinearConstraint {
        Expression::from(self).less_or_equal(rhs)
    }

    /// `self >= rhs`, required.
    #[must_use]
    pub fn greater_or_equal(self, rhs: impl Into<Expression>) -> LinearConstraint {
        Expression::from(self).greater_or_equal(rhs)
    }
}

impl Default for Variable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// `coefficient * variable`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    /// The variable.
    pub variable: Variable,
    /// Its multiplier.
    pub coefficient: f64,
}

/// `constant + Σ terms`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Expression {
    /// Terms; the same variable may appear more than once.
    pub terms: Vec<Term>,
    /// Constant offset.
    pub constant: f64,
}

impl Expression {
    /// An expression with no terms.
    #[must_use]
    pub fn from_constant(constant: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant,
        }
    }

    /// `self == rhs`, required.
    #[must_use]
    pub fn equal_to(self, rhs: impl Into<Expression>) -> LinearConstraint {
        LinearConstraint::new(self - rhs, Relation::Equal, Strength::REQUIRED)
    }

    /// `self <= rhs`, required.
    #[must_use]
    pub fn less_or_equal(self, rhs: impl Into<Expression>) -> LinearConstraint {
        LinearConstraint::new(self - rhs, Relation::LessOrEqual, Strength::REQUIRED)
    }

    /// `self >= rhs`, required.
    #[must_use]
    pub fn greater_or_equal(self, rhs: impl Into<Expression>) -> LinearConstraint {
        LinearConstraint::new(self - rhs, Relation::GreaterOrEqual, Strength::REQUIRED)
    }
}

impl From<f64> for Expression {
    fn from(constant: f64) -> Self {
        Self::from_constant(constant)
    }
}

impl From<Variable> for Expression {
    fn from(variable: Variable) -> Self {
        Term::from(variable).into()
    }
}

impl From<Term> for Expression {
    fn from(term: Term) -> Self {
        Self {
            terms: vec![term],
            constant: 0.0,
        }
    }
}

impl From<Variable> for Term {
    fn from(variable: Variable) -> Self {
        Self {
            variable,
            coefficient: 1.0,
        }
    }
}

impl<T: Into<Expression>> Add<T> for Expression {
    type Output = Expression;

    fn add(mut self, rhs: T) -> Expression {
        let rhs: Expression = rhs.into();
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
        self
    }
}

impl<T: Into<Expression>> Sub<T> for Expression {
    type Output = Expression;

    fn sub(self, rhs: T) -> Expression {
        let rhs: Expression = rhs.into();
        self + -rhs
    }
}

impl Mul<f64> for Expression {
    type Output = Expression;

    fn mul(mut self, rhs: f64) -> Expression {
        for term in &mut self.terms {
            term.coefficient *= rhs;
        }
        self.constant *= rhs;
        self
    }
}

impl Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Expression {
        self * -1.0
    }
}

impl<T: Into<Expression>> Add<T> for Variable {
    type Output = Expression;

    fn add(self, rhs: T) -> Expression {
        Expression::from(self) + rhs
    }
}

impl<T: Into<Expression>> Sub<T> for Variable {
    type Output = Expression;

    fn sub(self, rhs: T) -> Expression {
        Expression::from(self) - rhs
    }
}

impl Mul<f64> for Variable {
    type Output = Expression;

    fn mul(self, rhs: f64) -> Expression {
        Expression::from(self) * rhs
    }
}

impl Mul<Variable> for f64 {
    type Output = Expression;

    fn mul(self, rhs: Variable) -> Expression {
        Expression::from(rhs) * self
    }
}

impl Neg for Variable {
    type Output = Expression;

    fn neg(self) -> Expression {
        -Expression::from(self)
    }
}

/// How an expression relates to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `expression <= 0`
    LessOrEqual,
    /// `expression == 0`
    Equal,
    /// `expression >= 0`
    GreaterOrEqual,
}

#[derive(Debug)]
struct ConstraintData {
    expression: Expression,
    relation: Relation,
    strength: Strength,
}

/// `expression <relation> 0` at some strength.
///
/// Constraints have identity: clones refer to the same constraint, while
/// two separately built constraints are distinct even if they read the
/// same. The solver tracks constraints by that identity.
#[derive(Debug, Clone)]
pub struct LinearConstraint(Rc<ConstraintData>);

impl LinearConstraint {
    /// Build a constraint. The strength is clipped to `0..=REQUIRED`.
    #[must_use]
    pub fn new(expression: Expression, relation: Relation, strength: Strength) -> Self {
        Self(Rc::new(ConstraintData {
            expression,
            relation,
            strength: strength.clip(),
        }))
    }

    /// A new constraint with the same terms at a different strength.
    #[must_use]
    pub fn with_strength(self, strength: Strength) -> Self {
        Self::new(self.0.expression.clone(), self.0.relation, strength)
    }

    /// The constrained expression.
    #[must_use]
    pub fn expression(&self) -> &Expression {
        &self.0.expression
    }

    /// The relation to zero.
    #[must_use]
    pub fn relation(&self) -> Relation {
        self.0.relation
    }

    /// The strength.
    #[must_use]
    pub fn strength(&self) -> Strength {
        self.0.strength
    }
}

impl PartialEq for LinearConstraint {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for LinearConstraint {}

impl Hash for LinearConstraint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Rc::as_ptr(&self.0), state);
    }
}
