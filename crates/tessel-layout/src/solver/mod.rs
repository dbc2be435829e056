//! Incremental Cassowary linear-constraint solver.
//!
//! The solver keeps a simplex tableau in which every basic symbol is
//! expressed in terms of parametric ones. Adding a constraint turns it into
//! a row, picks a subject to make basic, and re-optimises the objective
//! (the weighted sum of error terms of non-required constraints).
//! Required constraints that cannot be satisfied are rejected without
//! disturbing the rest of the system.
//!
//! ```
//! use tessel_layout::solver::{Solver, Strength, Variable};
//!
//! let left = Variable::new();
//! let width = Variable::new();
//! let mut solver = Solver::new();
//! solver
//!     .add_constraints([
//!         left.equal_to(0.0),
//!         (left + width).less_or_equal(80.0),
//!         width.equal_to(100.0).with_strength(Strength::WEAK),
//!     ])
//!     .unwrap();
//! assert!((solver.value_of(width) - 80.0).abs() < 1e-9);
//! ```

mod expr;
mod row;
mod strength;

use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashMap;

pub use expr::{Expression, LinearConstraint, Relation, Term, Variable};
pub use strength::Strength;

use row::{Row, Symbol, SymbolKind, near_zero};

/// Why a constraint could not be added or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// The constraint is already in the solver.
    DuplicateConstraint,
    /// A required constraint conflicts with the required constraints
    /// already present.
    UnsatisfiableConstraint,
    /// The constraint is not in the solver.
    UnknownConstraint,
    /// The tableau reached a state that should be impossible.
    Internal(&'static str),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateConstraint => f.write_str("constraint already added"),
            Self::UnsatisfiableConstraint => f.write_str("required constraint is unsatisfiable"),
            Self::UnknownConstraint => f.write_str("constraint is not in the solver"),
            Self::Internal(reason) => write!(f, "internal solver error: {reason}"),
        }
    }
}

impl std::error::Error for SolverError {}

/// Markers recording which tableau symbols a constraint introduced.
#[derive(Debug, Clone, Copy)]
struct Tag {
    marker: Symbol,
    other: Option<Symbol>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Objective {
    Main,
    Artificial,
}

/// A Cassowary solver instance.
#[derive(Debug, Default)]
pub struct Solver {
    constraints: FxHashMap<LinearConstraint, Tag>,
    var_symbols: FxHashMap<Variable, Symbol>,
    rows: BTreeMap<Symbol, Row>,
    objective: Row,
    artificial: Option<Row>,
    next_id: usize,
}

impl Solver {
    /// An empty solver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every constraint in order, stopping at the first failure.
    pub fn add_constraints(
        &mut self,
        constraints: impl IntoIterator<Item = LinearConstraint>,
    ) -> Result<(), SolverError> {
        for constraint in constraints {
            self.add_constraint(constraint)?;
        }
        Ok(())
    }

    /// Add a constraint and re-optimise.
    pub fn add_constraint(&mut self, constraint: LinearConstraint) -> Result<(), SolverError> {
        if self.constraints.contains_key(&constraint) {
            return Err(SolverError::DuplicateConstraint);
        }

        let (mut row, tag) = self.create_row(&constraint);
        let mut subject = choose_subject(&row, tag);

        if subject.is_none() && row.cells.keys().all(|s| s.kind == SymbolKind::Dummy) {
            if !near_zero(row.constant) {
                return Err(SolverError::UnsatisfiableConstraint);
            }
            subject = Some(tag.marker);
        }

        match subject {
            Some(subject) => {
                row.solve_for(subject);
                self.substitute(subject, &row);
                self.rows.insert(subject, row);
            }
            None => {
                // A failed artificial solve leaves the row pivoted in.
                let snapshot = (self.rows.clone(), self.objective.clone());
                if !self.add_with_artificial_variable(row)? {
                    (self.rows, self.objective) = snapshot;
                    return Err(SolverError::UnsatisfiableConstraint);
                }
            }
        }

        self.constraints.insert(constraint, tag);
        self.optimize(Objective::Main)
    }

    /// Remove a previously added constraint and re-optimise.
    pub fn remove_constraint(&mut self, constraint: &LinearConstraint) -> Result<(), SolverError> {
        let tag = self
            .constraints
            .remove(constraint)
            .ok_or(SolverError::UnknownConstraint)?;

        let strength = constraint.strength().value();
        for marker in [Some(tag.marker), tag.other].into_iter().flatten() {
            if marker.kind == SymbolKind::Error {
                self.remove_marker_effects(marker, strength);
            }
        }

        if self.rows.remove(&tag.marker).is_none() {
            let leaving = self
                .marker_leaving_row(tag.marker)
                .ok_or(SolverError::Internal("no leaving row for removed marker"))?;
            let mut row = self
                .rows
                .remove(&leaving)
                .ok_or(SolverError::Internal("leaving row vanished"))?;
            row.solve_for_symbols(leaving, tag.marker);
            self.substitute(tag.marker, &row);
        }

        self.optimize(Objective::Main)
    }

    /// Whether `constraint` is currently in the solver.
    #[must_use]
    pub fn has_constraint(&self, constraint: &LinearConstraint) -> bool {
        self.constraints.contains_key(constraint)
    }

    /// Current value of `variable`; zero for variables the solver has not
    /// seen or that are not basic.
    #[must_use]
    pub fn value_of(&self, variable: Variable) -> f64 {
        self.var_symbols
            .get(&variable)
            .and_then(|symbol| self.rows.get(symbol))
            .map_or(0.0, |row| row.constant)
    }

    /// Number of constraints currently held.
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Drop every constraint and variable.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn new_symbol(&mut self, kind: SymbolKind) -> Symbol {
        self.next_id += 1;
        Symbol {
            id: self.next_id,
            kind,
        }
    }

    fn var_symbol(&mut self, variable: Variable) -> Symbol {
        if let Some(&symbol) = self.var_symbols.get(&variable) {
            return symbol;
        }
        let symbol = self.new_symbol(SymbolKind::External);
        self.var_symbols.insert(variable, symbol);
        symbol
    }

    /// Translate a constraint into a tableau row with its slack, error,
    /// and dummy symbols. Error terms are charged to the objective.
    fn create_row(&mut self, constraint: &LinearConstraint) -> (Row, Tag) {
        let expression = constraint.expression();
        let mut row = Row::new(expression.constant);

        for term in &expression.terms {
            if near_zero(term.coefficient) {
                continue;
            }
            let symbol = self.var_symbol(term.variable);
            match self.rows.get(&symbol) {
                Some(basic) => row.insert_row(basic, term.coefficient),
                None => row.insert_symbol(symbol, term.coefficient),
            }
        }

        let strength = constraint.strength();
        let tag = match constraint.relation() {
            relation @ (Relation::LessOrEqual | Relation::GreaterOrEqual) => {
                let coefficient = if relation == Relation::LessOrEqual {
                    1.0
                } else {
                    -1.0
                };
                let slack = self.new_symbol(SymbolKind::Slack);
                row.insert_symbol(slack, coefficient);
                let other = if strength.is_required() {
                    None
                } else {
                    let error = self.new_symbol(SymbolKind::Error);
                    row.insert_symbol(error, -coefficient);
                    self.objective.insert_symbol(error, strength.value());
                    Some(error)
                };
                Tag {
                    marker: slack,
                    other,
                }
            }
            Relation::Equal if strength.is_required() => {
                let dummy = self.new_symbol(SymbolKind::Dummy);
                row.insert_symbol(dummy, 1.0);
                Tag {
                    marker: dummy,
                    other: None,
                }
            }
            Relation::Equal => {
                let plus = self.new_symbol(SymbolKind::Error);
                let minus = self.new_symbol(SymbolKind::Error);
                row.insert_symbol(plus, -1.0);
                row.insert_symbol(minus, 1.0);
                self.objective.insert_symbol(plus, strength.value());
                self.objective.insert_symbol(minus, strength.value());
                Tag {
                    marker: plus,
                    other: Some(minus),
                }
            }
        };

        if row.constant < 0.0 {
            row.reverse_sign();
        }
        (row, tag)
    }

    /// Add `row` through a temporary artificial variable. Returns whether
    /// the artificial objective could be driven to zero.
    fn add_with_artificial_variable(&mut self, row: Row) -> Result<bool, SolverError> {
        let art = self.new_symbol(SymbolKind::Slack);
        self.rows.insert(art, row.clone());
        self.artificial = Some(row);

        self.optimize(Objective::Artificial)?;
        let success = self
            .artificial
            .take()
            .is_some_and(|artificial| near_zero(artificial.constant));

        if let Some(mut row) = self.rows.remove(&art) {
            if row.cells.is_empty() {
                return Ok(success);
            }
            let Some(entering) = row.cells.keys().copied().find(|s| s.is_restricted()) else {
                return Ok(false);
            };
            row.solve_for_symbols(art, entering);
            self.substitute(entering, &row);
            self.rows.insert(entering, row);
        }

        for row in self.rows.values_mut() {
            row.remove(art);
        }
        self.objective.remove(art);
        Ok(success)
    }

    /// Replace `symbol` everywhere by `row`.
    fn substitute(&mut self, symbol: Symbol, row: &Row) {
        for basic in self.rows.values_mut() {
            basic.substitute(symbol, row);
        }
        self.objective.substitute(symbol, row);
        if let Some(artificial) = self.artificial.as_mut() {
            artificial.substitute(symbol, row);
        }
    }

    fn objective_row(&self, objective: Objective) -> Option<&Row> {
        match objective {
            Objective::Main => Some(&self.objective),
            Objective::Artificial => self.artificial.as_ref(),
        }
    }

    /// Primal simplex: pivot until no objective coefficient is negative.
    fn optimize(&mut self, objective: Objective) -> Result<(), SolverError> {
        loop {
            let entering = self.objective_row(objective).and_then(|row| {
                row.cells
                    .iter()
                    .find(|&(symbol, &c)| symbol.kind != SymbolKind::Dummy && c < 0.0)
                    .map(|(&symbol, _)| symbol)
            });
            let Some(entering) = entering else {
                return Ok(());
            };

            let leaving = self
                .leaving_row(entering)
                .ok_or(SolverError::Internal("objective is unbounded"))?;
            let mut row = self
                .rows
                .remove(&leaving)
                .ok_or(SolverError::Internal("leaving row vanished"))?;
            row.solve_for_symbols(leaving, entering);
            self.substitute(entering, &row);
            self.rows.insert(entering, row);
        }
    }

    /// Row with the minimum ratio test result for `entering`.
    fn leaving_row(&self, entering: Symbol) -> Option<Symbol> {
        let mut best: Option<(Symbol, f64)> = None;
        for (&symbol, row) in &self.rows {
            if symbol.kind == SymbolKind::External {
                continue;
            }
            let c = row.coefficient_for(entering);
            if c >= 0.0 {
                continue;
            }
            let ratio = -row.constant / c;
            if best.is_none_or(|(_, min)| ratio < min) {
                best = Some((symbol, ratio));
            }
        }
        best.map(|(symbol, _)| symbol)
    }

    /// Pick the row to pivot a non-basic `marker` into.
    ///
    /// Prefers restricted rows where the marker has a negative coefficient,
    /// then restricted rows with a positive one, then any external row.
    fn marker_leaving_row(&self, marker: Symbol) -> Option<Symbol> {
        let mut negative: Option<(Symbol, f64)> = None;
        let mut positive: Option<(Symbol, f64)> = None;
        let mut external = None;
        for (&symbol, row) in &self.rows {
            let c = row.coefficient_for(marker);
            if c == 0.0 {
                continue;
            }
            if symbol.kind == SymbolKind::External {
                external = Some(symbol);
            } else if c < 0.0 {
                let ratio = -row.constant / c;
                if negative.is_none_or(|(_, min)| ratio < min) {
                    negative = Some((symbol, ratio));
                }
            } else {
                let ratio = row.constant / c;
                if positive.is_none_or(|(_, min)| ratio < min) {
                    positive = Some((symbol, ratio));
                }
            }
        }
        negative.or(positive).map(|(symbol, _)| symbol).or(external)
    }

    fn remove_marker_effects(&mut self, marker: Symbol, strength: f64) {
        match self.rows.get(&marker) {
            Some(row) => self.objective.insert_row(row, -strength),
            None => self.objective.insert_symbol(marker, -strength),
        }
    }
}

/// Choose the symbol to make basic for a fresh row: any external symbol,
/// else a restricted marker with a negative coefficient.
fn choose_subject(row: &Row, tag: Tag) -> Option<Symbol> {
    if let Some(&symbol) = row.cells.keys().find(|s| s.kind == SymbolKind::External) {
        return Some(symbol);
    }
    [Some(tag.marker), tag.other]
        .into_iter()
        .flatten()
        .find(|&s| s.is_restricted() && row.coefficient_for(s) < 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn required_equalities_resolve() {
        let x = Variable::new();
        let y = Variable::new();
        let mut solver = Solver::new();
        solver
            .add_constraints([x.equal_to(10.0), (x + y).equal_to(25.0)])
            .unwrap();
        assert!(approx(solver.value_of(x), 10.0));
        assert!(approx(solver.value_of(y), 15.0));
    }

    #[test]
    fn weak_yields_to_required() {
        let x = Variable::new();
        let mut solver = Solver::new();
        solver.add_constraint(x.less_or_equal(50.0)).unwrap();
        solver
            .add_constraint(x.equal_to(80.0).with_strength(Strength::WEAK))
            .unwrap();
        assert!(approx(solver.value_of(x), 50.0));
    }

    #[test]
    fn stronger_preference_wins() {
        let x = Variable::new();
        let mut solver = Solver::new();
        solver
            .add_constraints([
                x.equal_to(10.0).with_strength(Strength::WEAK),
                x.equal_to(20.0).with_strength(Strength::STRONG),
            ])
            .unwrap();
        assert!(approx(solver.value_of(x), 20.0));
    }

    #[test]
    fn conflicting_required_is_rejected() {
        let x = Variable::new();
        let mut solver = Solver::new();
        solver.add_constraint(x.greater_or_equal(10.0)).unwrap();
        let conflict = x.less_or_equal(5.0);
        assert_eq!(
            solver.add_constraint(conflict.clone()),
            Err(SolverError::UnsatisfiableConstraint)
        );
        assert!(!solver.has_constraint(&conflict));
        assert!(solver.value_of(x) >= 10.0 - 1e-6);
    }

    #[test]
    fn contradictory_constants_are_rejected() {
        let x = Variable::new();
        let mut solver = Solver::new();
        solver.add_constraint(x.equal_to(3.0)).unwrap();
        assert_eq!(
            solver.add_constraint(x.equal_to(4.0)),
            Err(SolverError::UnsatisfiableConstraint)
        );
    }

    #[test]
    fn duplicate_and_unknown_constraints() {
        let x = Variable::new();
        let c = x.equal_to(1.0);
        let mut solver = Solver::new();
        solver.add_constraint(c.clone()).unwrap();
        assert_eq!(
            solver.add_constraint(c.clone()),
            Err(SolverError::DuplicateConstraint)
        );
        assert_eq!(
            solver.remove_constraint(&x.equal_to(1.0)),
            Err(SolverError::UnknownConstraint)
        );
    }

    #[test]
    fn removing_constraint_releases_variable() {
        let x = Variable::new();
        let mut solver = Solver::new();
        solver
            .add_constraint(x.equal_to(10.0).with_strength(Strength::WEAK))
            .unwrap();
        let pin = x.equal_to(40.0).with_strength(Strength::STRONG);
        solver.add_constraint(pin.clone()).unwrap();
        assert!(approx(solver.value_of(x), 40.0));

        solver.remove_constraint(&pin).unwrap();
        assert!(!solver.has_constraint(&pin));
        assert!(approx(solver.value_of(x), 10.0));
        assert_eq!(solver.constraint_count(), 1);
    }

    #[test]
    fn removing_required_inequality() {
        let x = Variable::new();
        let mut solver = Solver::new();
        let cap = x.less_or_equal(5.0);
        solver.add_constraint(cap.clone()).unwrap();
        solver
            .add_constraint(x.equal_to(30.0).with_strength(Strength::MEDIUM))
            .unwrap();
        assert!(approx(solver.value_of(x), 5.0));
        solver.remove_constraint(&cap).unwrap();
        assert!(approx(solver.value_of(x), 30.0));
    }

    #[test]
    fn chained_segments_share_space() {
        let a = Variable::new();
        let b = Variable::new();
        let mut solver = Solver::new();
        solver
            .add_constraints([
                a.greater_or_equal(0.0),
                b.greater_or_equal(0.0),
                (a + b).equal_to(100.0),
                a.equal_to(30.0).with_strength(Strength::WEAK),
            ])
            .unwrap();
        assert!(approx(solver.value_of(a), 30.0));
        assert!(approx(solver.value_of(b), 70.0));
    }

    #[test]
    fn reset_forgets_everything() {
        let x = Variable::new();
        let c = x.equal_to(7.0);
        let mut solver = Solver::new();
        solver.add_constraint(c.clone()).unwrap();
        solver.reset();
        assert!(!solver.has_constraint(&c));
        assert_eq!(solver.value_of(x), 0.0);
        solver.add_constraint(c).unwrap();
        assert!(approx(solver.value_of(x), 7.0));
    }

    #[test]
    fn unseen_variable_reads_zero() {
        let solver = Solver::new();
        assert_eq!(solver.value_of(Variable::new()), 0.0);
    }
}
