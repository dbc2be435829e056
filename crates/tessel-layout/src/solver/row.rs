//! Tableau rows.

use std::collections::BTreeMap;

const EPSILON: f64 = 1.0e-8;

#[inline]
pub(super) fn near_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Role of a tableau symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(super) enum SymbolKind {
    /// Stands for a user [`Variable`](super::Variable).
    External,
    /// Slack for an inequality; restricted to `>= 0`.
    Slack,
    /// Error term of a non-required constraint; restricted to `>= 0`.
    Error,
    /// Marker for a required equality; never pivots.
    Dummy,
}

/// A tableau symbol. Ordered by creation so iteration is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(super) struct Symbol {
    pub(super) id: usize,
    pub(super) kind: SymbolKind,
}

impl Symbol {
    #[inline]
    pub(super) fn is_restricted(self) -> bool {
        matches!(self.kind, SymbolKind::Slack | SymbolKind::Error)
    }
}

/// `basic = constant + Σ coefficient * symbol`.
#[derive(Debug, Clone, Default)]
pub(super) struct Row {
    pub(super) cells: BTreeMap<Symbol, f64>,
    pub(super) constant: f64,
}

impl Row {
    pub(super) fn new(constant: f64) -> Self {
        Self {
            cells: BTreeMap::new(),
            constant,
        }
    }

    pub(super) fn coefficient_for(&self, symbol: Symbol) -> f64 {
        self.cells.get(&symbol).copied().unwrap_or(0.0)
    }

    /// Add `coefficient * symbol`, dropping the cell if it cancels out.
    pub(super) fn insert_symbol(&mut self, symbol: Symbol, coefficient: f64) {
        let cell = self.cells.entry(symbol).or_insert(0.0);
        *cell += coefficient;
        if near_zero(*cell) {
            self.cells.remove(&symbol);
        }
    }

    /// Add `coefficient * other`.
    pub(super) fn insert_row(&mut self, other: &Row, coefficient: f64) {
        self.constant += other.constant * coefficient;
        for (&symbol, &c) in &other.cells {
            self.insert_symbol(symbol, c * coefficient);
        }
    }

    pub(super) fn remove(&mut self, symbol: Symbol) {
        self.cells.remove(&symbol);
    }

    pub(super) fn reverse_sign(&mut self) {
        self.constant = -self.constant;
        for c in self.cells.values_mut() {
            *c = -*c;
        }
    }

    /// Rewrite `0 = self` as `symbol = ...`, removing `symbol` from the cells.
    pub(super) fn solve_for(&mut self, symbol: Symbol) {
        let Some(coefficient) = self.cells.remove(&symbol) else {
            return;
        };
        let scale = -1.0 / coefficient;
        self.constant *= scale;
        for c in self.cells.values_mut() {
            *c *= scale;
        }
    }

    /// Rewrite `lhs = self` as `rhs = ...`.
    pub(super) fn solve_for_symbols(&mut self, lhs: Symbol, rhs: Symbol) {
        self.insert_symbol(lhs, -1.0);
        self.solve_for(rhs);
    }

    /// Replace `symbol` by the expression in `row`.
    pub(super) fn substitute(&mut self, symbol: Symbol, row: &Row) {
        if let Some(coefficient) = self.cells.remove(&symbol) {
            self.insert_row(row, coefficient);
        }
    }
}
