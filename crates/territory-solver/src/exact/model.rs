//! Explicit linear model handed to a MIP backend.
//!
//! Variables are plain indices. Every constraint carries the
//! [`ConstraintFamily`] it belongs to, so a backend (or a test) can see what
//! each row encodes without reverse-engineering its coefficients.

use smallvec::SmallVec;
use territory_core::Cell;

/// Index of a variable in a [`LinearModel`].
pub type VarId = usize;

/// Tolerance used when checking rows against variable values.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Domain of a variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarKind {
    /// 0 or 1.
    Binary,
    /// Any real value in `[lb, ub]`.
    Continuous { lb: f64, ub: f64 },
}

impl VarKind {
    pub fn is_binary(&self) -> bool {
        matches!(self, VarKind::Binary)
    }

    /// Inclusive bounds of the domain.
    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            VarKind::Binary => (0.0, 1.0),
            VarKind::Continuous { lb, ub } => (lb, ub),
        }
    }
}

/// Direction of a constraint row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sense {
    /// `terms <= rhs`
    Le,
    /// `terms >= rhs`
    Ge,
}

/// Direction of an adjacent cell pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// `(r, c)` and `(r, c + 1)`.
    Horizontal,
    /// `(r, c)` and `(r + 1, c)`.
    Vertical,
}

/// One side of a player's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxSide {
    MinRow,
    MaxRow,
    MinCol,
    MaxCol,
}

/// What a constraint row encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintFamily {
    /// At most one player per cell: `Σ_k x[cell][k] <= 1`.
    CellAtMostOne { cell: Cell },
    /// `Σ w * x[.][player] >= requirement`.
    ScoreLowerBound { player: usize },
    /// `Σ w * x[.][player] <= floor(requirement * 1.2)`.
    ScoreUpperBound { player: usize },
    /// `Σ x <= budget`.
    StoneBudget,
    /// One half of `z >= |x[a][player] - x[b][player]|` for an adjacent pair.
    EdgeAbsDiff {
        pair: (Cell, Cell),
        player: usize,
        orientation: Orientation,
    },
    /// Big-M link between a box side and one cell's variable.
    BoxLink {
        player: usize,
        cell: Cell,
        side: BoxSide,
    },
}

/// A linear term: coefficient times variable.
pub type Term = (VarId, f64);

/// One linear constraint row.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub family: ConstraintFamily,
    pub terms: SmallVec<[Term; 4]>,
    pub sense: Sense,
    pub rhs: f64,
}

impl Constraint {
    /// Left-hand side value under `values`.
    pub fn activity(&self, values: &[f64]) -> f64 {
        self.terms.iter().map(|&(var, coef)| coef * values[var]).sum()
    }

    /// Returns true if the row holds within `tolerance`.
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let activity = self.activity(values);
        match self.sense {
            Sense::Le => activity <= self.rhs + tolerance,
            Sense::Ge => activity >= self.rhs - tolerance,
        }
    }
}

/// A minimization model over binary and bounded continuous variables.
///
/// # Example
///
/// ```
/// use territory_solver::{ConstraintFamily, LinearModel, Sense};
///
/// let mut model = LinearModel::new();
/// let x = model.add_binary();
/// let y = model.add_binary();
/// model.add_constraint(ConstraintFamily::StoneBudget, [(x, 1.0), (y, 1.0)], Sense::Le, 1.0);
/// model.set_objective([(x, -1.0), (y, -2.0)]);
///
/// assert_eq!(model.var_count(), 2);
/// assert!(model.is_feasible(&[0.0, 1.0]));
/// assert!(!model.is_feasible(&[1.0, 1.0]));
/// assert_eq!(model.objective_value(&[0.0, 1.0]), -2.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearModel {
    vars: Vec<VarKind>,
    constraints: Vec<Constraint>,
    objective: Vec<Term>,
}

impl LinearModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_binary(&mut self) -> VarId {
        self.vars.push(VarKind::Binary);
        self.vars.len() - 1
    }

    /// Adds a continuous variable with finite bounds `lb <= ub`.
    pub fn add_continuous(&mut self, lb: f64, ub: f64) -> VarId {
        debug_assert!(lb.is_finite() && ub.is_finite() && lb <= ub);
        self.vars.push(VarKind::Continuous { lb, ub });
        self.vars.len() - 1
    }

    pub fn add_constraint(
        &mut self,
        family: ConstraintFamily,
        terms: impl IntoIterator<Item = Term>,
        sense: Sense,
        rhs: f64,
    ) {
        self.constraints.push(Constraint {
            family,
            terms: terms.into_iter().collect(),
            sense,
            rhs,
        });
    }

    /// Replaces the objective (minimized).
    pub fn set_objective(&mut self, terms: impl IntoIterator<Item = Term>) {
        self.objective = terms.into_iter().collect();
    }

    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    pub fn var(&self, id: VarId) -> VarKind {
        self.vars[id]
    }

    pub fn vars(&self) -> &[VarKind] {
        &self.vars
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &[Term] {
        &self.objective
    }

    /// Number of rows whose family matches `predicate`.
    pub fn count_constraints(&self, predicate: impl Fn(&ConstraintFamily) -> bool) -> usize {
        self.constraints.iter().filter(|c| predicate(&c.family)).count()
    }

    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective
            .iter()
            .map(|&(var, coef)| coef * values[var])
            .sum()
    }

    /// Returns true if `values` respects every domain and every row.
    pub fn is_feasible(&self, values: &[f64]) -> bool {
        if values.len() != self.vars.len() {
            return false;
        }
        let domains_ok = self.vars.iter().zip(values).all(|(&kind, &v)| match kind {
            VarKind::Binary => {
                v.abs() <= FEASIBILITY_TOLERANCE || (v - 1.0).abs() <= FEASIBILITY_TOLERANCE
            }
            VarKind::Continuous { lb, ub } => {
                v >= lb - FEASIBILITY_TOLERANCE && v <= ub + FEASIBILITY_TOLERANCE
            }
        });
        domains_ok
            && self
                .constraints
                .iter()
                .all(|c| c.is_satisfied(values, FEASIBILITY_TOLERANCE))
    }
}
