//! The MIP backend boundary.

use std::time::Duration;

use territory_core::Result;

use super::model::LinearModel;

/// What a backend could establish about a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MipStatus {
    /// The returned values are proven optimal.
    Optimal,
    /// The returned values are feasible; the time limit stopped the proof.
    Feasible,
    /// The model has no feasible point.
    Infeasible,
    /// The time limit was reached before any feasible point was found.
    NoSolution,
}

/// A backend's answer.
#[derive(Debug, Clone, PartialEq)]
pub struct MipOutcome {
    pub status: MipStatus,
    /// One value per model variable; present for `Optimal` and `Feasible`.
    pub values: Option<Vec<f64>>,
    /// Objective value of `values`, as the backend computed it.
    pub objective: Option<f64>,
}

impl MipOutcome {
    pub fn solved(status: MipStatus, values: Vec<f64>, objective: f64) -> Self {
        MipOutcome {
            status,
            values: Some(values),
            objective: Some(objective),
        }
    }

    pub fn without_solution(status: MipStatus) -> Self {
        MipOutcome {
            status,
            values: None,
            objective: None,
        }
    }
}

/// A mixed-integer solver able to minimize a [`LinearModel`].
///
/// Implementations enforce `time_limit` themselves. Running out of time is
/// not an error: report the incumbent as [`MipStatus::Feasible`] or nothing
/// as [`MipStatus::NoSolution`]. Return `Err` only when the backend itself
/// fails.
pub trait MipSolver {
    /// Short name for log events.
    fn name(&self) -> &str;

    fn solve(&mut self, model: &LinearModel, time_limit: Duration) -> Result<MipOutcome>;
}

impl<T: MipSolver + ?Sized> MipSolver for &mut T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(&mut self, model: &LinearModel, time_limit: Duration) -> Result<MipOutcome> {
        (**self).solve(model, time_limit)
    }
}

impl<T: MipSolver + ?Sized> MipSolver for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(&mut self, model: &LinearModel, time_limit: Duration) -> Result<MipOutcome> {
        (**self).solve(model, time_limit)
    }
}
