use std::collections::HashMap;

use tracing::debug;

use crate::{
    csp::{
        assignment::Assignment,
        problem::Problem,
        variable::{Value, VariableId},
    },
    error::{EngineError, Result},
};

/// One (variable, value) pair tracked by the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Trail {
    variable: VariableId,
    value: Value,
}

/// Pheromone strengths for every (variable, domain value) pair of a
/// problem.
///
/// Levels live in one flat `Vec<f64>` so that evaporation and clamping are
/// linear sweeps over contiguous memory; a trail-to-index map built once
/// at initialisation gives O(1) lookup. The matrix is mutated in place for
/// the lifetime of a colony.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    levels: Vec<f64>,
    index: HashMap<Trail, usize>,
}

impl PheromoneMatrix {
    /// Build a matrix with one trail per (variable, domain value) pair,
    /// all set to `initial_level`.
    pub fn initialize(problem: &Problem, initial_level: f64) -> Result<Self> {
        if !(initial_level > 0.0) {
            return Err(EngineError::InvalidParameter {
                name: "initial pheromone",
                message: format!("must be positive, got {initial_level}"),
            }
            .into());
        }

        let mut index = HashMap::new();
        let mut next = 0usize;
        for (id, variable) in problem.variables().iter().enumerate() {
            for &value in variable.domain() {
                index.insert(
                    Trail {
                        variable: id as VariableId,
                        value,
                    },
                    next,
                );
                next += 1;
            }
        }

        let levels = vec![initial_level; next];
        debug!(
            trails = levels.len(),
            level = initial_level,
            "initialized pheromone matrix"
        );

        Ok(Self { levels, index })
    }

    /// The stored strength for a trail, or `0.0` for a pair the matrix
    /// does not track.
    pub fn get(&self, variable: VariableId, value: Value) -> f64 {
        self.index
            .get(&Trail { variable, value })
            .map_or(0.0, |&i| self.levels[i])
    }

    pub fn trail_count(&self) -> usize {
        self.levels.len()
    }

    /// All levels in trail order: variables in problem order, values in
    /// domain order. Exposed for inspection and reproducibility checks.
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Multiply every trail by `1 - evaporation_rate`, in place.
    pub fn evaporate(&mut self, evaporation_rate: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&evaporation_rate) {
            return Err(EngineError::InvalidParameter {
                name: "evaporation rate",
                message: format!("must be in [0, 1], got {evaporation_rate}"),
            }
            .into());
        }

        let factor = 1.0 - evaporation_rate;
        for level in &mut self.levels {
            *level *= factor;
        }
        Ok(())
    }

    /// Add `amount` to the trail of every (variable, value) pair bound by
    /// the assignment. Unassigned variables contribute nothing.
    pub fn deposit(&mut self, assignment: &Assignment, amount: f64) -> Result<()> {
        if !(amount > 0.0) {
            return Err(EngineError::InvalidParameter {
                name: "deposit amount",
                message: format!("must be positive, got {amount}"),
            }
            .into());
        }

        for (variable, value) in assignment.iter() {
            let Some(&i) = self.index.get(&Trail { variable, value }) else {
                return Err(EngineError::UnknownTrail { variable, value }.into());
            };
            self.levels[i] += amount;
        }
        Ok(())
    }

    /// Deposit once per assignment with a per-assignment amount;
    /// contributions sum.
    pub fn deposit_multiple<F>(&mut self, assignments: &[Assignment], amount: F) -> Result<()>
    where
        F: Fn(&Assignment) -> Result<f64>,
    {
        for assignment in assignments {
            let delta = amount(assignment)?;
            self.deposit(assignment, delta)?;
        }
        Ok(())
    }

    /// Clamp every trail into `[min_level, max_level]`, in place.
    pub fn clamp(&mut self, min_level: f64, max_level: f64) -> Result<()> {
        if !(min_level >= 0.0) || !(max_level >= min_level) {
            return Err(EngineError::InvalidParameter {
                name: "pheromone bounds",
                message: format!("invalid bounds: min={min_level}, max={max_level}"),
            }
            .into());
        }

        for level in &mut self.levels {
            *level = level.clamp(min_level, max_level);
        }
        Ok(())
    }
}
