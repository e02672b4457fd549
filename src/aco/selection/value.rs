use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    aco::{parameters::AcoParameters, pheromone::PheromoneMatrix},
    csp::variable::{Value, VariableId},
    error::{EngineError, Result},
};

/// Problem-specific desirability of a value: the η term of the selection
/// weight. The engine never supplies one of its own.
pub trait ValueHeuristic {
    fn eta(&self, variable: VariableId, value: Value) -> f64;
}

/// η ≡ 1: selection driven by pheromone alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformHeuristic;

impl ValueHeuristic for UniformHeuristic {
    fn eta(&self, _variable: VariableId, _value: Value) -> f64 {
        1.0
    }
}

/// A strategy for picking a value for a variable from its current domain.
pub trait ValueSelector {
    /// Select a value, or `None` for an empty domain. A degenerate weight
    /// distribution (every candidate at zero) is an error, not a silent
    /// bias.
    fn select(
        &mut self,
        variable: VariableId,
        domain: &[Value],
        pheromones: &PheromoneMatrix,
        parameters: &AcoParameters,
    ) -> Result<Option<Value>>;
}

/// Roulette-wheel selection weighted by τ^α · η^β.
///
/// With a fixed seed the outcome is a deterministic function of call
/// order, pheromone state, and domain order; domains iterate in insertion
/// order, so runs are reproducible end to end.
#[derive(Debug)]
pub struct ProbabilisticSelector<H = UniformHeuristic> {
    rng: StdRng,
    heuristic: H,
}

impl ProbabilisticSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            heuristic: UniformHeuristic,
        }
    }
}

impl<H: ValueHeuristic> ProbabilisticSelector<H> {
    pub fn with_heuristic(seed: u64, heuristic: H) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            heuristic,
        }
    }
}

impl<H: ValueHeuristic> ValueSelector for ProbabilisticSelector<H> {
    fn select(
        &mut self,
        variable: VariableId,
        domain: &[Value],
        pheromones: &PheromoneMatrix,
        parameters: &AcoParameters,
    ) -> Result<Option<Value>> {
        if domain.is_empty() {
            return Ok(None);
        }
        // A forced value costs no randomness.
        if let &[only] = domain {
            return Ok(Some(only));
        }

        let weights: Vec<f64> = domain
            .iter()
            .map(|&value| {
                let tau = pheromones.get(variable, value);
                let eta = self.heuristic.eta(variable, value);
                tau.powf(parameters.alpha()) * eta.powf(parameters.beta())
            })
            .collect();
        let total: f64 = weights.iter().sum();
        if !(total > 0.0) {
            return Err(EngineError::DegenerateWeights { variable }.into());
        }

        let target = self.rng.gen::<f64>() * total;
        let mut cumulative = 0.0;
        for (&value, &weight) in domain.iter().zip(&weights) {
            cumulative += weight;
            if cumulative >= target {
                return Ok(Some(value));
            }
        }

        // Rounding can leave the accumulated sum a hair below the target.
        Ok(Some(domain[domain.len() - 1]))
    }
}
