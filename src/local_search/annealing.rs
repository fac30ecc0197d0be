//! Simulated annealing over single-variable flips.
//!
//! Each iteration flips one random variable. Non-worsening flips are always
//! kept; a flip that loses `Δ` satisfied clauses survives with probability
//! `exp(−Δ/T)`. The temperature follows a [`CoolingSchedule`] and never
//! drops below `min_temperature`.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Lundy & Mees (1986), "Convergence of an annealing algorithm"

use rand::Rng;

use super::{install_best, LocalSearchStrategy};
use crate::model::Candidate;

/// How the temperature decreases between iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// `T_{k+1} = alpha · T_k`.
    Geometric { alpha: f64 },
    /// Straight line from the initial to the minimum temperature over the
    /// iteration budget of one call.
    Linear,
    /// `T_{k+1} = T_k / (1 + beta · T_k)`.
    LundyMees { beta: f64 },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.9 }
    }
}

/// Annealing parameters.
///
/// # Examples
///
/// ```
/// use sat_ga::local_search::{AnnealingConfig, CoolingSchedule};
///
/// let config = AnnealingConfig::default()
///     .with_initial_temperature(50.0)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.99 });
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealingConfig {
    pub initial_temperature: f64,
    pub min_temperature: f64,
    pub cooling: CoolingSchedule,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            min_temperature: 1e-6,
            cooling: CoolingSchedule::default(),
        }
    }
}

impl AnnealingConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    /// Shorthand for a geometric schedule with the given rate.
    pub fn with_cooling_rate(mut self, alpha: f64) -> Self {
        self.cooling = CoolingSchedule::Geometric { alpha };
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.initial_temperature <= 0.0 {
            return Err("initial_temperature must be positive".into());
        }
        if self.min_temperature <= 0.0 {
            return Err("min_temperature must be positive".into());
        }
        if self.min_temperature >= self.initial_temperature {
            return Err("min_temperature must be less than initial_temperature".into());
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if alpha <= 0.0 || alpha >= 1.0 {
                    return Err(format!("geometric alpha must be in (0, 1), got {alpha}"));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if beta <= 0.0 {
                    return Err(format!("lundy-mees beta must be positive, got {beta}"));
                }
            }
            CoolingSchedule::Linear => {}
        }
        Ok(())
    }

    fn temperature_after(&self, t: f64, step: usize, budget: usize) -> f64 {
        let next = match self.cooling {
            CoolingSchedule::Geometric { alpha } => t * alpha,
            CoolingSchedule::LundyMees { beta } => t / (1.0 + beta * t),
            CoolingSchedule::Linear => {
                let span = self.initial_temperature - self.min_temperature;
                self.initial_temperature - span * (step + 1) as f64 / budget.max(1) as f64
            }
        };
        next.max(self.min_temperature)
    }
}

/// Simulated annealing kernel. The temperature restarts from
/// `initial_temperature` on every call.
#[derive(Debug, Clone, Default)]
pub struct SimulatedAnnealing {
    config: AnnealingConfig,
}

impl SimulatedAnnealing {
    pub fn new(config: AnnealingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }
}

impl LocalSearchStrategy for SimulatedAnnealing {
    fn improve<R: Rng>(&mut self, candidate: &mut Candidate, max_iterations: usize, rng: &mut R) {
        let n = candidate.len();
        if n == 0 {
            return;
        }
        let instance = candidate.instance().clone();
        let total = instance.clause_count();

        let mut work = candidate.assignment().to_vec();
        let mut current = instance.satisfied_count(&work);
        let mut best = work.clone();
        let mut best_count = current;
        let mut temperature = self.config.initial_temperature;

        for step in 0..max_iterations {
            if best_count == total {
                break;
            }
            let var = rng.random_range(0..n);
            work[var] = !work[var];
            let count = instance.satisfied_count(&work);
            let delta = count as f64 - current as f64;

            let accept = delta >= 0.0 || rng.random::<f64>() < (delta / temperature).exp();
            if accept {
                current = count;
                if current > best_count {
                    best_count = current;
                    best.copy_from_slice(&work);
                }
            } else {
                work[var] = !work[var];
            }

            temperature = self.config.temperature_after(temperature, step, max_iterations);
        }

        install_best(candidate, best);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::tests::{small_instance, uf20};
    use crate::random::create_rng;

    #[test]
    fn test_default_config() {
        let config = AnnealingConfig::default();
        assert!((config.initial_temperature - 100.0).abs() < 1e-10);
        assert_eq!(config.cooling, CoolingSchedule::Geometric { alpha: 0.9 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = AnnealingConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_alpha() {
        assert!(AnnealingConfig::default()
            .with_cooling_rate(1.5)
            .validate()
            .is_err());
        assert!(AnnealingConfig::default()
            .with_cooling(CoolingSchedule::LundyMees { beta: 0.0 })
            .validate()
            .is_err());
    }

    #[test]
    fn test_schedules_decrease_and_floor() {
        let config = AnnealingConfig::default().with_min_temperature(1.0);
        let t = config.temperature_after(100.0, 0, 10);
        assert!((t - 90.0).abs() < 1e-9);
        assert!((config.temperature_after(1.05, 0, 10) - 1.0).abs() < 1e-12);

        let linear = config.with_cooling(CoolingSchedule::Linear);
        assert!((linear.temperature_after(100.0, 9, 10) - 1.0).abs() < 1e-9);
        assert!((linear.temperature_after(100.0, 4, 10) - 50.5).abs() < 1e-9);

        let lm = config.with_cooling(CoolingSchedule::LundyMees { beta: 0.01 });
        assert!(lm.temperature_after(100.0, 0, 10) < 100.0);
    }

    #[test]
    fn test_annealing_never_returns_worse() {
        for seed in 0..5 {
            let mut c = Candidate::new(uf20(), vec![seed % 2 == 0; 20]);
            let before = c.satisfied_count();
            SimulatedAnnealing::default().improve(&mut c, 300, &mut create_rng(seed));
            assert!(c.satisfied_count() >= before);
        }
    }

    #[test]
    fn test_annealing_solves_small_instance() {
        let mut c = Candidate::new(small_instance(), vec![false, false]);
        SimulatedAnnealing::default().improve(&mut c, 200, &mut create_rng(42));
        assert!(c.is_satisfied());
    }
}
