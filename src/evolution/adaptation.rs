//! # Adaptation
//!
//! Stall detection and the per-generation parameter schedule. A generation
//! is stalled when its best fitness moved by less than epsilon compared with
//! the previous generation; the stall count drives every adapted parameter:
//!
//! - mutation rate: `base + step × stall`, capped,
//! - population size: `base + growth × stall`,
//! - tournament size: per [`TournamentSchedule`].

use super::options::{EvolutionOptions, TournamentSchedule};

/// Counts consecutive generations without improvement.
#[derive(Debug, Clone)]
pub struct StallTracker {
    epsilon: f64,
    previous_best: Option<f64>,
    stall_count: usize,
}

impl StallTracker {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            previous_best: None,
            stall_count: 0,
        }
    }

    /// Records the best fitness of a generation and returns the updated
    /// stall count. The first observation is never a stall.
    pub fn observe(&mut self, best: f64) -> usize {
        match self.previous_best {
            Some(previous) if (best - previous).abs() < self.epsilon => self.stall_count += 1,
            _ => self.stall_count = 0,
        }
        self.previous_best = Some(best);
        self.stall_count
    }

    pub fn stall_count(&self) -> usize {
        self.stall_count
    }
}

/// Parameters in force for one reproduction step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptedParameters {
    pub tournament_size: usize,
    pub mutation_rate: f64,
    pub population_size: usize,
}

pub fn adapted_mutation_rate(base: f64, step: f64, max: f64, stall_count: usize) -> f64 {
    (base + step * stall_count as f64).min(max)
}

pub fn adapted_population_size(base: usize, growth: usize, stall_count: usize) -> usize {
    base.saturating_add(growth.saturating_mul(stall_count))
}

/// Tournament size for the adaptive schedule.
///
/// `progress` is `best / initial_best` clamped to `[0, 1]`; a generation
/// that has closed in on a perfect score gets the smallest tournament, and
/// every full `stall_period` of stalled generations adds one.
pub fn adaptive_tournament_size(
    min: usize,
    max: usize,
    stall_period: usize,
    progress: f64,
    stall_count: usize,
) -> usize {
    let progress = if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        1.0
    };
    let span = max.saturating_sub(min) as f64;
    let base = min + (span * progress).round() as usize;
    let boost = stall_count / stall_period.max(1);
    base.saturating_add(boost).min(max)
}

/// Produces the adapted parameters generation by generation.
#[derive(Debug, Clone)]
pub struct Adaptation {
    schedule: TournamentSchedule,
    base_mutation_rate: f64,
    mutation_rate_step: f64,
    max_mutation_rate: f64,
    base_population_size: usize,
    population_growth: usize,
    initial_best: Option<f64>,
    cycle_size: Option<usize>,
}

impl Adaptation {
    pub fn new(options: &EvolutionOptions) -> Self {
        Self {
            schedule: *options.get_tournament(),
            base_mutation_rate: options.get_mutation_rate(),
            mutation_rate_step: options.get_mutation_rate_step(),
            max_mutation_rate: options.get_max_mutation_rate(),
            base_population_size: options.get_population_size(),
            population_growth: options.get_population_growth(),
            initial_best: None,
            cycle_size: None,
        }
    }

    /// Advances the schedule by one generation.
    pub fn adapt(&mut self, best: f64, stall_count: usize) -> AdaptedParameters {
        let initial_best = *self.initial_best.get_or_insert(best);

        let tournament_size = match self.schedule {
            TournamentSchedule::Fixed(k) => k,
            TournamentSchedule::Cycle { min, max } => {
                let next = match self.cycle_size {
                    Some(size) if size < max => size + 1,
                    _ => min,
                };
                self.cycle_size = Some(next);
                next
            }
            TournamentSchedule::Adaptive {
                min,
                max,
                stall_period,
            } => {
                let progress = if initial_best > 0.0 {
                    best / initial_best
                } else {
                    0.0
                };
                adaptive_tournament_size(min, max, stall_period, progress, stall_count)
            }
        };

        AdaptedParameters {
            tournament_size,
            mutation_rate: adapted_mutation_rate(
                self.base_mutation_rate,
                self.mutation_rate_step,
                self.max_mutation_rate,
                stall_count,
            ),
            population_size: adapted_population_size(
                self.base_population_size,
                self.population_growth,
                stall_count,
            ),
        }
    }
}
