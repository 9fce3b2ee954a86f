//! # Genetic Operators
//!
//! Selection, crossover, mutation and shuffle. All randomness comes from the
//! caller's [`RandomNumberGenerator`](crate::rng::RandomNumberGenerator), and
//! every operator output owns its genes outright: nothing an operator returns
//! shares a gene with its inputs.
pub mod crossover;
pub mod mutation;
pub mod selection;
pub mod shuffle;

pub use crossover::crossover;
pub use mutation::{floor_delta, mutate_norm, GaussianMutation};
pub use selection::{SelectionStrategy, TournamentSelection};
pub use shuffle::shuffle;
