// Candidate ranking engine.
// Pure and synchronous: no I/O, no shared mutable state. Everything that talks
// to the database or the model providers lives in `rankings`, `candidates` and `jobs`.

pub mod config;
pub mod domain;
pub mod education;
pub mod engine;
pub mod experience;
pub mod normalizer;
pub mod semantic;
pub mod skills;
pub mod types;

pub use config::{RankingConfig, RankingError, Weights};
pub use engine::{rank, RankingEngine};
pub use types::{CandidateProfile, JobRequirement, ScoreBreakdown, Tier};
