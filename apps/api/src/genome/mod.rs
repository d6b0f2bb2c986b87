// Canonical profile pipeline.
// Raw upstream document -> entity transformers + skill aggregator
// (proficiency normalizer, percentile engine) -> assembler.
// Everything below `handlers` is synchronous and never fails.

pub mod assembler;
pub mod handlers;
pub mod models;
pub mod percentile;
pub mod proficiency;
pub mod raw;
pub mod skills;
pub mod transform;
