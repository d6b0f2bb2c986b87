use std::sync::Arc;

use crate::config::Config;
use crate::genome::assembler::GenomeAssembler;
use crate::upstream::ProfileSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable profile source. Default: `GenomeClient` against the upstream API.
    pub source: Arc<dyn ProfileSource>,
    /// Canonical-profile pipeline with the reference table loaded at startup.
    pub assembler: Arc<GenomeAssembler>,
    pub config: Config,
}
