//! Strategy registry.

use std::sync::Arc;

use crate::core::ModelError;
use crate::resolve::strategy::{ResolutionStrategy, StrategyKind};

/// Holds a fixed, injected list of strategies. No runtime registration; an
/// empty registry or a missing kind is a wiring defect surfaced as a
/// `Configuration` error, to be treated as fatal at startup.
pub struct StrategyRepository {
    strategies: Vec<Arc<dyn ResolutionStrategy>>,
}

impl StrategyRepository {
    pub fn new(strategies: Vec<Arc<dyn ResolutionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Linear search by declared kind.
    pub fn strategy(&self, kind: StrategyKind) -> Result<&Arc<dyn ResolutionStrategy>, ModelError> {
        self.strategies
            .iter()
            .find(|s| s.kind() == kind)
            .ok_or_else(|| {
                ModelError::configuration(format!("no strategy registered for kind '{kind}'"))
            })
    }
}
