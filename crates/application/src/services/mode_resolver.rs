//! Mode resolver
//!
//! Decides the effective transport mode of each leg. An explicit choice by
//! the traveler always wins; otherwise the mode is inferred from the leg's
//! great-circle distance through the suggestion ranking.

use std::sync::Arc;

use domain::entities::PlannedLeg;
use domain::value_objects::TransportMode;
use serde::Serialize;
use tracing::debug;

use crate::ports::TransportSuggestionPort;

/// Mode used when inference yields nothing usable
pub const FALLBACK_MODE: TransportMode = TransportMode::Driving;

/// The effective mode of a leg and where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedMode {
    /// Effective transport mode
    pub mode: TransportMode,
    /// True when the mode was inferred from distance
    pub was_inferred: bool,
}

impl ResolvedMode {
    /// A mode chosen by the traveler
    #[must_use]
    pub const fn explicit(mode: TransportMode) -> Self {
        Self {
            mode,
            was_inferred: false,
        }
    }

    /// A mode inferred from distance
    #[must_use]
    pub const fn inferred(mode: TransportMode) -> Self {
        Self {
            mode,
            was_inferred: true,
        }
    }
}

/// Resolves leg modes against a suggestion ranking
#[derive(Clone)]
pub struct ModeResolver {
    suggestions: Arc<dyn TransportSuggestionPort>,
}

impl std::fmt::Debug for ModeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeResolver")
            .field("suggestions", &"<TransportSuggestionPort>")
            .finish()
    }
}

impl ModeResolver {
    /// Create a resolver backed by the given ranking
    #[must_use]
    pub fn new(suggestions: Arc<dyn TransportSuggestionPort>) -> Self {
        Self { suggestions }
    }

    /// Resolve a leg using the explicit mode it carries
    #[must_use]
    pub fn resolve(&self, leg: &PlannedLeg) -> ResolvedMode {
        self.resolve_with(leg, leg.explicit_mode)
    }

    /// Resolve a leg against an explicit mode supplied by the caller
    #[must_use]
    pub fn resolve_with(&self, leg: &PlannedLeg, explicit: Option<TransportMode>) -> ResolvedMode {
        if let Some(mode) = explicit {
            return ResolvedMode::explicit(mode);
        }

        let distance_km = leg.haversine_km();
        let mode = self
            .suggestions
            .suggest(distance_km)
            .first()
            .copied()
            .unwrap_or(FALLBACK_MODE);

        debug!(leg = %leg.key(), distance_km, %mode, "Inferred transport mode");
        ResolvedMode::inferred(mode)
    }
}
