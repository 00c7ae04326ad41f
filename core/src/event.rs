//! The startup event log.
//!
//! RULE: Every startup milestone is recorded here, in the order it
//! happened, and mirrored to the log facade. Nothing is appended after
//! the application context is built.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StartupEvent {
    // ── Feature store ──────────────────────────────
    SourceLoaded {
        path: String,
        records: usize,
    },
    SourceUnavailable {
        path: String,
        reason: String,
    },
    SyntheticGenerated {
        seed: u64,
        records: usize,
    },
    ExportWritten {
        path: String,
        records: usize,
    },
    ExportFailed {
        path: String,
        reason: String,
    },

    // ── Risk model ─────────────────────────────────
    ModelTrained {
        n_trees: usize,
        n_features: usize,
        training_r2: f64,
    },
}

impl StartupEvent {
    /// Stable name for each variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SourceLoaded { .. }       => "source_loaded",
            Self::SourceUnavailable { .. }  => "source_unavailable",
            Self::SyntheticGenerated { .. } => "synthetic_generated",
            Self::ExportWritten { .. }      => "export_written",
            Self::ExportFailed { .. }       => "export_failed",
            Self::ModelTrained { .. }       => "model_trained",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StartupLog {
    events: Vec<StartupEvent>,
}

impl StartupLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: StartupEvent) {
        match &event {
            StartupEvent::SourceLoaded { path, records } => {
                log::info!("Loaded {records} municipality records from {path}");
            }
            StartupEvent::SourceUnavailable { path, reason } => {
                log::warn!("External data {path} unavailable ({reason}); using synthetic data");
            }
            StartupEvent::SyntheticGenerated { seed, records } => {
                log::info!("Generated synthetic scam data: {records} records, seed {seed}");
            }
            StartupEvent::ExportWritten { path, records } => {
                log::info!("Exported {records} synthetic records to {path}");
            }
            StartupEvent::ExportFailed { path, reason } => {
                log::error!("Could not export synthetic data to {path}: {reason}");
            }
            StartupEvent::ModelTrained { n_trees, n_features, training_r2 } => {
                log::info!(
                    "Risk model trained: {n_trees} trees over {n_features} features, in-sample R2 {training_r2:.3}"
                );
            }
        }
        self.events.push(event);
    }

    pub fn events(&self) -> &[StartupEvent] {
        &self.events
    }

    /// Whether any recorded event has the given kind.
    pub fn contains(&self, kind: &str) -> bool {
        self.events.iter().any(|e| e.kind() == kind)
    }
}
