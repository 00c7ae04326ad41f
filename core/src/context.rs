//! The application context: everything built once at startup.
//!
//! STARTUP ORDER (fixed):
//!   1. Feature store  (external source, else synthetic + export)
//!   2. Risk model     (trained on the complete store)
//!
//! RULES:
//!   - Built exactly once, then shared read-only (wrap in Arc).
//!   - No retraining, no reloading, no incremental updates.
//!   - The model is trained as a startup check; serving reads the
//!     stored scam rates, never model predictions.

use crate::{
    config::AppConfig,
    error::PipelineResult,
    event::{StartupEvent, StartupLog},
    feature_store::FeatureStore,
    model::RiskModel,
    query::QueryService,
    types::FEATURE_COUNT,
};

#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    store:      FeatureStore,
    model:      RiskModel,
    startup:    StartupLog,
}

impl AppContext {
    /// Run the startup pipeline. Blocks until the model is trained.
    pub fn initialize(config: AppConfig) -> PipelineResult<Self> {
        let mut startup = StartupLog::new();

        let store = FeatureStore::load_or_generate(&config, &mut startup)?;
        let model = RiskModel::train(store.records(), &config.forest, config.model_seed)?;

        startup.record(StartupEvent::ModelTrained {
            n_trees: model.n_trees(),
            n_features: FEATURE_COUNT,
            training_r2: model.training_r2(),
        });
        for (name, importance) in model.feature_importances() {
            log::debug!("feature importance {name}: {importance:.4}");
        }

        Ok(Self { config, store, model, startup })
    }

    pub fn query(&self) -> QueryService<'_> {
        QueryService::new(&self.store)
    }

    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    pub fn model(&self) -> &RiskModel {
        &self.model
    }

    pub fn startup_log(&self) -> &StartupLog {
        &self.startup
    }
}
