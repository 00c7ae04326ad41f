//! The Feature Store: one immutable record per municipality.
//!
//! Built exactly once at startup. An external CSV source takes
//! precedence; when it cannot be used, a synthetic set is generated
//! from a single seeded stream and exported for inspection.
//!
//! RULE: The store is never mutated after construction.

use crate::{
    categories::{decompose_all, CategoryRates, CATEGORY_MAX, CATEGORY_MIN},
    config::AppConfig,
    error::DataSourceError,
    event::{StartupEvent, StartupLog},
    rng::{RngBank, SeededStream, StageSlot},
    types::{CityName, Features},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Municipalities generated when no external source is available.
pub const UNION_COUNTY_CITIES: [&str; 21] = [
    "Elizabeth", "Plainfield", "Union Township", "Westfield", "Linden",
    "Rahway", "Summit", "Cranford", "Hillside", "Roselle",
    "Berkeley Heights", "Clark", "Roselle Park", "New Providence", "Scotch Plains",
    "Fanwood", "Garwood", "Kenilworth", "Mountainside", "Springfield", "Winfield",
];

pub const SCAM_RATE_FLOOR: f64 = 10.0;
pub const SCAM_RATE_SPAN: f64 = 90.0;
/// Assigned to every record when all raw scores are equal.
pub const DEGENERATE_SCAM_RATE: f64 = 55.0;

const REQUIRED_COLUMNS: [&str; 10] = [
    "city",
    "population",
    "median_income",
    "elderly_percentage",
    "internet_usage",
    "police_per_capita",
    "prior_scam_reports",
    "financial_institutions",
    "tech_literacy_score",
    "scam_rate",
];

#[derive(Debug, Clone, PartialEq)]
pub struct MunicipalityRecord {
    pub city:       CityName,
    pub features:   Features,
    pub scam_rate:  f64,
    /// Absent only when an external source omitted the category columns.
    pub categories: Option<CategoryRates>,
}

/// Where the store's records came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataOrigin {
    External { path: String },
    Synthetic { seed: u64 },
}

/// Flat row layout shared by the external source and the export.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CsvRow {
    city: String,
    population: u64,
    median_income: f64,
    elderly_percentage: f64,
    internet_usage: f64,
    police_per_capita: f64,
    prior_scam_reports: u64,
    financial_institutions: u64,
    tech_literacy_score: f64,
    scam_rate: f64,
    #[serde(default)]
    phone_scam_rate: Option<f64>,
    #[serde(default)]
    email_scam_rate: Option<f64>,
    #[serde(default)]
    text_scam_rate: Option<f64>,
    #[serde(default)]
    in_person_scam_rate: Option<f64>,
    #[serde(default)]
    social_media_scam_rate: Option<f64>,
}

impl CsvRow {
    fn into_record(self) -> MunicipalityRecord {
        let categories = match (
            self.phone_scam_rate,
            self.email_scam_rate,
            self.text_scam_rate,
            self.in_person_scam_rate,
            self.social_media_scam_rate,
        ) {
            (Some(phone), Some(email), Some(text), Some(in_person), Some(social_media)) => {
                Some(CategoryRates { phone, email, text, in_person, social_media })
            }
            _ => None,
        };
        MunicipalityRecord {
            city: self.city,
            features: Features {
                population:             self.population,
                median_income:          self.median_income,
                elderly_percentage:     self.elderly_percentage,
                internet_usage:         self.internet_usage,
                police_per_capita:      self.police_per_capita,
                prior_scam_reports:     self.prior_scam_reports,
                financial_institutions: self.financial_institutions,
                tech_literacy_score:    self.tech_literacy_score,
            },
            scam_rate: self.scam_rate,
            categories,
        }
    }

    fn from_record(record: &MunicipalityRecord) -> Self {
        let f = &record.features;
        let c = record.categories.as_ref();
        Self {
            city: record.city.clone(),
            population: f.population,
            median_income: f.median_income,
            elderly_percentage: f.elderly_percentage,
            internet_usage: f.internet_usage,
            police_per_capita: f.police_per_capita,
            prior_scam_reports: f.prior_scam_reports,
            financial_institutions: f.financial_institutions,
            tech_literacy_score: f.tech_literacy_score,
            scam_rate: record.scam_rate,
            phone_scam_rate: c.map(|c| c.phone),
            email_scam_rate: c.map(|c| c.email),
            text_scam_rate: c.map(|c| c.text),
            in_person_scam_rate: c.map(|c| c.in_person),
            social_media_scam_rate: c.map(|c| c.social_media),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeatureStore {
    records: Vec<MunicipalityRecord>,
    index:   HashMap<CityName, usize>,
    origin:  DataOrigin,
}

impl FeatureStore {
    /// Build a store, rejecting duplicate city names.
    pub fn from_records(
        records: Vec<MunicipalityRecord>,
        origin: DataOrigin,
    ) -> Result<Self, DataSourceError> {
        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if index.insert(record.city.clone(), i).is_some() {
                return Err(DataSourceError::DuplicateCity(record.city.clone()));
            }
        }
        Ok(Self { records, index, origin })
    }

    /// Initial load: external source first, synthetic fallback otherwise.
    /// The synthetic set is exported; export failure is recorded, not fatal.
    /// Only a failure of the synthetic set itself is returned.
    pub fn load_or_generate(
        config: &AppConfig,
        log: &mut StartupLog,
    ) -> Result<Self, DataSourceError> {
        let source = config.source_path.display().to_string();
        match Self::load_csv(&config.source_path) {
            Ok(store) => {
                log.record(StartupEvent::SourceLoaded {
                    path: source,
                    records: store.len(),
                });
                Ok(store)
            }
            Err(e) => {
                log.record(StartupEvent::SourceUnavailable {
                    path: source,
                    reason: e.to_string(),
                });
                let store = Self::generate(config.seed)?;
                log.record(StartupEvent::SyntheticGenerated {
                    seed: config.seed,
                    records: store.len(),
                });

                let export = config.export_path.display().to_string();
                match store.export_csv(&config.export_path) {
                    Ok(()) => log.record(StartupEvent::ExportWritten {
                        path: export,
                        records: store.len(),
                    }),
                    Err(e) => log.record(StartupEvent::ExportFailed {
                        path: export,
                        reason: e.to_string(),
                    }),
                }
                Ok(store)
            }
        }
    }

    /// Read an external source. Every failure is a DataSourceError.
    pub fn load_csv(path: &Path) -> Result<Self, DataSourceError> {
        let file = std::fs::File::open(path).map_err(|source| DataSourceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h.trim() == column) {
                return Err(DataSourceError::MissingColumn(column));
            }
        }

        let mut records = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            let record = row?.into_record();
            validate(&record)?;
            records.push(record);
        }
        if records.is_empty() {
            return Err(DataSourceError::Empty);
        }
        log::debug!("Parsed {} rows from {}", records.len(), path.display());

        Self::from_records(
            records,
            DataOrigin::External { path: path.display().to_string() },
        )
    }

    /// Synthetic Union County data from the fixed city list.
    pub fn generate(seed: u64) -> Result<Self, DataSourceError> {
        Self::synthesize(&UNION_COUNTY_CITIES, seed)
    }

    /// Synthetic data for an arbitrary list of distinct city names.
    ///
    /// One stream is seeded at the start. Feature columns are drawn one
    /// column at a time over all cities, then category columns likewise.
    /// A repeated name is rejected as DuplicateCity.
    pub fn synthesize(cities: &[&str], seed: u64) -> Result<Self, DataSourceError> {
        let mut rng = RngBank::new(seed).for_stage(StageSlot::Synthetic);
        let features = draw_features(cities.len(), &mut rng);

        let raw: Vec<f64> = features.iter().map(raw_scam_score).collect();
        let scam_rates = normalize_scores(&raw);
        let categories = decompose_all(&scam_rates, &mut rng);

        let records: Vec<MunicipalityRecord> = cities
            .iter()
            .zip(features)
            .zip(scam_rates)
            .zip(categories)
            .map(|(((city, features), scam_rate), categories)| MunicipalityRecord {
                city: (*city).to_string(),
                features,
                scam_rate,
                categories: Some(categories),
            })
            .collect();

        Self::from_records(records, DataOrigin::Synthetic { seed })
    }

    /// Write every record in store order to `path` as CSV.
    pub fn export_csv(&self, path: &Path) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_path(path)?;
        for record in &self.records {
            writer.serialize(CsvRow::from_record(record))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn get(&self, city: &str) -> Option<&MunicipalityRecord> {
        self.index.get(city).map(|&i| &self.records[i])
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[MunicipalityRecord] {
        &self.records
    }

    pub fn origin(&self) -> &DataOrigin {
        &self.origin
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn draw_features(n: usize, rng: &mut SeededStream) -> Vec<Features> {
    let population: Vec<u64> = (0..n).map(|_| rng.int_in(5_000, 130_000)).collect();
    let median_income: Vec<u64> = (0..n).map(|_| rng.int_in(40_000, 200_000)).collect();
    let elderly: Vec<f64> = (0..n).map(|_| rng.uniform(10.0, 25.0)).collect();
    let internet: Vec<f64> = (0..n).map(|_| rng.uniform(60.0, 95.0)).collect();
    let police: Vec<f64> = (0..n).map(|_| rng.uniform(1.0, 3.0)).collect();
    let reports: Vec<u64> = (0..n).map(|_| rng.int_in(10, 1_000)).collect();
    let institutions: Vec<u64> = (0..n).map(|_| rng.int_in(1, 15)).collect();
    let tech: Vec<f64> = (0..n).map(|_| rng.uniform(50.0, 90.0)).collect();

    (0..n)
        .map(|i| Features {
            population:             population[i],
            median_income:          median_income[i] as f64,
            elderly_percentage:     elderly[i],
            internet_usage:         internet[i],
            police_per_capita:      police[i],
            prior_scam_reports:     reports[i],
            financial_institutions: institutions[i],
            tech_literacy_score:    tech[i],
        })
        .collect()
}

/// Weighted linear combination of features, before normalization.
pub fn raw_scam_score(f: &Features) -> f64 {
    0.4 * (100_000.0 / f.median_income)
        + 0.2 * (f.elderly_percentage / 100.0)
        + 0.2 * (f.prior_scam_reports as f64 / f.population as f64 * 1000.0)
        - 0.1 * (f.tech_literacy_score / 100.0)
        - 0.1 * f.police_per_capita
}

/// Min-max scale raw scores into [10, 100].
/// Equal (or non-finite span) inputs all map to DEGENERATE_SCAM_RATE.
pub fn normalize_scores(raw: &[f64]) -> Vec<f64> {
    let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
    let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    if !(span.is_finite() && span > 0.0) {
        return vec![DEGENERATE_SCAM_RATE; raw.len()];
    }
    raw.iter()
        .map(|&r| SCAM_RATE_FLOOR + SCAM_RATE_SPAN * (r - min) / span)
        .collect()
}

fn validate(record: &MunicipalityRecord) -> Result<(), DataSourceError> {
    let f = &record.features;
    let invalid = |field: &'static str, value: f64| DataSourceError::InvalidValue {
        city: record.city.clone(),
        field,
        value,
    };
    let percent = 0.0..=100.0;

    if f.population == 0 {
        return Err(invalid("population", 0.0));
    }
    if !(f.median_income > 0.0) {
        return Err(invalid("median_income", f.median_income));
    }
    if !percent.contains(&f.elderly_percentage) {
        return Err(invalid("elderly_percentage", f.elderly_percentage));
    }
    if !percent.contains(&f.internet_usage) {
        return Err(invalid("internet_usage", f.internet_usage));
    }
    if !(f.police_per_capita > 0.0) {
        return Err(invalid("police_per_capita", f.police_per_capita));
    }
    if !percent.contains(&f.tech_literacy_score) {
        return Err(invalid("tech_literacy_score", f.tech_literacy_score));
    }
    if !(SCAM_RATE_FLOOR..=SCAM_RATE_FLOOR + SCAM_RATE_SPAN).contains(&record.scam_rate) {
        return Err(invalid("scam_rate", record.scam_rate));
    }
    if let Some(rates) = &record.categories {
        for (category, rate) in rates.iter() {
            if !(CATEGORY_MIN..=CATEGORY_MAX).contains(&rate) {
                return Err(invalid(category.name(), rate));
            }
        }
    }
    Ok(())
}
