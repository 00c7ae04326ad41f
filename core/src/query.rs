//! Read-only lookups over the feature store.
//!
//! RULE: The only name rewrite is "union" (any case) → "Union Township".
//! Every other lookup is an exact, case-sensitive match.

use crate::{
    categories::CategoryRates,
    classifier::{classify, RiskLevel},
    error::QueryError,
    feature_store::{FeatureStore, MunicipalityRecord},
    narrative::{analyze, recommend},
    types::round1,
};
use serde::{Deserialize, Serialize};

pub const UNION_ALIAS: &str = "union";
pub const UNION_CANONICAL: &str = "Union Township";

/// One element of the all-municipalities listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySummary {
    pub city:       String,
    pub scam_rate:  f64,
    pub risk_level: RiskLevel,
    pub categories: CategoryRates,
    pub population: u64,
    pub analysis:   String,
}

/// Single-municipality detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityDetail {
    pub city:                String,
    pub risk_score:          f64,
    pub risk_level:          RiskLevel,
    pub phone_scam_risk:     f64,
    pub email_scam_risk:     f64,
    pub text_scam_risk:      f64,
    pub in_person_scam_risk: f64,
    pub analysis:            String,
    pub recommendations:     Vec<String>,
}

/// Apply the single alias rule.
pub fn normalize_city_name(name: &str) -> &str {
    if name.eq_ignore_ascii_case(UNION_ALIAS) {
        UNION_CANONICAL
    } else {
        name
    }
}

pub struct QueryService<'a> {
    store: &'a FeatureStore,
}

impl<'a> QueryService<'a> {
    pub fn new(store: &'a FeatureStore) -> Self {
        Self { store }
    }

    /// Every record in store order. Fails as a whole on the first
    /// incomplete record.
    pub fn list_all(&self) -> Result<Vec<CitySummary>, QueryError> {
        let out = self
            .store
            .records()
            .iter()
            .map(|record| {
                let rates = category_rates(record)?;
                Ok(CitySummary {
                    city:       record.city.clone(),
                    scam_rate:  round1(record.scam_rate),
                    risk_level: classify(record.scam_rate),
                    categories: CategoryRates {
                        phone:        round1(rates.phone),
                        email:        round1(rates.email),
                        text:         round1(rates.text),
                        in_person:    round1(rates.in_person),
                        social_media: round1(rates.social_media),
                    },
                    population: record.features.population,
                    analysis:   analyze(record, rates),
                })
            })
            .collect::<Result<Vec<_>, QueryError>>()?;
        log::info!("Scam data requested and returned for all {} cities", out.len());
        Ok(out)
    }

    pub fn get(&self, name: &str) -> Result<CityDetail, QueryError> {
        let city = normalize_city_name(name);
        let Some(record) = self.store.get(city) else {
            log::warn!("City data requested for unknown city: {city}");
            return Err(QueryError::NotFound { city: city.to_string() });
        };
        let rates = category_rates(record)?;

        let detail = CityDetail {
            city:                record.city.clone(),
            risk_score:          round1(record.scam_rate),
            risk_level:          classify(record.scam_rate),
            phone_scam_risk:     round1(rates.phone),
            email_scam_risk:     round1(rates.email),
            text_scam_risk:      round1(rates.text),
            in_person_scam_risk: round1(rates.in_person),
            analysis:            analyze(record, rates),
            recommendations:     recommend(record, rates),
        };
        log::info!("City data successfully returned for: {city}");
        Ok(detail)
    }
}

fn category_rates(record: &MunicipalityRecord) -> Result<&CategoryRates, QueryError> {
    record.categories.as_ref().ok_or_else(|| {
        let message = format!("Category rates missing for {}", record.city);
        log::error!("Error processing city data for {}: {message}", record.city);
        QueryError::Internal {
            city: record.city.clone(),
            message,
        }
    })
}
