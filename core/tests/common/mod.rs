#![allow(dead_code)]

use scamrisk_core::{
    categories::CategoryRates,
    feature_store::MunicipalityRecord,
    types::Features,
};

pub fn features(median_income: f64, elderly_percentage: f64) -> Features {
    Features {
        population: 40_000,
        median_income,
        elderly_percentage,
        internet_usage: 80.0,
        police_per_capita: 2.0,
        prior_scam_reports: 200,
        financial_institutions: 5,
        tech_literacy_score: 70.0,
    }
}

pub fn rates(phone: f64, email: f64, text: f64, in_person: f64, social_media: f64) -> CategoryRates {
    CategoryRates { phone, email, text, in_person, social_media }
}

pub fn record(city: &str, scam_rate: f64, categories: CategoryRates) -> MunicipalityRecord {
    MunicipalityRecord {
        city: city.to_string(),
        features: features(90_000.0, 15.0),
        scam_rate,
        categories: Some(categories),
    }
}

pub const CSV_HEADER: &str = "city,population,median_income,elderly_percentage,internet_usage,\
police_per_capita,prior_scam_reports,financial_institutions,tech_literacy_score,scam_rate,\
phone_scam_rate,email_scam_rate,text_scam_rate,in_person_scam_rate,social_media_scam_rate";
