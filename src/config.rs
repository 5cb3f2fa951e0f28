use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use chrono::{Duration, Local, NaiveDate};
use crate::error::{AdherenceError, AdherenceResult};
use crate::models::WellBeing;

/// Longest simulation horizon or treatment course accepted, in days.
pub const MAX_DURATION_DAYS: u32 = 36_525;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub treatment: TreatmentConfig,
    #[serde(default)]
    pub patient: PatientConfig,
    #[serde(default)]
    pub names: Option<NamesConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub random_seed: Option<u64>, // None means a non-reproducible run
    pub start_date: Option<NaiveDate>,
    pub duration_days: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            random_seed: Some(100),
            start_date: None,
            duration_days: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TreatmentConfig {
    pub duration_bounds: (u32, u32),
    pub reminder_interval_bounds: (u32, u32), // every how many days
    pub reminder_times_a_day_bounds: (u32, u32),
    pub well_being_impact_ranges: BTreeMap<String, Vec<i32>>,
}

impl Default for TreatmentConfig {
    fn default() -> Self {
        let mut well_being_impact_ranges: BTreeMap<String, Vec<i32>> = BTreeMap::new();
        well_being_impact_ranges.insert("positive".to_string(), (0..3).collect());
        well_being_impact_ranges.insert("normal".to_string(), (-1..2).collect());

        Self {
            duration_bounds: (7, 10),
            reminder_interval_bounds: (1, 3),
            reminder_times_a_day_bounds: (1, 3),
            well_being_impact_ranges,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientConfig {
    pub n_treatments: u32,
    pub miss_likelihood_bounds: (f64, f64),
    pub age_bounds: (u32, u32),
    pub initial_well_being_bounds: (u8, u8),
}

impl Default for PatientConfig {
    fn default() -> Self {
        Self {
            n_treatments: 3,
            miss_likelihood_bounds: (0.1, 0.5),
            age_bounds: (45, 90),
            initial_well_being_bounds: (2, 4),
        }
    }
}

/// Custom name tables replacing the built-in ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamesConfig {
    pub medications: Vec<String>,
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> AdherenceResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> AdherenceResult<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// The configured start date, or `duration_days` before today when unset.
    pub fn resolved_start_date(&self) -> AdherenceResult<NaiveDate> {
        match self.general.start_date {
            Some(start_date) => Ok(start_date),
            None => Local::now().date_naive()
                .checked_sub_signed(Duration::days(i64::from(self.general.duration_days)))
                .ok_or_else(|| AdherenceError::InvalidConfig(format!(
                    "Simulation duration of {} days reaches before the earliest supported date",
                    self.general.duration_days
                ))),
        }
    }

    /// First day after the simulated window.
    pub fn resolved_end_date(&self) -> AdherenceResult<NaiveDate> {
        let start_date = self.resolved_start_date()?;
        start_date
            .checked_add_signed(Duration::days(i64::from(self.general.duration_days)))
            .ok_or_else(|| AdherenceError::InvalidConfig(format!(
                "Simulation of {} days from {} runs past the latest supported date",
                self.general.duration_days, start_date
            )))
    }

    pub fn validate(&self) -> AdherenceResult<()> {
        if self.general.duration_days < 1 {
            return Err(AdherenceError::InvalidConfig(
                "Simulation duration must be at least one day".to_string()
            ));
        }
        if self.general.duration_days > MAX_DURATION_DAYS {
            return Err(AdherenceError::InvalidConfig(format!(
                "Simulation duration must not exceed {} days", MAX_DURATION_DAYS
            )));
        }
        self.resolved_end_date()?;

        self.validate_treatment()?;
        self.validate_patient()?;

        if let Some(names) = &self.names {
            for (pool, entries) in [
                ("medications", &names.medications),
                ("first_names", &names.first_names),
                ("last_names", &names.last_names),
            ] {
                if entries.is_empty() {
                    return Err(AdherenceError::InvalidConfig(
                        format!("Name pool {} must not be empty", pool)
                    ));
                }
            }
        }

        Ok(())
    }

    fn validate_treatment(&self) -> AdherenceResult<()> {
        let treatment = &self.treatment;

        check_bounds("treatment.duration_bounds", treatment.duration_bounds)?;
        check_bounds("treatment.reminder_interval_bounds", treatment.reminder_interval_bounds)?;
        check_bounds("treatment.reminder_times_a_day_bounds", treatment.reminder_times_a_day_bounds)?;

        if treatment.duration_bounds.0 < 1 {
            return Err(AdherenceError::InvalidConfig(
                "Treatment duration must be at least one day".to_string()
            ));
        }
        if treatment.duration_bounds.1 > MAX_DURATION_DAYS {
            return Err(AdherenceError::InvalidConfig(format!(
                "Treatment duration must not exceed {} days", MAX_DURATION_DAYS
            )));
        }
        if treatment.reminder_interval_bounds.0 < 1 {
            return Err(AdherenceError::InvalidConfig(
                "Reminder interval must be at least one day".to_string()
            ));
        }
        if treatment.reminder_times_a_day_bounds.0 < 1 {
            return Err(AdherenceError::InvalidConfig(
                "At least one reminder a day is required".to_string()
            ));
        }

        if treatment.well_being_impact_ranges.is_empty() {
            return Err(AdherenceError::InvalidConfig(
                "At least one well-being impact range must be specified".to_string()
            ));
        }
        for (name, range) in &treatment.well_being_impact_ranges {
            if range.is_empty() {
                return Err(AdherenceError::InvalidConfig(
                    format!("Well-being impact range {} is empty", name)
                ));
            }
        }

        Ok(())
    }

    fn validate_patient(&self) -> AdherenceResult<()> {
        let patient = &self.patient;

        if patient.n_treatments < 1 {
            return Err(AdherenceError::InvalidConfig(
                "At least one treatment must be generated".to_string()
            ));
        }

        check_bounds("patient.age_bounds", patient.age_bounds)?;
        check_bounds("patient.initial_well_being_bounds", patient.initial_well_being_bounds)?;

        let (wb_min, wb_max) = patient.initial_well_being_bounds;
        if wb_min < WellBeing::MIN || wb_max > WellBeing::MAX {
            return Err(AdherenceError::InvalidConfig(format!(
                "Initial well-being must lie within [{}, {}]",
                WellBeing::MIN, WellBeing::MAX
            )));
        }

        let (miss_min, miss_max) = patient.miss_likelihood_bounds;
        if !(miss_min.is_finite() && miss_max.is_finite()) || miss_min > miss_max {
            return Err(AdherenceError::InvalidConfig(format!(
                "patient.miss_likelihood_bounds are inverted or not finite: ({}, {})",
                miss_min, miss_max
            )));
        }
        if miss_min < 0.0 || miss_max >= 1.0 {
            return Err(AdherenceError::InvalidConfig(
                "Miss likelihood must lie within [0, 1)".to_string()
            ));
        }

        Ok(())
    }
}

fn check_bounds<T: PartialOrd + std::fmt::Display>(name: &str, (min, max): (T, T)) -> AdherenceResult<()> {
    if min > max {
        return Err(AdherenceError::InvalidConfig(
            format!("{} are inverted: min {} > max {}", name, min, max)
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.random_seed, Some(100));
        assert_eq!(config.treatment.well_being_impact_ranges["positive"], vec![0, 1, 2]);
        assert_eq!(config.treatment.well_being_impact_ranges["normal"], vec![-1, 0, 1]);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json(r#"{
            "general": { "start_date": "2024-01-01", "duration_days": 14 },
            "patient": { "n_treatments": 2 }
        }"#).unwrap();

        assert_eq!(config.general.duration_days, 14);
        assert_eq!(config.general.random_seed, Some(100));
        assert_eq!(config.patient.n_treatments, 2);
        assert_eq!(config.patient.age_bounds, (45, 90));
        assert_eq!(config.treatment.duration_bounds, (7, 10));
        assert_eq!(
            config.resolved_start_date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(
            config.resolved_end_date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_start_date_defaults_to_duration_before_today() {
        let config = Config::default();
        let expected = Local::now().date_naive() - Duration::days(30);
        assert_eq!(config.resolved_start_date().unwrap(), expected);
    }

    #[test]
    fn test_zero_reminder_interval_rejected() {
        let mut config = Config::default();
        config.treatment.reminder_interval_bounds = (0, 3);
        assert!(matches!(config.validate(), Err(AdherenceError::InvalidConfig(_))));
    }

    #[test]
    fn test_oversized_horizon_rejected() {
        let mut config = Config::default();
        config.general.duration_days = u32::MAX;
        assert!(matches!(config.validate(), Err(AdherenceError::InvalidConfig(_))));

        config.general.duration_days = MAX_DURATION_DAYS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_oversized_treatment_duration_rejected() {
        let mut config = Config::default();
        config.treatment.duration_bounds = (200_000_000, 200_000_000);
        config.treatment.reminder_interval_bounds = (100_000_000, 100_000_000);
        config.patient.n_treatments = 2;
        assert!(matches!(config.validate(), Err(AdherenceError::InvalidConfig(_))));
    }

    #[test]
    fn test_horizon_past_latest_date_rejected() {
        let mut config = Config::default();
        config.general.start_date = Some(NaiveDate::MAX - Duration::days(10));
        config.general.duration_days = 30;
        assert!(matches!(config.resolved_end_date(), Err(AdherenceError::InvalidConfig(_))));
        assert!(config.validate().is_err());

        config.general.duration_days = 10;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let mut config = Config::default();
        config.patient.age_bounds = (90, 45);
        assert!(matches!(config.validate(), Err(AdherenceError::InvalidConfig(_))));

        let mut config = Config::default();
        config.patient.miss_likelihood_bounds = (0.5, 0.1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_treatment_count_must_be_positive() {
        let config = Config::from_json(r#"{ "patient": { "n_treatments": 0 } }"#);
        assert!(matches!(config, Err(AdherenceError::InvalidConfig(_))));
    }

    #[test]
    fn test_miss_likelihood_must_be_below_one() {
        let mut config = Config::default();
        config.patient.miss_likelihood_bounds = (0.2, 1.0);
        assert!(config.validate().is_err());

        config.patient.miss_likelihood_bounds = (-0.1, 0.5);
        assert!(config.validate().is_err());

        config.patient.miss_likelihood_bounds = (0.0, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_impact_profile_rejected() {
        let mut config = Config::default();
        config.treatment.well_being_impact_ranges.insert("flat".to_string(), vec![]);
        assert!(config.validate().is_err());

        config.treatment.well_being_impact_ranges.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_custom_name_pool_rejected() {
        let mut config = Config::default();
        config.names = Some(NamesConfig {
            medications: vec!["Zentravil".to_string()],
            first_names: vec![],
            last_names: vec!["Okafor".to_string()],
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_initial_well_being_outside_scale_rejected() {
        let mut config = Config::default();
        config.patient.initial_well_being_bounds = (0, 4);
        assert!(config.validate().is_err());
    }
}
