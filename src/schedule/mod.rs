use chrono::NaiveDate;
use log::debug;
use crate::config::TreatmentConfig;
use crate::error::{AdherenceError, AdherenceResult};
use crate::models::{NamePool, Treatment};
use crate::simulation::RandomSource;

/// Treatment courses chained back to back: each starts the day the previous
/// one ends.
pub struct TreatmentSchedule {
    treatments: Vec<Treatment>,
}

impl TreatmentSchedule {
    pub fn generate<R: RandomSource>(
        config: &TreatmentConfig,
        n_treatments: u32,
        start_date: NaiveDate,
        names: &NamePool,
        rng: &mut R,
    ) -> AdherenceResult<Self> {
        if n_treatments < 1 {
            return Err(AdherenceError::InvalidConfig(
                "At least one treatment must be generated".to_string()
            ));
        }

        let mut treatments: Vec<Treatment> = Vec::with_capacity(n_treatments as usize);

        for _ in 0..n_treatments {
            let course_start = treatments.last()
                .map(Treatment::end_date)
                .unwrap_or(start_date);

            let treatment = Treatment::generate(config, course_start, names, rng)?;
            debug!(
                "Scheduled {} from {} for {} days (every {} days, {}x a day)",
                treatment.medication_name(),
                treatment.start_date(),
                treatment.duration_days(),
                treatment.reminder_interval_days(),
                treatment.reminder_times_a_day()
            );
            treatments.push(treatment);
        }

        Ok(Self { treatments })
    }

    pub fn treatments(&self) -> &[Treatment] {
        &self.treatments
    }

    /// Day after the last course ends.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.treatments.last().map(Treatment::end_date)
    }

    pub fn total_days(&self) -> u32 {
        self.treatments.iter().map(Treatment::duration_days).sum()
    }

    pub fn into_treatments(self) -> Vec<Treatment> {
        self.treatments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::simulation::SeededRandom;
    use chrono::Duration;

    #[test]
    fn test_courses_are_chained_without_gaps() {
        let config = Config::default();
        let names = NamePool::builtin();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        for seed in 0..10 {
            let mut rng = SeededRandom::new(Some(seed));
            let schedule = TreatmentSchedule::generate(&config.treatment, 5, start, &names, &mut rng).unwrap();
            let treatments = schedule.treatments();

            assert_eq!(treatments.len(), 5);
            assert_eq!(treatments[0].start_date(), start);
            for pair in treatments.windows(2) {
                assert_eq!(
                    pair[1].start_date(),
                    pair[0].start_date() + Duration::days(i64::from(pair[0].duration_days()))
                );
            }

            assert_eq!(
                schedule.end_date(),
                Some(start + Duration::days(i64::from(schedule.total_days())))
            );
        }
    }

    #[test]
    fn test_zero_treatments_rejected() {
        let config = Config::default();
        let names = NamePool::builtin();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut rng = SeededRandom::new(Some(1));

        let result = TreatmentSchedule::generate(&config.treatment, 0, start, &names, &mut rng);
        assert!(matches!(result, Err(AdherenceError::InvalidConfig(_))));
    }

    #[test]
    fn test_into_treatments() {
        let config = Config::default();
        let names = NamePool::builtin();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut rng = SeededRandom::new(Some(2));

        let schedule = TreatmentSchedule::generate(&config.treatment, 3, start, &names, &mut rng).unwrap();
        let expected = schedule.treatments().to_vec();
        assert_eq!(schedule.into_treatments(), expected);
    }
}
