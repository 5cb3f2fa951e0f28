pub mod intake;
pub mod record;
pub mod random;
pub mod summary;

use chrono::{Duration, NaiveDate};
use log::{debug, info, warn};
use crate::config::Config;
use crate::error::AdherenceResult;
use crate::models::{active_on, NamePool, Patient};
use crate::schedule::TreatmentSchedule;

pub use self::intake::*;
pub use self::record::*;
pub use self::random::*;
pub use self::summary::*;

/// One simulated patient walked day by day through their treatment schedule.
pub struct SimulationRun<R: RandomSource = SeededRandom> {
    config: Config,
    rng: R,
    start_date: NaiveDate,
    patient: Patient,
}

impl SimulationRun<SeededRandom> {
    /// `seed` overrides the configured seed when given.
    pub fn new(config: Config, seed: Option<u64>) -> AdherenceResult<Self> {
        let seed = seed.or(config.general.random_seed);
        match seed {
            Some(s) => info!("Seeding simulation with {}", s),
            None => warn!("No random seed configured, the run will not be reproducible"),
        }

        Self::with_random_source(config, SeededRandom::new(seed))
    }
}

impl<R: RandomSource> SimulationRun<R> {
    /// Validates `config`, then draws the treatment schedule followed by the
    /// patient.
    pub fn with_random_source(config: Config, mut rng: R) -> AdherenceResult<Self> {
        config.validate()?;

        let start_date = config.resolved_start_date()?;
        let names = NamePool::from_config(config.names.as_ref());

        let schedule = TreatmentSchedule::generate(
            &config.treatment,
            config.patient.n_treatments,
            start_date,
            &names,
            &mut rng,
        )?;
        info!(
            "Generated {} treatments covering {} days from {} to {}",
            schedule.treatments().len(),
            schedule.total_days(),
            start_date,
            schedule.end_date().unwrap_or(start_date)
        );

        let patient = Patient::generate(&config.patient, schedule.into_treatments(), &names, &mut rng)?;
        debug!(
            "Patient {} {}, age {}, well-being {}, miss likelihood {:.3}",
            patient.first_name, patient.last_name, patient.age, patient.well_being, patient.miss_likelihood
        );

        Ok(Self { config, rng, start_date, patient })
    }

    pub fn patient(&self) -> &Patient {
        &self.patient
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Runs every configured day and returns the finished log. The window was
    /// checked against the calendar range by `Config::validate`.
    pub fn run(mut self) -> SimulationLog {
        let duration_days = self.config.general.duration_days;
        info!("Simulating {} days from {}", duration_days, self.start_date);

        let mut days = Vec::with_capacity(duration_days as usize);
        for offset in 0..duration_days {
            let day = self.start_date + Duration::days(i64::from(offset));
            days.push(self.simulate_day(day));
        }

        info!(
            "Simulation completed, final well-being {}",
            self.patient.well_being
        );

        SimulationLog { user: self.patient, days }
    }

    /// Active treatments are resolved in list order; each one with at least
    /// one marked dose shifts well-being before the next is resolved.
    fn simulate_day(&mut self, day: NaiveDate) -> DayRecord {
        let patient = &mut self.patient;
        let mut daily_treatment_info = Vec::new();

        for treatment in active_on(&patient.treatments, day) {
            let outcome = DailyTreatmentOutcome::resolve(treatment, patient.miss_likelihood, &mut self.rng);
            if outcome.any_marked() {
                treatment.impact_well_being(&mut patient.well_being, &mut self.rng);
            }
            daily_treatment_info.push(outcome);
        }

        debug!(
            "{}: well-being {}, {} treatment(s) due",
            day,
            patient.well_being,
            daily_treatment_info.len()
        );

        DayRecord {
            well_being: patient.well_being,
            date: day,
            daily_treatment_info,
        }
    }
}
