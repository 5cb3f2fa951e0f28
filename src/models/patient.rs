use serde::Serialize;
use crate::config::PatientConfig;
use crate::error::AdherenceResult;
use crate::simulation::RandomSource;
use super::{NamePool, Treatment, WellBeing};

/// The simulated patient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Patient {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub treatments: Vec<Treatment>,
    pub well_being: WellBeing,
    /// Per-dose probability that an intake goes unmarked.
    #[serde(rename = "miss_medication_likelihood")]
    pub miss_likelihood: f64,
}

impl Patient {
    /// Draws identity and starting state for a patient following `treatments`.
    ///
    /// Draw order: first name, last name, age, well-being, miss likelihood.
    pub fn generate<R: RandomSource>(
        config: &PatientConfig,
        treatments: Vec<Treatment>,
        names: &NamePool,
        rng: &mut R,
    ) -> AdherenceResult<Self> {
        let first_name = names.first_name(rng)?;
        let last_name = names.last_name(rng)?;

        let (age_min, age_max) = config.age_bounds;
        let age = rng.int_in_range(i64::from(age_min), i64::from(age_max)) as u32;

        let (wb_min, wb_max) = config.initial_well_being_bounds;
        let well_being = WellBeing::new(rng.int_in_range(i64::from(wb_min), i64::from(wb_max)));

        let (miss_min, miss_max) = config.miss_likelihood_bounds;
        let miss_likelihood = rng.float_in_range(miss_min, miss_max);

        Ok(Self {
            first_name,
            last_name,
            age,
            treatments,
            well_being,
            miss_likelihood,
        })
    }
}
