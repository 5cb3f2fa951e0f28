use serde::Serialize;
use crate::models::Treatment;
use super::RandomSource;

/// How many of one treatment's due doses were taken on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTreatmentOutcome {
    pub medication_name: String,
    pub due_intakes: u32,
    pub marked_intakes: u32,
}

impl DailyTreatmentOutcome {
    /// Each due dose is missed independently with probability `miss_likelihood`,
    /// one uniform draw per dose.
    pub fn resolve<R: RandomSource>(treatment: &Treatment, miss_likelihood: f64, rng: &mut R) -> Self {
        let due_intakes = treatment.reminder_times_a_day();
        let missed = (0..due_intakes)
            .filter(|_| miss_likelihood > rng.unit_float())
            .count() as u32;

        Self {
            medication_name: treatment.medication_name().to_string(),
            due_intakes,
            marked_intakes: due_intakes - missed,
        }
    }

    pub fn any_marked(&self) -> bool {
        self.marked_intakes > 0
    }
}
