use chrono::NaiveDate;
use serde::Serialize;
use crate::models::{Patient, WellBeing};
use super::DailyTreatmentOutcome;

/// Well-being after the day's updates plus every outcome of that day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRecord {
    pub well_being: WellBeing,
    pub date: NaiveDate,
    pub daily_treatment_info: Vec<DailyTreatmentOutcome>,
}

impl DayRecord {
    pub fn due_intakes(&self) -> u32 {
        self.daily_treatment_info.iter().map(|o| o.due_intakes).sum()
    }

    pub fn marked_intakes(&self) -> u32 {
        self.daily_treatment_info.iter().map(|o| o.marked_intakes).sum()
    }
}

/// Completed run: the patient as it stood after the last day, and one
/// record per simulated day in date order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationLog {
    pub user: Patient,
    pub days: Vec<DayRecord>,
}

impl SimulationLog {
    pub fn well_being_trajectory(&self) -> Vec<u8> {
        self.days.iter().map(|day| day.well_being.value()).collect()
    }

    pub fn final_well_being(&self) -> WellBeing {
        self.user.well_being
    }

    pub fn total_due_intakes(&self) -> u32 {
        self.days.iter().map(DayRecord::due_intakes).sum()
    }

    pub fn total_marked_intakes(&self) -> u32 {
        self.days.iter().map(DayRecord::marked_intakes).sum()
    }
}
