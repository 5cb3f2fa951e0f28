use chrono::{Duration, NaiveDate};
use serde::Serialize;
use crate::config::TreatmentConfig;
use crate::error::{AdherenceError, AdherenceResult};
use crate::simulation::RandomSource;
use super::{NamePool, WellBeing};

/// Inputs for one medication course.
#[derive(Debug, Clone)]
pub struct TreatmentPlan {
    pub medication_name: String,
    pub start_date: NaiveDate,
    pub duration_days: u32,
    pub reminder_interval_days: u32,
    pub reminder_times_a_day: u32,
    pub well_being_impact_range: Vec<i32>,
}

/// One prescribed medication course and its reminder calendar.
///
/// The calendar is derived once at construction and never changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Treatment {
    medication_name: String,
    start_date: NaiveDate,
    duration_days: u32,
    reminder_interval_days: u32,
    reminder_times_a_day: u32,
    well_being_impact_range: Vec<i32>,
    reminder_dates: Vec<NaiveDate>,
}

impl Treatment {
    pub fn new(plan: TreatmentPlan) -> AdherenceResult<Self> {
        if plan.duration_days < 1 {
            return Err(AdherenceError::InvalidTreatment(
                format!("{}: duration must be at least one day", plan.medication_name)
            ));
        }
        if plan.reminder_interval_days < 1 {
            return Err(AdherenceError::InvalidTreatment(
                format!("{}: reminder interval must be at least one day", plan.medication_name)
            ));
        }
        if plan.reminder_times_a_day < 1 {
            return Err(AdherenceError::InvalidTreatment(
                format!("{}: at least one reminder a day is required", plan.medication_name)
            ));
        }
        if plan.well_being_impact_range.is_empty() {
            return Err(AdherenceError::InvalidTreatment(
                format!("{}: well-being impact range is empty", plan.medication_name)
            ));
        }

        if plan.start_date.checked_add_signed(Duration::days(i64::from(plan.duration_days))).is_none() {
            return Err(AdherenceError::InvalidTreatment(format!(
                "{}: {} days from {} runs past the latest supported date",
                plan.medication_name, plan.duration_days, plan.start_date
            )));
        }

        let reminder_dates = reminder_calendar(
            plan.start_date,
            plan.duration_days,
            plan.reminder_interval_days,
        );

        Ok(Self {
            medication_name: plan.medication_name,
            start_date: plan.start_date,
            duration_days: plan.duration_days,
            reminder_interval_days: plan.reminder_interval_days,
            reminder_times_a_day: plan.reminder_times_a_day,
            well_being_impact_range: plan.well_being_impact_range,
            reminder_dates,
        })
    }

    /// Draws a random course starting on `start_date`.
    ///
    /// Draw order: name, duration, interval, reminders a day, impact profile.
    pub fn generate<R: RandomSource>(
        config: &TreatmentConfig,
        start_date: NaiveDate,
        names: &NamePool,
        rng: &mut R,
    ) -> AdherenceResult<Self> {
        let medication_name = names.medication(rng)?;
        let duration_days = draw_u32(config.duration_bounds, rng);
        let reminder_interval_days = draw_u32(config.reminder_interval_bounds, rng);
        let reminder_times_a_day = draw_u32(config.reminder_times_a_day_bounds, rng);

        let profiles: Vec<&Vec<i32>> = config.well_being_impact_ranges.values().collect();
        let well_being_impact_range = rng.choose(&profiles)
            .map(|range| range.to_vec())
            .ok_or_else(|| AdherenceError::InvalidConfig(
                "No well-being impact range to choose from".to_string()
            ))?;

        Self::new(TreatmentPlan {
            medication_name,
            start_date,
            duration_days,
            reminder_interval_days,
            reminder_times_a_day,
            well_being_impact_range,
        })
    }

    pub fn medication_name(&self) -> &str {
        &self.medication_name
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    pub fn reminder_interval_days(&self) -> u32 {
        self.reminder_interval_days
    }

    pub fn reminder_times_a_day(&self) -> u32 {
        self.reminder_times_a_day
    }

    pub fn well_being_impact_range(&self) -> &[i32] {
        &self.well_being_impact_range
    }

    pub fn reminder_dates(&self) -> &[NaiveDate] {
        &self.reminder_dates
    }

    /// First day after the course (exclusive end). Representable by
    /// construction.
    pub fn end_date(&self) -> NaiveDate {
        self.start_date + Duration::days(i64::from(self.duration_days))
    }

    pub fn is_reminder_day(&self, day: NaiveDate) -> bool {
        self.reminder_dates.binary_search(&day).is_ok()
    }

    /// Shifts `well_being` by a delta drawn from the impact range, clamped to
    /// the scale, and returns the new value.
    pub fn impact_well_being<R: RandomSource>(&self, well_being: &mut WellBeing, rng: &mut R) -> WellBeing {
        // Non-empty is checked in `new`.
        let delta = rng.choose(&self.well_being_impact_range).copied().unwrap_or(0);
        *well_being = well_being.shifted(delta);
        *well_being
    }
}

/// Treatments with a reminder on `day`, in list order.
pub fn active_on(treatments: &[Treatment], day: NaiveDate) -> impl Iterator<Item = &Treatment> {
    treatments.iter().filter(move |t| t.is_reminder_day(day))
}

fn reminder_calendar(start_date: NaiveDate, duration_days: u32, interval_days: u32) -> Vec<NaiveDate> {
    (0..duration_days)
        .filter(|offset| offset % interval_days == 0)
        .map(|offset| start_date + Duration::days(i64::from(offset)))
        .collect()
}

fn draw_u32<R: RandomSource>((min, max): (u32, u32), rng: &mut R) -> u32 {
    rng.int_in_range(i64::from(min), i64::from(max)) as u32
}
