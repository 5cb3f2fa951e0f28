use super::SimulationLog;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct AdherenceSummary {
    pub n_days: usize,
    pub treatment_days: usize,
    pub total_due_intakes: u32,
    pub total_marked_intakes: u32,
    pub adherence_rate: f64,
    pub medications: Vec<MedicationAdherence>,
    pub well_being: WellBeingSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MedicationAdherence {
    pub medication_name: String,
    pub days_due: usize,
    pub due_intakes: u32,
    pub marked_intakes: u32,
    pub adherence_rate: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WellBeingSummary {
    pub mean: f64,
    pub sd: f64,
    pub min: u8,
    pub max: u8,
    pub final_value: u8,
}

impl AdherenceSummary {
    pub fn from_log(log: &SimulationLog) -> Self {
        let mut medications: Vec<MedicationAdherence> = Vec::new();

        // Keyed by name in first-seen order; two courses of the same
        // medication are pooled.
        for outcome in log.days.iter().flat_map(|day| &day.daily_treatment_info) {
            let entry = match medications.iter().position(|m| m.medication_name == outcome.medication_name) {
                Some(index) => &mut medications[index],
                None => {
                    medications.push(MedicationAdherence {
                        medication_name: outcome.medication_name.clone(),
                        days_due: 0,
                        due_intakes: 0,
                        marked_intakes: 0,
                        adherence_rate: 0.0,
                    });
                    let last = medications.len() - 1;
                    &mut medications[last]
                }
            };
            entry.days_due += 1;
            entry.due_intakes += outcome.due_intakes;
            entry.marked_intakes += outcome.marked_intakes;
        }
        for medication in &mut medications {
            medication.adherence_rate = rate(medication.marked_intakes, medication.due_intakes);
        }

        let trajectory = log.well_being_trajectory();
        let values: Vec<f64> = trajectory.iter().copied().map(f64::from).collect();
        let total_due_intakes = log.total_due_intakes();
        let total_marked_intakes = log.total_marked_intakes();

        Self {
            n_days: log.days.len(),
            treatment_days: log.days.iter().filter(|day| !day.daily_treatment_info.is_empty()).count(),
            total_due_intakes,
            total_marked_intakes,
            adherence_rate: rate(total_marked_intakes, total_due_intakes),
            medications,
            well_being: WellBeingSummary {
                mean: mean(&values),
                sd: std_dev(&values),
                min: trajectory.iter().copied().min().unwrap_or(0),
                max: trajectory.iter().copied().max().unwrap_or(0),
                final_value: log.final_well_being().value(),
            },
        }
    }
}

fn rate(marked: u32, due: u32) -> f64 {
    if due == 0 {
        0.0
    } else {
        f64::from(marked) / f64::from(due)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        0.0
    } else {
        let mean_val = mean(values);
        let variance = values.iter()
            .map(|v| (v - mean_val).powi(2))
            .sum::<f64>() / (values.len() - 1) as f64;
        variance.sqrt()
    }
}
