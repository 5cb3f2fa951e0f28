use crate::simulation::{AdherenceSummary, SimulationLog};
use crate::error::AdherenceResult;
use std::path::Path;
use std::fs::File;
use log::info;

pub const RESULT_FILE: &str = "simulation_result.json";
pub const DAILY_LOG_FILE: &str = "daily_log.csv";
pub const SUMMARY_FILE: &str = "adherence_summary.json";
pub const REPORT_FILE: &str = "simulation_report.md";

pub fn save_results<P: AsRef<Path>>(log: &SimulationLog, output_dir: P) -> AdherenceResult<()> {
    let output_path = output_dir.as_ref();

    // Save patient, treatments and day log
    save_simulation_log(log, &output_path.join(RESULT_FILE))?;

    // Save per-day outcome rows
    save_daily_log(log, &output_path.join(DAILY_LOG_FILE))?;

    // Save adherence summary
    let summary = AdherenceSummary::from_log(log);
    save_summary(&summary, &output_path.join(SUMMARY_FILE))?;

    info!("All results saved to {:?}", output_path);
    Ok(())
}

fn save_simulation_log<P: AsRef<Path>>(log: &SimulationLog, path: P) -> AdherenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, log)?;
    Ok(())
}

fn save_daily_log<P: AsRef<Path>>(log: &SimulationLog, path: P) -> AdherenceResult<()> {
    let mut writer = csv::Writer::from_path(path)?;

    // Write header
    writer.write_record(&[
        "DATE", "WELL_BEING", "MEDICATION", "DUE_INTAKES", "MARKED_INTAKES"
    ])?;

    // Write data
    for day in &log.days {
        let date = day.date.to_string();
        let well_being = day.well_being.to_string();

        // Days without reminders still get a row
        if day.daily_treatment_info.is_empty() {
            writer.write_record(&[date.as_str(), well_being.as_str(), "", "", ""])?;
            continue;
        }

        for outcome in &day.daily_treatment_info {
            writer.write_record(&[
                date.clone(),
                well_being.clone(),
                outcome.medication_name.clone(),
                outcome.due_intakes.to_string(),
                outcome.marked_intakes.to_string(),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn save_summary<P: AsRef<Path>>(summary: &AdherenceSummary, path: P) -> AdherenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, summary)?;
    Ok(())
}

/// Writes a Markdown overview of the run next to the data files.
pub fn generate_report<P: AsRef<Path>>(log: &SimulationLog, output_dir: P) -> AdherenceResult<()> {
    let report_path = output_dir.as_ref().join(REPORT_FILE);

    let summary = AdherenceSummary::from_log(log);
    let patient = &log.user;

    let period = match (log.days.first(), log.days.last()) {
        (Some(first), Some(last)) => format!("{} to {}", first.date, last.date),
        _ => "no days simulated".to_string(),
    };

    let treatments: String = patient.treatments.iter()
        .map(|t| format!(
            "| {} | {} | {} | every {} day(s), {} in total | {}x | {:?} |\n",
            t.medication_name(),
            t.start_date(),
            t.duration_days(),
            t.reminder_interval_days(),
            t.reminder_dates().len(),
            t.reminder_times_a_day(),
            t.well_being_impact_range()
        ))
        .collect();

    let medications: String = summary.medications.iter()
        .map(|m| format!(
            "| {} | {} | {} | {} | {:.1}% |\n",
            m.medication_name,
            m.days_due,
            m.due_intakes,
            m.marked_intakes,
            m.adherence_rate * 100.0
        ))
        .collect();

    let report_content = format!(
        r#"# Medication Adherence Simulation Report

## Patient
- **Name**: {} {}
- **Age**: {}
- **Miss likelihood per dose**: {:.3}
- **Period**: {} ({} days, {} with treatment reminders)

## Treatments
| Medication | Start | Days | Reminders | Per day | Well-being impact |
|---|---|---|---|---|---|
{}
## Adherence
- **Due intakes**: {}
- **Marked intakes**: {}
- **Overall adherence**: {:.1}%

| Medication | Days due | Due | Marked | Adherence |
|---|---|---|---|---|
{}
## Well-being
- Mean: {:.2}
- SD: {:.2}
- Range: {} to {}
- Final: {}

## Files Generated
- `{}`: Patient, treatments and day-by-day log
- `{}`: One row per day and due treatment
- `{}`: Adherence and well-being statistics
"#,
        patient.first_name,
        patient.last_name,
        patient.age,
        patient.miss_likelihood,
        period,
        summary.n_days,
        summary.treatment_days,
        treatments,
        summary.total_due_intakes,
        summary.total_marked_intakes,
        summary.adherence_rate * 100.0,
        medications,
        summary.well_being.mean,
        summary.well_being.sd,
        summary.well_being.min,
        summary.well_being.max,
        summary.well_being.final_value,
        RESULT_FILE,
        DAILY_LOG_FILE,
        SUMMARY_FILE,
    );

    std::fs::write(&report_path, report_content)?;
    info!("Report written to {:?}", report_path);
    Ok(())
}
