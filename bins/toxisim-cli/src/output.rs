//! Result rendering for the command line.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use toxisim_core::constants::EU_AFM1_LIMIT;
use toxisim_core::types::{EfficiencyPrediction, RateConstant, SimulationResult};
use toxisim_kinetics::sensitivity::{DoseCurve, GridOptimum};
use toxisim_kinetics::{EfficiencyGrid, FirstOrderFit, Report};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
pub struct SweepOutput {
    pub curves: Vec<DoseCurve>,
    pub rates: Vec<(f64, RateConstant)>,
    pub grid: EfficiencyGrid,
    pub optimum: Option<GridOptimum>,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn half_life_text(rate: &RateConstant) -> String {
    match rate.half_life() {
        Some(h) => format!("{h:.2} h"),
        None => "none (k = 0)".to_string(),
    }
}

pub fn print_simulation(result: &SimulationResult, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(result);
    }
    println!("k = {}, half-life {}", result.rate, half_life_text(&result.rate));
    println!("{:>10}  {:>14}", "time_h", "concentration");
    for (t, c) in result.points() {
        println!("{t:>10.3}  {c:>14.6}");
    }
    Ok(())
}

pub fn print_prediction(eff: EfficiencyPrediction, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&eff);
    }
    println!("predicted efficiency: {eff}");
    Ok(())
}

pub fn print_report(report: &Report, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(report);
    }
    let s = &report.summary;
    let i = &report.input;
    println!(
        "inputs: initial {} ng/mL, dose {} mg/L, {} °C, {} h, light {}, adsorbent {}",
        i.initial_concentration,
        i.dose,
        i.temperature,
        i.duration_hours,
        i.modifiers.light,
        if i.modifiers.adsorbent { "yes" } else { "no" },
    );
    println!("predicted efficiency: {}", report.efficiency);
    println!("rate constant: {}", report.simulation.rate);
    println!("half-life: {}", half_life_text(&report.simulation.rate));
    println!(
        "final concentration after {} h: {:.4} ({:.1}% reduction)",
        s.duration_hours, s.final_concentration, s.reduction_percent
    );
    if s.exceeds_limit(EU_AFM1_LIMIT) {
        println!("above the EU limit of {EU_AFM1_LIMIT}");
    } else {
        println!("within the EU limit of {EU_AFM1_LIMIT}");
    }
    println!("{}", s.tier.advice());
    Ok(())
}

pub fn print_sweep(sweep: &SweepOutput, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(sweep);
    }
    println!("dose sensitivity (final concentration):");
    for curve in &sweep.curves {
        println!(
            "  {:>8.2} mg/L  k {}  final {:.4}",
            curve.dose,
            curve.result.rate,
            curve.result.final_concentration()
        );
    }
    println!("rate vs temperature:");
    for (t, k) in &sweep.rates {
        println!("  {t:>8.1} °C  {k}");
    }
    println!("efficiency grid ({} h), rows °C, columns mg/L:", sweep.grid.duration_hours);
    let header: Vec<String> = sweep.grid.doses.iter().map(|d| format!("{d:>8.2}")).collect();
    println!("  {:>8}  {}", "", header.join(" "));
    for (t, row) in sweep.grid.temperatures.iter().zip(&sweep.grid.values) {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:>8.2}")).collect();
        println!("  {t:>8.1}  {}", cells.join(" "));
    }
    if let Some(best) = &sweep.optimum {
        println!(
            "best: {:.2}% at {} mg/L, {} °C",
            best.efficiency, best.dose, best.temperature
        );
    }
    Ok(())
}

pub fn print_fit(fit: &FirstOrderFit, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(fit);
    }
    println!("fitted k: {}", fit.rate);
    println!("half-life: {}", half_life_text(&fit.rate));
    println!("fitted initial concentration: {:.4}", fit.initial_concentration);
    println!("r²: {:.4} over {} points", fit.r_squared, fit.points_used);
    Ok(())
}
