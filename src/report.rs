use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use crate::calculator::{Calculation, CalculationResult, SampledSeries};
use crate::util::{format_fixed, format_plain, round_to, speed_kmh};

/// Output format for `--print`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
}

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("io error")]
    Io(#[from] io::Error),
    #[error("json encoding error")]
    Json(#[from] serde_json::Error),
    #[error("csv encoding error")]
    Csv(#[from] csv::Error),
}

#[derive(Serialize)]
struct JsonReport<'a> {
    result: &'a CalculationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    kmh: Option<f64>,
    over_time: &'a SampledSeries,
    over_distance: &'a SampledSeries,
}

pub fn write_report<W: Write>(
    calc: &Calculation,
    format: ReportFormat,
    show_kmh: bool,
    mut out: W,
) -> Result<(), ReportError> {
    match format {
        ReportFormat::Text => write_text(calc, show_kmh, &mut out)?,
        ReportFormat::Json => {
            let report = JsonReport {
                result: &calc.result,
                kmh: show_kmh.then(|| round_to(speed_kmh(calc.result.speed), 2)),
                over_time: &calc.over_time,
                over_distance: &calc.over_distance,
            };
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
        ReportFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(out);
            wtr.write_record(["series", "label", "value"])?;
            for (name, series) in [("time", &calc.over_time), ("distance", &calc.over_distance)] {
                for p in series.points() {
                    wtr.write_record([name, p.label.as_str(), p.value.to_string().as_str()])?;
                }
            }
            wtr.flush()?;
        }
    }
    Ok(())
}

fn write_text<W: Write>(calc: &Calculation, show_kmh: bool, out: &mut W) -> io::Result<()> {
    let r = &calc.result;
    writeln!(out, "speed: {} m/s", format_fixed(r.speed, 2))?;
    if show_kmh {
        writeln!(out, "       {} km/h", format_fixed(speed_kmh(r.speed), 2))?;
    }
    writeln!(
        out,
        "distance: {} m, time: {} s",
        format_plain(r.distance),
        format_plain(r.time)
    )?;

    writeln!(out)?;
    writeln!(
        out,
        "speed vs time (distance fixed at {} m)",
        format_plain(r.distance)
    )?;
    write_series(out, "time (s)", &calc.over_time)?;

    writeln!(out)?;
    writeln!(
        out,
        "speed vs distance (time fixed at {} s)",
        format_plain(r.time)
    )?;
    write_series(out, "distance (m)", &calc.over_distance)
}

fn write_series<W: Write>(out: &mut W, x_title: &str, series: &SampledSeries) -> io::Result<()> {
    writeln!(out, "{:>14}  {:>12}", x_title, "speed (m/s)")?;
    for p in series.points() {
        writeln!(out, "{:>14}  {:>12}", p.label, format_fixed(p.value, 2))?;
    }
    Ok(())
}
