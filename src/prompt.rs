//! Interactive collection of the required run settings

use crate::config::RunSettings;
use crate::error::{SdeError, SdeResult};
use std::io::{BufRead, Write};
use std::str::FromStr;

const MODEL_PROMPT: &str =
    "B: brownian\nOU: ornstein-uhlenbeck\nOUE: ornstein_uhlenbeck (explicit)\nWhat trajectory? ";
const TRAJECTORIES_PROMPT: &str = "How many trajectories to generate: ";
const POINTS_PROMPT: &str = "How many data points: ";
const DT_PROMPT: &str = "What is the time step: ";

/// Ask for every required setting that `settings` leaves unset.
///
/// Questions are asked in the order model, trajectory count, point count,
/// time step; settings already present are not asked for.
pub fn fill_missing<R, W>(mut settings: RunSettings, input: &mut R, output: &mut W) -> SdeResult<RunSettings>
where
    R: BufRead,
    W: Write,
{
    if settings.model.is_none() {
        let answer = ask(input, output, "model", MODEL_PROMPT)?;
        settings.model = Some(answer.parse()?);
    }
    if settings.trajectories.is_none() {
        settings.trajectories = Some(ask_parsed(input, output, "trajectories", TRAJECTORIES_PROMPT)?);
    }
    if settings.points.is_none() {
        settings.points = Some(ask_parsed(input, output, "points", POINTS_PROMPT)?);
    }
    if settings.dt.is_none() {
        settings.dt = Some(ask_parsed(input, output, "dt", DT_PROMPT)?);
    }
    Ok(settings)
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, field: &str, question: &str) -> SdeResult<String> {
    let io_error = |e: std::io::Error| SdeError::InvalidConfiguration {
        field: field.to_string(),
        reason: e.to_string(),
    };

    output.write_all(question.as_bytes()).map_err(io_error)?;
    output.flush().map_err(io_error)?;

    let mut line = String::new();
    if input.read_line(&mut line).map_err(io_error)? == 0 {
        return Err(SdeError::InvalidConfiguration {
            field: field.to_string(),
            reason: "input ended before a value was given".to_string(),
        });
    }
    Ok(line.trim().to_string())
}

fn ask_parsed<T, R, W>(input: &mut R, output: &mut W, field: &str, question: &str) -> SdeResult<T>
where
    T: FromStr,
    R: BufRead,
    W: Write,
{
    let answer = ask(input, output, field, question)?;
    answer.parse().map_err(|_| SdeError::InvalidConfiguration {
        field: field.to_string(),
        reason: format!("could not parse '{}'", answer),
    })
}
