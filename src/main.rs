//! NYC Recycling Performance Predictor - Main Entry Point
//!
//! Interactive session: collects district and tonnage inputs from the
//! operator, runs the classifier, and prints the predicted recycling
//! performance.

use anyhow::Result;
use recycling_predictor::{
    config::AppConfig, engine::PredictionEngine, render,
    types::{Borough, PredictionRequest},
};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing::{error, info};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("recycling_predictor=info".parse()?),
        )
        .init();

    info!("Starting NYC Recycling Performance Predictor");

    // Load configuration
    let config = AppConfig::load()?;
    info!("Configuration loaded successfully");
    info!(
        "Model artifact: {}, reference dataset: {}",
        config.artifacts.model_path, config.artifacts.reference_path
    );

    // Load the classifier and reference table once; failures here are fatal
    let engine = PredictionEngine::new(&config)?;
    info!(
        "Decision threshold: {:.0}%",
        config.detection.threshold * 100.0
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&engine, &mut stdin.lock(), &mut stdout.lock())
}

/// Interactive prompt loop. Each completed input tuple triggers one full
/// evaluation; EOF or a decline at the continue prompt ends the session.
fn run_session<R: BufRead, W: Write>(
    engine: &PredictionEngine,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "NYC Recycling Performance Predictor")?;
    writeln!(
        output,
        "Predict whether a community district will achieve a high recyclable \
         waste collection rate (>20% recycling ratio) based on recent waste \
         collection patterns.\n"
    )?;

    loop {
        let Some(request) = collect_request(input, output)? else {
            break;
        };

        match engine.evaluate(&request) {
            Ok(result) => {
                write!(output, "{}", render::render_result(&result))?;
                write!(
                    output,
                    "{}",
                    render::render_model_info(engine.classifier(), engine.threshold())
                )?;
                writeln!(output, "\n{}", render::render_footer())?;
            }
            Err(e) => {
                error!(error = %e, "Evaluation failed");
                writeln!(output, "Evaluation failed: {e:#}")?;
            }
        }

        match prompt_line(input, output, "\nRun another prediction? [Y/n]")? {
            Some(answer) if !matches!(answer.as_str(), "n" | "N" | "q" | "Q") => continue,
            _ => break,
        }
    }

    info!("Session finished");
    Ok(())
}

/// Collect the seven operator inputs, re-prompting on invalid values.
/// Returns None on EOF.
fn collect_request<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Option<PredictionRequest>> {
    writeln!(output, "District & Time Period")?;

    let Some(borough) = prompt_borough(input, output)? else {
        return Ok(None);
    };
    let mut request = PredictionRequest::new(borough);

    let (d_lo, d_hi) = PredictionRequest::DISTRICT_RANGE;
    let Some(district) = prompt_number(input, output, "Community District", d_lo, d_hi, 1)? else {
        return Ok(None);
    };
    request.communitydistrict = district;

    let Some(month) = prompt_number(input, output, "Month", 1u32, 12, 6)? else {
        return Ok(None);
    };
    request.month = month;
    writeln!(output, "  ({})", month_name(month))?;

    let (y_lo, y_hi) = PredictionRequest::YEAR_RANGE;
    let Some(year) = prompt_number(input, output, "Year", y_lo, y_hi, 2024)? else {
        return Ok(None);
    };
    request.year = year;

    writeln!(output, "\nRecent Waste Collection (Tons)")?;

    let Some(refuse_lag1) = prompt_tonnage(input, output, "Refuse (Previous Month)", 5000.0)?
    else {
        return Ok(None);
    };
    request.refuse_lag1 = refuse_lag1;

    let Some(paper_lag1) = prompt_tonnage(input, output, "Paper (Previous Month)", 800.0)? else {
        return Ok(None);
    };
    request.paper_lag1 = paper_lag1;

    let Some(mgp_lag1) = prompt_tonnage(input, output, "MGP (Previous Month)", 600.0)? else {
        return Ok(None);
    };
    request.mgp_lag1 = mgp_lag1;

    let Some(refuse_lag12) = prompt_tonnage(input, output, "Refuse (12 Months Ago)", 5200.0)?
    else {
        return Ok(None);
    };
    request.refuse_lag12 = refuse_lag12;

    Ok(Some(request))
}

/// Borough selection by number or name. Empty input takes the first entry.
fn prompt_borough<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Option<Borough>> {
    for (i, borough) in Borough::ALL.iter().enumerate() {
        writeln!(output, "  {}. {}", i + 1, borough)?;
    }
    loop {
        let Some(line) = prompt_line(input, output, "Borough [1-5, default 1]")? else {
            return Ok(None);
        };
        if line.is_empty() {
            return Ok(Some(Borough::ALL[0]));
        }
        if let Ok(n) = line.parse::<usize>() {
            if (1..=Borough::ALL.len()).contains(&n) {
                return Ok(Some(Borough::ALL[n - 1]));
            }
        } else if let Ok(borough) = Borough::from_str(&line) {
            return Ok(Some(borough));
        }
        writeln!(output, "Please enter 1-5 or a borough name.")?;
    }
}

/// Bounded integer prompt with a default. Re-prompts until valid; None on EOF.
fn prompt_number<T, R, W>(
    input: &mut R,
    output: &mut W,
    label: &str,
    min: T,
    max: T,
    default: T,
) -> Result<Option<T>>
where
    T: FromStr + PartialOrd + Copy + std::fmt::Display,
    R: BufRead,
    W: Write,
{
    loop {
        let full_label = format!("{label} [{min}-{max}, default {default}]");
        let Some(line) = prompt_line(input, output, &full_label)? else {
            return Ok(None);
        };
        if line.is_empty() {
            return Ok(Some(default));
        }
        if let Ok(value) = line.parse::<T>() {
            if value >= min && value <= max {
                return Ok(Some(value));
            }
        }
        writeln!(output, "Please enter a number between {min} and {max}.")?;
    }
}

/// Non-negative tonnage prompt with a default. Re-prompts until valid.
fn prompt_tonnage<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    default: f64,
) -> Result<Option<f64>> {
    loop {
        let full_label = format!("{label} [default {default:.1}]");
        let Some(line) = prompt_line(input, output, &full_label)? else {
            return Ok(None);
        };
        if line.is_empty() {
            return Ok(Some(default));
        }
        if let Ok(value) = line.parse::<f64>() {
            if value.is_finite() && value >= 0.0 {
                return Ok(Some(value));
            }
        }
        writeln!(output, "Please enter a non-negative number of tons.")?;
    }
}

/// One line of trimmed input; None on EOF.
fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<Option<String>> {
    write!(output, "{label}: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// English month name for display next to the numeric month input.
fn month_name(month: u32) -> &'static str {
    chrono::Month::try_from(month as u8)
        .map(|m| m.name())
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_number_accepts_default() {
        let mut input = Cursor::new("\n");
        let mut output = Vec::new();
        let value = prompt_number(&mut input, &mut output, "Month", 1u32, 12, 6).unwrap();
        assert_eq!(value, Some(6));
    }

    #[test]
    fn test_prompt_number_reprompts_out_of_range() {
        let mut input = Cursor::new("19\n4\n");
        let mut output = Vec::new();
        let value =
            prompt_number(&mut input, &mut output, "Community District", 1u32, 18, 1).unwrap();
        assert_eq!(value, Some(4));
        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("between 1 and 18"));
    }

    #[test]
    fn test_prompt_number_eof() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let value = prompt_number(&mut input, &mut output, "Year", 2015, 2030, 2024).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_prompt_tonnage_rejects_negative() {
        let mut input = Cursor::new("-5\n1200.5\n");
        let mut output = Vec::new();
        let value = prompt_tonnage(&mut input, &mut output, "Refuse (Previous Month)", 5000.0)
            .unwrap();
        assert_eq!(value, Some(1200.5));
    }

    #[test]
    fn test_prompt_borough_by_number_and_name() {
        let mut input = Cursor::new("5\n");
        let mut output = Vec::new();
        let borough = prompt_borough(&mut input, &mut output).unwrap();
        assert_eq!(borough, Some(Borough::StatenIsland));

        let mut input = Cursor::new("queens\n");
        let mut output = Vec::new();
        let borough = prompt_borough(&mut input, &mut output).unwrap();
        assert_eq!(borough, Some(Borough::Queens));
    }

    #[test]
    fn test_collect_request_all_defaults() {
        // One empty line per prompt: borough, district, month, year, 4 tonnages
        let mut input = Cursor::new("\n\n\n\n\n\n\n\n");
        let mut output = Vec::new();
        let request = collect_request(&mut input, &mut output).unwrap().unwrap();
        assert_eq!(request, PredictionRequest::new(Borough::Bronx));
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(6), "June");
        assert_eq!(month_name(12), "December");
    }
}
