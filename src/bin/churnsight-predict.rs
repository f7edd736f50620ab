//! Headless churn prediction for a single customer given on the command line.

use std::path::PathBuf;

use serde::Serialize;

use churnsight::artifacts::{self, ArtifactPaths};
use churnsight::config;
use churnsight::features::{self, CustomerForm, FEATURE_COLUMNS, FeatureVector, GenderEncoding};
use churnsight::logging;
use churnsight::predict;

const VALUE_FLAGS: &[&str] = &[
    "--model",
    "--label-encoder",
    "--credit-score",
    "--age",
    "--tenure",
    "--products",
    "--satisfaction",
    "--points",
    "--balance",
    "--salary",
    "--gender",
    "--geography",
    "--has-cr-card",
    "--active",
    "--complain",
];

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Clone)]
struct CliOptions {
    form: CustomerForm,
    model_path: Option<PathBuf>,
    label_encoder_path: Option<PathBuf>,
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    columns: &'a [&'a str],
    vector: &'a FeatureVector,
    gender_encoding: &'static str,
    label: u8,
    churn_probability: f64,
    message: &'static str,
    suggestion: Option<&'static str>,
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    if let Err(err) = logging::init_console() {
        eprintln!("Logging disabled: {err}");
    }
    options.form.validate().map_err(|err| err.to_string())?;

    let mut paths = config::load_or_default()
        .map(|config| config.artifacts)
        .unwrap_or_else(|err| {
            tracing::warn!("Using default artifact paths: {err}");
            ArtifactPaths::default()
        });
    if let Some(path) = options.model_path {
        paths.model_path = path;
    }
    if let Some(path) = options.label_encoder_path {
        paths.label_encoder_path = path;
    }

    let loaded = artifacts::shared(&paths).map_err(|err| format!("Error loading files: {err}"))?;
    let (vector, gender_path) =
        features::encode_with_path(&options.form, Some(&loaded.label_encoder));
    let prediction =
        predict::predict(&loaded.classifier, &vector).map_err(|err| err.to_string())?;
    let outcome = prediction.outcome;

    if options.json {
        let report = Report {
            columns: &FEATURE_COLUMNS,
            vector: &vector,
            gender_encoding: match gender_path {
                GenderEncoding::Encoder => "encoder",
                GenderEncoding::Fallback => "fallback",
            },
            label: outcome.label(),
            churn_probability: prediction.churn_probability,
            message: outcome.headline(),
            suggestion: outcome.suggestion(),
        };
        let text = serde_json::to_string_pretty(&report).map_err(|err| err.to_string())?;
        println!("{text}");
        return Ok(());
    }

    for (column, value) in vector.named() {
        println!("{column:<18} {value}");
    }
    if gender_path == GenderEncoding::Fallback {
        println!("(Gender encoded with the Male=1/Female=0 fallback)");
    }
    println!();
    println!("{}", outcome.headline());
    if let Some(suggestion) = outcome.suggestion() {
        println!("{suggestion}");
    }
    println!("churn probability: {:.3}", prediction.churn_probability);
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut options = CliOptions {
        form: CustomerForm::default(),
        model_path: None,
        label_encoder_path: None,
        json: false,
    };

    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        match flag {
            "-h" | "--help" => return Err(help_text()),
            "--json" => options.json = true,
            _ if VALUE_FLAGS.contains(&flag) => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| format!("{flag} requires a value"))?
                    .clone();
                apply_value(&mut options, flag, value)?;
            }
            unknown => return Err(unknown_argument(unknown)),
        }
        idx += 1;
    }
    Ok(options)
}

fn apply_value(options: &mut CliOptions, flag: &str, value: String) -> Result<(), String> {
    let form = &mut options.form;
    match flag {
        "--model" => options.model_path = Some(PathBuf::from(value)),
        "--label-encoder" => options.label_encoder_path = Some(PathBuf::from(value)),
        "--credit-score" => form.credit_score = parse_number(flag, &value)?,
        "--age" => form.age = parse_number(flag, &value)?,
        "--tenure" => form.tenure = parse_number(flag, &value)?,
        "--products" => form.num_of_products = parse_number(flag, &value)?,
        "--satisfaction" => form.satisfaction_score = parse_number(flag, &value)?,
        "--points" => form.point_earned = parse_number(flag, &value)?,
        "--balance" => form.balance = parse_number(flag, &value)?,
        "--salary" => form.estimated_salary = parse_number(flag, &value)?,
        "--gender" => form.gender = value,
        "--geography" => form.geography = value,
        "--has-cr-card" => form.has_cr_card = value,
        "--active" => form.is_active_member = value,
        "--complain" => form.complain = value,
        unknown => return Err(unknown_argument(unknown)),
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse::<T>()
        .map_err(|_| format!("Invalid {flag} value: {value}"))
}

fn unknown_argument(flag: &str) -> String {
    format!("Unknown argument: {flag}\n\n{}", help_text())
}

fn help_text() -> String {
    [
        "churnsight-predict",
        "",
        "Usage:",
        "  churnsight-predict [options]",
        "",
        "Customer fields (defaults match the form):",
        "  --credit-score <300-850>   --age <18-100>        --tenure <0-10>",
        "  --products <1-4>           --balance <n>         --salary <n>",
        "  --satisfaction <n>         --points <n>",
        "  --gender <Male|Female>     --geography <France|Germany|Spain>",
        "  --has-cr-card <Yes|No>     --active <Yes|No>     --complain <Yes|No>",
        "",
        "Options:",
        "  --model <path>          Classifier JSON (default: config or models/RandomForest/).",
        "  --label-encoder <path>  Label encoder JSON.",
        "  --json                  Print a JSON report instead of text.",
    ]
    .join("\n")
}
