use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::cmd::config::{Action, Config, Evaluate as EvaluateCfg, Predict as PredictCfg};
use pricefit_core::train::validate_learning_rate;
use pricefit_core::TrainConfig;

fn parse_learning_rate(s: &str) -> Result<f64, String> {
    let lr: f64 = s.trim().parse().map_err(|e| format!("{e}"))?;
    validate_learning_rate(lr).map_err(|e| e.to_string())?;
    Ok(lr)
}

pub(crate) fn parse_mileage(s: &str) -> Result<f64, String> {
    let km: f64 = s.trim().parse().map_err(|e| format!("{e}"))?;
    if !km.is_finite() || km < 0.0 {
        return Err(format!("mileage must be a non-negative number, got {km}"));
    }
    Ok(km)
}

#[derive(Debug, Parser)]
#[command(
    name = "pricefit",
    about = "Fit, query and score a price-by-mileage linear model",
    version,
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fit the model with gradient descent and write the coefficient file
    Train(TrainArgs),

    /// Estimate the price for a mileage
    Predict(PredictArgs),

    /// Report RMSE and R² of the stored model on a dataset
    Evaluate(EvaluateArgs),
}

#[derive(Debug, Args)]
pub struct TrainArgs {
    /// Training CSV with `km` and `price` columns
    #[arg(short = 'd', long = "data", value_hint = ValueHint::FilePath,
        default_value = TrainConfig::DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Learning rate in (0, 1]
    #[arg(short = 'l', long = "learning-rate", value_parser = parse_learning_rate,
        default_value_t = TrainConfig::DEFAULT_LEARNING_RATE)]
    pub learning_rate: f64,

    /// Number of gradient descent steps
    #[arg(short = 'n', long = "iterations",
        value_parser = clap::value_parser!(u64).range(1..),
        default_value_t = TrainConfig::DEFAULT_ITERATIONS as u64)]
    pub iterations: u64,

    /// Where to write the coefficients
    #[arg(short = 'o', long = "output", value_hint = ValueHint::FilePath,
        default_value = TrainConfig::DEFAULT_THETA_PATH)]
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Mileage in km; prompted for when omitted
    #[arg(value_parser = parse_mileage)]
    pub mileage: Option<f64>,

    /// Coefficient file written by `train`
    #[arg(short = 't', long = "theta", value_hint = ValueHint::FilePath,
        default_value = TrainConfig::DEFAULT_THETA_PATH)]
    pub theta: PathBuf,
}

#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// CSV with `km` and `price` columns
    #[arg(short = 'd', long = "data", value_hint = ValueHint::FilePath,
        default_value = TrainConfig::DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Coefficient file written by `train`
    #[arg(short = 't', long = "theta", value_hint = ValueHint::FilePath,
        default_value = TrainConfig::DEFAULT_THETA_PATH)]
    pub theta: PathBuf,
}

// -------- Map CLI -> Config/Action --------

impl Cli {
    pub fn into_config(self) -> Config {
        let action = match self.command {
            Commands::Train(t) => Action::Train(TrainConfig {
                data_path: t.data,
                theta_path: t.output,
                learning_rate: t.learning_rate,
                iterations: t.iterations as usize,
            }),
            Commands::Predict(p) => {
                Action::Predict(PredictCfg { mileage: p.mileage, theta_path: p.theta })
            },
            Commands::Evaluate(e) => {
                Action::Evaluate(EvaluateCfg { data_path: e.data, theta_path: e.theta })
            },
        };
        Config { action }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn train_defaults() {
        let cfg = Cli::try_parse_from(["pricefit", "train"]).unwrap().into_config();
        match cfg.action {
            Action::Train(t) => assert_eq!(t, TrainConfig::default()),
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn train_flags() {
        let cli = Cli::try_parse_from([
            "pricefit", "train", "-d", "cars.csv", "-l", "0.05", "-n", "300", "-o", "m.json",
        ])
        .unwrap();
        match cli.into_config().action {
            Action::Train(t) => {
                assert_eq!(t.data_path, PathBuf::from("cars.csv"));
                assert_eq!(t.theta_path, PathBuf::from("m.json"));
                assert_eq!(t.learning_rate, 0.05);
                assert_eq!(t.iterations, 300);
            },
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn rejects_out_of_range_hyperparameters() {
        assert!(Cli::try_parse_from(["pricefit", "train", "-l", "0"]).is_err());
        assert!(Cli::try_parse_from(["pricefit", "train", "-l", "1.01"]).is_err());
        assert!(Cli::try_parse_from(["pricefit", "train", "-n", "0"]).is_err());
        assert!(Cli::try_parse_from(["pricefit", "train", "-n", "-3"]).is_err());
        assert!(Cli::try_parse_from(["pricefit", "train", "-l", "1"]).is_ok());
    }

    #[test]
    fn predict_mileage_is_optional() {
        match Cli::try_parse_from(["pricefit", "predict"]).unwrap().into_config().action {
            Action::Predict(p) => assert_eq!(p.mileage, None),
            other => panic!("unexpected action {other:?}"),
        }
        match Cli::try_parse_from(["pricefit", "predict", "42000"]).unwrap().into_config().action
        {
            Action::Predict(p) => assert_eq!(p.mileage, Some(42000.0)),
            other => panic!("unexpected action {other:?}"),
        }
        assert!(Cli::try_parse_from(["pricefit", "predict", "abc"]).is_err());
    }
}
