use crate::cmd::prompt::prompt_mileage;

use pricefit_core::{
    evaluate, load_dataset, load_model, predict, train, DataError, ModelError, ProcessEventSink,
    RangeWarning, TrainConfig, TrainError,
};

use std::io::{self, Write};
use std::path::PathBuf;

/* =================== Public configuration types =================== */

#[derive(Debug)]
pub struct Config {
    pub action: Action,
}

#[derive(Debug, Clone)]
pub enum Action {
    Train(TrainConfig),
    Predict(Predict),
    Evaluate(Evaluate),
}

#[derive(Debug, Clone)]
pub struct Predict {
    /// `None` means ask on stdin.
    pub mileage: Option<f64>,
    pub theta_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Evaluate {
    pub data_path: PathBuf,
    pub theta_path: PathBuf,
}

/* =================== Error type (no process::exit) =================== */

#[derive(thiserror::Error, Debug)]
pub enum CmdError {
    #[error(transparent)]
    Train(#[from] TrainError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Msg(String),
}

/// Prints range warnings on stderr, apart from the result on stdout.
pub struct StderrSink;

impl ProcessEventSink for StderrSink {
    fn on_range_warning(&mut self, ev: &RangeWarning) {
        log::debug!("range warning: {ev:?}");
        eprintln!("Warning: {ev}");
    }
}

/* =================== Entry point =================== */

impl Config {
    pub fn run(&self) -> Result<(), CmdError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with(&mut out, &mut StderrSink)
    }

    pub fn run_with<W: Write>(
        &self,
        out: &mut W,
        sink: &mut dyn ProcessEventSink,
    ) -> Result<(), CmdError> {
        match &self.action {
            Action::Train(t) => run_train(t, out),
            Action::Predict(p) => run_predict(p, out, sink),
            Action::Evaluate(e) => run_evaluate(e, out),
        }
    }
}

/* =================== Actions =================== */

fn run_train<W: Write>(t: &TrainConfig, out: &mut W) -> Result<(), CmdError> {
    let report = train(t)?;
    writeln!(out, "theta0: {}", report.line.theta0)?;
    writeln!(out, "theta1: {}", report.line.theta1)?;
    writeln!(out, "Model saved to {}", t.theta_path.display())?;
    Ok(())
}

fn run_predict<W: Write>(
    p: &Predict,
    out: &mut W,
    sink: &mut dyn ProcessEventSink,
) -> Result<(), CmdError> {
    let model = load_model(&p.theta_path)?;

    let mileage = match p.mileage {
        Some(km) => km,
        None => {
            let stdin = io::stdin();
            prompt_mileage(&mut stdin.lock(), out)?
        },
    };

    if model.is_untrained() {
        writeln!(out, "0")?;
        return Ok(());
    }

    let price = predict(mileage, &model, sink);
    writeln!(out, "Estimated price: {price:.2}")?;
    Ok(())
}

fn run_evaluate<W: Write>(e: &Evaluate, out: &mut W) -> Result<(), CmdError> {
    let dataset = load_dataset(&e.data_path)?;
    let model = load_model(&e.theta_path)?;
    let metrics = evaluate(&dataset, &model);
    writeln!(out, "RMSE: {:.4}", metrics.rmse)?;
    writeln!(out, "R²: {:.4}", metrics.r2)?;
    Ok(())
}
