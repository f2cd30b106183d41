use crate::cmd::cli::parse_mileage;
use crate::cmd::config::CmdError;

use std::io::{BufRead, Write};

/// Asks for a mileage until a valid one is entered. End of input is an error.
pub fn prompt_mileage<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<f64, CmdError> {
    let mut line = String::new();
    loop {
        write!(out, "Enter mileage (km): ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(CmdError::Msg("no mileage given".to_owned()));
        }
        match parse_mileage(&line) {
            Ok(km) => return Ok(km),
            Err(e) => writeln!(out, "Invalid mileage: {e}")?,
        }
    }
}
