use crate::error::DataError;

use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const MILEAGE_COLUMN: &str = "km";
pub const PRICE_COLUMN: &str = "price";

/// One observation: mileage `x` and price `y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Non-empty, fully validated sequence of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    /// Builds a dataset from already parsed pairs, applying the same checks
    /// as the CSV loader. Row numbers in errors assume a header line.
    pub fn new(samples: Vec<Sample>) -> Result<Self, DataError> {
        for (i, s) in samples.iter().enumerate() {
            check_value(i + 2, MILEAGE_COLUMN, s.x)?;
            check_value(i + 2, PRICE_COLUMN, s.y)?;
        }
        if samples.is_empty() {
            return Err(DataError::Empty);
        }
        Ok(Self { samples })
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, DataError> {
        Self::new(pairs.iter().map(|&(x, y)| Sample::new(x, y)).collect())
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.y).collect()
    }

    /// Same dataset with every sample passed through `f`. Used for the
    /// normalized copy handed to the optimizer, so no re-validation.
    pub(crate) fn map(&self, f: impl Fn(&Sample) -> Sample) -> Dataset {
        Dataset { samples: self.samples.iter().map(f).collect() }
    }
}

/// Reads the `km,price` CSV at `path`.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, DataError> {
    let path = path.as_ref();
    let file =
        File::open(path).map_err(|e| DataError::Open { path: path.to_path_buf(), source: e })?;
    let dataset = read_dataset(file)?;
    log::info!("loaded {} samples from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Parses a dataset from any reader. The first invalid row aborts the read.
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset, DataError> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);

    let header = rdr.headers().map_err(|e| DataError::Csv { row: 1, source: e })?.clone();
    let (x_idx, y_idx) = column_indices(&header)?;

    let mut samples = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| {
            let row = e.position().map(|p| p.line() as usize).unwrap_or(i + 2);
            DataError::Csv { row, source: e }
        })?;
        let row = record.position().map(|p| p.line() as usize).unwrap_or(i + 2);
        if record.len() > 2 {
            return Err(DataError::ExtraFields { row, found: record.len() });
        }

        let x = parse_field(&record, x_idx, row, MILEAGE_COLUMN)?;
        let y = parse_field(&record, y_idx, row, PRICE_COLUMN)?;
        samples.push(Sample::new(x, y));
    }

    if samples.is_empty() {
        return Err(DataError::Empty);
    }
    Ok(Dataset { samples })
}

fn column_indices(header: &csv::StringRecord) -> Result<(usize, usize), DataError> {
    let names: Vec<&str> = header.iter().map(str::trim).collect();
    let find = |name: &str| names.iter().position(|n| *n == name);

    match (names.len(), find(MILEAGE_COLUMN), find(PRICE_COLUMN)) {
        (2, Some(x), Some(y)) => Ok((x, y)),
        _ => Err(DataError::Header {
            expected: format!("{MILEAGE_COLUMN}, {PRICE_COLUMN}"),
            found: names.join(", "),
        }),
    }
}

fn parse_field(
    record: &csv::StringRecord,
    idx: usize,
    row: usize,
    column: &'static str,
) -> Result<f64, DataError> {
    let raw = record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(DataError::MissingField { row, column })?;

    let value: f64 = raw
        .parse()
        .map_err(|_| DataError::NotNumeric { row, column, value: raw.to_owned() })?;

    check_value(row, column, value)?;
    Ok(value)
}

fn check_value(row: usize, column: &'static str, value: f64) -> Result<(), DataError> {
    if value.is_nan() {
        return Err(DataError::NotANumber { row, column });
    }
    if !value.is_finite() {
        return Err(DataError::NonFinite { row, column, value });
    }
    if value < 0.0 {
        return Err(DataError::Negative { row, column, value });
    }
    Ok(())
}
