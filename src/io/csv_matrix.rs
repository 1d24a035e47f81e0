//! CSV cost-matrix loader.
//!
//! Two layouts are accepted:
//!
//! ```text
//! labeled:            raw:
//! ,A,B,C              0,2,9
//! A,0,2,9             2,0,6
//! B,2,0,6             9,6,0
//! C,9,6,0
//! ```
//!
//! In the labeled layout the first column holds the location labels and the
//! header row repeats them; in the raw layout locations are labeled by index.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::DepotRef;
use crate::distance::CostMatrix;
use crate::error::{Error, Result};
use crate::models::{Location, Problem};

/// Layout of a matrix CSV file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatrixFormat {
    /// Labeled if the first cell is not a number, raw otherwise.
    #[default]
    Auto,
    /// Header row plus a label column.
    Labeled,
    /// Headerless N×N grid.
    Raw,
}

/// A validated cost matrix with one label per row.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMatrix {
    pub labels: Vec<String>,
    pub matrix: CostMatrix,
}

impl LabeledMatrix {
    /// Locations in row order.
    pub fn locations(&self) -> Vec<Location> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| Location::new(i, label.clone()))
            .collect()
    }

    /// Builds a [`Problem`] with the depot resolved against the labels.
    pub fn into_problem(self, depot: &DepotRef) -> Result<Problem> {
        let locations = self.locations();
        let depot = depot.resolve(&locations)?;
        Problem::new(self.matrix, locations, depot)
    }
}

/// Loads a matrix from a CSV file.
pub fn load_matrix(path: impl AsRef<Path>, format: MatrixFormat) -> Result<LabeledMatrix> {
    let path = path.as_ref();
    debug!("loading cost matrix from {}", path.display());
    read_matrix(File::open(path)?, format)
}

/// Reads a matrix from CSV text.
///
/// Fails with [`Error::MalformedMatrix`] if the input is empty, the grid is
/// not square, a row is ragged, or a cell is not a non-negative number.
///
/// # Examples
///
/// ```
/// use route_optimizer::io::{read_matrix, MatrixFormat};
///
/// let csv = ",Depot,North,South\nDepot,0,2,9\nNorth,2,0,6\nSouth,9,6,0\n";
/// let loaded = read_matrix(csv.as_bytes(), MatrixFormat::Auto).unwrap();
/// assert_eq!(loaded.labels, vec!["Depot", "North", "South"]);
/// assert_eq!(loaded.matrix.get(2, 1), 6.0);
///
/// let raw = read_matrix("0,4\n4,0\n".as_bytes(), MatrixFormat::Auto).unwrap();
/// assert_eq!(raw.labels, vec!["0", "1"]);
/// ```
pub fn read_matrix<R: Read>(reader: R, format: MatrixFormat) -> Result<LabeledMatrix> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        records.push(record);
    }
    let Some(first) = records.first() else {
        return Err(Error::malformed("matrix is empty"));
    };

    let labeled = match format {
        MatrixFormat::Labeled => true,
        MatrixFormat::Raw => false,
        MatrixFormat::Auto => first.get(0).map_or(true, |cell| cell.parse::<f64>().is_err()),
    };

    let loaded = if labeled {
        parse_labeled(&records)?
    } else {
        parse_raw(&records)?
    };
    debug!(
        "loaded {0}x{0} {1} matrix",
        loaded.labels.len(),
        if labeled { "labeled" } else { "raw" }
    );
    Ok(loaded)
}

fn parse_labeled(records: &[StringRecord]) -> Result<LabeledMatrix> {
    let header = &records[0];
    let columns: Vec<&str> = header.iter().skip(1).collect();
    let rows = &records[1..];
    if rows.len() != columns.len() {
        return Err(Error::malformed(format!(
            "matrix must be square: {} rows x {} columns",
            rows.len(),
            columns.len()
        )));
    }

    let mut labels = Vec::with_capacity(rows.len());
    let mut grid = Vec::with_capacity(rows.len());
    for (r, record) in rows.iter().enumerate() {
        let label = record.get(0).unwrap_or_default();
        if record.len() != columns.len() + 1 {
            return Err(Error::malformed(format!(
                "row `{label}` has {} values, expected {}",
                record.len().saturating_sub(1),
                columns.len()
            )));
        }
        if label != columns[r] {
            warn!(
                "row label `{label}` differs from column label `{}`; using row labels",
                columns[r]
            );
        }
        labels.push(label.to_string());
        grid.push(parse_cells(record.iter().skip(1), r)?);
    }
    check_unique(&labels)?;

    Ok(LabeledMatrix {
        labels,
        matrix: CostMatrix::from_rows(grid)?,
    })
}

fn parse_raw(records: &[StringRecord]) -> Result<LabeledMatrix> {
    let size = records.len();
    let mut grid = Vec::with_capacity(size);
    for (r, record) in records.iter().enumerate() {
        if record.len() != size {
            return Err(Error::malformed(format!(
                "matrix must be square: row {r} has {} values, expected {size}",
                record.len()
            )));
        }
        grid.push(parse_cells(record.iter(), r)?);
    }
    Ok(LabeledMatrix {
        labels: (0..size).map(|i| i.to_string()).collect(),
        matrix: CostMatrix::from_rows(grid)?,
    })
}

fn parse_cells<'a>(cells: impl Iterator<Item = &'a str>, row: usize) -> Result<Vec<f64>> {
    cells
        .enumerate()
        .map(|(col, cell)| {
            cell.parse::<f64>().map_err(|_| {
                Error::malformed(format!("row {row}, column {col}: `{cell}` is not a number"))
            })
        })
        .collect()
}

fn check_unique(labels: &[String]) -> Result<()> {
    for (i, label) in labels.iter().enumerate() {
        if labels[..i].contains(label) {
            return Err(Error::malformed(format!("duplicate location label `{label}`")));
        }
    }
    Ok(())
}

/// Writes a labeled matrix as CSV with a header row and label column.
pub fn write_matrix<W: Write>(writer: W, labels: &[String], matrix: &CostMatrix) -> Result<()> {
    if labels.len() != matrix.size() {
        return Err(Error::malformed(format!(
            "{} labels for a {1}x{1} matrix",
            labels.len(),
            matrix.size()
        )));
    }
    let mut wtr = WriterBuilder::new().from_writer(writer);

    let mut header = vec![String::new()];
    header.extend(labels.iter().cloned());
    wtr.write_record(&header)?;

    for (i, label) in labels.iter().enumerate() {
        let mut row = vec![label.clone()];
        row.extend(matrix.row(i).iter().map(f64::to_string));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes a matrix as a headerless N×N grid.
pub fn write_raw_matrix<W: Write>(writer: W, matrix: &CostMatrix) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    for i in 0..matrix.size() {
        wtr.write_record(matrix.row(i).iter().map(f64::to_string))?;
    }
    wtr.flush()?;
    Ok(())
}
