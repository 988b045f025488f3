//! Sample table reading and writing
//!
//! Converts between sample tables on disk (CSV or Parquet, chosen by file
//! extension) and [`Sample`] records. Column names match the sample field
//! names; only `SampleId` and `DepthFrom` are required.

use crate::constants::{SAMPLE_FILE_EXTENSIONS, columns};
use crate::error::{QaqcError, Result};
use crate::models::{Sample, SampleClassification};
use polars::prelude::{
    Column, CsvReadOptions, CsvWriter, DataFrame, DataType, ParquetReader, ParquetWriter,
    SerReader, SerWriter,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supported sample table formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFileFormat {
    Csv,
    Parquet,
}

impl SampleFileFormat {
    /// Detect format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(SampleFileFormat::Csv),
            "parquet" => Ok(SampleFileFormat::Parquet),
            _ => Err(QaqcError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Read a hole's samples from a CSV or Parquet file
pub fn read_samples(path: &Path) -> Result<Vec<Sample>> {
    let df = match SampleFileFormat::from_path(path)? {
        // Schema inference is disabled so ids such as "007" keep their zeros
        SampleFileFormat::Csv => CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?,
        SampleFileFormat::Parquet => ParquetReader::new(File::open(path)?).finish()?,
    };

    debug!(
        "Read {} rows and {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );

    dataframe_to_samples(&df)
}

/// Write samples to a CSV or Parquet file
pub fn write_samples(path: &Path, samples: &[Sample]) -> Result<()> {
    let format = SampleFileFormat::from_path(path)?;
    let mut df = samples_to_dataframe(samples)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(path)?;
    match format {
        SampleFileFormat::Csv => {
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(&mut df)?;
        }
        SampleFileFormat::Parquet => {
            ParquetWriter::new(file).finish(&mut df)?;
        }
    }

    debug!("Wrote {} samples to {}", samples.len(), path.display());
    Ok(())
}

/// Find sample tables in a directory, one file per hole, sorted by path
pub fn discover_sample_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for extension in SAMPLE_FILE_EXTENSIONS {
        let pattern = dir.join(format!("*.{extension}"));
        let entries = glob::glob(&pattern.to_string_lossy()).map_err(|e| {
            QaqcError::configuration(format!("Invalid search pattern for {}: {}", dir.display(), e))
        })?;
        for entry in entries {
            let path = entry.map_err(|e| QaqcError::Io(e.into_error()))?;
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Convert a sample table into sample records
pub fn dataframe_to_samples(df: &DataFrame) -> Result<Vec<Sample>> {
    for required in columns::REQUIRED {
        if df.get_column_index(required).is_none() {
            return Err(QaqcError::data_validation(format!(
                "Missing required column '{}'",
                required
            )));
        }
    }

    let height = df.height();
    let sample_ids = text_column(df, columns::SAMPLE_ID, height)?;
    let sample_nms = text_column(df, columns::SAMPLE_NM, height)?;
    let hole_ids = text_column(df, columns::HOLE_ID, height)?;
    let depth_froms = numeric_column(df, columns::DEPTH_FROM, height)?;
    let depth_tos = numeric_column(df, columns::DEPTH_TO, height)?;
    let classifications = text_column(df, columns::CLASSIFICATION, height)?;
    let original_ids = text_column(df, columns::ORIGINAL_SAMPLE_ID, height)?;
    let original_nms = text_column(df, columns::ORIGINAL_SAMPLE_NM, height)?;
    let revisions = text_column(df, columns::REVISION, height)?;
    let sampled_by = text_column(df, columns::SAMPLED_BY, height)?;
    let methods = text_column(df, columns::SAMPLE_METHOD, height)?;
    let weights = numeric_column(df, columns::WEIGHT, height)?;
    let standard_ids = text_column(df, columns::STANDARD_ID, height)?;
    let comments = text_column(df, columns::COMMENTS, height)?;

    let mut samples = Vec::with_capacity(height);
    for row in 0..height {
        let sample_id = sample_ids[row].clone().ok_or_else(|| {
            QaqcError::data_validation(format!("Row {} has no {}", row + 1, columns::SAMPLE_ID))
        })?;

        let sample_classification = classifications[row]
            .as_deref()
            .map(str::parse::<SampleClassification>)
            .transpose()?;

        samples.push(Sample {
            sample_id,
            sample_nm: sample_nms[row].clone().unwrap_or_default(),
            hole_id: hole_ids[row].clone(),
            depth_from: depth_froms[row],
            depth_to: depth_tos[row],
            sample_classification,
            original_sample_id: original_ids[row].clone(),
            original_sample_nm: original_nms[row].clone(),
            revision: revisions[row].clone(),
            sampled_by: sampled_by[row].clone(),
            sample_method: methods[row].clone(),
            weight: weights[row],
            standard_id: standard_ids[row].clone(),
            comments: comments[row].clone(),
        });
    }

    Ok(samples)
}

/// Convert sample records into a sample table
pub fn samples_to_dataframe(samples: &[Sample]) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        Column::new(
            columns::SAMPLE_ID.into(),
            field_values(samples, |s| s.sample_id.clone()),
        ),
        Column::new(
            columns::SAMPLE_NM.into(),
            field_values(samples, |s| s.sample_nm.clone()),
        ),
        Column::new(columns::HOLE_ID.into(), field_values(samples, |s| s.hole_id.clone())),
        Column::new(columns::DEPTH_FROM.into(), field_values(samples, |s| s.depth_from)),
        Column::new(columns::DEPTH_TO.into(), field_values(samples, |s| s.depth_to)),
        Column::new(
            columns::CLASSIFICATION.into(),
            field_values(samples, |s| s.sample_classification.map(|c| c.code().to_string())),
        ),
        Column::new(
            columns::ORIGINAL_SAMPLE_ID.into(),
            field_values(samples, |s| s.original_sample_id.clone()),
        ),
        Column::new(
            columns::ORIGINAL_SAMPLE_NM.into(),
            field_values(samples, |s| s.original_sample_nm.clone()),
        ),
        Column::new(columns::REVISION.into(), field_values(samples, |s| s.revision.clone())),
        Column::new(columns::SAMPLED_BY.into(), field_values(samples, |s| s.sampled_by.clone())),
        Column::new(columns::SAMPLE_METHOD.into(), field_values(samples, |s| s.sample_method.clone())),
        Column::new(columns::WEIGHT.into(), field_values(samples, |s| s.weight)),
        Column::new(columns::STANDARD_ID.into(), field_values(samples, |s| s.standard_id.clone())),
        Column::new(columns::COMMENTS.into(), field_values(samples, |s| s.comments.clone())),
    ])?;

    Ok(df)
}

fn field_values<T>(samples: &[Sample], field: impl Fn(&Sample) -> T) -> Vec<T> {
    samples.iter().map(field).collect()
}

/// Optional text column; blank cells and missing columns read as `None`
fn text_column(df: &DataFrame, name: &str, height: usize) -> Result<Vec<Option<String>>> {
    let Ok(column) = df.column(name) else {
        return Ok(vec![None; height]);
    };
    let column = column.cast(&DataType::String)?;
    let values = column
        .str()?
        .into_iter()
        .map(|value| {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        })
        .collect();
    Ok(values)
}

/// Optional numeric column; unparseable cells read as `None`
fn numeric_column(df: &DataFrame, name: &str, height: usize) -> Result<Vec<Option<f64>>> {
    let Ok(column) = df.column(name) else {
        return Ok(vec![None; height]);
    };
    let column = column.cast(&DataType::Float64)?;
    let values = column.f64()?.into_iter().collect();
    Ok(values)
}
