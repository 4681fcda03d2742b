//! Demo dataset utilities
//!
//! Fetching, standardizing, and splitting the UCI wine dataset for the
//! demo binary. The classifier itself only ever sees plain `Vec<f32>` rows
//! and raw label values; everything polars-specific stays in this module.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

const CACHE_PATH: &str = "./data/wine_dataset.csv";
const DATASET_URL: &str =
    "https://archive.ics.uci.edu/ml/machine-learning-databases/wine/wine.data";

/// Downloads the wine dataset to a local cache, or loads the cached copy.
///
/// The CSV has no header; the first column is the wine class (1, 2 or 3),
/// the remaining thirteen are chemical measurements.
pub fn fetch_wine() -> Result<DataFrame> {
    if !Path::new(CACHE_PATH).exists() {
        println!("Downloading data to {}...", CACHE_PATH);
        fs::create_dir_all("./data")?;
        let response = reqwest::blocking::get(DATASET_URL)?;
        let content = response.text()?;
        fs::write(CACHE_PATH, content)?;
    } else {
        println!("Loading existing file at {}", CACHE_PATH);
    }

    let file = fs::File::open(CACHE_PATH)?;
    let mut df = CsvReadOptions::default()
        .with_has_header(false)
        .into_reader_with_file_handle(file)
        .finish()?;

    let names: Vec<String> = (0..df.width())
        .map(|i| {
            if i == 0 {
                "class".to_string()
            } else {
                format!("feature_{}", i)
            }
        })
        .collect();
    df.set_column_names(names.iter().map(String::as_str))?;

    Ok(df)
}

/// Splits the label column (column 0) from the feature columns.
pub fn split_features_labels(df: DataFrame) -> Result<(DataFrame, Series)> {
    let labels = df
        .select_at_idx(0)
        .context("dataset has no columns")?
        .as_materialized_series()
        .clone();
    let features = df.select_by_range(1..df.width())?;

    Ok((features, labels))
}

/// Z-score standardization per column, with sample standard deviation.
pub fn standardize(df: DataFrame) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(df.width());
    for series in df.iter() {
        let series = series.cast(&DataType::Float32)?;
        let mean = series.mean().context("column has no mean")?;
        let std = series.std(1).context("column has no std")?;
        columns.push(((&series - mean) / std).into_column());
    }

    DataFrame::new(columns).map_err(Into::into)
}

/// Converts a feature DataFrame to row vectors for the classifier.
pub fn to_rows(df: &DataFrame) -> Result<Vec<Vec<f32>>> {
    let mut columns = Vec::with_capacity(df.width());
    for series in df.iter() {
        let series = series.cast(&DataType::Float32)?;
        let values: Vec<f32> = series
            .f32()?
            .into_iter()
            .map(|value| value.unwrap_or(0.0))
            .collect();
        columns.push(values);
    }

    let mut rows = vec![Vec::with_capacity(df.width()); df.height()];
    for column in columns {
        for (row, value) in rows.iter_mut().zip(column) {
            row.push(value);
        }
    }

    Ok(rows)
}

/// Extracts the raw class labels as `i64` values.
///
/// The wine classes stay 1/2/3 as shipped; the classifier's label index
/// handles arbitrary label values, so there is no need to shift them to a
/// zero-based range here.
pub fn to_labels(series: &Series) -> Result<Vec<i64>> {
    let series = series.cast(&DataType::Int64)?;
    let labels = series
        .i64()?
        .into_iter()
        .map(|value| value.unwrap_or(0))
        .collect();

    Ok(labels)
}

/// Seeded shuffle followed by a ratio split into train and test portions.
pub fn train_test_split<L: Clone>(
    rows: Vec<Vec<f32>>,
    labels: Vec<L>,
    train_ratio: f64,
    seed: u64,
) -> (Vec<Vec<f32>>, Vec<L>, Vec<Vec<f32>>, Vec<L>) {
    let mut paired: Vec<(Vec<f32>, L)> = rows.into_iter().zip(labels).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    paired.shuffle(&mut rng);

    let train_size = (paired.len() as f64 * train_ratio) as usize;
    let test = paired.split_off(train_size);

    let (x_train, y_train) = paired.into_iter().unzip();
    let (x_test, y_test) = test.into_iter().unzip();

    (x_train, y_train, x_test, y_test)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_respects_ratio_and_keeps_pairs() {
        let rows: Vec<Vec<f32>> = (0..10).map(|i| vec![i as f32]).collect();
        let labels: Vec<i64> = (0..10).collect();

        let (x_train, y_train, x_test, y_test) = train_test_split(rows, labels, 0.7, 42);

        assert_eq!(x_train.len(), 7);
        assert_eq!(x_test.len(), 3);
        for (row, label) in x_train.iter().zip(&y_train) {
            assert_eq!(row[0] as i64, *label);
        }
        for (row, label) in x_test.iter().zip(&y_test) {
            assert_eq!(row[0] as i64, *label);
        }
    }
}
