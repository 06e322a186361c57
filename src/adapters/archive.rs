use crate::domain::model::{AdvancedParameter, ImportPopulation, PopulationFile};
use crate::utils::error::{ImportError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const ARCHIVE_NAME: &str = "population.zip";
pub const VALUES_FILE: &str = "values.csv";
pub const SUMMARY_FILE: &str = "summary.json";

/// 匯入完成後的摘要，可序列化輸出
#[derive(Debug, Clone, Serialize)]
pub struct PopulationSummary {
    pub created_at: DateTime<Utc>,
    pub number_of_individuals: usize,
    pub number_of_parameters: usize,
    pub files: Vec<PopulationFile>,
    pub advanced_parameters: Vec<AdvancedParameter>,
}

impl PopulationSummary {
    pub fn from_population<I>(population: &ImportPopulation<I>) -> Self {
        Self {
            created_at: Utc::now(),
            number_of_individuals: population.number_of_individuals(),
            number_of_parameters: population.properties().all_parameter_paths().count(),
            files: population.files().to_vec(),
            advanced_parameters: population.advanced_parameters().to_vec(),
        }
    }
}

/// 將匯入的族群寫入 `<output_dir>/population.zip`
#[derive(Debug, Clone)]
pub struct PopulationArchive {
    output_dir: PathBuf,
}

impl PopulationArchive {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub async fn write<I>(&self, population: &ImportPopulation<I>) -> Result<PathBuf> {
        let archive = build_archive(population)?;
        let target = self.output_dir.join(ARCHIVE_NAME);

        tokio::fs::create_dir_all(&self.output_dir).await?;
        tracing::debug!("Writing population archive ({} bytes) to {}", archive.len(), target.display());
        tokio::fs::write(&target, archive).await?;

        Ok(target)
    }
}

/// 以長格式輸出數值 (合併後各欄長度可能不同)
pub fn values_csv<I>(population: &ImportPopulation<I>) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["parameter_path", "value_index", "value"])?;

    for (path, values) in population.properties().columns() {
        for (index, value) in values.iter().enumerate() {
            writer.write_record([
                path.as_str(),
                index.to_string().as_str(),
                value.to_string().as_str(),
            ])?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| ImportError::IoError(e.into_error()))
}

fn build_archive<I>(population: &ImportPopulation<I>) -> Result<Vec<u8>> {
    let values = values_csv(population)?;
    let summary = serde_json::to_string_pretty(&PopulationSummary::from_population(population))?;

    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    zip.start_file(VALUES_FILE, SimpleFileOptions::default())?;
    zip.write_all(&values)?;

    zip.start_file(SUMMARY_FILE, SimpleFileOptions::default())?;
    zip.write_all(summary.as_bytes())?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
