use crate::domain::model::{IndividualPropertiesCache, ParameterPath};
use crate::domain::ports::PropertiesCacheParser;
use crate::utils::error::{ImportError, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;

/// 個體編號欄位，不屬於參數
pub const INDIVIDUAL_ID_COLUMN: &str = "IndividualId";

/// Reads population CSV files: one parameter path per header cell, one
/// individual per row. Lines starting with `#` are skipped.
#[derive(Debug, Clone)]
pub struct CsvPopulationParser {
    delimiter: u8,
}

impl Default for CsvPopulationParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvPopulationParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn parse_bytes(&self, data: &[u8]) -> Result<IndividualPropertiesCache> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .has_headers(true)
            .from_reader(data);

        let headers = reader.headers()?.clone();
        let mut seen = HashSet::new();
        let mut columns: Vec<(usize, ParameterPath)> = Vec::new();
        for (index, header) in headers.iter().enumerate() {
            if header.eq_ignore_ascii_case(INDIVIDUAL_ID_COLUMN) {
                continue;
            }
            if !seen.insert(header) {
                return Err(ImportError::DuplicateColumn {
                    path: header.to_string(),
                });
            }
            columns.push((index, ParameterPath::from(header)));
        }

        let mut values: Vec<Vec<f64>> = vec![Vec::new(); columns.len()];
        let mut count = 0;
        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            for ((index, path), column) in columns.iter().zip(values.iter_mut()) {
                let raw = record.get(*index).unwrap_or_default();
                let value = raw.parse::<f64>().map_err(|_| ImportError::InvalidValue {
                    path: path.to_string(),
                    line,
                    value: raw.to_string(),
                })?;
                column.push(value);
            }
            count += 1;
        }

        let mut cache = IndividualPropertiesCache::new(count);
        for ((_, path), column) in columns.into_iter().zip(values) {
            cache.insert(path, column)?;
        }

        Ok(cache)
    }
}

#[async_trait]
impl PropertiesCacheParser for CsvPopulationParser {
    async fn parse(&self, file: &Path) -> Result<IndividualPropertiesCache> {
        let data = tokio::fs::read(file).await?;
        self.parse_bytes(&data)
    }
}
