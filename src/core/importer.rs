use crate::core::path_set::ParameterPathSet;
use crate::domain::model::{IndividualPropertiesCache, PopulationFile};
use crate::domain::ports::PropertiesCacheParser;
use crate::utils::error::{ImportError, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// 單一檔案對族群的貢獻
#[derive(Debug)]
pub struct ImportResult {
    pub individual_values: IndividualPropertiesCache,
    pub population_file: PopulationFile,
}

/// Imports a single population file and drops the columns the base
/// individual does not know about.
pub struct FileImporter<P: ?Sized> {
    parser: Arc<P>,
}

impl<P: ?Sized> Clone for FileImporter<P> {
    fn clone(&self) -> Self {
        Self {
            parser: Arc::clone(&self.parser),
        }
    }
}

impl<P: PropertiesCacheParser + ?Sized> FileImporter<P> {
    pub fn new(parser: Arc<P>) -> Self {
        Self { parser }
    }

    pub async fn import(
        &self,
        file: PathBuf,
        path_set: &ParameterPathSet,
        cancel: &CancellationToken,
    ) -> Result<ImportResult> {
        tracing::debug!(file = %file.display(), "Importing population file");

        let mut population_file = PopulationFile::new(file.clone());
        let mut individual_values = self
            .parser
            .parse(&file)
            .await
            .map_err(|e| ImportError::file_parse(file.clone(), e))?;

        // 通過此檢查點後任務會完成本地工作
        if cancel.is_cancelled() {
            return Err(ImportError::Cancelled);
        }

        validate(&mut individual_values, path_set, &mut population_file);
        population_file.number_of_individuals = individual_values.count();

        tracing::debug!(
            file = %file.display(),
            individuals = population_file.number_of_individuals,
            warnings = population_file.warnings.len(),
            "Population file imported"
        );

        Ok(ImportResult {
            individual_values,
            population_file,
        })
    }
}

pub fn parameter_not_found_warning(path: &impl std::fmt::Display) -> String {
    format!("Parameter with path '{}' not found in base individual", path)
}

/// 移除基礎個體不認得的欄位，每個移除的路徑記錄一筆警告
pub fn validate(
    individual_values: &mut IndividualPropertiesCache,
    path_set: &ParameterPathSet,
    population_file: &mut PopulationFile,
) {
    let unknown_paths: Vec<_> = individual_values
        .all_parameter_paths()
        .filter(|path| !path_set.contains(path))
        .cloned()
        .collect();

    for path in unknown_paths {
        tracing::warn!(
            file = %population_file.file_path().display(),
            parameter_path = %path,
            "Parameter not found in base individual, dropping column"
        );
        population_file.add_warning(parameter_not_found_warning(&path));
        individual_values.remove(&path);
    }
}
