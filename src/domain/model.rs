use crate::utils::error::{ImportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// 個體內參數的位址，例如 `Organism|Liver|Volume`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterPath(String);

impl ParameterPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParameterPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParameterPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for ParameterPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

/// Per-individual parameter values keyed by path.
///
/// A cache produced for a single file keeps one value per individual in every
/// column. Once several files are merged, a column only holds the values of
/// the files that supplied that path, so it may be shorter than `count`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndividualPropertiesCache {
    count: usize,
    values: BTreeMap<ParameterPath, Vec<f64>>,
}

impl IndividualPropertiesCache {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            values: BTreeMap::new(),
        }
    }

    /// 新增一欄，長度與個體數不符時拒絕
    pub fn insert(&mut self, path: impl Into<ParameterPath>, values: Vec<f64>) -> Result<()> {
        let path = path.into();
        if values.len() != self.count {
            return Err(ImportError::InvalidCache {
                path: path.to_string(),
                expected: self.count,
                actual: values.len(),
            });
        }
        self.values.insert(path, values);
        Ok(())
    }

    pub fn with_values(mut self, path: impl Into<ParameterPath>, values: Vec<f64>) -> Result<Self> {
        self.insert(path, values)?;
        Ok(self)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, path: &ParameterPath) -> bool {
        self.values.contains_key(path)
    }

    pub fn values_for(&self, path: &ParameterPath) -> Option<&[f64]> {
        self.values.get(path).map(Vec::as_slice)
    }

    pub fn remove(&mut self, path: &ParameterPath) -> Option<Vec<f64>> {
        self.values.remove(path)
    }

    pub fn all_parameter_paths(&self) -> impl Iterator<Item = &ParameterPath> {
        self.values.keys()
    }

    pub fn columns(&self) -> impl Iterator<Item = (&ParameterPath, &[f64])> {
        self.values.iter().map(|(path, values)| (path, values.as_slice()))
    }

    pub(crate) fn into_columns(self) -> (usize, BTreeMap<ParameterPath, Vec<f64>>) {
        (self.count, self.values)
    }

    pub(crate) fn append(&mut self, path: ParameterPath, values: Vec<f64>) {
        self.values.entry(path).or_default().extend(values);
    }

    pub(crate) fn add_individuals(&mut self, count: usize) {
        self.count += count;
    }
}

/// 單一匯入檔案的來源資訊，同時記錄驗證時產生的警告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationFile {
    pub file_path: PathBuf,
    pub number_of_individuals: usize,
    pub warnings: Vec<String>,
}

impl PopulationFile {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            number_of_individuals: 0,
            warnings: Vec::new(),
        }
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

/// 匯入的參數沒有分佈資訊，一律為 `Unknown`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistributionType {
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvancedParameter {
    pub parameter_path: ParameterPath,
    pub distribution_type: DistributionType,
    /// 匯入的參數一律為 false，保留檔案中的原始值
    pub generate_random_values: bool,
}

/// The result of a population import. Only handed out once every file was
/// merged and the advanced parameters were derived.
#[derive(Debug, Clone)]
pub struct ImportPopulation<I> {
    base_individual: I,
    properties: IndividualPropertiesCache,
    files: Vec<PopulationFile>,
    advanced_parameters: Vec<AdvancedParameter>,
    is_loaded: bool,
}

impl<I> ImportPopulation<I> {
    pub(crate) fn new(base_individual: I) -> Self {
        Self {
            base_individual,
            properties: IndividualPropertiesCache::default(),
            files: Vec::new(),
            advanced_parameters: Vec::new(),
            is_loaded: false,
        }
    }

    pub fn base_individual(&self) -> &I {
        &self.base_individual
    }

    pub fn properties(&self) -> &IndividualPropertiesCache {
        &self.properties
    }

    pub fn files(&self) -> &[PopulationFile] {
        &self.files
    }

    pub fn advanced_parameters(&self) -> &[AdvancedParameter] {
        &self.advanced_parameters
    }

    pub fn number_of_individuals(&self) -> usize {
        self.properties.count()
    }

    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .flat_map(|file| file.warnings.iter().map(String::as_str))
    }

    pub(crate) fn properties_mut(&mut self) -> &mut IndividualPropertiesCache {
        &mut self.properties
    }

    pub(crate) fn add_file(&mut self, file: PopulationFile) {
        self.files.push(file);
    }

    pub(crate) fn set_advanced_parameters(&mut self, parameters: Vec<AdvancedParameter>) {
        self.advanced_parameters = parameters;
    }

    pub(crate) fn mark_loaded(&mut self) {
        self.is_loaded = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_rejects_wrong_column_length() {
        let mut cache = IndividualPropertiesCache::new(2);
        assert!(cache.insert("A", vec![1.0, 2.0]).is_ok());

        let err = cache.insert("B", vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            ImportError::InvalidCache {
                expected: 2,
                actual: 1,
                ..
            }
        ));
        assert!(!cache.contains(&"B".into()));
    }

    #[test]
    fn test_remove_keeps_individual_count() {
        let mut cache = IndividualPropertiesCache::new(3)
            .with_values("A", vec![1.0, 2.0, 3.0])
            .unwrap()
            .with_values("X", vec![9.0, 9.0, 9.0])
            .unwrap();

        assert_eq!(cache.remove(&"X".into()), Some(vec![9.0, 9.0, 9.0]));
        assert_eq!(cache.count(), 3);
        let paths: Vec<_> = cache.all_parameter_paths().map(|p| p.as_str()).collect();
        assert_eq!(paths, vec!["A"]);
    }

    #[test]
    fn test_population_file_collects_warnings() {
        let mut file = PopulationFile::new("pop.csv");
        file.add_warning("first");
        file.add_warning("second");

        assert_eq!(file.file_path(), Path::new("pop.csv"));
        assert_eq!(file.warnings, vec!["first", "second"]);
    }

    #[test]
    fn test_parameter_path_serializes_as_string() {
        let path = ParameterPath::new("Organism|Weight");
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"Organism|Weight\"");
    }
}
