use crate::domain::model::{IndividualPropertiesCache, ParameterPath};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// The template individual an import is validated against.
///
/// `Clone` stands in for the cloner: the population keeps its own copy and
/// never touches the caller's instance.
pub trait BaseIndividual: Clone + Send + Sync + 'static {
    /// 個體上所有可定址的參數路徑
    fn all_parameter_paths(&self) -> Vec<ParameterPath>;

    /// 每次由原始資料建立個體時會重新計算的路徑
    fn create_individual_parameter_paths(&self) -> Vec<ParameterPath>;
}

/// 將單一族群檔案讀入屬性快取
#[async_trait]
pub trait PropertiesCacheParser: Send + Sync {
    async fn parse(&self, file: &Path) -> Result<IndividualPropertiesCache>;
}

/// Receives progress for one import run. `release` is called exactly once,
/// on success as well as on failure or cancellation.
pub trait ProgressReporter: Send + Sync {
    fn initialize(&self, total: usize, label: &str);
    fn increment_progress(&self);
    fn release(&self);
}
