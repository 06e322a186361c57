use crate::core::deriver::derive_advanced_parameters;
use crate::core::importer::{FileImporter, ImportResult};
use crate::core::merger::merge_into;
use crate::core::path_set::ParameterPathSet;
use crate::core::progress::ProgressScope;
use crate::domain::model::ImportPopulation;
use crate::domain::ports::{BaseIndividual, ProgressReporter, PropertiesCacheParser};
use crate::utils::error::{ImportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

pub const CREATING_POPULATION: &str = "Creating population";

/// 匯入檔案合併進族群的順序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum MergeOrder {
    /// Merge each file as soon as its import task finishes. Individual order
    /// then depends on timing.
    #[default]
    Completion,
    /// 先完成的檔案會暫存，依傳入順序合併
    Submission,
}

#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub merge_order: MergeOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPhase {
    Initializing,
    Importing,
    Merging(usize),
    Deriving,
    Completed,
    Cancelled,
    Failed,
}

impl ImportPhase {
    /// 依錯誤種類決定失敗時的終止階段
    pub fn terminal_for(error: &ImportError) -> Self {
        if error.is_cancelled() {
            ImportPhase::Cancelled
        } else {
            ImportPhase::Failed
        }
    }
}

impl fmt::Display for ImportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportPhase::Initializing => f.write_str("initializing"),
            ImportPhase::Importing => f.write_str("importing"),
            ImportPhase::Merging(index) => write!(f, "merging({})", index),
            ImportPhase::Deriving => f.write_str("deriving"),
            ImportPhase::Completed => f.write_str("completed"),
            ImportPhase::Cancelled => f.write_str("cancelled"),
            ImportPhase::Failed => f.write_str("failed"),
        }
    }
}

/// 匯入入口：每個檔案一個任務，結果逐一合併，最後產生進階參數
pub struct ImportOrchestrator<P: ?Sized> {
    importer: FileImporter<P>,
    progress: Arc<dyn ProgressReporter>,
    options: ImportOptions,
}

impl<P> ImportOrchestrator<P>
where
    P: PropertiesCacheParser + ?Sized + 'static,
{
    pub fn new(parser: Arc<P>, progress: Arc<dyn ProgressReporter>, options: ImportOptions) -> Self {
        Self {
            importer: FileImporter::new(parser),
            progress,
            options,
        }
    }

    /// Imports `files` against a private copy of `individual`.
    ///
    /// Either every file is merged and the population is returned, or the
    /// call fails and nothing is returned. On failure or cancellation the
    /// remaining import tasks are cancelled and aborted.
    pub async fn create_for<I: BaseIndividual>(
        &self,
        files: &[PathBuf],
        individual: &I,
        cancel: &CancellationToken,
    ) -> Result<ImportPopulation<I>> {
        let progress =
            ProgressScope::acquire(self.progress.as_ref(), files.len(), CREATING_POPULATION);

        let population = self.run(files, individual, cancel, &progress).await;
        match &population {
            Ok(population) => tracing::info!(
                phase = %ImportPhase::Completed,
                files = population.files().len(),
                individuals = population.number_of_individuals(),
                advanced_parameters = population.advanced_parameters().len(),
                "Population import completed"
            ),
            Err(e) => match ImportPhase::terminal_for(e) {
                phase @ ImportPhase::Cancelled => {
                    tracing::warn!(phase = %phase, "Population import cancelled")
                }
                phase => tracing::error!(
                    phase = %phase,
                    error = %e,
                    "Population import failed, remaining imports cancelled"
                ),
            },
        }
        population
    }

    async fn run<I: BaseIndividual>(
        &self,
        files: &[PathBuf],
        individual: &I,
        cancel: &CancellationToken,
        progress: &ProgressScope<'_>,
    ) -> Result<ImportPopulation<I>> {
        tracing::debug!(phase = %ImportPhase::Initializing, files = files.len(), "Starting population import");

        let mut population = ImportPopulation::new(individual.clone());
        let path_set = Arc::new(ParameterPathSet::from_individual(
            population.base_individual(),
        ));
        if path_set.is_empty() && !files.is_empty() {
            tracing::warn!("Base individual has no parameters, every imported column will be dropped");
        }
        tracing::debug!(
            parameters = path_set.len(),
            fixed_by_construction = path_set.fixed_by_construction_len(),
            "Cached base individual parameter paths"
        );

        // 子 token 離開時自動取消，確保剩餘任務一定會收到取消
        let run_token = cancel.child_token();
        let _run_guard = run_token.clone().drop_guard();

        tracing::debug!(phase = %ImportPhase::Importing, "Launching import tasks");
        let mut tasks = JoinSet::new();
        for (index, file) in files.iter().cloned().enumerate() {
            let importer = self.importer.clone();
            let path_set = Arc::clone(&path_set);
            let token = run_token.clone();
            tasks.spawn(async move { (index, importer.import(file, &path_set, &token).await) });
        }

        let mut queue = MergeQueue::new(self.options.merge_order);
        let mut merged = 0;
        loop {
            if cancel.is_cancelled() {
                return Err(ImportError::Cancelled);
            }

            // 取消優先於已完成的任務
            let joined = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ImportError::Cancelled),
                joined = tasks.join_next() => joined,
            };
            let Some(joined) = joined else {
                break;
            };

            let (index, result) = joined?;
            let result = result?;

            // 合併一次只處理一個檔案
            for ready in queue.push(index, result) {
                merged += 1;
                tracing::debug!(
                    phase = %ImportPhase::Merging(merged),
                    file = %ready.population_file.file_path().display(),
                    individuals = ready.population_file.number_of_individuals,
                    "Merging imported individuals"
                );
                population.add_file(ready.population_file);
                merge_into(population.properties_mut(), ready.individual_values, &path_set);
                progress.increment();
            }
        }

        tracing::debug!(phase = %ImportPhase::Deriving, "Creating advanced parameters");
        let advanced_parameters = derive_advanced_parameters(population.properties(), &path_set);
        population.set_advanced_parameters(advanced_parameters);
        population.mark_loaded();

        Ok(population)
    }
}

/// 決定哪些已完成的匯入可以立即合併
struct MergeQueue {
    order: MergeOrder,
    next_index: usize,
    pending: BTreeMap<usize, ImportResult>,
}

impl MergeQueue {
    fn new(order: MergeOrder) -> Self {
        Self {
            order,
            next_index: 0,
            pending: BTreeMap::new(),
        }
    }

    fn push(&mut self, index: usize, result: ImportResult) -> Vec<ImportResult> {
        match self.order {
            MergeOrder::Completion => vec![result],
            MergeOrder::Submission => {
                self.pending.insert(index, result);
                let mut ready = Vec::new();
                while let Some(next) = self.pending.remove(&self.next_index) {
                    ready.push(next);
                    self.next_index += 1;
                }
                ready
            }
        }
    }
}
