pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{RunSettings, TomlConfig};

pub use adapters::{CsvPopulationParser, IndividualTemplate, PopulationArchive, TracingProgress};
pub use core::orchestrator::{ImportOptions, ImportOrchestrator, MergeOrder};
pub use domain::model::{
    AdvancedParameter, DistributionType, ImportPopulation, IndividualPropertiesCache,
    ParameterPath, PopulationFile,
};
pub use utils::error::{ImportError, Result};
