pub mod deriver;
pub mod importer;
pub mod merger;
pub mod orchestrator;
pub mod path_set;
pub mod progress;

pub use crate::domain::model::{
    AdvancedParameter, DistributionType, ImportPopulation, IndividualPropertiesCache,
    ParameterPath, PopulationFile,
};
pub use crate::domain::ports::{BaseIndividual, ProgressReporter, PropertiesCacheParser};
pub use crate::utils::error::Result;
