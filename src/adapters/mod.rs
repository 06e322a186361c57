// Adapters layer: concrete collaborators for parsing, templates, progress and output.

pub mod archive;
pub mod csv_parser;
pub mod individual;
pub mod progress;

pub use archive::{PopulationArchive, PopulationSummary};
pub use csv_parser::CsvPopulationParser;
pub use individual::{IndividualTemplate, TemplateParameter};
pub use progress::{NoopProgress, TracingProgress};
