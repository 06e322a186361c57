#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::orchestrator::ImportOptions;
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_list, validate_path, Validate,
};
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";

/// 合併 CLI 參數與設定檔後的單次匯入設定
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub files: Vec<PathBuf>,
    pub individual_template: PathBuf,
    pub output_path: PathBuf,
    pub archive: bool,
    pub delimiter: u8,
    pub options: ImportOptions,
}

pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() && !delimiter.is_ascii_alphanumeric() {
        Ok(delimiter as u8)
    } else {
        Err(ImportError::InvalidConfigValueError {
            field: "import.delimiter".to_string(),
            value: delimiter.to_string(),
            reason: "Delimiter must be a single ASCII punctuation or whitespace character"
                .to_string(),
        })
    }
}

impl Validate for RunSettings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_list("import.files", &self.files)?;
        for file in &self.files {
            validate_path("import.files", file)?;
        }
        validate_file_extension(
            "individual.template",
            &self.individual_template,
            &["json", "toml"],
        )?;
        validate_path("output.path", &self.output_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> RunSettings {
        RunSettings {
            files: vec![PathBuf::from("a.csv")],
            individual_template: PathBuf::from("base.json"),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            archive: false,
            delimiter: b',',
            options: ImportOptions::default(),
        }
    }

    #[test]
    fn test_valid_settings() {
        assert!(settings().validate().is_ok());
    }

    #[test]
    fn test_settings_without_files_are_rejected() {
        let mut settings = settings();
        settings.files.clear();
        assert!(matches!(
            settings.validate(),
            Err(ImportError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_delimiter_byte() {
        assert_eq!(delimiter_byte(';').unwrap(), b';');
        assert_eq!(delimiter_byte('\t').unwrap(), b'\t');
        assert!(delimiter_byte('a').is_err());
        assert!(delimiter_byte('§').is_err());
    }
}
