use super::{delimiter_byte, RunSettings, TomlConfig, DEFAULT_OUTPUT_PATH};
use crate::core::orchestrator::{ImportOptions, MergeOrder};
use crate::utils::error::Result;
use crate::utils::validation::{validate_required_field, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "population-import")]
#[command(about = "Import population files into a single population")]
pub struct CliConfig {
    /// 族群 CSV 檔案，未指定時使用設定檔的 `import.files`
    pub files: Vec<PathBuf>,

    #[arg(long, help = "Base individual template (.json or .toml)")]
    pub individual: Option<PathBuf>,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub merge_order: Option<MergeOrder>,

    #[arg(long)]
    pub delimiter: Option<char>,

    #[arg(long, help = "Directory for the population archive")]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Write population.zip to the output directory")]
    pub archive: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 合併命令列參數與設定檔，命令列優先
    pub fn resolve(&self) -> Result<RunSettings> {
        let file_config = match &self.config {
            Some(path) => {
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                config
            }
            None => TomlConfig::default(),
        };

        let files = if self.files.is_empty() {
            file_config.import.files.clone()
        } else {
            self.files.clone()
        };

        let template = self
            .individual
            .clone()
            .or(file_config.individual.template.clone());
        let individual_template = validate_required_field("individual.template", &template)?.clone();

        let delimiter = self
            .delimiter
            .or(file_config.import.delimiter)
            .map(delimiter_byte)
            .transpose()?
            .unwrap_or(b',');

        let settings = RunSettings {
            files,
            individual_template,
            output_path: self
                .output
                .clone()
                .or(file_config.output.path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
            archive: self.archive || file_config.output.archive,
            delimiter,
            options: ImportOptions {
                merge_order: self
                    .merge_order
                    .or(file_config.import.merge_order)
                    .unwrap_or_default(),
            },
        };
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ImportError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_arguments() {
        let cli = CliConfig::parse_from([
            "population-import",
            "a.csv",
            "b.csv",
            "--individual",
            "base.json",
            "--merge-order",
            "submission",
            "--archive",
        ]);

        let settings = cli.resolve().unwrap();

        assert_eq!(settings.files, vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
        assert_eq!(settings.options.merge_order, MergeOrder::Submission);
        assert_eq!(settings.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(settings.delimiter, b',');
        assert!(settings.archive);
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut config_file = NamedTempFile::new().unwrap();
        config_file
            .write_all(
                br#"
[import]
files = ["from_config.csv"]
merge_order = "submission"
delimiter = ";"

[individual]
template = "config_individual.toml"

[output]
path = "./config_out"
"#,
            )
            .unwrap();

        let cli = CliConfig::parse_from([
            "population-import",
            "--config",
            config_file.path().to_str().unwrap(),
            "--merge-order",
            "completion",
            "--output",
            "./cli_out",
        ]);

        let settings = cli.resolve().unwrap();

        assert_eq!(settings.files, vec![PathBuf::from("from_config.csv")]);
        assert_eq!(
            settings.individual_template,
            PathBuf::from("config_individual.toml")
        );
        assert_eq!(settings.options.merge_order, MergeOrder::Completion);
        assert_eq!(settings.output_path, PathBuf::from("./cli_out"));
        assert_eq!(settings.delimiter, b';');
        assert!(!settings.archive);
    }

    #[test]
    fn test_missing_individual_is_rejected() {
        let cli = CliConfig::parse_from(["population-import", "a.csv"]);
        assert!(matches!(
            cli.resolve(),
            Err(ImportError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_missing_files_are_rejected() {
        let cli = CliConfig::parse_from(["population-import", "--individual", "base.json"]);
        assert!(cli.resolve().is_err());
    }
}
