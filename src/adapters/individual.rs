use crate::domain::model::ParameterPath;
use crate::domain::ports::BaseIndividual;
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::{validate_file_extension, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateParameter {
    pub path: ParameterPath,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub changed_by_create_individual: bool,
}

/// A base individual described by its parameter list, as exported by the
/// individual construction tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualTemplate {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<TemplateParameter>,
}

impl IndividualTemplate {
    /// 從 `.json` 或 `.toml` 檔案載入個體範本
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        validate_file_extension("individual.template", path, &["json", "toml"])?;

        let content = std::fs::read_to_string(path)?;
        // 依副檔名選擇解析格式
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let template = if is_toml {
            Self::from_toml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };
        template.validate()?;
        Ok(template)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ImportError::ConfigError {
            message: format!("Invalid individual template: {}", e),
        })
    }
}

impl Validate for IndividualTemplate {
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for parameter in &self.parameters {
            if !seen.insert(&parameter.path) {
                return Err(ImportError::ConfigError {
                    message: format!(
                        "Parameter '{}' is defined twice in individual '{}'",
                        parameter.path, self.name
                    ),
                });
            }
        }
        Ok(())
    }
}

impl BaseIndividual for IndividualTemplate {
    fn all_parameter_paths(&self) -> Vec<ParameterPath> {
        self.parameters.iter().map(|p| p.path.clone()).collect()
    }

    fn create_individual_parameter_paths(&self) -> Vec<ParameterPath> {
        self.parameters
            .iter()
            .filter(|p| p.changed_by_create_individual)
            .map(|p| p.path.clone())
            .collect()
    }
}
