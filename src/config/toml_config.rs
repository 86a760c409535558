use crate::utils::error::{FragmentError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub project: Option<ProjectConfig>,
    pub sources: SourcesConfig,
    pub markers: Option<MarkersConfig>,
    pub output: Option<OutputConfig>,
    pub behavior: Option<BehaviorConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    pub paths: Vec<String>,
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkersConfig {
    pub comment_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub formats: Option<Vec<String>>,
    pub zip: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    pub fail_fast: Option<bool>,
    pub only: Option<Vec<String>>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FragmentError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${SRC_ROOT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FragmentError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.name.as_str())
    }

    pub fn extensions(&self) -> &[String] {
        self.sources.extensions.as_deref().unwrap_or(&[])
    }

    pub fn comment_prefixes(&self) -> &[String] {
        self.markers
            .as_ref()
            .map(|m| m.comment_prefixes.as_slice())
            .unwrap_or(&[])
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    pub fn output_formats(&self) -> &[String] {
        self.output
            .as_ref()
            .and_then(|o| o.formats.as_deref())
            .unwrap_or(&[])
    }

    pub fn zip_enabled(&self) -> bool {
        self.output.as_ref().and_then(|o| o.zip).unwrap_or(false)
    }

    pub fn fail_fast(&self) -> bool {
        self.behavior
            .as_ref()
            .and_then(|b| b.fail_fast)
            .unwrap_or(true)
    }

    pub fn only(&self) -> &[String] {
        self.behavior
            .as_ref()
            .and_then(|b| b.only.as_deref())
            .unwrap_or(&[])
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_list("sources.paths", &self.sources.paths)?;
        for path in &self.sources.paths {
            validation::validate_path("sources.paths", path)?;
        }
        validation::validate_extensions("sources.extensions", self.extensions())?;

        if let Some(markers) = &self.markers {
            validation::validate_non_empty_list("markers.comment_prefixes", &markers.comment_prefixes)?;
            for prefix in &markers.comment_prefixes {
                validation::validate_non_empty_string("markers.comment_prefixes", prefix)?;
            }
        }

        if let Some(path) = self.output_path() {
            validation::validate_path("output.path", path)?;
        }
        validation::validate_output_formats("output.formats", self.output_formats())?;
        validation::validate_fragment_names("behavior.only", self.only())?;

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
