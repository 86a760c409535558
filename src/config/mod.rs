pub mod cli;
pub mod toml_config;

use crate::core::parser::DEFAULT_COMMENT_PREFIXES;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_OUTPUT_PATH: &str = "./fragments";
pub const DEFAULT_FORMAT: &str = "json";

#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(feature = "cli", command(name = "fragx"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Extract labeled code fragments from source files")
)]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Source files or directories to scan
    #[cfg_attr(feature = "cli", arg(value_name = "SOURCES"))]
    pub sources: Vec<String>,

    /// TOML configuration file; command line values take precedence
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub config: Option<String>,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Output directory [default: ./fragments]"))]
    pub output_path: Option<String>,

    #[cfg_attr(
        feature = "cli",
        arg(long, value_delimiter = ',', help = "Output formats: json, csv, tsv [default: json]")
    )]
    pub formats: Vec<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Bundle all outputs into fragments.zip"))]
    pub zip: bool,

    #[cfg_attr(
        feature = "cli",
        arg(short = 'f', long = "fragment", value_name = "NAME", help = "Only keep fragments with this name (repeatable)")
    )]
    pub only: Vec<String>,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Print fragment text to stdout instead of writing files"))]
    pub print: bool,

    #[cfg_attr(
        feature = "cli",
        arg(long = "comment-prefix", value_name = "PREFIX", help = "Comment prefix markers follow (repeatable) [default: // #]")
    )]
    pub comment_prefixes: Vec<String>,

    #[cfg_attr(
        feature = "cli",
        arg(long, value_delimiter = ',', help = "Extensions scanned inside directories, e.g. py,rs")
    )]
    pub extensions: Vec<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Skip files with marker errors instead of failing"))]
    pub keep_going: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Show what would be processed without writing"))]
    pub dry_run: bool,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON"))]
    pub log_json: bool,

    #[cfg_attr(feature = "cli", arg(skip))]
    #[serde(skip)]
    pub project_name: Option<String>,
}

impl CliConfig {
    /// Fill every value still unset from the TOML file.
    pub fn merge_toml(&mut self, toml: &TomlConfig) {
        if self.sources.is_empty() {
            self.sources = toml.sources.paths.clone();
        }
        if self.output_path.is_none() {
            self.output_path = toml.output_path().map(str::to_string);
        }
        if self.formats.is_empty() {
            self.formats = toml.output_formats().to_vec();
        }
        if self.comment_prefixes.is_empty() {
            self.comment_prefixes = toml.comment_prefixes().to_vec();
        }
        if self.extensions.is_empty() {
            self.extensions = toml.extensions().to_vec();
        }
        if self.only.is_empty() {
            self.only = toml.only().to_vec();
        }
        self.zip |= toml.zip_enabled();
        self.keep_going |= !toml.fail_fast();
        if self.project_name.is_none() {
            self.project_name = toml.project_name().map(str::to_string);
        }
    }

    /// Built-in defaults for anything neither the command line nor the
    /// TOML file set.
    pub fn apply_defaults(&mut self) {
        if self.output_path.is_none() {
            self.output_path = Some(DEFAULT_OUTPUT_PATH.to_string());
        }
        if self.formats.is_empty() {
            self.formats = vec![DEFAULT_FORMAT.to_string()];
        }
        if self.comment_prefixes.is_empty() {
            self.comment_prefixes = DEFAULT_COMMENT_PREFIXES.iter().map(|p| p.to_string()).collect();
        }
    }

    /// 載入 --config 指定的檔案並補上預設值
    pub fn resolve(mut self) -> Result<Self> {
        if let Some(path) = self.config.clone() {
            let toml = TomlConfig::from_file(&path)?;
            toml.validate()?;
            self.merge_toml(&toml);
        }
        self.apply_defaults();
        Ok(self)
    }
}

impl ConfigProvider for CliConfig {
    fn sources(&self) -> &[String] {
        &self.sources
    }

    fn extensions(&self) -> &[String] {
        &self.extensions
    }

    fn comment_prefixes(&self) -> &[String] {
        &self.comment_prefixes
    }

    fn output_path(&self) -> &str {
        self.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn zip_enabled(&self) -> bool {
        self.zip
    }

    fn fail_fast(&self) -> bool {
        !self.keep_going
    }

    fn only(&self) -> &[String] {
        &self.only
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_list("sources", &self.sources)?;
        for source in &self.sources {
            validation::validate_path("sources", source)?;
        }
        validation::validate_path("output_path", self.output_path())?;
        validation::validate_output_formats("formats", &self.formats)?;
        validation::validate_extensions("extensions", &self.extensions)?;
        for prefix in &self.comment_prefixes {
            validation::validate_non_empty_string("comment_prefix", prefix)?;
        }
        validation::validate_fragment_names("fragment", &self.only)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toml(content: &str) -> TomlConfig {
        TomlConfig::from_toml_str(content).unwrap()
    }

    #[test]
    fn test_defaults_are_applied() {
        let mut config = CliConfig {
            sources: vec!["a.py".to_string()],
            ..Default::default()
        };
        config.apply_defaults();

        assert_eq!(config.output_path(), DEFAULT_OUTPUT_PATH);
        assert_eq!(config.output_formats(), ["json"]);
        assert_eq!(config.comment_prefixes(), ["//", "#"]);
        assert!(config.fail_fast());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_command_line_overrides_toml() {
        let mut config = CliConfig {
            formats: vec!["csv".to_string()],
            ..Default::default()
        };
        config.merge_toml(&toml(
            r#"
[project]
name = "docs"

[sources]
paths = ["src"]

[output]
path = "./out"
formats = ["json", "tsv"]
zip = true

[behavior]
fail_fast = false
"#,
        ));
        config.apply_defaults();

        assert_eq!(config.sources(), ["src"]);
        assert_eq!(config.output_formats(), ["csv"]);
        assert_eq!(config.output_path(), "./out");
        assert!(config.zip_enabled());
        assert!(!config.fail_fast());
        assert_eq!(config.project_name.as_deref(), Some("docs"));
    }

    #[test]
    fn test_validation_rejects_missing_sources() {
        let mut config = CliConfig::default();
        config.apply_defaults();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_fragment_name() {
        let mut config = CliConfig {
            sources: vec!["a.py".to_string()],
            only: vec!["not valid".to_string()],
            ..Default::default()
        };
        config.apply_defaults();
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_parse_command_line() {
        use clap::Parser;

        let config = CliConfig::try_parse_from([
            "fragx",
            "src",
            "tests/samples/code_section_2.py",
            "--formats",
            "json,csv",
            "--fragment",
            "PythonStyleFragmentA",
            "--comment-prefix=--",
            "--keep-going",
        ])
        .unwrap();

        assert_eq!(config.sources, vec!["src", "tests/samples/code_section_2.py"]);
        assert_eq!(config.formats, vec!["json", "csv"]);
        assert_eq!(config.only, vec!["PythonStyleFragmentA"]);
        assert_eq!(config.comment_prefixes, vec!["--"]);
        assert!(config.keep_going);
        assert!(config.output_path.is_none());
    }
}
