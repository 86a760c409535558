use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FragmentError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Ending a code fragment without a beginning one on line {line}. Content: \"{content}\"")]
    UnmatchedEndFragment { line: usize, content: String },

    #[error("Ending the escape section without a beginning one on line {line}. Content: \"{content}\"")]
    UnmatchedEndEscape { line: usize, content: String },

    #[error("Beginning fragment without ending it on line {line}. Content: \"{content}\"")]
    UnclosedFragment { line: usize, content: String },

    #[error("Beginning escape without ending it on line {line}. Content: \"{content}\"")]
    UnclosedEscape { line: usize, content: String },

    #[error("{}: {}", .path.display(), .source)]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<FragmentError>,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Syntax,
    Configuration,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FragmentError {
    /// Attach the source file an error was raised for.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        FragmentError::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// The error without any file context wrappers.
    pub fn root(&self) -> &FragmentError {
        match self {
            FragmentError::InFile { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn is_syntax_error(&self) -> bool {
        self.category() == ErrorCategory::Syntax
    }

    pub fn category(&self) -> ErrorCategory {
        match self.root() {
            FragmentError::UnmatchedEndFragment { .. }
            | FragmentError::UnmatchedEndEscape { .. }
            | FragmentError::UnclosedFragment { .. }
            | FragmentError::UnclosedEscape { .. } => ErrorCategory::Syntax,
            FragmentError::TomlError(_)
            | FragmentError::ConfigError { .. }
            | FragmentError::MissingConfigError { .. }
            | FragmentError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            FragmentError::CsvError(_)
            | FragmentError::SerializationError(_)
            | FragmentError::ProcessingError { .. }
            | FragmentError::ValidationError { .. } => ErrorCategory::Processing,
            FragmentError::ZipError(_) | FragmentError::IoError(_) => ErrorCategory::System,
            FragmentError::InFile { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Syntax => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit status for the CLI: 2 syntax, 1 config/processing, 3 system.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.root() {
            FragmentError::UnmatchedEndFragment { .. } => {
                "Add the missing \"BEGIN FRAGMENT: <name>\" marker or remove the stray \"END FRAGMENT\""
            }
            FragmentError::UnmatchedEndEscape { .. } => {
                "Add the missing \"BEGIN ESCAPE\" marker or remove the stray \"END ESCAPE\""
            }
            FragmentError::UnclosedFragment { .. } => "Close the fragment with an \"END FRAGMENT\" marker",
            FragmentError::UnclosedEscape { .. } => "Close the escape section with an \"END ESCAPE\" marker",
            FragmentError::IoError(_) => "Check that the source files exist and the output directory is writable",
            FragmentError::TomlError(_) => "Check the TOML configuration file syntax",
            FragmentError::ConfigError { .. }
            | FragmentError::MissingConfigError { .. }
            | FragmentError::InvalidConfigValueError { .. } => "Review the command line arguments and configuration file",
            FragmentError::ZipError(_) => "Check free disk space, or disable the ZIP bundle",
            _ => "Re-run with --verbose for more details",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FragmentError::InFile { path, source } => {
                format!("{}: {}", path.display(), source.user_friendly_message())
            }
            FragmentError::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FragmentError>;
