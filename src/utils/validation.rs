use crate::core::parser::is_valid_fragment_name;
use crate::utils::error::{FragmentError, Result};
use std::collections::HashSet;

pub const SUPPORTED_FORMATS: &[&str] = &["json", "csv", "tsv"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FragmentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FragmentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FragmentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_list<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(FragmentError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    let allowed: HashSet<&str> = SUPPORTED_FORMATS.iter().copied().collect();

    for format in formats {
        if !allowed.contains(format.as_str()) {
            return Err(FragmentError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    SUPPORTED_FORMATS.join(", ")
                ),
            });
        }
    }
    Ok(())
}

/// Extensions are given without the leading dot, e.g. `py` or `rs`.
pub fn validate_extensions(field_name: &str, extensions: &[String]) -> Result<()> {
    for ext in extensions {
        if ext.is_empty() || ext.starts_with('.') || ext.contains(['/', '\\']) {
            return Err(FragmentError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: ext.clone(),
                reason: "Extensions must be bare names such as \"py\"".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_fragment_names(field_name: &str, names: &[String]) -> Result<()> {
    for name in names {
        if !is_valid_fragment_name(name) {
            return Err(FragmentError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.clone(),
                reason: "Fragment names may only contain letters, digits, '_' and '-'".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output_path", "./fragments").is_ok());
        assert!(validate_path("output_path", "").is_err());
        assert!(validate_path("output_path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_output_formats() {
        let formats = vec!["json".to_string(), "tsv".to_string()];
        assert!(validate_output_formats("formats", &formats).is_ok());

        let invalid = vec!["xml".to_string()];
        assert!(validate_output_formats("formats", &invalid).is_err());
    }

    #[test]
    fn test_validate_extensions() {
        assert!(validate_extensions("extensions", &["py".to_string(), "rs".to_string()]).is_ok());
        assert!(validate_extensions("extensions", &[".py".to_string()]).is_err());
        assert!(validate_extensions("extensions", &[String::new()]).is_err());
    }

    #[test]
    fn test_validate_fragment_names() {
        let names = vec!["PythonStyleFragmentA".to_string(), "snake_case-2".to_string()];
        assert!(validate_fragment_names("only", &names).is_ok());
        assert!(validate_fragment_names("only", &["has space".to_string()]).is_err());
    }

    #[test]
    fn test_validate_non_empty() {
        assert!(validate_non_empty_string("comment_prefixes", "//").is_ok());
        assert!(validate_non_empty_string("comment_prefixes", "  ").is_err());
        assert!(validate_non_empty_list::<String>("sources", &[]).is_err());
    }
}
