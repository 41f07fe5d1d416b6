use crate::utils::error::{Result, TaggerError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(TaggerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(TaggerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let extension = std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) if allowed_extensions.contains(&ext.as_str()) => Ok(()),
        Some(ext) => Err(TaggerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                ext,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(TaggerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| TaggerError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(TaggerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty".to_string(),
        });
    }
    Ok(())
}

pub fn validate_distinct_paths(field_name: &str, input: &str, output: &str) -> Result<()> {
    if input.trim() == output.trim() {
        return Err(TaggerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: output.to_string(),
            reason: "Output would overwrite the input catalog".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("source.input_path", "products.csv").is_ok());
        assert!(validate_path("source.input_path", "").is_err());
        assert!(validate_path("source.input_path", "   ").is_err());
        assert!(validate_path("source.input_path", "bad\0path.csv").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("input", "export.csv", &["csv"]).is_ok());
        assert!(validate_file_extension("input", "EXPORT.CSV", &["csv"]).is_ok());
        assert!(validate_file_extension("input", "export.xlsx", &["csv"]).is_err());
        assert!(validate_file_extension("input", "export", &["csv"]).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("what you need".to_string());
        let missing: Option<String> = None;
        assert_eq!(
            validate_required_field("catalog.managed_vendor", &present).unwrap(),
            "what you need"
        );
        assert!(matches!(
            validate_required_field("catalog.managed_vendor", &missing),
            Err(TaggerError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_separator_and_paths() {
        assert!(validate_non_empty_string("tag_separator", ", ").is_ok());
        assert!(validate_non_empty_string("tag_separator", "").is_err());
        assert!(validate_distinct_paths("output", "in.csv", "out.csv").is_ok());
        assert!(validate_distinct_paths("output", "in.csv", "in.csv").is_err());
    }
}
