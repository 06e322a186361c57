use crate::utils::error::{ImportError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let display = path.to_string_lossy();

    if display.is_empty() {
        return Err(ImportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if display.contains('\0') {
        return Err(ImportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_list<T>(field_name: &str, items: &[T]) -> Result<()> {
    if items.is_empty() {
        return Err(ImportError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_file_extension(
    field_name: &str,
    file: &Path,
    allowed_extensions: &[&str],
) -> Result<()> {
    match file.extension().and_then(|ext| ext.to_str()) {
        Some(extension) if allowed_extensions.contains(&extension.to_ascii_lowercase().as_str()) => {
            Ok(())
        }
        Some(extension) => Err(ImportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.display().to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(ImportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.display().to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ImportError::MissingConfigError {
        field: field_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output.path", Path::new("./output")).is_ok());
        assert!(validate_path("output.path", Path::new("")).is_err());
    }

    #[test]
    fn test_validate_non_empty_list() {
        let files = vec![PathBuf::from("a.csv")];
        assert!(validate_non_empty_list("import.files", &files).is_ok());

        let empty: Vec<PathBuf> = vec![];
        assert!(matches!(
            validate_non_empty_list("import.files", &empty),
            Err(ImportError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = ["json", "toml"];
        assert!(validate_file_extension("individual", Path::new("base.json"), &allowed).is_ok());
        assert!(validate_file_extension("individual", Path::new("BASE.TOML"), &allowed).is_ok());
        assert!(validate_file_extension("individual", Path::new("base.xml"), &allowed).is_err());
        assert!(validate_file_extension("individual", Path::new("base"), &allowed).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(3);
        let missing: Option<i32> = None;
        assert_eq!(*validate_required_field("x", &present).unwrap(), 3);
        assert!(validate_required_field("x", &missing).is_err());
    }
}
