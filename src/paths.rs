use std::path::PathBuf;

use crate::error::AppError;

/// Gets the invoking user's home directory
pub fn home_dir() -> Result<PathBuf, AppError> {
    dirs::home_dir()
        .ok_or_else(|| AppError::Validation("failed to find the home directory".to_string()))
}

/// Expands a path that starts with '~' to the user's home directory
///
/// Anything else, including a '~~' prefix, is returned unchanged.
pub fn expand_tilde(path: &str) -> Result<PathBuf, AppError> {
    if let Some(rest) = path.strip_prefix('~') {
        if rest.is_empty() {
            return home_dir();
        }
        if let Some(rest) = rest.strip_prefix('/').or_else(|| rest.strip_prefix('\\')) {
            return Ok(home_dir()?.join(rest));
        }
    }
    Ok(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_path_is_unchanged() {
        let expanded = expand_tilde("/home/u/.ssh/id_work").unwrap();
        assert_eq!(expanded, PathBuf::from("/home/u/.ssh/id_work"));
    }

    #[test]
    fn relative_path_is_unchanged() {
        let expanded = expand_tilde("keys/id_rsa").unwrap();
        assert_eq!(expanded, PathBuf::from("keys/id_rsa"));
    }

    #[test]
    fn bare_tilde_expands_to_home() {
        let expanded = expand_tilde("~").unwrap();
        assert_eq!(expanded, dirs::home_dir().unwrap());
    }

    #[test]
    fn tilde_prefix_expands_to_home() {
        let expanded = expand_tilde("~/.ssh/id_rsa").unwrap();
        assert_eq!(expanded, dirs::home_dir().unwrap().join(".ssh/id_rsa"));
    }

    #[test]
    fn double_tilde_is_not_expanded() {
        let expanded = expand_tilde("~~/odd").unwrap();
        assert_eq!(expanded, PathBuf::from("~~/odd"));
    }
}
