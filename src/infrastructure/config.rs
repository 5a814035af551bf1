//! Configuration file management.
//!
//! Handles loading the optional TOML config file and resolving the export
//! configuration against platform defaults.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{
    AppError, ConfigOverrides, DefaultPaths, ExportConfig, FileConfig, Platform, Result,
};

/// Default configuration file content.
const DEFAULT_CONFIG: &str = r#"# Cursor Chat Export Configuration
# Auto-generated - edit as needed. Command-line flags override these values.

[export]
# Cursor's workspaceStorage directory (defaults to the platform location)
# root_dir = "/home/me/.config/Cursor/User/workspaceStorage"

# Where exported chats are written (defaults to ~/Documents/ExportedCursorChats)
# output_dir = "/home/me/Documents/ExportedCursorChats"

# Output format: markdown, raw or json
format = "markdown"
"#;

/// Get the default path of the configuration file.
///
/// # Errors
/// Returns error if the platform config directory cannot be determined.
pub fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| AppError::config("Could not determine config directory"))?;
    Ok(base.join("cursor-chat-export").join("config.toml"))
}

/// Load configuration from a specific file.
///
/// # Errors
/// Returns error if file cannot be read or parsed.
pub fn load_config_from_file(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read config file: {}", path.display()), e))?;

    toml::from_str(&content)
        .map_err(|e| AppError::config(format!("Failed to parse config file: {e}")))
}

/// Load the file configuration.
///
/// An explicitly given path must exist; the default location is optional.
///
/// # Errors
/// Returns error if the file cannot be read or parsed.
pub fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(AppError::config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return load_config_from_file(path);
    }

    match default_config_path() {
        Ok(path) if path.is_file() => {
            tracing::debug!("Using config file: {}", path.display());
            load_config_from_file(&path)
        }
        _ => Ok(FileConfig::default()),
    }
}

/// Platform defaults for the running host.
///
/// # Errors
/// Returns error if the home directory cannot be determined.
pub fn host_defaults() -> Result<DefaultPaths> {
    let home =
        dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))?;
    Ok(DefaultPaths::for_platform(Platform::current(), &home))
}

/// Resolves the export configuration from CLI overrides, config file and host defaults.
///
/// # Errors
/// Returns a configuration error if any layer is invalid.
pub fn resolve_export_config(
    overrides: ConfigOverrides,
    config_path: Option<&Path>,
) -> Result<ExportConfig> {
    let file = load_file_config(config_path)?;
    ExportConfig::resolve(overrides, file, host_defaults()?)
}

/// Create the default configuration file if it doesn't exist.
///
/// Returns the path and whether a new file was written.
///
/// # Errors
/// Returns error if file cannot be created.
pub fn ensure_config_exists(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::io("Failed to create config directory", e))?;
    }

    fs::write(path, DEFAULT_CONFIG)
        .map_err(|e| AppError::io("Failed to create default config", e))?;

    tracing::info!(path = %path.display(), "Created default configuration");

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OutputFormat;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_parses() {
        let config: FileConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.export.format.as_deref(), Some("markdown"));
        assert!(config.export.root_dir.is_none());
        assert!(config.export.output_dir.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(
            &config_path,
            "[export]\nroot_dir = \"/data/ws\"\nformat = \"json\"\n",
        )
        .unwrap();

        let loaded = load_file_config(Some(&config_path)).unwrap();
        assert_eq!(loaded.export.root_dir, Some(PathBuf::from("/data/ws")));

        let defaults = DefaultPaths::for_platform(Platform::Linux, Path::new("/home/dev"));
        let resolved = ExportConfig::resolve(ConfigOverrides::default(), loaded, defaults).unwrap();
        assert_eq!(resolved.root_dir, PathBuf::from("/data/ws"));
        assert_eq!(resolved.format, OutputFormat::Json);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let err = load_file_config(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[export\nformat = ").unwrap();
        assert!(matches!(
            load_config_from_file(&config_path),
            Err(AppError::Config { .. })
        ));
    }

    #[test]
    fn test_ensure_config_exists_is_idempotent() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nested").join("config.toml");

        assert!(ensure_config_exists(&config_path).unwrap());
        assert!(!ensure_config_exists(&config_path).unwrap());
        assert_eq!(fs::read_to_string(&config_path).unwrap(), DEFAULT_CONFIG);
    }
}
