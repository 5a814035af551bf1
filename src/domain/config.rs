//! Export configuration and platform defaults.
//!
//! The core only ever sees a fully resolved [`ExportConfig`]. Defaults are
//! computed from an explicit platform and home directory so they can be
//! tested without touching the real environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{AppError, Result};

/// Name of the per-workspace state database.
pub const STATE_DB_NAME: &str = "state.vscdb";

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown with headings per query and response.
    #[default]
    Markdown,
    /// Plain labeled text blocks.
    Raw,
    /// JSON array of turns, machine-readable.
    Json,
}

impl OutputFormat {
    /// File extension used for artifacts in this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Raw => "txt",
            Self::Json => "json",
        }
    }

    /// Canonical selector name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Raw => "raw",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "raw" | "txt" | "text" => Ok(Self::Raw),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {s}. Use: markdown, raw, json")),
        }
    }
}

/// Host operating system family, as far as default paths are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// Platform of the running binary.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }
}

/// Default locations derived from a platform and a home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPaths {
    pub root_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl DefaultPaths {
    /// Computes the defaults for `platform` with the given home directory.
    #[must_use]
    pub fn for_platform(platform: Platform, home: &Path) -> Self {
        let cursor_dir = match platform {
            Platform::Windows => home.join("AppData").join("Roaming").join("Cursor"),
            Platform::MacOs => home
                .join("Library")
                .join("Application Support")
                .join("Cursor"),
            Platform::Linux => home.join(".config").join("Cursor"),
        };

        Self {
            root_dir: cursor_dir.join("User").join("workspaceStorage"),
            output_dir: home.join("Documents").join("ExportedCursorChats"),
        }
    }
}

/// `[export]` section of the config file. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportSection {
    #[serde(default)]
    pub root_dir: Option<PathBuf>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub format: Option<String>,
}

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub export: ExportSection,
}

/// Values given on the command line; they win over everything else.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<String>,
}

/// Fully resolved configuration consumed by the export pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// The `workspaceStorage` directory to scan.
    pub root_dir: PathBuf,
    /// Where exported files are written.
    pub output_dir: PathBuf,
    pub format: OutputFormat,
}

impl ExportConfig {
    /// Merges CLI overrides, file settings and defaults, in that order.
    ///
    /// # Errors
    /// Returns a configuration error if the chosen format is not recognized.
    pub fn resolve(
        overrides: ConfigOverrides,
        file: FileConfig,
        defaults: DefaultPaths,
    ) -> Result<Self> {
        let format = match overrides.format.or(file.export.format) {
            Some(selector) => selector.parse::<OutputFormat>().map_err(AppError::config)?,
            None => OutputFormat::default(),
        };

        Ok(Self {
            root_dir: overrides
                .root_dir
                .or(file.export.root_dir)
                .unwrap_or(defaults.root_dir),
            output_dir: overrides
                .output_dir
                .or(file.export.output_dir)
                .unwrap_or(defaults.output_dir),
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> DefaultPaths {
        DefaultPaths::for_platform(Platform::Linux, Path::new("/home/dev"))
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("markdown".parse::<OutputFormat>(), Ok(OutputFormat::Markdown));
        assert_eq!("MD".parse::<OutputFormat>(), Ok(OutputFormat::Markdown));
        assert_eq!("raw".parse::<OutputFormat>(), Ok(OutputFormat::Raw));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::Markdown.extension(), "md");
        assert_eq!(OutputFormat::Raw.extension(), "txt");
        assert_eq!(OutputFormat::Json.extension(), "json");
    }

    #[test]
    fn test_default_paths_windows() {
        let paths = DefaultPaths::for_platform(Platform::Windows, Path::new("C:/Users/dev"));
        assert_eq!(
            paths.root_dir,
            Path::new("C:/Users/dev/AppData/Roaming/Cursor/User/workspaceStorage")
        );
        assert_eq!(
            paths.output_dir,
            Path::new("C:/Users/dev/Documents/ExportedCursorChats")
        );
    }

    #[test]
    fn test_default_paths_macos() {
        let paths = DefaultPaths::for_platform(Platform::MacOs, Path::new("/Users/dev"));
        assert_eq!(
            paths.root_dir,
            Path::new("/Users/dev/Library/Application Support/Cursor/User/workspaceStorage")
        );
    }

    #[test]
    fn test_default_paths_linux() {
        assert_eq!(
            defaults().root_dir,
            Path::new("/home/dev/.config/Cursor/User/workspaceStorage")
        );
    }

    #[test]
    fn test_resolve_uses_defaults() {
        let config =
            ExportConfig::resolve(ConfigOverrides::default(), FileConfig::default(), defaults())
                .unwrap();
        assert_eq!(config.root_dir, defaults().root_dir);
        assert_eq!(config.output_dir, defaults().output_dir);
        assert_eq!(config.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_resolve_precedence() {
        let file = FileConfig {
            export: ExportSection {
                root_dir: Some(PathBuf::from("/from/file/root")),
                output_dir: Some(PathBuf::from("/from/file/out")),
                format: Some("raw".into()),
            },
        };
        let overrides = ConfigOverrides {
            output_dir: Some(PathBuf::from("/from/cli/out")),
            format: Some("json".into()),
            ..Default::default()
        };

        let config = ExportConfig::resolve(overrides, file, defaults()).unwrap();
        assert_eq!(config.root_dir, Path::new("/from/file/root"));
        assert_eq!(config.output_dir, Path::new("/from/cli/out"));
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_resolve_rejects_unknown_format() {
        let overrides = ConfigOverrides {
            format: Some("yaml".into()),
            ..Default::default()
        };
        let err = ExportConfig::resolve(overrides, FileConfig::default(), defaults()).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }
}
