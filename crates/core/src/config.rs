//! Launcher configuration for the external mutation tool.
//!
//! The tool is a jar started through a host runtime (`java -jar ...`). Both the
//! runtime and the jar location can be overridden through environment variables;
//! otherwise the jar is expected in the build-output directory next to the
//! application's install location.

use std::env;
use std::path::{Path, PathBuf};

use log::debug;

/// Environment variable overriding the host runtime launcher
pub const JAVA_ENV_VAR: &str = "MUTATOR_JAVA";
/// Environment variable overriding the external jar location
pub const JAR_ENV_VAR: &str = "MUTATOR_JAR";

/// Default host runtime launcher
pub const DEFAULT_JAVA: &str = "java";
/// File name of the external jar inside the build-output directory
pub const JAR_FILE_NAME: &str = "LLM_Mutator-jar-with-dependencies.jar";
/// Build-output directory holding the jar, sibling to the application directory
const BUILD_OUTPUT_DIR: &str = "target";

/// Where and how to start the external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Host runtime executable, looked up on `PATH` when not absolute.
    pub java: String,
    /// Location of the jar passed to `-jar`.
    pub jar: PathBuf,
}

impl LauncherConfig {
    pub fn new(java: String, jar: PathBuf) -> Self {
        Self { java, jar }
    }

    /// Builds the configuration from explicit overrides, falling back to the
    /// environment and then to the defaults.
    ///
    /// Shell expansions like `~` are resolved in both values.
    ///
    /// # Examples
    ///
    /// ```
    /// use mutator_shell_core::config::LauncherConfig;
    ///
    /// let config = LauncherConfig::resolve(
    ///     Some("/usr/bin/java".to_string()),
    ///     Some("/opt/mutator/tool.jar".to_string()),
    /// );
    /// assert_eq!(config.java, "/usr/bin/java");
    /// assert!(config.jar.ends_with("tool.jar"));
    /// ```
    pub fn resolve(java_arg: Option<String>, jar_arg: Option<String>) -> Self {
        let java = java_arg
            .or_else(|| env::var(JAVA_ENV_VAR).ok())
            .map(|java| shellexpand::tilde(&java).to_string())
            .unwrap_or_else(|| DEFAULT_JAVA.to_string());

        let jar = match jar_arg.or_else(|| env::var(JAR_ENV_VAR).ok()) {
            Some(jar) => PathBuf::from(shellexpand::tilde(&jar).to_string()),
            None => default_jar_path(),
        };

        debug!("Launcher: `{}` with jar `{}`", java, jar.display());

        Self { java, jar }
    }

    pub fn from_env() -> Self {
        Self::resolve(None, None)
    }
}

/// Resolves the jar path relative to the running executable.
///
/// Falls back to the current directory when the executable location cannot be
/// determined.
pub fn default_jar_path() -> PathBuf {
    let app_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    jar_path_for_app_dir(&app_dir)
}

/// The jar location for an application installed in `app_dir`.
pub fn jar_path_for_app_dir(app_dir: &Path) -> PathBuf {
    app_dir
        .join("..")
        .join(BUILD_OUTPUT_DIR)
        .join(JAR_FILE_NAME)
}
