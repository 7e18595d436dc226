//! Error types and helpers for user-friendly error messages
//!
//! Every failure of the step carries enough context to point the user at the
//! input that caused it, plus an optional hint on how to fix it.

use thiserror::Error;

/// Errors produced by the build step
#[derive(Error, Debug)]
pub enum StepError {
    /// A module or variant filter matched nothing
    #[error("No matching module/variant found for {}", describe_unmatched(.module, .unmatched))]
    NoMatch {
        /// Module filter value, when it was the part that failed
        module: Option<String>,
        /// Requested variant names that matched no kept module
        unmatched: Vec<String>,
        /// Names that would have matched, for the hint
        available: Vec<String>,
    },

    /// The file discovery capability failed
    #[error("Failed to search artifacts with pattern '{pattern}': {message}")]
    Discovery {
        pattern: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Invalid input or configuration file
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },

    /// Tool/executable not found
    #[error("Missing tool: {tool}")]
    MissingTool {
        tool: String,
        required_for: String,
        hint: String,
    },

    /// Gradle invocation failed
    #[error("Build failed for {task}: {message}")]
    BuildFailure {
        task: String,
        message: String,
        hint: Option<String>,
    },
}

fn describe_unmatched(module: &Option<String>, unmatched: &[String]) -> String {
    match (module, unmatched.is_empty()) {
        (Some(m), true) => format!("module '{}'", m),
        (Some(m), false) => format!("module '{}', variant(s) '{}'", m, unmatched.join("', '")),
        (None, false) => format!("variant(s) '{}'", unmatched.join("', '")),
        (None, true) => "the given filters".to_string(),
    }
}

impl StepError {
    /// Create a no-match error for a module filter
    pub fn module_not_found(module: impl Into<String>, available: Vec<String>) -> Self {
        Self::NoMatch {
            module: Some(module.into()),
            unmatched: Vec::new(),
            available,
        }
    }

    /// Create a no-match error for requested variant names
    pub fn variants_not_found(
        module: Option<String>,
        unmatched: Vec<String>,
        available: Vec<String>,
    ) -> Self {
        Self::NoMatch {
            module,
            unmatched,
            available,
        }
    }

    /// Create a discovery error
    pub fn discovery(
        pattern: impl Into<String>,
        message: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::Discovery {
            pattern: pattern.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error with source and hint
    pub fn config_error_with_hint(
        message: impl Into<String>,
        source: Option<anyhow::Error>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source,
            hint: Some(hint.into()),
        }
    }

    /// Create a missing tool error
    pub fn missing_tool(
        tool: impl Into<String>,
        required_for: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::MissingTool {
            tool: tool.into(),
            required_for: required_for.into(),
            hint: hint.into(),
        }
    }

    /// Create a build failure error
    pub fn build_failure(
        task: impl Into<String>,
        message: impl Into<String>,
        hint: Option<String>,
    ) -> Self {
        Self::BuildFailure {
            task: task.into(),
            message: message.into(),
            hint,
        }
    }

    /// The hint to show under the error, if any
    pub fn hint(&self) -> Option<String> {
        match self {
            StepError::NoMatch { available, .. } => {
                if available.is_empty() {
                    None
                } else {
                    Some(format!("Available: {}", available.join(", ")))
                }
            }
            StepError::Discovery { .. } => Some(hints::app_path_pattern().to_string()),
            StepError::Config { hint, .. } | StepError::BuildFailure { hint, .. } => hint.clone(),
            StepError::MissingTool { hint, .. } => Some(hint.clone()),
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        if let StepError::MissingTool { required_for, .. } = self {
            eprintln!("  (required for {})", required_for);
        }

        if let Some(h) = self.hint() {
            eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
        }

        eprintln!();
    }
}

/// Common error hints
pub mod hints {
    /// Get hint for a missing Gradle wrapper
    pub fn gradle_wrapper() -> &'static str {
        "No Gradle wrapper found in the project directory.\n\
         • Check that --project-location points at the root Android project\n\
         • Generate one with: gradle wrapper"
    }

    /// Get hint for a bad artifact pattern
    pub fn app_path_pattern() -> &'static str {
        "Check APP_PATH_PATTERN. One glob per line, for example:\n\
         */build/outputs/apk/*.apk\n\
         */build/outputs/bundle/*.aab"
    }

    /// Get hint for a failed Gradle task
    pub fn gradle_task() -> &'static str {
        "Scroll up for the Gradle output. Common issues:\n\
         • Missing Android SDK (set ANDROID_HOME)\n\
         • Signing configuration not available on this machine\n\
         • Extra --arguments not understood by Gradle"
    }
}
