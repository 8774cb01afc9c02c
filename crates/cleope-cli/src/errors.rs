use cleope_core::error::CleopeError;
use console::style;
use std::fmt;
use std::path::Path;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }

    /// Machine-readable form for `--json`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "status": "error",
            "message": self.message,
            "context": self.context,
            "suggestions": self.suggestions,
        })
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// A command needs a selection that was never recorded
pub fn missing_selection(what: &str, path: &Path) -> CliError {
    let command = match what {
        "area of interest" => "cleope select aoi <geojson-file>",
        "variable" => "cleope select variable <label-or-code>",
        "date" => "cleope select date <start> [end]",
        "mission" => "cleope select mission <mission> [product-type]",
        _ => "cleope select --help",
    };

    CliError::new(format!("No {} selected", what))
        .with_context(format!("Expected a selection file at {}", path.display()))
        .with_suggestion(format!("Record one: {}", command))
        .with_suggestion("Or point --selections-dir at the directory holding your selections")
        .with_help("Run: cleope select --help")
}

/// Catalogue could not be reached or answered with an error
pub fn catalogue_unreachable(reason: &str) -> CliError {
    CliError::new("Catalogue request failed")
        .with_context(format!("Error: {}", reason))
        .with_suggestion("Check your network connection")
        .with_suggestion("Check the catalogue URL: cleope config")
        .with_suggestion("Override it with --catalogue-url or CLEOPE_CATALOGUE_URL")
        .with_help("Run: cleope search --dry-run to inspect the request URLs")
}

/// Nothing found on the mount for the requested period
pub fn no_data(message: &str) -> CliError {
    CliError::new("No data found")
        .with_context(message.to_string())
        .with_suggestion("Check the mount root: cleope config")
        .with_suggestion("Pick another date: cleope select date <date>")
        .with_suggestion("Or allow a longer lookback with CLEOPE_MAX_LOOKBACK_MONTHS")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check cleope.toml for syntax errors")
        .with_suggestion("Or inspect the effective values: cleope config")
        .with_help("Run: cleope --help")
}

fn invalid_input(error: &CleopeError, help: &str) -> CliError {
    CliError::new("Invalid input")
        .with_context(error.to_string())
        .with_help(help.to_string())
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    if let Some(cli_error) = error.downcast_ref::<CliError>() {
        return CliError {
            message: cli_error.message.clone(),
            context: cli_error.context.clone(),
            suggestions: cli_error.suggestions.clone(),
            help_command: cli_error.help_command.clone(),
        };
    }

    if let Some(cleope_error) = error.downcast_ref::<CleopeError>() {
        return match cleope_error {
            CleopeError::MissingSelection { what, path } => missing_selection(what, path),
            CleopeError::Catalogue { reason } => catalogue_unreachable(reason),
            CleopeError::MalformedResponse { .. } => catalogue_unreachable(&cleope_error.to_string()),
            CleopeError::NoDataFound { .. } => no_data(&cleope_error.to_string()),
            CleopeError::ConfigInvalid { key, reason } => invalid_config(key, reason),
            CleopeError::UnknownMission { .. } | CleopeError::UnknownProductType { .. } => {
                invalid_input(cleope_error, "Run: cleope select mission --help")
                    .with_suggestion("Missions: All, Sentinel-1 (S1), Sentinel-2 (S2), Sentinel-3 (S3), Sentinel-5 Precursor (S5P), Envisat, Landsat-*, Copernicus-Land, Copernicus-Marine, Copernicus-Atmosphere")
            }
            CleopeError::UnknownVariable { .. } => {
                invalid_input(cleope_error, "Run: cleope select variable --help")
            }
            CleopeError::InvalidDate { .. } | CleopeError::InvalidRange { .. } => {
                invalid_input(cleope_error, "Run: cleope select date --help")
                    .with_suggestion("Write dates as YYYY-MM-DD or YYYY/MM/DD, start first")
            }
            CleopeError::InvalidFrequency { .. } => {
                invalid_input(cleope_error, "Run: cleope series --help")
            }
            _ => CliError::new(format!("{:#}", error)),
        };
    }

    let message = format!("{:#}", error);
    if message.contains("No such file or directory") {
        CliError::new("File not found")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check the file path and try again")
    } else if message.contains("ermission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
            .with_suggestion("Or run with appropriate privileges")
    } else {
        CliError::new(message)
    }
}
