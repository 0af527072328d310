//! Error types for turbo-bucketizer-core

use std::fmt::Write;
use thiserror::Error;

/// Remediation command for resolving an error
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RemediationCommand {
    /// Short label describing the command purpose
    pub label: String,
    /// Command to run
    pub command: String,
}

/// Actionable remediation guidance for an error
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Remediation {
    /// One-line summary of how to fix the issue
    pub summary: String,
    /// Suggested commands to resolve or diagnose the issue
    pub commands: Vec<RemediationCommand>,
    /// Additional alternative guidance
    pub alternatives: Vec<String>,
}

impl Remediation {
    /// Create a new remediation with a summary
    #[must_use]
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            commands: Vec::new(),
            alternatives: Vec::new(),
        }
    }

    /// Add a suggested command
    #[must_use]
    pub fn command(mut self, label: impl Into<String>, command: impl Into<String>) -> Self {
        self.commands.push(RemediationCommand {
            label: label.into(),
            command: command.into(),
        });
        self
    }

    /// Add an alternative suggestion
    #[must_use]
    pub fn alternative(mut self, alternative: impl Into<String>) -> Self {
        self.alternatives.push(alternative.into());
        self
    }

    /// Render remediation text for human-readable output
    #[must_use]
    pub fn render_plain(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "To fix:");
        let _ = writeln!(output, "  {}", self.summary);

        if !self.commands.is_empty() {
            let _ = writeln!(output, "  Commands:");
            for cmd in &self.commands {
                let _ = writeln!(output, "    - {}: {}", cmd.label, cmd.command);
            }
        }

        if !self.alternatives.is_empty() {
            let _ = writeln!(output, "  Alternatives:");
            for alt in &self.alternatives {
                let _ = writeln!(output, "    - {alt}");
            }
        }

        output
    }
}

/// Result type alias using the library's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for turbo-bucketizer-core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Key input errors (files, demo ranges, address parsing)
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Return remediation guidance when available.
    #[must_use]
    pub fn remediation(&self) -> Option<Remediation> {
        match self {
            Self::Config(err) => Some(err.remediation()),
            Self::Input(err) => Some(err.remediation()),
            Self::Io(_) => Some(
                Remediation::new("Check filesystem permissions and paths, then retry.")
                    .command("Usage", "tb --help")
                    .alternative("Verify the input file exists and is readable."),
            ),
            Self::Json(_) => Some(
                Remediation::new("JSON rendering failed; retry with plain output.")
                    .command("Plain output", "tb --demo 1000 --format plain"),
            ),
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file {0}: {1}")]
    ReadFailed(String, String),

    #[error("Failed to parse config: {0}")]
    ParseFailed(String),

    #[error("Unknown preset: '{0}'")]
    UnknownPreset(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl ConfigError {
    #[must_use]
    pub fn remediation(&self) -> Remediation {
        match self {
            Self::FileNotFound(path) => Remediation::new(format!(
                "Config file not found: {path}. Verify the path and retry."
            ))
            .command("Check path", format!("ls -l \"{path}\""))
            .alternative("Pass --config with the correct path, or omit it to use defaults."),
            Self::ReadFailed(path, _) => Remediation::new(format!(
                "Failed to read config file: {path}. Check permissions."
            ))
            .command("Check permissions", format!("ls -l \"{path}\""))
            .alternative("Ensure the file is readable by the current user."),
            Self::ParseFailed(_) => {
                Remediation::new("Config parse failed. Fix the TOML syntax and retry.")
                    .command("Usage", "tb --help")
                    .alternative("Sections are [bucket], [logging] and [output].")
            }
            Self::UnknownPreset(_) => Remediation::new("Use one of the built-in presets.")
                .command("Default constants", "tb --demo 100000 --preset default")
                .command("Wang constants", "tb --demo 100000 --preset wang")
                .alternative("Pass explicit constants with --a and --b instead."),
            Self::ValidationError(_) => {
                Remediation::new("Config validation failed. Fix the invalid fields and retry.")
                    .command("Usage", "tb --help")
                    .alternative("bucket_bits must be between 0 and 32.")
            }
        }
    }
}

/// Dotted-quad IPv4 parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Ipv4Error {
    #[error("Invalid IPv4 (too many octets): '{0}'")]
    TooManyOctets(String),

    #[error("Invalid IPv4 (empty octet): '{0}'")]
    EmptyOctet(String),

    #[error("Invalid IPv4 octet: '{octet}' in '{input}'")]
    InvalidOctet { octet: String, input: String },

    #[error("IPv4 octet out of range [0,255]: '{octet}' in '{input}'")]
    OctetOutOfRange { octet: String, input: String },

    #[error("Invalid IPv4 (expected 4 octets): '{0}'")]
    WrongOctetCount(String),

    #[error("Invalid IPv4 (not UTF-8 text): '{0}'")]
    NotUtf8(String),
}

/// Key input errors
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Cannot open input file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing IPv4 at line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Ipv4Error,
    },

    #[error("No valid IPv4 addresses found in file: {0}")]
    NoKeys(String),

    #[error("Demo count N must be > 0")]
    EmptyDemo,
}

impl InputError {
    #[must_use]
    pub fn remediation(&self) -> Remediation {
        match self {
            Self::Open { path, .. } => {
                Remediation::new(format!("Could not open {path}. Verify the path and retry."))
                    .command("Check path", format!("ls -l \"{path}\""))
            }
            Self::Line { line, .. } => Remediation::new(format!(
                "Fix the address on line {line}; one dotted-quad IPv4 per line."
            ))
            .command("Show line", format!("sed -n '{line}p' <file>"))
            .alternative("Comment out bad lines with a leading '#'."),
            Self::NoKeys(_) => {
                Remediation::new("The file has no addresses after skipping blanks and comments.")
                    .command("Synthetic range instead", "tb --demo 100000")
                    .alternative("Add at least one dotted-quad IPv4 address to the file.")
            }
            Self::EmptyDemo => Remediation::new("Pass a positive key count to --demo.")
                .command("Example", "tb --demo 1000000 --k 12"),
        }
    }
}

/// Format an error with remediation guidance for display.
#[must_use]
pub fn format_error_with_remediation(error: &Error) -> String {
    let mut output = format!("Error: {error}");
    if let Some(remediation) = error.remediation() {
        output.push('\n');
        output.push('\n');
        output.push_str(&remediation.render_plain());
    }
    output
}
