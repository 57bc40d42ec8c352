use std::fmt::Display;

use serde::Serialize;

/// How command results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human readable text.
    #[default]
    Plain,
    /// Single line JSON.
    Json,
}

impl OutputFormat {
    pub fn format<T>(&self, value: &T) -> Result<String, serde_json::Error>
    where
        T: Display + Serialize,
    {
        match self {
            OutputFormat::Plain => Ok(value.to_string()),
            OutputFormat::Json => serde_json::to_string(value),
        }
    }
}
