use std::fmt::Display;

use serde::Serialize;
use xelis_address::Address;

#[derive(Debug, Serialize)]
pub(crate) struct Validation {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Display for Validation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.error {
            None => f.write_str("valid"),
            Some(error) => write!(f, "invalid: {error}"),
        }
    }
}

pub(crate) fn validate(address: &str) -> Validation {
    match address.parse::<Address>() {
        Ok(_) => Validation {
            valid: true,
            error: None,
        },
        Err(err) => {
            tracing::info!(%err, "address rejected");
            Validation {
                valid: false,
                error: Some(err.to_string()),
            }
        }
    }
}
