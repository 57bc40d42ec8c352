//! Types in this module are defined to enable deserializing them from the CLI arguments.
use std::{path::PathBuf, str::FromStr};

/// JSON argument given inline or, prefixed by `@`, as a path to a file.
pub(crate) trait ParseablePath: serde::de::DeserializeOwned {
    fn parse_json(src: &str) -> Result<Self, anyhow::Error> {
        Ok(if let Some(stripped) = src.strip_prefix('@') {
            let path = PathBuf::from_str(stripped)?.canonicalize()?;
            let file = std::fs::File::open(path)?;
            let mut buffered_file = std::io::BufReader::new(file);
            serde_json::from_reader(&mut buffered_file)
        } else {
            serde_json::from_str(src)
        }?)
    }
}

impl<T> ParseablePath for T where T: serde::de::DeserializeOwned {}
