//! Config extraction errors.

use figment::providers::{Format, Toml};
use std::{collections::HashSet, error::Error, fmt};

/// Header printed above the list of extraction problems.
pub const FAILED_TO_EXTRACT_CONFIG_MSG: &str = "failed to extract voyager config:";

/// Represents a failed attempt to extract [`Config`](crate::Config) from a `Figment`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractConfigError {
    pub(crate) error: figment::Error,
}

impl ExtractConfigError {
    pub fn new(error: figment::Error) -> Self {
        Self { error }
    }
}

impl From<figment::Error> for ExtractConfigError {
    fn from(error: figment::Error) -> Self {
        Self::new(error)
    }
}

impl fmt::Display for ExtractConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut seen = HashSet::with_capacity(self.error.count());
        writeln!(f, "{FAILED_TO_EXTRACT_CONFIG_MSG}")?;
        for err in self.error.clone() {
            let from_toml =
                err.metadata.as_ref().is_some_and(|meta| meta.name.contains(Toml::NAME));
            let err = if from_toml { ConfigError::Toml(err) } else { ConfigError::Other(err) };
            let line = err.to_string();
            if seen.insert(line.clone()) {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

impl Error for ExtractConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Error::source(&self.error)
    }
}

/// A single problem found while building the config.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Thrown while parsing a `voyager.toml`.
    Toml(figment::Error),
    /// Thrown by any other source, usually the environment.
    Other(figment::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (prefix, err) = match self {
            Self::Toml(err) => ("voyager.toml error: ", err),
            Self::Other(err) => ("voyager config error: ", err),
        };
        write!(f, "{prefix}{err}")?;
        if !err.path.is_empty() {
            write!(f, " for setting `{}`", err.path.join("."))?;
        }
        Ok(())
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Toml(error) | Self::Other(error) => Error::source(error),
        }
    }
}
