//! Session configuration.

use crate::error::{LotError, Result};
use std::path::PathBuf;

/// Data file used when no path is given.
pub const DEFAULT_DATA_PATH: &str = "parqueos.csv";

/// Settings for one interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where lots are loaded from and saved to.
    pub data_path: PathBuf,
}

impl Config {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Config {
            data_path: data_path.into(),
        }
    }

    /// Builds a config from command-line arguments, excluding the program
    /// name. At most one argument is accepted: the data file path.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let config = match args.next() {
            Some(path) => Config::new(path),
            None => Config::default(),
        };

        if let Some(extra) = args.next() {
            return Err(LotError::UnexpectedArgument(extra));
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_DATA_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_arguments_uses_default_path() {
        let config = Config::from_args(args(&[])).unwrap();
        assert_eq!(config.data_path, PathBuf::from("parqueos.csv"));
    }

    #[test]
    fn test_single_argument_overrides_path() {
        let config = Config::from_args(args(&["/tmp/lots.csv"])).unwrap();
        assert_eq!(config.data_path, PathBuf::from("/tmp/lots.csv"));
    }

    #[test]
    fn test_extra_argument_is_rejected() {
        let err = Config::from_args(args(&["a.csv", "b.csv"])).unwrap_err();
        assert!(matches!(err, LotError::UnexpectedArgument(ref a) if a == "b.csv"));
    }
}
