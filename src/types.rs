use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::errors::DispatchError;

/// Short tag naming an action's kind, e.g. `CppCompile` or `Javac`.
///
/// Mnemonics are opaque and case-sensitive; the only requirement is that
/// they are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct Mnemonic(String);

impl Mnemonic {
    pub fn new(value: impl Into<String>) -> Result<Self, DispatchError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DispatchError::InvalidMnemonic(value));
        }
        Ok(Mnemonic(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Mnemonic {
    type Error = DispatchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Mnemonic::new(value)
    }
}

impl FromStr for Mnemonic {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mnemonic::new(s)
    }
}

impl AsRef<str> for Mnemonic {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Mnemonic {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of an executor and its registries.
///
/// - `Open`: bindings may be added; queries return `NotSealed`.
/// - `Sealed`: bindings are frozen; queries are answered from immutable
///   tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorState {
    Open,
    Sealed,
}

impl fmt::Display for ExecutorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutorState::Open => f.write_str("open"),
            ExecutorState::Sealed => f.write_str("sealed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mnemonic_is_rejected() {
        assert!(matches!(
            Mnemonic::new(""),
            Err(DispatchError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn mnemonics_are_case_sensitive() {
        let lower: Mnemonic = "javac".parse().unwrap();
        let upper: Mnemonic = "Javac".parse().unwrap();
        assert_ne!(lower, upper);
        assert_eq!(upper.as_str(), "Javac");
        assert_eq!(upper.to_string(), "Javac");
    }

    #[test]
    fn mnemonic_deserializes_through_validation() {
        #[derive(Deserialize)]
        struct Wrapper {
            m: Mnemonic,
        }

        let ok: Wrapper = toml::from_str(r#"m = "CppCompile""#).unwrap();
        assert_eq!(ok.m.as_str(), "CppCompile");

        let err = toml::from_str::<Wrapper>(r#"m = """#);
        assert!(err.is_err());
    }
}
