// src/config/validate.rs

use crate::config::model::{ExecutionOptions, RawOptionsFile, StrategySelection};
use crate::errors::{DispatchError, Result};
use crate::types::Mnemonic;

impl TryFrom<RawOptionsFile> for ExecutionOptions {
    type Error = DispatchError;

    fn try_from(raw: RawOptionsFile) -> std::result::Result<Self, Self::Error> {
        validate_execution_section(&raw)?;
        let strategies = validate_strategy_section(&raw)?;
        Ok(ExecutionOptions::new_unchecked(raw.execution, strategies))
    }
}

fn validate_execution_section(cfg: &RawOptionsFile) -> Result<()> {
    if cfg.execution.spawn_strategy.trim().is_empty() {
        return Err(DispatchError::ConfigError(
            "[execution].spawn_strategy must name a strategy (got an empty string)".to_string(),
        ));
    }

    if let Some(root) = &cfg.execution.exec_root {
        if !root.is_absolute() {
            return Err(DispatchError::ConfigError(format!(
                "[execution].exec_root must be an absolute path (got '{}')",
                root.display()
            )));
        }
    }

    Ok(())
}

fn validate_strategy_section(cfg: &RawOptionsFile) -> Result<StrategySelection> {
    let mut selection = StrategySelection::with_default(cfg.execution.spawn_strategy.trim());

    for (key, name) in cfg.strategy.iter() {
        let mnemonic = Mnemonic::new(key.as_str()).map_err(|_| {
            DispatchError::ConfigError(
                "[strategy] contains an empty mnemonic key".to_string(),
            )
        })?;
        if name.trim().is_empty() {
            return Err(DispatchError::ConfigError(format!(
                "[strategy].{mnemonic} must name a strategy (got an empty string)"
            )));
        }
        selection = selection.with_override(mnemonic, name.trim());
    }

    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::ExecutionSection;

    fn raw(section: ExecutionSection, overrides: &[(&str, &str)]) -> RawOptionsFile {
        RawOptionsFile {
            execution: section,
            strategy: overrides
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn defaults_validate() {
        let opts = ExecutionOptions::try_from(RawOptionsFile::default()).unwrap();
        assert_eq!(opts.strategies().default, "local");
        assert!(opts.strategies().by_mnemonic.is_empty());
        assert_eq!(opts, ExecutionOptions::default());
    }

    #[test]
    fn empty_mnemonic_key_is_config_error() {
        let err = ExecutionOptions::try_from(raw(ExecutionSection::default(), &[("", "local")]))
            .unwrap_err();
        assert!(matches!(err, DispatchError::ConfigError(msg) if msg.contains("empty mnemonic")));
    }

    #[test]
    fn empty_strategy_name_is_config_error() {
        let err =
            ExecutionOptions::try_from(raw(ExecutionSection::default(), &[("Javac", " ")]))
                .unwrap_err();
        assert!(matches!(err, DispatchError::ConfigError(msg) if msg.contains("Javac")));
    }

    #[test]
    fn relative_exec_root_is_config_error() {
        let section = ExecutionSection {
            exec_root: Some("out/execroot".into()),
            ..ExecutionSection::default()
        };
        let err = ExecutionOptions::try_from(raw(section, &[])).unwrap_err();
        assert!(matches!(err, DispatchError::ConfigError(msg) if msg.contains("absolute")));
    }

    #[test]
    fn overrides_keep_mnemonic_case() {
        let opts = ExecutionOptions::try_from(raw(
            ExecutionSection::default(),
            &[("CppCompile", "dry-run"), ("cppcompile", "local")],
        ))
        .unwrap();
        assert_eq!(opts.strategies().by_mnemonic.len(), 2);
    }
}
