//! Rule set configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default footprint limits.
pub const MAX_BOARD_HEIGHT: u32 = 4;
pub const MAX_BOARD_WIDTH: u32 = 4;

/// Who moves after an accepted action.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOrder {
    /// Players strictly alternate.
    #[default]
    Alternate,
    /// Players alternate, except that after any boss move player two is
    /// to move, whoever moved the boss. Breaks strict alternation.
    BossMoveYieldsToPlayerTwo,
}

/// Tunable parts of the rules.
///
/// ```toml
/// max_rows = 4
/// max_cols = 4
/// turn_order = "alternate"
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Most rows the occupied footprint may span.
    pub max_rows: u32,
    /// Most columns the occupied footprint may span.
    pub max_cols: u32,
    pub turn_order: TurnOrder,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            max_rows: MAX_BOARD_HEIGHT,
            max_cols: MAX_BOARD_WIDTH,
            turn_order: TurnOrder::Alternate,
        }
    }
}

impl Rules {
    /// Parse and validate rules from TOML text. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let rules: Rules = toml::from_str(text)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Load rules from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// The two starting bosses stand in one column, one row apart.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rows < 2 {
            return Err(ConfigError::Validation("max_rows must be >= 2".into()));
        }
        if self.max_cols < 1 {
            return Err(ConfigError::Validation("max_cols must be >= 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rules = Rules::default();
        assert_eq!(rules.max_rows, 4);
        assert_eq!(rules.max_cols, 4);
        assert_eq!(rules.turn_order, TurnOrder::Alternate);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Rules::from_toml_str("").unwrap(), Rules::default());
    }

    #[test]
    fn test_partial_toml() {
        let rules = Rules::from_toml_str(
            "max_cols = 5\nturn_order = \"boss_move_yields_to_player_two\"\n",
        )
        .unwrap();
        assert_eq!(rules.max_rows, 4);
        assert_eq!(rules.max_cols, 5);
        assert_eq!(rules.turn_order, TurnOrder::BossMoveYieldsToPlayerTwo);
    }

    #[test]
    fn test_validation_rejects_tiny_footprint() {
        let err = Rules::from_toml_str("max_rows = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        let err = Rules::from_toml_str("max_cols = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_bad_toml() {
        let err = Rules::from_toml_str("turn_order = \"sideways\"").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Rules::load(Path::new("/nonexistent/kakaw-rules.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }
}
