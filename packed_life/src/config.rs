// config.rs - Serializable board settings

use serde::{Deserialize, Serialize};

use crate::backend::BackendKind;

/// Everything needed to build a [`Board`](crate::Board).
///
/// `rule` and `weights` are mutually exclusive; with neither the board runs
/// Conway's rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    pub x_sections: usize,
    pub y_sections: usize,

    /// Kernel backend for `advance`
    pub backend: BackendKind,

    /// Dedicated worker threads for the rayon backend (global pool if unset)
    pub threads: Option<usize>,

    /// Birth/survival rule such as "B36/S23"
    pub rule: Option<String>,

    /// Custom 3x3 weight matrix, decoded with the default sums
    pub weights: Option<Vec<Vec<i32>>>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 64,
            x_sections: 4,
            y_sections: 2,
            backend: BackendKind::default(),
            threads: None,
            rule: None,
            weights: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: BoardConfig = toml::from_str(
            r#"
            width = 256
            backend = "serial"
            rule = "B36/S23"
            "#,
        )
        .unwrap();
        assert_eq!(config.width, 256);
        assert_eq!(config.height, 64);
        assert_eq!(config.backend, BackendKind::Serial);
        assert_eq!(config.rule.as_deref(), Some("B36/S23"));
        assert!(config.weights.is_none());
    }

    #[test]
    fn test_weights_from_toml() {
        let config: BoardConfig =
            toml::from_str("weights = [[1, 1, 1], [1, 9, 1], [1, 1, 1]]").unwrap();
        assert_eq!(config.weights.unwrap()[1], vec![1, 9, 1]);
    }
}
