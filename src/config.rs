//! Runtime configuration
//!
//! One [`AppConfig`] is built at startup (YAML file, then CLI/env
//! overrides) and handed by reference to the pipeline and the server.

use crate::error::LpSheetResult;
use crate::excel::{CellRange, CellRef, ColumnRange};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name looked up by the binaries
pub const DEFAULT_CONFIG_FILE: &str = "lpsheet.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub workbook: WorkbookConfig,
    pub layout: LayoutConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> LpSheetResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` when given, else `lpsheet.yaml` if present, else defaults
    pub fn load_or_default(path: Option<&Path>) -> LpSheetResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> LpSheetResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Document handles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbookConfig {
    /// Workbook holding the model sheet
    pub input: PathBuf,
    /// Workbook receiving the result sheet. Defaults to `input`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl WorkbookConfig {
    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.input)
    }
}

impl Default for WorkbookConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("model.xlsx"),
            output: None,
        }
    }
}

/// Where the model lives on the input sheet and where results go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub input_sheet: String,
    #[serde(with = "a1")]
    pub objective: CellRef,
    /// Constraint left-hand sides
    #[serde(with = "a1")]
    pub constraints: ColumnRange,
    /// Operators, aligned by position with `constraints`
    #[serde(with = "a1")]
    pub operators: ColumnRange,
    /// Right-hand sides, aligned by position with `constraints`
    #[serde(with = "a1")]
    pub rhs: ColumnRange,
    pub output_sheet: String,
    #[serde(with = "a1")]
    pub output_anchor: CellRef,
    /// Blanked before every write
    #[serde(with = "a1")]
    pub output_clear: CellRange,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            input_sheet: "Formulasi".to_string(),
            objective: CellRef::new(3, 2),
            constraints: ColumnRange {
                col: 1,
                first_row: 23,
                last_row: 37,
            },
            operators: ColumnRange {
                col: 4,
                first_row: 5,
                last_row: 19,
            },
            rhs: ColumnRange {
                col: 5,
                first_row: 5,
                last_row: 19,
            },
            output_sheet: "Output".to_string(),
            output_anchor: CellRef::new(0, 0),
            output_clear: CellRange {
                start: CellRef::new(0, 0),
                end: CellRef::new(999, 2),
            },
        }
    }
}

/// HTTP server binding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Serde adapter for A1-notation fields
mod a1 {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use std::fmt::Display;
    use std::str::FromStr;

    pub fn serialize<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_matches_model_sheet() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.objective.to_string(), "C4");
        assert_eq!(layout.constraints.to_string(), "B24:B38");
        assert_eq!(layout.operators.to_string(), "E6:E20");
        assert_eq!(layout.rhs.to_string(), "F6:F20");
        assert_eq!(layout.output_anchor.to_string(), "A1");
        assert_eq!(layout.output_clear.to_string(), "A1:C1000");
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.workbook.output_path(), Path::new("model.xlsx"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = AppConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("objective: C4"));
        let back: AppConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
workbook:
  input: plan.xlsx
  output: result.xlsx
layout:
  objective: D2
  constraints: A10:A12
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.workbook.output_path(), Path::new("result.xlsx"));
        assert_eq!(config.layout.objective, CellRef::new(1, 3));
        assert_eq!(config.layout.constraints.len(), 3);
        assert_eq!(config.layout.input_sheet, "Formulasi");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_bad_address_rejected() {
        let yaml = "layout:\n  constraints: A1:B5\n";
        let err = serde_yaml::from_str::<AppConfig>(yaml).unwrap_err();
        assert!(err.to_string().contains("one column"));
    }
}
