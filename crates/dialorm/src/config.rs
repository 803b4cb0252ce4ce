//! Dialect configuration, loaded from TOML.
//!
//! ```toml
//! dialect = "mysql"          # or "postgres" / "postgresql"
//!
//! [mysql]
//! backslash_escapes = true   # false when the server runs NO_BACKSLASH_ESCAPES
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::dialect::{Dialect, MySqlLiterals, PostgresLiterals, SqlRenderer};
use crate::error::{OrmError, OrmResult};

/// Which backend to render for, and how its string literals are escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DialectConfig {
    pub dialect: Dialect,
    #[serde(default)]
    pub mysql: MySqlConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MySqlConfig {
    /// Whether the server treats `\` in string literals as an escape.
    #[serde(default = "default_backslash_escapes")]
    pub backslash_escapes: bool,
}

fn default_backslash_escapes() -> bool {
    true
}

impl Default for MySqlConfig {
    fn default() -> Self {
        Self {
            backslash_escapes: default_backslash_escapes(),
        }
    }
}

impl DialectConfig {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            mysql: MySqlConfig::default(),
        }
    }

    /// Set the MySQL backslash escape mode. Ignored for PostgreSQL.
    pub fn with_backslash_escapes(mut self, enabled: bool) -> Self {
        self.mysql.backslash_escapes = enabled;
        self
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> OrmResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            OrmError::config(format!(
                "failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&raw).map_err(|e| {
            OrmError::config(format!(
                "failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    pub fn from_toml_str(raw: &str) -> OrmResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// A renderer using this configuration's literal rules.
    pub fn renderer(&self) -> SqlRenderer {
        match self.dialect {
            Dialect::MySql => SqlRenderer::new(
                self.dialect,
                Box::new(MySqlLiterals {
                    backslash_escapes: self.mysql.backslash_escapes,
                }),
            ),
            Dialect::Postgres => SqlRenderer::new(self.dialect, Box::new(PostgresLiterals)),
        }
    }
}

impl From<Dialect> for DialectConfig {
    fn from(dialect: Dialect) -> Self {
        Self::new(dialect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal() {
        let cfg = DialectConfig::from_toml_str(r#"dialect = "mysql""#).unwrap();
        assert_eq!(cfg, DialectConfig::new(Dialect::MySql));
        assert!(cfg.mysql.backslash_escapes);
    }

    #[test]
    fn parse_aliases() {
        for name in ["postgres", "postgresql", "pg"] {
            let cfg = DialectConfig::from_toml_str(&format!("dialect = \"{name}\"")).unwrap();
            assert_eq!(cfg.dialect, Dialect::Postgres);
        }
    }

    #[test]
    fn parse_mysql_section() {
        let cfg = DialectConfig::from_toml_str(
            "dialect = \"mysql\"\n\n[mysql]\nbackslash_escapes = false\n",
        )
        .unwrap();
        assert!(!cfg.mysql.backslash_escapes);
        assert!(!cfg.renderer().literals().backslash_escapes());
    }

    #[test]
    fn reject_unknown_dialect_and_keys() {
        let err = DialectConfig::from_toml_str(r#"dialect = "sqlite""#).unwrap_err();
        assert!(matches!(err, OrmError::Config(_)));
        assert!(DialectConfig::from_toml_str("dialect = \"mysql\"\nverbose = true").is_err());
        assert!(DialectConfig::from_toml_str("").is_err());
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let err = DialectConfig::load("/definitely/not/here/dialorm.toml").unwrap_err();
        match err {
            OrmError::Config(msg) => assert!(msg.contains("failed to read config file")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn builder_sets_renderer() {
        let r = DialectConfig::new(Dialect::MySql)
            .with_backslash_escapes(false)
            .renderer();
        assert_eq!(r.dialect(), Dialect::MySql);
        assert!(!r.literals().backslash_escapes());
        assert!(
            DialectConfig::from(Dialect::MySql)
                .renderer()
                .literals()
                .backslash_escapes()
        );
    }
}
