use std::path::PathBuf;

use dialorm::{Dialect, DialectConfig, OrmError};

fn write_config(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dialorm-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn load_mysql_config() {
    let path = write_config(
        "mysql.toml",
        r#"
dialect = "mysql"

[mysql]
backslash_escapes = false
"#,
    );
    let cfg = DialectConfig::load(&path).unwrap();
    assert_eq!(cfg.dialect, Dialect::MySql);
    assert!(!cfg.mysql.backslash_escapes);
    assert_eq!(
        cfg,
        DialectConfig::new(Dialect::MySql).with_backslash_escapes(false)
    );
}

#[test]
fn load_postgres_config() {
    let path = write_config("pg.toml", "dialect = \"postgresql\"\n");
    let cfg = DialectConfig::load(&path).unwrap();
    assert_eq!(cfg.dialect, Dialect::Postgres);
    assert_eq!(cfg.renderer().quote_char(), '"');
}

#[test]
fn parse_error_names_the_file() {
    let path = write_config("broken.toml", "dialect = \n");
    let err = DialectConfig::load(&path).unwrap_err();
    match err {
        OrmError::Config(msg) => {
            assert!(msg.contains("failed to parse config file"), "{msg}");
            assert!(msg.contains("broken.toml"), "{msg}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
