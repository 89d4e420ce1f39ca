//! Loading configuration files from disk.

use std::fs;
use std::io::Write;

use kp_config::{Config, ConfigError};
use kp_vedic_base::{DegreeFormat, SubDivisionTable, write_partition_csv};

#[test]
fn loads_file_and_resolves_relative_table() {
    let dir = tempfile::tempdir().unwrap();
    let table_file = dir.path().join("divisions.csv");
    let mut out = fs::File::create(&table_file).unwrap();
    write_partition_csv(SubDivisionTable::kp(), &mut out, DegreeFormat::Dms).unwrap();
    out.flush().unwrap();

    let config_file = dir.path().join("kp.toml");
    fs::write(
        &config_file,
        "[partition]\ntable_path = \"divisions.csv\"\n\n[logging]\nlevel = \"debug\"\n",
    )
    .unwrap();

    let config = Config::load(&config_file).unwrap();
    assert_eq!(config.log_level(), "debug");
    assert_eq!(config.table_path().unwrap(), table_file);
    let table = config.partition_table().unwrap();
    assert_eq!(table.len(), 249);
    assert_eq!(table.lookup(34).unwrap().sub_lord, SubDivisionTable::kp().lookup(34).unwrap().sub_lord);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }), "{err:?}");
}

#[test]
fn missing_table_is_partition_error() {
    let dir = tempfile::tempdir().unwrap();
    let config_file = dir.path().join("kp.toml");
    fs::write(&config_file, "[partition]\ntable_path = \"nope.csv\"\n").unwrap();
    let config = Config::load(&config_file).unwrap();
    assert!(matches!(config.partition_table(), Err(ConfigError::Partition(_))));
}

#[test]
fn malformed_toml_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let config_file = dir.path().join("kp.toml");
    fs::write(&config_file, "[search\nstep_minutes = 2").unwrap();
    assert!(matches!(Config::load(&config_file), Err(ConfigError::Parse(_))));
}
