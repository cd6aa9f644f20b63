use std::path::Path;

use sysmeta::config::CatalogConfig;
use sysmeta::system_catalog::information_schema::table_partitions;
use sysmeta::{CatalogError, SystemCatalog, TableDefinition, TableIdentity};

const TABLE_PARTITIONS_JSON: &str = r#"{
    "schema": "information_schema",
    "name": "table_partitions",
    "columns": {
        "table_name": "string",
        "schema_name": "string",
        "partition_ident": "string",
        "values": "object",
        "number_of_shards": "integer",
        "number_of_replicas": "string",
        "table_settings": {
            "blocks": { "read_only": "boolean", "read": "boolean", "write": "boolean", "metadata": "boolean" },
            "translog": {
                "flush_threshold_ops": "integer",
                "flush_threshold_size": "long",
                "flush_threshold_period": "long",
                "disable_flush": "boolean",
                "interval": "long",
                "sync_interval": "string"
            },
            "routing": { "allocation": { "enable": "string", "total_shards_per_node": "integer" } },
            "recovery": { "initial_shards": "string" },
            "warmer": { "enabled": "boolean" },
            "unassigned": { "node_left": { "delayed_timeout": "long" } }
        }
    }
}"#;

fn write(dir: &Path, name: &str, text: &str) {
    std::fs::write(dir.join(name), text).unwrap();
}

#[test]
fn json_definition_equals_static_declaration() {
    let from_json = TableDefinition::from_json_str("table_partitions.json", TABLE_PARTITIONS_JSON).unwrap().build().unwrap();
    let from_decls = table_partitions::definition().build().unwrap();
    assert_eq!(from_json.describe(), from_decls.describe());
    let keys = |s: &sysmeta::TableSchema| s.key_paths().to_vec();
    assert_eq!(keys(&from_json), keys(&from_decls));
}

#[test]
fn null_leaf_fails_with_missing_type() {
    let text = r#"{ "schema": "sys", "name": "t", "columns": { "settings": { "timeout": null } } }"#;
    let err = TableDefinition::from_json_str("t.json", text).unwrap().build().unwrap_err();
    assert_eq!(err, CatalogError::MissingLeafType { path: "settings.timeout".into() });
}

#[test]
fn repeated_top_level_column_is_a_duplicate() {
    let text = r#"{ "schema": "sys", "name": "t", "columns": { "a": "long", "a": "string" } }"#;
    let def = TableDefinition::from_json_str("t.json", text).unwrap();
    assert_eq!(def.columns().len(), 2);
    let err = def.build().unwrap_err();
    assert_eq!(err, CatalogError::DuplicatePath { table: "sys.t".into(), path: "a".into() });
    assert!(err.is_fatal());
}

#[test]
fn repeated_nested_column_is_a_duplicate() {
    let text = r#"{ "schema": "sys", "name": "t", "columns": { "s": { "x": "long", "x": null } } }"#;
    let err = TableDefinition::from_json_str("t.json", text).unwrap().build().unwrap_err();
    assert_eq!(err, CatalogError::DuplicatePath { table: "sys.t".into(), path: "s.x".into() });

    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "t.json", r#"{ "schema": "sys", "name": "t", "columns": { "s": { "x": "long", "x": "string" } } }"#);
    let config = CatalogConfig { include_builtin: false, definitions_dir: Some(tmp.path().to_path_buf()) };
    assert!(matches!(SystemCatalog::from_config(&config), Err(CatalogError::DuplicatePath { ref path, .. }) if path == "s.x"));
}

#[test]
fn directory_definitions_join_builtin_tables() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "sys_nodes.json", r#"{ "schema": "sys", "name": "nodes", "granularity": "node", "primary_key": ["id"], "columns": { "id": "string", "load": { "1": "double" } } }"#);
    write(tmp.path(), "README.txt", "ignored");

    let config = CatalogConfig { include_builtin: true, definitions_dir: Some(tmp.path().to_path_buf()) };
    let catalog = SystemCatalog::from_config(&config).unwrap();
    assert_eq!(catalog.len(), 4);
    let nodes = catalog.table(&TableIdentity::new("sys", "nodes")).unwrap();
    assert_eq!(nodes.resolve_str("load.1").unwrap().data_type(), sysmeta::DataType::Double);
    assert!(catalog.lookup("sys.nodes").is_ok());

    let config = CatalogConfig { include_builtin: false, ..config };
    assert_eq!(SystemCatalog::from_config(&config).unwrap().len(), 1);
}

#[test]
fn directory_definition_clashing_with_builtin_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "partitions.json", TABLE_PARTITIONS_JSON);
    let config = CatalogConfig { include_builtin: true, definitions_dir: Some(tmp.path().to_path_buf()) };
    let err = SystemCatalog::from_config(&config).unwrap_err();
    assert_eq!(err, CatalogError::DuplicateTable { name: "information_schema.table_partitions".into() });
}

#[test]
fn unreadable_definition_aborts_bootstrap() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "a.json", "{ not json");
    let config = CatalogConfig { include_builtin: true, definitions_dir: Some(tmp.path().to_path_buf()) };
    match SystemCatalog::from_config(&config) {
        Err(CatalogError::InvalidDefinition { source_name, .. }) => assert!(source_name.ends_with("a.json")),
        other => panic!("expected InvalidDefinition, got {:?}", other.map(|c| c.len())),
    }
}
