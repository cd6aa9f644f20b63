use std::sync::Arc;
use std::thread;

use sysmeta::system_catalog::registry;
use sysmeta::system_catalog::SettingsNode;
use sysmeta::{DataType, SystemCatalog, TableDefinition, TableIdentity};

// The installed catalog is process-wide, so everything touching it lives in one test.
#[test]
fn bootstrap_then_swap_keeps_reader_snapshots() {
    let booted = registry::ensure_bootstrapped().unwrap();
    assert_eq!(booted.len(), 3);
    // second call is a no-op
    assert!(Arc::ptr_eq(&registry::ensure_bootstrapped().unwrap(), &registry::current()));

    let snapshot = registry::current();
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let s = Arc::clone(&snapshot);
            thread::spawn(move || s.lookup("table_partitions").map(|t| t.len()).unwrap_or(0))
        })
        .collect();

    let replacement = SystemCatalog::from_definitions(vec![TableDefinition::new(
        TableIdentity::new("sys", "cluster"),
        vec![("name".to_string(), SettingsNode::leaf(DataType::String))],
    )])
    .unwrap();
    let previous = registry::install(replacement);
    assert!(Arc::ptr_eq(&previous, &snapshot));

    for r in readers {
        assert_eq!(r.join().unwrap(), 30);
    }
    assert_eq!(snapshot.len(), 3);
    assert!(registry::current().lookup("table_partitions").is_err());
    assert!(registry::current().lookup("sys.cluster").is_ok());

    // an installed catalog is never replaced by bootstrap
    assert_eq!(registry::ensure_bootstrapped().unwrap().len(), 1);
}
