use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use supply_chain_dashboard::cache::EnrichedCache;
use supply_chain_dashboard::ingestion::{LoadContext, LoadObserver, LoadOptions, LoadStats};
use supply_chain_dashboard::schema::IS_LATE;

const ORDERS: &str = "tests/fixtures/orders.csv";

#[derive(Default)]
struct CountingObserver {
    loads: AtomicUsize,
}

impl LoadObserver for CountingObserver {
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {
        self.loads.fetch_add(1, Ordering::SeqCst);
    }
}

fn counted(obs: &Arc<CountingObserver>) -> LoadOptions {
    LoadOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    }
}

fn copy_fixture(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("orders.csv");
    std::fs::copy(ORDERS, &path).unwrap();
    path
}

#[test]
fn repeated_requests_load_once() {
    let obs = Arc::new(CountingObserver::default());
    let cache = EnrichedCache::new();

    let first = cache.get_or_load(ORDERS, &counted(&obs)).unwrap();
    let second = cache.get_or_load(ORDERS, &counted(&obs)).unwrap();

    assert_eq!(obs.loads.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
    assert!(first.schema.index_of(IS_LATE).is_some());
}

#[test]
fn different_spellings_of_one_source_share_an_entry() {
    let obs = Arc::new(CountingObserver::default());
    let cache = EnrichedCache::new();

    let plain = cache.get_or_load(ORDERS, &counted(&obs)).unwrap();
    let dotted = cache
        .get_or_load("./tests/fixtures/../fixtures/orders.csv", &counted(&obs))
        .unwrap();
    let absolute = std::fs::canonicalize(ORDERS).unwrap();

    assert!(Arc::ptr_eq(&plain, &dotted));
    assert_eq!(obs.loads.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
    assert!(cache.get(&absolute).is_some());

    assert!(cache.invalidate(format!("./{ORDERS}")));
    assert!(cache.is_empty());
}

#[test]
fn cached_table_ignores_later_file_changes_until_invalidated() {
    let dir = tempfile::tempdir().unwrap();
    let path = copy_fixture(dir.path());
    let obs = Arc::new(CountingObserver::default());
    let cache = EnrichedCache::new();

    assert_eq!(cache.get_or_load(&path, &counted(&obs)).unwrap().row_count(), 7);

    let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
    writeln!(
        file,
        "CA-7,21/03/2024,22/03/2024,First Class,West,Low,10,1,0,1,1,Furniture,Chairs,Chair A,C1,Alice Ng,Consumer"
    )
    .unwrap();
    drop(file);

    assert_eq!(cache.get_or_load(&path, &counted(&obs)).unwrap().row_count(), 7);
    assert_eq!(obs.loads.load(Ordering::SeqCst), 1);

    assert!(cache.invalidate(&path));
    assert!(!cache.invalidate(&path));
    assert_eq!(cache.get_or_load(&path, &counted(&obs)).unwrap().row_count(), 8);
    assert_eq!(obs.loads.load(Ordering::SeqCst), 2);
}

#[test]
fn invalidating_one_source_keeps_others() {
    let dir = tempfile::tempdir().unwrap();
    let copy = copy_fixture(dir.path());
    let cache = EnrichedCache::new();

    cache.get_or_load(ORDERS, &LoadOptions::default()).unwrap();
    cache.get_or_load(&copy, &LoadOptions::default()).unwrap();
    assert_eq!(cache.len(), 2);

    cache.invalidate(&copy);
    assert!(cache.get(ORDERS).is_some());
    assert!(cache.get(&copy).is_none());

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn failed_loads_are_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("later.csv");
    let cache = EnrichedCache::new();

    let err = cache.get_or_load(&path, &LoadOptions::default()).unwrap_err();
    assert!(err.is_source_not_found());
    assert!(cache.is_empty());

    std::fs::copy(ORDERS, &path).unwrap();
    assert_eq!(cache.get_or_load(&path, &LoadOptions::default()).unwrap().row_count(), 7);
}
