use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::bail;
use manaview::{
    app::App,
    scryfall::ImageResolver,
    storage::{MemoryStore, SledStore},
    AppError, SortDirection,
};

struct CountingResolver {
    calls: Arc<AtomicUsize>,
}

impl ImageResolver for CountingResolver {
    fn resolve(&self, id: &str) -> anyhow::Result<String> {
        if id.is_empty() {
            bail!("empty identifier");
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://cards.scryfall.io/normal/{id}.jpg"))
    }
}

fn app_over(store: Arc<MemoryStore>) -> (App, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let resolver = CountingResolver {
        calls: calls.clone(),
    };
    (App::new(store, Box::new(resolver)), calls)
}

const COLLECTION: &str = "\
Name,Set code,Rarity,Quantity,Scryfall ID,Purchase price
Sacred Foundry,EOE,rare,1,8b4e2642,8.39
Loading Zone,EOE,rare,1,0d2c95bd,0.47
Starwinder,EOE,rare,1,637a4457,3.19
Creeping Tar Pit,EOS,rare,2,a2184faf,0.33
Codecracker Hound,EOE,uncommon,3,6723b891,0.06
";

#[test]
fn load_search_sort_page_export_flow() {
    let (mut app, _) = app_over(Arc::new(MemoryStore::new()));
    app.load_csv(COLLECTION).unwrap();

    app.set_search("eoe");
    app.toggle_sort("Purchase price");
    app.set_page_size(2);

    let first = app.view();
    assert_eq!(first.filtered_rows, 4);
    assert_eq!(first.page_count, 2);
    assert_eq!(first.rows[0].data["Name"], "Codecracker Hound");
    assert_eq!(first.rows[1].data["Name"], "Loading Zone");
    assert_eq!(
        first.sort,
        Some(("Purchase price".to_string(), SortDirection::Ascending))
    );

    app.set_page(1);
    let second = app.view();
    assert_eq!(second.rows[0].data["Name"], "Starwinder");
    assert_eq!(second.rows[1].data["Name"], "Sacred Foundry");

    // Export is still the captured input, untouched by any of the above.
    assert_eq!(app.export().unwrap(), COLLECTION);
}

#[test]
fn page_index_stays_in_range_under_state_churn() {
    let (mut app, _) = app_over(Arc::new(MemoryStore::new()));
    app.load_csv(COLLECTION).unwrap();

    app.set_page_size(2);
    app.set_page(99);
    assert_eq!(app.view().page_index, app.view().page_count - 1);

    app.set_search("creeping");
    let narrowed = app.view();
    assert_eq!(narrowed.page_index, 0);
    assert_eq!(narrowed.filtered_rows, 1);

    app.set_search("no such card");
    let empty = app.view();
    assert_eq!(empty.page_index, 0);
    assert_eq!(empty.page_count, 0);
    assert!(empty.rows.is_empty());
}

#[test]
fn image_lookups_hit_cache_after_first_resolution() {
    let store = Arc::new(MemoryStore::new());
    let (mut app, calls) = app_over(store.clone());
    app.load_csv(COLLECTION).unwrap();
    assert!(app.has_images());

    let url = app.card_image(2).unwrap();
    assert_eq!(url, "https://cards.scryfall.io/normal/637a4457.jpg");
    assert_eq!(app.card_image(2).unwrap(), url);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // A second session over the same store reuses the persisted cache.
    let (mut next, next_calls) = app_over(store);
    next.load_csv(COLLECTION).unwrap();
    assert_eq!(next.card_image(2).unwrap(), url);
    assert_eq!(next_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn session_restore_round_trips_through_sled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");

    {
        let store = Arc::new(SledStore::open(&path).unwrap());
        let calls = Arc::new(AtomicUsize::new(0));
        let mut app = App::new(store, Box::new(CountingResolver { calls }));
        app.load_csv(COLLECTION).unwrap();
    }

    let store = Arc::new(SledStore::open(&path).unwrap());
    let calls = Arc::new(AtomicUsize::new(0));
    let app = App::new(store, Box::new(CountingResolver { calls }));
    assert_eq!(app.export().unwrap(), COLLECTION);
    assert_eq!(app.view().total_rows, 5);
}

#[test]
fn export_before_any_load_fails() {
    let (app, _) = app_over(Arc::new(MemoryStore::new()));
    assert!(matches!(app.export(), Err(AppError::NoData)));
}
