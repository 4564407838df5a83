use costume_wasm::gallery::{FetchOutcome, GalleryLoader, GalleryRenderer};
use costume_wasm::model::{GalleryItem, GalleryPage};
use costume_wasm::pagination::PaginationMode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[derive(Default)]
struct Grid {
    cards: Vec<String>,
    empty_shown: bool,
}

impl GalleryRenderer for Grid {
    type Card = ();

    fn render_card(&mut self, index: usize, item: &GalleryItem) {
        assert_eq!(index, self.cards.len());
        self.cards.push(item.image_src().unwrap_or_default().to_string());
    }

    fn show_empty_state(&mut self) {
        self.empty_shown = true;
    }

    fn show_loader(&mut self, _visible: bool) {}
}

fn images(from: usize, count: usize) -> Vec<Value> {
    (from..from + count)
        .map(|i| json!({ "image_url": format!("/results/{i}.png") }))
        .collect()
}

/// Runs one fetch cycle and returns the URL that was requested.
fn fetch(loader: &mut GalleryLoader<Grid>, body: Value) -> (String, FetchOutcome) {
    let request = loader.begin_fetch().expect("fetch should be allowed");
    let url = request.url("/api/gallery");
    let page = GalleryPage::from_value(body).unwrap();
    (url, loader.complete_fetch(Ok(page)))
}

#[test]
fn offset_backend_runs_until_empty_page() {
    let mut loader = GalleryLoader::new(Grid::default(), 24);

    let (url, _) = fetch(&mut loader, json!({ "items": images(0, 24), "next_offset": 24 }));
    assert_eq!(url, "/api/gallery?limit=24&offset=0");
    assert_eq!(loader.state().mode(), Some(PaginationMode::OffsetBased));

    let (url, _) = fetch(&mut loader, json!({ "items": images(24, 10), "next_offset": 34 }));
    assert_eq!(url, "/api/gallery?limit=24&offset=24");
    assert!(!loader.state().end_reached());

    let (url, outcome) = fetch(&mut loader, json!({ "items": [] }));
    assert_eq!(url, "/api/gallery?limit=24&offset=34");
    assert_eq!(outcome, FetchOutcome::Exhausted);

    assert_eq!(loader.items().len(), 34);
    assert!(loader.state().end_reached());
    assert!(!loader.renderer().empty_shown);
    assert!(loader.begin_fetch().is_none());
}

#[test]
fn cursor_backend_ends_on_null_cursor() {
    let mut loader = GalleryLoader::new(Grid::default(), 24);

    let (url, _) = fetch(&mut loader, json!({ "items": images(0, 24), "next_cursor": "c1" }));
    assert_eq!(url, "/api/gallery?limit=24&offset=0");
    assert_eq!(loader.state().mode(), Some(PaginationMode::CursorBased));

    let (url, outcome) = fetch(&mut loader, json!({ "items": images(24, 5), "next_cursor": null }));
    assert_eq!(url, "/api/gallery?limit=24&cursor=c1");
    assert_eq!(outcome, FetchOutcome::Rendered { count: 5 });

    assert_eq!(loader.items().len(), 29);
    assert!(loader.state().end_reached());
    assert!(loader.begin_fetch().is_none());
}

#[test]
fn mode_is_fixed_by_first_response() {
    let mut loader = GalleryLoader::new(Grid::default(), 2);

    fetch(&mut loader, json!({ "items": images(0, 2), "next_offset": 2 }));
    fetch(&mut loader, json!({ "items": images(2, 2), "next_cursor": "later" }));
    assert_eq!(loader.state().mode(), Some(PaginationMode::OffsetBased));
    assert_eq!(loader.state().cursor(), None);

    let (url, _) = fetch(&mut loader, json!({ "items": images(4, 2), "next_offset": 6 }));
    assert_eq!(url, "/api/gallery?limit=2&offset=4");
}

#[test]
fn filtered_entries_still_advance_the_offset() {
    let mut loader = GalleryLoader::new(Grid::default(), 3);

    let (_, outcome) = fetch(
        &mut loader,
        json!({ "items": [
            { "image_url": "/results/a.png" },
            { "display_name": "sin imagen" },
            null,
        ] }),
    );
    assert_eq!(outcome, FetchOutcome::Rendered { count: 1 });
    assert_eq!(loader.state().mode(), Some(PaginationMode::OffsetGuess));
    assert_eq!(loader.state().offset(), 3);
    assert!(!loader.state().end_reached());
    assert_eq!(loader.renderer().cards, vec!["/results/a.png".to_string()]);

    let (url, _) = fetch(&mut loader, json!({ "items": images(3, 1) }));
    assert_eq!(url, "/api/gallery?limit=3&offset=3");
    assert!(loader.state().end_reached());
}

#[test]
fn fetch_is_not_reentrant() {
    let mut loader = GalleryLoader::new(Grid::default(), 24);
    let first = loader.begin_fetch();
    assert!(first.is_some());
    assert!(loader.begin_fetch().is_none());
    assert!(loader.state().in_flight());

    loader.complete_fetch(Ok(GalleryPage::from_value(json!({ "items": images(0, 24) })).unwrap()));
    assert!(!loader.state().in_flight());
    assert!(loader.begin_fetch().is_some());
}

#[test]
fn empty_offset_page_keeps_the_offset() {
    let mut loader = GalleryLoader::new(Grid::default(), 24);

    fetch(&mut loader, json!({ "items": images(0, 2), "next_offset": 2 }));
    assert_eq!(loader.state().offset(), 2);
    assert!(!loader.state().end_reached());

    let (url, outcome) = fetch(&mut loader, json!({ "items": [], "next_offset": 2 }));
    assert_eq!(url, "/api/gallery?limit=24&offset=2");
    assert_eq!(outcome, FetchOutcome::Exhausted);
    assert_eq!(loader.state().offset(), 2);
    assert!(loader.state().end_reached());
    assert_eq!(loader.items().len(), 2);
}

#[test]
fn offset_that_does_not_move_ends_pagination() {
    let mut loader = GalleryLoader::new(Grid::default(), 24);

    let (_, outcome) = fetch(&mut loader, json!({ "items": images(0, 1), "next_offset": 0 }));
    assert_eq!(outcome, FetchOutcome::Rendered { count: 1 });
    assert_eq!(loader.state().offset(), 0);
    assert!(loader.state().end_reached());
    assert!(loader.begin_fetch().is_none());
}
