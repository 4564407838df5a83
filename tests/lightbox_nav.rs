use costume_wasm::config::AppConfig;
use costume_wasm::lightbox::{Lightbox, LightboxCommand, LightboxTransition};
use costume_wasm::model::GalleryItem;
use pretty_assertions::assert_eq;

fn gallery() -> Vec<GalleryItem> {
    ["Morgana", "Drácula", "Casper"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| GalleryItem {
            image_url: Some(format!("/results/{i}.jpeg")),
            display_name: Some(name.to_string()),
            ..GalleryItem::default()
        })
        .collect()
}

fn shown_index(transition: LightboxTransition) -> usize {
    match transition {
        LightboxTransition::Show(view) => view.index,
        other => panic!("expected a shown item, got {other:?}"),
    }
}

#[test]
fn navigation_wraps_both_ways() {
    let items = gallery();
    let mut lightbox = Lightbox::new(AppConfig::default());

    lightbox.open(&items, 0).unwrap();
    assert_eq!(shown_index(lightbox.handle(&items, LightboxCommand::Prev)), 2);
    assert_eq!(shown_index(lightbox.handle(&items, LightboxCommand::Next)), 0);

    lightbox.open(&items, 2).unwrap();
    assert_eq!(shown_index(lightbox.handle(&items, LightboxCommand::Next)), 0);
}

#[test]
fn keys_map_to_commands() {
    let items = gallery();
    let mut lightbox = Lightbox::default();
    lightbox.open(&items, 1).unwrap();

    let command = LightboxCommand::from_key("ArrowRight").unwrap();
    assert_eq!(shown_index(lightbox.handle(&items, command)), 2);
    let command = LightboxCommand::from_key("ArrowLeft").unwrap();
    assert_eq!(shown_index(lightbox.handle(&items, command)), 1);
    assert_eq!(LightboxCommand::from_key("Enter"), None);

    let command = LightboxCommand::from_key("Escape").unwrap();
    assert_eq!(lightbox.handle(&items, command), LightboxTransition::Hide);
    assert_eq!(lightbox.current(), None);
}

#[test]
fn closed_lightbox_ignores_keys() {
    let items = gallery();
    let mut lightbox = Lightbox::default();
    for command in [LightboxCommand::Next, LightboxCommand::Prev, LightboxCommand::Close] {
        assert_eq!(lightbox.handle(&items, command), LightboxTransition::Ignore);
    }
    assert!(!lightbox.close());
}

#[test]
fn view_tracks_the_accumulated_list() {
    let mut items = gallery();
    let mut lightbox = Lightbox::default();
    lightbox.open(&items, 2).unwrap();

    // A page that lands while the lightbox is open extends the wrap range.
    items.push(GalleryItem {
        data_url: Some("data:image/webp;base64,AA".to_string()),
        ..GalleryItem::default()
    });
    let view = lightbox.next(&items).unwrap();
    assert_eq!(view.index, 3);
    assert_eq!(view.caption, "");
    assert_eq!(view.download.filename, "imagen.webp");
}
