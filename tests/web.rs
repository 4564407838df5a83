#![cfg(target_arch = "wasm32")]

use costume_wasm::config::GALLERY_ENDPOINT_KEY;
use costume_wasm::effects::{LABEL_ACTIVATE, LABEL_DEACTIVATE};
use costume_wasm::{mount_gallery, EmberOverlay};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Positioned container holding a 200x120 image and the overlay canvas.
fn fixture(prefix: &str) -> HtmlCanvasElement {
    let document = document();
    let container = document.create_element("div").unwrap();
    container
        .set_attribute("style", "position:relative;padding:8px")
        .unwrap();

    let image = document.create_element("img").unwrap();
    image.set_id(&format!("{prefix}-image"));
    image
        .set_attribute("style", "display:block;width:200px;height:120px")
        .unwrap();

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap();
    canvas.set_id(&format!("{prefix}-canvas"));
    canvas
        .set_attribute("style", "display:none;position:absolute")
        .unwrap();

    container.append_child(&image).unwrap();
    container.append_child(&canvas).unwrap();
    document.body().unwrap().append_child(&container).unwrap();
    canvas
}

fn display(element: &HtmlElement) -> String {
    element.style().get_property_value("display").unwrap()
}

#[wasm_bindgen_test(async)]
async fn overlay_covers_the_image() {
    let canvas = fixture("cover");
    let overlay = EmberOverlay::new("cover-canvas", "cover-image", None).unwrap();

    overlay.start();
    assert!(overlay.running());
    assert_eq!((canvas.width(), canvas.height()), (200, 120));
    assert_eq!(canvas.style().get_property_value("left").unwrap(), "8px");
    assert_eq!(display(&canvas), "block");

    assert!(!overlay.toggle());
    assert_eq!(display(&canvas), "none");
}

#[wasm_bindgen_test]
fn toggle_button_drives_the_overlay() {
    fixture("button");
    let document = document();
    let button: HtmlElement = document
        .create_element("button")
        .unwrap()
        .dyn_into()
        .unwrap();
    button.set_id("button-toggle");
    document.body().unwrap().append_child(&button).unwrap();

    let overlay =
        EmberOverlay::new("button-canvas", "button-image", Some("button-toggle".into())).unwrap();
    assert_eq!(button.text_content().as_deref(), Some(LABEL_ACTIVATE));

    button.click();
    assert!(overlay.running());
    assert_eq!(button.text_content().as_deref(), Some(LABEL_DEACTIVATE));

    button.click();
    assert!(!overlay.running());
    assert_eq!(button.text_content().as_deref(), Some(LABEL_ACTIVATE));
}

#[wasm_bindgen_test]
fn missing_elements_are_reported() {
    assert!(EmberOverlay::new("no-such-canvas", "no-such-image", None).is_err());
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn append(document: &Document, tag: &str, id: &str) -> Element {
    let element = document.create_element(tag).unwrap();
    element.set_id(id);
    document.body().unwrap().append_child(&element).unwrap();
    element
}

#[wasm_bindgen_test(async)]
async fn gallery_cards_open_after_the_first_page() {
    let document = document();
    let grid = append(&document, "div", "galleryGrid");
    let overlay: HtmlElement = append(&document, "div", "lightboxOverlay").dyn_into().unwrap();
    overlay.style().set_property("display", "none").unwrap();

    // One-item offset page served from a data URL; the fragment swallows the query.
    let body = String::from(js_sys::encode_uri_component(
        r#"{"items":[{"image_url":"/missing.png","display_name":"Morgana"}],"next_offset":1}"#,
    ));
    let storage = web_sys::window().unwrap().local_storage().unwrap().unwrap();
    storage
        .set_item(GALLERY_ENDPOINT_KEY, &format!("data:application/json,{body}#"))
        .unwrap();
    mount_gallery().unwrap();
    storage.remove_item(GALLERY_ENDPOINT_KEY).unwrap();

    let mut image = None;
    for _ in 0..100 {
        image = grid.query_selector(".gallery-card img").unwrap();
        if image.is_some() {
            break;
        }
        sleep(10).await;
    }
    let image: HtmlElement = image.expect("first page rendered").dyn_into().unwrap();
    // Let the fetch task finish and release its handle on the view.
    sleep(20).await;

    image.click();
    assert_eq!(display(&overlay), "flex");
}
