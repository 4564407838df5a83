use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

/// Looks up an optional element by id. Missing or mistyped elements switch the
/// dependent feature off instead of failing the page.
pub(crate) fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub(crate) fn query<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    document.query_selector(selector).ok()??.dyn_into::<T>().ok()
}

pub(crate) fn set_display(element: &HtmlElement, display: &str) {
    let _ = element.style().set_property("display", display);
}

pub(crate) fn hide(element: &HtmlElement) {
    set_display(element, "none");
}

pub(crate) fn set_body_scroll_locked(document: &Document, locked: bool) {
    if let Some(body) = document.body() {
        let _ = body
            .style()
            .set_property("overflow", if locked { "hidden" } else { "" });
    }
}

pub(crate) fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, wasm_bindgen::JsValue> {
    Ok(document.create_element(tag)?.dyn_into::<T>()?)
}
