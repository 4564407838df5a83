//! Browser client for the Halloween costume transformer: the main stage that
//! uploads and transforms a photo, and the infinite-scroll gallery with its
//! lightbox. Both can layer an animated ember overlay over an image.
//!
//! Everything outside `wasm` is plain Rust and runs on the host.

pub mod config;
pub mod costume;
pub mod effects;
pub mod error;
pub mod gallery;
pub mod lightbox;
pub mod model;
pub mod naming;
pub mod pagination;
pub mod transform;

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::config::AppConfig;

    mod canvas;
    mod dom;
    mod embers;
    mod gallery;
    mod lightbox;
    mod sound;
    mod stage;

    pub use embers::EmberOverlay;

    #[cfg(test)]
    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    fn load_config(window: &web_sys::Window) -> AppConfig {
        let storage = window.local_storage().ok().flatten();
        AppConfig::default().with_overrides(|key| storage.as_ref()?.get_item(key).ok()?)
    }

    /// Mounts the gallery onto `#galleryGrid` with the current config.
    #[wasm_bindgen(js_name = mountGallery)]
    pub fn mount_gallery() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        gallery::mount(&document, load_config(&window))
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // One bundle serves both pages; mount whatever the page carries.
        if document.get_element_by_id("galleryGrid").is_some() {
            mount_gallery()?;
        }
        if document.get_element_by_id("transformButton").is_some() {
            stage::mount(&document, load_config(&window))?;
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{mount_gallery, EmberOverlay};
