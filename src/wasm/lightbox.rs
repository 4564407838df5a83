use std::cell::RefCell;

use gloo::events::EventListener;
use web_sys::{Document, Element, HtmlAnchorElement, HtmlElement, HtmlImageElement};

use super::dom;
use super::embers::EmberOverlay;
use super::sound::SoundPlayer;
use crate::config::AppConfig;
use crate::lightbox::{scroll_fade_hidden, LightboxView};

/// DOM side of the lightbox. Only the overlay is required; every other
/// element is skipped when the page does not carry it.
pub(crate) struct LightboxPresenter {
    document: Document,
    overlay: HtmlElement,
    content: Option<Element>,
    image: Option<HtmlImageElement>,
    caption: Option<HtmlElement>,
    download: Option<HtmlAnchorElement>,
    brochure: Option<HtmlElement>,
    sound: Option<SoundPlayer>,
    embers: Option<EmberOverlay>,
    ember_toggle: Option<HtmlElement>,
    fade_listeners: RefCell<Vec<EventListener>>,
}

impl LightboxPresenter {
    pub(crate) fn mount(document: &Document, config: &AppConfig) -> Option<Self> {
        let overlay = dom::element::<HtmlElement>(document, "lightboxOverlay")?;
        let embers = EmberOverlay::from_ids(
            document,
            "lbEmberCanvas",
            "lbImage",
            Some("lbEmberToggleBtn"),
            config.effects,
        )
        .unwrap_or_else(|err| {
            gloo::console::warn!("lightbox embers unavailable", err);
            None
        });
        Some(Self {
            document: document.clone(),
            overlay,
            content: dom::query(document, ".lightbox-content"),
            image: dom::element(document, "lbImage"),
            caption: dom::element(document, "lbCaption"),
            download: dom::element(document, "lbDownload"),
            brochure: dom::element(document, "lbBrochure"),
            sound: SoundPlayer::from_ids(document, "lbSound", "lbPlaySoundBtn"),
            embers,
            ember_toggle: dom::element(document, "lbEmberToggleBtn"),
            fade_listeners: RefCell::new(Vec::new()),
        })
    }

    pub(crate) fn overlay(&self) -> &HtmlElement {
        &self.overlay
    }

    pub(crate) fn show(&self, view: &LightboxView) {
        if let Some(embers) = &self.embers {
            embers.stop();
        }
        if let Some(image) = &self.image {
            image.set_src(&view.image_src);
            image.set_alt(&view.caption);
        }
        if let Some(caption) = &self.caption {
            caption.set_text_content(Some(&view.caption));
        }
        if let Some(download) = &self.download {
            download.set_href(&view.download.href);
            download.set_download(&view.download.filename);
        }
        dom::set_display(&self.overlay, "flex");
        dom::set_body_scroll_locked(&self.document, true);

        match &view.narrative {
            Some(narrative) => {
                if let Some(brochure) = &self.brochure {
                    brochure.set_inner_html(&narrative.markup());
                    dom::set_display(brochure, "block");
                }
                if let Some(sound) = &self.sound {
                    sound.play_source(narrative.sound.as_deref());
                }
            }
            None => {
                self.clear_brochure();
                if let Some(sound) = &self.sound {
                    sound.stop();
                }
            }
        }

        if let Some(toggle) = &self.ember_toggle {
            dom::set_display(toggle, "inline-block");
        }
        self.attach_fade();
    }

    pub(crate) fn hide(&self) {
        dom::hide(&self.overlay);
        dom::set_body_scroll_locked(&self.document, false);
        if let Some(sound) = &self.sound {
            sound.stop();
        }
        self.clear_brochure();
        self.detach_fade();
        if let Some(embers) = &self.embers {
            embers.stop();
        }
        if let Some(toggle) = &self.ember_toggle {
            dom::hide(toggle);
        }
    }

    fn clear_brochure(&self) {
        if let Some(brochure) = &self.brochure {
            brochure.set_inner_html("");
            dom::hide(brochure);
        }
    }

    fn attach_fade(&self) {
        let Some(content) = &self.content else {
            return;
        };
        content.set_scroll_top(0);
        let _ = content.class_list().add_1("scroll-fade");
        let _ = content.class_list().remove_1("hide-fade");
        update_fade(content);

        let mut listeners = self.fade_listeners.borrow_mut();
        if !listeners.is_empty() {
            return;
        }
        let on_scroll = content.clone();
        listeners.push(EventListener::new(content, "scroll", move |_| {
            update_fade(&on_scroll)
        }));
        if let Some(window) = web_sys::window() {
            let on_resize = content.clone();
            listeners.push(EventListener::new(&window, "resize", move |_| {
                update_fade(&on_resize)
            }));
        }
    }

    fn detach_fade(&self) {
        self.fade_listeners.borrow_mut().clear();
        if let Some(content) = &self.content {
            let _ = content.class_list().remove_2("scroll-fade", "hide-fade");
        }
    }
}

fn update_fade(content: &Element) {
    let hidden = scroll_fade_hidden(
        content.scroll_top() as f64,
        content.client_height() as f64,
        content.scroll_height() as f64,
    );
    let _ = content.class_list().toggle_with_force("hide-fade", hidden);
}
