use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, HtmlAudioElement, HtmlElement};

use super::dom;

/// Costume sound with an autoplay attempt and a manual fallback button for
/// browsers that block it.
#[derive(Clone)]
pub(crate) struct SoundPlayer {
    inner: Rc<SoundInner>,
}

struct SoundInner {
    audio: HtmlAudioElement,
    button: Option<HtmlElement>,
    manual: RefCell<Option<EventListener>>,
    // Bumped on every load or stop so a late autoplay result is ignored.
    generation: Cell<u32>,
}

impl SoundPlayer {
    pub(crate) fn new(audio: HtmlAudioElement, button: Option<HtmlElement>) -> Self {
        Self {
            inner: Rc::new(SoundInner {
                audio,
                button,
                manual: RefCell::new(None),
                generation: Cell::new(0),
            }),
        }
    }

    pub(crate) fn from_ids(document: &Document, audio_id: &str, button_id: &str) -> Option<Self> {
        let audio = dom::element::<HtmlAudioElement>(document, audio_id)?;
        Some(Self::new(audio, dom::element(document, button_id)))
    }

    /// Loads `src` and tries to play it. `None` silences and hides the player.
    pub(crate) fn play_source(&self, src: Option<&str>) {
        self.stop();
        let Some(src) = src else {
            return;
        };
        self.inner.audio.set_src(src);
        let generation = self.inner.generation.get();
        let attempt = self.play();
        let player = self.clone();
        spawn_local(async move {
            if let Err(err) = attempt.await {
                if player.inner.generation.get() == generation {
                    console::log!("autoplay blocked, offering play button", err);
                    player.offer_manual_play();
                }
            }
        });
    }

    pub(crate) fn stop(&self) {
        let _ = self.inner.audio.pause();
        self.inner.audio.set_current_time(0.0);
        self.reset();
    }

    /// Starts playback right away; the returned future settles with the
    /// browser's verdict.
    fn play(&self) -> impl Future<Output = Result<(), JsValue>> {
        let started = self.inner.audio.play();
        async move {
            JsFuture::from(started?).await?;
            Ok(())
        }
    }

    fn reset(&self) {
        let inner = &self.inner;
        inner.generation.set(inner.generation.get().wrapping_add(1));
        inner.manual.borrow_mut().take();
        self.hide_controls();
    }

    fn hide_controls(&self) {
        let inner = &self.inner;
        inner.audio.set_controls(false);
        dom::hide(&inner.audio);
        if let Some(button) = &inner.button {
            dom::hide(button);
        }
    }

    fn offer_manual_play(&self) {
        let inner = &self.inner;
        inner.audio.set_controls(true);
        dom::set_display(&inner.audio, "block");
        let Some(button) = &inner.button else {
            return;
        };
        dom::set_display(button, "inline-block");
        let player = self.clone();
        *inner.manual.borrow_mut() = Some(EventListener::new(button, "click", move |_| {
            let attempt = player.play();
            let player = player.clone();
            spawn_local(async move {
                match attempt.await {
                    Ok(()) => player.hide_controls(),
                    // Controls stay visible so the user can still start it.
                    Err(err) => console::warn!("manual play failed", err),
                }
            });
        }));
    }
}

#[cfg(test)]
mod tests {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    use super::*;

    fn player() -> (SoundPlayer, HtmlAudioElement, HtmlElement) {
        let document = web_sys::window().unwrap().document().unwrap();
        let audio: HtmlAudioElement = document.create_element("audio").unwrap().dyn_into().unwrap();
        let button: HtmlElement = document.create_element("button").unwrap().dyn_into().unwrap();
        audio.set_muted(true);
        let body = document.body().unwrap();
        body.append_child(&audio).unwrap();
        body.append_child(&button).unwrap();
        (SoundPlayer::new(audio.clone(), Some(button.clone())), audio, button)
    }

    fn display(element: &HtmlElement) -> String {
        element.style().get_property_value("display").unwrap()
    }

    #[wasm_bindgen_test]
    fn missing_source_silences_the_previous_sound() {
        let (player, audio, button) = player();
        player.play_source(Some(
            "data:audio/wav;base64,UklGRiQAAABXQVZFZm10IBAAAAABAAEAQB8AAEAfAAABAAgAZGF0YQAAAAA=",
        ));
        assert!(!audio.paused());

        player.play_source(None);
        assert!(audio.paused());
        assert_eq!(audio.current_time(), 0.0);
        assert_eq!(display(&audio), "none");
        assert_eq!(display(&button), "none");
    }

    #[wasm_bindgen_test]
    fn successful_manual_play_hides_the_fallback() {
        let (player, audio, button) = player();
        player.offer_manual_play();
        assert!(audio.controls());
        assert_eq!(display(&audio), "block");
        assert_eq!(display(&button), "inline-block");

        player.hide_controls();
        assert!(!audio.controls());
        assert_eq!(display(&audio), "none");
        assert_eq!(display(&button), "none");
    }
}
