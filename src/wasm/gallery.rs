use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::console;
use gloo::events::EventListener;
use gloo::net::http::Request;
use wasm_bindgen::{closure::Closure, prelude::*, JsCast};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlElement, HtmlImageElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent,
};

use super::dom;
use super::lightbox::LightboxPresenter;
use crate::config::AppConfig;
use crate::error::GalleryError;
use crate::gallery::{GalleryLoader, GalleryRenderer};
use crate::lightbox::{Lightbox, LightboxCommand, LightboxTransition};
use crate::model::{GalleryItem, GalleryPage};
use crate::naming;

/// Wires the gallery page: first fetch, sentinel observer, lightbox controls.
pub(crate) fn mount(document: &Document, config: AppConfig) -> Result<(), JsValue> {
    let grid = document
        .get_element_by_id("galleryGrid")
        .ok_or("missing #galleryGrid")?;
    let view = GalleryView::new(document, grid, config);
    if view.presenter.is_none() {
        console::warn!("no #lightboxOverlay, cards will not open");
    }
    view.observe_sentinel(document)?;
    view.wire_controls(document);
    view.fetch_next_page();
    // Listeners only hold weak handles; the view lives as long as the page.
    std::mem::forget(view);
    Ok(())
}

struct GalleryView {
    config: AppConfig,
    loader: RefCell<GalleryLoader<DomGallery>>,
    lightbox: RefCell<Lightbox>,
    presenter: Option<LightboxPresenter>,
    // Page-lifetime listeners.
    listeners: RefCell<Vec<EventListener>>,
}

impl GalleryView {
    fn new(document: &Document, grid: Element, config: AppConfig) -> Rc<Self> {
        Rc::new_cyclic(|weak| {
            let renderer = DomGallery {
                document: document.clone(),
                grid,
                empty_state: dom::element(document, "emptyMsg"),
                spinner: dom::element(document, "loader"),
                view: weak.clone(),
            };
            Self {
                loader: RefCell::new(GalleryLoader::new(renderer, config.gallery.page_size)),
                lightbox: RefCell::new(Lightbox::new(config.clone())),
                presenter: LightboxPresenter::mount(document, &config),
                listeners: RefCell::new(Vec::new()),
                config,
            }
        })
    }

    fn fetch_next_page(self: &Rc<Self>) {
        let Some(request) = self.loader.borrow_mut().begin_fetch() else {
            return;
        };
        let url = request.url(&self.config.gallery.endpoint);
        let view = Rc::clone(self);
        spawn_local(async move {
            let result = fetch_page(&url).await;
            if let Err(err) = &result {
                console::error!("gallery fetch failed", url, err.to_string());
            }
            view.loader.borrow_mut().complete_fetch(result);
        });
    }

    fn observe_sentinel(self: &Rc<Self>, document: &Document) -> Result<(), JsValue> {
        let Some(sentinel) = document.get_element_by_id("sentinel") else {
            console::warn!("no #sentinel, gallery will not load past the first page");
            return Ok(());
        };
        let weak = Rc::downgrade(self);
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let Some(view) = weak.upgrade() else {
                    return;
                };
                for entry in entries.iter() {
                    if entry.unchecked_into::<IntersectionObserverEntry>().is_intersecting() {
                        view.fetch_next_page();
                    }
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_root_margin(&format!("{}px", self.config.gallery.prefetch_margin_px));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        observer.observe(&sentinel);
        // The observer lives as long as the page.
        callback.forget();
        Ok(())
    }

    fn wire_controls(self: &Rc<Self>, document: &Document) {
        let mut listeners = self.listeners.borrow_mut();

        for (id, command) in [
            ("lbClose", LightboxCommand::Close),
            ("lbPrev", LightboxCommand::Prev),
            ("lbNext", LightboxCommand::Next),
        ] {
            if let Some(button) = document.get_element_by_id(id) {
                let weak = Rc::downgrade(self);
                listeners.push(EventListener::new(&button, "click", move |_| {
                    if let Some(view) = weak.upgrade() {
                        view.navigate(command);
                    }
                }));
            }
        }

        if let Some(presenter) = &self.presenter {
            let overlay = presenter.overlay().clone();
            let weak = Rc::downgrade(self);
            listeners.push(EventListener::new(presenter.overlay(), "click", move |event| {
                let on_backdrop = event
                    .target()
                    .is_some_and(|target| js_sys::Object::is(&target, &overlay));
                if let (true, Some(view)) = (on_backdrop, weak.upgrade()) {
                    view.navigate(LightboxCommand::Close);
                }
            }));
        }

        if let Some(window) = web_sys::window() {
            let weak = Rc::downgrade(self);
            listeners.push(EventListener::new(&window, "keydown", move |event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                    return;
                };
                if let (Some(command), Some(view)) = (LightboxCommand::from_key(&key), weak.upgrade())
                {
                    view.navigate(command);
                }
            }));
        }
    }

    fn open(&self, index: usize) {
        let view = {
            let loader = self.loader.borrow();
            self.lightbox.borrow_mut().open(loader.items(), index)
        };
        if let Some(view) = view {
            self.present(LightboxTransition::Show(view));
        }
    }

    fn navigate(&self, command: LightboxCommand) {
        let transition = {
            let loader = self.loader.borrow();
            self.lightbox.borrow_mut().handle(loader.items(), command)
        };
        self.present(transition);
    }

    fn present(&self, transition: LightboxTransition) {
        let Some(presenter) = &self.presenter else {
            return;
        };
        match transition {
            LightboxTransition::Show(view) => presenter.show(&view),
            LightboxTransition::Hide => presenter.hide(),
            LightboxTransition::Ignore => {}
        }
    }
}

async fn fetch_page(url: &str) -> Result<GalleryPage, GalleryError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|err| GalleryError::Transport(err.to_string()))?;
    if !response.ok() {
        return Err(GalleryError::Http {
            status: response.status(),
        });
    }
    let body = response
        .text()
        .await
        .map_err(|err| GalleryError::Transport(err.to_string()))?;
    GalleryPage::from_json(&body)
}

struct DomGallery {
    document: Document,
    grid: Element,
    empty_state: Option<HtmlElement>,
    spinner: Option<HtmlElement>,
    view: Weak<GalleryView>,
}

/// A card in the grid and the click handler that opens it.
struct GalleryCard {
    _element: HtmlElement,
    _open: EventListener,
}

impl DomGallery {
    fn build_card(&self, index: usize, item: &GalleryItem) -> Result<GalleryCard, JsValue> {
        let src = item.image_src().unwrap_or_default();
        let card: HtmlElement = dom::create(&self.document, "div")?;
        card.set_class_name("gallery-card");

        let image: HtmlImageElement = dom::create(&self.document, "img")?;
        image.set_src(src);
        image.set_alt("Imagen transformada");
        let _ = image.style().set_property("cursor", "zoom-in");
        card.append_child(&image)?;

        if let Some(name) = &item.display_name {
            let badge: HtmlElement = dom::create(&self.document, "div")?;
            badge.set_class_name("name-badge");
            badge.set_text_content(Some(name));
            card.append_child(&badge)?;
        }

        let download: HtmlAnchorElement = dom::create(&self.document, "a")?;
        download.set_class_name("card-download-btn");
        download.set_href(src);
        download.set_title("Descargar imagen");
        download.set_download(&naming::download_filename(item));
        download.set_text_content(Some("⬇"));
        card.append_child(&download)?;

        self.grid.append_child(&card)?;

        let view = self.view.clone();
        let open = EventListener::new(&image, "click", move |_| {
            if let Some(view) = view.upgrade() {
                view.open(index);
            }
        });
        Ok(GalleryCard {
            _element: card,
            _open: open,
        })
    }
}

impl GalleryRenderer for DomGallery {
    type Card = Option<GalleryCard>;

    fn render_card(&mut self, index: usize, item: &GalleryItem) -> Self::Card {
        self.build_card(index, item)
            .map_err(|err| console::error!("failed to render gallery card", err))
            .ok()
    }

    fn show_empty_state(&mut self) {
        if let Some(empty) = &self.empty_state {
            dom::set_display(empty, "block");
        }
    }

    fn show_loader(&mut self, visible: bool) {
        if let Some(spinner) = &self.spinner {
            dom::set_display(spinner, if visible { "block" } else { "none" });
        }
    }
}
