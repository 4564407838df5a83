//! Infinite-scroll gallery loader.
//!
//! The loader is split around the network call: [`GalleryLoader::begin_fetch`]
//! claims the fetch and yields the request, the caller performs it, and
//! [`GalleryLoader::complete_fetch`] applies the result. No borrow of the
//! loader has to live across the await.

use crate::error::GalleryError;
use crate::model::{GalleryItem, GalleryPage};
use crate::pagination::{PageRequest, PaginationState};

/// Display surface for gallery cards.
pub trait GalleryRenderer {
    /// Handle kept alive for as long as the card is shown.
    type Card;

    fn render_card(&mut self, index: usize, item: &GalleryItem) -> Self::Card;
    fn show_empty_state(&mut self);
    fn show_loader(&mut self, visible: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Rendered { count: usize },
    Exhausted,
    Failed,
}

pub struct GalleryLoader<R: GalleryRenderer> {
    state: PaginationState,
    items: Vec<GalleryItem>,
    cards: Vec<R::Card>,
    renderer: R,
}

impl<R: GalleryRenderer> GalleryLoader<R> {
    pub fn new(renderer: R, page_size: u32) -> Self {
        Self {
            state: PaginationState::new(page_size),
            items: Vec::new(),
            cards: Vec::new(),
            renderer,
        }
    }

    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Every item rendered so far, in display order.
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn cards(&self) -> &[R::Card] {
        &self.cards
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn begin_fetch(&mut self) -> Option<PageRequest> {
        let request = self.state.begin()?;
        self.renderer.show_loader(true);
        Some(request)
    }

    pub fn complete_fetch(&mut self, result: Result<GalleryPage, GalleryError>) -> FetchOutcome {
        let outcome = match result {
            Ok(page) => self.apply_page(page),
            Err(_) => {
                self.end_with_empty_state();
                FetchOutcome::Failed
            }
        };
        self.state.finish();
        self.renderer.show_loader(false);
        outcome
    }

    fn apply_page(&mut self, page: GalleryPage) -> FetchOutcome {
        let first_page = self.state.mode().is_none();
        self.state.detect_mode(&page);
        if page.items.is_empty() {
            self.end_with_empty_state();
            return FetchOutcome::Exhausted;
        }

        let mut count = 0;
        for item in page.renderable() {
            let index = self.items.len();
            let card = self.renderer.render_card(index, item);
            self.items.push(item.clone());
            self.cards.push(card);
            count += 1;
        }

        if first_page && self.items.is_empty() {
            self.end_with_empty_state();
            return FetchOutcome::Exhausted;
        }

        self.state.advance(&page);
        FetchOutcome::Rendered { count }
    }

    fn end_with_empty_state(&mut self) {
        if self.items.is_empty() {
            self.renderer.show_empty_state();
        }
        self.state.mark_end();
    }
}
