//! Dual-mode pagination for the gallery endpoint.
//!
//! The backend pages either by opaque cursor or by numeric offset and does not
//! say which. The first successful response is classified once and the mode
//! sticks for the rest of the view.

use url::form_urlencoded;

use crate::model::GalleryPage;

pub const DEFAULT_PAGE_SIZE: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    OffsetBased,
    CursorBased,
    /// No explicit `next_offset` was sent. Requests page by offset, but a short
    /// page is taken as the last one.
    OffsetGuess,
}

impl PaginationMode {
    pub fn classify(page: &GalleryPage) -> Self {
        if page.next_cursor.is_present() {
            Self::CursorBased
        } else if !page.next_offset.is_present() {
            Self::OffsetGuess
        } else {
            Self::OffsetBased
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagePosition {
    Offset(u64),
    Cursor(String),
    /// Cursor mode without a cursor in hand: only `limit` is sent.
    Head,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u32,
    pub position: PagePosition,
}

impl PageRequest {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("limit", self.limit.to_string())];
        match &self.position {
            PagePosition::Offset(offset) => pairs.push(("offset", offset.to_string())),
            PagePosition::Cursor(cursor) => pairs.push(("cursor", cursor.clone())),
            PagePosition::Head => {}
        }
        pairs
    }

    pub fn url(&self, endpoint: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs())
            .finish();
        format!("{endpoint}?{query}")
    }
}

/// Cursor, offset and guard flags for one gallery view.
#[derive(Debug, Clone)]
pub struct PaginationState {
    mode: Option<PaginationMode>,
    cursor: Option<String>,
    offset: u64,
    end_reached: bool,
    in_flight: bool,
    limit: u32,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationState {
    pub fn new(limit: u32) -> Self {
        Self {
            mode: None,
            cursor: None,
            offset: 0,
            end_reached: false,
            in_flight: false,
            limit: limit.max(1),
        }
    }

    pub fn mode(&self) -> Option<PaginationMode> {
        self.mode
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn end_reached(&self) -> bool {
        self.end_reached
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Claims the next fetch. Returns `None` while another fetch is running or
    /// once the end has been reached.
    pub fn begin(&mut self) -> Option<PageRequest> {
        if self.in_flight || self.end_reached {
            return None;
        }
        self.in_flight = true;
        let position = match (self.mode, &self.cursor) {
            (Some(PaginationMode::CursorBased), Some(cursor)) => {
                PagePosition::Cursor(cursor.clone())
            }
            (Some(PaginationMode::CursorBased), None) => PagePosition::Head,
            _ => PagePosition::Offset(self.offset),
        };
        Some(PageRequest {
            limit: self.limit,
            position,
        })
    }

    /// Classifies the mode on the first response and keeps it afterwards.
    pub fn detect_mode(&mut self, page: &GalleryPage) -> PaginationMode {
        *self.mode.get_or_insert_with(|| PaginationMode::classify(page))
    }

    /// Updates cursor/offset from a page that carried items.
    pub fn advance(&mut self, page: &GalleryPage) {
        let returned = page.returned() as u64;
        let short_page = returned < u64::from(self.limit);
        match self.detect_mode(page) {
            PaginationMode::CursorBased => {
                self.cursor = page
                    .next_cursor
                    .value()
                    .filter(|cursor| !cursor.is_empty())
                    .cloned();
                if self.cursor.is_none() || short_page {
                    self.end_reached = true;
                }
            }
            mode @ (PaginationMode::OffsetBased | PaginationMode::OffsetGuess) => {
                let next = page
                    .next_offset
                    .value()
                    .copied()
                    .unwrap_or(self.offset + returned);
                if next == self.offset {
                    self.end_reached = true;
                    return;
                }
                self.offset = next;
                if mode == PaginationMode::OffsetGuess
                    && short_page
                    && !page.next_offset.is_present()
                {
                    self.end_reached = true;
                }
            }
        }
    }

    pub fn mark_end(&mut self) {
        self.end_reached = true;
    }

    pub fn finish(&mut self) {
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;
    use pretty_assertions::assert_eq;

    fn page(json: &str) -> GalleryPage {
        GalleryPage::from_json(json).unwrap()
    }

    #[test]
    fn classifies_by_field_presence() {
        assert_eq!(
            PaginationMode::classify(&page(r#"{"items":[],"next_cursor":null,"next_offset":3}"#)),
            PaginationMode::CursorBased
        );
        assert_eq!(
            PaginationMode::classify(&page(r#"{"items":[]}"#)),
            PaginationMode::OffsetGuess
        );
        assert_eq!(
            PaginationMode::classify(&page(r#"{"items":[],"next_offset":null}"#)),
            PaginationMode::OffsetBased
        );
    }

    #[test]
    fn begin_guards_reentry() {
        let mut state = PaginationState::new(24);
        let request = state.begin().unwrap();
        assert_eq!(request.position, PagePosition::Offset(0));
        assert!(state.begin().is_none());
        state.finish();
        state.mark_end();
        assert!(state.begin().is_none());
    }

    #[test]
    fn url_encodes_cursor() {
        let request = PageRequest {
            limit: 24,
            position: PagePosition::Cursor("2024-10-31T23:59:59+00:00".to_string()),
        };
        assert_eq!(
            request.url("/api/gallery"),
            "/api/gallery?limit=24&cursor=2024-10-31T23%3A59%3A59%2B00%3A00"
        );
    }

    #[test]
    fn cursor_mode_without_cursor_sends_only_limit() {
        let request = PageRequest {
            limit: 10,
            position: PagePosition::Head,
        };
        assert_eq!(request.url("/g"), "/g?limit=10");
    }

    #[test]
    fn offset_guess_ends_on_short_page() {
        let mut state = PaginationState::new(4);
        state.begin();
        let short = GalleryPage {
            items: vec![None, None],
            next_cursor: Field::Absent,
            next_offset: Field::Absent,
        };
        state.advance(&short);
        assert_eq!(state.mode(), Some(PaginationMode::OffsetGuess));
        assert_eq!(state.offset(), 2);
        assert!(state.end_reached());
    }

    #[test]
    fn offset_guess_continues_on_full_page() {
        let mut state = PaginationState::new(2);
        state.begin();
        let full = GalleryPage {
            items: vec![None, None],
            ..GalleryPage::default()
        };
        state.advance(&full);
        state.finish();
        assert_eq!(state.offset(), 2);
        assert!(!state.end_reached());
        assert_eq!(state.begin().unwrap().position, PagePosition::Offset(2));
    }
}
