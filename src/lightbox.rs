//! Full-view overlay over the accumulated gallery items.

use crate::config::AppConfig;
use crate::costume::{self, Costume};
use crate::model::GalleryItem;
use crate::naming;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxCommand {
    Close,
    Next,
    Prev,
}

impl LightboxCommand {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(Self::Close),
            "ArrowRight" => Some(Self::Next),
            "ArrowLeft" => Some(Self::Prev),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: String,
    pub filename: String,
}

/// Poem panel and sound for an item tagged with a costume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    pub tag: String,
    pub costume: Option<Costume>,
    pub title: String,
    pub lines: Vec<String>,
    pub display_name: String,
    pub image_src: String,
    pub sound: Option<String>,
}

impl Narrative {
    pub fn for_item(item: &GalleryItem, config: &AppConfig) -> Option<Self> {
        let tag = item.disfraz.clone()?;
        let display_name = item.display_name.clone().unwrap_or_default();
        let costume = Costume::from_tag(&tag);
        Some(Self {
            title: costume::narrative_title(&tag, &display_name),
            lines: costume::poem_lines(&tag, &display_name, &item.poem_lines),
            sound: costume.map(|c| config.sound_path(&c.sound_file())),
            image_src: item.image_src().unwrap_or_default().to_string(),
            costume,
            display_name,
            tag,
        })
    }

    pub fn markup(&self) -> String {
        costume::brochure_markup(&self.tag, &self.display_name, &self.image_src, &self.lines)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxView {
    pub index: usize,
    pub image_src: String,
    pub caption: String,
    pub download: DownloadLink,
    pub narrative: Option<Narrative>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightboxTransition {
    Show(LightboxView),
    Hide,
    Ignore,
}

#[derive(Debug, Clone, Default)]
pub struct Lightbox {
    current: Option<usize>,
    config: AppConfig,
}

impl Lightbox {
    pub fn new(config: AppConfig) -> Self {
        Self {
            current: None,
            config,
        }
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn open(&mut self, items: &[GalleryItem], index: usize) -> Option<LightboxView> {
        let item = items.get(index)?;
        let image_src = item.image_src()?.to_string();
        self.current = Some(index);
        Some(LightboxView {
            index,
            download: DownloadLink {
                href: image_src.clone(),
                filename: naming::download_filename(item),
            },
            caption: item.display_name.clone().unwrap_or_default(),
            narrative: Narrative::for_item(item, &self.config),
            image_src,
        })
    }

    pub fn next(&mut self, items: &[GalleryItem]) -> Option<LightboxView> {
        let current = self.current?;
        if items.is_empty() {
            return None;
        }
        self.open(items, (current + 1) % items.len())
    }

    pub fn prev(&mut self, items: &[GalleryItem]) -> Option<LightboxView> {
        let current = self.current?;
        if items.is_empty() {
            return None;
        }
        self.open(items, (current + items.len() - 1) % items.len())
    }

    /// Returns whether anything was open.
    pub fn close(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub fn handle(&mut self, items: &[GalleryItem], command: LightboxCommand) -> LightboxTransition {
        if !self.is_open() {
            return LightboxTransition::Ignore;
        }
        let view = match command {
            LightboxCommand::Close => {
                self.close();
                return LightboxTransition::Hide;
            }
            LightboxCommand::Next => self.next(items),
            LightboxCommand::Prev => self.prev(items),
        };
        view.map_or(LightboxTransition::Ignore, LightboxTransition::Show)
    }
}

/// True once the lightbox content is scrolled to its bottom, where the
/// "more below" fade is hidden.
pub fn scroll_fade_hidden(scroll_top: f64, client_height: f64, scroll_height: f64) -> bool {
    scroll_top + client_height >= scroll_height - 2.0
}
