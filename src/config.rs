//! Runtime configuration with string-keyed overrides.
//!
//! Defaults match the backend the client ships with. In the browser the
//! override lookup is backed by `localStorage`, so a deployment can be poked
//! without rebuilding the bundle.

pub const GALLERY_ENDPOINT_KEY: &str = "costume.gallery.endpoint";
pub const PAGE_SIZE_KEY: &str = "costume.gallery.page_size";
pub const PREFETCH_KEY: &str = "costume.gallery.prefetch_px";
pub const MAX_EMBERS_KEY: &str = "costume.effects.max_embers";
pub const MAX_SMOKE_KEY: &str = "costume.effects.max_smoke";
pub const SOUND_BASE_KEY: &str = "costume.sound_base";

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryConfig {
    pub endpoint: String,
    pub page_size: u32,
    /// Distance below the viewport at which the next page is requested.
    pub prefetch_margin_px: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            endpoint: "/api/gallery".to_string(),
            page_size: 24,
            prefetch_margin_px: 600,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectConfig {
    pub max_embers: usize,
    pub max_smoke: usize,
    pub corner_radius: f64,
    /// Upper bound for one frame step, in seconds.
    pub max_dt: f64,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            max_embers: 120,
            max_smoke: 22,
            corner_radius: 10.0,
            max_dt: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub gallery: GalleryConfig,
    pub effects: EffectConfig,
    pub sound_base: String,
    pub upload_endpoint: String,
    pub transform_endpoint: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gallery: GalleryConfig::default(),
            effects: EffectConfig::default(),
            sound_base: "static/sounds".to_string(),
            upload_endpoint: "/upload".to_string(),
            transform_endpoint: "/transform".to_string(),
        }
    }
}

impl AppConfig {
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        if let Some(endpoint) = read(GALLERY_ENDPOINT_KEY) {
            self.gallery.endpoint = endpoint;
        }
        if let Some(size) = read(PAGE_SIZE_KEY).and_then(|v| v.parse::<u32>().ok()) {
            if size > 0 {
                self.gallery.page_size = size;
            }
        }
        if let Some(margin) = read(PREFETCH_KEY).and_then(|v| v.parse::<u32>().ok()) {
            self.gallery.prefetch_margin_px = margin;
        }
        if let Some(max) = read(MAX_EMBERS_KEY).and_then(|v| v.parse::<usize>().ok()) {
            self.effects.max_embers = max;
        }
        if let Some(max) = read(MAX_SMOKE_KEY).and_then(|v| v.parse::<usize>().ok()) {
            self.effects.max_smoke = max;
        }
        if let Some(base) = read(SOUND_BASE_KEY) {
            self.sound_base = base.trim_end_matches('/').to_string();
        }
        self
    }

    pub fn sound_path(&self, file: &str) -> String {
        format!("{}/{}", self.sound_base, file)
    }
}
