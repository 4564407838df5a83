//! Upload and transform round trip for the main stage.

use serde::Deserialize;

use crate::costume;
use crate::error::TransformError;
use crate::naming;

pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
pub const MIN_DISPLAY_NAME_CHARS: usize = 5;

pub fn validate_image(mime: &str, size: u64) -> Result<(), TransformError> {
    if !mime.starts_with("image/") {
        return Err(TransformError::NotAnImage);
    }
    if size > MAX_IMAGE_BYTES {
        return Err(TransformError::TooLarge {
            size,
            max: MAX_IMAGE_BYTES,
        });
    }
    Ok(())
}

/// Returns the trimmed name.
pub fn validate_display_name(raw: &str) -> Result<String, TransformError> {
    let name = raw.trim();
    if name.chars().count() < MIN_DISPLAY_NAME_CHARS {
        return Err(TransformError::NameTooShort {
            min: MIN_DISPLAY_NAME_CHARS,
        });
    }
    Ok(name.to_string())
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub image_url: Option<String>,
}

impl UploadResponse {
    pub fn into_image_url(self) -> Result<String, TransformError> {
        self.image_url
            .filter(|url| !url.is_empty())
            .ok_or(TransformError::InvalidUpload)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRequest {
    pub image_url: String,
    pub costume: String,
    pub display_name: String,
    pub extra_prompt: Option<String>,
    pub use_thematic_bg: Option<bool>,
}

impl TransformRequest {
    /// Multipart fields in the order the backend reads them.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("image_url", self.image_url.clone()),
            ("disfraz", self.costume.clone()),
        ];
        if let Some(prompt) = self.extra_prompt.as_ref().filter(|p| !p.is_empty()) {
            fields.push(("extra_prompt", prompt.clone()));
        }
        if let Some(thematic) = self.use_thematic_bg {
            fields.push(("use_thematic_bg", if thematic { "1" } else { "0" }.to_string()));
        }
        fields.push(("display_name", self.display_name.clone()));
        fields
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AiDebug {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub changed: bool,
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransformResponse {
    #[serde(default)]
    pub data_url: Option<String>,
    #[serde(default)]
    pub transformed_image_url: Option<String>,
    #[serde(default)]
    pub poem_lines: Option<Vec<String>>,
    #[serde(default)]
    pub ai_debug: Option<AiDebug>,
}

impl TransformResponse {
    fn data_url(&self) -> Option<&str> {
        self.data_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn image_src(&self) -> Option<&str> {
        self.data_url().or(self
            .transformed_image_url
            .as_deref()
            .filter(|url| !url.is_empty()))
    }

    pub fn download_filename(&self, display_name: &str) -> String {
        naming::result_filename(
            Some(display_name),
            self.data_url().is_some(),
            self.transformed_image_url.as_deref(),
        )
    }

    pub fn narrative_lines(&self, costume_tag: &str, display_name: &str) -> Vec<String> {
        costume::poem_lines(
            costume_tag,
            display_name,
            self.poem_lines.as_deref().unwrap_or_default(),
        )
    }

    pub fn status_line(&self) -> Option<String> {
        let debug = self.ai_debug.as_ref()?;
        Some(format!(
            "IA: modelo={} | modo={} | cambio={}",
            debug.model.as_deref().unwrap_or("n/a"),
            debug.mode.as_deref().filter(|m| !m.is_empty()).unwrap_or("n/a"),
            if debug.changed { "sí" } else { "no" },
        ))
    }
}
