use crate::model::GalleryItem;

pub const DEFAULT_BASE_NAME: &str = "imagen";
pub const DEFAULT_EXTENSION: &str = "png";

/// Lowercases `name` and collapses every run of characters outside
/// `[a-z0-9_-]` into one hyphen, trimming hyphens at both ends.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_run = false;
    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' || ch == '-' {
            slug.push(ch);
            in_run = false;
        } else if !in_run {
            slug.push('-');
            in_run = true;
        }
    }
    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        DEFAULT_BASE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Extension of the last path segment of `url`, ignoring query and fragment.
pub fn image_extension(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or("");
    let segment = path.rsplit('/').next().unwrap_or("");
    match segment.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            ext.to_ascii_lowercase()
        }
        _ => DEFAULT_EXTENSION.to_string(),
    }
}

/// File name for a result image. Inline `data:` results are always WebP.
pub fn result_filename(display_name: Option<&str>, has_data_url: bool, image_url: Option<&str>) -> String {
    let base = slugify(display_name.unwrap_or(DEFAULT_BASE_NAME));
    let ext = if has_data_url {
        "webp".to_string()
    } else {
        image_url.map(image_extension).unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
    };
    format!("{base}.{ext}")
}

pub fn download_filename(item: &GalleryItem) -> String {
    if let Some(name) = &item.suggested_name {
        return name.clone();
    }
    result_filename(
        item.display_name.as_deref(),
        item.data_url.is_some(),
        item.image_url.as_deref(),
    )
}
