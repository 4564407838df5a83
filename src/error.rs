/// Failure while fetching or decoding a gallery page. Every variant ends
/// pagination for the current view.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GalleryError {
    #[error("HTTP {status}")]
    Http { status: u16 },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid gallery response: {0}")]
    Decode(String),
}

/// Failure in the upload/transform flow. Validation variants carry the
/// message shown to the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error("Por favor, sube una imagen.")]
    MissingImage,
    #[error("¡Ups! Solo se permiten archivos de imagen (JPEG, PNG, etc.)")]
    NotAnImage,
    #[error("La imagen es demasiado grande. Por favor, selecciona una imagen de menos de 5MB.")]
    TooLarge { size: u64, max: u64 },
    #[error("Por favor, ingresa un nombre para tu imagen (mínimo {min} caracteres).")]
    NameTooShort { min: usize },
    #[error("{stage} HTTP {status}")]
    Http { stage: &'static str, status: u16 },
    #[error("Respuesta de /upload inválida")]
    InvalidUpload,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid transform response: {0}")]
    Decode(String),
}

impl TransformError {
    /// Validation failures are reported to the user; the rest are only logged.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::MissingImage | Self::NotAnImage | Self::TooLarge { .. } | Self::NameTooShort { .. }
        )
    }
}
