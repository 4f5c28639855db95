use std::path::Path;

/// Image types accepted as incident evidence.
pub const ALLOWED_PHOTO_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif"];

/// Reasons an uploaded photo's name or type is rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum FilenameError {
    /// Filename is empty or whitespace-only.
    Empty,
    /// Filename contains path separators (`/` or `\`).
    ContainsPathSeparator,
    /// Filename contains null bytes or other control characters.
    ControlCharacter,
    /// Filename starts with a dot (hidden file).
    Hidden,
    /// Extension or declared MIME type is not an allowed image type.
    UnsupportedType,
}

impl FilenameError {
    /// Returns a human-readable error message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Photo filename cannot be empty",
            Self::ContainsPathSeparator => {
                "Invalid photo filename: path separators are not allowed"
            }
            Self::ControlCharacter => "Invalid photo filename: control characters are not allowed",
            Self::Hidden => "Invalid photo filename: hidden files are not allowed",
            Self::UnsupportedType => "Only images are allowed (jpeg, jpg, png, gif)",
        }
    }
}

/// Validates a flat upload filename (no directory components allowed).
pub fn validate_flat_filename(filename: &str) -> Result<&str, FilenameError> {
    let trimmed = filename.trim();

    if trimmed.is_empty() {
        return Err(FilenameError::Empty);
    }

    if trimmed.chars().any(|c| c.is_control()) {
        return Err(FilenameError::ControlCharacter);
    }

    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(FilenameError::ContainsPathSeparator);
    }

    if trimmed.starts_with('.') {
        return Err(FilenameError::Hidden);
    }

    Ok(trimmed)
}

/// Check an uploaded photo and return its lowercase extension.
///
/// Both the filename extension and the declared MIME type must name an
/// allowed image type. A missing MIME type falls back to the one guessed from
/// the extension.
pub fn photo_extension(
    filename: &str,
    content_type: Option<&str>,
) -> Result<String, FilenameError> {
    let filename = validate_flat_filename(filename)?;

    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or(FilenameError::UnsupportedType)?;
    if !ALLOWED_PHOTO_EXTENSIONS.contains(&ext.as_str()) {
        return Err(FilenameError::UnsupportedType);
    }

    let mime = match content_type {
        Some(ct) => ct.to_ascii_lowercase(),
        None => mime_guess::from_ext(&ext)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_default(),
    };
    let subtype = mime
        .strip_prefix("image/")
        .map(|rest| rest.split(';').next().unwrap_or_default().trim())
        .ok_or(FilenameError::UnsupportedType)?;
    if !ALLOWED_PHOTO_EXTENSIONS.contains(&subtype) {
        return Err(FilenameError::UnsupportedType);
    }

    Ok(ext)
}
