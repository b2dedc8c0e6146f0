pub const UPLOADS_PREFIX: &str = "/uploads/products/";
pub const PLACEHOLDER_IMAGE: &str = "/images/OIP3.jpg";

/// Paths already under uploads pass through; bare names go under the
/// products upload directory.
pub fn normalize_upload_path(reference: &str) -> String {
    if reference.starts_with("/uploads") || reference.starts_with("uploads") {
        return reference.to_string();
    }
    format!("{UPLOADS_PREFIX}{}", reference.trim_start_matches('/'))
}

/// Cover image: first of `images`, else the legacy single `image`.
pub fn resolve_main_image(images: Option<&[String]>, image: Option<&str>) -> Option<String> {
    if let Some(first) = images.and_then(|list| list.first()) {
        return Some(normalize_upload_path(first));
    }
    image
        .filter(|img| !img.is_empty())
        .map(normalize_upload_path)
}

/// Image slot of a rendered card. A failed load swaps to the placeholder
/// once; a failing placeholder is left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardImage {
    resolved: Option<String>,
    fell_back: bool,
}

impl CardImage {
    pub fn new(resolved: Option<String>) -> Self {
        let fell_back = resolved.is_none();
        Self { resolved, fell_back }
    }

    pub fn src(&self) -> &str {
        match (&self.resolved, self.fell_back) {
            (Some(path), false) => path,
            _ => PLACEHOLDER_IMAGE,
        }
    }

    /// Returns `true` when this error caused the swap.
    pub fn on_load_error(&mut self) -> bool {
        if self.fell_back {
            return false;
        }
        self.fell_back = true;
        true
    }

    pub fn showing_placeholder(&self) -> bool {
        self.fell_back
    }
}
