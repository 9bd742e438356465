//! Delivery-time image transformations.

/// Edge length of the admin thumbnail, in pixels.
pub const THUMBNAIL_SIZE: u32 = 300;

/// An auto-cropped, auto-gravity resize with automatic format and quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transformation {
    pub width: u32,
    pub height: u32,
}

impl Transformation {
    /// Crop to exactly `width` x `height`, letting the CDN pick the focus.
    pub fn fill(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Square thumbnail shown in the image manager.
    pub fn thumbnail() -> Self {
        Self::fill(THUMBNAIL_SIZE, THUMBNAIL_SIZE)
    }

    /// URL path segments for this transformation.
    pub fn to_path(&self) -> String {
        format!(
            "c_auto,g_auto,h_{},w_{}/f_auto/q_auto",
            self.height, self.width
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_is_square() {
        assert_eq!(
            Transformation::thumbnail().to_path(),
            "c_auto,g_auto,h_300,w_300/f_auto/q_auto"
        );
    }
}
