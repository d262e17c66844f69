//! Host hooks for fonts and images referenced by style sheets.

use css_values::{FontHandle, ImageHandle};

/// Loads the resources named by `-unity-font`, `background-image` and `cursor`.
///
/// `path` is a resource path (`resource("...")`) or an asset path
/// (`url("...")`). Returning `None` marks the resource as missing.
pub trait ResourceProvider {
    fn load_font(&self, path: &str) -> Option<FontHandle>;

    /// `dpi_scale` lets the host pick a resolution variant of the image.
    fn load_image(&self, path: &str, dpi_scale: f32) -> Option<ImageHandle>;
}

/// A provider that has nothing: every font and image is missing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoResources;

impl ResourceProvider for NoResources {
    fn load_font(&self, _path: &str) -> Option<FontHandle> {
        None
    }

    fn load_image(&self, _path: &str, _dpi_scale: f32) -> Option<ImageHandle> {
        None
    }
}
