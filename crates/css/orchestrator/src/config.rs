use css_variables::MAX_RESOLVES;

/// Tunables of a [`crate::CascadeEngine`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CascadeConfig {
    /// Scale handed to the resource provider when loading images. Part of the
    /// style cache key.
    pub dpi_scale: f32,
    /// Budget of `var()` substitutions per declaration.
    pub max_variable_resolves: usize,
    /// Share bundles between elements with the same matched rules.
    pub share_styles: bool,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            dpi_scale: 1.0,
            max_variable_resolves: MAX_RESOLVES,
            share_styles: true,
        }
    }
}

impl CascadeConfig {
    /// Scale passed to image loads. Changing it on a live engine goes
    /// through [`crate::CascadeEngine::set_dpi_scale`] instead.
    #[must_use]
    pub fn with_dpi_scale(mut self, dpi_scale: f32) -> Self {
        self.dpi_scale = dpi_scale;
        self
    }

    /// Declarations needing more `var()` lookups than this become `unset`.
    #[must_use]
    pub fn with_max_variable_resolves(mut self, max_variable_resolves: usize) -> Self {
        self.max_variable_resolves = max_variable_resolves;
        self
    }

    /// With sharing off every element gets a bundle of its own and nothing
    /// is cached.
    #[must_use]
    pub fn with_share_styles(mut self, share_styles: bool) -> Self {
        self.share_styles = share_styles;
        self
    }
}
