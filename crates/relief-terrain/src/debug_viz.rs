//! Debug visualization: heightmaps rendered to RGBA images.
//!
//! Used for quick visual checks of generator output, such as seams between
//! stitched tiles or the effect of a roughness change. These images are a
//! diagnostic aid, not a storage format.

mod image;
mod renderers;

pub use self::image::{DebugImage, Rgba};
pub use renderers::{PreviewStyle, height_to_color, render_grayscale, render_heightmap_debug, render_preview};
