pub mod color;
pub mod palette;
pub mod recorder;
pub mod traits;
#[cfg(feature = "vectors")]
pub mod vector;

// Re-export key types for convenient access
pub use color::Color;
pub use palette::{Palette, Theme};
pub use recorder::{DrawCommand, RecordingSurface};
pub use traits::{FontFace, GradientStop, Glow, Paint, RadialGradient, Surface, TextAlign, TextStyle};
#[cfg(feature = "vectors")]
pub use vector::{Blit, Label, VectorSurface, VectorVertex};
