pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::{LayoutTuning, SceneConfig};
pub use api::engine::CelestialEngine;
pub use api::error::{AssetError, EngineError};
pub use api::types::{EntityId, Viewport};
pub use assets::catalog::{Catalogs, ConstellationCatalog, PlanetCatalog};
pub use assets::provider::{AssetStatus, DrawableHandle, DrawableProvider, DrawableStatus, ManualProvider};
pub use components::constellation::Constellation;
pub use components::planet::Planet;
pub use components::star::Star;
pub use core::geometry::Rect;
pub use core::resize::ResizeAction;
pub use core::scene::Scene;
pub use core::schedule::{FrameHandle, FrameScheduler, LoopState, ManualScheduler};
pub use input::pointer::PointerSlot;
pub use renderer::color::Color;
pub use renderer::palette::{Palette, Theme};
pub use renderer::recorder::{DrawCommand, RecordingSurface};
pub use renderer::traits::{Glow, Paint, RadialGradient, Surface, TextStyle};
pub use systems::frame::FrameReport;

#[cfg(feature = "vectors")]
pub use renderer::vector::{VectorSurface, VectorVertex};
