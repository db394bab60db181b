pub mod config;
pub mod engine;
pub mod error;
pub mod types;

pub use config::{LayoutTuning, SceneConfig};
pub use engine::CelestialEngine;
pub use error::{AssetError, EngineError};
pub use types::{EntityId, EntityIds, Viewport};
