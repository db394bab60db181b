pub mod builder;
pub mod geometry;
pub mod placement;
pub mod resize;
pub mod rng;
pub mod schedule;
pub mod scene;

pub use builder::{BuildContext, SceneBuilder};
pub use geometry::Rect;
pub use placement::PlacementEngine;
pub use resize::{ResizeAction, ResizePolicy};
pub use rng::Rng;
pub use schedule::{FrameHandle, FrameScheduler, LoopState, ManualScheduler};
pub use scene::Scene;
