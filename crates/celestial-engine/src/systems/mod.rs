pub mod draw;
pub mod frame;
pub mod hover;

pub use draw::DrawAssets;
pub use frame::{run_frame, FrameInput, FrameReport};
pub use hover::{update_hover, HoverSummary};
