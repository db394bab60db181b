pub mod constellation;
pub mod hover;
pub mod planet;
pub mod star;

pub use constellation::{Constellation, PlacedStar, SilhouetteProjection};
pub use hover::HoverEase;
pub use planet::Planet;
pub use star::Star;
