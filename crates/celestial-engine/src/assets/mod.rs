pub mod catalog;
pub mod provider;

pub use catalog::{
    BodyColors, Catalogs, ConstellationCatalog, ConstellationPattern, PatternPoint, PlanetCatalog,
    PlanetSpec, SilhouetteAnchor, SilhouetteSpec,
};
pub use provider::{
    AssetStatus, AssetTracker, DrawableHandle, DrawableProvider, DrawableStatus, ManualProvider,
};
