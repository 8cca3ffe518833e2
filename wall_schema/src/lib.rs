pub mod model;
pub mod script;

pub use model::{BodyPart, Descendants, WallId, WallNode, WallSpec, HIT_POINT_PREFIX};
pub use script::{SessionScript, Strike};
