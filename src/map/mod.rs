//! Map interaction surface.
//!
//! [`MapSurface`] owns the point list and decides when a route must be
//! fetched; [`MapSession`] performs the geocoding and routing calls around it.

mod session;
mod surface;

pub use session::MapSession;
pub use surface::{MapSurface, Phase, Point, RouteRequest};
