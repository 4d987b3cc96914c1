//! Geographic coordinate handling.

mod projection;

pub use projection::MapProjection;
