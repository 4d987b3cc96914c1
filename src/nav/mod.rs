//! Navigation: the URL fragment codec, the fragment <-> viewport
//! synchronizer, the verification route, and browser location glue.

pub mod fragment;
pub mod location;
mod sync;
mod verify;

pub use sync::LocationSync;
pub use verify::verification_token;
