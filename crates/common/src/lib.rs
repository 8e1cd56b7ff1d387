pub mod types;

pub use types::{Envelope, EventKind};
