//! Re-export tracing macros for use throughout the crate

pub use tracing::{debug, error, info, trace, warn};
