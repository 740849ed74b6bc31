//! Inbound (driving) ports consumed by the application.
//!
//! - [`source`]: historical quote loading

pub mod source;
