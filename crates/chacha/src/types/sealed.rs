//! Sealed trait pattern support
//!
//! Keeps algorithm compatibility markers closed to downstream impls.

/// Marker supertrait for traits that must not be implemented outside
/// this crate
pub trait Sealed {}
