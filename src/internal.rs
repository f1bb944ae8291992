/// Prevents outside crates from implementing traits like
/// [`Marker`](crate::types::id::marker::Marker).
pub trait Sealed {}
