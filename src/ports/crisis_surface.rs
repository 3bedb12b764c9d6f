//! Crisis Surface Port - Shows crisis resources to the user.

/// Port raised when crisis language is detected.
///
/// Raising must not block and must not fail; the turn continues normally.
pub trait CrisisSurface: Send + Sync {
    fn raise(&self);
}
