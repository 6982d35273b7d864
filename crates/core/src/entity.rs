//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// The catalog grid keys its cells off `Entity::id`, so two values with the
/// same id are treated as the same on-screen item even when their other
/// fields differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
