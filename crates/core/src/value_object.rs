//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**: they are defined entirely by their
//! attribute values. `Price` and `ImageUri` in the catalog are value objects;
//! `Product` is an entity keyed by its `ProductId`.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by value. To "modify" one, build a
/// new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Price { minor_units: u64 }
///
/// impl ValueObject for Price {}
///
/// assert_eq!(Price { minor_units: 999 }, Price { minor_units: 999 });
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
