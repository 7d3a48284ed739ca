//! Typed Uuids

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// A [`Uuid`] tagged with the record type it identifies, so a product id and
/// a user id cannot be swapped by accident.
pub struct TypedUuid<T>(Uuid, PhantomData<T>);

impl<T> TypedUuid<T> {
    /// Wraps an existing [`Uuid`].
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, PhantomData)
    }

    /// Returns the untyped [`Uuid`].
    #[must_use]
    pub const fn into_uuid(self) -> Uuid {
        self.0
    }

    /// Generates a fresh, time-ordered id.
    #[must_use]
    pub fn generate() -> Self {
        Self::from_uuid(Uuid::now_v7())
    }

    /// Derives a stable id from a name within the given namespace.
    #[must_use]
    pub fn derived(namespace: &Uuid, name: &str) -> Self {
        Self::from_uuid(Uuid::new_v5(namespace, name.as_bytes()))
    }
}

impl<T> Clone for TypedUuid<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedUuid<T> {}

impl<T> Debug for TypedUuid<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedUuid<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for TypedUuid<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedUuid<T> {}

impl<T> Hash for TypedUuid<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for TypedUuid<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedUuid<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> From<Uuid> for TypedUuid<T> {
    fn from(value: Uuid) -> Self {
        Self::from_uuid(value)
    }
}

impl<T> From<TypedUuid<T>> for Uuid {
    fn from(value: TypedUuid<T>) -> Self {
        value.into_uuid()
    }
}

impl<T> Serialize for TypedUuid<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for TypedUuid<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(Self::from_uuid)
    }
}

#[cfg(test)]
mod tests {
    use uuid::uuid;

    use super::*;

    struct Marker;

    #[test]
    fn round_trips_through_uuid() {
        let raw = uuid!("018f5c2e-0000-7000-8000-000000000001");
        let typed = TypedUuid::<Marker>::from_uuid(raw);

        assert_eq!(typed.into_uuid(), raw);
    }

    #[test]
    fn derived_ids_are_stable() {
        let a = TypedUuid::<Marker>::derived(&Uuid::NAMESPACE_OID, "guest");
        let b = TypedUuid::<Marker>::derived(&Uuid::NAMESPACE_OID, "guest");

        assert_eq!(a, b);
    }

    #[test]
    fn serializes_as_plain_uuid() {
        let raw = uuid!("018f5c2e-0000-7000-8000-000000000001");
        let typed = TypedUuid::<Marker>::from_uuid(raw);

        let json = serde_json::to_string(&typed).expect("serialize");

        assert_eq!(json, format!("\"{raw}\""));
    }
}
