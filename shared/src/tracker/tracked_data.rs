use std::marker::PhantomData;

use super::tracked_value::{TrackedKind, TrackedValue};

/// A Rust type that maps onto one of the registered value-type codecs
pub trait TrackedType: Copy {
    const KIND: TrackedKind;

    fn into_value(self) -> TrackedValue;
    fn from_value(value: &TrackedValue) -> Option<Self>;
}

macro_rules! impl_tracked_type {
    ($type:ty, $kind:ident) => {
        impl TrackedType for $type {
            const KIND: TrackedKind = TrackedKind::$kind;

            fn into_value(self) -> TrackedValue {
                TrackedValue::$kind(self)
            }

            fn from_value(value: &TrackedValue) -> Option<Self> {
                match value {
                    TrackedValue::$kind(v) => Some(*v),
                    _ => None,
                }
            }
        }
    };
}

impl_tracked_type!(bool, Bool);
impl_tracked_type!(i8, Int8);
impl_tracked_type!(u64, VarUint);
impl_tracked_type!(f32, Float);
impl_tracked_type!(f64, Double);

/// Typed key into an entity class's slot table.
///
/// Slot ids are assigned as contiguous constants per entity class, base-class
/// slots first, so a subclass's keys never collide with its base's. Keys are
/// declared `const` next to the entity layout that owns them.
pub struct TrackedData<T: TrackedType> {
    slot: u8,
    phantom: PhantomData<T>,
}

impl<T: TrackedType> TrackedData<T> {
    pub const fn new(slot: u8) -> Self {
        Self {
            slot,
            phantom: PhantomData,
        }
    }

    pub fn slot(&self) -> u8 {
        self.slot
    }

    pub fn kind(&self) -> TrackedKind {
        T::KIND
    }
}

impl<T: TrackedType> Clone for TrackedData<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: TrackedType> Copy for TrackedData<T> {}
