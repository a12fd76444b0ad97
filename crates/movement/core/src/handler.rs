//! Keyed registries of stackable elements.
//!
//! A handler owns a map from caller-supplied ids to elements and derives a
//! single quantity from them on demand. The scalar and vector cases share
//! one implementation; [`SpeedHandler`] and [`DirectionHandler`] are the
//! two instantiations the movement layer composes.

use core::fmt;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

use glam::Vec3;

use crate::element::StackableElement;
use crate::error::HandlerError;
use crate::value::ElementValue;

/// Scalar registry: aggregates to a single `f32` speed.
pub type SpeedHandler<I> = StackHandler<I, f32>;

/// Vector registry: aggregates to a single `Vec3` direction/offset.
pub type DirectionHandler<I> = StackHandler<I, Vec3>;

/// A keyed registry of stackable elements of one magnitude kind.
///
/// The registry exclusively owns its elements: removing an entry (or
/// dropping the handler) destroys the element. Ids are unique — adding
/// under an occupied id is refused, never an overwrite.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(
    serialize = "I: serde::Serialize, V: serde::Serialize",
    deserialize = "I: serde::Deserialize<'de> + Eq + Hash, V: serde::Deserialize<'de>"
)))]
pub struct StackHandler<I, V: ElementValue> {
    elements: HashMap<I, StackableElement<V>>,
}

impl<I, V: ElementValue> Default for StackHandler<I, V> {
    fn default() -> Self {
        Self {
            elements: HashMap::new(),
        }
    }
}

impl<I, V> StackHandler<I, V>
where
    I: Eq + Hash + Clone + fmt::Debug,
    V: ElementValue,
{
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered elements, including those at stack 0.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements currently contributing, i.e. with a nonzero stack.
    pub fn active_len(&self) -> usize {
        self.elements.values().filter(|e| e.stack() != 0).count()
    }

    /// Whether an element is registered under `id`.
    pub fn contains(&self, id: &I) -> bool {
        self.elements.contains_key(id)
    }

    /// Register an element under `id`.
    ///
    /// Returns false — and leaves the existing element untouched — when the
    /// id is already taken.
    pub fn try_add(&mut self, id: I, element: StackableElement<V>) -> bool {
        match self.elements.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                tracing::debug!(id = ?slot.key(), "element registered");
                slot.insert(element);
                true
            }
        }
    }

    /// Remove the element under `id`. Returns false if the id is absent.
    pub fn remove(&mut self, id: &I) -> bool {
        let removed = self.elements.remove(id).is_some();
        if removed {
            tracing::debug!(?id, "element removed");
        }
        removed
    }

    /// Look up the element under `id`.
    ///
    /// # Errors
    ///
    /// [`HandlerError::NotFound`] if the id is absent.
    pub fn get(&self, id: &I) -> Result<&StackableElement<V>, HandlerError<I>> {
        self.elements
            .get(id)
            .ok_or_else(|| HandlerError::NotFound { id: id.clone() })
    }

    /// Mutable lookup, for element mutations beyond `set_stack`.
    ///
    /// # Errors
    ///
    /// [`HandlerError::NotFound`] if the id is absent.
    pub fn get_mut(&mut self, id: &I) -> Result<&mut StackableElement<V>, HandlerError<I>> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| HandlerError::NotFound { id: id.clone() })
    }

    /// Set the stack of the element under `id`.
    ///
    /// # Errors
    ///
    /// [`HandlerError::NotFound`] if the id is absent; a delegated
    /// [`ElementError::StackOutOfBound`](crate::ElementError::StackOutOfBound)
    /// if the element rejects the count.
    pub fn set_stack(&mut self, id: &I, stack: i32) -> Result<(), HandlerError<I>> {
        let element = self
            .elements
            .get_mut(id)
            .ok_or_else(|| HandlerError::NotFound { id: id.clone() })?;
        element.set_stack(stack)?;
        Ok(())
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        tracing::debug!(count = self.elements.len(), "registry cleared");
        self.elements.clear();
    }

    /// Iterate over `(id, element)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&I, &StackableElement<V>)> {
        self.elements.iter()
    }

    /// Sum of `value × stack` over all registered elements.
    ///
    /// A pure read: the zero value for an empty registry, and otherwise the
    /// commutative sum of every element's contribution. Because elements
    /// are iterated in map order, bit-exact float reproducibility across
    /// different insertion histories is not guaranteed — only the
    /// mathematical sum is.
    pub fn aggregate(&self) -> V {
        let total = self
            .elements
            .values()
            .fold(V::ZERO, |acc, element| acc + element.overall_value());
        tracing::trace!(elements = self.elements.len(), "aggregate computed");
        total
    }
}
