//! Composite movement built from independently owned sub-aggregates.
//!
//! A [`MovementEntry`] couples a velocity source with an active flag; a
//! [`MovementHandler`] owns many entries and folds the active ones into a
//! single velocity. Each entry's sub-registries are exclusively owned by
//! that entry, so a knockback's speed modifiers can never bleed into the
//! walk entry's.

use core::fmt;
use core::ops::{Add, Sub};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

use glam::Vec3;

use crate::error::HandlerError;
use crate::handler::{DirectionHandler, SpeedHandler};

/// Where a movement entry's velocity comes from.
///
/// Simple motion (a knockback impulse, a scripted dash) uses [`Fixed`].
/// Motion whose speed or heading is itself composed of modifiers owns its
/// sub-registries via [`Aggregated`].
///
/// [`Fixed`]: VelocitySource::Fixed
/// [`Aggregated`]: VelocitySource::Aggregated
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(
    serialize = "I: serde::Serialize",
    deserialize = "I: serde::Deserialize<'de> + Eq + std::hash::Hash"
)))]
pub enum VelocitySource<I> {
    /// A constant scalar speed along a constant direction.
    Fixed { speed: f32, direction: Vec3 },

    /// Speed and direction each derived from their own registry.
    Aggregated {
        speeds: SpeedHandler<I>,
        directions: DirectionHandler<I>,
    },
}

impl<I> VelocitySource<I>
where
    I: Eq + Hash + Clone + fmt::Debug,
{
    /// The scalar speed this source currently resolves to.
    pub fn speed(&self) -> f32 {
        match self {
            Self::Fixed { speed, .. } => *speed,
            Self::Aggregated { speeds, .. } => speeds.aggregate(),
        }
    }

    /// The direction this source currently resolves to.
    pub fn direction(&self) -> Vec3 {
        match self {
            Self::Fixed { direction, .. } => *direction,
            Self::Aggregated { directions, .. } => directions.aggregate(),
        }
    }

    /// `direction × speed`, the source's current velocity.
    pub fn velocity(&self) -> Vec3 {
        self.direction() * self.speed()
    }
}

/// One contribution to an entity's final velocity.
///
/// Equality compares what the entry contributes — derived speed and derived
/// direction. The active flag is scheduling state and is intentionally not
/// part of equality: a paused knockback still *is* the same knockback.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(
    serialize = "I: serde::Serialize",
    deserialize = "I: serde::Deserialize<'de> + Eq + std::hash::Hash"
)))]
pub struct MovementEntry<I> {
    source: VelocitySource<I>,
    is_active: bool,
}

impl<I> MovementEntry<I>
where
    I: Eq + Hash + Clone + fmt::Debug,
{
    /// Active entry with a constant speed and direction.
    pub fn fixed(speed: f32, direction: Vec3) -> Self {
        Self {
            source: VelocitySource::Fixed { speed, direction },
            is_active: true,
        }
    }

    /// Active entry deriving speed and direction from the given registries.
    pub fn aggregated(speeds: SpeedHandler<I>, directions: DirectionHandler<I>) -> Self {
        Self {
            source: VelocitySource::Aggregated { speeds, directions },
            is_active: true,
        }
    }

    /// Active entry whose registries are seeded with a single applied base
    /// speed and base direction, ready to be stacked against.
    pub fn with_base(speed_id: I, speed: f32, direction_id: I, direction: Vec3) -> Self {
        use crate::element::StackableElement;

        let mut speeds = SpeedHandler::new();
        speeds.try_add(speed_id, StackableElement::exclusive_on(speed));
        let mut directions = DirectionHandler::new();
        directions.try_add(direction_id, StackableElement::exclusive_on(direction));

        Self::aggregated(speeds, directions)
    }

    /// Override the active flag (builder pattern).
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }

    pub fn source(&self) -> &VelocitySource<I> {
        &self.source
    }

    /// The speed sub-registry, if this entry aggregates one.
    pub fn speeds(&self) -> Option<&SpeedHandler<I>> {
        match &self.source {
            VelocitySource::Aggregated { speeds, .. } => Some(speeds),
            VelocitySource::Fixed { .. } => None,
        }
    }

    pub fn speeds_mut(&mut self) -> Option<&mut SpeedHandler<I>> {
        match &mut self.source {
            VelocitySource::Aggregated { speeds, .. } => Some(speeds),
            VelocitySource::Fixed { .. } => None,
        }
    }

    /// The direction sub-registry, if this entry aggregates one.
    pub fn directions(&self) -> Option<&DirectionHandler<I>> {
        match &self.source {
            VelocitySource::Aggregated { directions, .. } => Some(directions),
            VelocitySource::Fixed { .. } => None,
        }
    }

    pub fn directions_mut(&mut self) -> Option<&mut DirectionHandler<I>> {
        match &mut self.source {
            VelocitySource::Aggregated { directions, .. } => Some(directions),
            VelocitySource::Fixed { .. } => None,
        }
    }

    pub fn speed(&self) -> f32 {
        self.source.speed()
    }

    pub fn direction(&self) -> Vec3 {
        self.source.direction()
    }

    /// The entry's current velocity, ignoring the active flag.
    pub fn velocity(&self) -> Vec3 {
        self.source.velocity()
    }
}

impl<I> PartialEq for MovementEntry<I>
where
    I: Eq + Hash + Clone + fmt::Debug,
{
    fn eq(&self, other: &Self) -> bool {
        self.speed() == other.speed() && self.direction() == other.direction()
    }
}

impl<I> Add for &MovementEntry<I>
where
    I: Eq + Hash + Clone + fmt::Debug,
{
    type Output = Vec3;

    /// Combined velocity of two entries, active or not.
    fn add(self, rhs: Self) -> Vec3 {
        self.velocity() + rhs.velocity()
    }
}

impl<I> Sub for &MovementEntry<I>
where
    I: Eq + Hash + Clone + fmt::Debug,
{
    type Output = Vec3;

    /// Velocity difference between two entries, active or not.
    fn sub(self, rhs: Self) -> Vec3 {
        self.velocity() - rhs.velocity()
    }
}

impl<I> fmt::Display for MovementEntry<I>
where
    I: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "speed {} along {} ({})",
            self.speed(),
            self.direction(),
            if self.is_active { "active" } else { "inactive" }
        )
    }
}

/// Keyed registry of movement entries.
///
/// `K` identifies entries; `I` identifies elements inside each entry's
/// sub-registries. The two are independent — a handler keyed by movement
/// kind can hold entries whose sub-registries are keyed by buff id.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(
    serialize = "K: serde::Serialize, I: serde::Serialize",
    deserialize = "K: serde::Deserialize<'de> + Eq + std::hash::Hash, \
                   I: serde::Deserialize<'de> + Eq + std::hash::Hash"
)))]
pub struct MovementHandler<K, I> {
    entries: HashMap<K, MovementEntry<I>>,
}

impl<K, I> Default for MovementHandler<K, I> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K, I> MovementHandler<K, I>
where
    K: Eq + Hash + Clone + fmt::Debug,
    I: Eq + Hash + Clone + fmt::Debug,
{
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, active or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries currently included in velocity calculation.
    pub fn active_len(&self) -> usize {
        self.entries.values().filter(|e| e.is_active()).count()
    }

    /// Whether an entry is registered under `id`.
    pub fn contains(&self, id: &K) -> bool {
        self.entries.contains_key(id)
    }

    /// Register an entry under `id`.
    ///
    /// Returns false — and leaves the existing entry untouched — when the
    /// id is already taken.
    pub fn try_add(&mut self, id: K, entry: MovementEntry<I>) -> bool {
        match self.entries.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                tracing::debug!(id = ?slot.key(), "movement entry registered");
                slot.insert(entry);
                true
            }
        }
    }

    /// Remove the entry under `id`. Returns false if the id is absent.
    pub fn try_remove(&mut self, id: &K) -> bool {
        let removed = self.entries.remove(id).is_some();
        if removed {
            tracing::debug!(?id, "movement entry removed");
        }
        removed
    }

    /// Look up the entry under `id`.
    ///
    /// # Errors
    ///
    /// [`HandlerError::NotFound`] if the id is absent.
    pub fn get(&self, id: &K) -> Result<&MovementEntry<I>, HandlerError<K>> {
        self.entries
            .get(id)
            .ok_or_else(|| HandlerError::NotFound { id: id.clone() })
    }

    /// Mutable lookup, for driving an entry's sub-registries.
    ///
    /// # Errors
    ///
    /// [`HandlerError::NotFound`] if the id is absent.
    pub fn get_mut(&mut self, id: &K) -> Result<&mut MovementEntry<I>, HandlerError<K>> {
        self.entries
            .get_mut(id)
            .ok_or_else(|| HandlerError::NotFound { id: id.clone() })
    }

    /// Include or exclude the entry under `id` from velocity calculation.
    ///
    /// # Errors
    ///
    /// [`HandlerError::NotFound`] if the id is absent.
    pub fn set_active(&mut self, id: &K, is_active: bool) -> Result<(), HandlerError<K>> {
        let entry = self
            .entries
            .get_mut(id)
            .ok_or_else(|| HandlerError::NotFound { id: id.clone() })?;
        entry.set_active(is_active);
        Ok(())
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        tracing::debug!(count = self.entries.len(), "movement registry cleared");
        self.entries.clear();
    }

    /// Iterate over `(id, entry)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &MovementEntry<I>)> {
        self.entries.iter()
    }

    /// Sum of velocities over the active entries.
    ///
    /// Inactive entries are skipped entirely rather than contributing a
    /// zero vector, so they also never influence float summation order.
    pub fn velocity(&self) -> Vec3 {
        let total = self
            .entries
            .values()
            .filter(|entry| entry.is_active())
            .fold(Vec3::ZERO, |acc, entry| acc + entry.velocity());
        tracing::trace!(
            active = self.active_len(),
            total = self.entries.len(),
            "velocity computed"
        );
        total
    }
}
