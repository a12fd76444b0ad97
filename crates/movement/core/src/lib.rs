//! Deterministic composition of gameplay movement modifiers.
//!
//! `movement-core` lets many independent modifiers (base speed,
//! environmental slow, buffs, knockback directions) be registered against
//! an entity and combined into a single scalar speed and a single velocity
//! vector, without any one modifier knowing about the others.
//!
//! # Architecture
//!
//! ```text
//! [ StackableElement ]   value × bounded stack count
//!      ↓
//! [ SpeedHandler / DirectionHandler ]   keyed registries, summed on demand
//!      ↓
//! [ MovementHandler ]   active entries → final velocity
//! ```
//!
//! ## Principles
//!
//! 1. **On demand**: aggregates are recomputed at the call, never cached
//! 2. **Commutative**: an aggregate is a sum, so insertion order carries no
//!    meaning
//! 3. **Owned**: every element is exclusively owned by its registry, every
//!    sub-registry by its movement entry
//! 4. **Single-threaded**: handlers are plain mutable collections; the
//!    hosting update loop serializes access per entity
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use movement_core::{MovementEntry, MovementHandler, StackableElement};
//!
//! let mut movement: MovementHandler<&str, &str> = MovementHandler::new();
//! movement.try_add("walk", MovementEntry::with_base("base", 4.0, "heading", Vec3::X));
//!
//! // An environmental slow stacks three times against the walk speed.
//! let speeds = movement.get_mut(&"walk").unwrap().speeds_mut().unwrap();
//! speeds.try_add("mud", StackableElement::with_stack(-1.0, 3, false).unwrap());
//!
//! assert_eq!(movement.velocity(), Vec3::new(1.0, 0.0, 0.0));
//! ```

pub mod bounds;
pub mod element;
pub mod error;
pub mod handler;
pub mod movement;
pub mod tag;
pub mod value;

pub use bounds::StackBounds;
pub use element::StackableElement;
pub use error::{ElementError, ErrorKind, HandlerError};
pub use handler::{DirectionHandler, SpeedHandler, StackHandler};
pub use movement::{MovementEntry, MovementHandler, VelocitySource};
pub use tag::Tag;
pub use value::ElementValue;
