//! The value-with-bounded-stack primitive.
//!
//! A [`StackableElement`] is one named modifier's contribution: a magnitude
//! (`value`) paired with an integer repeat count (`stack`). The element's
//! contribution to an aggregate is always `value × stack`, so applying the
//! same slow debuff three times is indistinguishable from one element with
//! three stacks.
//!
//! Mutation rules:
//! - The stack can never leave `[min, max]` through a successful mutation.
//! - `try_*` operations refuse out-of-range results; `*_trim` operations
//!   clamp instead.
//! - A frozen element silently ignores every stack mutation. Freezing is a
//!   lock for "pinned" modifiers, not an error state.

use core::fmt;

use crate::bounds::StackBounds;
use crate::error::ElementError;
use crate::tag::Tag;
use crate::value::ElementValue;

/// A typed value with a bounded integer stack count.
///
/// Equality models *effective contribution*: two elements are equal when
/// `value` and `stack` match, regardless of frozen/exclusive state or
/// bounds. An inert copy of a buff equals the live one as long as both
/// would contribute the same amount.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackableElement<V: ElementValue> {
    value: V,
    stack: i32,
    is_exclusive: bool,
    is_frozen: bool,
    bounds: StackBounds,
    tag: Option<Tag>,
}

impl<V: ElementValue> StackableElement<V> {
    /// Element with an initial stack of 0.
    ///
    /// Exclusive elements get bounds [0, 1]; everything else gets the
    /// default [0, 999].
    pub fn new(value: V, is_exclusive: bool) -> Self {
        Self {
            value,
            stack: 0,
            is_exclusive,
            is_frozen: false,
            bounds: StackBounds::for_exclusivity(is_exclusive),
            tag: None,
        }
    }

    /// Element with an explicit starting stack, validated against the
    /// exclusivity-derived bounds.
    ///
    /// # Errors
    ///
    /// [`ElementError::ExclusiveInitialStack`] if `is_exclusive` and the
    /// stack is not 0 or 1; [`ElementError::InitialStackOutOfBounds`] if
    /// the stack falls outside the derived bounds.
    pub fn with_stack(value: V, stack: i32, is_exclusive: bool) -> Result<Self, ElementError> {
        if is_exclusive && !(0..=1).contains(&stack) {
            return Err(ElementError::ExclusiveInitialStack { stack });
        }

        let bounds = StackBounds::for_exclusivity(is_exclusive);
        if !bounds.contains(stack) {
            return Err(ElementError::InitialStackOutOfBounds {
                stack,
                min: bounds.min,
                max: bounds.max,
            });
        }

        Ok(Self {
            value,
            stack,
            is_exclusive,
            is_frozen: false,
            bounds,
            tag: None,
        })
    }

    /// An exclusive element that is already applied (stack 1).
    ///
    /// Infallible shorthand for the common "this modifier is present"
    /// case, e.g. seeding a movement entry with its innate base speed.
    pub fn exclusive_on(value: V) -> Self {
        Self {
            value,
            stack: 1,
            is_exclusive: true,
            is_frozen: false,
            bounds: StackBounds::EXCLUSIVE,
            tag: None,
        }
    }

    /// Attach a categorization tag (builder pattern).
    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn value(&self) -> V {
        self.value
    }

    pub fn stack(&self) -> i32 {
        self.stack
    }

    pub fn is_exclusive(&self) -> bool {
        self.is_exclusive
    }

    pub fn is_frozen(&self) -> bool {
        self.is_frozen
    }

    pub fn bounds(&self) -> StackBounds {
        self.bounds
    }

    pub fn min_stack(&self) -> i32 {
        self.bounds.min
    }

    pub fn max_stack(&self) -> i32 {
        self.bounds.max
    }

    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    /// The element's contribution to an aggregate: `value × stack`.
    pub fn overall_value(&self) -> V {
        self.value.scaled(self.stack)
    }

    /// Try to add `delta` stacks.
    ///
    /// Returns `Ok(false)` without changing anything when the element is
    /// frozen or the result would exceed the maximum.
    ///
    /// # Errors
    ///
    /// [`ElementError::NegativeDelta`] if `delta` is negative.
    pub fn try_add_stack(&mut self, delta: i32) -> Result<bool, ElementError> {
        if self.is_frozen {
            return Ok(false);
        }
        if delta < 0 {
            return Err(ElementError::NegativeDelta { delta });
        }

        let next = self.stack + delta;
        if next > self.bounds.max {
            return Ok(false);
        }

        tracing::trace!(from = self.stack, to = next, "stack added");
        self.stack = next;
        Ok(true)
    }

    /// Add `delta` stacks, clamping the result to the maximum.
    ///
    /// Frozen elements are left untouched.
    ///
    /// # Errors
    ///
    /// [`ElementError::NegativeDelta`] if `delta` is negative.
    pub fn add_stack_trim(&mut self, delta: i32) -> Result<(), ElementError> {
        if self.is_frozen {
            return Ok(());
        }
        if delta < 0 {
            return Err(ElementError::NegativeDelta { delta });
        }

        self.stack = (self.stack + delta).min(self.bounds.max);
        Ok(())
    }

    /// Try to remove `delta` stacks.
    ///
    /// Returns `Ok(false)` without changing anything when the element is
    /// frozen or the result would fall below the minimum.
    ///
    /// # Errors
    ///
    /// [`ElementError::NegativeDelta`] if `delta` is negative.
    pub fn try_remove_stack(&mut self, delta: i32) -> Result<bool, ElementError> {
        if self.is_frozen {
            return Ok(false);
        }
        if delta < 0 {
            return Err(ElementError::NegativeDelta { delta });
        }

        let next = self.stack - delta;
        if next < self.bounds.min {
            return Ok(false);
        }

        tracing::trace!(from = self.stack, to = next, "stack removed");
        self.stack = next;
        Ok(true)
    }

    /// Remove `delta` stacks, clamping the result to the minimum.
    ///
    /// Frozen elements are left untouched.
    ///
    /// # Errors
    ///
    /// [`ElementError::NegativeDelta`] if `delta` is negative.
    pub fn remove_stack_trim(&mut self, delta: i32) -> Result<(), ElementError> {
        if self.is_frozen {
            return Ok(());
        }
        if delta < 0 {
            return Err(ElementError::NegativeDelta { delta });
        }

        self.stack = (self.stack - delta).max(self.bounds.min);
        Ok(())
    }

    /// Set the stack to an exact count, with no trimming.
    ///
    /// Frozen elements no-op silently (`Ok` with no change).
    ///
    /// # Errors
    ///
    /// [`ElementError::StackOutOfBound`] if `stack` is outside the bounds;
    /// the error carries the current stack, the request, and both bounds.
    pub fn set_stack(&mut self, stack: i32) -> Result<(), ElementError> {
        if self.is_frozen {
            return Ok(());
        }
        if !self.bounds.contains(stack) {
            return Err(ElementError::StackOutOfBound {
                current: self.stack,
                requested: stack,
                min: self.bounds.min,
                max: self.bounds.max,
            });
        }

        tracing::trace!(from = self.stack, to = stack, "stack set");
        self.stack = stack;
        Ok(())
    }

    /// Reset the stack to 0, bypassing bound validation.
    ///
    /// Frozen elements are left untouched. 0 is written even when the
    /// minimum bound is above 0.
    pub fn clear_stack(&mut self) {
        if self.is_frozen {
            return;
        }
        self.stack = 0;
    }

    /// Flip the exclusivity flag.
    ///
    /// Non-retroactive: neither the current stack nor the bounds are
    /// re-validated against the new flag. An element that already has 3
    /// stacks keeps them after `set_exclusive(true)`.
    pub fn set_exclusive(&mut self, is_exclusive: bool) {
        self.is_exclusive = is_exclusive;
    }

    /// Lock or unlock the stack against mutation.
    pub fn set_frozen(&mut self, is_frozen: bool) {
        self.is_frozen = is_frozen;
    }

    /// Raise or lower the maximum bound.
    ///
    /// If the current stack exceeds the new maximum it is first clamped
    /// down through the [`set_stack`](Self::set_stack) path. When the
    /// element is frozen and that clamp would be needed, the whole call is
    /// a silent no-op — updating the bound while skipping the clamp would
    /// leave the stack outside its own range.
    ///
    /// # Errors
    ///
    /// [`ElementError::InvertedBounds`] if `max_stack` is below the
    /// current minimum.
    pub fn set_max_stack(&mut self, max_stack: i32) -> Result<(), ElementError> {
        if max_stack < self.bounds.min {
            return Err(ElementError::InvertedBounds {
                requested_min: self.bounds.min,
                requested_max: max_stack,
            });
        }

        if max_stack < self.stack {
            if self.is_frozen {
                return Ok(());
            }
            self.set_stack(max_stack)?;
        }

        self.bounds.max = max_stack;
        Ok(())
    }

    /// Raise or lower the minimum bound.
    ///
    /// Mirror image of [`set_max_stack`](Self::set_max_stack), including
    /// the frozen no-op when a clamp would be required.
    ///
    /// # Errors
    ///
    /// [`ElementError::InvertedBounds`] if `min_stack` is above the
    /// current maximum.
    pub fn set_min_stack(&mut self, min_stack: i32) -> Result<(), ElementError> {
        if min_stack > self.bounds.max {
            return Err(ElementError::InvertedBounds {
                requested_min: min_stack,
                requested_max: self.bounds.max,
            });
        }

        if min_stack > self.stack {
            if self.is_frozen {
                return Ok(());
            }
            self.set_stack(min_stack)?;
        }

        self.bounds.min = min_stack;
        Ok(())
    }
}

impl<V: ElementValue> PartialEq for StackableElement<V> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.stack == other.stack
    }
}

impl<V: ElementValue> fmt::Display for StackableElement<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stack {} of {:?} (exclusive: {}, frozen: {}, range {}..={})",
            self.stack, self.value, self.is_exclusive, self.is_frozen, self.bounds.min, self.bounds.max
        )
    }
}
