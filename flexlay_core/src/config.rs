// Copyright 2026 the Flexlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Storage policy for a [`Context`](crate::Context).

/// Controls how a context reserves and grows its item storage.
///
/// Growth only happens inside [`create`](crate::Context::create) and
/// [`reserve`](crate::Context::reserve). Ids survive growth; references into
/// the arena do not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContextConfig {
    /// Items reserved when the context is constructed.
    pub initial_capacity: u32,
    /// Capacity used for the first growth of an empty store.
    pub min_capacity: u32,
    /// Multiplier applied to the capacity on every later growth.
    pub growth_factor: u32,
}

impl ContextConfig {
    /// Lazy allocation; first growth to 32 items, then by a factor of 4.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            initial_capacity: 0,
            min_capacity: 32,
            growth_factor: 4,
        }
    }

    /// Returns a copy that reserves `capacity` items up front.
    #[must_use]
    pub const fn with_initial_capacity(self, capacity: u32) -> Self {
        Self {
            initial_capacity: capacity,
            ..self
        }
    }

    /// Capacity to grow to when `current` slots are full.
    ///
    /// Always strictly larger than `current` unless `current` is already
    /// `u32::MAX`.
    #[must_use]
    pub const fn next_capacity(&self, current: u32) -> u32 {
        let grown = if current < 1 {
            self.min_capacity
        } else {
            current.saturating_mul(self.growth_factor)
        };
        if grown > current {
            grown
        } else {
            current.saturating_add(1)
        }
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self::new()
    }
}
