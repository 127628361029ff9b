// Copyright 2026 the Flexlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item identity.

use core::fmt;

/// Sentinel value indicating "no item" in link fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to an item in a [`Context`](crate::Context).
///
/// Ids are dense and assigned in creation order starting at zero. They stay
/// valid until the context is reset or destroyed, across any storage growth.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub(crate) u32);

impl ItemId {
    /// The implicit root of every tree: the first item created.
    pub const ROOT: Self = Self(0);

    /// Wraps a raw index. Validity is checked on use.
    #[inline]
    #[must_use]
    pub const fn new(idx: u32) -> Self {
        Self(idx)
    }

    /// Returns the raw index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Converts a raw link field into a handle.
    #[inline]
    pub(crate) const fn from_link(idx: u32) -> Option<Self> {
        if idx == INVALID { None } else { Some(Self(idx)) }
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == INVALID {
            f.write_str("ItemId(INVALID)")
        } else {
            write!(f, "ItemId({})", self.0)
        }
    }
}
