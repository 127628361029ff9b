// Copyright 2026 the Flexlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Checked entry points for callers that pass untrusted ids or flag words.
//!
//! The plain [`Context`] API treats bad input as a programming error and
//! panics. Binding layers (script embeddings, deserializers) validate through
//! the `try_*` methods here first; each one leaves the context untouched when
//! it returns an error.

use core::fmt;

use crate::flags::{BehaveFlags, ContainFlags, USER_MASK};
use crate::item::{Context, INVALID, ItemId};
use crate::scalar::Scalar;

/// Errors from the checked [`Context`] API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The id is the sentinel or not below the item count.
    InvalidId {
        /// Raw id that was passed in.
        id: u32,
        /// Item count at the time of the call.
        count: u32,
    },
    /// The root item cannot become a child.
    RootAsChild,
    /// An item cannot be linked relative to itself.
    SelfLink(ItemId),
    /// The item already sits in a child list.
    AlreadyInserted(ItemId),
    /// Bits outside the container range.
    InvalidContainFlags(u32),
    /// Bits outside the child range.
    InvalidBehaveFlags(u32),
    /// Bits outside the application range.
    InvalidUserFlags(u32),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId { id, count } if *id == INVALID => {
                write!(f, "invalid item id sentinel (count {count})")
            }
            Self::InvalidId { id, count } => {
                write!(f, "item id {id} out of range (count {count})")
            }
            Self::RootAsChild => f.write_str("the root item cannot be inserted"),
            Self::SelfLink(id) => write!(f, "cannot link {id:?} to itself"),
            Self::AlreadyInserted(id) => write!(f, "{id:?} is already inserted"),
            Self::InvalidContainFlags(bits) => {
                write!(
                    f,
                    "container flags {bits:#x} outside mask {:#x}",
                    ContainFlags::all().bits()
                )
            }
            Self::InvalidBehaveFlags(bits) => {
                write!(
                    f,
                    "child flags {bits:#x} outside mask {:#x}",
                    BehaveFlags::all().bits()
                )
            }
            Self::InvalidUserFlags(bits) => {
                write!(f, "user flags {bits:#x} outside mask {USER_MASK:#x}")
            }
        }
    }
}

impl core::error::Error for LayoutError {}

impl<S: Scalar> Context<S> {
    /// Converts a raw id into a handle if it names a live item.
    pub fn check_id(&self, raw: u32) -> Result<ItemId, LayoutError> {
        if raw == INVALID || raw >= self.count() {
            return Err(LayoutError::InvalidId {
                id: raw,
                count: self.count(),
            });
        }
        Ok(ItemId::new(raw))
    }

    /// Checked [`insert`](Self::insert).
    pub fn try_insert(&mut self, parent: ItemId, child: ItemId) -> Result<(), LayoutError> {
        self.check_link(parent, child)?;
        self.insert(parent, child);
        Ok(())
    }

    /// Checked [`append`](Self::append).
    pub fn try_append(&mut self, earlier: ItemId, later: ItemId) -> Result<(), LayoutError> {
        self.check_link(earlier, later)?;
        self.append(earlier, later);
        Ok(())
    }

    /// Checked [`push`](Self::push).
    pub fn try_push(&mut self, parent: ItemId, child: ItemId) -> Result<(), LayoutError> {
        self.check_link(parent, child)?;
        self.push(parent, child);
        Ok(())
    }

    /// Sets container flags from a raw packed word.
    pub fn try_set_contain(&mut self, id: ItemId, bits: u32) -> Result<(), LayoutError> {
        self.check_id(id.index())?;
        let flags = ContainFlags::from_bits(bits).ok_or(LayoutError::InvalidContainFlags(bits))?;
        self.set_contain(id, flags);
        Ok(())
    }

    /// Sets child flags from a raw packed word.
    pub fn try_set_behave(&mut self, id: ItemId, bits: u32) -> Result<(), LayoutError> {
        self.check_id(id.index())?;
        let flags = BehaveFlags::from_bits(bits).ok_or(LayoutError::InvalidBehaveFlags(bits))?;
        self.set_behave(id, flags);
        Ok(())
    }

    /// Checked [`set_user_flags`](Self::set_user_flags).
    pub fn try_set_user_flags(&mut self, id: ItemId, bits: u32) -> Result<(), LayoutError> {
        self.check_id(id.index())?;
        if bits & !USER_MASK != 0 {
            return Err(LayoutError::InvalidUserFlags(bits));
        }
        self.set_user_flags(id, bits);
        Ok(())
    }

    fn check_link(&self, anchor: ItemId, item: ItemId) -> Result<(), LayoutError> {
        self.check_id(anchor.index())?;
        self.check_id(item.index())?;
        if item == ItemId::ROOT {
            return Err(LayoutError::RootAsChild);
        }
        if anchor == item {
            return Err(LayoutError::SelfLink(item));
        }
        if self.is_inserted(item) {
            return Err(LayoutError::AlreadyInserted(item));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    fn three() -> (Context<i16>, ItemId, ItemId, ItemId) {
        let mut ctx = Context::new();
        let root = ctx.create();
        let a = ctx.create();
        let b = ctx.create();
        (ctx, root, a, b)
    }

    #[test]
    fn check_id_bounds() {
        let (ctx, ..) = three();
        assert_eq!(ctx.check_id(2), Ok(ItemId::new(2)));
        assert_eq!(ctx.check_id(3), Err(LayoutError::InvalidId { id: 3, count: 3 }));
        assert!(matches!(
            ctx.check_id(INVALID),
            Err(LayoutError::InvalidId { id: INVALID, .. })
        ));
    }

    #[test]
    fn try_link_rejects_without_mutating() {
        let (mut ctx, root, a, b) = three();
        assert_eq!(ctx.try_insert(a, root), Err(LayoutError::RootAsChild));
        assert_eq!(ctx.try_push(a, a), Err(LayoutError::SelfLink(a)));
        assert_eq!(ctx.try_insert(root, a), Ok(()));
        assert_eq!(ctx.try_append(b, a), Err(LayoutError::AlreadyInserted(a)));
        assert_eq!(ctx.first_child(b), None);
        assert_eq!(ctx.try_append(a, b), Ok(()));
        assert_eq!(ctx.next_sibling(a), Some(b));
        assert_eq!(
            ctx.try_insert(root, ItemId::new(9)),
            Err(LayoutError::InvalidId { id: 9, count: 3 })
        );
    }

    #[test]
    fn try_set_flags_checks_masks() {
        let (mut ctx, _, a, _) = three();
        assert_eq!(ctx.try_set_contain(a, 0x006), Ok(()));
        assert_eq!(ctx.contain(a), ContainFlags::ROW | ContainFlags::WRAP);
        assert_eq!(
            ctx.try_set_contain(a, 0x020),
            Err(LayoutError::InvalidContainFlags(0x020))
        );
        assert_eq!(ctx.contain(a), ContainFlags::ROW | ContainFlags::WRAP);

        assert_eq!(ctx.try_set_behave(a, 0x1e0), Ok(()));
        assert_eq!(ctx.behave(a), BehaveFlags::FILL);
        assert_eq!(
            ctx.try_set_behave(a, 0x400),
            Err(LayoutError::InvalidBehaveFlags(0x400))
        );

        assert_eq!(ctx.try_set_user_flags(a, 0x0002_0000), Ok(()));
        assert_eq!(
            ctx.try_set_user_flags(a, 0x1),
            Err(LayoutError::InvalidUserFlags(0x1))
        );
        assert_eq!(ctx.user_flags(a), 0x0002_0000);
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            LayoutError::InvalidId { id: 4, count: 2 }.to_string(),
            "item id 4 out of range (count 2)"
        );
        assert_eq!(
            LayoutError::InvalidId { id: INVALID, count: 2 }.to_string(),
            "invalid item id sentinel (count 2)"
        );
        assert_eq!(
            LayoutError::InvalidContainFlags(0x20).to_string(),
            "container flags 0x20 outside mask 0x1f"
        );
        assert_eq!(
            LayoutError::SelfLink(ItemId::new(1)).to_string(),
            "cannot link ItemId(1) to itself"
        );
    }
}
