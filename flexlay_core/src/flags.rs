// Copyright 2026 the Flexlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container and child directives.
//!
//! [`ContainFlags`] describe how an item arranges its children; [`BehaveFlags`]
//! describe how an item places itself inside its parent. Both keep the packed
//! bit values of the classic `layout.h` encoding so that flag words produced
//! elsewhere (scripts, serialized trees) can be fed in unchanged.
//!
//! The algorithm never tests raw bits directly. It reads typed views:
//! [`BoxModel`] and [`Justify`] for containers, [`Anchor`] per [`Axis`] for
//! children.
//!
//! | Contain bits   | Value   | Behave bits | Value   |
//! |----------------|---------|-------------|---------|
//! | `ROW`          | `0x002` | `LEFT`      | `0x020` |
//! | `COLUMN`       | `0x003` | `TOP`       | `0x040` |
//! | `WRAP`         | `0x004` | `RIGHT`     | `0x080` |
//! | `START`        | `0x008` | `BOTTOM`    | `0x100` |
//! | `END`          | `0x010` | `BREAK`     | `0x200` |
//! | `JUSTIFY`      | `0x018` |             |         |

use bitflags::bitflags;

// ---------------------------------------------------------------------------
// Packed item word
// ---------------------------------------------------------------------------

/// Packed-word bit: the item has been linked into a child list.
pub const ITEM_INSERTED: u32 = 0x400;
/// Packed-word bit: the item has an explicit width.
pub const ITEM_HFIXED: u32 = 0x800;
/// Packed-word bit: the item has an explicit height.
pub const ITEM_VFIXED: u32 = 0x1000;
/// Bits reserved for the application; never read by the layout passes.
pub const USER_MASK: u32 = 0x7fff_0000;

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

/// One of the two independent layout dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Axis 0: x and width.
    Horizontal,
    /// Axis 1: y and height.
    Vertical,
}

impl Axis {
    /// Both axes in evaluation order.
    pub const ALL: [Self; 2] = [Self::Horizontal, Self::Vertical];

    /// Component index into [`Vec2`](crate::Vec2) and [`Vec4`](crate::Vec4).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Horizontal => 0,
            Self::Vertical => 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Container flags
// ---------------------------------------------------------------------------

bitflags! {
    /// How an item arranges its children.
    ///
    /// Zero-valued constants name the defaults of their group and exist so
    /// that flag expressions read like the directives they encode.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ContainFlags: u32 {
        /// Flex container stacking children left to right.
        const ROW = 0x002;
        /// Flex container stacking children top to bottom.
        const COLUMN = 0x003;
        /// Free layout: every child is anchored independently.
        const LAYOUT = 0x000;
        /// Flex model bit shared by rows and columns.
        const FLEX = 0x002;
        /// Children stay on one line.
        const NOWRAP = 0x000;
        /// Children wrap onto further lines when they overflow.
        const WRAP = 0x004;
        /// Pack leftover space after the children.
        const START = 0x008;
        /// Split leftover space around the children.
        const MIDDLE = 0x000;
        /// Pack leftover space before the children.
        const END = 0x010;
        /// Spread leftover space between the children.
        const JUSTIFY = 0x018;
    }
}

impl Default for ContainFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Primary direction of a flex container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Children stack along the horizontal axis.
    Row,
    /// Children stack along the vertical axis.
    Column,
}

impl Direction {
    /// The axis children stack along.
    #[inline]
    #[must_use]
    pub const fn main_axis(self) -> Axis {
        match self {
            Self::Row => Axis::Horizontal,
            Self::Column => Axis::Vertical,
        }
    }
}

/// The containment model of an item, decoded from its [`ContainFlags`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoxModel {
    /// Children overlay each other on both axes.
    Layout,
    /// Children stack along `direction` and overlay on the other axis.
    Flex {
        /// Stacking direction.
        direction: Direction,
        /// Whether overflowing children start a new line.
        wrap: bool,
    },
}

/// Distribution of leftover main-axis space in a flex container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Justify {
    /// Half of the leftover space before the first child.
    #[default]
    Middle,
    /// Children packed at the leading edge.
    Start,
    /// All leftover space before the first child.
    End,
    /// Leftover space split evenly between neighbours.
    SpaceBetween,
}

impl ContainFlags {
    const MODEL_MASK: u32 = 0x007;
    const JUSTIFY_MASK: u32 = 0x018;

    /// Decodes the containment model.
    ///
    /// A wrap bit without a flex direction decodes as [`BoxModel::Layout`].
    #[must_use]
    pub const fn model(self) -> BoxModel {
        match self.bits() & Self::MODEL_MASK {
            0x002 => BoxModel::Flex {
                direction: Direction::Row,
                wrap: false,
            },
            0x003 => BoxModel::Flex {
                direction: Direction::Column,
                wrap: false,
            },
            0x006 => BoxModel::Flex {
                direction: Direction::Row,
                wrap: true,
            },
            0x007 => BoxModel::Flex {
                direction: Direction::Column,
                wrap: true,
            },
            _ => BoxModel::Layout,
        }
    }

    /// Decodes the justification mode.
    #[must_use]
    pub const fn justify(self) -> Justify {
        match self.bits() & Self::JUSTIFY_MASK {
            0x008 => Justify::Start,
            0x010 => Justify::End,
            0x018 => Justify::SpaceBetween,
            _ => Justify::Middle,
        }
    }

    /// Encodes a typed model and justification.
    #[must_use]
    pub const fn from_model(model: BoxModel, justify: Justify) -> Self {
        let model_bits = match model {
            BoxModel::Layout => 0,
            BoxModel::Flex { direction, wrap } => {
                let dir = match direction {
                    Direction::Row => Self::ROW.bits(),
                    Direction::Column => Self::COLUMN.bits(),
                };
                if wrap { dir | Self::WRAP.bits() } else { dir }
            }
        };
        let justify_bits = match justify {
            Justify::Middle => 0,
            Justify::Start => Self::START.bits(),
            Justify::End => Self::END.bits(),
            Justify::SpaceBetween => Self::JUSTIFY.bits(),
        };
        Self::from_bits_retain(model_bits | justify_bits)
    }
}

// ---------------------------------------------------------------------------
// Child flags
// ---------------------------------------------------------------------------

bitflags! {
    /// How an item places itself inside its parent.
    ///
    /// An axis with neither edge bit set centres; both edges set fills.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BehaveFlags: u32 {
        /// Anchor to the left edge.
        const LEFT = 0x020;
        /// Anchor to the top edge.
        const TOP = 0x040;
        /// Anchor to the right edge.
        const RIGHT = 0x080;
        /// Anchor to the bottom edge.
        const BOTTOM = 0x100;
        /// Anchor to both horizontal edges.
        const HFILL = 0x0a0;
        /// Anchor to both vertical edges.
        const VFILL = 0x140;
        /// Centre horizontally.
        const HCENTER = 0x000;
        /// Centre vertically.
        const VCENTER = 0x000;
        /// Centre on both axes.
        const CENTER = 0x000;
        /// Anchor to all four edges.
        const FILL = 0x1e0;
        /// Start a new line at this item inside a wrapping container.
        const BREAK = 0x200;
    }
}

impl Default for BehaveFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// A child's placement along one axis, decoded from its [`BehaveFlags`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Centred in the available span.
    #[default]
    Center,
    /// Flush with the leading edge.
    Start,
    /// Flush with the trailing edge.
    End,
    /// Stretched between both edges.
    Fill,
}

impl Anchor {
    const fn edge_bits(self) -> u32 {
        match self {
            Self::Center => 0,
            Self::Start => BehaveFlags::LEFT.bits(),
            Self::End => BehaveFlags::RIGHT.bits(),
            Self::Fill => BehaveFlags::HFILL.bits(),
        }
    }
}

impl BehaveFlags {
    /// Decodes the anchor on `axis`.
    ///
    /// Vertical bits sit one position above their horizontal counterparts,
    /// so shifting by the axis index lines them up.
    #[must_use]
    pub const fn anchor(self, axis: Axis) -> Anchor {
        match (self.bits() >> axis.index()) & Self::HFILL.bits() {
            0x020 => Anchor::Start,
            0x080 => Anchor::End,
            0x0a0 => Anchor::Fill,
            _ => Anchor::Center,
        }
    }

    /// Whether the item requests a line break before itself.
    #[inline]
    #[must_use]
    pub const fn is_break(self) -> bool {
        self.bits() & Self::BREAK.bits() != 0
    }

    /// Encodes typed anchors for both axes.
    #[must_use]
    pub const fn from_anchors(horizontal: Anchor, vertical: Anchor) -> Self {
        Self::from_bits_retain(horizontal.edge_bits() | (vertical.edge_bits() << 1))
    }
}
