// Copyright 2026 the Flexlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric primitives shared by the arena and both layout passes.
//!
//! Every geometric quantity in a [`Context`](crate::Context) is a [`Scalar`].
//! Integer scalars (`i16`, `i32`) and floating scalars (`f32`, `f64`) run the
//! same algorithm source. Arrangement math is carried out in `f32` and
//! converted back with [`Scalar::from_f32`], which truncates toward zero for
//! integer scalars.
//!
//! [`Vec2`] holds a `(width, height)` pair and [`Vec4`] holds either a
//! computed rectangle `(x, y, width, height)` or margins
//! `(left, top, right, bottom)`. Both index by axis: component `axis` is the
//! leading value and component `axis + 2` the trailing one.

use core::fmt;
use core::ops::{Add, AddAssign, Div, Index, IndexMut, Sub};

/// The scalar used when no explicit type parameter is given.
///
/// `i16` by default; `f32` when the `float` feature is enabled.
#[cfg(not(feature = "float"))]
pub type DefaultScalar = i16;

/// The scalar used when no explicit type parameter is given.
///
/// `i16` by default; `f32` when the `float` feature is enabled.
#[cfg(feature = "float")]
pub type DefaultScalar = f32;

/// A numeric type usable for sizes, margins, and rectangles.
pub trait Scalar:
    Copy
    + Default
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Div<Output = Self>
    + AddAssign
{
    /// Additive identity. On an explicit size it means "automatic".
    const ZERO: Self;
    /// Divisor used when centring within a span.
    const TWO: Self;

    /// Widens to `f32` for arrangement arithmetic.
    fn to_f32(self) -> f32;
    /// Narrows an `f32` back, truncating toward zero for integers.
    fn from_f32(v: f32) -> Self;
    /// Widens to `f64` for interop with `kurbo`.
    fn to_f64(self) -> f64;
    /// Narrows an `f64`, truncating toward zero for integers.
    fn from_f64(v: f64) -> Self;
    /// Sum clamped to the representable range. Plain addition for floats.
    fn saturating_add(self, rhs: Self) -> Self;
}

impl Scalar for i16 {
    const ZERO: Self = 0;
    const TWO: Self = 2;

    #[inline]
    fn to_f32(self) -> f32 {
        f32::from(self)
    }

    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "layout coordinates saturate into the integer range"
    )]
    fn from_f32(v: f32) -> Self {
        v as Self
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "layout coordinates saturate into the integer range"
    )]
    fn from_f64(v: f64) -> Self {
        v as Self
    }

    #[inline]
    fn saturating_add(self, rhs: Self) -> Self {
        Self::saturating_add(self, rhs)
    }
}

impl Scalar for i32 {
    const ZERO: Self = 0;
    const TWO: Self = 2;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "layout coordinates saturate into the integer range"
    )]
    fn from_f32(v: f32) -> Self {
        v as Self
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "layout coordinates saturate into the integer range"
    )]
    fn from_f64(v: f64) -> Self {
        v as Self
    }

    #[inline]
    fn saturating_add(self, rhs: Self) -> Self {
        Self::saturating_add(self, rhs)
    }
}

impl Scalar for f32 {
    const ZERO: Self = 0.0;
    const TWO: Self = 2.0;

    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        v
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "f64 inputs are narrowed to the configured precision"
    )]
    fn from_f64(v: f64) -> Self {
        v as Self
    }

    #[inline]
    fn saturating_add(self, rhs: Self) -> Self {
        self + rhs
    }
}

impl Scalar for f64 {
    const ZERO: Self = 0.0;
    const TWO: Self = 2.0;

    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "arrangement runs in f32 for every scalar"
    )]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        f64::from(v)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn saturating_add(self, rhs: Self) -> Self {
        self + rhs
    }
}

/// Larger of two scalars; `b` wins on ties and unordered values.
#[inline]
pub(crate) fn max<S: Scalar>(a: S, b: S) -> S {
    if a > b { a } else { b }
}

/// Smaller of two scalars; `b` wins on ties and unordered values.
#[inline]
pub(crate) fn min<S: Scalar>(a: S, b: S) -> S {
    if a < b { a } else { b }
}

// ---------------------------------------------------------------------------
// Vec2
// ---------------------------------------------------------------------------

/// Two scalars indexed by axis: `[width, height]`.
#[derive(Clone, Copy, Default, PartialEq)]
pub struct Vec2<S>(pub [S; 2]);

impl<S: Scalar> Vec2<S> {
    /// Both components zero.
    pub const ZERO: Self = Self([S::ZERO; 2]);

    /// Creates a vector from its components.
    #[inline]
    #[must_use]
    pub const fn new(x: S, y: S) -> Self {
        Self([x, y])
    }

    /// Horizontal component.
    #[inline]
    #[must_use]
    pub fn x(self) -> S {
        self.0[0]
    }

    /// Vertical component.
    #[inline]
    #[must_use]
    pub fn y(self) -> S {
        self.0[1]
    }

    /// Converts to a [`kurbo::Size`].
    #[must_use]
    pub fn to_size(self) -> kurbo::Size {
        kurbo::Size::new(self.0[0].to_f64(), self.0[1].to_f64())
    }
}

impl<S: Scalar> From<kurbo::Size> for Vec2<S> {
    fn from(size: kurbo::Size) -> Self {
        Self::new(S::from_f64(size.width), S::from_f64(size.height))
    }
}

impl<S> Index<usize> for Vec2<S> {
    type Output = S;

    #[inline]
    fn index(&self, axis: usize) -> &S {
        &self.0[axis]
    }
}

impl<S> IndexMut<usize> for Vec2<S> {
    #[inline]
    fn index_mut(&mut self, axis: usize) -> &mut S {
        &mut self.0[axis]
    }
}

impl<S: fmt::Debug> fmt::Debug for Vec2<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.0[0], self.0[1])
    }
}

// ---------------------------------------------------------------------------
// Vec4
// ---------------------------------------------------------------------------

/// Four scalars: a rectangle `[x, y, width, height]` or margins
/// `[left, top, right, bottom]`.
#[derive(Clone, Copy, Default, PartialEq)]
pub struct Vec4<S>(pub [S; 4]);

impl<S: Scalar> Vec4<S> {
    /// All components zero.
    pub const ZERO: Self = Self([S::ZERO; 4]);

    /// Creates a vector from its components.
    #[inline]
    #[must_use]
    pub const fn new(a: S, b: S, c: S, d: S) -> Self {
        Self([a, b, c, d])
    }

    /// Rectangle origin x (or left margin).
    #[inline]
    #[must_use]
    pub fn x(self) -> S {
        self.0[0]
    }

    /// Rectangle origin y (or top margin).
    #[inline]
    #[must_use]
    pub fn y(self) -> S {
        self.0[1]
    }

    /// Rectangle width (or right margin).
    #[inline]
    #[must_use]
    pub fn width(self) -> S {
        self.0[2]
    }

    /// Rectangle height (or bottom margin).
    #[inline]
    #[must_use]
    pub fn height(self) -> S {
        self.0[3]
    }

    /// Interprets `self` as `[x, y, width, height]`.
    #[must_use]
    pub fn to_rect(self) -> kurbo::Rect {
        kurbo::Rect::from_origin_size(
            (self.0[0].to_f64(), self.0[1].to_f64()),
            (self.0[2].to_f64(), self.0[3].to_f64()),
        )
    }

    /// Interprets `self` as `[left, top, right, bottom]`.
    #[must_use]
    pub fn to_insets(self) -> kurbo::Insets {
        kurbo::Insets::new(
            self.0[0].to_f64(),
            self.0[1].to_f64(),
            self.0[2].to_f64(),
            self.0[3].to_f64(),
        )
    }
}

impl<S: Scalar> From<kurbo::Insets> for Vec4<S> {
    fn from(insets: kurbo::Insets) -> Self {
        Self::new(
            S::from_f64(insets.x0),
            S::from_f64(insets.y0),
            S::from_f64(insets.x1),
            S::from_f64(insets.y1),
        )
    }
}

impl<S> Index<usize> for Vec4<S> {
    type Output = S;

    #[inline]
    fn index(&self, i: usize) -> &S {
        &self.0[i]
    }
}

impl<S> IndexMut<usize> for Vec4<S> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut S {
        &mut self.0[i]
    }
}

impl<S: fmt::Debug> fmt::Debug for Vec4<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:?}, {:?}, {:?}, {:?})",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}
