// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounding-box contract consumed by the quadtree, and the `Bounded` trait.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::sync::Arc;

use kurbo::{Point, Rect};

/// Axis-aligned bounding box in 2D (an envelope).
///
/// An envelope is *empty* when any coordinate is NaN or when a minimum exceeds its
/// maximum. Empty envelopes never intersect or cover anything, and nothing covers them.
/// All predicates are boundary-inclusive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Envelope {
    /// Minimum x (west)
    pub min_x: f64,
    /// Minimum y (south)
    pub min_y: f64,
    /// Maximum x (east)
    pub max_x: f64,
    /// Maximum y (north)
    pub max_y: f64,
}

impl Default for Envelope {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Envelope {
    /// The canonical empty envelope. Extending it by anything yields that thing's bounds.
    pub const EMPTY: Self = Self {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    /// Create a new envelope from min/max corners.
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a degenerate envelope around a single point.
    pub const fn from_point(p: Point) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    /// Smallest envelope containing all of `points`. Empty if there are none.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        let mut env = Self::EMPTY;
        for p in points {
            env.extend_point(p);
        }
        env
    }

    /// Return true if the envelope is empty: NaN coordinates or an inverted axis.
    pub fn is_empty(&self) -> bool {
        // Written so that NaN comparisons fall through to "empty".
        !(self.min_x <= self.max_x && self.min_y <= self.max_y)
    }

    /// Width, or zero when empty.
    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    /// Height, or zero when empty.
    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }

    /// Center point. Meaningless (NaN or infinite) when empty.
    pub fn center(&self) -> Point {
        Point::new(
            0.5 * (self.min_x + self.max_x),
            0.5 * (self.min_y + self.max_y),
        )
    }

    /// Grow this envelope to include `other`. Extending by an empty envelope is a no-op.
    pub fn extend(&mut self, other: &Self) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = *other;
            return;
        }
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Grow this envelope to include the point. NaN points are ignored.
    pub fn extend_point(&mut self, p: Point) {
        self.extend(&Self::from_point(p));
    }

    /// Whether the two envelopes share at least one point (touching edges count).
    pub fn intersects(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Whether `other` lies entirely inside this envelope (shared edges count).
    pub fn covers(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }

    /// Whether the point lies inside this envelope or on its boundary.
    pub fn covers_point(&self, p: Point) -> bool {
        self.covers(&Self::from_point(p))
    }

    /// The four equal quadrants of this envelope, indexed by [`Quadrant`].
    ///
    /// `y` grows northwards, so the top quadrants hold the larger `y` values.
    pub fn quadrants(&self) -> [Self; 4] {
        let c = self.center();
        [
            Self::new(self.min_x, c.y, c.x, self.max_y),
            Self::new(c.x, c.y, self.max_x, self.max_y),
            Self::new(self.min_x, self.min_y, c.x, c.y),
            Self::new(c.x, self.min_y, self.max_x, c.y),
        ]
    }

    /// Convert to a Kurbo rectangle, or `None` if empty.
    pub fn to_rect(&self) -> Option<Rect> {
        if self.is_empty() {
            None
        } else {
            Some(Rect::new(self.min_x, self.min_y, self.max_x, self.max_y))
        }
    }
}

impl From<Rect> for Envelope {
    fn from(r: Rect) -> Self {
        Self::new(r.x0.min(r.x1), r.y0.min(r.y1), r.x0.max(r.x1), r.y0.max(r.y1))
    }
}

impl From<Point> for Envelope {
    fn from(p: Point) -> Self {
        Self::from_point(p)
    }
}

/// One of the four children of a subdivided quadtree node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// North-west child.
    TopLeft,
    /// North-east child.
    TopRight,
    /// South-west child.
    BottomLeft,
    /// South-east child.
    BottomRight,
}

impl Quadrant {
    /// All quadrants in child-slot order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Child-slot index of this quadrant.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Anything the quadtree can index: it must report a bounding envelope.
///
/// Identity for indexing comes from `Eq + Hash` on the item, so those impls must
/// not depend on the geometry. An item whose envelope changed is re-sent through
/// [`QuadTree::update`](crate::QuadTree::update).
pub trait Bounded {
    /// Bounding envelope of the item in index coordinates.
    fn envelope(&self) -> Envelope;
}

impl<T: Bounded + ?Sized> Bounded for &T {
    fn envelope(&self) -> Envelope {
        (**self).envelope()
    }
}

impl<T: Bounded + ?Sized> Bounded for Box<T> {
    fn envelope(&self) -> Envelope {
        (**self).envelope()
    }
}

impl<T: Bounded + ?Sized> Bounded for Rc<T> {
    fn envelope(&self) -> Envelope {
        (**self).envelope()
    }
}

impl<T: Bounded + ?Sized> Bounded for Arc<T> {
    fn envelope(&self) -> Envelope {
        (**self).envelope()
    }
}
