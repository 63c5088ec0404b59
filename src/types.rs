//! Core types for spark-reveal.
//!
//! Geometry, identifiers and the frame clock unit shared by the surface,
//! the animators and the mount pipeline.

// =============================================================================
// Frame Clock
// =============================================================================

/// Host clock reading in milliseconds (same unit as a browser's `performance.now()`).
pub type FrameTime = f64;

// =============================================================================
// Identifiers
// =============================================================================

/// Handle to an element registered with a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// Handle to a pending frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u64);

/// Handle to a registered intersection observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub u64);

// =============================================================================
// Geometry
// =============================================================================

/// Bounding region of an element in page coordinates (pixels, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Grow (positive) or shrink (negative) the rect by `margin` on every side.
    pub fn inflate(&self, margin: f32) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: (self.width + margin * 2.0).max(0.0),
            height: (self.height + margin * 2.0).max(0.0),
        }
    }

    /// Area of the overlap with `other` (0 when disjoint or touching).
    pub fn overlap_area(&self, other: &Rect) -> f32 {
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if w <= 0.0 || h <= 0.0 { 0.0 } else { w * h }
    }
}

/// The visible part of the page.
///
/// `scroll_y` is the page offset of the top edge; the viewport spans
/// `scroll_y..scroll_y + height` vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { scroll_x: 0.0, scroll_y: 0.0, width, height }
    }

    /// The viewport as a page-space rect.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.scroll_x, self.scroll_y, self.width, self.height)
    }

    /// Does `rect` intersect the viewport grown by `margin_px`?
    ///
    /// A negative margin shrinks the root, so the element has to scroll
    /// further in before it counts. Intersection means a ratio > 0: edges
    /// that merely touch do not count.
    pub fn intersects(&self, rect: &Rect, margin_px: f32) -> bool {
        let root = self.bounds().inflate(margin_px);
        if root.width <= 0.0 || root.height <= 0.0 {
            return false;
        }
        if rect.width <= 0.0 || rect.height <= 0.0 {
            // Zero-sized targets count when they sit inside the root.
            return rect.x >= root.x
                && rect.x <= root.right()
                && rect.y >= root.y
                && rect.y <= root.bottom();
        }
        rect.overlap_area(&root) > 0.0
    }
}

// =============================================================================
// Tests
// =============================================================================
