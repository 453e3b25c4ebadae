//! Region geometry model
//!
//! An axis-aligned rectangle stored as a page-relative origin plus a size,
//! with the interactive resize/move state machine used by the viewer canvas.
//! Zone classification is a pure function of the pointer position in the
//! rectangle's local frame; the per-zone drag transforms form a small
//! transition table, and every edit re-normalizes the rectangle so width and
//! height stay non-negative.

/// Distance from an edge, in pixels, within which the pointer counts as
/// grabbing that edge.
pub const EDGE_THRESHOLD: f32 = 15.0;

/// Inner split that decides between the left and right edge when the pointer
/// is inside a horizontal edge band.
const LEFT_RIGHT_SPLIT: f32 = 5.0;

/// Default size of a newly created region.
pub const DEFAULT_SIZE: (f32, f32) = (300.0, 150.0);

/// Default offset of a newly created region from the page origin.
pub const DEFAULT_OFFSET: (f32, f32) = (10.0, 10.0);

/// A point in page pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Which part of a rectangle the pointer is grabbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeZone {
    /// Interior: plain move, no resize.
    #[default]
    None,
    Left,
    Top,
    Right,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Cursor shape to show for a hovered zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Arrow,
    ResizeHorizontal,
    ResizeVertical,
    /// Top-left / bottom-right diagonal.
    ResizeNwSe,
    /// Top-right / bottom-left diagonal.
    ResizeNeSw,
}

/// Outcome of feeding a pointer-move event to a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Region is not selected; the event is not ours.
    Ignored,
    /// Interior drag: the caller should translate the whole rectangle.
    Move,
    /// An edge or corner was dragged and the geometry changed.
    Resized,
}

/// Classify which zone of a `size`-sized rectangle a pointer at local
/// position `pos` is in.
///
/// Corners are tested first on both axes with [`EDGE_THRESHOLD`]. A pointer
/// inside a horizontal edge band resolves to `Left` only within the tighter
/// [`LEFT_RIGHT_SPLIT`] band, otherwise `Right`; the vertical band splits at
/// [`EDGE_THRESHOLD`] instead.
pub fn classify(pos: Point, size: (f32, f32)) -> ResizeZone {
    let (width, height) = size;
    let t = EDGE_THRESHOLD;

    if pos.x < t && pos.y < t {
        ResizeZone::TopLeft
    } else if pos.x > width - t && pos.y > height - t {
        ResizeZone::BottomRight
    } else if pos.x < t && pos.y > height - t {
        ResizeZone::BottomLeft
    } else if pos.x > width - t && pos.y < t {
        ResizeZone::TopRight
    } else if pos.x < t || pos.x > width - t {
        if pos.x < LEFT_RIGHT_SPLIT {
            ResizeZone::Left
        } else {
            ResizeZone::Right
        }
    } else if pos.y < t || pos.y > height - t {
        if pos.y < t {
            ResizeZone::Top
        } else {
            ResizeZone::Bottom
        }
    } else {
        ResizeZone::None
    }
}

/// Cursor to show for a zone.
pub fn cursor_for(zone: ResizeZone) -> CursorHint {
    match zone {
        ResizeZone::None => CursorHint::Arrow,
        ResizeZone::Left | ResizeZone::Right => CursorHint::ResizeHorizontal,
        ResizeZone::Top | ResizeZone::Bottom => CursorHint::ResizeVertical,
        ResizeZone::TopLeft | ResizeZone::BottomRight => CursorHint::ResizeNwSe,
        ResizeZone::TopRight | ResizeZone::BottomLeft => CursorHint::ResizeNeSw,
    }
}

/// Apply one drag step to a rectangle.
///
/// Left/top edges shift the origin while growing the size so the opposite
/// edge stays fixed; right/bottom edges only grow the size; corners combine
/// the two. The result may have negative extents and must be normalized.
pub fn apply_resize(
    zone: ResizeZone,
    delta: Point,
    origin: Point,
    size: (f32, f32),
) -> (Point, (f32, f32)) {
    let (mut width, mut height) = size;
    let mut origin = origin;

    match zone {
        ResizeZone::Left => {
            width += delta.x;
            origin.x += delta.x;
        }
        ResizeZone::Right => {
            width += delta.x;
        }
        ResizeZone::Top => {
            height += delta.y;
            origin.y += delta.y;
        }
        ResizeZone::Bottom => {
            height += delta.y;
        }
        ResizeZone::TopLeft => {
            width += delta.x;
            height += delta.y;
            origin.x += delta.x;
            origin.y += delta.y;
        }
        ResizeZone::TopRight => {
            width += delta.x;
            height += delta.y;
            origin.y += delta.y;
        }
        ResizeZone::BottomLeft => {
            width += delta.x;
            height += delta.y;
            origin.x += delta.x;
        }
        ResizeZone::BottomRight => {
            width += delta.x;
            height += delta.y;
        }
        ResizeZone::None => {}
    }

    (origin, (width, height))
}

/// A resizable, movable rectangle anchored at a page-relative origin.
#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    /// Top-left corner in page pixel space.
    pub origin: Point,
    /// Width and height; non-negative after every edit.
    pub size: (f32, f32),
    zone: ResizeZone,
    last_pos: Option<Point>,
}

impl Default for RectShape {
    fn default() -> Self {
        Self {
            origin: Point::new(DEFAULT_OFFSET.0, DEFAULT_OFFSET.1),
            size: DEFAULT_SIZE,
            zone: ResizeZone::None,
            last_pos: None,
        }
    }
}

impl RectShape {
    pub fn new(origin: Point, size: (f32, f32)) -> Self {
        Self {
            origin,
            size,
            zone: ResizeZone::None,
            last_pos: None,
        }
    }

    /// True when `pos` (page space) is inside the rectangle or its edge
    /// bands.
    pub fn hit(&self, pos: Point) -> bool {
        pos.x >= self.origin.x
            && pos.y >= self.origin.y
            && pos.x <= self.origin.x + self.size.0
            && pos.y <= self.origin.y + self.size.1
    }

    /// Update the hovered zone from a pointer position in page space and
    /// return the cursor to show.
    pub fn hover(&mut self, pos: Point) -> CursorHint {
        let local = Point::new(pos.x - self.origin.x, pos.y - self.origin.y);
        self.zone = classify(local, self.size);
        cursor_for(self.zone)
    }

    /// Record the drag anchor. Only armed when the pointer is in a resize
    /// zone; an interior press leaves the anchor unset so the drag is a
    /// plain move.
    pub fn begin_drag(&mut self, screen_pos: Point) {
        if self.zone != ResizeZone::None {
            self.last_pos = Some(screen_pos);
        }
    }

    /// Feed one pointer-move event, in screen coordinates.
    ///
    /// Unselected regions ignore the event entirely. With no active resize
    /// zone the caller is expected to translate the rectangle itself.
    pub fn drag(&mut self, screen_pos: Point, selected: bool) -> DragOutcome {
        if !selected {
            return DragOutcome::Ignored;
        }

        if self.zone == ResizeZone::None {
            return DragOutcome::Move;
        }

        let last = self.last_pos.replace(screen_pos).unwrap_or(screen_pos);
        let delta = Point::new(screen_pos.x - last.x, screen_pos.y - last.y);

        let (origin, size) = apply_resize(self.zone, delta, self.origin, self.size);
        self.origin = origin;
        self.size = size;
        self.normalize();

        DragOutcome::Resized
    }

    /// Translate the whole rectangle (interior drag).
    pub fn translate(&mut self, delta: Point) {
        self.origin.x += delta.x;
        self.origin.y += delta.y;
    }

    /// Restore the invariant `width >= 0 && height >= 0` by flipping the
    /// origin over a negative extent. The visible rectangle is unchanged.
    pub fn normalize(&mut self) {
        if self.size.0 < 0.0 {
            self.origin.x += self.size.0;
            self.size.0 = -self.size.0;
        }
        if self.size.1 < 0.0 {
            self.origin.y += self.size.1;
            self.size.1 = -self.size.1;
        }
    }
}
