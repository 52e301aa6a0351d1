/// Axis-aligned rectangle in arena pixels. `y` grows downward, so `y` is the
/// top edge and `bottom()` the bottom edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centred on `(cx, cy)`.
    pub fn centered(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap: rectangles that merely share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x
    }

    /// Same centre, both dimensions multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Rect {
        let (cx, cy) = self.center();
        Rect::centered(cx, cy, self.width * factor, self.height * factor)
    }
}

