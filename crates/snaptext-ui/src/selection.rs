use image::RgbaImage;
use snaptext_types::CaptureRegion;

/// Pointer position on the overlay, in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in logical overlay pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogicalRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LogicalRect {
    /// Rectangle between two corners, whatever the drag direction
    pub fn spanning(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Map to physical pixels of a `bounds` sized capture, clamped to it
    ///
    /// Both corners are inclusive, so a flat or thin rectangle still covers
    /// at least one pixel on each axis.
    pub fn to_physical(&self, scale: f32, bounds: (u32, u32)) -> CaptureRegion {
        let (max_w, max_h) = bounds;
        let clamp = |v: f32, max: u32| -> u32 { v.max(0.0).min(max as f32) as u32 };

        let left = clamp((self.x * scale).floor(), max_w);
        let top = clamp((self.y * scale).floor(), max_h);
        let right =
            clamp(((self.x + self.width) * scale).ceil(), max_w).max((left + 1).min(max_w));
        let bottom =
            clamp(((self.y + self.height) * scale).ceil(), max_h).max((top + 1).min(max_h));

        CaptureRegion {
            x: left,
            y: top,
            width: right.saturating_sub(left),
            height: bottom.saturating_sub(top),
        }
    }
}

/// Rubber-band selection: Idle -> Dragging -> (Committed | Cancelled) -> Idle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Dragging { anchor: Point, current: Point },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionOutcome {
    /// Release without a preceding press
    Ignored,
    /// Zero-area release, the overlay stays open
    Pending,
    Committed(LogicalRect),
}

impl Selection {
    pub fn press(&mut self, at: Point) {
        *self = Selection::Dragging {
            anchor: at,
            current: at,
        };
    }

    /// Returns true when the live rectangle changed
    pub fn drag(&mut self, to: Point) -> bool {
        match self {
            Selection::Dragging { current, .. } if *current != to => {
                *current = to;
                true
            }
            _ => false,
        }
    }

    pub fn release(&mut self, at: Point) -> SelectionOutcome {
        let Selection::Dragging { anchor, .. } = *self else {
            return SelectionOutcome::Ignored;
        };
        *self = Selection::Idle;

        if anchor == at {
            SelectionOutcome::Pending
        } else {
            SelectionOutcome::Committed(LogicalRect::spanning(anchor, at))
        }
    }

    pub fn cancel(&mut self) {
        *self = Selection::Idle;
    }

    /// Rectangle to paint while dragging
    pub fn live_rect(&self) -> Option<LogicalRect> {
        match *self {
            Selection::Dragging { anchor, current } if anchor != current => {
                Some(LogicalRect::spanning(anchor, current))
            }
            Selection::Dragging { .. } => None,
            Selection::Idle => None,
        }
    }
}

/// Cut the selected part out of the full screen capture
///
/// `scale` is the overlay's logical-to-physical factor. Returns `None` when
/// nothing of the capture lies inside the selection.
pub fn crop(
    screen: &RgbaImage,
    rect: LogicalRect,
    scale: f32,
) -> Option<(CaptureRegion, RgbaImage)> {
    let region = rect.to_physical(scale, screen.dimensions());
    if region.is_empty() {
        return None;
    }

    let cropped =
        image::imageops::crop_imm(screen, region.x, region.y, region.width, region.height)
            .to_image();
    Some((region, cropped))
}
