// SPDX-License-Identifier: MPL-2.0

//! Corner bracket layout
//!
//! Two L-shaped variants cover all four corners. Index parity picks the
//! variant: even brackets sit on the trailing edge with their leading border
//! suppressed, odd brackets sit on the leading edge with their trailing border
//! suppressed. The top row is the bottom row rotated by 270° (even) or 90°
//! (odd). Right-to-left layout swaps leading and trailing and negates every
//! rotation.

use crate::config::{LayoutDirection, ResolvedConfig};
use cosmic::iced::{Color, Rectangle};

/// Physical corner of the viewfinder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    pub fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }
}

/// Border widths of the unrotated bracket shape
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BorderSides {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// A bordered quad clipped to the bracket box
///
/// The quad extends past every side without a border, so only the kept
/// borders and the rounding between them fall inside `clip`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub clip: Rectangle,
    pub quad: Rectangle,
    pub border_width: f32,
    /// `[top_left, top_right, bottom_right, bottom_left]`
    pub radii: [f32; 4],
}

/// A corner bracket, in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// 0 and 1 form the top row, 2 and 3 the bottom row
    pub index: usize,
    pub corner: Corner,
    /// `edge_width × edge_height` box the bracket occupies
    pub bounds: Rectangle,
    /// Rotation of the base shape in degrees (clockwise)
    pub rotation: f32,
    /// Borders of the base shape before rotation
    pub borders: BorderSides,
    /// Rounding of the base shape's bottom-left and bottom-right corners
    pub bottom_radii: (f32, f32),
    pub thickness: f32,
    pub radius: f32,
    pub color: Color,
}

/// Lay out the four brackets around `viewfinder`
///
/// Brackets overhang the viewfinder by `edge_border_width - 1` and move
/// inwards by `inset` (the bracket pulse).
pub fn layout(viewfinder: Rectangle, config: &ResolvedConfig, inset: f32) -> [Bracket; 4] {
    std::array::from_fn(|index| bracket(index, viewfinder, config, inset))
}

fn bracket(index: usize, viewfinder: Rectangle, config: &ResolvedConfig, inset: f32) -> Bracket {
    let rtl = config.layout_direction == LayoutDirection::Rtl;
    let top_row = index < 2;
    let even = index % 2 == 0;

    // Even → trailing edge, odd → leading edge
    let on_right = even != rtl;
    let corner = match (top_row, on_right) {
        (true, false) => Corner::TopLeft,
        (true, true) => Corner::TopRight,
        (false, false) => Corner::BottomLeft,
        (false, true) => Corner::BottomRight,
    };

    let base_rotation = match (top_row, even) {
        (true, true) => 270.0,
        (true, false) => 90.0,
        (false, _) => 0.0,
    };
    let rotation = if rtl { -base_rotation } else { base_rotation };

    let thickness = config.edge_border_width.max(0.0);
    let radius = config.edge_radius.max(0.0);

    // Leading border suppressed on even, trailing on odd
    let (leading, trailing) = if even {
        (0.0, thickness)
    } else {
        (thickness, 0.0)
    };
    let (left, right) = if rtl {
        (trailing, leading)
    } else {
        (leading, trailing)
    };
    let borders = BorderSides {
        left,
        right,
        top: 0.0,
        bottom: thickness,
    };
    let bottom_radii = if right > 0.0 {
        (0.0, radius)
    } else {
        (radius, 0.0)
    };

    let width = config.edge_width.max(0.0);
    let height = config.edge_height.max(0.0);
    let shift = (thickness - 1.0) - inset;

    let x = if corner.is_left() {
        viewfinder.x - shift
    } else {
        viewfinder.x + viewfinder.width + shift - width
    };
    let y = if corner.is_top() {
        viewfinder.y - shift
    } else {
        viewfinder.y + viewfinder.height + shift - height
    };

    Bracket {
        index,
        corner,
        bounds: Rectangle {
            x,
            y,
            width,
            height,
        },
        rotation,
        borders,
        bottom_radii,
        thickness,
        radius,
        color: config.edge_color,
    }
}

/// Quarter turns clockwise for a rotation in degrees
fn quarter_turns(degrees: f32) -> usize {
    ((degrees / 90.0).round() as i32).rem_euclid(4) as usize
}

/// Rotate values ordered clockwise from the top (sides) or top-left (corners)
fn rotate_cw(values: [f32; 4], turns: usize) -> [f32; 4] {
    std::array::from_fn(|i| values[(i + 4 - turns) % 4])
}

impl Bracket {
    /// Physical borders as `[top, right, bottom, left]`
    pub fn sides(&self) -> [f32; 4] {
        let b = self.borders;
        rotate_cw([b.top, b.right, b.bottom, b.left], quarter_turns(self.rotation))
    }

    /// Physical corner radii as `[top_left, top_right, bottom_right, bottom_left]`
    pub fn radii(&self) -> [f32; 4] {
        let (bottom_left, bottom_right) = self.bottom_radii;
        rotate_cw(
            [0.0, 0.0, bottom_right, bottom_left],
            quarter_turns(self.rotation),
        )
    }

    /// Paint description of the bracket
    pub fn outline(&self) -> Outline {
        let clip = self.bounds;
        let [top, right, bottom, left] = self.sides();
        let radii = self.radii();
        let border_width = top.max(right).max(bottom).max(left);

        // Pushes a suppressed border and its antialiasing out of the clip
        let overhang = border_width + 1.0;
        let grow = |kept: f32| if kept > 0.0 { 0.0 } else { overhang };
        let (grow_top, grow_right) = (grow(top), grow(right));
        let (grow_bottom, grow_left) = (grow(bottom), grow(left));

        Outline {
            clip,
            quad: Rectangle {
                x: clip.x - grow_left,
                y: clip.y - grow_top,
                width: clip.width + grow_left + grow_right,
                height: clip.height + grow_top + grow_bottom,
            },
            border_width,
            radii,
        }
    }
}
