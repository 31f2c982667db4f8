//! # Braille Cells
//!
//! Decoding of Unicode braille patterns (U+2800..=U+28FF) into the
//! six-dot cell layout and dot positions within a cell.
//!
//! Dots are numbered per the braille convention:
//!
//! ```text
//! 1 4
//! 2 5
//! 3 6
//! ```
//!
//! which maps to bits 0..=5 of the code point offset from U+2800.
//! Dots 7 and 8 of eight-dot patterns are ignored.

use config::constants::DOTS_PER_CELL;

/// Column index (0 = left, 1 = right) for each dot number.
const DOT_COL_INDEX: [usize; DOTS_PER_CELL] = [0, 0, 0, 1, 1, 1];
/// Row index (0 = top, 2 = bottom) for each dot number.
const DOT_ROW_INDEX: [usize; DOTS_PER_CELL] = [0, 1, 2, 0, 1, 2];

/// The raised dots of a single six-dot braille cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotPattern(u8);

impl DotPattern {
    /// A cell with no raised dots.
    pub const BLANK: DotPattern = DotPattern(0);

    /// Decodes a character into a dot pattern.
    ///
    /// Accepts the Unicode braille block and plain space (treated as a
    /// blank cell). Returns `None` for anything else.
    pub fn from_char(c: char) -> Option<DotPattern> {
        if c == ' ' {
            return Some(DotPattern::BLANK);
        }
        let cp = c as u32;
        if (0x2800..=0x28FF).contains(&cp) {
            // Keep the six-dot subset; bits 6 and 7 carry dots 7/8.
            Some(DotPattern((cp - 0x2800) as u8 & 0x3F))
        } else {
            None
        }
    }

    /// Whether the numbered dot (0-based, 0..6) is raised.
    pub fn has_dot(&self, dot: usize) -> bool {
        debug_assert!(dot < DOTS_PER_CELL);
        self.0 & (1 << dot) != 0
    }

    /// Number of raised dots.
    pub fn dot_count(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the raised dot indices in ascending order.
    pub fn dots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..DOTS_PER_CELL).filter(move |&dot| self.has_dot(dot))
    }
}

/// Offset of a dot from its cell center, in cell-local millimeters.
///
/// X grows toward the right column, Y grows toward the top row.
pub fn dot_offset(dot: usize, dot_spacing: f64) -> (f64, f64) {
    let x = match DOT_COL_INDEX[dot] {
        0 => -dot_spacing / 2.0,
        _ => dot_spacing / 2.0,
    };
    let y = match DOT_ROW_INDEX[dot] {
        0 => dot_spacing,
        1 => 0.0,
        _ => -dot_spacing,
    };
    (x, y)
}
