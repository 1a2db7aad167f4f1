//! Character display: [`Tile`], [`TextStyle`], the [`Surface`] buffer, and
//! frame diffing via [`Patch`].
//!
//! A `Surface` is a plain owned buffer mutated through `&mut`; the
//! application loop keeps two of them and flushes only the difference to
//! the driver.

/// An RGB colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Visual style for a tile. `None` colours mean the terminal default.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStyle {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub bold: bool,
}

impl TextStyle {
    /// Set the foreground colour (builder).
    #[inline]
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = Some(fg);
        self
    }

    /// Set the background colour (builder).
    #[inline]
    pub const fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = Some(bg);
        self
    }

    /// Enable bold (builder).
    #[inline]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// A styled character cell of the display.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub ch: char,
    pub style: TextStyle,
}

impl Tile {
    #[inline]
    pub const fn new(ch: char, style: TextStyle) -> Self {
        Self { ch, style }
    }
}

impl Default for Tile {
    #[inline]
    fn default() -> Self {
        Self {
            ch: ' ',
            style: TextStyle {
                fg: None,
                bg: None,
                bold: false,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// A 2D buffer of [`Tile`]s, addressed by screen (x, y) with x growing
/// right and y growing down.
#[derive(Clone, Debug)]
pub struct Surface {
    tiles: Vec<Tile>,
    width: i32,
    height: i32,
}

impl Surface {
    /// Create a surface of the given dimensions filled with blanks.
    /// Non-positive dimensions yield an empty surface.
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0);
        let h = height.max(0);
        Self {
            tiles: vec![Tile::default(); (w * h) as usize],
            width: w,
            height: h,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether (x, y) is a valid tile address.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Read the tile at (x, y). Out-of-bounds reads return a blank.
    pub fn at(&self, x: i32, y: i32) -> Tile {
        if !self.contains(x, y) {
            return Tile::default();
        }
        self.tiles[self.index(x, y)]
    }

    /// Set the tile at (x, y). Out-of-bounds writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if !self.contains(x, y) {
            return;
        }
        let i = self.index(x, y);
        self.tiles[i] = tile;
    }

    /// Fill the whole surface with `tile`.
    pub fn fill(&mut self, tile: Tile) {
        self.tiles.fill(tile);
    }

    /// Write a string starting at (x, y), clipped to the surface width.
    pub fn print(&mut self, x: i32, y: i32, text: &str, style: TextStyle) {
        for (i, ch) in text.chars().enumerate() {
            self.set(x + i as i32, y, Tile::new(ch, style));
        }
    }
}

// ---------------------------------------------------------------------------
// Patch
// ---------------------------------------------------------------------------

/// A single tile that changed between two surfaces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatchCell {
    pub x: i32,
    pub y: i32,
    pub tile: Tile,
}

/// The set of tile changes between two frames.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Patch {
    pub cells: Vec<PatchCell>,
    pub width: i32,
    pub height: i32,
}

/// Compute the difference between two same-sized surfaces.
pub fn diff(prev: &Surface, curr: &Surface) -> Patch {
    let mut cells = Vec::new();
    for y in 0..curr.height() {
        for x in 0..curr.width() {
            let pt = prev.at(x, y);
            let ct = curr.at(x, y);
            if pt != ct {
                cells.push(PatchCell { x, y, tile: ct });
            }
        }
    }
    Patch {
        cells,
        width: curr.width(),
        height: curr.height(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_set_and_at() {
        let mut s = Surface::new(4, 3);
        let t = Tile::new('X', TextStyle::default());
        s.set(2, 1, t);
        assert_eq!(s.at(2, 1).ch, 'X');
        // Out of bounds is blank and writes are dropped.
        assert_eq!(s.at(10, 10), Tile::default());
        s.set(-1, 0, t);
    }

    #[test]
    fn surface_print_clips() {
        let mut s = Surface::new(4, 1);
        s.print(2, 0, "abcd", TextStyle::default());
        assert_eq!(s.at(2, 0).ch, 'a');
        assert_eq!(s.at(3, 0).ch, 'b');
        // 'c' and 'd' fell off the edge.
        assert_eq!(s.at(0, 0).ch, ' ');
    }

    #[test]
    fn diff_reports_only_changes() {
        let a = Surface::new(3, 2);
        let mut b = Surface::new(3, 2);
        b.set(1, 0, Tile::new('A', TextStyle::default()));
        let patch = diff(&a, &b);
        assert_eq!(patch.cells.len(), 1);
        assert_eq!(patch.cells[0].x, 1);
        assert_eq!(patch.cells[0].y, 0);
        assert_eq!(patch.cells[0].tile.ch, 'A');
    }

    #[test]
    fn diff_identical_is_empty() {
        let a = Surface::new(3, 2);
        let b = Surface::new(3, 2);
        assert!(diff(&a, &b).cells.is_empty());
    }
}
