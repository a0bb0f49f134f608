/// Braille Unicode canvas for high-resolution terminal graphics.
/// Each character cell is a 2x4 dot grid (Braille patterns U+2800..U+28FF),
/// so a canvas of `width` x `height` characters exposes a pixel surface of
/// `width * 2` x `height * 4`.
pub struct BrailleCanvas {
    width: usize,  // Characters
    height: usize, // Characters
    cells: Vec<u8>, // Dot bit pattern per character, row-major
}

impl BrailleCanvas {
    /// Braille dot bit for a pixel within one character cell:
    /// ```text
    /// (0,0) (1,0)   0x01 0x08
    /// (0,1) (1,1)   0x02 0x10
    /// (0,2) (1,2)   0x04 0x20
    /// (0,3) (1,3)   0x40 0x80
    /// ```
    const DOT_BITS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Set the pixel at (x, y) in pixel coordinates. Out-of-range pixels are
    /// ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize) {
        let cx = x / 2;
        let cy = y / 4;
        if cx >= self.width || cy >= self.height {
            return;
        }
        self.cells[cy * self.width + cx] |= Self::DOT_BITS[y % 4][x % 2];
    }

    /// Set a pixel using signed coordinates, ignoring negative values.
    pub fn set_pixel_signed(&mut self, x: i32, y: i32) {
        if x >= 0 && y >= 0 {
            self.set_pixel(x as usize, y as usize);
        }
    }

    /// Character for the cell at (cx, cy); empty cells yield U+2800.
    pub fn cell_char(&self, cx: usize, cy: usize) -> char {
        let bits = self.cells[cy * self.width + cx];
        char::from_u32(0x2800 + bits as u32).unwrap_or(' ')
    }

    /// Iterate rows as strings of Braille characters.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.height)
            .map(move |cy| (0..self.width).map(|cx| self.cell_char(cx, cy)).collect())
    }

    #[cfg(test)]
    pub fn to_string(&self) -> String {
        self.rows().collect::<Vec<_>>().join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_dot() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set_pixel(0, 0);
        assert_eq!(canvas.to_string(), "⠁"); // U+2801
    }

    #[test]
    fn test_full_cell() {
        let mut canvas = BrailleCanvas::new(1, 1);
        for x in 0..2 {
            for y in 0..4 {
                canvas.set_pixel(x, y);
            }
        }
        assert_eq!(canvas.to_string(), "⣿"); // U+28FF
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set_pixel(100, 100);
        canvas.set_pixel_signed(-1, -1);
        assert_eq!(canvas.to_string(), "\u{2800}");
    }

    #[test]
    fn test_diagonal_spans_cells() {
        let mut canvas = BrailleCanvas::new(2, 1);
        canvas.set_pixel(0, 0);
        canvas.set_pixel(1, 1);
        canvas.set_pixel(2, 2);
        canvas.set_pixel(3, 3);
        // First cell: 0x01 | 0x10; second cell: 0x04 | 0x80
        assert_eq!(canvas.to_string(), "⠑⢄");
    }
}
