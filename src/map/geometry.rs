use crate::braille::BrailleCanvas;

/// Draw a line using Bresenham's algorithm.
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel_signed(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a dashed line (route styling): `on` lit pixels, `off` skipped, along
/// the same Bresenham walk as [`draw_line`].
pub fn draw_dashed_line(
    canvas: &mut BrailleCanvas,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    on: u32,
    off: u32,
) {
    let period = (on + off).max(1);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;
    let mut step: u32 = 0;

    loop {
        if step % period < on {
            canvas.set_pixel_signed(x, y);
        }
        step = step.wrapping_add(1);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a filled circle.
pub fn draw_circle(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                canvas.set_pixel_signed(cx + dx, cy + dy);
            }
        }
    }
}

/// Draw a map pin anchored at (x, y): a filled head above a short stem, so
/// the anchor pixel is the geographic position.
pub fn draw_pin(canvas: &mut BrailleCanvas, x: i32, y: i32) {
    draw_circle(canvas, x, y - 4, 2);
    draw_line(canvas, x, y - 2, x, y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::braille::BrailleCanvas;

    fn lit_cells(canvas: &BrailleCanvas) -> usize {
        canvas
            .to_string()
            .chars()
            .filter(|&c| c != '\u{2800}' && c != '\n')
            .count()
    }

    #[test]
    fn test_horizontal_line_spans_cells() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        // Every cell along the row has its top dots lit
        assert_eq!(lit_cells(&canvas), 5);
    }

    #[test]
    fn test_line_endpoints_drawn() {
        let mut canvas = BrailleCanvas::new(4, 4);
        draw_line(&mut canvas, 0, 0, 7, 15);
        let s = canvas.to_string();
        let first = s.chars().next().unwrap();
        assert_ne!(first, '\u{2800}');
    }

    #[test]
    fn test_dashed_line_sparser_than_solid() {
        let mut solid = BrailleCanvas::new(20, 1);
        let mut dashed = BrailleCanvas::new(20, 1);
        draw_line(&mut solid, 0, 0, 39, 0);
        draw_dashed_line(&mut dashed, 0, 0, 39, 0, 3, 3);
        assert!(lit_cells(&dashed) < lit_cells(&solid));
        assert!(lit_cells(&dashed) > 0);
    }

    #[test]
    fn test_pin_anchor_is_lit() {
        let mut canvas = BrailleCanvas::new(4, 4);
        draw_pin(&mut canvas, 4, 12);
        // Anchor pixel (4, 12) lives in cell (2, 3)
        assert_ne!(canvas.cell_char(2, 3), '\u{2800}');
    }
}
