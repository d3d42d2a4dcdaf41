//! Character-grid board dump, used by the standalone CLI and by
//! tests that want a human-readable look at a board mid-solve.

use crate::board::{Board, CellId, Direction, neighbor};

/// `(glyph width, glyph height)` of one cell's bit grid: the smallest
/// roughly-square layout that fits `n` bits.
fn cell_dims(n: u8) -> (usize, usize) {
    let n = n as usize;
    let cw = (1..=n).find(|w| w * w >= n).unwrap_or(n).max(1);
    let ch = n.div_ceil(cw);
    (cw, ch)
}

/// Render `board` as a grid of characters: `A+k` where bit `k` is known
/// present, `.` where it has been ruled out, `?` where it is still
/// undetermined; `^ v < >` mark containment arrows between cells.
pub fn dump(board: &Board) -> String {
    let n = board.params.n;
    let w = board.params.w as usize;
    let h = board.params.h as usize;
    let (cw, ch) = cell_dims(n);

    let rows = h * ch + h.saturating_sub(1);
    let cols = w * cw + w.saturating_sub(1);
    let mut canvas = vec![vec![' '; cols]; rows];

    for row in 0..h {
        for col in 0..w {
            let i = row * w + col;
            let cell = CellId(i as u16);
            let base_row = row * (ch + 1);
            let base_col = col * (cw + 1);

            for bit in 0..n as usize {
                let rr = bit / cw;
                let cc = bit % cw;
                let glyph = if board.known[i] & (1 << bit) != 0 {
                    (b'A' + bit as u8) as char
                } else if board.mask[i] & (1 << bit) == 0 {
                    '.'
                } else {
                    '?'
                };
                canvas[base_row + rr][base_col + cc] = glyph;
            }

            if col + 1 < w {
                if let Some(right) = neighbor(board.params, cell, Direction::Right) {
                    let glyph = if board.clues[i].has(Direction::Right) {
                        '>'
                    } else if board.clues[right.0 as usize].has(Direction::Left) {
                        '<'
                    } else {
                        ' '
                    };
                    canvas[base_row + ch / 2][base_col + cw] = glyph;
                }
            }
            if row + 1 < h {
                if let Some(down) = neighbor(board.params, cell, Direction::Down) {
                    let glyph = if board.clues[i].has(Direction::Down) {
                        'v'
                    } else if board.clues[down.0 as usize].has(Direction::Up) {
                        '^'
                    } else {
                        ' '
                    };
                    canvas[base_row + ch][base_col + cw / 2] = glyph;
                }
            }
        }
    }

    let mut out = String::with_capacity(rows * (cols + 1));
    for (i, line) in canvas.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let text: String = line.iter().collect();
        out.push_str(text.trim_end());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Params;

    #[test]
    fn resolved_cell_shows_every_present_letter() {
        let p = Params::standard();
        let mut b = Board::blank(p).unwrap();
        b.known[0] = 0b0011;
        b.mask[0] = 0b0011;
        let text = dump(&b);
        assert!(text.contains('A'));
        assert!(text.contains('B'));
    }

    #[test]
    fn unresolved_cell_shows_question_marks() {
        let p = Params::standard();
        let b = Board::blank(p).unwrap();
        let text = dump(&b);
        assert!(text.contains('?'));
    }

    #[test]
    fn arrow_glyph_appears_between_cells() {
        let p = Params::standard();
        let mut b = Board::blank(p).unwrap();
        b.clues[0].set(Direction::Right);
        let text = dump(&b);
        assert!(text.contains('>'));
    }
}
