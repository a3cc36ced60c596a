use console::Term;

use crate::lattice::Lattice;

/// Terminal capability used by the visualization channel.
///
/// The simulation core only ever hands frames to this trait; rendering can
/// never touch the lattice or the random stream. Implementations that cannot
/// drive a terminal should be replaced by [`NullRenderer`] rather than fail
/// the run.
pub trait Renderer {
    /// Called once before the first frame with the frame dimensions.
    fn prepare(&mut self, _rows: usize, _cols: usize) {}
    /// Display one textual frame.
    fn render(&mut self, frame: &str);
    /// Erase the previous frame.
    fn clear(&mut self) {}
}

/// Renderer that discards every frame.
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &str) {}
}

/// Renderer that clears the terminal and reprints the frame in place.
pub struct TermRenderer {
    term: Term,
}

impl TermRenderer {
    /// Attach to stdout if it is a terminal.
    pub fn stdout() -> Option<Self> {
        let term = Term::stdout();
        if term.is_term() {
            Some(Self { term })
        } else {
            None
        }
    }
}

impl Renderer for TermRenderer {
    fn prepare(&mut self, rows: usize, cols: usize) {
        // xterm window-resize control sequence; terminals that ignore it
        // still render the frames, just without the fitted window
        let _ = self.term.write_str(&resize_sequence(rows, cols));
    }

    fn render(&mut self, frame: &str) {
        self.clear();
        let _ = self.term.write_str(frame);
    }

    fn clear(&mut self) {
        let _ = self.term.clear_screen();
    }
}

/// CSI 8 resize request: set the text area to `rows` × `cols` cells.
fn resize_sequence(rows: usize, cols: usize) -> String {
    format!("\x1b[8;{rows};{cols}t")
}

/// Map a lattice to a textual frame: `up_marker` per +1 spin, `down_marker`
/// per −1 spin, one line per row.
pub fn frame(lattice: &Lattice, up_marker: char, down_marker: char) -> String {
    let l = lattice.length();
    let marker_len = up_marker.len_utf8().max(down_marker.len_utf8());
    let mut out = String::with_capacity(l * (l * marker_len + 1));
    for row in lattice.rows() {
        for &spin in row {
            out.push(if spin > 0 { up_marker } else { down_marker });
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_frame_markers_and_shape() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        let mut lat = Lattice::random(3, 1.0, &mut rng);
        lat.flip(1, 1);
        let f = frame(&lat, '+', '-');
        assert_eq!(f, "+++\n+-+\n+++\n");
    }

    #[test]
    fn test_frame_capacity_is_exact() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        let lat = Lattice::random(5, 0.5, &mut rng);
        // multi-byte down marker: 5 rows of 5 markers plus a newline each
        let f = frame(&lat, ' ', '\u{2588}');
        assert!(f.len() <= 5 * (5 * '\u{2588}'.len_utf8() + 1));
        assert_eq!(f.lines().count(), 5);
    }

    #[test]
    fn test_resize_sequence() {
        assert_eq!(resize_sequence(4, 4), "\x1b[8;4;4t");
        assert_eq!(resize_sequence(40, 40), "\x1b[8;40;40t");
    }

    #[test]
    fn test_null_renderer_is_a_noop() {
        let mut r = NullRenderer;
        r.prepare(4, 4);
        r.render("....\n");
        r.clear();
    }
}
