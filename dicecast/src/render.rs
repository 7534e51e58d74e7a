use unicode_width::UnicodeWidthStr;

use crate::rules::dice::{Face, Roll, SIDES};

/// Lines in every die glyph.
pub const GLYPH_HEIGHT: usize = 5;

/// Display cells in every line of a die glyph.
pub const GLYPH_WIDTH: usize = 11;

/// Blank cells after each die in a rendered row.
pub const GLYPH_GAP: usize = 2;

/// Text shown in the dice area before anything has been rolled.
pub const PLACEHOLDER: &str = "READY";

static FACE_ART: [[&str; GLYPH_HEIGHT]; SIDES as usize] = [
    [
        "┌─────────┐",
        "│         │",
        "│    ●    │",
        "│         │",
        "└─────────┘",
    ],
    [
        "┌─────────┐",
        "│  ●      │",
        "│         │",
        "│      ●  │",
        "└─────────┘",
    ],
    [
        "┌─────────┐",
        "│  ●      │",
        "│    ●    │",
        "│      ●  │",
        "└─────────┘",
    ],
    [
        "┌─────────┐",
        "│  ●   ●  │",
        "│         │",
        "│  ●   ●  │",
        "└─────────┘",
    ],
    [
        "┌─────────┐",
        "│  ●   ●  │",
        "│    ●    │",
        "│  ●   ●  │",
        "└─────────┘",
    ],
    [
        "┌─────────┐",
        "│  ●   ●  │",
        "│  ●   ●  │",
        "│  ●   ●  │",
        "└─────────┘",
    ],
];

pub fn glyph(face: Face) -> &'static [&'static str; GLYPH_HEIGHT] {
    &FACE_ART[face.index()]
}

/// Lays the dice glyphs side by side, one output line per glyph line.
///
/// Each die is padded to `GLYPH_WIDTH` cells and followed by `GLYPH_GAP`
/// spaces, so columns stay aligned under any monospace font.
pub fn render_roll(roll: &Roll) -> String {
    let mut lines = vec![String::new(); GLYPH_HEIGHT];
    for face in roll.faces() {
        for (line, art) in lines.iter_mut().zip(glyph(*face)) {
            line.push_str(&pad_cells(art, GLYPH_WIDTH + GLYPH_GAP));
        }
    }
    lines.join("\n")
}

pub fn render_placeholder() -> &'static str {
    PLACEHOLDER
}

fn pad_cells(s: &str, field_cells: usize) -> String {
    let w = s.width();
    let pad = field_cells.saturating_sub(w);
    format!("{s}{}", " ".repeat(pad))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll(values: &[u32]) -> Roll {
        values.iter().copied().filter_map(Face::new).collect()
    }

    #[test]
    fn test_glyphs_are_uniform() {
        for art in &FACE_ART {
            for line in art {
                assert_eq!(line.width(), GLYPH_WIDTH);
            }
        }
    }

    #[test]
    fn test_pip_count_matches_face() {
        for value in 1..=SIDES {
            let face = Face::new(value).unwrap();
            let pips: usize = glyph(face).iter().map(|l| l.matches('●').count()).sum();
            assert_eq!(pips, value as usize);
        }
    }

    #[test]
    fn test_render_single_die() {
        let rendered = render_roll(&roll(&[1]));
        let expected = [
            "┌─────────┐  ",
            "│         │  ",
            "│    ●    │  ",
            "│         │  ",
            "└─────────┘  ",
        ]
        .join("\n");
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_row_width() {
        for n in 1..=5 {
            let values: Vec<u32> = (1..=n).collect();
            let rendered = render_roll(&roll(&values));
            let lines: Vec<&str> = rendered.lines().collect();
            assert_eq!(lines.len(), GLYPH_HEIGHT);
            for line in lines {
                assert_eq!(line.width(), (GLYPH_WIDTH + GLYPH_GAP) * n as usize);
            }
        }
    }

    #[test]
    fn test_render_keeps_order() {
        let rendered = render_roll(&roll(&[6, 1]));
        let middle = rendered.lines().nth(2).unwrap();
        assert_eq!(middle, "│  ●   ●  │  │    ●    │  ");
    }
}
