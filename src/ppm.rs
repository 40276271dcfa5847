//! Plain text `P3` portable pixmap output.

use std::io::{self, Write};

use crate::Screen;

/// Writes `screen` as a `P3` image, one pixel per line, top row first.
///
/// # Example
/// ```
/// # use spheretrace::{ppm, Rgb, Screen};
/// let mut screen = Screen::new(2, 1);
/// screen.buffer[1] = Rgb::new(255, 128, 0);
///
/// let mut out = Vec::new();
/// ppm::write_ppm(&mut out, &screen).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "P3\n2 1\n255\n0 0 0\n255 128 0\n");
/// ```
pub fn write_ppm<W: Write>(mut out: W, screen: &Screen) -> io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", screen.width, screen.height)?;
    writeln!(out, "255")?;
    for p in screen.buffer.iter() {
        writeln!(out, "{} {} {}", p.r, p.g, p.b)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgb;

    #[test]
    fn rows_are_written_top_to_bottom() {
        let mut screen = Screen::new(1, 3);
        for (y, row) in screen.rows_mut().enumerate() {
            row[0] = Rgb::new(y as u8, 0, 0);
        }
        let mut out = Vec::new();
        write_ppm(&mut out, &screen).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[..3], ["P3", "1 3", "255"]);
        assert_eq!(lines[3..], ["0 0 0", "1 0 0", "2 0 0"]);
    }

    #[test]
    fn pixel_count_matches_header() {
        let screen = Screen::new(4, 5);
        let mut out = Vec::new();
        write_ppm(&mut out, &screen).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 3 + 4 * 5);
    }
}
