use std::{fs, path::PathBuf};

const NUM_GLYPHS: usize = 128;
const GLYPH_WIDTH: usize = 5;
const GLYPH_HEIGHT: usize = 7;

#[derive(Debug, Copy, Clone)]
struct Glyph {
    pub rows: [u8; GLYPH_HEIGHT],
}

type FontFile = [Option<Glyph>; NUM_GLYPHS];

/// Generate the glyph table Rust code that will be included in the crate.
fn generate_rust(font: &FontFile) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "static BITMAP_FONT: [Option<Glyph>; {}] = [\n",
        NUM_GLYPHS
    ));

    for glyph in font {
        match glyph {
            None => out.push_str("    None,\n"),
            Some(g) => {
                out.push_str("    Some(Glyph {\n");
                out.push_str("        rows: [");
                for row in g.rows {
                    out.push_str(&format!("0b{:05b}, ", row));
                }
                out.push_str("],\n    }),\n");
            }
        }
    }

    out.push_str("];\n");

    out
}

/// Parse one row of cells (`#` set, `.` clear) into bits, leftmost cell highest.
fn parse_row(line: &str) -> Result<u8, String> {
    if line.chars().count() != GLYPH_WIDTH {
        return Err(format!("row '{line}' is not {GLYPH_WIDTH} cells wide"));
    }

    line.chars().try_fold(0u8, |bits, cell| match cell {
        '#' => Ok((bits << 1) | 1),
        '.' => Ok(bits << 1),
        other => Err(format!("unexpected cell '{other}' in row '{line}'")),
    })
}

/// Load a file of glyph definitions.
fn load_file(file: &str) -> Result<FontFile, String> {
    let mut result = [None; NUM_GLYPHS];
    let mut lines = file
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(';'));

    while let Some(line) = lines.next() {
        let code = line
            .strip_prefix("glyph ")
            .ok_or_else(|| format!("expected a glyph header, found '{line}'"))?;
        let code = usize::from_str_radix(code.trim(), 16)
            .map_err(|e| format!("bad codepoint in '{line}': {e}"))?;

        if code >= NUM_GLYPHS {
            return Err(format!("codepoint {code:#x} is outside the font table"));
        }

        let mut rows = [0; GLYPH_HEIGHT];
        for row in rows.iter_mut() {
            let cells = lines
                .next()
                .ok_or_else(|| format!("glyph {code:#x} is missing rows"))?;
            *row = parse_row(cells)?;
        }

        result[code] = Some(Glyph { rows });
    }

    Ok(result)
}

fn main() {
    let data = fs::read_to_string("data/font5x7.txt").unwrap();

    let glyphs = load_file(&data).unwrap_or_else(|e| panic!("data/font5x7.txt: {e}"));

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let out_file = out_dir.join("bitmap_font.rs");

    fs::write(out_file, generate_rust(&glyphs)).unwrap();

    println!("cargo:rerun-if-changed=data/font5x7.txt");
}
