use svg::Document;
use svg::node::element::{Circle, Group, Rectangle};

use point_text::{GenerationParams, render_seeded};

fn draw_line(params: &GenerationParams, y_offset: f64, margin: f64) -> Result<(Group, f64, f64), point_text::Error> {
    let portrait = render_seeded(params, 7)?;

    let mut group = Group::new().set("transform", format!("translate({margin} {y_offset})"));

    for marker in &portrait.markers {
        group = group.add(
            Circle::new()
                .set("cx", marker.cx)
                .set("cy", marker.cy)
                .set("r", marker.r)
                .set("style", marker.style.as_str()),
        );
    }

    Ok((group, portrait.width as f64, y_offset + portrait.height as f64))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let margin = 10.0;

    let base = GenerationParams {
        point_size: 1.2,
        steps: 160,
        rings: 24,
        ..GenerationParams::default()
    };

    let lines = [
        GenerationParams {
            text: "Monospace".into(),
            ..base.clone()
        },
        GenerationParams {
            text: "Bold and tilted".into(),
            font: "bold 48px monospace".into(),
            tilt: 0.4,
            ..base.clone()
        },
        GenerationParams {
            text: "Italic, jittered".into(),
            font: "italic 48px monospace".into(),
            jitter: 1.5,
            color: "#2255aa".into(),
            ..base.clone()
        },
        GenerationParams {
            text: "Bunched up".into(),
            spread: 8.0,
            ..base.clone()
        },
    ];

    let mut y_offset = 0.0;
    let mut width: f64 = 0.0;
    let mut elements: Vec<Group> = Vec::new();

    for params in &lines {
        let (group, line_width, y) = draw_line(params, y_offset, margin)?;
        elements.push(group);
        width = width.max(line_width + 2.0 * margin);
        y_offset = y;
    }

    let height = y_offset;

    let background = Rectangle::new()
        .set("x", 0)
        .set("y", 0)
        .set("width", width)
        .set("height", height)
        .set("fill", "white");

    let mut document = Document::new().add(background);

    for el in elements {
        document = document.add(el);
    }

    let document = document
        .set("viewBox", (0, 0, width, height))
        .set("width", format!("{width}px"))
        .set("height", format!("{height}px"));

    svg::save("output_points.svg", &document)?;
    println!("Wrote output_points.svg");

    Ok(())
}
