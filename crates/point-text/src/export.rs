//! SVG output for a [Portrait], and reading markers back out of one.

use std::fs;
use std::path::Path;

use svg::Document;
use svg::node::element::tag::{self, Type};
use svg::node::element::{Circle, Group, Rectangle};
use svg::parser::Event;
use tracing::debug;

use crate::{Error, Marker, MarkerList, Portrait};

/// Id of the group holding every marker circle.
pub const POINTS_GROUP: &str = "points";

fn circle(marker: &Marker) -> Circle {
    Circle::new()
        .set("cx", marker.cx)
        .set("cy", marker.cy)
        .set("r", marker.r)
        .set("style", marker.style.as_str())
}

/// Build an SVG document with one filled circle per marker, sized to the
/// portrait's bitmap. A `background` colour adds a rectangle behind the
/// points.
pub fn to_document(portrait: &Portrait, background: Option<&str>) -> Document {
    let (width, height) = (portrait.width, portrait.height);

    let points = portrait
        .markers
        .iter()
        .fold(Group::new().set("id", POINTS_GROUP), |group, marker| {
            group.add(circle(marker))
        });

    let mut document = Document::new()
        .set("version", "1.1")
        .set("viewBox", (0, 0, width, height))
        .set("width", width)
        .set("height", height);

    if let Some(fill) = background {
        document = document.add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", width)
                .set("height", height)
                .set("fill", fill),
        );
    }

    document.add(points)
}

/// Write `document` to `path`.
pub fn save(path: impl AsRef<Path>, document: &Document) -> Result<(), Error> {
    let path = path.as_ref();
    svg::save(path, document).map_err(|e| Error::io(path, e))?;
    debug!(path = %path.display(), "saved svg");
    Ok(())
}

fn number(attributes: &svg::node::Attributes, name: &str) -> Result<f64, Error> {
    let value = attributes
        .get(name)
        .ok_or_else(|| Error::Svg(format!("circle is missing `{name}`")))?;
    value
        .parse()
        .map_err(|_| Error::Svg(format!("circle `{name}` is not a number: {value}")))
}

/// Read every `circle` element of an SVG document back into markers, in
/// document order.
pub fn parse_markers(content: &str) -> Result<MarkerList, Error> {
    let parser = svg::read(content).map_err(|e| Error::Svg(e.to_string()))?;
    let mut markers = MarkerList::new();

    for event in parser {
        match event {
            Event::Tag(tag::Circle, Type::Start | Type::Empty, attributes) => {
                markers.push(Marker {
                    cx: number(&attributes, "cx")?,
                    cy: number(&attributes, "cy")?,
                    r: number(&attributes, "r")?,
                    style: attributes
                        .get("style")
                        .map(|style| style.to_string())
                        .unwrap_or_default(),
                });
            }
            Event::Error(e) => return Err(Error::Svg(e.to_string())),
            _ => {}
        }
    }

    Ok(markers)
}

/// Read the markers out of an SVG file.
pub fn open_markers(path: impl AsRef<Path>) -> Result<MarkerList, Error> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_markers(&content)
}
