use std::fmt;
use std::str::FromStr;

/// 3pt == 4px.
const PT_TO_PX: (f64, f64) = (4.0, 3.0);

/// A parsed CSS font shorthand, e.g. `italic bold 32px "Fira Mono", monospace`.
///
/// Only the parts a rasterizer needs are kept: style, weight, pixel size and
/// the family list in preference order.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub size_px: f64,
    pub bold: bool,
    pub italic: bool,
    pub families: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FontSpecError {
    #[error("font specification is empty")]
    Empty,
    #[error("font specification '{0}' has no size (expected e.g. 48px)")]
    MissingSize(String),
    #[error("font size '{0}' is not a positive number of px or pt")]
    InvalidSize(String),
    #[error("font specification '{0}' has no family")]
    MissingFamily(String),
}

impl FontSpec {
    /// The first family, in preference order, accepted by `supported`.
    pub fn pick_family(&self, supported: impl Fn(&str) -> bool) -> Option<&str> {
        self.families
            .iter()
            .map(String::as_str)
            .find(|family| supported(family))
    }
}

/// Parse a size token such as `48px`, `12pt` or `48px/1.2`.
///
/// Returns `None` when the token is not a size at all.
fn parse_size(token: &str) -> Option<Result<f64, FontSpecError>> {
    let size = token.split('/').next().unwrap_or(token);
    let (number, (num, den)) = if let Some(number) = size.strip_suffix("px") {
        (number, (1.0, 1.0))
    } else if let Some(number) = size.strip_suffix("pt") {
        (number, PT_TO_PX)
    } else {
        return None;
    };

    let invalid = || FontSpecError::InvalidSize(token.to_string());
    Some(match number.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value * num / den),
        _ => Err(invalid()),
    })
}

impl FromStr for FontSpec {
    type Err = FontSpecError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(FontSpecError::Empty);
        }

        let mut bold = false;
        let mut italic = false;
        let mut size_px = None;
        let mut rest = "";

        let mut remaining = spec;
        while let Some(token) = remaining.split_whitespace().next() {
            let offset = remaining.find(token).unwrap_or(0) + token.len();
            remaining = &remaining[offset..];

            if let Some(size) = parse_size(token) {
                size_px = Some(size?);
                rest = remaining;
                break;
            }

            match token.to_ascii_lowercase().as_str() {
                "italic" | "oblique" => italic = true,
                "bold" | "bolder" => bold = true,
                weight => {
                    if let Ok(weight) = weight.parse::<u16>() {
                        bold = weight >= 600;
                    }
                }
            }
        }

        let size_px = size_px.ok_or_else(|| FontSpecError::MissingSize(spec.to_string()))?;

        let families: Vec<String> = rest
            .split(',')
            .map(|family| family.trim().trim_matches(|c| c == '"' || c == '\''))
            .filter(|family| !family.is_empty())
            .map(str::to_string)
            .collect();

        if families.is_empty() {
            return Err(FontSpecError::MissingFamily(spec.to_string()));
        }

        Ok(Self {
            size_px,
            bold,
            italic,
            families,
        })
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.italic {
            f.write_str("italic ")?;
        }
        if self.bold {
            f.write_str("bold ")?;
        }
        write!(f, "{}px {}", self.size_px, self.families.join(", "))
    }
}
