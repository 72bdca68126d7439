use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

pub const DEFAULT_FONT_SIZE: u32 = 48;
pub const DEFAULT_TEXT_COLOR: &str = "#FFFFFF";
pub const DEFAULT_OUTLINE: bool = true;
pub const DEFAULT_OUTLINE_WIDTH: u32 = 2;
pub const DEFAULT_OUTLINE_COLOR: &str = "#222222";
pub const DEFAULT_CONTAINER_WIDTH: u32 = 1200;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$").unwrap());

/// User supplied styling. `None` means "not configured"; the defaults are
/// only substituted when the style is resolved.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StyleParameters {
    #[serde(default)]
    pub font_size: Option<u32>,
    #[serde(default)]
    pub text_color: Option<String>,
    #[serde(default)]
    pub outline: Option<bool>,
    #[serde(default)]
    pub outline_width: Option<u32>,
    #[serde(default)]
    pub outline_color: Option<String>,
    #[serde(default)]
    pub container_width: Option<u32>,
}

/// Styling with every default filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub font_size: u32,
    pub text_color: String,
    pub outline: bool,
    pub outline_width: u32,
    pub outline_color: String,
    pub container_width: u32,
}

impl StyleParameters {
    /// Overlays `other` on top of `self`: every field configured in `other`
    /// wins.
    pub fn merge(self, other: StyleParameters) -> StyleParameters {
        StyleParameters {
            font_size: other.font_size.or(self.font_size),
            text_color: other.text_color.or(self.text_color),
            outline: other.outline.or(self.outline),
            outline_width: other.outline_width.or(self.outline_width),
            outline_color: other.outline_color.or(self.outline_color),
            container_width: other.container_width.or(self.container_width),
        }
    }

    pub fn resolve(&self) -> ResolvedStyle {
        ResolvedStyle {
            font_size: px_or(self.font_size, DEFAULT_FONT_SIZE),
            text_color: color_or(self.text_color.as_deref(), DEFAULT_TEXT_COLOR),
            outline: self.outline.unwrap_or(DEFAULT_OUTLINE),
            outline_width: px_or(self.outline_width, DEFAULT_OUTLINE_WIDTH),
            outline_color: color_or(self.outline_color.as_deref(), DEFAULT_OUTLINE_COLOR),
            container_width: px_or(self.container_width, DEFAULT_CONTAINER_WIDTH),
        }
    }
}

impl ResolvedStyle {
    /// Wraps `text` in a span carrying the inline style. Declarations are
    /// always emitted as colour, size, then outline.
    pub fn render(&self, text: &str) -> String {
        let mut declarations = vec![
            format!("color: {}", self.text_color),
            format!("font-size: {}px", self.font_size),
        ];
        if self.outline {
            declarations.push(format!(
                "-webkit-text-stroke: {}px {}",
                self.outline_width, self.outline_color
            ));
        }
        format!(
            "<span style=\"{};\">{}</span>",
            declarations.join("; "),
            text
        )
    }
}

// A zero size is never usable, so it counts as unset.
fn px_or(value: Option<u32>, default: u32) -> u32 {
    value.filter(|v| *v > 0).unwrap_or(default)
}

fn color_or(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        None | Some("") => default.to_string(),
        Some(color) if HEX_COLOR.is_match(color) => color.to_string(),
        Some(color) => {
            tracing::warn!(color, fallback = default, "ignoring invalid colour");
            default.to_string()
        }
    }
}
