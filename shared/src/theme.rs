//! Palette and font defaults shared by every chart on the page.
//!
//! A [`Theme`] is an immutable value handed to each descriptor builder.
//! Nothing here touches global chart-library defaults.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub blue: &'static str,
    pub green: &'static str,
    pub red: &'static str,
    pub orange: &'static str,
    pub purple: &'static str,
    pub cyan: &'static str,
    pub yellow: &'static str,
    pub pink: &'static str,
    pub background: &'static str,
    pub border: &'static str,
    pub muted: &'static str,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            blue: "#3B9EFF",
            green: "#10D98C",
            red: "#FF4D6D",
            orange: "#FF8C42",
            purple: "#9B6DFF",
            cyan: "#00E5FF",
            yellow: "#FFD60A",
            pink: "#FF6EB4",
            background: "#0D1421",
            border: "#1E2D45",
            muted: "#6B7FA0",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<&'static str>,
}

impl Font {
    pub fn sized(size: u32) -> Self {
        Self {
            family: None,
            size: Some(size),
            weight: None,
        }
    }

    pub fn bold(size: u32) -> Self {
        Self {
            weight: Some("bold"),
            ..Self::sized(size)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub palette: Palette,
    /// Default text colour for ticks, legends and titles.
    pub text_color: &'static str,
    pub font_family: &'static str,
    pub font_size: u32,
    /// Grid line colour for value axes.
    pub grid_color: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        let palette = Palette::default();
        Self {
            palette,
            text_color: palette.muted,
            font_family: "'JetBrains Mono', 'Noto Sans KR', sans-serif",
            font_size: 12,
            grid_color: "rgba(30,45,69,0.8)",
        }
    }
}

impl Theme {
    pub fn base_font(&self) -> Font {
        Font {
            family: Some(self.font_family.to_owned()),
            size: Some(self.font_size),
            weight: None,
        }
    }
}

/// Converts `#RRGGBB` into an `rgba(r,g,b,alpha)` string.
///
/// Anything that is not a six digit hex colour is returned unchanged.
pub fn translucent(hex: &str, alpha: f64) -> String {
    let channel = |range: std::ops::Range<usize>| {
        hex.strip_prefix('#')
            .filter(|digits| digits.len() == 6)
            .and_then(|digits| digits.get(range))
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
    };
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => format!("rgba({r},{g},{b},{alpha})"),
        _ => hex.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translucent_expands_hex() {
        assert_eq!(translucent("#3B9EFF", 0.7), "rgba(59,158,255,0.7)");
        assert_eq!(translucent("#10D98C", 0.9), "rgba(16,217,140,0.9)");
    }

    #[test]
    fn translucent_leaves_unknown_formats_alone() {
        assert_eq!(translucent("teal", 0.5), "teal");
        assert_eq!(translucent("#FFF", 0.5), "#FFF");
    }
}
