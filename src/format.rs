use serde::{Serialize, Serializer};
use std::fmt::{self, Display};

use crate::model::{Color, TokenValue};
use crate::rules::{self, ALIAS_PLACEHOLDER, ROTATION_KEYWORDS, WEIGHT_KEYWORD};

/// A literal ready for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedValue {
    Text(String),
    /// Numeric font weight mapped from a named weight.
    Weight(u16),
    /// The alias chain did not reach a literal.
    Unresolved,
}

impl ResolvedValue {
    pub fn is_unresolved(&self) -> bool {
        matches!(self, ResolvedValue::Unresolved)
    }
}

impl Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedValue::Text(text) => f.write_str(text),
            ResolvedValue::Weight(weight) => write!(f, "{weight}"),
            ResolvedValue::Unresolved => f.write_str(ALIAS_PLACEHOLDER),
        }
    }
}

impl Serialize for ResolvedValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ResolvedValue::Text(text) => serializer.serialize_str(text),
            ResolvedValue::Weight(weight) => serializer.serialize_u16(*weight),
            ResolvedValue::Unresolved => serializer.serialize_str(ALIAS_PLACEHOLDER),
        }
    }
}

/// Formats a literal for the token called `token_name`. Aliases have no literal form.
pub fn format_literal(value: &TokenValue, token_name: &str) -> Option<ResolvedValue> {
    let name = token_name.to_lowercase();
    let formatted = match value {
        TokenValue::Alias(_) => return None,
        TokenValue::Color(color) => ResolvedValue::Text(color_to_css(color)),
        TokenValue::Number(number) => ResolvedValue::Text(number_to_css(*number, &name)),
        TokenValue::Boolean(flag) => ResolvedValue::Text(flag.to_string()),
        TokenValue::String(text) if name.contains(WEIGHT_KEYWORD) => match rules::font_weight(text) {
            Some(weight) => ResolvedValue::Weight(weight),
            None => ResolvedValue::Text(text.clone()),
        },
        TokenValue::String(text) => ResolvedValue::Text(text.clone()),
    };
    Some(formatted)
}

fn channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Two decimals, with halves rounded away from zero.
fn alpha_2dp(alpha: f64) -> String {
    format!("{:.2}", (alpha * 100.0).round() / 100.0)
}

fn is_opaque(color: &Color) -> bool {
    (color.a - 1.0).abs() < f64::EPSILON
}

/// `#RRGGBB` for opaque colors, `rgba(r, g, b, a)` with a two-decimal alpha otherwise.
pub fn color_to_css(color: &Color) -> String {
    let (r, g, b) = (channel(color.r), channel(color.g), channel(color.b));
    if is_opaque(color) {
        format!("#{r:02X}{g:02X}{b:02X}")
    } else {
        format!("rgba({r}, {g}, {b}, {})", alpha_2dp(color.a))
    }
}

/// Same as [`color_to_css`] but with trailing zeros dropped from the alpha.
pub fn color_to_w3c(color: &Color) -> String {
    let (r, g, b) = (channel(color.r), channel(color.g), channel(color.b));
    if is_opaque(color) {
        return format!("#{r:02X}{g:02X}{b:02X}");
    }
    let alpha = alpha_2dp(color.a);
    let alpha = alpha.trim_end_matches('0').trim_end_matches('.');
    format!("rgba({r}, {g}, {b}, {alpha})")
}

fn number_to_css(number: f64, lowercase_name: &str) -> String {
    if ROTATION_KEYWORDS
        .iter()
        .any(|keyword| lowercase_name.contains(keyword))
    {
        return format!("{number}deg");
    }
    if number == 0.0 {
        return "0".to_string();
    }
    format!("{number}px")
}

/// The alpha channel of an `rgba(...)` string, if `value` is one.
pub fn extract_alpha(value: &str) -> Option<&str> {
    let inner = value.strip_prefix("rgba(")?.strip_suffix(')')?;
    let (_, alpha) = inner.rsplit_once(',')?;
    let alpha = alpha.trim();
    let numeric = !alpha.is_empty() && alpha.chars().all(|c| c.is_ascii_digit() || c == '.');
    numeric.then_some(alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(r: f64, g: f64, b: f64, a: f64) -> Color {
        Color { r, g, b, a }
    }

    #[test]
    fn opaque_colors_render_as_hex() {
        assert_eq!(color_to_css(&color(1.0, 0.0, 0.0, 1.0)), "#FF0000");
        assert_eq!(color_to_css(&color(0.0784, 0.5176, 1.0, 1.0)), "#1484FF");
    }

    #[test]
    fn translucent_colors_render_as_rgba() {
        assert_eq!(color_to_css(&color(1.0, 0.0, 0.0, 0.5)), "rgba(255, 0, 0, 0.50)");
        assert_eq!(color_to_w3c(&color(1.0, 0.0, 0.0, 0.5)), "rgba(255, 0, 0, 0.5)");
        assert_eq!(color_to_w3c(&color(0.0, 0.0, 0.0, 0.0)), "rgba(0, 0, 0, 0)");
    }

    #[test]
    fn alpha_halves_round_up() {
        assert_eq!(color_to_css(&color(1.0, 0.0, 0.0, 0.125)), "rgba(255, 0, 0, 0.13)");
        assert_eq!(color_to_css(&color(1.0, 0.0, 0.0, 0.625)), "rgba(255, 0, 0, 0.63)");
        assert_eq!(color_to_w3c(&color(1.0, 0.0, 0.0, 0.125)), "rgba(255, 0, 0, 0.13)");
        assert_eq!(color_to_w3c(&color(1.0, 0.0, 0.0, 0.625)), "rgba(255, 0, 0, 0.63)");
        assert_eq!(color_to_css(&color(0.0, 0.0, 0.0, 0.32)), "rgba(0, 0, 0, 0.32)");
    }

    #[test]
    fn numbers_pick_a_unit_from_the_name() {
        let value = TokenValue::Number(16.0);
        assert_eq!(
            format_literal(&value, "space/md"),
            Some(ResolvedValue::Text("16px".into()))
        );
        assert_eq!(
            format_literal(&TokenValue::Number(0.0), "space/none"),
            Some(ResolvedValue::Text("0".into()))
        );
        assert_eq!(
            format_literal(&TokenValue::Number(45.0), "icon/Rotation"),
            Some(ResolvedValue::Text("45deg".into()))
        );
        assert_eq!(
            format_literal(&TokenValue::Number(90.0), "angle/Degree"),
            Some(ResolvedValue::Text("90deg".into()))
        );
        assert_eq!(
            format_literal(&TokenValue::Number(1.5), "border/width"),
            Some(ResolvedValue::Text("1.5px".into()))
        );
    }

    #[test]
    fn weights_map_to_numbers() {
        let bold = TokenValue::String("Bold".into());
        assert_eq!(format_literal(&bold, "font/weight"), Some(ResolvedValue::Weight(700)));
        let heavy = TokenValue::String("Heavy".into());
        assert_eq!(
            format_literal(&heavy, "font/weight"),
            Some(ResolvedValue::Text("Heavy".into()))
        );
        assert_eq!(
            format_literal(&bold, "font/family"),
            Some(ResolvedValue::Text("Bold".into()))
        );
    }

    #[test]
    fn extract_alpha_reads_the_last_channel() {
        assert_eq!(extract_alpha("rgba(0, 0, 0, 0.08)"), Some("0.08"));
        assert_eq!(extract_alpha("#000000"), None);
        assert_eq!(extract_alpha("rgba(0, 0, 0, x)"), None);
    }
}
