//! CSS Color values and parsing
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//!
//! Every notation a stylesheet can spell a color in resolves to one
//! [`ColorValue`], whose canonical text is `rgba(r, g, b, a)`.

use crate::parser::ComponentValue;
use crate::tokenizer::CSSToken;

use super::format_number;
use super::units::angle_to_degrees;

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorValue {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

/// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
///
/// "CSS defines a large set of named colors, so that common colors can be
/// written and read more easily."
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("aliceblue", [240, 248, 255]),
    ("antiquewhite", [250, 235, 215]),
    ("aqua", [0, 255, 255]),
    ("aquamarine", [127, 255, 212]),
    ("azure", [240, 255, 255]),
    ("beige", [245, 245, 220]),
    ("bisque", [255, 228, 196]),
    ("black", [0, 0, 0]),
    ("blanchedalmond", [255, 235, 205]),
    ("blue", [0, 0, 255]),
    ("blueviolet", [138, 43, 226]),
    ("brown", [165, 42, 42]),
    ("burlywood", [222, 184, 135]),
    ("cadetblue", [95, 158, 160]),
    ("chartreuse", [127, 255, 0]),
    ("chocolate", [210, 105, 30]),
    ("coral", [255, 127, 80]),
    ("cornflowerblue", [100, 149, 237]),
    ("cornsilk", [255, 248, 220]),
    ("crimson", [220, 20, 60]),
    ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]),
    ("darkcyan", [0, 139, 139]),
    ("darkgoldenrod", [184, 134, 11]),
    ("darkgray", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]),
    ("darkgrey", [169, 169, 169]),
    ("darkkhaki", [189, 183, 107]),
    ("darkmagenta", [139, 0, 139]),
    ("darkolivegreen", [85, 107, 47]),
    ("darkorange", [255, 140, 0]),
    ("darkorchid", [153, 50, 204]),
    ("darkred", [139, 0, 0]),
    ("darksalmon", [233, 150, 122]),
    ("darkseagreen", [143, 188, 143]),
    ("darkslateblue", [72, 61, 139]),
    ("darkslategray", [47, 79, 79]),
    ("darkslategrey", [47, 79, 79]),
    ("darkturquoise", [0, 206, 209]),
    ("darkviolet", [148, 0, 211]),
    ("deeppink", [255, 20, 147]),
    ("deepskyblue", [0, 191, 255]),
    ("dimgray", [105, 105, 105]),
    ("dimgrey", [105, 105, 105]),
    ("dodgerblue", [30, 144, 255]),
    ("firebrick", [178, 34, 34]),
    ("floralwhite", [255, 250, 240]),
    ("forestgreen", [34, 139, 34]),
    ("fuchsia", [255, 0, 255]),
    ("gainsboro", [220, 220, 220]),
    ("ghostwhite", [248, 248, 255]),
    ("gold", [255, 215, 0]),
    ("goldenrod", [218, 165, 32]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("greenyellow", [173, 255, 47]),
    ("grey", [128, 128, 128]),
    ("honeydew", [240, 255, 240]),
    ("hotpink", [255, 105, 180]),
    ("indianred", [205, 92, 92]),
    ("indigo", [75, 0, 130]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lavenderblush", [255, 240, 245]),
    ("lawngreen", [124, 252, 0]),
    ("lemonchiffon", [255, 250, 205]),
    ("lightblue", [173, 216, 230]),
    ("lightcoral", [240, 128, 128]),
    ("lightcyan", [224, 255, 255]),
    ("lightgoldenrodyellow", [250, 250, 210]),
    ("lightgray", [211, 211, 211]),
    ("lightgreen", [144, 238, 144]),
    ("lightgrey", [211, 211, 211]),
    ("lightpink", [255, 182, 193]),
    ("lightsalmon", [255, 160, 122]),
    ("lightseagreen", [32, 178, 170]),
    ("lightskyblue", [135, 206, 250]),
    ("lightslategray", [119, 136, 153]),
    ("lightslategrey", [119, 136, 153]),
    ("lightsteelblue", [176, 196, 222]),
    ("lightyellow", [255, 255, 224]),
    ("lime", [0, 255, 0]),
    ("limegreen", [50, 205, 50]),
    ("linen", [250, 240, 230]),
    ("magenta", [255, 0, 255]),
    ("maroon", [128, 0, 0]),
    ("mediumaquamarine", [102, 205, 170]),
    ("mediumblue", [0, 0, 205]),
    ("mediumorchid", [186, 85, 211]),
    ("mediumpurple", [147, 112, 219]),
    ("mediumseagreen", [60, 179, 113]),
    ("mediumslateblue", [123, 104, 238]),
    ("mediumspringgreen", [0, 250, 154]),
    ("mediumturquoise", [72, 209, 204]),
    ("mediumvioletred", [199, 21, 133]),
    ("midnightblue", [25, 25, 112]),
    ("mintcream", [245, 255, 250]),
    ("mistyrose", [255, 228, 225]),
    ("moccasin", [255, 228, 181]),
    ("navajowhite", [255, 222, 173]),
    ("navy", [0, 0, 128]),
    ("oldlace", [253, 245, 230]),
    ("olive", [128, 128, 0]),
    ("olivedrab", [107, 142, 35]),
    ("orange", [255, 165, 0]),
    ("orangered", [255, 69, 0]),
    ("orchid", [218, 112, 214]),
    ("palegoldenrod", [238, 232, 170]),
    ("palegreen", [152, 251, 152]),
    ("paleturquoise", [175, 238, 238]),
    ("palevioletred", [219, 112, 147]),
    ("papayawhip", [255, 239, 213]),
    ("peachpuff", [255, 218, 185]),
    ("peru", [205, 133, 63]),
    ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]),
    ("powderblue", [176, 224, 230]),
    ("purple", [128, 0, 128]),
    ("rebeccapurple", [102, 51, 153]),
    ("red", [255, 0, 0]),
    ("rosybrown", [188, 143, 143]),
    ("royalblue", [65, 105, 225]),
    ("saddlebrown", [139, 69, 19]),
    ("salmon", [250, 128, 114]),
    ("sandybrown", [244, 164, 96]),
    ("seagreen", [46, 139, 87]),
    ("seashell", [255, 245, 238]),
    ("sienna", [160, 82, 45]),
    ("silver", [192, 192, 192]),
    ("skyblue", [135, 206, 235]),
    ("slateblue", [106, 90, 205]),
    ("slategray", [112, 128, 144]),
    ("slategrey", [112, 128, 144]),
    ("snow", [255, 250, 250]),
    ("springgreen", [0, 255, 127]),
    ("steelblue", [70, 130, 180]),
    ("tan", [210, 180, 140]),
    ("teal", [0, 128, 128]),
    ("thistle", [216, 191, 216]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("wheat", [245, 222, 179]),
    ("white", [255, 255, 255]),
    ("whitesmoke", [245, 245, 245]),
    ("yellow", [255, 255, 0]),
    ("yellowgreen", [154, 205, 50]),
];

impl ColorValue {
    /// Black (#000000)
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };

    /// [§ 6.3 The transparent keyword](https://www.w3.org/TR/css-color-4/#transparent-color)
    ///
    /// "transparent black"
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    /// [§ 5.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    ///
    /// "The syntax of a <hex-color> is a <hash-token> token whose value consists of
    /// 3, 4, 6, or 8 hexadecimal digits."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        // "The three-digit RGB notation (#RGB) is converted into six-digit form
        // (#RRGGBB) by replicating digits, not by adding zeros."
        let short = |i: usize| u8::from_str_radix(&hex[i..=i].repeat(2), 16).ok();
        let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Self { r: short(0)?, g: short(1)?, b: short(2)?, a: 255 }),
            4 => Some(Self { r: short(0)?, g: short(1)?, b: short(2)?, a: short(3)? }),
            6 => Some(Self { r: long(0)?, g: long(2)?, b: long(4)?, a: 255 }),
            8 => Some(Self { r: long(0)?, g: long(2)?, b: long(4)?, a: long(6)? }),
            _ => None,
        }
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    ///
    /// Looks up a named color (or `transparent`), ASCII case-insensitively.
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        if name == "transparent" {
            return Some(Self::TRANSPARENT);
        }
        NAMED_COLORS
            .binary_search_by(|(candidate, _)| (*candidate).cmp(name.as_str()))
            .ok()
            .map(|i| {
                let [r, g, b] = NAMED_COLORS[i].1;
                Self { r, g, b, a: 255 }
            })
    }

    /// Check whether `name` is a named color keyword (including `transparent`).
    #[must_use]
    pub fn is_named(name: &str) -> bool {
        Self::from_named(name).is_some()
    }

    /// The canonical text of this color: `rgba(r, g, b, a)` with alpha in
    /// `[0, 1]`.
    ///
    /// Parsing the canonical text yields the same color again.
    #[must_use]
    pub fn to_canonical(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            format_number(f64::from(self.a) / 255.0)
        )
    }
}

/// Parse a single component value as a color.
#[must_use]
pub fn parse_single_color(v: &ComponentValue) -> Option<ColorValue> {
    match v {
        ComponentValue::Token(CSSToken::Hash(value)) => ColorValue::from_hex(value),
        ComponentValue::Token(CSSToken::Ident(name)) => ColorValue::from_named(name),
        ComponentValue::Function { name, value } => parse_color_function(name, value),
        ComponentValue::Token(_) | ComponentValue::Block { .. } => None,
    }
}

/// [§ 5.1 The RGB Functions: rgb() and rgba()](https://www.w3.org/TR/css-color-4/#rgb-functions)
/// [§ 7.1 The HSL Functions: hsl() and hsla()](https://www.w3.org/TR/css-color-4/#the-hsl-notation)
///
/// Per CSS Color 4, rgb()/rgba() and hsl()/hsla() are aliases.
fn parse_color_function(name: &str, args: &[ComponentValue]) -> Option<ColorValue> {
    match name.to_ascii_lowercase().as_str() {
        "rgb" | "rgba" => parse_rgb_function(args),
        "hsl" | "hsla" => parse_hsl_function(args),
        _ => None,
    }
}

/// A numeric value extracted from a color function argument.
#[derive(Debug, Clone, Copy)]
enum ColorArg {
    Number(f64),
    Percentage(f64),
    /// An angle, already converted to degrees.
    Degrees(f64),
}

/// Extract numeric arguments from a color function's component values.
///
/// Whitespace, commas and the `/` before alpha are separators, so legacy
/// (comma) and modern (space and slash) syntaxes produce the same list.
/// Returns `None` if any argument is not numeric (e.g. `var()` or `none`).
fn extract_color_args(args: &[ComponentValue]) -> Option<Vec<ColorArg>> {
    let mut result = Vec::new();

    for arg in args {
        match arg {
            ComponentValue::Token(CSSToken::Number(value)) => {
                result.push(ColorArg::Number(*value));
            }
            ComponentValue::Token(CSSToken::Percentage(value)) => {
                result.push(ColorArg::Percentage(*value));
            }
            ComponentValue::Token(CSSToken::Dimension { value, unit }) => {
                result.push(ColorArg::Degrees(angle_to_degrees(*value, unit)?));
            }
            ComponentValue::Token(CSSToken::Whitespace | CSSToken::Comma | CSSToken::Delim('/')) => {}
            _ => return None,
        }
    }

    Some(result)
}

/// [§ 5.1 The RGB Functions](https://www.w3.org/TR/css-color-4/#rgb-functions)
///
/// "Values outside these ranges are not invalid, but are clamped to the
/// ranges defined here at parsed-value time."
fn parse_rgb_function(args: &[ComponentValue]) -> Option<ColorValue> {
    let vals = extract_color_args(args)?;
    if !(3..=4).contains(&vals.len()) {
        return None;
    }

    // "The final argument, <alpha-value>, specifies the alpha of the color."
    // "If omitted, it defaults to 100%."
    let a = vals.get(3).map_or(Some(255), |&arg| alpha_to_u8(arg))?;

    Some(ColorValue {
        r: color_channel_to_u8(vals[0])?,
        g: color_channel_to_u8(vals[1])?,
        b: color_channel_to_u8(vals[2])?,
        a,
    })
}

/// [§ 7.1 The HSL Functions](https://www.w3.org/TR/css-color-4/#the-hsl-notation)
///
/// "<hue> is a <number> or <angle>, interpreted as degrees."
fn parse_hsl_function(args: &[ComponentValue]) -> Option<ColorValue> {
    let vals = extract_color_args(args)?;
    if !(3..=4).contains(&vals.len()) {
        return None;
    }

    let hue = match vals[0] {
        ColorArg::Number(v) | ColorArg::Degrees(v) => v,
        ColorArg::Percentage(_) => return None,
    };
    let fraction = |arg: ColorArg| match arg {
        ColorArg::Percentage(v) | ColorArg::Number(v) => Some(v / 100.0),
        ColorArg::Degrees(_) => None,
    };
    let saturation = fraction(vals[1])?;
    let lightness = fraction(vals[2])?;
    let a = vals.get(3).map_or(Some(255), |&arg| alpha_to_u8(arg))?;

    let (r, g, b) = hsl_to_rgb(hue, saturation, lightness);
    Some(ColorValue { r, g, b, a })
}

/// Numbers are clamped to 0-255; percentages map 0%-100% to 0-255.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn color_channel_to_u8(arg: ColorArg) -> Option<u8> {
    let v = match arg {
        ColorArg::Number(n) => n,
        // "100% = 255"
        ColorArg::Percentage(p) => p * 255.0 / 100.0,
        ColorArg::Degrees(_) => return None,
    };
    Some(v.round().clamp(0.0, 255.0) as u8)
}

/// "The <alpha-value> can be a <number> (clamped to [0, 1]) or a
/// <percentage> (clamped to [0%, 100%])."
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn alpha_to_u8(arg: ColorArg) -> Option<u8> {
    let v = match arg {
        ColorArg::Number(n) => n * 255.0,
        ColorArg::Percentage(p) => p * 255.0 / 100.0,
        ColorArg::Degrees(_) => return None,
    };
    Some(v.round().clamp(0.0, 255.0) as u8)
}

/// [§ 7.1 Converting HSL Colors to sRGB](https://www.w3.org/TR/css-color-4/#hsl-to-rgb)
///
/// - hue: angle in degrees (wraps)
/// - saturation, lightness: 0.0-1.0 (clamped)
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let h = hue.rem_euclid(360.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let c = (1.0 - 2.0f64.mul_add(l, -1.0).abs()) * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - (h_prime % 2.0 - 1.0).abs());

    let (r1, g1, b1) = match h_prime as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let m = l - c / 2.0;
    let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

    (to_u8(r1), to_u8(g1), to_u8(b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_color_table_is_sorted() {
        assert!(NAMED_COLORS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), (255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), (0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), (0, 0, 255));
        assert_eq!(hsl_to_rgb(-120.0, 1.0, 0.5), (0, 0, 255));
    }
}
