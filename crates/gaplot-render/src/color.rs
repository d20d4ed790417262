use std::{fmt, str::FromStr};

use plotters::style::RGBColor;
use serde::{Deserialize, Deserializer, Serialize, de};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown color '{input}' (expected a color name or #rrggbb)")]
pub struct ParseColorError {
    input: String,
}

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0x00, 0x00, 0x00]),
    ("white", [0xff, 0xff, 0xff]),
    ("red", [0xff, 0x00, 0x00]),
    ("green", [0x00, 0x80, 0x00]),
    ("lime", [0x00, 0xff, 0x00]),
    ("blue", [0x00, 0x00, 0xff]),
    ("navy", [0x00, 0x00, 0x80]),
    ("cyan", [0x00, 0xff, 0xff]),
    ("teal", [0x00, 0x80, 0x80]),
    ("magenta", [0xff, 0x00, 0xff]),
    ("purple", [0x80, 0x00, 0x80]),
    ("violet", [0xee, 0x82, 0xee]),
    ("yellow", [0xff, 0xff, 0x00]),
    ("gold", [0xff, 0xd7, 0x00]),
    ("orange", [0xff, 0xa5, 0x00]),
    ("darkorange", [0xff, 0x8c, 0x00]),
    ("pink", [0xff, 0xc0, 0xcb]),
    ("salmon", [0xfa, 0x80, 0x72]),
    ("brown", [0xa5, 0x2a, 0x2a]),
    ("wheat", [0xf5, 0xde, 0xb3]),
    ("gray", [0x80, 0x80, 0x80]),
    ("grey", [0x80, 0x80, 0x80]),
    ("silver", [0xc0, 0xc0, 0xc0]),
    ("skyblue", [0x87, 0xce, 0xeb]),
];

/// An opaque RGB color, written as a name (`darkorange`) or `#rrggbb`.
///
/// Named colors keep their name when serialized back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct SeriesColor {
    rgb: [u8; 3],
    name: Option<&'static str>,
}

impl SeriesColor {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            rgb: [r, g, b],
            name: None,
        }
    }

    /// Looks up a named color.
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        NAMED_COLORS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(name, rgb)| Self {
                rgb,
                name: Some(name),
            })
    }

    #[must_use]
    pub fn components(self) -> [u8; 3] {
        self.rgb
    }
}

impl fmt::Display for SeriesColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => f.write_str(name),
            None => {
                let [r, g, b] = self.rgb;
                write!(f, "#{r:02x}{g:02x}{b:02x}")
            }
        }
    }
}

impl FromStr for SeriesColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseColorError {
            input: s.to_owned(),
        };
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(err());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
            return Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?));
        }
        Self::named(s).ok_or_else(err)
    }
}

impl<'de> Deserialize<'de> for SeriesColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl From<SeriesColor> for String {
    fn from(color: SeriesColor) -> Self {
        color.to_string()
    }
}

impl From<SeriesColor> for RGBColor {
    fn from(color: SeriesColor) -> Self {
        let [r, g, b] = color.rgb;
        RGBColor(r, g, b)
    }
}
