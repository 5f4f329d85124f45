use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Flat bar color used when the country count has no matching palette.
pub const DEFAULT_COLOR: Rgb = Rgb::from_hex(0x1f77b4);

const SPECTRAL_3: [Rgb; 3] = [
    Rgb::from_hex(0x99d594),
    Rgb::from_hex(0xffffbf),
    Rgb::from_hex(0xfc8d59),
];
const SPECTRAL_4: [Rgb; 4] = [
    Rgb::from_hex(0x2b83ba),
    Rgb::from_hex(0xabdda4),
    Rgb::from_hex(0xfdae61),
    Rgb::from_hex(0xd7191c),
];
const SPECTRAL_5: [Rgb; 5] = [
    Rgb::from_hex(0x2b83ba),
    Rgb::from_hex(0xabdda4),
    Rgb::from_hex(0xffffbf),
    Rgb::from_hex(0xfdae61),
    Rgb::from_hex(0xd7191c),
];
const SPECTRAL_6: [Rgb; 6] = [
    Rgb::from_hex(0x3288bd),
    Rgb::from_hex(0x99d594),
    Rgb::from_hex(0xe6f598),
    Rgb::from_hex(0xfee08b),
    Rgb::from_hex(0xfc8d59),
    Rgb::from_hex(0xd53e4f),
];
const SPECTRAL_7: [Rgb; 7] = [
    Rgb::from_hex(0x3288bd),
    Rgb::from_hex(0x99d594),
    Rgb::from_hex(0xe6f598),
    Rgb::from_hex(0xffffbf),
    Rgb::from_hex(0xfee08b),
    Rgb::from_hex(0xfc8d59),
    Rgb::from_hex(0xd53e4f),
];
const SPECTRAL_8: [Rgb; 8] = [
    Rgb::from_hex(0x3288bd),
    Rgb::from_hex(0x66c2a5),
    Rgb::from_hex(0xabdda4),
    Rgb::from_hex(0xe6f598),
    Rgb::from_hex(0xfee08b),
    Rgb::from_hex(0xfdae61),
    Rgb::from_hex(0xf46d43),
    Rgb::from_hex(0xd53e4f),
];
const SPECTRAL_9: [Rgb; 9] = [
    Rgb::from_hex(0x3288bd),
    Rgb::from_hex(0x66c2a5),
    Rgb::from_hex(0xabdda4),
    Rgb::from_hex(0xe6f598),
    Rgb::from_hex(0xffffbf),
    Rgb::from_hex(0xfee08b),
    Rgb::from_hex(0xfdae61),
    Rgb::from_hex(0xf46d43),
    Rgb::from_hex(0xd53e4f),
];
const SPECTRAL_10: [Rgb; 10] = [
    Rgb::from_hex(0x5e4fa2),
    Rgb::from_hex(0x3288bd),
    Rgb::from_hex(0x66c2a5),
    Rgb::from_hex(0xabdda4),
    Rgb::from_hex(0xe6f598),
    Rgb::from_hex(0xfee08b),
    Rgb::from_hex(0xfdae61),
    Rgb::from_hex(0xf46d43),
    Rgb::from_hex(0xd53e4f),
    Rgb::from_hex(0x9e0142),
];
const SPECTRAL_11: [Rgb; 11] = [
    Rgb::from_hex(0x5e4fa2),
    Rgb::from_hex(0x3288bd),
    Rgb::from_hex(0x66c2a5),
    Rgb::from_hex(0xabdda4),
    Rgb::from_hex(0xe6f598),
    Rgb::from_hex(0xffffbf),
    Rgb::from_hex(0xfee08b),
    Rgb::from_hex(0xfdae61),
    Rgb::from_hex(0xf46d43),
    Rgb::from_hex(0xd53e4f),
    Rgb::from_hex(0x9e0142),
];

fn spectral(size: usize) -> Option<&'static [Rgb]> {
    match size {
        3 => Some(&SPECTRAL_3),
        4 => Some(&SPECTRAL_4),
        5 => Some(&SPECTRAL_5),
        6 => Some(&SPECTRAL_6),
        7 => Some(&SPECTRAL_7),
        8 => Some(&SPECTRAL_8),
        9 => Some(&SPECTRAL_9),
        10 => Some(&SPECTRAL_10),
        11 => Some(&SPECTRAL_11),
        _ => None,
    }
}

/// How bars are colored for a given number of selected countries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorStrategy {
    /// One palette entry per country, repeated for every skill group.
    Qualitative(&'static [Rgb]),
    /// Every bar gets the same color.
    Uniform(Rgb),
}

impl ColorStrategy {
    pub const QUALITATIVE_COUNTRIES: std::ops::RangeInclusive<usize> = 3..=11;

    pub fn for_country_count(countries: usize) -> Self {
        if !Self::QUALITATIVE_COUNTRIES.contains(&countries) {
            return Self::Uniform(DEFAULT_COLOR);
        }

        spectral(countries)
            .map(Self::Qualitative)
            .unwrap_or(Self::Uniform(DEFAULT_COLOR))
    }

    pub fn color_for(self, country_index: usize) -> Rgb {
        match self {
            Self::Qualitative(palette) if !palette.is_empty() => {
                palette[country_index % palette.len()]
            }
            Self::Qualitative(_) => DEFAULT_COLOR,
            Self::Uniform(color) => color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_countries_use_default_color() {
        assert_eq!(
            ColorStrategy::for_country_count(2),
            ColorStrategy::Uniform(DEFAULT_COLOR)
        );
    }

    #[test]
    fn three_countries_switch_to_palette() {
        let strategy = ColorStrategy::for_country_count(3);
        assert_eq!(strategy, ColorStrategy::Qualitative(&SPECTRAL_3));
        assert_eq!(strategy.color_for(0).to_string(), "#99d594");
    }

    #[test]
    fn eleven_countries_use_largest_palette() {
        let ColorStrategy::Qualitative(palette) = ColorStrategy::for_country_count(11) else {
            panic!("expected a qualitative palette for 11 countries");
        };
        assert_eq!(palette.len(), 11);
    }

    #[test]
    fn twelve_countries_fall_back_to_default() {
        assert_eq!(
            ColorStrategy::for_country_count(12),
            ColorStrategy::Uniform(DEFAULT_COLOR)
        );
        assert_eq!(
            ColorStrategy::for_country_count(0),
            ColorStrategy::Uniform(DEFAULT_COLOR)
        );
    }

    #[test]
    fn every_palette_matches_its_size_and_has_distinct_colors() {
        for size in ColorStrategy::QUALITATIVE_COUNTRIES {
            let palette = spectral(size).unwrap();
            assert_eq!(palette.len(), size);
            let distinct = palette.iter().collect::<std::collections::HashSet<_>>();
            assert_eq!(distinct.len(), size, "palette {size} repeats a color");
        }
    }

    #[test]
    fn rgb_serialises_as_hex_string() {
        let json = serde_json::to_string(&DEFAULT_COLOR).unwrap();
        assert_eq!(json, "\"#1f77b4\"");
    }
}
