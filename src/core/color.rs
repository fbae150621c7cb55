//! Token colors and per-color data storage.
//!
//! ## TileColor
//!
//! The fixed set of five token colors. Levels use a prefix of this set,
//! described by a [`Palette`].
//!
//! ## ColorMap
//!
//! Per-color data storage backed by a fixed array for O(1) access.
//! Iteration always follows [`TileColor::ALL`] order, so anything derived
//! from a `ColorMap` (weighted draws, HUD refreshes) is deterministic.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Number of distinct token colors.
pub const COLOR_COUNT: usize = 5;

/// A token color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileColor {
    /// The default color, also used as a fallback.
    #[default]
    Red,
    Blue,
    Purple,
    Green,
    Yellow,
}

impl TileColor {
    /// All colors in index order.
    pub const ALL: [TileColor; COLOR_COUNT] = [
        TileColor::Red,
        TileColor::Blue,
        TileColor::Purple,
        TileColor::Green,
        TileColor::Yellow,
    ];

    /// Get the color's index in [`TileColor::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a color by index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Look up a color by index, falling back to the default color.
    ///
    /// A misconfigured source is never fatal: the bad value is logged and
    /// replaced by [`TileColor::Red`].
    #[must_use]
    pub fn from_index_or_default(index: usize) -> Self {
        Self::from_index(index).unwrap_or_else(|| {
            log::warn!("color index {index} is out of range, using {}", TileColor::default());
            TileColor::default()
        })
    }

    /// Look up a color by (case-insensitive) name, falling back to the
    /// default color with a warning.
    #[must_use]
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::warn!("unknown color {name:?}, using {}", TileColor::default());
            TileColor::default()
        })
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TileColor::Red => "Red",
            TileColor::Blue => "Blue",
            TileColor::Purple => "Purple",
            TileColor::Green => "Green",
            TileColor::Yellow => "Yellow",
        }
    }
}

impl std::fmt::Display for TileColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown color name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown color name: {0:?}")]
pub struct UnknownColor(pub String);

impl FromStr for TileColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}

/// The colors in play for a level: the first `len` entries of
/// [`TileColor::ALL`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Palette {
    len: usize,
}

impl Palette {
    /// Create a palette with `len` colors.
    ///
    /// `len` is clamped to `1..=COLOR_COUNT`; configuration validation
    /// rejects such values before they get here.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            len: len.clamp(1, COLOR_COUNT),
        }
    }

    /// The full five-color palette.
    #[must_use]
    pub const fn full() -> Self {
        Self { len: COLOR_COUNT }
    }

    /// Number of colors.
    #[must_use]
    pub const fn len(self) -> usize {
        self.len
    }

    /// Palettes are never empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        false
    }

    /// The colors in play.
    #[must_use]
    pub fn colors(self) -> &'static [TileColor] {
        &TileColor::ALL[..self.len]
    }

    /// Check whether a color belongs to this palette.
    #[must_use]
    pub fn contains(self, color: TileColor) -> bool {
        color.index() < self.len
    }

    /// Colors in the palette other than `excluded`.
    pub fn others(self, excluded: TileColor) -> impl Iterator<Item = TileColor> {
        self.colors().iter().copied().filter(move |&c| c != excluded)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::full()
    }
}

/// Per-color data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use rust_match3::core::{ColorMap, TileColor};
///
/// let mut counts: ColorMap<u32> = ColorMap::default();
/// counts[TileColor::Blue] += 2;
///
/// assert_eq!(counts[TileColor::Blue], 2);
/// assert_eq!(counts[TileColor::Red], 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMap<T> {
    data: [T; COLOR_COUNT],
}

impl<T> ColorMap<T> {
    /// Create a new ColorMap with values from a factory function.
    pub fn new(factory: impl Fn(TileColor) -> T) -> Self {
        Self {
            data: TileColor::ALL.map(factory),
        }
    }

    /// Create a new ColorMap with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a color's data.
    #[must_use]
    pub fn get(&self, color: TileColor) -> &T {
        &self.data[color.index()]
    }

    /// Get a mutable reference to a color's data.
    pub fn get_mut(&mut self, color: TileColor) -> &mut T {
        &mut self.data[color.index()]
    }

    /// Iterate over (TileColor, &T) pairs in color order.
    pub fn iter(&self) -> impl Iterator<Item = (TileColor, &T)> {
        TileColor::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (TileColor, &mut T) pairs in color order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (TileColor, &mut T)> {
        TileColor::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<TileColor> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: TileColor) -> &Self::Output {
        self.get(color)
    }
}

impl<T> IndexMut<TileColor> for ColorMap<T> {
    fn index_mut(&mut self, color: TileColor) -> &mut Self::Output {
        self.get_mut(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_index_round_trip() {
        for (i, color) in TileColor::ALL.into_iter().enumerate() {
            assert_eq!(color.index(), i);
            assert_eq!(TileColor::from_index(i), Some(color));
        }
        assert_eq!(TileColor::from_index(COLOR_COUNT), None);
    }

    #[test]
    fn test_out_of_range_index_falls_back() {
        assert_eq!(TileColor::from_index_or_default(2), TileColor::Purple);
        assert_eq!(TileColor::from_index_or_default(99), TileColor::Red);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("green".parse::<TileColor>(), Ok(TileColor::Green));
        assert_eq!(" Yellow ".parse::<TileColor>(), Ok(TileColor::Yellow));
        assert!("teal".parse::<TileColor>().is_err());
        assert_eq!(TileColor::from_name_or_default("teal"), TileColor::Red);
        assert_eq!(TileColor::from_name_or_default("BLUE"), TileColor::Blue);
    }

    #[test]
    fn test_palette() {
        let palette = Palette::new(3);
        assert_eq!(palette.len(), 3);
        assert_eq!(
            palette.colors(),
            &[TileColor::Red, TileColor::Blue, TileColor::Purple]
        );
        assert!(palette.contains(TileColor::Purple));
        assert!(!palette.contains(TileColor::Green));

        let others: Vec<_> = palette.others(TileColor::Blue).collect();
        assert_eq!(others, vec![TileColor::Red, TileColor::Purple]);
    }

    #[test]
    fn test_palette_clamps() {
        assert_eq!(Palette::new(0).len(), 1);
        assert_eq!(Palette::new(12).len(), COLOR_COUNT);
    }

    #[test]
    fn test_color_map() {
        let mut map = ColorMap::new(|c| c.index() * 10);
        assert_eq!(map[TileColor::Green], 30);

        map[TileColor::Green] = 7;
        assert_eq!(*map.get(TileColor::Green), 7);

        let colors: Vec<_> = map.iter().map(|(c, _)| c).collect();
        assert_eq!(colors, TileColor::ALL.to_vec());
    }

    #[test]
    fn test_color_map_serde() {
        let map = ColorMap::with_value(3u32);
        let json = serde_json::to_string(&map).unwrap();
        let back: ColorMap<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
