//! Tidal constituent frequencies and physical constants.

use serde::Serialize;

/// One nanostrain, the unit of Earth-tide strain records.
pub const NANOSTRAIN: f64 = 1e-9;

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Principal lunar semidiurnal frequency (cycles/day).
pub const M2: f64 = 1.932274;

/// Principal solar semidiurnal frequency (cycles/day).
pub const S2: f64 = 2.0;

/// Two frequencies closer than this (cycles/day) name the same constituent.
const MATCH_TOLERANCE: f64 = 1e-9;

/// A named tidal constituent.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Constituent {
    /// Darwin symbol, e.g. `"M2"`.
    pub name: String,
    /// Frequency in cycles per day.
    pub frequency: f64,
}

impl Constituent {
    /// Creates a constituent from its symbol and frequency.
    pub fn new(name: impl Into<String>, frequency: f64) -> Self {
        Self {
            name: name.into(),
            frequency,
        }
    }
}

/// Channel category, used to pick the constituents a record can contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// Groundwater head: affected by both Earth tides and atmospheric tides.
    Groundwater,
    /// Barometric pressure: atmospheric tides only.
    Barometric,
    /// Earth-tide strain or gravity.
    EarthTide,
}

/// Immutable table of tidal constituents.
///
/// Tables are plain values passed into the estimators that need them.
///
/// | Table | Constituents |
/// |-------|--------------|
/// | [`ConstituentTable::earth_tide`] | Q1 O1 M1 K1 J1 N2 M2 S2 |
/// | [`ConstituentTable::earth_tide_extended`] | Q1 O1 M1 K1 J1 N2 M2 S2 K2 |
/// | [`ConstituentTable::atmospheric`] | P1 S1 K1 S2 |
/// | [`ConstituentTable::groundwater`] | union of the two |
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConstituentTable {
    constituents: Vec<Constituent>,
}

impl ConstituentTable {
    /// Builds a table from an explicit list.
    pub fn new(constituents: Vec<Constituent>) -> Self {
        Self { constituents }
    }

    /// Major Earth-tide constituents.
    pub fn earth_tide() -> Self {
        Self::new(vec![
            Constituent::new("Q1", 0.893244),
            Constituent::new("O1", 0.929536),
            Constituent::new("M1", 0.966446),
            Constituent::new("K1", 1.002738),
            Constituent::new("J1", 1.039030),
            Constituent::new("N2", 1.895982),
            Constituent::new("M2", M2),
            Constituent::new("S2", S2),
        ])
    }

    /// [`ConstituentTable::earth_tide`] plus K2, which needs about half a
    /// year of record to separate from S2.
    pub fn earth_tide_extended() -> Self {
        let mut table = Self::earth_tide();
        table.constituents.push(Constituent::new("K2", 2.005476));
        table
    }

    /// Atmospheric (radiational) tide constituents.
    pub fn atmospheric() -> Self {
        Self::new(vec![
            Constituent::new("P1", 0.997262),
            Constituent::new("S1", 1.0),
            Constituent::new("K1", 1.002738),
            Constituent::new("S2", S2),
        ])
    }

    /// Earth-tide constituents followed by the atmospheric ones not already present.
    pub fn groundwater() -> Self {
        let mut table = Self::earth_tide();
        for c in Self::atmospheric().constituents {
            if table.frequency(&c.name).is_none() {
                table.constituents.push(c);
            }
        }
        table
    }

    /// The table appropriate for a channel category.
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Groundwater => Self::groundwater(),
            Category::Barometric => Self::atmospheric(),
            Category::EarthTide => Self::earth_tide(),
        }
    }

    /// All constituents in table order.
    pub fn constituents(&self) -> &[Constituent] {
        &self.constituents
    }

    /// Frequencies in table order (cycles/day).
    pub fn frequencies(&self) -> Vec<f64> {
        self.constituents.iter().map(|c| c.frequency).collect()
    }

    /// Frequency of the named constituent.
    pub fn frequency(&self, name: &str) -> Option<f64> {
        self.constituents
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.frequency)
    }

    /// Name of the constituent at `frequency`, if any.
    pub fn name_of(&self, frequency: f64) -> Option<&str> {
        self.constituents
            .iter()
            .find(|c| (c.frequency - frequency).abs() < MATCH_TOLERANCE)
            .map(|c| c.name.as_str())
    }

    /// Number of constituents.
    pub fn len(&self) -> usize {
        self.constituents.len()
    }

    /// Returns `true` if the table holds no constituents.
    pub fn is_empty(&self) -> bool {
        self.constituents.is_empty()
    }
}

impl Default for ConstituentTable {
    fn default() -> Self {
        Self::earth_tide()
    }
}
