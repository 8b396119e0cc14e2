//! Catalog of the five output relations.

use std::fmt;

/// An output relation of the warehouse, with its destination name and
/// partitioning scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    CalendarDim,
    CountryDim,
    UsAirportDim,
    UsDemographicsDim,
    ImmigrationFact,
}

impl Relation {
    /// All relations in write order.
    pub const ALL: [Relation; 5] = [
        Relation::CalendarDim,
        Relation::UsDemographicsDim,
        Relation::UsAirportDim,
        Relation::CountryDim,
        Relation::ImmigrationFact,
    ];

    /// The destination subpath name.
    pub fn name(self) -> &'static str {
        match self {
            Relation::CalendarDim => "calendar_dim",
            Relation::CountryDim => "country_dim",
            Relation::UsAirportDim => "us_airport_dim",
            Relation::UsDemographicsDim => "us_demographics_dim",
            Relation::ImmigrationFact => "immigration_fact",
        }
    }

    /// Hive partition columns; empty means a single unpartitioned file.
    pub fn partition_columns(self) -> &'static [&'static str] {
        match self {
            Relation::CalendarDim => &["year", "month", "week"],
            Relation::UsDemographicsDim => &["state_code"],
            _ => &[],
        }
    }

    /// Short human description for listings.
    pub fn describe(self) -> &'static str {
        match self {
            Relation::CalendarDim => "Distinct arrival dates with derived calendar fields",
            Relation::CountryDim => "Countries with min/max average temperature",
            Relation::UsAirportDim => "US airport metadata with continent names",
            Relation::UsDemographicsDim => "Per-state population aggregates",
            Relation::ImmigrationFact => "Border-crossing events with dimension keys",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
