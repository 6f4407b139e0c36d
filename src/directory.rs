/// Static reference data for the practice: providers, their locations,
/// and their specialties. The tables are fixed at compile time and looked
/// up by name; nothing here is mutable at runtime.
use std::fmt;

/// The medical specialties offered, each with a fixed charge per visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Specialty {
    Family,
    Pediatrician,
    Allergist,
}

impl Specialty {
    pub fn charge_per_visit(&self) -> u32 {
        match self {
            Specialty::Family => 250,
            Specialty::Pediatrician => 300,
            Specialty::Allergist => 350,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Specialty::Family => "FAMILY",
            Specialty::Pediatrician => "PEDIATRICIAN",
            Specialty::Allergist => "ALLERGIST",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Practice locations with their county and zip code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Bridgewater,
    Edison,
    Piscataway,
    Princeton,
    Morristown,
    Clark,
}

impl Location {
    pub fn name(&self) -> &'static str {
        match self {
            Location::Bridgewater => "BRIDGEWATER",
            Location::Edison => "EDISON",
            Location::Piscataway => "PISCATAWAY",
            Location::Princeton => "PRINCETON",
            Location::Morristown => "MORRISTOWN",
            Location::Clark => "CLARK",
        }
    }

    pub fn county(&self) -> &'static str {
        match self {
            Location::Bridgewater => "Somerset",
            Location::Edison => "Middlesex",
            Location::Piscataway => "Middlesex",
            Location::Princeton => "Mercer",
            Location::Morristown => "Morris",
            Location::Clark => "Union",
        }
    }

    pub fn zip(&self) -> &'static str {
        match self {
            Location::Bridgewater => "08807",
            Location::Edison => "08817",
            Location::Piscataway => "08854",
            Location::Princeton => "08542",
            Location::Morristown => "07960",
            Location::Clark => "07066",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} {}", self.name(), self.county(), self.zip())
    }
}

/// The clinicians patients can book with, identified by last name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Patel,
    Lim,
    Zimnes,
    Harper,
    Kaur,
    Taylor,
    Ramesh,
    Ceravolo,
}

impl Provider {
    pub const ALL: [Provider; 8] = [
        Provider::Patel,
        Provider::Lim,
        Provider::Zimnes,
        Provider::Harper,
        Provider::Kaur,
        Provider::Taylor,
        Provider::Ramesh,
        Provider::Ceravolo,
    ];

    /// Looks up a provider by last name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Provider> {
        Provider::ALL
            .iter()
            .find(|p| p.last_name().eq_ignore_ascii_case(name))
            .copied()
    }

    pub fn last_name(&self) -> &'static str {
        match self {
            Provider::Patel => "PATEL",
            Provider::Lim => "LIM",
            Provider::Zimnes => "ZIMNES",
            Provider::Harper => "HARPER",
            Provider::Kaur => "KAUR",
            Provider::Taylor => "TAYLOR",
            Provider::Ramesh => "RAMESH",
            Provider::Ceravolo => "CERAVOLO",
        }
    }

    pub fn location(&self) -> Location {
        match self {
            Provider::Patel => Location::Bridgewater,
            Provider::Lim => Location::Bridgewater,
            Provider::Zimnes => Location::Clark,
            Provider::Harper => Location::Clark,
            Provider::Kaur => Location::Princeton,
            Provider::Taylor => Location::Piscataway,
            Provider::Ramesh => Location::Morristown,
            Provider::Ceravolo => Location::Edison,
        }
    }

    pub fn specialty(&self) -> Specialty {
        match self {
            Provider::Patel => Specialty::Family,
            Provider::Lim => Specialty::Pediatrician,
            Provider::Zimnes => Specialty::Family,
            Provider::Harper => Specialty::Family,
            Provider::Kaur => Specialty::Allergist,
            Provider::Taylor => Specialty::Pediatrician,
            Provider::Ramesh => Specialty::Allergist,
            Provider::Ceravolo => Specialty::Pediatrician,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}",
            self.last_name(),
            self.location(),
            self.specialty()
        )
    }
}
