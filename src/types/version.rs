//! AutoCAD release identifiers ($ACADVER / DWG signature)

use serde::Serialize;
use std::fmt;

/// Drawing database version as written in `$ACADVER` or the first six
/// bytes of a DWG file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AcadVersion {
    /// Release 12
    AC1009,
    /// Release 13
    AC1012,
    /// Release 14
    AC1014,
    /// AutoCAD 2000
    AC1015,
    /// AutoCAD 2004
    AC1018,
    /// AutoCAD 2007
    AC1021,
    /// AutoCAD 2010
    AC1024,
    /// AutoCAD 2013
    AC1027,
    /// AutoCAD 2018
    AC1032,
    /// AutoCAD 2021 (DWG only)
    AC1035,
    /// Anything else
    Unknown,
}

impl AcadVersion {
    /// Parse a version string such as `"AC1015"`. Surrounding whitespace is ignored.
    pub fn from_version_string(s: &str) -> Self {
        match s.trim() {
            "AC1009" => AcadVersion::AC1009,
            "AC1012" => AcadVersion::AC1012,
            "AC1014" => AcadVersion::AC1014,
            "AC1015" => AcadVersion::AC1015,
            "AC1018" => AcadVersion::AC1018,
            "AC1021" => AcadVersion::AC1021,
            "AC1024" => AcadVersion::AC1024,
            "AC1027" => AcadVersion::AC1027,
            "AC1032" => AcadVersion::AC1032,
            "AC1035" => AcadVersion::AC1035,
            _ => AcadVersion::Unknown,
        }
    }

    /// Marketing name of the release, `None` for unknown versions
    pub fn release_name(&self) -> Option<&'static str> {
        match self {
            AcadVersion::AC1009 => Some("AutoCAD R12"),
            AcadVersion::AC1012 => Some("AutoCAD R13"),
            AcadVersion::AC1014 => Some("AutoCAD R14"),
            AcadVersion::AC1015 => Some("AutoCAD 2000"),
            AcadVersion::AC1018 => Some("AutoCAD 2004"),
            AcadVersion::AC1021 => Some("AutoCAD 2007"),
            AcadVersion::AC1024 => Some("AutoCAD 2010"),
            AcadVersion::AC1027 => Some("AutoCAD 2013"),
            AcadVersion::AC1032 => Some("AutoCAD 2018"),
            AcadVersion::AC1035 => Some("AutoCAD 2021"),
            AcadVersion::Unknown => None,
        }
    }

    /// Releases from 2007 on store text as UTF-8 regardless of `$DWGCODEPAGE`
    pub fn is_unicode(&self) -> bool {
        matches!(
            self,
            AcadVersion::AC1021
                | AcadVersion::AC1024
                | AcadVersion::AC1027
                | AcadVersion::AC1032
                | AcadVersion::AC1035
        )
    }
}

impl fmt::Display for AcadVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
