/// Position labels for the 26 visible locations of a 3x3x3 cube
use std::fmt;
use std::str::FromStr;

/// A fixed location on the cube, named layer by layer:
/// `U`/`M`/`D`, then `B`/`M`/`F`, then `L`/`M`/`R`.
///
/// `MMM` is the hidden core and has no label. Declaration order is the
/// canonical order used when the scene is flattened for output.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    UBL, UBM, UBR,
    UML, UMM, UMR,
    UFL, UFM, UFR,
    MBL, MBM, MBR,
    MML, MMR,
    MFL, MFM, MFR,
    DBL, DBM, DBR,
    DML, DMM, DMR,
    DFL, DFM, DFR,
}

impl Label {
    pub const COUNT: usize = 26;

    /// All labels in canonical order
    #[rustfmt::skip]
    pub const ALL: [Label; Label::COUNT] = [
        Label::UBL, Label::UBM, Label::UBR,
        Label::UML, Label::UMM, Label::UMR,
        Label::UFL, Label::UFM, Label::UFR,
        Label::MBL, Label::MBM, Label::MBR,
        Label::MML, Label::MMR,
        Label::MFL, Label::MFM, Label::MFR,
        Label::DBL, Label::DBM, Label::DBR,
        Label::DML, Label::DMM, Label::DMR,
        Label::DFL, Label::DFM, Label::DFR,
    ];

    #[rustfmt::skip]
    const NAMES: [&'static str; Label::COUNT] = [
        "UBL", "UBM", "UBR",
        "UML", "UMM", "UMR",
        "UFL", "UFM", "UFR",
        "MBL", "MBM", "MBR",
        "MML", "MMR",
        "MFL", "MFM", "MFR",
        "DBL", "DBM", "DBR",
        "DML", "DMM", "DMR",
        "DFL", "DFM", "DFR",
    ];

    /// Position in canonical order
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        Self::NAMES[self.index()]
    }

    /// Layer offsets `(up, front, right)`, each in `-1..=1`
    pub fn offsets(self) -> (i8, i8, i8) {
        let bytes = self.as_str().as_bytes();
        let up = match bytes[0] {
            b'U' => 1,
            b'D' => -1,
            _ => 0,
        };
        let front = match bytes[1] {
            b'F' => 1,
            b'B' => -1,
            _ => 0,
        };
        let right = match bytes[2] {
            b'R' => 1,
            b'L' => -1,
            _ => 0,
        };
        (up, front, right)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the 26 position labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel;

impl FromStr for Label {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::NAMES
            .iter()
            .position(|name| *name == s)
            .map(|index| Self::ALL[index])
            .ok_or(UnknownLabel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_matches_names() {
        for (index, label) in Label::ALL.iter().enumerate() {
            assert_eq!(label.index(), index);
            assert_eq!(label.as_str().parse::<Label>(), Ok(*label));
        }
    }

    #[test]
    fn test_core_is_not_a_label() {
        assert_eq!("MMM".parse::<Label>(), Err(UnknownLabel));
        assert_eq!("ufl".parse::<Label>(), Err(UnknownLabel));
    }

    #[test]
    fn test_offsets() {
        assert_eq!(Label::UFR.offsets(), (1, 1, 1));
        assert_eq!(Label::DBL.offsets(), (-1, -1, -1));
        assert_eq!(Label::MML.offsets(), (0, 0, -1));
    }
}
