//! The fixed table of overly accessible / inaccessible conditions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Condition family, taken from the name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OacFamily {
    /// Practically invisible, yet exposed as data.
    P,
    /// Practically unusable, yet exposed as actionable.
    A,
    /// Everything else.
    O,
}

/// One named condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Oac {
    #[serde(rename = "P1_belongs")]
    P1Belongs,
    #[serde(rename = "P2_out_of_bounds")]
    P2OutOfBounds,
    #[serde(rename = "P3_covered")]
    P3Covered,
    #[serde(rename = "P4_zero_area")]
    P4ZeroArea,
    #[serde(rename = "P5_ainvisible")]
    P5AInvisible,
    #[serde(rename = "A1_pinvisible")]
    A1PInvisible,
    #[serde(rename = "A2_conditional_disabled")]
    A2ConditionalDisabled,
    #[serde(rename = "A3_inconsistent_abilities")]
    A3InconsistentAbilities,
    #[serde(rename = "A4_camouflaged")]
    A4Camouflaged,
    #[serde(rename = "O_ad")]
    OAd,
}

impl Oac {
    /// Every condition in report order.
    pub const ALL: [Oac; 10] = [
        Oac::P1Belongs,
        Oac::P2OutOfBounds,
        Oac::P3Covered,
        Oac::P4ZeroArea,
        Oac::P5AInvisible,
        Oac::A1PInvisible,
        Oac::A2ConditionalDisabled,
        Oac::A3InconsistentAbilities,
        Oac::A4Camouflaged,
        Oac::OAd,
    ];

    /// Members of the "practically invisible" aggregate behind
    /// [`Oac::A1PInvisible`]. A new P condition joins it only by being
    /// listed here.
    pub const P_FAMILY: [Oac; 5] = [
        Oac::P1Belongs,
        Oac::P2OutOfBounds,
        Oac::P3Covered,
        Oac::P4ZeroArea,
        Oac::P5AInvisible,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Oac::P1Belongs => "P1_belongs",
            Oac::P2OutOfBounds => "P2_out_of_bounds",
            Oac::P3Covered => "P3_covered",
            Oac::P4ZeroArea => "P4_zero_area",
            Oac::P5AInvisible => "P5_ainvisible",
            Oac::A1PInvisible => "A1_pinvisible",
            Oac::A2ConditionalDisabled => "A2_conditional_disabled",
            Oac::A3InconsistentAbilities => "A3_inconsistent_abilities",
            Oac::A4Camouflaged => "A4_camouflaged",
            Oac::OAd => "O_ad",
        }
    }

    pub fn family(&self) -> OacFamily {
        match self {
            Oac::P1Belongs
            | Oac::P2OutOfBounds
            | Oac::P3Covered
            | Oac::P4ZeroArea
            | Oac::P5AInvisible => OacFamily::P,
            Oac::A1PInvisible
            | Oac::A2ConditionalDisabled
            | Oac::A3InconsistentAbilities
            | Oac::A4Camouflaged => OacFamily::A,
            Oac::OAd => OacFamily::O,
        }
    }

    /// Whether the condition is derived from other conditions.
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Oac::A1PInvisible)
    }
}

impl fmt::Display for Oac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Oac {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Oac::ALL
            .into_iter()
            .find(|oac| oac.name() == s)
            .ok_or_else(|| format!("Unknown OAC: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_serde() {
        for oac in Oac::ALL {
            let json = serde_json::to_string(&oac).unwrap();
            assert_eq!(json, format!("\"{}\"", oac.name()));
            assert_eq!(oac.name().parse::<Oac>().unwrap(), oac);
        }
    }

    #[test]
    fn test_family_matches_prefix() {
        for oac in Oac::ALL {
            let expected = match oac.name().chars().next() {
                Some('P') => OacFamily::P,
                Some('A') => OacFamily::A,
                _ => OacFamily::O,
            };
            assert_eq!(oac.family(), expected, "{oac}");
        }
    }

    #[test]
    fn test_p_family_is_every_p_condition() {
        let from_table: Vec<Oac> = Oac::ALL
            .into_iter()
            .filter(|o| o.family() == OacFamily::P)
            .collect();
        assert_eq!(from_table, Oac::P_FAMILY.to_vec());
    }

    #[test]
    fn test_only_a1_is_aggregate() {
        let aggregates: Vec<Oac> = Oac::ALL.into_iter().filter(Oac::is_aggregate).collect();
        assert_eq!(aggregates, vec![Oac::A1PInvisible]);
    }

    #[test]
    fn test_unknown_name() {
        assert!("P9_unknown".parse::<Oac>().is_err());
    }
}
