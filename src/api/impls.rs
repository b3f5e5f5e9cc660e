use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use anyhow::bail;

use super::*;

impl Display for Game {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let output = match self {
            Self::Sport => "SPORT",
            Self::Multiscore => "MULTISCORE",
        };
        write!(f, "{}", output)
    }
}
impl FromStr for Game {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SPORT" => Ok(Self::Sport),
            "MULTISCORE" => Ok(Self::Multiscore),
            e => bail!("Unknown game \"{}\", expected SPORT or MULTISCORE", e),
        }
    }
}
impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let output = match self {
            Self::Home => "home",
            Self::Tie => "tie",
            Self::Away => "away",
        };
        write!(f, "{}", output)
    }
}
impl Outcome {
    /// Compact mark used in input files and winshare board printouts.
    pub fn mark(&self) -> char {
        match self {
            Self::Home => '1',
            Self::Tie => 'x',
            Self::Away => '2',
        }
    }
}
