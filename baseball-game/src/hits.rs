use std::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString};

pub const QUIT_SIGNAL: &str = "q";

pub const USAGE: &str = "Insert a hit value (miss, single, double, triple, or home run) or \
                         the number of bases to run (0 to 4).\nEnter 'q' to quit.";

/// Hit outcomes the operator can call out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Hit {
    Miss,
    Single,
    Double,
    Triple,
    #[strum(to_string = "home run", serialize = "homerun")]
    HomeRun,
}

impl Hit {
    /// Bases the runner advances on this hit.
    pub fn bases(&self) -> i64 {
        match self {
            Hit::Miss => 0,
            Hit::Single => 1,
            Hit::Double => 2,
            Hit::Triple => 3,
            Hit::HomeRun => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorInput {
    Quit,
    Advance(i64),
    Unknown(String),
}

impl OperatorInput {
    pub fn parse(line: &str) -> Self {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");

        if line.eq_ignore_ascii_case(QUIT_SIGNAL) {
            return OperatorInput::Quit;
        }

        if let Ok(hit) = Hit::from_str(&line) {
            return OperatorInput::Advance(hit.bases());
        }

        match line.parse::<i64>() {
            Ok(bases) if (0..=4).contains(&bases) => OperatorInput::Advance(bases),
            _ => OperatorInput::Unknown(line),
        }
    }
}
