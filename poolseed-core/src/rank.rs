/// Rank codec: grade letter plus optional sub-level <-> total-ordered score.
///
/// Grades from lowest to highest are U, E, D, C, B, A. Each grade owns a band
/// of `RANK_BAND` scores and the sub-level picks a score inside the band, so
/// `C12` encodes to 312 and sorts above every `D` rank.
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::RANK_BAND;

/// Letter grade, declared lowest first so the derived ordering matches skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Grade {
    U,
    E,
    D,
    C,
    B,
    A,
}

impl Grade {
    /// All grades, lowest to highest.
    pub const ALL: [Grade; 6] = [Grade::U, Grade::E, Grade::D, Grade::C, Grade::B, Grade::A];

    /// Case-insensitive lookup.
    pub fn from_letter(letter: char) -> Option<Grade> {
        match letter.to_ascii_uppercase() {
            'U' => Some(Grade::U),
            'E' => Some(Grade::E),
            'D' => Some(Grade::D),
            'C' => Some(Grade::C),
            'B' => Some(Grade::B),
            'A' => Some(Grade::A),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Grade::U => 'U',
            Grade::E => 'E',
            Grade::D => 'D',
            Grade::C => 'C',
            Grade::B => 'B',
            Grade::A => 'A',
        }
    }

    fn base(self) -> u16 {
        self as u16 * RANK_BAND
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidRankError {
    #[error("empty rank notation")]
    Empty,

    #[error("unknown grade letter '{0}' (expected one of A, B, C, D, E, U)")]
    UnknownGrade(char),

    #[error("sub-level \"{0}\" is not a non-negative integer")]
    InvalidSubLevel(String),

    #[error("sub-level {0} is out of range (must be below {RANK_BAND})")]
    SubLevelOutOfRange(String),

    #[error("rank score {0} does not belong to any grade")]
    ScoreOutOfRange(u16),
}

/// Integer encoding of a rank. Only constructible through the codec, so every
/// value decodes back to a valid grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "u16", try_from = "u16"))]
pub struct RankScore(u16);

impl RankScore {
    pub fn value(self) -> u16 {
        self.0
    }

    pub fn grade(self) -> Grade {
        Grade::ALL[(self.0 / RANK_BAND) as usize]
    }

    /// Sub-level inside the grade band; 0 when the notation had none.
    pub fn sub_level(self) -> u16 {
        self.0 % RANK_BAND
    }
}

/// Encode a grade letter and sub-level string into a score.
///
/// An empty sub-level counts as 0. Otherwise it must be ASCII digits and
/// below `RANK_BAND`; a larger sub-level would alias the next grade.
pub fn encode(letter: char, sub_level: &str) -> Result<RankScore, InvalidRankError> {
    let grade = Grade::from_letter(letter).ok_or(InvalidRankError::UnknownGrade(letter))?;

    let level = if sub_level.is_empty() {
        0
    } else {
        if !sub_level.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidRankError::InvalidSubLevel(sub_level.to_string()));
        }
        // At most two significant digits fit below RANK_BAND.
        let digits = sub_level.trim_start_matches('0');
        if digits.len() > 2 {
            return Err(InvalidRankError::SubLevelOutOfRange(digits.to_string()));
        }
        digits.bytes().fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'))
    };

    Ok(RankScore(grade.base() + level))
}

/// Inverse of [`encode`]. A zero sub-level is rendered as the empty string.
pub fn decode(score: RankScore) -> (char, String) {
    let sub_level = match score.sub_level() {
        0 => String::new(),
        n => n.to_string(),
    };
    (score.grade().letter(), sub_level)
}

impl FromStr for RankScore {
    type Err = InvalidRankError;

    /// Parse compact notation such as `C12`, `b3` or `U`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let letter = s.chars().next().ok_or(InvalidRankError::Empty)?;
        encode(letter, &s[letter.len_utf8()..])
    }
}

impl TryFrom<u16> for RankScore {
    type Error = InvalidRankError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if (value / RANK_BAND) as usize >= Grade::ALL.len() {
            return Err(InvalidRankError::ScoreOutOfRange(value));
        }
        Ok(RankScore(value))
    }
}

impl From<RankScore> for u16 {
    fn from(score: RankScore) -> u16 {
        score.0
    }
}

impl fmt::Display for RankScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (letter, sub_level) = decode(*self);
        write!(f, "{letter}{sub_level}")
    }
}
