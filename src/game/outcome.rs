//! Round Outcomes
//!
//! Turning a diving player's contacts into a judgement, and a judgement
//! into points.
//!
//! Priority is fixed: head beats body beats foot. A foot-to-foot clash is a
//! double KO only when both players are diving; otherwise the attacker
//! takes a plain KO.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::contact::ContactReport;
use crate::game::state::{PerPlayer, PlayerId};

/// Unrecognized judgement tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown judgement tag: {0:?}")]
pub struct JudgementParseError(pub String);

/// How a round was won, from the attacker's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Judgement {
    /// Foot to body, or foot to a non-diving foot
    #[serde(rename = "KO")]
    Ko,
    /// Foot to head
    #[serde(rename = "HEADSHOT")]
    Headshot,
    /// Foot to foot while both dive
    #[serde(rename = "DOUBLE_KO")]
    DoubleKo,
}

impl Judgement {
    /// Points for the attacker (and, for a double KO, for the opponent too).
    pub fn points(self) -> u32 {
        match self {
            Judgement::Ko => 1,
            Judgement::Headshot => 2,
            Judgement::DoubleKo => 1,
        }
    }

    /// Canonical tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Judgement::Ko => "KO",
            Judgement::Headshot => "HEADSHOT",
            Judgement::DoubleKo => "DOUBLE_KO",
        }
    }
}

impl fmt::Display for Judgement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Judgement {
    type Err = JudgementParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "KO" => Ok(Judgement::Ko),
            "HEADSHOT" => Ok(Judgement::Headshot),
            "DOUBLE_KO" => Ok(Judgement::DoubleKo),
            other => Err(JudgementParseError(other.to_string())),
        }
    }
}

/// Decide a judgement from a diving player's contacts.
///
/// Returns `None` when nothing was hit.
pub fn resolve_contact(contact: ContactReport, opponent_diving: bool) -> Option<Judgement> {
    if contact.head {
        Some(Judgement::Headshot)
    } else if contact.body {
        Some(Judgement::Ko)
    } else if contact.foot {
        if opponent_diving {
            Some(Judgement::DoubleKo)
        } else {
            Some(Judgement::Ko)
        }
    } else {
        None
    }
}

/// A resolved round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// One point to `winner`
    Ko {
        /// Scoring player
        winner: PlayerId,
    },
    /// Two points to `winner`
    Headshot {
        /// Scoring player
        winner: PlayerId,
    },
    /// One point each
    DoubleKo,
}

impl RoundOutcome {
    /// Build from the attacking player's judgement.
    pub fn new(attacker: PlayerId, judgement: Judgement) -> Self {
        match judgement {
            Judgement::Ko => RoundOutcome::Ko { winner: attacker },
            Judgement::Headshot => RoundOutcome::Headshot { winner: attacker },
            Judgement::DoubleKo => RoundOutcome::DoubleKo,
        }
    }

    /// Judgement tag of this outcome.
    pub fn judgement(&self) -> Judgement {
        match self {
            RoundOutcome::Ko { .. } => Judgement::Ko,
            RoundOutcome::Headshot { .. } => Judgement::Headshot,
            RoundOutcome::DoubleKo => Judgement::DoubleKo,
        }
    }

    /// Sole winner, if there is one.
    pub fn winner(&self) -> Option<PlayerId> {
        match *self {
            RoundOutcome::Ko { winner } | RoundOutcome::Headshot { winner } => Some(winner),
            RoundOutcome::DoubleKo => None,
        }
    }

    /// Points each player earns from this outcome.
    pub fn awards(&self) -> PerPlayer<u32> {
        let points = self.judgement().points();
        match self.winner() {
            Some(winner) => {
                let mut awards = PerPlayer::default();
                awards[winner] = points;
                awards
            }
            None => PerPlayer::new(points, points),
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(winner) => write!(f, "{} by {}", winner, self.judgement()),
            None => write!(f, "{}", self.judgement()),
        }
    }
}
