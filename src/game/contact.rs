//! Contact Detection
//!
//! The simulation never tests geometry itself. Each tick it is handed a
//! [`ContactReport`] per player saying which of the opponent's regions that
//! player's foot overlapped. Reports are produced by a [`ContactSource`],
//! normally from positions at the end of the previous tick, which gives a
//! diving player one tick of grace before a hit registers.
//!
//! [`HitboxDetector`] is a reference source using axis-aligned boxes.

use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use crate::game::state::{MatchState, Player, PlayerId};

// =============================================================================
// CONTACT REPORT
// =============================================================================

/// Which opponent regions a player's foot overlapped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactReport {
    /// Foot on opponent's head
    pub head: bool,
    /// Foot on opponent's body
    pub body: bool,
    /// Foot on opponent's foot
    pub foot: bool,
}

impl ContactReport {
    /// No contact.
    pub const NONE: ContactReport = ContactReport {
        head: false,
        body: false,
        foot: false,
    };

    /// Head bit in [`ContactReport::bits`]
    pub const BIT_HEAD: u8 = 0x01;
    /// Body bit in [`ContactReport::bits`]
    pub const BIT_BODY: u8 = 0x02;
    /// Foot bit in [`ContactReport::bits`]
    pub const BIT_FOOT: u8 = 0x04;

    /// Any region hit.
    #[inline]
    pub fn any(&self) -> bool {
        self.head || self.body || self.foot
    }

    /// Pack into bit flags.
    pub fn bits(&self) -> u8 {
        let mut bits = 0;
        if self.head {
            bits |= Self::BIT_HEAD;
        }
        if self.body {
            bits |= Self::BIT_BODY;
        }
        if self.foot {
            bits |= Self::BIT_FOOT;
        }
        bits
    }

    /// Unpack from bit flags. Unknown bits are ignored.
    pub fn from_bits(bits: u8) -> Self {
        Self {
            head: bits & Self::BIT_HEAD != 0,
            body: bits & Self::BIT_BODY != 0,
            foot: bits & Self::BIT_FOOT != 0,
        }
    }
}

impl BitOr for ContactReport {
    type Output = ContactReport;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            head: self.head || rhs.head,
            body: self.body || rhs.body,
            foot: self.foot || rhs.foot,
        }
    }
}

/// Supplies contact reports to the frame pump.
pub trait ContactSource {
    /// Report `player`'s foot contacts against the opponent in `state`.
    ///
    /// Only polled while `player` is diving.
    fn report(&mut self, player: PlayerId, state: &MatchState) -> ContactReport;
}

/// Source that never reports contact.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoContact;

impl ContactSource for NoContact {
    fn report(&mut self, _player: PlayerId, _state: &MatchState) -> ContactReport {
        ContactReport::NONE
    }
}

// =============================================================================
// HITBOXES
// =============================================================================

/// One body region relative to the player's ground point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Centre height above the player's current height
    pub offset: f64,
    /// Half of the region's width
    pub half_width: f64,
    /// Half of the region's height
    pub half_height: f64,
}

/// Head, body and foot regions of a player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitboxLayout {
    /// Head region
    pub head: Region,
    /// Body region
    pub body: Region,
    /// Foot region (the striking region)
    pub foot: Region,
}

impl Default for HitboxLayout {
    fn default() -> Self {
        Self {
            head: Region { offset: 35.0, half_width: 5.0, half_height: 5.5 },
            body: Region { offset: 20.0, half_width: 3.0, half_height: 9.5 },
            foot: Region { offset: 5.0, half_width: 4.0, half_height: 2.0 },
        }
    }
}

/// Axis-aligned box in arena space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Centre x
    pub x: f64,
    /// Centre y (height above ground)
    pub y: f64,
    /// Half width
    pub half_width: f64,
    /// Half height
    pub half_height: f64,
}

impl Aabb {
    /// Place `region` on a player.
    pub fn for_region(player: &Player, region: &Region) -> Self {
        Self {
            x: player.x(),
            y: player.height() + region.offset,
            half_width: region.half_width,
            half_height: region.half_height,
        }
    }

    /// Check if two boxes overlap (touching counts).
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        (self.x - other.x).abs() <= self.half_width + other.half_width
            && (self.y - other.y).abs() <= self.half_height + other.half_height
    }
}

/// Compare `attacker`'s foot against every region of `defender`.
pub fn check_foot_contact(attacker: &Player, defender: &Player, layout: &HitboxLayout) -> ContactReport {
    let foot = Aabb::for_region(attacker, &layout.foot);
    ContactReport {
        head: foot.overlaps(&Aabb::for_region(defender, &layout.head)),
        body: foot.overlaps(&Aabb::for_region(defender, &layout.body)),
        foot: foot.overlaps(&Aabb::for_region(defender, &layout.foot)),
    }
}

/// Reference [`ContactSource`] using [`HitboxLayout`] boxes.
#[derive(Clone, Debug, Default)]
pub struct HitboxDetector {
    layout: HitboxLayout,
}

impl HitboxDetector {
    /// Create with a layout.
    pub fn new(layout: HitboxLayout) -> Self {
        Self { layout }
    }
}

impl ContactSource for HitboxDetector {
    fn report(&mut self, player: PlayerId, state: &MatchState) -> ContactReport {
        check_foot_contact(
            state.player(player),
            state.player(player.opponent()),
            &self.layout,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_round_trip() {
        for bits in 0..8u8 {
            assert_eq!(ContactReport::from_bits(bits).bits(), bits);
        }
        assert!(!ContactReport::NONE.any());
        assert!(ContactReport::from_bits(ContactReport::BIT_FOOT).any());
    }

    #[test]
    fn test_bitor_combines() {
        let head = ContactReport { head: true, ..ContactReport::NONE };
        let foot = ContactReport { foot: true, ..ContactReport::NONE };
        let both = head | foot;
        assert!(both.head && both.foot && !both.body);
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb { x: 0.0, y: 0.0, half_width: 1.0, half_height: 1.0 };
        let touching = Aabb { x: 2.0, y: 0.0, half_width: 1.0, half_height: 1.0 };
        let apart = Aabb { x: 2.5, y: 0.0, half_width: 1.0, half_height: 1.0 };
        assert!(a.overlaps(&touching));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn test_standing_players_apart_have_no_contact() {
        let layout = HitboxLayout::default();
        let p1 = Player::new(PlayerId::First, 27.0);
        let p2 = Player::new(PlayerId::Second, 133.0);
        assert_eq!(check_foot_contact(&p1, &p2, &layout), ContactReport::NONE);
    }

    #[test]
    fn test_foot_on_head() {
        let layout = HitboxLayout::default();
        let mut attacker = Player::new(PlayerId::First, 80.0);
        attacker.set_position(80.0, 30.0); // foot centre at 35
        let defender = Player::new(PlayerId::Second, 82.0); // head centre at 35

        let report = check_foot_contact(&attacker, &defender, &layout);
        assert!(report.head);
        assert!(!report.body);
        assert!(!report.foot);

        // Lower strike spanning the neck touches head and body together.
        attacker.set_position(80.0, 25.0);
        let report = check_foot_contact(&attacker, &defender, &layout);
        assert!(report.head && report.body);
    }

    #[test]
    fn test_feet_level() {
        let layout = HitboxLayout::default();
        let attacker = Player::new(PlayerId::First, 80.0);
        let defender = Player::new(PlayerId::Second, 86.0);

        let report = check_foot_contact(&attacker, &defender, &layout);
        assert!(report.foot);
        assert!(!report.head);
    }

    #[test]
    fn test_detector_uses_opponent() {
        let mut state = MatchState::new(&crate::game::config::MatchConfig::default());
        state.reposition(PlayerId::First, 130.0, 0.0);

        let mut detector = HitboxDetector::default();
        assert!(detector.report(PlayerId::First, &state).foot);
        assert!(detector.report(PlayerId::Second, &state).foot);
        assert_eq!(NoContact.report(PlayerId::First, &state), ContactReport::NONE);
    }
}
