//! Score updates and progress milestones

use super::droplet::DropletKind;
use super::state::Session;
use crate::tuning::Tuning;

/// What a catch changed, evaluated in the same step as the score update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatchOutcome {
    pub score: u32,
    /// Score crossed half the target for the first time this session
    pub halfway: bool,
    /// Score reached the target
    pub won: bool,
}

/// Apply one catch to the session and evaluate milestones.
///
/// Regular droplets add points, penalty droplets subtract them with the
/// score floored at zero.
pub fn report_catch(session: &mut Session, kind: DropletKind, tuning: &Tuning) -> CatchOutcome {
    session.score = match kind {
        DropletKind::Regular => session.score.saturating_add(tuning.regular_points),
        DropletKind::Penalty => session.score.saturating_sub(tuning.penalty_points),
    };

    let score = session.score;
    let target = session.win_target;

    // Halfway is compared as score >= target / 2 without integer truncation
    let halfway = !session.halfway_announced && score.saturating_mul(2) >= target && score < target;
    if halfway {
        session.halfway_announced = true;
    }

    CatchOutcome {
        score,
        halfway,
        won: score >= target,
    }
}

/// Encouragement shown at the halfway milestone
pub fn halfway_message(session: &Session) -> String {
    format!(
        "Halfway there! {} of {} points - keep going!",
        session.score, session.win_target
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::Difficulty;
    use proptest::prelude::*;

    fn session(target: u32) -> Session {
        let mut session = Session::new(Difficulty::Normal);
        session.win_target = target;
        session
    }

    #[test]
    fn test_regular_adds_penalty_subtracts() {
        let tuning = Tuning::default();
        let mut s = session(150);

        assert_eq!(report_catch(&mut s, DropletKind::Regular, &tuning).score, 10);
        assert_eq!(report_catch(&mut s, DropletKind::Regular, &tuning).score, 20);
        assert_eq!(report_catch(&mut s, DropletKind::Penalty, &tuning).score, 10);
    }

    #[test]
    fn test_penalty_clamps_at_zero() {
        let tuning = Tuning::default();
        let mut s = session(150);
        s.score = 5;
        assert_eq!(report_catch(&mut s, DropletKind::Penalty, &tuning).score, 0);
        assert_eq!(report_catch(&mut s, DropletKind::Penalty, &tuning).score, 0);
    }

    #[test]
    fn test_halfway_fires_once() {
        let tuning = Tuning::default();
        let mut s = session(150);
        s.score = 65;

        let outcome = report_catch(&mut s, DropletKind::Regular, &tuning);
        assert_eq!(outcome.score, 75);
        assert!(outcome.halfway);
        assert!(s.halfway_announced);

        assert!(!report_catch(&mut s, DropletKind::Regular, &tuning).halfway);
        // Dropping below and climbing back does not re-announce
        report_catch(&mut s, DropletKind::Penalty, &tuning);
        report_catch(&mut s, DropletKind::Penalty, &tuning);
        assert!(!report_catch(&mut s, DropletKind::Regular, &tuning).halfway);
    }

    #[test]
    fn test_halfway_not_announced_on_win() {
        let tuning = Tuning {
            regular_points: 100,
            ..Default::default()
        };
        let mut s = session(100);
        let outcome = report_catch(&mut s, DropletKind::Regular, &tuning);
        assert!(outcome.won);
        assert!(!outcome.halfway);
    }

    #[test]
    fn test_win_at_target() {
        let tuning = Tuning::default();
        let mut s = session(100);
        s.score = 90;
        s.halfway_announced = true;

        let outcome = report_catch(&mut s, DropletKind::Regular, &tuning);
        assert_eq!(outcome.score, 100);
        assert!(outcome.won);
    }

    #[test]
    fn test_odd_target_halfway_rounds_up() {
        let tuning = Tuning {
            regular_points: 1,
            ..Default::default()
        };
        let mut s = session(75);
        s.score = 36;
        assert!(!report_catch(&mut s, DropletKind::Regular, &tuning).halfway); // 37 < 37.5
        assert!(report_catch(&mut s, DropletKind::Regular, &tuning).halfway); // 38
    }

    proptest! {
        #[test]
        fn score_never_negative_and_halfway_at_most_once(
            catches in prop::collection::vec(prop::bool::ANY, 0..200),
        ) {
            let tuning = Tuning::default();
            let mut s = session(150);
            let mut announcements = 0;
            let mut expected: i64 = 0;

            for penalty in catches {
                let kind = if penalty { DropletKind::Penalty } else { DropletKind::Regular };
                let outcome = report_catch(&mut s, kind, &tuning);

                expected = if penalty { (expected - 10).max(0) } else { expected + 10 };
                prop_assert_eq!(i64::from(outcome.score), expected);
                prop_assert_eq!(outcome.won, outcome.score >= 150);
                if outcome.halfway {
                    announcements += 1;
                }
            }
            prop_assert!(announcements <= 1);
        }
    }
}
