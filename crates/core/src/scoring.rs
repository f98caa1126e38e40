//! Combo classification and the score table.
//!
//! Both are pure functions over explicit history arguments: the stuck flag
//! and cleared-line count of the lock being resolved, plus the previous
//! combo category and last scoring piece kind. Level, gravity and lock
//! forgiveness curves live here too.

use crate::types::{
    ComboCategory, PieceKind, LINES_PER_LEVEL, LOCK_DELAY_BASE_TICKS, MAX_LEVEL, TICKS_PER_ROW,
};

/// Classify one lock resolution.
///
/// A "stuck" lock is one where the piece could not move by one cell in any
/// of the four directions. A stuck T is a T-spin; a stuck I/J/L/S/Z earns
/// its kind-specific spin bonus. A 4-line clear immediately following a
/// Tetris (or another back-to-back) is reclassified as back-to-back.
pub fn classify(
    stuck: bool,
    cleared: u32,
    kind: PieceKind,
    previous: ComboCategory,
) -> ComboCategory {
    if stuck {
        match kind {
            PieceKind::T => {
                return match cleared {
                    0 => ComboCategory::MiniTSpin,
                    1 => ComboCategory::TSpinSingle,
                    2 => ComboCategory::TSpinDouble,
                    3 => ComboCategory::TSpinTriple,
                    _ => ComboCategory::None,
                };
            }
            PieceKind::I => return ComboCategory::ISpin,
            PieceKind::J => return ComboCategory::JSpin,
            PieceKind::L => return ComboCategory::LSpin,
            PieceKind::S => return ComboCategory::SSpin,
            PieceKind::Z => return ComboCategory::ZSpin,
            // An O piece cannot lock while immovable on all four sides;
            // classify through the plain path if it ever reports stuck.
            PieceKind::O => {}
        }
    }

    match cleared {
        1 => ComboCategory::Single,
        2 => ComboCategory::Double,
        3 => ComboCategory::Triple,
        4 => {
            if matches!(previous, ComboCategory::Tetris | ComboCategory::BackToBack) {
                ComboCategory::BackToBack
            } else {
                ComboCategory::Tetris
            }
        }
        _ => ComboCategory::None,
    }
}

/// Whether the previous combo makes T-spin doubles/triples chain.
fn chained(previous: ComboCategory) -> bool {
    matches!(
        previous,
        ComboCategory::BackToBack | ComboCategory::TSpinDouble | ComboCategory::TSpinTriple
    )
}

/// Point value of one classified lock.
///
/// `previous` is the combo before this lock; `last_kind` is the kind of the
/// last lock that scored (it prices the back-to-back category).
pub fn score_value(
    category: ComboCategory,
    previous: ComboCategory,
    last_kind: Option<PieceKind>,
) -> u32 {
    match category {
        ComboCategory::None => 0,
        ComboCategory::Single => 100,
        ComboCategory::Double => 300,
        ComboCategory::Triple => 500,
        ComboCategory::Tetris => 800,
        ComboCategory::MiniTSpin => 100,
        ComboCategory::TSpinSingle => 800,
        ComboCategory::TSpinDouble => {
            if chained(previous) {
                1800
            } else {
                1200
            }
        }
        ComboCategory::TSpinTriple => {
            if chained(previous) {
                2400
            } else {
                1600
            }
        }
        ComboCategory::BackToBack => match last_kind {
            Some(PieceKind::I) => 1200,
            Some(PieceKind::T) => 1800,
            _ => 0,
        },
        ComboCategory::ISpin
        | ComboCategory::JSpin
        | ComboCategory::LSpin
        | ComboCategory::SSpin
        | ComboCategory::ZSpin => 300,
    }
}

/// Whether this category extends the back-to-back streak.
pub fn advances_streak(category: ComboCategory) -> bool {
    matches!(
        category,
        ComboCategory::BackToBack
            | ComboCategory::TSpinDouble
            | ComboCategory::TSpinTriple
            | ComboCategory::Tetris
    )
}

/// Level from total lines cleared, capped at [`MAX_LEVEL`].
pub fn level_for_lines(lines: u32) -> u32 {
    (lines / LINES_PER_LEVEL).min(MAX_LEVEL)
}

/// Update ticks between gravity steps at a given level.
pub fn tick_period_for(level: u32) -> u32 {
    TICKS_PER_ROW[level.min(MAX_LEVEL) as usize]
}

/// Lock-delay threshold in ticks; grows slightly with level as forgiveness.
pub fn lock_threshold_for(level: u32) -> u32 {
    LOCK_DELAY_BASE_TICKS + level / 3
}

/// Gravity steps applied per gravity tick. Past the level cap (150 lines)
/// the fall speed keeps scaling here instead.
pub fn gravity_steps_for(lines: u32) -> u32 {
    if lines >= 150 {
        (lines - 150) / 20 + 2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_clears() {
        for (cleared, expected) in [
            (0, ComboCategory::None),
            (1, ComboCategory::Single),
            (2, ComboCategory::Double),
            (3, ComboCategory::Triple),
            (4, ComboCategory::Tetris),
        ] {
            assert_eq!(
                classify(false, cleared, PieceKind::J, ComboCategory::None),
                expected
            );
        }
    }

    #[test]
    fn test_tetris_after_tetris_is_back_to_back() {
        assert_eq!(
            classify(false, 4, PieceKind::I, ComboCategory::Tetris),
            ComboCategory::BackToBack
        );
        // And it keeps reclassifying while the chain holds.
        assert_eq!(
            classify(false, 4, PieceKind::I, ComboCategory::BackToBack),
            ComboCategory::BackToBack
        );
        // A triple in between breaks the chain.
        assert_eq!(
            classify(false, 4, PieceKind::I, ComboCategory::Triple),
            ComboCategory::Tetris
        );
    }

    #[test]
    fn test_stuck_t_piece_ladder() {
        for (cleared, expected) in [
            (0, ComboCategory::MiniTSpin),
            (1, ComboCategory::TSpinSingle),
            (2, ComboCategory::TSpinDouble),
            (3, ComboCategory::TSpinTriple),
        ] {
            assert_eq!(
                classify(true, cleared, PieceKind::T, ComboCategory::None),
                expected
            );
        }
        assert_eq!(
            classify(true, 4, PieceKind::T, ComboCategory::None),
            ComboCategory::None
        );
    }

    #[test]
    fn test_stuck_other_kinds_get_kind_spins() {
        assert_eq!(
            classify(true, 0, PieceKind::I, ComboCategory::None),
            ComboCategory::ISpin
        );
        assert_eq!(
            classify(true, 1, PieceKind::S, ComboCategory::None),
            ComboCategory::SSpin
        );
        // Stuck O falls through to the plain path.
        assert_eq!(
            classify(true, 1, PieceKind::O, ComboCategory::None),
            ComboCategory::Single
        );
    }

    #[test]
    fn test_score_table_flat_values() {
        let prev = ComboCategory::None;
        assert_eq!(score_value(ComboCategory::Single, prev, None), 100);
        assert_eq!(score_value(ComboCategory::Double, prev, None), 300);
        assert_eq!(score_value(ComboCategory::Triple, prev, None), 500);
        assert_eq!(score_value(ComboCategory::Tetris, prev, None), 800);
        assert_eq!(score_value(ComboCategory::MiniTSpin, prev, None), 100);
        assert_eq!(score_value(ComboCategory::TSpinSingle, prev, None), 800);
        assert_eq!(score_value(ComboCategory::TSpinDouble, prev, None), 1200);
        assert_eq!(score_value(ComboCategory::TSpinTriple, prev, None), 1600);
        assert_eq!(score_value(ComboCategory::JSpin, prev, None), 300);
    }

    #[test]
    fn test_tspin_chaining_bonus() {
        for prev in [
            ComboCategory::BackToBack,
            ComboCategory::TSpinDouble,
            ComboCategory::TSpinTriple,
        ] {
            assert_eq!(score_value(ComboCategory::TSpinDouble, prev, None), 1800);
            assert_eq!(score_value(ComboCategory::TSpinTriple, prev, None), 2400);
        }
        // A plain Tetris before does not chain the T-spin values.
        assert_eq!(
            score_value(ComboCategory::TSpinDouble, ComboCategory::Tetris, None),
            1200
        );
    }

    #[test]
    fn test_back_to_back_value_depends_on_last_kind() {
        let prev = ComboCategory::Tetris;
        assert_eq!(
            score_value(ComboCategory::BackToBack, prev, Some(PieceKind::I)),
            1200
        );
        assert_eq!(
            score_value(ComboCategory::BackToBack, prev, Some(PieceKind::T)),
            1800
        );
        assert_eq!(
            score_value(ComboCategory::BackToBack, prev, Some(PieceKind::L)),
            0
        );
        assert_eq!(score_value(ComboCategory::BackToBack, prev, None), 0);
    }

    #[test]
    fn test_streak_advancement() {
        assert!(advances_streak(ComboCategory::Tetris));
        assert!(advances_streak(ComboCategory::BackToBack));
        assert!(advances_streak(ComboCategory::TSpinDouble));
        assert!(advances_streak(ComboCategory::TSpinTriple));
        assert!(!advances_streak(ComboCategory::TSpinSingle));
        assert!(!advances_streak(ComboCategory::Triple));
        assert!(!advances_streak(ComboCategory::None));
    }

    #[test]
    fn test_level_curve() {
        assert_eq!(level_for_lines(0), 0);
        assert_eq!(level_for_lines(9), 0);
        assert_eq!(level_for_lines(10), 1);
        assert_eq!(level_for_lines(149), 14);
        assert_eq!(level_for_lines(150), 15);
        assert_eq!(level_for_lines(400), 15);
    }

    #[test]
    fn test_gravity_scaling_past_cap() {
        assert_eq!(gravity_steps_for(0), 1);
        assert_eq!(gravity_steps_for(149), 1);
        assert_eq!(gravity_steps_for(150), 2);
        assert_eq!(gravity_steps_for(169), 2);
        assert_eq!(gravity_steps_for(170), 3);
        assert_eq!(gravity_steps_for(210), 5);
    }

    #[test]
    fn test_lock_threshold_grows_with_level() {
        assert_eq!(lock_threshold_for(0), LOCK_DELAY_BASE_TICKS);
        assert!(lock_threshold_for(15) > lock_threshold_for(0));
        assert!(tick_period_for(15) < tick_period_for(0));
    }
}
