//! Heads-up display: seven-segment digits and level pips
//!
//! HUD parts are ordinary sprites created at bootstrap. Each frame only their
//! lit flag changes; unlit parts are skipped by the draw pass.

use crate::sim::registry::Registry;
use crate::sim::state::{GameState, Pip, Segment};

/// One bar of a seven-segment digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentPos {
    Top,
    Center,
    Bottom,
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl SegmentPos {
    pub const ALL: [SegmentPos; 7] = [
        SegmentPos::Top,
        SegmentPos::Center,
        SegmentPos::Bottom,
        SegmentPos::UpperLeft,
        SegmentPos::UpperRight,
        SegmentPos::LowerLeft,
        SegmentPos::LowerRight,
    ];

    /// Name prefix used for the sprite registry
    pub fn prefix(self) -> &'static str {
        match self {
            SegmentPos::Top => "top",
            SegmentPos::Center => "center",
            SegmentPos::Bottom => "bottom",
            SegmentPos::UpperLeft => "ul",
            SegmentPos::UpperRight => "ur",
            SegmentPos::LowerLeft => "bl",
            SegmentPos::LowerRight => "br",
        }
    }
}

/// Which number a digit shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigitSlot {
    ScoreUnits,
    ScoreTens,
    Lives,
}

impl DigitSlot {
    pub const ALL: [DigitSlot; 3] = [DigitSlot::ScoreUnits, DigitSlot::ScoreTens, DigitSlot::Lives];

    /// Registry name suffix
    pub fn index(self) -> u8 {
        match self {
            DigitSlot::ScoreUnits => 1,
            DigitSlot::ScoreTens => 2,
            DigitSlot::Lives => 3,
        }
    }
}

/// Segments lit for digit `d`; anything above 9 lights nothing
pub fn lit_segments(d: u32) -> &'static [SegmentPos] {
    use SegmentPos::*;
    match d {
        0 => &[Top, Bottom, UpperLeft, UpperRight, LowerLeft, LowerRight],
        1 => &[UpperRight, LowerRight],
        2 => &[Top, Center, Bottom, UpperRight, LowerLeft],
        3 => &[Top, Center, Bottom, UpperRight, LowerRight],
        4 => &[Center, UpperLeft, UpperRight, LowerRight],
        5 => &[Top, Center, Bottom, UpperLeft, LowerRight],
        6 => &[Top, Center, Bottom, UpperLeft, LowerLeft, LowerRight],
        7 => &[Top, UpperRight, LowerRight],
        8 => &SegmentPos::ALL,
        9 => &[Top, Center, Bottom, UpperLeft, UpperRight, LowerRight],
        _ => &[],
    }
}

/// Value shown by each digit slot
pub fn digit_value(slot: DigitSlot, score: u32, lives: u8) -> u32 {
    match slot {
        DigitSlot::ScoreUnits => score % 10,
        DigitSlot::ScoreTens => score / 10,
        DigitSlot::Lives => lives as u32,
    }
}

pub fn refresh_scoreboard(scoreboard: &mut Registry<Segment>, score: u32, lives: u8) {
    for segment in scoreboard.values_mut() {
        let d = digit_value(segment.slot, score, lives);
        segment.lit = lit_segments(d).contains(&segment.position);
    }
}

pub fn refresh_pips(pips: &mut Registry<Pip>, level: u8) {
    for pip in pips.values_mut() {
        pip.lit = level >= pip.rank;
    }
}

/// Bring every HUD part in line with the current score, lives and level
pub fn refresh(state: &mut GameState) {
    refresh_scoreboard(&mut state.scene.scoreboard, state.score, state.lives);
    refresh_pips(&mut state.scene.level_pips, state.level.get());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingCanvas;
    use crate::settings::Settings;
    use crate::sim::state::Level;

    fn lit_names(state: &GameState, suffix: u8) -> Vec<String> {
        let suffix = suffix.to_string();
        state
            .scene
            .scoreboard
            .iter()
            .filter(|(name, seg)| name.ends_with(&suffix) && seg.lit)
            .map(|(name, _)| name.to_string())
            .collect()
    }

    #[test]
    fn test_table_sizes() {
        let sizes: Vec<_> = (0..10).map(|d| lit_segments(d).len()).collect();
        assert_eq!(sizes, [6, 2, 5, 5, 4, 5, 6, 3, 7, 6]);
        assert!(lit_segments(10).is_empty());
    }

    #[test]
    fn test_score_37_lives_4() {
        let mut canvas = RecordingCanvas::default();
        let mut state = GameState::new(&mut canvas, &Settings::default(), 0.0).unwrap();
        state.score = 37;
        state.lives = 4;
        refresh(&mut state);

        let mut units = lit_names(&state, 1);
        units.sort();
        assert_eq!(units, ["br1", "top1", "ur1"]);

        let tens = lit_names(&state, 2);
        assert_eq!(tens.len(), 5);
        assert!(!tens.contains(&"ul2".to_string()));
        assert!(!tens.contains(&"bl2".to_string()));

        let lives = lit_names(&state, 3);
        assert_eq!(lives.len(), 4);
        assert!(lives.contains(&"center3".to_string()));
        assert!(!lives.contains(&"top3".to_string()));
    }

    #[test]
    fn test_tens_overflow_is_blank() {
        let mut canvas = RecordingCanvas::default();
        let mut state = GameState::new(&mut canvas, &Settings::default(), 0.0).unwrap();
        state.score = 120;
        refresh(&mut state);
        assert!(lit_names(&state, 2).is_empty());
        assert_eq!(lit_names(&state, 1).len(), 6);
    }

    #[test]
    fn test_pips_follow_level() {
        let mut canvas = RecordingCanvas::default();
        let mut state = GameState::new(&mut canvas, &Settings::default(), 0.0).unwrap();
        let lit = |s: &GameState| s.scene.level_pips.values().filter(|p| p.lit).count();
        assert_eq!(lit(&state), 1);
        state.set_level(Level::new(2));
        refresh(&mut state);
        assert_eq!(lit(&state), 2);
        state.set_level(Level::new(3));
        refresh(&mut state);
        assert_eq!(lit(&state), 3);
    }
}
