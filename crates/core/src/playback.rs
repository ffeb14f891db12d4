//! Round bookkeeping for scripted AI-vs-AI playback.
//!
//! A scripted conversation is a flat list of lines, each tagged with a round
//! number and a side. Turn `n` of a playback room reveals the n-th distinct
//! round; gaps in the stored round numbers are skipped.

/// Side identifiers stored in `debate_scripts.side`.
pub const SIDE_FIRST: &str = "ai_1";
pub const SIDE_SECOND: &str = "ai_2";

/// A line that belongs to a numbered round and a side.
pub trait RoundOrdered {
    fn round_number(&self) -> i32;
    fn side(&self) -> &str;
}

/// Sort lines by round, then by side identifier. The sort is stable, so lines
/// of the same round and side keep their stored order.
pub fn sort_script<T: RoundOrdered>(lines: &mut [T]) {
    lines.sort_by(|a, b| {
        a.round_number()
            .cmp(&b.round_number())
            .then_with(|| a.side().cmp(b.side()))
    });
}

/// Distinct round numbers in ascending order.
pub fn distinct_rounds<T: RoundOrdered>(lines: &[T]) -> Vec<i32> {
    let mut rounds: Vec<i32> = lines.iter().map(RoundOrdered::round_number).collect();
    rounds.sort_unstable();
    rounds.dedup();
    rounds
}

/// The round revealed by the 1-based `turn`, if the script has that many.
pub fn round_for_turn(rounds: &[i32], turn: i32) -> Option<i32> {
    let index = usize::try_from(turn).ok()?.checked_sub(1)?;
    rounds.get(index).copied()
}

/// All lines of `round`, in (round, side) order.
pub fn lines_for_round<T: RoundOrdered + Clone>(lines: &[T], round: i32) -> Vec<T> {
    let mut out: Vec<T> = lines
        .iter()
        .filter(|l| l.round_number() == round)
        .cloned()
        .collect();
    sort_script(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Line(i32, &'static str, &'static str);

    impl RoundOrdered for Line {
        fn round_number(&self) -> i32 {
            self.0
        }
        fn side(&self) -> &str {
            self.1
        }
    }

    fn script() -> Vec<Line> {
        vec![
            Line(2, SIDE_SECOND, "d"),
            Line(1, SIDE_SECOND, "b"),
            Line(4, SIDE_FIRST, "e"),
            Line(1, SIDE_FIRST, "a"),
            Line(2, SIDE_FIRST, "c"),
        ]
    }

    #[test]
    fn sorts_by_round_then_side() {
        let mut lines = script();
        sort_script(&mut lines);
        let text: Vec<_> = lines.iter().map(|l| l.2).collect();
        assert_eq!(text, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn distinct_rounds_skip_gaps() {
        assert_eq!(distinct_rounds(&script()), vec![1, 2, 4]);
    }

    #[test]
    fn turns_map_to_increasing_rounds() {
        let rounds = distinct_rounds(&script());
        assert_eq!(round_for_turn(&rounds, 1), Some(1));
        assert_eq!(round_for_turn(&rounds, 3), Some(4));
        assert_eq!(round_for_turn(&rounds, 4), None);
        assert_eq!(round_for_turn(&rounds, 0), None);
    }

    #[test]
    fn lines_for_round_are_ordered() {
        let lines = lines_for_round(&script(), 2);
        assert_eq!(lines, vec![Line(2, SIDE_FIRST, "c"), Line(2, SIDE_SECOND, "d")]);
    }
}
