//! Rack scoring and end-of-game summaries.
//!
//! A rack scores the sum of its tile values if, and only if, it spells a
//! dictionary word of exactly its required length. The multiplier comes
//! from the game rules for that length. Everything here is a pure function
//! of the racks handed in, so scoring a drag preview is as cheap as scoring
//! the committed board.

use crate::model::{Rack, RackCollection, required_length};
use crate::rules::GameRules;
use crate::words::WordList;
use serde::{Deserialize, Serialize};

/// Score for one rack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordScore {
    pub base_score: u32,
    pub multiplier: u32,
}

impl WordScore {
    /// Multiplied score; server-supplied multipliers can be arbitrarily
    /// large, so this saturates instead of overflowing.
    pub fn total(&self) -> u32 {
        self.base_score.saturating_mul(self.multiplier)
    }

    pub fn is_valid(&self) -> bool {
        self.base_score > 0
    }
}

/// Score the rack at `rack_index`.
pub fn score_rack(rack: &Rack, rack_index: usize, rules: &GameRules, words: &WordList) -> WordScore {
    let length = required_length(rack_index);
    let multiplier = rules.multiplier_for(length);
    let word = rack.word();
    let base_score = if word.chars().count() == length && words.contains(&word) {
        rack.value()
    } else {
        0
    };
    WordScore {
        base_score,
        multiplier,
    }
}

/// Score every rack in order.
pub fn score_racks(racks: &RackCollection, rules: &GameRules, words: &WordList) -> Vec<WordScore> {
    racks
        .iter()
        .enumerate()
        .map(|(i, rack)| score_rack(rack, i, rules, words))
        .collect()
}

pub fn total_score(scores: &[WordScore]) -> u32 {
    scores
        .iter()
        .map(WordScore::total)
        .fold(0, u32::saturating_add)
}

/// The player may submit early once every rack spells a valid word.
pub fn all_racks_valid(scores: &[WordScore]) -> bool {
    !scores.is_empty() && scores.iter().all(WordScore::is_valid)
}

// ─── Summaries ───────────────────────────────────────────────────────────

/// Square colours used per rack in the share text.
pub const RACK_COLORS: [&str; 4] = ["🟨", "🟩", "🟦", "🟪"];
const EMPTY_SQUARE: &str = "⬜";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub total_score: u32,
    pub target_score: u32,
    pub score_difference: u32,
    /// Ties count as over.
    pub is_over_target: bool,
}

impl ScoreSummary {
    pub fn new(rack_scores: &[WordScore], target_scores: &[WordScore]) -> Self {
        let (total, target) = (total_score(rack_scores), total_score(target_scores));
        Self {
            total_score: total,
            target_score: target,
            score_difference: total.abs_diff(target),
            is_over_target: total >= target,
        }
    }

    /// Short verdict shown on the results screen.
    pub fn report_text(&self) -> String {
        let comparison = if self.total_score == self.target_score {
            "Great minds think alike."
        } else if self.is_over_target {
            "Nicely done!"
        } else {
            "Better luck next time!"
        };
        format!(
            "Your score was {} {} the target! {comparison}",
            self.score_difference,
            if self.is_over_target { "over" } else { "under" }
        )
    }

    /// Spoiler-free text for sharing: one coloured bar per rack.
    pub fn share_text(&self, rack_scores: &[WordScore], date: &str) -> String {
        let longest = rack_scores.len().saturating_sub(1) + crate::model::MIN_WORD_LEN;
        let mut lines = Vec::with_capacity(rack_scores.len() + 2);
        lines.push(format!("Word Racks — {date}"));
        for (i, score) in rack_scores.iter().enumerate() {
            let filled = required_length(i);
            let color = RACK_COLORS[i % RACK_COLORS.len()];
            lines.push(format!(
                "{}{} {} × {} = {}",
                color.repeat(filled),
                EMPTY_SQUARE.repeat(longest - filled),
                score.base_score,
                score.multiplier,
                score.total()
            ));
        }
        lines.push(format!(
            "Total: {} / {} ({}{})",
            self.total_score,
            self.target_score,
            if self.is_over_target { "🔥+" } else { "🧊-" },
            self.score_difference
        ));
        lines.join("\n")
    }

    /// Full read-out of the target solution for screen readers.
    pub fn screen_reader_text(&self, target_scores: &[WordScore], target_words: &[String]) -> String {
        let details: Vec<String> = target_scores
            .iter()
            .zip(target_words)
            .map(|(s, word)| {
                format!(
                    "{word} scored {} times {} equals {} points.",
                    s.base_score,
                    s.multiplier,
                    s.total()
                )
            })
            .collect();
        format!(
            "Game completed. Your final score was {}. The target solution was: {} ...for a total of {} points.",
            self.total_score,
            details.join(" "),
            self.target_score
        )
    }
}
