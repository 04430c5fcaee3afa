//! Plain-text rendering of view models for the terminal.

use std::fmt::Write as _;

use crate::vm::{DashboardVm, FlashcardVm, QuizQuestionVm, QuizReviewVm, SettingRowVm};

const PROGRESS_WIDTH: usize = 30;

/// `[#########.....................]`
#[must_use]
pub fn progress_bar(percent: f64, width: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

#[must_use]
pub fn render_question(vm: &QuizQuestionVm) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  ({}/{})", vm.label, vm.number, vm.total);
    let _ = writeln!(out, "{}", progress_bar(vm.progress_percent, PROGRESS_WIDTH));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", vm.question);
    for option in &vm.options {
        let marker = if option.selected { '>' } else { ' ' };
        let _ = writeln!(out, " {marker} {}) {}", option.letter, option.text);
    }
    out
}

#[must_use]
pub fn render_review(vm: &QuizReviewVm) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Quiz complete: {}", vm.label);
    let _ = writeln!(out, "{}%  ({} / {} correct)", vm.percentage, vm.score, vm.total);
    for item in &vm.items {
        let mark = if item.is_correct { "ok" } else { "x " };
        let _ = writeln!(out);
        let _ = writeln!(out, "[{mark}] {}. {}", item.number, item.question);
        let _ = writeln!(out, "     your answer:    {}", item.your_answer);
        let _ = writeln!(out, "     correct answer: {}", item.correct_answer);
    }
    out
}

#[must_use]
pub fn render_dashboard(vm: &DashboardVm) -> String {
    let mut out = String::new();
    for card in &vm.cards {
        let _ = writeln!(out, "{:<14} {}", card.title, card.value);
    }

    if let Some(last) = &vm.last_quiz {
        let _ = writeln!(out);
        let _ = writeln!(out, "Recent Performance");
        let _ = writeln!(
            out,
            "  {}  {}  {} correct  ({})",
            last.session, last.result, last.raw_score, last.date
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "History");
    if vm.is_empty() {
        let _ = writeln!(out, "  No quizzes yet.");
        return out;
    }

    let session_width = vm
        .history
        .iter()
        .map(|row| row.session.chars().count())
        .max()
        .unwrap_or(0)
        .max("Session".len());
    let _ = writeln!(
        out,
        "  {:<session_width$}  {:<10}  {:>9}  {:>6}",
        "Session", "Date", "Raw Score", "Result"
    );
    for row in &vm.history {
        let _ = writeln!(
            out,
            "  {:<session_width$}  {:<10}  {:>9}  {:>6}",
            row.session, row.date, row.raw_score, row.result
        );
    }
    out
}

#[must_use]
pub fn render_flashcards(cards: &[FlashcardVm]) -> String {
    if cards.is_empty() {
        return "No flashcards yet.\n".to_owned();
    }
    let mut out = String::new();
    for card in cards {
        let _ = writeln!(out, "{:>3}. {}", card.number, card.term);
        let _ = writeln!(out, "     {}", card.definition);
    }
    out
}

#[must_use]
pub fn render_settings(rows: &[SettingRowVm]) -> String {
    let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(out, "{:<width$}  {}", row.name, row.value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::{QuizOptionVm, ResultRowVm, StatCardVm};

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(50.0, 10), "[#####.....]");
        assert_eq!(progress_bar(0.0, 4), "[....]");
        assert_eq!(progress_bar(140.0, 4), "[####]");
    }

    #[test]
    fn question_lists_lettered_options() {
        let vm = QuizQuestionVm {
            label: "Bio".into(),
            number: 2,
            total: 4,
            question: "What makes ATP?".into(),
            options: ["Nucleus", "Mitochondria"]
                .iter()
                .enumerate()
                .map(|(i, text)| QuizOptionVm {
                    letter: char::from(b'A' + u8::try_from(i).unwrap()),
                    text: (*text).to_owned(),
                    selected: i == 1,
                })
                .collect(),
            progress_percent: 50.0,
            is_last: false,
        };
        let text = render_question(&vm);
        assert!(text.starts_with("Bio  (2/4)\n"));
        assert!(text.contains("   A) Nucleus\n"));
        assert!(text.contains(" > B) Mitochondria\n"));
    }

    #[test]
    fn empty_dashboard_says_so() {
        let vm = DashboardVm {
            cards: vec![StatCardVm {
                title: "Total Quizzes",
                value: "0".into(),
            }],
            last_quiz: None,
            history: vec![],
        };
        let text = render_dashboard(&vm);
        assert!(text.contains("No quizzes yet."));
        assert!(!text.contains("Recent Performance"));
    }

    #[test]
    fn dashboard_table_has_headers() {
        let row = ResultRowVm {
            session: "Physics".into(),
            date: "2023-11-14".into(),
            raw_score: "3/4".into(),
            result: "75%".into(),
        };
        let vm = DashboardVm {
            cards: vec![],
            last_quiz: Some(row.clone()),
            history: vec![row],
        };
        let text = render_dashboard(&vm);
        assert!(text.contains("Session  Date        Raw Score  Result"));
        assert!(text.contains("Physics  2023-11-14        3/4     75%"));
    }
}
