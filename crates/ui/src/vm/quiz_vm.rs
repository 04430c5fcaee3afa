use study_core::model::QuizResult;
use study_core::quiz::QuizSession;

/// Shown in the review when a question was never answered.
pub const NO_ANSWER: &str = "(no answer)";

/// `A`, `B`, ... for option positions.
#[must_use]
pub fn option_letter(position: usize) -> char {
    u8::try_from(position)
        .ok()
        .and_then(|p| b'A'.checked_add(p))
        .filter(u8::is_ascii_uppercase)
        .map_or('?', char::from)
}

/// Parses a typed choice: a letter (`b`) or a 1-based number (`2`).
#[must_use]
pub fn parse_choice(input: &str, option_count: usize) -> Option<usize> {
    let input = input.trim();
    let position = match input.parse::<usize>() {
        Ok(n) => n.checked_sub(1)?,
        Err(_) => {
            let mut chars = input.chars();
            let letter = chars.next()?.to_ascii_uppercase();
            if chars.next().is_some() || !letter.is_ascii_uppercase() {
                return None;
            }
            usize::from(letter as u8 - b'A')
        }
    };
    (position < option_count).then_some(position)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizOptionVm {
    pub letter: char,
    pub text: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuizQuestionVm {
    pub label: String,
    /// 1-based.
    pub number: usize,
    pub total: usize,
    pub question: String,
    pub options: Vec<QuizOptionVm>,
    pub progress_percent: f64,
    pub is_last: bool,
}

impl From<&QuizSession> for QuizQuestionVm {
    fn from(session: &QuizSession) -> Self {
        let index = session.current_index();
        let question = session.current_question();
        let selected = session.selected(index);
        let progress = session.progress();
        Self {
            label: session.label().to_owned(),
            number: progress.current,
            total: progress.total,
            question: question.question().to_owned(),
            options: question
                .options()
                .iter()
                .enumerate()
                .map(|(i, text)| QuizOptionVm {
                    letter: option_letter(i),
                    text: text.clone(),
                    selected: selected == Some(text.as_str()),
                })
                .collect(),
            progress_percent: progress.percent,
            is_last: session.is_last_question(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewItemVm {
    pub number: usize,
    pub question: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizReviewVm {
    pub label: String,
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
    pub items: Vec<ReviewItemVm>,
}

#[must_use]
pub fn map_quiz_review(session: &QuizSession, result: &QuizResult) -> QuizReviewVm {
    QuizReviewVm {
        label: result.session_label().to_owned(),
        score: result.score(),
        total: result.total_questions(),
        percentage: result.percentage(),
        items: session
            .review()
            .into_iter()
            .map(|line| ReviewItemVm {
                number: line.index + 1,
                question: line.question.to_owned(),
                your_answer: line.selected.unwrap_or(NO_ANSWER).to_owned(),
                correct_answer: line.correct.to_owned(),
                is_correct: line.is_correct,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::model::{Mcq, McqDraft};
    use study_core::time::fixed_now;

    fn mcq(q: &str, answer: &str) -> Mcq {
        McqDraft {
            question: q.into(),
            options: vec!["Red".into(), "Blue".into(), "Green".into(), "Black".into()],
            answer: answer.into(),
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn letters_and_choices() {
        assert_eq!(option_letter(0), 'A');
        assert_eq!(option_letter(3), 'D');
        assert_eq!(parse_choice("b", 4), Some(1));
        assert_eq!(parse_choice(" D ", 4), Some(3));
        assert_eq!(parse_choice("1", 4), Some(0));
        assert_eq!(parse_choice("0", 4), None);
        assert_eq!(parse_choice("5", 4), None);
        assert_eq!(parse_choice("E", 4), None);
        assert_eq!(parse_choice("ab", 4), None);
        assert_eq!(parse_choice("", 4), None);
        assert_eq!(parse_choice("?", 4), None);
    }

    #[test]
    fn question_vm_marks_selection_and_progress() {
        let mut session =
            QuizSession::new("Colors", vec![mcq("Sky?", "Blue"), mcq("Grass?", "Green")]).unwrap();
        session.select_option(1).unwrap();

        let vm = QuizQuestionVm::from(&session);
        assert_eq!(vm.number, 1);
        assert_eq!(vm.total, 2);
        assert!((vm.progress_percent - 50.0).abs() < f64::EPSILON);
        assert!(!vm.is_last);
        let selected: Vec<char> = vm
            .options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.letter)
            .collect();
        assert_eq!(selected, ['B']);
    }

    #[test]
    fn review_shows_answers() {
        let mut session =
            QuizSession::new("Colors", vec![mcq("Sky?", "Blue"), mcq("Grass?", "Green")]).unwrap();
        session.select_answer("Blue").unwrap();
        session.advance().unwrap();
        session.select_answer("Red").unwrap();
        session.advance().unwrap();
        let result = session.to_result(fixed_now()).unwrap();

        let vm = map_quiz_review(&session, &result);
        assert_eq!((vm.score, vm.total, vm.percentage), (1, 2, 50));
        assert!(vm.items[0].is_correct);
        assert_eq!(vm.items[1].your_answer, "Red");
        assert_eq!(vm.items[1].correct_answer, "Green");
        assert_eq!(vm.items[1].number, 2);
    }
}
