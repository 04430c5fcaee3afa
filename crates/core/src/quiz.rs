//! In-memory quiz flow: one question at a time, answer, advance, score.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{Mcq, QuizResult, QuizResultError};

/// Label used when a stored quiz has no session name.
pub const UNTITLED_QUIZ: &str = "Untitled Quiz";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSessionError {
    #[error("quiz has no questions")]
    Empty,

    #[error("quiz already finished")]
    Finished,

    #[error("quiz is not finished yet")]
    NotFinished,

    #[error("select an answer before moving on")]
    Unanswered,

    #[error("\"{0}\" is not an option for this question")]
    UnknownOption(String),

    #[error("option index {0} is out of range")]
    OptionOutOfRange(usize),

    #[error(transparent)]
    Result(#[from] QuizResultError),
}

/// What happened after `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at this index.
    Next(usize),
    /// The last question was answered; carries the final score.
    Finished(u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizProgress {
    /// 1-based position of the current question.
    pub current: usize,
    pub total: usize,
    pub answered: usize,
    pub percent: f64,
}

/// Per-question line of the post-quiz review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReview<'a> {
    pub index: usize,
    pub question: &'a str,
    pub selected: Option<&'a str>,
    pub correct: &'a str,
    pub is_correct: bool,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    label: String,
    questions: Vec<Mcq>,
    current: usize,
    answers: BTreeMap<usize, String>,
    finished: bool,
}

impl QuizSession {
    /// # Errors
    ///
    /// Returns `QuizSessionError::Empty` when there are no questions.
    pub fn new(label: impl Into<String>, questions: Vec<Mcq>) -> Result<Self, QuizSessionError> {
        if questions.is_empty() {
            return Err(QuizSessionError::Empty);
        }
        let label = label.into().trim().to_owned();
        Ok(Self {
            label: if label.is_empty() {
                UNTITLED_QUIZ.to_owned()
            } else {
                label
            },
            questions,
            current: 0,
            answers: BTreeMap::new(),
            finished: false,
        })
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn questions(&self) -> &[Mcq] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Mcq {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn selected(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    /// Record (or replace) the answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `Finished` once the quiz is over and `UnknownOption` when the
    /// option does not belong to the current question.
    pub fn select_answer(&mut self, option: &str) -> Result<(), QuizSessionError> {
        if self.finished {
            return Err(QuizSessionError::Finished);
        }
        if !self.current_question().has_option(option) {
            return Err(QuizSessionError::UnknownOption(option.to_owned()));
        }
        self.answers.insert(self.current, option.to_owned());
        Ok(())
    }

    /// Select by zero-based option position (A = 0).
    ///
    /// # Errors
    ///
    /// Same as `select_answer`, plus `OptionOutOfRange`.
    pub fn select_option(&mut self, position: usize) -> Result<(), QuizSessionError> {
        if self.finished {
            return Err(QuizSessionError::Finished);
        }
        let option = self
            .current_question()
            .options()
            .get(position)
            .cloned()
            .ok_or(QuizSessionError::OptionOutOfRange(position))?;
        self.select_answer(&option)
    }

    /// Move past the current question, finishing on the last one.
    ///
    /// # Errors
    ///
    /// Returns `Unanswered` if nothing is selected for the current question
    /// and `Finished` if the quiz is already over.
    pub fn advance(&mut self) -> Result<Advance, QuizSessionError> {
        if self.finished {
            return Err(QuizSessionError::Finished);
        }
        if !self.answers.contains_key(&self.current) {
            return Err(QuizSessionError::Unanswered);
        }
        if self.is_last_question() {
            self.finished = true;
            return Ok(Advance::Finished(self.score()));
        }
        self.current += 1;
        Ok(Advance::Next(self.current))
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let total = self.questions.len();
        let current = self.current + 1;
        #[allow(clippy::cast_precision_loss)]
        let percent = (current as f64 / total as f64) * 100.0;
        QuizProgress {
            current,
            total,
            answered: self.answers.len(),
            percent,
        }
    }

    /// Number of recorded answers that match their question's answer.
    #[must_use]
    pub fn score(&self) -> u32 {
        let correct = self
            .answers
            .iter()
            .filter(|(idx, answer)| {
                self.questions
                    .get(**idx)
                    .is_some_and(|q| q.is_correct(answer))
            })
            .count();
        u32::try_from(correct).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn review(&self) -> Vec<QuestionReview<'_>> {
        self.questions
            .iter()
            .enumerate()
            .map(|(index, q)| {
                let selected = self.selected(index);
                QuestionReview {
                    index,
                    question: q.question(),
                    selected,
                    correct: q.answer(),
                    is_correct: selected.is_some_and(|s| q.is_correct(s)),
                }
            })
            .collect()
    }

    /// Build the persisted result for a finished quiz.
    ///
    /// # Errors
    ///
    /// Returns `NotFinished` before the last question was passed.
    pub fn to_result(&self, completed_at: DateTime<Utc>) -> Result<QuizResult, QuizSessionError> {
        if !self.finished {
            return Err(QuizSessionError::NotFinished);
        }
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        Ok(QuizResult::new(
            self.label.clone(),
            self.score(),
            total,
            completed_at,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::McqDraft;
    use crate::time::fixed_now;

    fn mcq(n: usize) -> Mcq {
        McqDraft {
            question: format!("Q{n}"),
            options: (0..4).map(|i| format!("{n}-{i}")).collect(),
            answer: format!("{n}-0"),
        }
        .validate()
        .unwrap()
    }

    fn session(n: usize) -> QuizSession {
        QuizSession::new("Unit", (0..n).map(mcq).collect()).unwrap()
    }

    #[test]
    fn empty_quiz_is_rejected() {
        assert_eq!(
            QuizSession::new("x", Vec::new()).unwrap_err(),
            QuizSessionError::Empty
        );
    }

    #[test]
    fn blank_label_falls_back() {
        let quiz = QuizSession::new("  ", vec![mcq(0)]).unwrap();
        assert_eq!(quiz.label(), UNTITLED_QUIZ);
    }

    #[test]
    fn cannot_advance_without_answer() {
        let mut quiz = session(2);
        assert_eq!(quiz.advance().unwrap_err(), QuizSessionError::Unanswered);
    }

    #[test]
    fn walks_through_and_scores() {
        let mut quiz = session(3);
        quiz.select_answer("0-0").unwrap();
        assert_eq!(quiz.advance().unwrap(), Advance::Next(1));
        quiz.select_option(2).unwrap();
        assert_eq!(quiz.advance().unwrap(), Advance::Next(2));
        quiz.select_answer("2-3").unwrap();
        quiz.select_answer("2-0").unwrap();
        assert_eq!(quiz.advance().unwrap(), Advance::Finished(2));
        assert!(quiz.is_finished());

        let result = quiz.to_result(fixed_now()).unwrap();
        assert_eq!(result.score(), 2);
        assert_eq!(result.total_questions(), 3);
        assert_eq!(result.percentage(), 67);
        assert_eq!(result.session_label(), "Unit");
    }

    #[test]
    fn finished_quiz_is_frozen() {
        let mut quiz = session(1);
        quiz.select_answer("0-1").unwrap();
        quiz.advance().unwrap();
        assert_eq!(
            quiz.select_answer("0-0").unwrap_err(),
            QuizSessionError::Finished
        );
        assert_eq!(quiz.advance().unwrap_err(), QuizSessionError::Finished);
        assert_eq!(quiz.score(), 0);
    }

    #[test]
    fn rejects_foreign_option() {
        let mut quiz = session(2);
        assert!(matches!(
            quiz.select_answer("1-0"),
            Err(QuizSessionError::UnknownOption(_))
        ));
        assert_eq!(
            quiz.select_option(4).unwrap_err(),
            QuizSessionError::OptionOutOfRange(4)
        );
    }

    #[test]
    fn result_requires_finish() {
        let quiz = session(2);
        assert_eq!(
            quiz.to_result(fixed_now()).unwrap_err(),
            QuizSessionError::NotFinished
        );
    }

    #[test]
    fn progress_is_one_based() {
        let mut quiz = session(4);
        let p = quiz.progress();
        assert_eq!((p.current, p.total, p.answered), (1, 4, 0));
        assert!((p.percent - 25.0).abs() < f64::EPSILON);

        quiz.select_option(0).unwrap();
        quiz.advance().unwrap();
        let p = quiz.progress();
        assert_eq!((p.current, p.answered), (2, 1));
        assert!((p.percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn review_marks_each_question() {
        let mut quiz = session(2);
        quiz.select_option(0).unwrap();
        quiz.advance().unwrap();
        quiz.select_option(1).unwrap();
        quiz.advance().unwrap();

        let review = quiz.review();
        assert!(review[0].is_correct);
        assert_eq!(review[1].selected, Some("1-1"));
        assert_eq!(review[1].correct, "1-0");
        assert!(!review[1].is_correct);
    }
}
