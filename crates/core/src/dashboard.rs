use crate::model::QuizResult;

/// Experience points awarded per answered question.
pub const XP_PER_QUESTION: u64 = 10;

/// Aggregates shown at the top of the analytics dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_quizzes: usize,
    pub total_questions_answered: u64,
    /// Rounded mean of per-quiz percentages; 0 with no history.
    pub average_percentage: u32,
    pub xp: u64,
    pub last_quiz: Option<QuizResult>,
}

impl DashboardStats {
    /// Summarize a history ordered newest first.
    #[must_use]
    pub fn from_history(results: &[QuizResult]) -> Self {
        let total_quizzes = results.len();
        let total_questions_answered: u64 = results
            .iter()
            .map(|r| u64::from(r.total_questions()))
            .sum();

        let average_percentage = if total_quizzes == 0 {
            0
        } else {
            let sum: u64 = results.iter().map(|r| u64::from(r.percentage())).sum();
            let n = total_quizzes as u64;
            u32::try_from((sum * 2 + n) / (n * 2)).unwrap_or(u32::MAX)
        };

        Self {
            total_quizzes,
            total_questions_answered,
            average_percentage,
            xp: total_questions_answered * XP_PER_QUESTION,
            last_quiz: results.first().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn result(score: u32, total: u32) -> QuizResult {
        QuizResult::new("Set", score, total, fixed_now()).unwrap()
    }

    #[test]
    fn empty_history_is_all_zero() {
        let stats = DashboardStats::from_history(&[]);
        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn aggregates_history() {
        // 100%, 50%, 25% -> mean 58.33 -> 58
        let history = vec![result(4, 4), result(5, 10), result(1, 4)];
        let stats = DashboardStats::from_history(&history);
        assert_eq!(stats.total_quizzes, 3);
        assert_eq!(stats.total_questions_answered, 18);
        assert_eq!(stats.average_percentage, 58);
        assert_eq!(stats.xp, 180);
        assert_eq!(stats.last_quiz.unwrap().score(), 4);
    }

    #[test]
    fn average_rounds_half_up() {
        // 50% and 75% -> 62.5 -> 63
        let stats = DashboardStats::from_history(&[result(1, 2), result(3, 4)]);
        assert_eq!(stats.average_percentage, 63);
    }
}
