use study_core::dashboard::DashboardStats;
use study_core::model::QuizResult;

use crate::vm::time_fmt::format_date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatCardVm {
    pub title: &'static str,
    pub value: String,
}

/// One row of the history table; also used for the "last quiz" panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRowVm {
    pub session: String,
    pub date: String,
    pub raw_score: String,
    pub result: String,
}

impl From<&QuizResult> for ResultRowVm {
    fn from(result: &QuizResult) -> Self {
        Self {
            session: result.session_label().to_owned(),
            date: format_date(result.completed_at()),
            raw_score: format!("{}/{}", result.score(), result.total_questions()),
            result: format!("{}%", result.percentage()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub cards: Vec<StatCardVm>,
    pub last_quiz: Option<ResultRowVm>,
    pub history: Vec<ResultRowVm>,
}

impl DashboardVm {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[must_use]
pub fn map_dashboard(stats: &DashboardStats, history: &[QuizResult]) -> DashboardVm {
    DashboardVm {
        cards: vec![
            StatCardVm {
                title: "Total Quizzes",
                value: stats.total_quizzes.to_string(),
            },
            StatCardVm {
                title: "Success Rate",
                value: format!("{}%", stats.average_percentage),
            },
            StatCardVm {
                title: "XP Earned",
                value: stats.xp.to_string(),
            },
        ],
        last_quiz: stats.last_quiz.as_ref().map(ResultRowVm::from),
        history: history.iter().map(ResultRowVm::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::time::fixed_now;

    #[test]
    fn empty_history_has_zero_cards() {
        let vm = map_dashboard(&DashboardStats::default(), &[]);
        assert!(vm.is_empty());
        assert!(vm.last_quiz.is_none());
        let values: Vec<&str> = vm.cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, ["0", "0%", "0"]);
    }

    #[test]
    fn rows_show_raw_score_and_percentage() {
        let history = vec![
            QuizResult::new("Physics", 3, 4, fixed_now()).unwrap(),
            QuizResult::new("Biology", 1, 3, fixed_now()).unwrap(),
        ];
        let stats = DashboardStats::from_history(&history);
        let vm = map_dashboard(&stats, &history);

        assert_eq!(vm.history.len(), 2);
        assert_eq!(vm.history[0].raw_score, "3/4");
        assert_eq!(vm.history[0].result, "75%");
        assert_eq!(vm.history[1].result, "33%");
        assert_eq!(vm.last_quiz.unwrap().session, "Physics");
        assert_eq!(vm.cards[1].value, "54%");
        assert_eq!(vm.cards[2].value, "70");
    }
}
