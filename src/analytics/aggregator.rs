// src/analytics/aggregator.rs

use std::collections::BTreeMap;

use crate::{
    analytics::{
        subject::normalize_subject,
        topic::{resolve_topic, resolve_topic_name},
    },
    config::{
        DEFAULT_ESTIMATED_QUESTIONS, DEFAULT_MARKS_PER_QUESTION, MIN_RANKED_TOPIC_QUESTIONS,
        PASSING_SCORE, RANKED_TOPIC_COUNT,
    },
    models::{
        analytics::{
            Analytics, DataOrigin, OverallStats, Subject, SubjectAggregate, TopicAggregate,
            TopicStanding,
        },
        attempt::TestAttempt,
        question::QuestionResult,
    },
};

/// Filler topics for a Chemistry bucket that has attempts but no topic data:
/// (topic, questions, correct answers).
const CHEMISTRY_PLACEHOLDERS: [(&str, u32, u32); 5] = [
    ("Chemical Bonding", 12, 8),
    ("Organic Chemistry", 15, 9),
    ("Equilibrium", 10, 7),
    ("Thermodynamics", 8, 4),
    ("Atomic Structure", 9, 7),
];

/// Rounded percentage of `part` in `whole`; 0 when `whole` is not positive.
pub(crate) fn percent(part: f64, whole: f64) -> u32 {
    if whole <= 0.0 {
        return 0;
    }
    (100.0 * part / whole).round().max(0.0) as u32
}

/// Folds a test history into overall, per-subject and per-topic statistics.
///
/// Pure: nothing is carried between calls, so the same history always yields
/// the same `Analytics`. Attempts without a subject still count towards the
/// overall score figures.
pub fn aggregate(attempts: &[TestAttempt]) -> Analytics {
    let mut overall = ScoreTally::default();
    let mut subjects: BTreeMap<Subject, SubjectAggregate> = BTreeMap::new();

    for (index, attempt) in attempts.iter().enumerate() {
        overall.record(attempt.percentage());

        let Some(label) = attempt.subject.as_deref() else {
            continue;
        };

        let subject = normalize_subject(label);
        let aggregate = subjects
            .entry(subject)
            .or_insert_with(|| SubjectAggregate::new(subject));

        aggregate.fold_attempt(attempt, &attempt.key(index));
    }

    for aggregate in subjects.values_mut() {
        aggregate.finalize();
    }

    Analytics {
        overall: OverallStats {
            total_attempts: attempts.len() as u32,
            scored_attempts: overall.count,
            average_score: overall.average(),
            pass_rate: overall.pass_rate(),
        },
        by_subject: subjects,
    }
}

#[derive(Debug, Default)]
struct ScoreTally {
    count: u32,
    total: f64,
    passed: u32,
}

impl ScoreTally {
    fn record(&mut self, score: Option<f64>) {
        if let Some(score) = score {
            self.count += 1;
            self.total += score;
            if score >= PASSING_SCORE {
                self.passed += 1;
            }
        }
    }

    fn average(&self) -> u32 {
        percent(self.total, 100.0 * self.count as f64)
    }

    fn pass_rate(&self) -> u32 {
        percent(self.passed as f64, self.count as f64)
    }
}

impl TopicAggregate {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn add_question(&mut self, question: &QuestionResult, attempt_id: &str) {
        self.total_questions = self.total_questions.saturating_add(1);
        self.total_marks += question.marks;
        if question.correct {
            self.correct_answers = self.correct_answers.saturating_add(1);
            self.marks_scored += question.marks;
        }
        if question.attempted {
            self.attempted_questions = self.attempted_questions.saturating_add(1);
        }
        self.tests.insert(attempt_id.to_string());
    }

    fn add_summary(&mut self, summary: &FoldedSummary, attempt_id: &str) {
        self.total_questions = self.total_questions.saturating_add(summary.questions);
        self.correct_answers = self.correct_answers.saturating_add(summary.correct);
        self.attempted_questions = self.attempted_questions.saturating_add(summary.attempted);
        self.total_marks += summary.questions as f64 * summary.marks_per_question;
        self.marks_scored += summary.correct as f64 * summary.marks_per_question;
        self.origin = self.origin.merge(summary.origin);
        self.tests.insert(attempt_id.to_string());
    }

    fn finalize(&mut self) {
        self.accuracy = percent(self.correct_answers as f64, self.total_questions as f64);
        self.attempt_rate = percent(self.attempted_questions as f64, self.total_questions as f64);
        self.marks_percentage = percent(self.marks_scored, self.total_marks);
        self.test_count = self.tests.len();
    }
}

/// A topic-wise summary or a score-only estimate, normalized for folding.
struct FoldedSummary {
    questions: u32,
    correct: u32,
    attempted: u32,
    marks_per_question: f64,
    origin: DataOrigin,
}

impl SubjectAggregate {
    fn new(subject: Subject) -> Self {
        Self {
            subject,
            count: 0,
            valid_score_count: 0,
            total_score: 0.0,
            passed: 0,
            total_questions: 0,
            correct_answers: 0,
            total_marks: 0.0,
            marks_scored: 0.0,
            average_score: 0,
            pass_rate: 0,
            accuracy: 0,
            marks_percentage: 0,
            topics: BTreeMap::new(),
            sorted_topics: Vec::new(),
            strongest_topics: Vec::new(),
            weakest_topics: Vec::new(),
        }
    }

    fn topic_mut(&mut self, name: &str) -> &mut TopicAggregate {
        self.topics
            .entry(name.to_string())
            .or_insert_with(|| TopicAggregate::new(name))
    }

    fn fold_attempt(&mut self, attempt: &TestAttempt, attempt_id: &str) {
        let score = attempt.percentage();
        if let Some(score) = score {
            self.valid_score_count += 1;
            self.total_score += score;
            if score >= PASSING_SCORE {
                self.passed += 1;
            }
        }
        self.count += 1;

        let subject = self.subject;
        let marks_per_question = attempt
            .marks_per_question
            .filter(|marks| *marks > 0.0)
            .unwrap_or(DEFAULT_MARKS_PER_QUESTION);

        if !attempt.questions.is_empty() {
            for raw in &attempt.questions {
                let question = QuestionResult::from_raw(raw, marks_per_question);
                let key = resolve_topic(&question, subject, subject.as_str());

                self.topic_mut(&key).add_question(&question, attempt_id);

                self.total_questions = self.total_questions.saturating_add(1);
                self.total_marks += question.marks;
                if question.correct {
                    self.correct_answers = self.correct_answers.saturating_add(1);
                    self.marks_scored += question.marks;
                }
            }
        } else if let Some(summaries) = attempt.topic_summaries() {
            for (name, summary) in summaries {
                let questions = summary.total_questions.unwrap_or(0);
                let folded = FoldedSummary {
                    questions,
                    correct: summary.correct_answers.unwrap_or(0).min(questions),
                    attempted: summary.attempted.unwrap_or(0).min(questions),
                    marks_per_question,
                    origin: DataOrigin::Measured,
                };
                let key = resolve_topic_name(Some(name.as_str()), subject, subject.as_str());
                self.fold_summary(&key, &folded, attempt_id);
            }
        } else if let Some(score) = score {
            let questions = attempt
                .question_count
                .or(attempt.total_questions)
                .unwrap_or(DEFAULT_ESTIMATED_QUESTIONS);
            let correct = ((score / 100.0) * questions as f64).round() as u32;
            let folded = FoldedSummary {
                questions,
                correct: correct.min(questions),
                attempted: questions,
                marks_per_question,
                origin: DataOrigin::Estimated,
            };
            tracing::debug!(
                "Attempt {} has no question detail; estimating {} of {} correct",
                attempt_id,
                folded.correct,
                questions
            );
            let key = format!("{} Topic 1", subject);
            self.fold_summary(&key, &folded, attempt_id);
        }
    }

    fn fold_summary(&mut self, key: &str, summary: &FoldedSummary, attempt_id: &str) {
        self.topic_mut(key).add_summary(summary, attempt_id);

        self.total_questions = self.total_questions.saturating_add(summary.questions);
        self.correct_answers = self.correct_answers.saturating_add(summary.correct);
        self.total_marks += summary.questions as f64 * summary.marks_per_question;
        self.marks_scored += summary.correct as f64 * summary.marks_per_question;
    }

    fn finalize(&mut self) {
        self.average_score = percent(self.total_score, 100.0 * self.valid_score_count as f64);
        self.pass_rate = percent(self.passed as f64, self.valid_score_count as f64);
        self.accuracy = percent(self.correct_answers as f64, self.total_questions as f64);
        self.marks_percentage = percent(self.marks_scored, self.total_marks);

        if self.subject == Subject::Chemistry && self.topics.is_empty() && self.count > 0 {
            self.insert_placeholder_topics();
        }

        for topic in self.topics.values_mut() {
            topic.finalize();
        }

        self.rank_topics();
    }

    /// Placeholder topics are flagged and do not feed the subject totals.
    fn insert_placeholder_topics(&mut self) {
        tracing::debug!("No Chemistry topic data; inserting placeholder topics");
        for (name, questions, correct) in CHEMISTRY_PLACEHOLDERS {
            let topic = self.topic_mut(name);
            topic.origin = DataOrigin::Placeholder;
            topic.total_questions = questions;
            topic.correct_answers = correct;
            topic.attempted_questions = questions;
            topic.total_marks = questions as f64 * DEFAULT_MARKS_PER_QUESTION;
            topic.marks_scored = correct as f64 * DEFAULT_MARKS_PER_QUESTION;
        }
    }

    fn rank_topics(&mut self) {
        // BTreeMap iteration gives name order; stable sorts keep it as the tie-break.
        let mut sorted: Vec<&TopicAggregate> = self.topics.values().collect();
        sorted.sort_by(|a, b| b.marks_scored.total_cmp(&a.marks_scored));

        let eligible: Vec<&TopicAggregate> = sorted
            .iter()
            .copied()
            .filter(|topic| topic.total_questions >= MIN_RANKED_TOPIC_QUESTIONS)
            .collect();

        let mut strongest = eligible.clone();
        strongest.sort_by(|a, b| b.marks_percentage.cmp(&a.marks_percentage));

        let mut weakest = eligible;
        weakest.sort_by(|a, b| a.marks_percentage.cmp(&b.marks_percentage));

        let standings = |topics: &[&TopicAggregate], limit: usize| -> Vec<TopicStanding> {
            topics.iter().take(limit).map(|t| TopicStanding::from(*t)).collect()
        };

        let sorted_topics = standings(&sorted, sorted.len());
        let strongest_topics = standings(&strongest, RANKED_TOPIC_COUNT);
        let weakest_topics = standings(&weakest, RANKED_TOPIC_COUNT);

        self.sorted_topics = sorted_topics;
        self.strongest_topics = strongest_topics;
        self.weakest_topics = weakest_topics;
    }
}
