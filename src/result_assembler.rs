use std::collections::HashSet;

use uuid::Uuid;

use crate::error::QuizError;
use crate::structs::question::{ComprehensionQuestionSet, SingleAnswerQuestion};
use crate::structs::request::SubmittedAnswer;
use crate::structs::respond::{ComprehensionResult, QuizResultReport, SingleAnswerResult};
use crate::structs::types::QuestionId;
use crate::traits::question_store::QuestionStore;

// 提交的id统一转换为库中保存的小写格式
fn canonical_id(id: &str) -> Result<QuestionId, QuizError> {
    Uuid::parse_str(id)
        .map(|uuid| uuid.hyphenated().to_string())
        .map_err(|e| QuizError::Unexpected(format!("invalid question id {}: {}", id, e)))
}

/// 带有规范化id的提交记录
struct Submission<'a> {
    id: QuestionId,
    answer: &'a SubmittedAnswer,
}

// 同一个id提交多次时以第一次为准
fn find_submission<'a, 'b>(submissions: &'b [Submission<'a>], id: &str) -> Option<&'a SubmittedAnswer> {
    submissions.iter().find(|s| s.id == id).map(|s| s.answer)
}

fn mark_single_answer(question: SingleAnswerQuestion, submissions: &[Submission], report: &mut QuizResultReport) {
    let user_answer = find_submission(submissions, &question.id)
        .and_then(|s| s.answer.as_single())
        .unwrap_or_default()
        .to_string();
    if user_answer == question.correct_answer {
        report.total_correct += 1;
    }
    report.total_questions += 1;
    report.single_answer_results.push(SingleAnswerResult {
        id: question.id,
        question: question.question,
        options: question.options,
        correct_answer: question.correct_answer,
        user_answer,
        explanation: question.explanation,
    });
}

fn mark_comprehension(set: ComprehensionQuestionSet, submissions: &[Submission], report: &mut QuizResultReport) {
    let user_answers = match find_submission(submissions, set.id()).and_then(|s| s.answer.as_sequence()) {
        Some(answers) if answers.len() == set.len() => answers,
        // 答案数量不一致时整组不计分
        _ => {
            log::warn!("阅读理解{}的答案数量与题目数量不一致，跳过评分", set.id());
            return;
        }
    };
    for (correct, answer) in set.correct_answers().iter().zip(user_answers) {
        if correct == answer {
            report.total_correct += 1;
        }
        report.total_questions += 1;
    }
    report.comprehension_results.push(ComprehensionResult {
        id: set.id().clone(),
        comprehension: set.comprehension().to_string(),
        questions: set.questions().iter().map(|q| q.question.clone()).collect(),
        options: set.questions().iter().map(|q| q.options.clone()).collect(),
        correct_answers: set.correct_answers().to_vec(),
        user_answers: user_answers.to_vec(),
        explanations: set.explanations().to_vec(),
    });
}

/// 根据提交的答案生成评分报告
///
/// 两类题目并发查询，库中不存在的id会被忽略。
/// 结果的顺序与查询返回的顺序一致。
pub async fn assemble<S: QuestionStore>(store: &S, submissions: &[SubmittedAnswer]) -> Result<QuizResultReport, QuizError> {
    let submissions = submissions
        .iter()
        .map(|answer| Ok(Submission { id: canonical_id(&answer.id)?, answer }))
        .collect::<Result<Vec<_>, QuizError>>()?;

    let mut seen = HashSet::new();
    let ids: Vec<QuestionId> = submissions
        .iter()
        .filter(|s| seen.insert(s.id.as_str()))
        .map(|s| s.id.clone())
        .collect();

    let mut report = QuizResultReport::default();
    if ids.is_empty() {
        return Ok(report);
    }

    let (single_answer, comprehension) =
        futures::try_join!(store.find_single_answer(&ids), store.find_comprehension(&ids))?;

    for question in single_answer {
        mark_single_answer(question, &submissions, &mut report);
    }
    for set in comprehension {
        mark_comprehension(set, &submissions, &mut report);
    }
    log::debug!("评分完成: {}/{}", report.total_correct, report.total_questions);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::request::AnswerValue;
    use crate::test_support::{comprehension, single, MemoryStore};

    const Q1: &str = "6f1d2c3b-0000-4000-8000-000000000001";
    const Q2: &str = "6f1d2c3b-0000-4000-8000-000000000002";
    const C1: &str = "6f1d2c3b-0000-4000-8000-0000000000c1";
    const C2: &str = "6f1d2c3b-0000-4000-8000-0000000000c2";

    fn store() -> MemoryStore {
        let store = MemoryStore::default();
        store.single_answer.lock().unwrap().extend([single(Q1, "math", "B"), single(Q2, "math", "a")]);
        store
            .comprehension
            .lock()
            .unwrap()
            .extend([comprehension(C1, "english", &["A", "C"]), comprehension(C2, "english", &["D"])]);
        store
    }

    fn single_answer(id: &str, answer: &str) -> SubmittedAnswer {
        SubmittedAnswer {
            id: id.to_string(),
            answer: AnswerValue::Single(answer.to_string()),
        }
    }

    fn sequence(id: &str, answers: &[&str]) -> SubmittedAnswer {
        SubmittedAnswer {
            id: id.to_string(),
            answer: AnswerValue::Sequence(answers.iter().map(|a| a.to_string()).collect()),
        }
    }

    #[tokio::test]
    async fn correct_single_answer_scores() {
        let report = assemble(&store(), &[single_answer(Q1, "B")]).await.unwrap();
        assert_eq!(report.total_correct, 1);
        assert_eq!(report.total_questions, 1);
        assert_eq!(report.single_answer_results[0].correct_answer, "B");
    }

    #[tokio::test]
    async fn wrong_single_answer_is_still_reported() {
        let report = assemble(&store(), &[single_answer(Q1, "C")]).await.unwrap();
        assert_eq!(report.total_correct, 0);
        assert_eq!(report.total_questions, 1);
        let result = &report.single_answer_results[0];
        assert_eq!(result.user_answer, "C");
        assert_eq!(result.explanation, "because B");
    }

    #[tokio::test]
    async fn single_answer_comparison_is_exact() {
        let submissions = [single_answer(Q1, "b"), single_answer(Q2, "a ")];
        let report = assemble(&store(), &submissions).await.unwrap();
        assert_eq!(report.total_correct, 0);
        assert_eq!(report.total_questions, 2);
    }

    #[tokio::test]
    async fn missing_single_answer_counts_as_empty() {
        let submissions = [
            SubmittedAnswer {
                id: Q1.to_string(),
                answer: AnswerValue::Missing,
            },
            sequence(Q2, &["a"]),
        ];
        let report = assemble(&store(), &submissions).await.unwrap();
        assert_eq!(report.total_correct, 0);
        assert_eq!(report.total_questions, 2);
        assert!(report.single_answer_results.iter().all(|r| r.user_answer.is_empty()));
    }

    #[tokio::test]
    async fn short_comprehension_submission_skips_the_set() {
        let report = assemble(&store(), &[sequence(C1, &["A"])]).await.unwrap();
        assert_eq!(report.total_questions, 0);
        assert_eq!(report.total_correct, 0);
        assert!(report.comprehension_results.is_empty());

        let report = assemble(&store(), &[sequence(C1, &["A", "C", "D"])]).await.unwrap();
        assert_eq!(report.total_questions, 0);

        // 单个字符串不能作为阅读理解的答案
        let report = assemble(&store(), &[single_answer(C2, "D")]).await.unwrap();
        assert_eq!(report.total_questions, 0);
    }

    #[tokio::test]
    async fn full_comprehension_submission_scores_each_question() {
        let report = assemble(&store(), &[sequence(C1, &["A", "D"])]).await.unwrap();
        assert_eq!(report.total_correct, 1);
        assert_eq!(report.total_questions, 2);
        let result = &report.comprehension_results[0];
        assert_eq!(result.user_answers, ["A", "D"]);
        assert_eq!(result.correct_answers, ["A", "C"]);
        assert_eq!(result.questions.len(), 2);
        assert_eq!(result.options.len(), 2);
        assert_eq!(result.explanations, ["because A", "because C"]);
    }

    #[tokio::test]
    async fn totals_cover_both_question_kinds() {
        let submissions = [
            single_answer(Q1, "B"),
            single_answer(Q2, "x"),
            sequence(C1, &["A", "C"]),
            sequence(C2, &["A", "B"]),
        ];
        let report = assemble(&store(), &submissions).await.unwrap();
        // 2道单选 + C1的2道小题，C2答案数量不符被跳过
        assert_eq!(report.total_questions, 4);
        assert_eq!(report.total_correct, 3);
        assert_eq!(report.single_answer_results.len(), 2);
        assert_eq!(report.comprehension_results.len(), 1);
    }

    #[tokio::test]
    async fn unknown_ids_are_omitted() {
        let unknown = "6f1d2c3b-0000-4000-8000-00000000ffff";
        let report = assemble(&store(), &[single_answer(unknown, "A")]).await.unwrap();
        assert_eq!(report, QuizResultReport::default());
    }

    #[tokio::test]
    async fn first_submission_wins() {
        let submissions = [single_answer(Q1, "B"), single_answer(Q1, "C")];
        let report = assemble(&store(), &submissions).await.unwrap();
        assert_eq!(report.total_questions, 1);
        assert_eq!(report.single_answer_results[0].user_answer, "B");
    }

    #[tokio::test]
    async fn ids_match_regardless_of_case() {
        let report = assemble(&store(), &[single_answer(&Q1.to_uppercase(), "B")]).await.unwrap();
        assert_eq!(report.total_correct, 1);
    }

    #[tokio::test]
    async fn malformed_id_fails_the_request() {
        let result = assemble(&store(), &[single_answer(Q1, "B"), single_answer("q1", "B")]).await;
        assert!(matches!(result, Err(QuizError::Unexpected(_))));
    }

    #[tokio::test]
    async fn store_failure_returns_no_report() {
        let store = MemoryStore {
            broken: true,
            ..MemoryStore::default()
        };
        let result = assemble(&store, &[single_answer(Q1, "B")]).await;
        assert!(matches!(result, Err(QuizError::Unexpected(_))));
    }

    #[tokio::test]
    async fn empty_submission_returns_empty_report() {
        let store = MemoryStore {
            broken: true,
            ..MemoryStore::default()
        };
        let report = assemble(&store, &[]).await.unwrap();
        assert_eq!(report.total_questions, 0);
    }
}
