use serde::Serialize;

use crate::structs::question::{ComprehensionQuestionSet, Options, SingleAnswerQuestion, SubQuestion};
use crate::structs::types::QuestionId;

/// 发给答题者的单选题，不含答案和解析
#[derive(Debug, Clone, Serialize)]
pub struct SingleAnswerView {
    #[serde(rename = "_id")]
    pub id: QuestionId,
    pub question: String,
    pub options: Options,
}

impl From<SingleAnswerQuestion> for SingleAnswerView {
    fn from(q: SingleAnswerQuestion) -> Self {
        SingleAnswerView {
            id: q.id,
            question: q.question,
            options: q.options,
        }
    }
}

/// 发给答题者的阅读理解题组
#[derive(Debug, Clone, Serialize)]
pub struct ComprehensionView {
    #[serde(rename = "_id")]
    pub id: QuestionId,
    pub comprehension: String,
    pub questions: Vec<SubQuestion>,
    #[serde(rename = "correctAnswers", skip_serializing_if = "Option::is_none")]
    pub correct_answers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanations: Option<Vec<String>>,
}

impl ComprehensionView {
    pub fn new(set: &ComprehensionQuestionSet, reveal_answers: bool) -> ComprehensionView {
        ComprehensionView {
            id: set.id().clone(),
            comprehension: set.comprehension().to_string(),
            questions: set.questions().to_vec(),
            correct_answers: reveal_answers.then(|| set.correct_answers().to_vec()),
            explanations: reveal_answers.then(|| set.explanations().to_vec()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum QuestionView {
    SingleAnswer(SingleAnswerView),
    Comprehension(ComprehensionView),
}

/// 单选题的评分结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SingleAnswerResult {
    pub id: QuestionId,
    pub question: String,
    pub options: Options,
    pub correct_answer: String,
    pub user_answer: String,
    pub explanation: String,
}

/// 阅读理解题组的评分结果，各数组按小题下标对应
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComprehensionResult {
    pub id: QuestionId,
    pub comprehension: String,
    pub questions: Vec<String>,
    pub options: Vec<Options>,
    pub correct_answers: Vec<String>,
    pub user_answers: Vec<String>,
    pub explanations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuizResultReport {
    #[serde(rename = "normal_questions")]
    pub single_answer_results: Vec<SingleAnswerResult>,
    #[serde(rename = "comprehension_questions")]
    pub comprehension_results: Vec<ComprehensionResult>,
    #[serde(rename = "correct_answers")]
    pub total_correct: u32,
    pub total_questions: u32,
}

/// 导入接口的响应
#[derive(Debug, Serialize)]
pub struct ImportRespond {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imported: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
