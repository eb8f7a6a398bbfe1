use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::structs::types::{CategoryId, QuestionId};

/// 四个选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct Options {
    pub a: String,
    pub b: String,
    pub c: String,
    pub d: String,
}

/// 单选题
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleAnswerQuestion {
    pub id: QuestionId,
    pub category_id: CategoryId,
    pub question: String,
    pub options: Options,
    pub correct_answer: String,
    pub explanation: String,
}

/// 阅读理解中的一道小题，没有独立的id，只能通过下标对应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubQuestion {
    pub question: String,
    pub options: Options,
}

/// 阅读理解题组
///
/// `questions`、`correct_answers`、`explanations` 三者按下标一一对应，
/// 构造时检查长度一致，之后不可修改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComprehensionQuestionSet {
    id: QuestionId,
    category_id: CategoryId,
    comprehension: String,
    questions: Vec<SubQuestion>,
    correct_answers: Vec<String>,
    explanations: Vec<String>,
}

impl ComprehensionQuestionSet {
    pub fn new(
        id: QuestionId,
        category_id: CategoryId,
        comprehension: String,
        questions: Vec<SubQuestion>,
        correct_answers: Vec<String>,
        explanations: Vec<String>,
    ) -> Result<Self, QuizError> {
        if questions.len() != correct_answers.len() || questions.len() != explanations.len() {
            return Err(QuizError::InvalidInput(format!(
                "comprehension {} has {} questions, {} correct answers and {} explanations",
                id,
                questions.len(),
                correct_answers.len(),
                explanations.len()
            )));
        }
        Ok(ComprehensionQuestionSet {
            id,
            category_id,
            comprehension,
            questions,
            correct_answers,
            explanations,
        })
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    pub fn comprehension(&self) -> &str {
        &self.comprehension
    }

    pub fn questions(&self) -> &[SubQuestion] {
        &self.questions
    }

    pub fn correct_answers(&self) -> &[String] {
        &self.correct_answers
    }

    pub fn explanations(&self) -> &[String] {
        &self.explanations
    }

    /// 小题数量
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// 抽题时使用的题型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizKind {
    SingleAnswer,
    Comprehension,
}

impl QuizKind {
    // 英语科目固定使用阅读理解题，其余科目使用单选题
    pub fn for_subject(subject: &str) -> QuizKind {
        if subject.eq_ignore_ascii_case("english") {
            QuizKind::Comprehension
        } else {
            QuizKind::SingleAnswer
        }
    }
}
