use serde_json::Value;

use crate::error::QuizError;

/// 抽题请求 `{subject, grade}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionsRequest {
    pub subject: String,
    pub grade: String,
}

impl QuestionsRequest {
    pub fn from_value(body: &Value) -> Result<QuestionsRequest, QuizError> {
        match (text_field(&body["subject"]), text_field(&body["grade"])) {
            (Some(subject), Some(grade)) => Ok(QuestionsRequest { subject, grade }),
            _ => Err(QuizError::InvalidInput("Subject and grade are required".to_string())),
        }
    }
}

// 年级可能以数字形式提交
fn text_field(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// 用户提交的答案
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    /// 单选题答案
    Single(String),
    /// 阅读理解按顺序排列的答案
    Sequence(Vec<String>),
    Missing,
}

impl AnswerValue {
    fn from_value(value: &Value) -> AnswerValue {
        match value {
            Value::String(s) => AnswerValue::Single(s.clone()),
            // 未作答的小题保留位置，按空字符串处理
            Value::Array(items) => AnswerValue::Sequence(
                items
                    .iter()
                    .map(|item| item.as_str().unwrap_or_default().to_string())
                    .collect(),
            ),
            _ => AnswerValue::Missing,
        }
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            AnswerValue::Single(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[String]> {
        match self {
            AnswerValue::Sequence(answers) => Some(answers),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedAnswer {
    pub id: String,
    pub answer: AnswerValue,
}

impl SubmittedAnswer {
    /// 解析 `{questionAnswers: [{id, answer}]}`
    ///
    /// `questionAnswers` 不是数组时返回 `InvalidInput`，缺少字符串 `id` 的条目直接忽略。
    pub fn parse_all(body: &Value) -> Result<Vec<SubmittedAnswer>, QuizError> {
        let entries = body["questionAnswers"]
            .as_array()
            .ok_or_else(|| QuizError::InvalidInput("Invalid input format".to_string()))?;
        Ok(entries
            .iter()
            .filter_map(|entry| {
                let id = entry.get("id")?.as_str()?;
                Some(SubmittedAnswer {
                    id: id.to_string(),
                    answer: entry
                        .get("answer")
                        .map(AnswerValue::from_value)
                        .unwrap_or(AnswerValue::Missing),
                })
            })
            .collect())
    }
}
