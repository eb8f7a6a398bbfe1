use std::path::Path;

use serde::Deserialize;
use uuid::Uuid;

use crate::error::QuizError;
use crate::structs::question::{ComprehensionQuestionSet, Options, SingleAnswerQuestion, SubQuestion};
use crate::traits::question_store::QuestionStore;

pub const COMPREHENSION_SUBJECT: &str = "English";
pub const MATH_SUBJECT: &str = "Mathematics";
pub const IMPORT_GRADE: &str = "3";

#[derive(Deserialize)]
struct ComprehensionFile {
    comprehensions: Vec<ComprehensionEntry>,
}

#[derive(Deserialize)]
struct ComprehensionEntry {
    comprehension: String,
    questions: Vec<ComprehensionItem>,
}

#[derive(Deserialize)]
struct ComprehensionItem {
    question: String,
    options: Options,
    correct_answer: String,
    explanation: String,
}

#[derive(Deserialize)]
struct MathFile {
    questions: Vec<MathEntry>,
}

// 题库文件为多语言格式，只保留英文
#[derive(Deserialize)]
struct Localized {
    en: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "UPPERCASE")]
struct LocalizedOptions {
    a: Localized,
    b: Localized,
    c: Localized,
    d: Localized,
}

#[derive(Deserialize)]
struct MathEntry {
    question: Localized,
    options: LocalizedOptions,
    correct_answer: Localized,
    explanation: Localized,
}

async fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, QuizError> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        log::error!("读取文件{}时出现错误：{}", path.display(), e);
        e
    })?;
    Ok(serde_json::from_str(&contents)?)
}

/// 导入英语阅读理解题，返回导入的题组数量
///
/// 每个题组单独写入，中途失败时之前写入的题组会保留。
pub async fn import_comprehension_file<S: QuestionStore>(store: &S, path: &Path) -> Result<usize, QuizError> {
    let data: ComprehensionFile = read_json(path).await?;
    let category_id = store.get_or_create_category(COMPREHENSION_SUBJECT, IMPORT_GRADE).await?;

    let mut imported = 0;
    for entry in data.comprehensions {
        let mut questions = Vec::with_capacity(entry.questions.len());
        let mut correct_answers = Vec::with_capacity(entry.questions.len());
        let mut explanations = Vec::with_capacity(entry.questions.len());
        for item in entry.questions {
            questions.push(SubQuestion {
                question: item.question,
                options: item.options,
            });
            correct_answers.push(item.correct_answer);
            explanations.push(item.explanation);
        }
        let set = ComprehensionQuestionSet::new(
            Uuid::new_v4().to_string(),
            category_id.clone(),
            entry.comprehension,
            questions,
            correct_answers,
            explanations,
        )?;
        store.insert_comprehension(set).await?;
        imported += 1;
    }
    log::info!("从{}导入了{}组阅读理解题", path.display(), imported);
    Ok(imported)
}

/// 导入数学单选题，返回导入的题目数量
pub async fn import_math_file<S: QuestionStore>(store: &S, path: &Path) -> Result<usize, QuizError> {
    let data: MathFile = read_json(path).await?;
    let category_id = store.get_or_create_category(MATH_SUBJECT, IMPORT_GRADE).await?;

    let mut imported = 0;
    for entry in data.questions {
        let question = SingleAnswerQuestion {
            id: Uuid::new_v4().to_string(),
            category_id: category_id.clone(),
            question: entry.question.en,
            options: Options {
                a: entry.options.a.en,
                b: entry.options.b.en,
                c: entry.options.c.en,
                d: entry.options.d.en,
            },
            correct_answer: entry.correct_answer.en,
            explanation: entry.explanation.en,
        };
        store.insert_single_answer(question).await?;
        imported += 1;
    }
    log::info!("从{}导入了{}道数学题", path.display(), imported);
    Ok(imported)
}
