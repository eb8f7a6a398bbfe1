use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::error::QuizError;
use crate::structs::question::QuizKind;
use crate::structs::respond::{ComprehensionView, QuestionView, SingleAnswerView};
use crate::structs::types::{CategoryId, QuestionId};
use crate::traits::question_store::QuestionStore;

/// 每次抽取的单选题数量
pub const SINGLE_ANSWER_SAMPLE_SIZE: usize = 15;
/// 每次抽取的阅读理解题组数量
pub const COMPREHENSION_SAMPLE_SIZE: usize = 3;

/// 按科目和年级查找分类
pub async fn resolve_category<S: QuestionStore>(store: &S, subject: &str, grade: &str) -> Result<CategoryId, QuizError> {
    if subject.is_empty() || grade.is_empty() {
        return Err(QuizError::InvalidInput("Subject and grade are required".to_string()));
    }
    store
        .find_category(subject, grade)
        .await?
        .ok_or_else(|| QuizError::NotFound("Category not found".to_string()))
}

// 不放回地随机抽取，题量不足时全部返回
fn draw(ids: Vec<QuestionId>, size: usize) -> Vec<QuestionId> {
    ids.choose_multiple(&mut thread_rng(), size).cloned().collect()
}

/// 从分类中随机抽题，单选题不包含答案和解析
///
/// `reveal_answers` 控制阅读理解题组是否附带 `correctAnswers` 和 `explanations`。
pub async fn sample_quiz<S: QuestionStore>(
    store: &S,
    category_id: &CategoryId,
    kind: QuizKind,
    reveal_answers: bool,
) -> Result<Vec<QuestionView>, QuizError> {
    let mut views: Vec<QuestionView> = match kind {
        QuizKind::SingleAnswer => {
            let ids = draw(store.single_answer_ids(category_id).await?, SINGLE_ANSWER_SAMPLE_SIZE);
            store
                .find_single_answer(&ids)
                .await?
                .into_iter()
                .map(|q| QuestionView::SingleAnswer(SingleAnswerView::from(q)))
                .collect()
        }
        QuizKind::Comprehension => {
            let ids = draw(store.comprehension_ids(category_id).await?, COMPREHENSION_SAMPLE_SIZE);
            store
                .find_comprehension(&ids)
                .await?
                .iter()
                .map(|set| QuestionView::Comprehension(ComprehensionView::new(set, reveal_answers)))
                .collect()
        }
    };
    // 查询结果按库中顺序返回，打乱后再发给客户端
    views.shuffle(&mut thread_rng());
    log::debug!("分类{}抽取了{}道题", category_id, views.len());
    Ok(views)
}
