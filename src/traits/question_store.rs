use crate::error::QuizError;
use crate::structs::question::{ComprehensionQuestionSet, SingleAnswerQuestion};
use crate::structs::types::{CategoryId, QuestionId};

/// 题库的读写接口
#[allow(async_fn_in_trait)]
pub trait QuestionStore {
    /// 按科目和年级精确查找分类
    async fn find_category(&self, subject: &str, grade: &str) -> Result<Option<CategoryId>, QuizError>;

    /// 分类不存在时创建，返回分类id
    async fn get_or_create_category(&self, subject: &str, grade: &str) -> Result<CategoryId, QuizError>;

    async fn single_answer_ids(&self, category_id: &CategoryId) -> Result<Vec<QuestionId>, QuizError>;

    async fn comprehension_ids(&self, category_id: &CategoryId) -> Result<Vec<QuestionId>, QuizError>;

    /// 按id批量查询单选题，不存在的id直接忽略
    async fn find_single_answer(&self, ids: &[QuestionId]) -> Result<Vec<SingleAnswerQuestion>, QuizError>;

    /// 按id批量查询阅读理解题组，不存在的id直接忽略
    async fn find_comprehension(&self, ids: &[QuestionId]) -> Result<Vec<ComprehensionQuestionSet>, QuizError>;

    async fn insert_single_answer(&self, question: SingleAnswerQuestion) -> Result<(), QuizError>;

    async fn insert_comprehension(&self, set: ComprehensionQuestionSet) -> Result<(), QuizError>;
}
