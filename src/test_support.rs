use std::sync::Mutex;

use crate::error::QuizError;
use crate::structs::question::{ComprehensionQuestionSet, Options, SingleAnswerQuestion, SubQuestion};
use crate::structs::types::{CategoryId, QuestionId};
use crate::traits::question_store::QuestionStore;

/// 单元测试用的内存题库
#[derive(Default)]
pub struct MemoryStore {
    pub categories: Mutex<Vec<(CategoryId, String, String)>>,
    pub single_answer: Mutex<Vec<SingleAnswerQuestion>>,
    pub comprehension: Mutex<Vec<ComprehensionQuestionSet>>,
    /// 为true时所有查询返回错误
    pub broken: bool,
}

impl MemoryStore {
    fn check(&self) -> Result<(), QuizError> {
        if self.broken {
            Err(QuizError::Unexpected("store unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

pub fn options() -> Options {
    Options {
        a: "apple".into(),
        b: "banana".into(),
        c: "cherry".into(),
        d: "durian".into(),
    }
}

pub fn single(id: &str, category_id: &str, correct: &str) -> SingleAnswerQuestion {
    SingleAnswerQuestion {
        id: id.to_string(),
        category_id: category_id.to_string(),
        question: format!("question {}", id),
        options: options(),
        correct_answer: correct.to_string(),
        explanation: format!("because {}", correct),
    }
}

pub fn comprehension(id: &str, category_id: &str, correct: &[&str]) -> ComprehensionQuestionSet {
    ComprehensionQuestionSet::new(
        id.to_string(),
        category_id.to_string(),
        format!("passage {}", id),
        correct
            .iter()
            .enumerate()
            .map(|(i, _)| SubQuestion {
                question: format!("sub question {}", i),
                options: options(),
            })
            .collect(),
        correct.iter().map(|c| c.to_string()).collect(),
        correct.iter().map(|c| format!("because {}", c)).collect(),
    )
    .unwrap()
}

impl QuestionStore for MemoryStore {
    async fn find_category(&self, subject: &str, grade: &str) -> Result<Option<CategoryId>, QuizError> {
        self.check()?;
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|(_, s, g)| s == subject && g == grade)
            .map(|(id, _, _)| id.clone()))
    }

    async fn get_or_create_category(&self, subject: &str, grade: &str) -> Result<CategoryId, QuizError> {
        if let Some(id) = self.find_category(subject, grade).await? {
            return Ok(id);
        }
        let mut categories = self.categories.lock().unwrap();
        let id = format!("category-{}", categories.len());
        categories.push((id.clone(), subject.to_string(), grade.to_string()));
        Ok(id)
    }

    async fn single_answer_ids(&self, category_id: &CategoryId) -> Result<Vec<QuestionId>, QuizError> {
        self.check()?;
        Ok(self
            .single_answer
            .lock()
            .unwrap()
            .iter()
            .filter(|q| &q.category_id == category_id)
            .map(|q| q.id.clone())
            .collect())
    }

    async fn comprehension_ids(&self, category_id: &CategoryId) -> Result<Vec<QuestionId>, QuizError> {
        self.check()?;
        Ok(self
            .comprehension
            .lock()
            .unwrap()
            .iter()
            .filter(|set| set.category_id() == category_id)
            .map(|set| set.id().clone())
            .collect())
    }

    async fn find_single_answer(&self, ids: &[QuestionId]) -> Result<Vec<SingleAnswerQuestion>, QuizError> {
        self.check()?;
        Ok(self
            .single_answer
            .lock()
            .unwrap()
            .iter()
            .filter(|q| ids.contains(&q.id))
            .cloned()
            .collect())
    }

    async fn find_comprehension(&self, ids: &[QuestionId]) -> Result<Vec<ComprehensionQuestionSet>, QuizError> {
        self.check()?;
        Ok(self
            .comprehension
            .lock()
            .unwrap()
            .iter()
            .filter(|set| ids.contains(set.id()))
            .cloned()
            .collect())
    }

    async fn insert_single_answer(&self, question: SingleAnswerQuestion) -> Result<(), QuizError> {
        self.check()?;
        self.single_answer.lock().unwrap().push(question);
        Ok(())
    }

    async fn insert_comprehension(&self, set: ComprehensionQuestionSet) -> Result<(), QuizError> {
        self.check()?;
        self.comprehension.lock().unwrap().push(set);
        Ok(())
    }
}
