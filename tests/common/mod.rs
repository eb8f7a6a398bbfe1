use std::sync::atomic::{AtomicU32, Ordering};

use quiz_bank_server::sql_server::{SqlServer, SqlServerHandle};
use quiz_bank_server::structs::question::{ComprehensionQuestionSet, Options, SingleAnswerQuestion, SubQuestion};

/// 在临时目录中创建数据库并启动SQL服务
pub async fn create_test_server() -> SqlServerHandle {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!("quiz_bank_test_{}_{}.db", std::process::id(), id));
    // Clean up leftover file from previous runs
    let _ = std::fs::remove_file(&path);
    let (server, handle) = SqlServer::new(path.display().to_string())
        .await
        .expect("failed to create test database");
    tokio::spawn(server.run());
    handle
}

pub fn options() -> Options {
    Options {
        a: "red".to_string(),
        b: "green".to_string(),
        c: "blue".to_string(),
        d: "yellow".to_string(),
    }
}

pub fn single_answer(category_id: &str, correct: &str) -> SingleAnswerQuestion {
    SingleAnswerQuestion {
        id: uuid::Uuid::new_v4().to_string(),
        category_id: category_id.to_string(),
        question: "Which colour is the sky?".to_string(),
        options: options(),
        correct_answer: correct.to_string(),
        explanation: "Rayleigh scattering".to_string(),
    }
}

pub fn comprehension(category_id: &str, correct: &[&str]) -> ComprehensionQuestionSet {
    ComprehensionQuestionSet::new(
        uuid::Uuid::new_v4().to_string(),
        category_id.to_string(),
        "The quick brown fox jumps over the lazy dog.".to_string(),
        correct
            .iter()
            .enumerate()
            .map(|(i, _)| SubQuestion {
                question: format!("Question {}", i + 1),
                options: options(),
            })
            .collect(),
        correct.iter().map(|c| c.to_string()).collect(),
        correct.iter().map(|c| format!("The answer is {}", c)).collect(),
    )
    .expect("aligned comprehension")
}
