use actix_web::web;

use crate::error::QuizError;

mod import;
mod quiz;

/// 注册所有路由
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        // 请求体不是合法JSON时同样返回 {error}
        web::JsonConfig::default().error_handler(|err, _req| QuizError::InvalidInput(err.to_string()).into()),
    )
    .route("/questions", web::post().to(quiz::questions))
    .route("/fetch_quiz_results", web::post().to(quiz::fetch_quiz_results))
    .route("/import-json", web::post().to(import::import_json))
    .route("/import-math-questions", web::post().to(import::import_math_questions));
}
