use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::config::QuizConfig;
use crate::error::QuizError;
use crate::result_assembler::assemble;
use crate::sampler::{resolve_category, sample_quiz};
use crate::sql_server::SqlServerHandle;
use crate::structs::question::QuizKind;
use crate::structs::request::{QuestionsRequest, SubmittedAnswer};

// 按科目和年级随机抽题
pub(crate) async fn questions(
    req_body: web::Json<Value>,
    sql_server: web::Data<SqlServerHandle>,
    quiz_config: web::Data<QuizConfig>,
) -> Result<HttpResponse, QuizError> {
    let request = QuestionsRequest::from_value(&req_body)?;
    let category_id = resolve_category(sql_server.get_ref(), &request.subject, &request.grade).await?;
    let kind = QuizKind::for_subject(&request.subject);
    let questions = sample_quiz(
        sql_server.get_ref(),
        &category_id,
        kind,
        quiz_config.reveal_comprehension_answers,
    )
    .await?;
    Ok(HttpResponse::Ok().json(questions))
}

// 提交答案并进行打分
pub(crate) async fn fetch_quiz_results(
    req_body: web::Json<Value>,
    sql_server: web::Data<SqlServerHandle>,
) -> Result<HttpResponse, QuizError> {
    let submissions = SubmittedAnswer::parse_all(&req_body)?;
    let report = assemble(sql_server.get_ref(), &submissions).await?;
    Ok(HttpResponse::Ok().json(report))
}
