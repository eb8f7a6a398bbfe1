use actix_web::{web, HttpResponse};

use crate::config::ImportConfig;
use crate::error::QuizError;
use crate::importer::{import_comprehension_file, import_math_file};
use crate::sql_server::SqlServerHandle;
use crate::structs::respond::ImportRespond;

// 导入接口沿用 {message, error} 的响应格式
fn import_respond(result: Result<usize, QuizError>, success: &str, failure: &str) -> HttpResponse {
    match result {
        Ok(imported) => HttpResponse::Ok().json(ImportRespond {
            message: success.to_string(),
            imported: Some(imported),
            error: None,
        }),
        Err(e) => {
            log::error!("{}: {}", failure, e);
            HttpResponse::InternalServerError().json(ImportRespond {
                message: failure.to_string(),
                imported: None,
                error: Some(e.to_string()),
            })
        }
    }
}

pub(crate) async fn import_json(
    sql_server: web::Data<SqlServerHandle>,
    import_config: web::Data<ImportConfig>,
) -> HttpResponse {
    let result = import_comprehension_file(sql_server.get_ref(), &import_config.comprehension_file).await;
    import_respond(result, "Data imported successfully!", "Error importing data")
}

pub(crate) async fn import_math_questions(
    sql_server: web::Data<SqlServerHandle>,
    import_config: web::Data<ImportConfig>,
) -> HttpResponse {
    let result = import_math_file(sql_server.get_ref(), &import_config.math_file).await;
    import_respond(result, "Math questions imported successfully!", "Error importing questions")
}
