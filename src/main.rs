use std::io;
use std::path::PathBuf;

use actix_web::{middleware::Logger, web, App, HttpServer};

use quiz_bank_server::config::Config;
use quiz_bank_server::service;
use quiz_bank_server::sql_server::SqlServer;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = PathBuf::from(std::env::var("QUIZ_CONFIG").unwrap_or_else(|_| "config.toml".to_string()));
    let config = Config::load(&config_path).map_err(|e| {
        log::error!("{}", e);
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;

    let (sql_server, sql_server_handle) = SqlServer::new(config.database.file.clone()).await.map_err(|e| {
        log::error!("读取数据库失败: {}", e);
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;
    tokio::spawn(sql_server.run());

    let sql_server_handle = web::Data::new(sql_server_handle);
    let quiz_config = web::Data::new(config.quiz.clone());
    let import_config = web::Data::new(config.import.clone());
    let cors_config = config.cors.clone();

    log::info!("HTTP服务监听于 {}:{}", config.server.host, config.server.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors_config.build())
            .app_data(sql_server_handle.clone())
            .app_data(quiz_config.clone())
            .app_data(import_config.clone())
            .configure(service::configure)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
