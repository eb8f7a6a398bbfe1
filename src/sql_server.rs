use tokio::sync::{mpsc, oneshot};
use sqlx::{pool::Pool, sqlite::{Sqlite, SqlitePoolOptions}};
use std::io;
use std::path::Path;
use uuid::Uuid;

use crate::error::QuizError;
use crate::structs::question::{ComprehensionQuestionSet, Options, SingleAnswerQuestion, SubQuestion};
use crate::structs::types::{CategoryId, QuestionId, SqlFile};
use crate::traits::question_store::QuestionStore;

type Reply<T> = oneshot::Sender<Result<T, QuizError>>;

#[derive(Debug)]
enum Command {
    FindCategory {
        subject: String,
        grade: String,
        res_tx: Reply<Option<CategoryId>>,
    },
    GetOrCreateCategory {
        subject: String,
        grade: String,
        res_tx: Reply<CategoryId>,
    },
    SingleAnswerIds {
        category_id: CategoryId,
        res_tx: Reply<Vec<QuestionId>>,
    },
    ComprehensionIds {
        category_id: CategoryId,
        res_tx: Reply<Vec<QuestionId>>,
    },
    FindSingleAnswer {
        ids: Vec<QuestionId>,
        res_tx: Reply<Vec<SingleAnswerQuestion>>,
    },
    FindComprehension {
        ids: Vec<QuestionId>,
        res_tx: Reply<Vec<ComprehensionQuestionSet>>,
    },
    InsertSingleAnswer {
        question: SingleAnswerQuestion,
        res_tx: Reply<()>,
    },
    InsertComprehension {
        set: ComprehensionQuestionSet,
        res_tx: Reply<()>,
    },
}

pub struct SqlServer {
    // sql连接池
    pool: Pool<Sqlite>,

    /// 接收命令的管道
    cmd_rx: mpsc::UnboundedReceiver<Command>,
}

#[derive(sqlx::FromRow)]
struct SingleAnswerRow {
    id: String,
    category_id: String,
    question: String,
    option_a: String,
    option_b: String,
    option_c: String,
    option_d: String,
    correct_answer: String,
    explanation: String,
}

impl From<SingleAnswerRow> for SingleAnswerQuestion {
    fn from(row: SingleAnswerRow) -> Self {
        SingleAnswerQuestion {
            id: row.id,
            category_id: row.category_id,
            question: row.question,
            options: Options {
                a: row.option_a,
                b: row.option_b,
                c: row.option_c,
                d: row.option_d,
            },
            correct_answer: row.correct_answer,
            explanation: row.explanation,
        }
    }
}

// 小题、答案、解析以JSON数组的形式存放
#[derive(sqlx::FromRow)]
struct ComprehensionRow {
    id: String,
    category_id: String,
    comprehension: String,
    questions: String,
    correct_answers: String,
    explanations: String,
}

impl TryFrom<ComprehensionRow> for ComprehensionQuestionSet {
    type Error = QuizError;

    fn try_from(row: ComprehensionRow) -> Result<Self, Self::Error> {
        let questions: Vec<SubQuestion> = serde_json::from_str(&row.questions)?;
        let correct_answers: Vec<String> = serde_json::from_str(&row.correct_answers)?;
        let explanations: Vec<String> = serde_json::from_str(&row.explanations)?;
        ComprehensionQuestionSet::new(
            row.id,
            row.category_id,
            row.comprehension,
            questions,
            correct_answers,
            explanations,
        )
        // 库中数据损坏属于服务端错误
        .map_err(|e| QuizError::Unexpected(e.to_string()))
    }
}

const SCHEMA: [&str; 5] = [
    "CREATE TABLE IF NOT EXISTS category (
        id       TEXT PRIMARY KEY,
        subject  TEXT NOT NULL,
        grade    TEXT NOT NULL,
        UNIQUE (subject, grade)
    )",
    "CREATE TABLE IF NOT EXISTS single_answer_question (
        id              TEXT PRIMARY KEY,
        category_id     TEXT NOT NULL,
        question        TEXT NOT NULL,
        option_a        TEXT NOT NULL,
        option_b        TEXT NOT NULL,
        option_c        TEXT NOT NULL,
        option_d        TEXT NOT NULL,
        correct_answer  TEXT NOT NULL,
        explanation     TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_single_answer_category ON single_answer_question (category_id)",
    "CREATE TABLE IF NOT EXISTS comprehension_question (
        id               TEXT PRIMARY KEY,
        category_id      TEXT NOT NULL,
        comprehension    TEXT NOT NULL,
        questions        TEXT NOT NULL,
        correct_answers  TEXT NOT NULL,
        explanations     TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_comprehension_category ON comprehension_question (category_id)",
];

// 生成 `?, ?, ?` 形式的占位符
fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// 命令执行层
impl SqlServer {
    pub async fn new(sql_file: SqlFile) -> Result<(SqlServer, SqlServerHandle), QuizError> {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        // 检测数据库文件是否存在，不存在则新建
        if !Path::new(sql_file.as_str()).exists() {
            log::info!("数据库文件不存在，创建数据库文件: {}", sql_file.as_str());
            let file = std::fs::File::create(sql_file.as_str()).map_err(|e| {
                log::error!("创建数据库文件失败: {:?}", e);
                e
            })?;
            file.sync_all().map_err(|e| {
                log::error!("同步数据库文件失败: {:?}", e);
                e
            })?;
        }
        // 创建一个连接池
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(format!("sqlite://{}", sql_file).as_str())
            .await
            .map_err(|e| {
                log::error!("创建SQL连接池失败: {:?}", e);
                e
            })?;

        // 执行创建表的 SQL 语句
        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await.map_err(|e| {
                log::error!("执行创建表命令失败: {:?}", e);
                e
            })?;
        }

        Ok((
            SqlServer {
                pool,
                cmd_rx,
            },
            SqlServerHandle {
                cmd_tx,
            },
        ))
    }

    async fn find_category(pool: &Pool<Sqlite>, subject: String, grade: String) -> Result<Option<CategoryId>, QuizError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT id FROM category WHERE subject = ? AND grade = ?")
            .bind(subject)
            .bind(grade)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|row| row.0))
    }

    /// 依靠 (subject, grade) 唯一约束避免并发导入时重复创建分类
    async fn get_or_create_category(pool: &Pool<Sqlite>, subject: String, grade: String) -> Result<CategoryId, QuizError> {
        let inserted = sqlx::query("INSERT INTO category (id, subject, grade) VALUES (?, ?, ?) ON CONFLICT (subject, grade) DO NOTHING")
            .bind(Uuid::new_v4().to_string())
            .bind(&subject)
            .bind(&grade)
            .execute(pool)
            .await?;
        if inserted.rows_affected() > 0 {
            log::info!("新建分类: {} {}", subject, grade);
        }
        let row: (String,) = sqlx::query_as("SELECT id FROM category WHERE subject = ? AND grade = ?")
            .bind(subject)
            .bind(grade)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    async fn question_ids(pool: &Pool<Sqlite>, table: &str, category_id: CategoryId) -> Result<Vec<QuestionId>, QuizError> {
        let rows: Vec<(String,)> = sqlx::query_as(&format!("SELECT id FROM {} WHERE category_id = ?", table))
            .bind(category_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|row| row.0).collect())
    }

    async fn find_single_answer(pool: &Pool<Sqlite>, ids: Vec<QuestionId>) -> Result<Vec<SingleAnswerQuestion>, QuizError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT id, category_id, question, option_a, option_b, option_c, option_d, correct_answer, explanation
             FROM single_answer_question WHERE id IN ({})",
            placeholders(ids.len())
        );
        let mut query = sqlx::query_as::<_, SingleAnswerRow>(&sql);
        // 先绑定参数后查询
        for id in ids {
            query = query.bind(id);
        }
        let rows = query.fetch_all(pool).await?;
        Ok(rows.into_iter().map(SingleAnswerQuestion::from).collect())
    }

    async fn find_comprehension(pool: &Pool<Sqlite>, ids: Vec<QuestionId>) -> Result<Vec<ComprehensionQuestionSet>, QuizError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT id, category_id, comprehension, questions, correct_answers, explanations
             FROM comprehension_question WHERE id IN ({})",
            placeholders(ids.len())
        );
        let mut query = sqlx::query_as::<_, ComprehensionRow>(&sql);
        for id in ids {
            query = query.bind(id);
        }
        let rows = query.fetch_all(pool).await?;
        rows.into_iter().map(ComprehensionQuestionSet::try_from).collect()
    }

    async fn insert_single_answer(pool: &Pool<Sqlite>, question: SingleAnswerQuestion) -> Result<(), QuizError> {
        sqlx::query(
            "INSERT INTO single_answer_question
             (id, category_id, question, option_a, option_b, option_c, option_d, correct_answer, explanation)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(question.id)
        .bind(question.category_id)
        .bind(question.question)
        .bind(question.options.a)
        .bind(question.options.b)
        .bind(question.options.c)
        .bind(question.options.d)
        .bind(question.correct_answer)
        .bind(question.explanation)
        .execute(pool)
        .await?;
        Ok(())
    }

    async fn insert_comprehension(pool: &Pool<Sqlite>, set: ComprehensionQuestionSet) -> Result<(), QuizError> {
        sqlx::query(
            "INSERT INTO comprehension_question
             (id, category_id, comprehension, questions, correct_answers, explanations)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(set.id())
        .bind(set.category_id())
        .bind(set.comprehension())
        .bind(serde_json::to_string(set.questions())?)
        .bind(serde_json::to_string(set.correct_answers())?)
        .bind(serde_json::to_string(set.explanations())?)
        .execute(pool)
        .await?;
        Ok(())
    }

    async fn dispatch(pool: Pool<Sqlite>, cmd: Command) {
        match cmd {
            Command::FindCategory { subject, grade, res_tx } => {
                let _ = res_tx.send(Self::find_category(&pool, subject, grade).await);
            }
            Command::GetOrCreateCategory { subject, grade, res_tx } => {
                let _ = res_tx.send(Self::get_or_create_category(&pool, subject, grade).await);
            }
            Command::SingleAnswerIds { category_id, res_tx } => {
                let _ = res_tx.send(Self::question_ids(&pool, "single_answer_question", category_id).await);
            }
            Command::ComprehensionIds { category_id, res_tx } => {
                let _ = res_tx.send(Self::question_ids(&pool, "comprehension_question", category_id).await);
            }
            Command::FindSingleAnswer { ids, res_tx } => {
                let _ = res_tx.send(Self::find_single_answer(&pool, ids).await);
            }
            Command::FindComprehension { ids, res_tx } => {
                let _ = res_tx.send(Self::find_comprehension(&pool, ids).await);
            }
            Command::InsertSingleAnswer { question, res_tx } => {
                let _ = res_tx.send(Self::insert_single_answer(&pool, question).await);
            }
            Command::InsertComprehension { set, res_tx } => {
                let _ = res_tx.send(Self::insert_comprehension(&pool, set).await);
            }
        }
    }

    /// 每条命令在独立的任务中执行，同一请求内的多个查询可以并发
    pub async fn run(mut self) -> io::Result<()> {
        while let Some(cmd) = self.cmd_rx.recv().await {
            let pool = self.pool.clone();
            tokio::spawn(Self::dispatch(pool, cmd));
        }
        log::info!("SQL服务已停止");
        Ok(())
    }
}

/// handler层
#[derive(Debug, Clone)]
pub struct SqlServerHandle {
    cmd_tx: mpsc::UnboundedSender<Command>,
}

impl SqlServerHandle {
    async fn request<T>(&self, command: impl FnOnce(Reply<T>) -> Command) -> Result<T, QuizError> {
        let (res_tx, res_rx) = oneshot::channel();
        self.cmd_tx
            .send(command(res_tx))
            .map_err(|_| QuizError::Unexpected("SQL服务未运行".to_string()))?;
        res_rx
            .await
            .map_err(|_| QuizError::Unexpected("SQL服务未返回结果".to_string()))?
    }
}

impl QuestionStore for SqlServerHandle {
    async fn find_category(&self, subject: &str, grade: &str) -> Result<Option<CategoryId>, QuizError> {
        let (subject, grade) = (subject.to_string(), grade.to_string());
        self.request(|res_tx| Command::FindCategory { subject, grade, res_tx }).await
    }

    async fn get_or_create_category(&self, subject: &str, grade: &str) -> Result<CategoryId, QuizError> {
        let (subject, grade) = (subject.to_string(), grade.to_string());
        self.request(|res_tx| Command::GetOrCreateCategory { subject, grade, res_tx }).await
    }

    async fn single_answer_ids(&self, category_id: &CategoryId) -> Result<Vec<QuestionId>, QuizError> {
        let category_id = category_id.clone();
        self.request(|res_tx| Command::SingleAnswerIds { category_id, res_tx }).await
    }

    async fn comprehension_ids(&self, category_id: &CategoryId) -> Result<Vec<QuestionId>, QuizError> {
        let category_id = category_id.clone();
        self.request(|res_tx| Command::ComprehensionIds { category_id, res_tx }).await
    }

    async fn find_single_answer(&self, ids: &[QuestionId]) -> Result<Vec<SingleAnswerQuestion>, QuizError> {
        let ids = ids.to_vec();
        self.request(|res_tx| Command::FindSingleAnswer { ids, res_tx }).await
    }

    async fn find_comprehension(&self, ids: &[QuestionId]) -> Result<Vec<ComprehensionQuestionSet>, QuizError> {
        let ids = ids.to_vec();
        self.request(|res_tx| Command::FindComprehension { ids, res_tx }).await
    }

    async fn insert_single_answer(&self, question: SingleAnswerQuestion) -> Result<(), QuizError> {
        self.request(|res_tx| Command::InsertSingleAnswer { question, res_tx }).await
    }

    async fn insert_comprehension(&self, set: ComprehensionQuestionSet) -> Result<(), QuizError> {
        self.request(|res_tx| Command::InsertComprehension { set, res_tx }).await
    }
}
