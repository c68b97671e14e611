use super::*;
use async_trait::async_trait;
use gsx_db::{DbError, DbResult};
use std::sync::Mutex;

/// Records executed statements and fails on the configured 1-based index
#[derive(Default)]
struct RecordingDb {
    executed: Mutex<Vec<(String, Vec<String>)>>,
    fail_at: Option<usize>,
}

impl RecordingDb {
    fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Default::default()
        }
    }

    fn executed(&self) -> Vec<String> {
        self.executed
            .lock()
            .unwrap()
            .iter()
            .map(|(sql, _)| sql.clone())
            .collect()
    }
}

#[async_trait]
impl Database for RecordingDb {
    async fn execute(&self, sql: &str, params: &[String]) -> DbResult<usize> {
        let mut executed = self.executed.lock().unwrap();
        if self.fail_at == Some(executed.len() + 1) {
            return Err(DbError::ExecutionError(format!("boom: {}", sql)));
        }
        executed.push((sql.to_string(), params.to_vec()));
        Ok(0)
    }

    async fn query_one_text(&self, _sql: &str) -> DbResult<Option<String>> {
        Ok(None)
    }

    fn db_type(&self) -> &'static str {
        "recording"
    }
}

fn sample_plan() -> MigrationPlan {
    let mut plan = MigrationPlan::from_statements(["CREATE TABLE a (id INT)", "CREATE TABLE b (id INT)"]);
    plan.append(
        "UPDATE \"git_schemalex_version\" SET version = ?",
        vec!["abc123".to_string()],
    );
    plan
}

/// Writer that rejects every write
struct BrokenWriter;

impl Write for BrokenWriter {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_preview_renders_without_executing() {
    let db = Arc::new(RecordingDb::default());
    let executor = Executor::new(db.clone(), CancellationToken::new());
    let mut out = Vec::new();

    let count = executor
        .run(&sample_plan(), ExecMode::Preview, &mut out)
        .await
        .unwrap();

    assert_eq!(count, 3);
    assert!(db.executed().is_empty());
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "CREATE TABLE a (id INT);\n\nCREATE TABLE b (id INT);\n\nUPDATE \"git_schemalex_version\" SET version = ?; -- [abc123]\n\n"
    );
}

#[tokio::test]
async fn test_preview_output_failure() {
    let executor = Executor::new(Arc::new(RecordingDb::default()), CancellationToken::new());
    let result = executor
        .run(&sample_plan(), ExecMode::Preview, &mut BrokenWriter)
        .await;
    assert!(matches!(
        result,
        Err(MigrateError::OutputFailure { index: 1, .. })
    ));
}

#[tokio::test]
async fn test_apply_executes_in_order() {
    let db = Arc::new(RecordingDb::default());
    let executor = Executor::new(db.clone(), CancellationToken::new());
    let mut out = Vec::new();

    let count = executor
        .run(&sample_plan(), ExecMode::Apply, &mut out)
        .await
        .unwrap();

    assert_eq!(count, 3);
    assert!(out.is_empty());
    assert_eq!(
        db.executed(),
        vec![
            "CREATE TABLE a (id INT)",
            "CREATE TABLE b (id INT)",
            "UPDATE \"git_schemalex_version\" SET version = ?",
        ]
    );
    let params = db.executed.lock().unwrap()[2].1.clone();
    assert_eq!(params, vec!["abc123".to_string()]);
}

#[tokio::test]
async fn test_apply_stops_at_first_failure() {
    let db = Arc::new(RecordingDb::failing_at(2));
    let executor = Executor::new(db.clone(), CancellationToken::new());

    let result = executor
        .run(&sample_plan(), ExecMode::Apply, &mut std::io::sink())
        .await;

    match result {
        Err(MigrateError::StatementFailure { index, cause }) => {
            assert_eq!(index, 2);
            assert!(cause.to_string().contains("CREATE TABLE b"));
        }
        other => panic!("expected StatementFailure, got {:?}", other),
    }
    assert_eq!(db.executed(), vec!["CREATE TABLE a (id INT)"]);
}

#[tokio::test]
async fn test_apply_checks_cancellation() {
    let db = Arc::new(RecordingDb::default());
    let cancel = CancellationToken::new();
    cancel.cancel();
    let executor = Executor::new(db.clone(), cancel);

    let result = executor
        .run(&sample_plan(), ExecMode::Apply, &mut std::io::sink())
        .await;
    assert!(matches!(result, Err(MigrateError::Cancelled)));
    assert!(db.executed().is_empty());
}

#[tokio::test]
async fn test_empty_plan() {
    let executor = Executor::new(Arc::new(RecordingDb::default()), CancellationToken::new());
    let mut out = Vec::new();
    let count = executor
        .run(&MigrationPlan::new(), ExecMode::Preview, &mut out)
        .await
        .unwrap();
    assert_eq!(count, 0);
    assert!(out.is_empty());
}
