use crate::errors::Error;
use diesel::sql_query;
use diesel::sqlite::SqliteConnection;
use diesel::RunQueryDsl;

/// Idempotent table creation, run once at startup. There is no migration
/// history to track; every statement is `IF NOT EXISTS`.
const CREATE_TABLE_STATEMENTS: [&str; 11] = [
    "CREATE TABLE IF NOT EXISTS generation_tasks (
        id TEXT PRIMARY KEY NOT NULL,
        kind TEXT NOT NULL,
        parent_ref TEXT NOT NULL,
        status TEXT NOT NULL,
        progress INTEGER NOT NULL,
        result_ref TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS documents (
        id TEXT PRIMARY KEY NOT NULL,
        project_id TEXT NOT NULL,
        doc_type TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS source_codes (
        id TEXT PRIMARY KEY NOT NULL,
        project_id TEXT NOT NULL,
        file_name TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS quality_checks (
        id TEXT PRIMARY KEY NOT NULL,
        project_id TEXT NOT NULL,
        check_type TEXT NOT NULL,
        result TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS work_estimates (
        id TEXT PRIMARY KEY NOT NULL,
        project_id TEXT NOT NULL,
        estimate TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS proposals (
        id TEXT PRIMARY KEY NOT NULL,
        project_id TEXT NOT NULL,
        user_id TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS progress_reports (
        id TEXT PRIMARY KEY NOT NULL,
        project_id TEXT NOT NULL,
        report TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS projects (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS uploaded_files (
        id TEXT PRIMARY KEY NOT NULL,
        project_id TEXT NOT NULL,
        file_name TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS templates (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS sessions (
        token TEXT PRIMARY KEY NOT NULL,
        user_id TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
];

pub fn create_tables(conn: &mut SqliteConnection) -> Result<(), Error> {
    for statement in CREATE_TABLE_STATEMENTS {
        sql_query(statement).execute(conn)?;
    }
    Ok(())
}
