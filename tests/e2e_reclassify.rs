use rusqlite::{params, Connection};
use tempfile::TempDir;

mod common;

fn ids(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT json_extract(doc, '$.id') FROM {table} ORDER BY row_id"
        ))
        .expect("prepare");
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .expect("query")
        .collect::<Result<Vec<_>, _>>()
        .expect("rows");
    rows
}

#[test]
fn e2e_reclassify_moves_misfiled_contact() {
    let data_dir = TempDir::new().expect("temp dir");

    // First run creates the schema on an empty database.
    let output = common::base_cmd(&data_dir)
        .arg("reclassify")
        .arg("--dry-run")
        .output()
        .expect("run reclassify --dry-run");
    assert!(output.status.success(), "{:?}", output);

    let conn = Connection::open(common::database_path(&data_dir)).expect("open db");
    conn.execute(
        "INSERT INTO quotes (doc) VALUES (?1)",
        params![r#"{"id":"quote-1","name":"John Doe","email":"john@example.com","whatsapp":"+234 801 234 5678","product":"LED Trucks","quantity":"50 units","status":"pending"}"#],
    )
    .expect("seed quote");
    conn.execute(
        "INSERT INTO quotes (doc) VALUES (?1)",
        params![r#"{"id":"contact-1","name":"Test User","email":"test@example.com","message":"A message that was filed in the wrong place."}"#],
    )
    .expect("seed misfiled contact");

    let output = common::base_cmd(&data_dir)
        .arg("reclassify")
        .arg("--dry-run")
        .output()
        .expect("run reclassify --dry-run");
    assert!(output.status.success(), "{:?}", output);
    assert_eq!(ids(&conn, "quotes"), vec!["quote-1", "contact-1"]);

    let output = common::base_cmd(&data_dir)
        .arg("reclassify")
        .output()
        .expect("run reclassify");
    assert!(output.status.success(), "{:?}", output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("contact-1"), "{stderr}");

    assert_eq!(ids(&conn, "quotes"), vec!["quote-1"]);
    assert_eq!(ids(&conn, "contact_messages"), vec!["contact-1"]);
}

#[test]
fn e2e_rejects_unsupported_database_url() {
    let data_dir = TempDir::new().expect("temp dir");
    let output = common::env_cmd(&data_dir)
        .arg("--database-url")
        .arg("mongodb://localhost:27017")
        .arg("reclassify")
        .output()
        .expect("run with mongodb url");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported database url scheme"), "{stderr}");
}
