use crate::pg_client;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde_json::json;
use std::{collections::HashSet, sync::Arc};

/// Serves `/api/people/{id}` on a loopback port; ids in `missing` answer 404.
///
/// Returns the resource base URL.
pub async fn spawn_people_api(missing: HashSet<i64>) -> String {
    async fn person(
        State(missing): State<Arc<HashSet<i64>>>,
        Path(id): Path<i64>,
    ) -> (StatusCode, String) {
        if missing.contains(&id) {
            return (
                StatusCode::NOT_FOUND,
                json!({ "message": "not found" }).to_string(),
            );
        }

        let body = json!({
            "message": "ok",
            "result": {
                "uid": id.to_string(),
                "properties": {
                    "name": format!("Person {id}"),
                    "height": "172",
                    "mass": "unknown",
                    "birth_year": "19BBY",
                    "films": ["https://example.test/api/films/1"],
                    "species": "",
                    "homeworld": "https://example.test/api/planets/1"
                }
            }
        });
        (StatusCode::OK, body.to_string())
    }

    let app = Router::new()
        .route("/api/people/{id}", get(person))
        .with_state(Arc::new(missing));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve people api");
    });

    format!("http://{addr}/api/people")
}

pub async fn get_row_count(table: &str) -> i64 {
    pg_client()
        .await
        .query_one(&format!("SELECT COUNT(*) FROM \"{table}\""), &[])
        .await
        .expect("count rows")
        .get(0)
}

pub async fn assert_row_count(table: &str, expected: i64) {
    assert_eq!(get_row_count(table).await, expected, "row count of {table}");
}

pub async fn assert_table_exists(table: &str, exists: bool) {
    let found: bool = pg_client()
        .await
        .query_one(
            "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_schema = 'public' AND table_name = $1)",
            &[&table],
        )
        .await
        .expect("query information_schema")
        .get(0);
    assert_eq!(found, exists, "table {table} existence");
}

pub async fn get_ids(table: &str) -> Vec<i64> {
    pg_client()
        .await
        .query(&format!("SELECT id FROM \"{table}\" ORDER BY id"), &[])
        .await
        .expect("select ids")
        .iter()
        .map(|row| row.get(0))
        .collect()
}

pub async fn get_text_array(table: &str, column: &str, id: i64) -> Option<Vec<String>> {
    pg_client()
        .await
        .query_one(
            &format!("SELECT \"{column}\" FROM \"{table}\" WHERE id = $1"),
            &[&id],
        )
        .await
        .expect("select array column")
        .get(0)
}
