#[cfg(test)]
mod tests {
    use crate::{
        reset_postgres_schema, test_pg_url,
        utils::{
            assert_row_count, assert_table_exists, get_ids, get_text_array, spawn_people_api,
        },
    };
    use connectors::sql::postgres::adapter::PgAdapter;
    use engine_config::{report::summary::RunStatus, settings::IngestSettings};
    use engine_core::{
        connectors::{destination::Destination, sink::BatchSink},
        error::SinkError,
    };
    use engine_runtime::execution::executor::run;
    use model::{
        records::{batch::Batch, range::IdRange, record::FetchedRecord},
        schema::entity::EntitySchema,
    };
    use std::{collections::HashSet, sync::Arc};
    use tokio_util::sync::CancellationToken;
    use tracing_test::traced_test;

    async fn settings(end: i64, missing: HashSet<i64>) -> IngestSettings {
        IngestSettings {
            range: IdRange::up_to(end).unwrap(),
            resource_url: spawn_people_api(missing).await,
            database_url: test_pg_url(),
            ..Default::default()
        }
    }

    async fn destination() -> Destination {
        let schema = Arc::new(EntitySchema::people());
        let adapter = PgAdapter::connect(&test_pg_url()).await.unwrap();
        let destination = Destination::new(adapter, schema);
        destination.prepare().await.unwrap();
        destination
    }

    fn found(id: i64) -> FetchedRecord {
        let schema = EntitySchema::people();
        let props = serde_json::json!({ "name": format!("Person {id}") });
        FetchedRecord::Found(schema.normalize(id, props.as_object().unwrap()))
    }

    // Scenario: 25 ids, id 17 answers 404.
    // Expected Outcome: 24 rows persisted, 17 absent, arrays stored as TEXT[].
    #[traced_test]
    #[tokio::test]
    #[ignore = "requires a local postgres"]
    async fn tc01_ingests_range_and_skips_missing() {
        reset_postgres_schema().await;

        let summary = run(settings(26, HashSet::from([17])).await, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(summary.status, RunStatus::Succeeded);
        assert_eq!(summary.missing_ids, vec![17]);
        assert_eq!(summary.metrics.batches_committed, 3);
        assert_row_count("people", 24).await;

        let ids = get_ids("people").await;
        assert!(!ids.contains(&17));
        assert_eq!(ids.first(), Some(&1));
        assert_eq!(ids.last(), Some(&25));

        assert_eq!(
            get_text_array("people", "films", 3).await,
            Some(vec!["https://example.test/api/films/1".to_string()])
        );
        assert_eq!(get_text_array("people", "species", 3).await, Some(vec![]));
        assert_eq!(get_text_array("people", "vehicles", 3).await, None);
    }

    // Scenario: the same range is ingested twice.
    // Expected Outcome: every batch of the second run fails on the primary key; no duplicates.
    #[traced_test]
    #[tokio::test]
    #[ignore = "requires a local postgres"]
    async fn tc02_second_run_is_rejected() {
        reset_postgres_schema().await;

        let first = run(settings(21, HashSet::new()).await, CancellationToken::new())
            .await
            .unwrap();
        assert!(first.is_success());

        let second = run(settings(21, HashSet::new()).await, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(second.status, RunStatus::CompletedWithFailures);
        assert_eq!(second.failed_batches.len(), 2);
        assert_eq!(second.metrics.rows_written, 0);
        assert_row_count("people", 20).await;
    }

    // Scenario: every id in [1, 6) answers 404.
    // Expected Outcome: the run succeeds, the table exists and is empty.
    #[traced_test]
    #[tokio::test]
    #[ignore = "requires a local postgres"]
    async fn tc03_all_missing_commits_nothing() {
        reset_postgres_schema().await;

        let summary = run(settings(6, (1..6).collect()).await, CancellationToken::new())
            .await
            .unwrap();

        assert!(summary.is_success());
        assert_eq!(summary.metrics.batches_committed, 1);
        assert_table_exists("people", true).await;
        assert_row_count("people", 0).await;
    }

    // Scenario: a batch repeats an id.
    // Expected Outcome: the unique violation rolls back the rows inserted before it.
    #[traced_test]
    #[tokio::test]
    #[ignore = "requires a local postgres"]
    async fn tc04_duplicate_in_batch_rolls_back() {
        reset_postgres_schema().await;
        let destination = destination().await;

        let batch = Batch::new(1, vec![found(1), found(2), found(2)]);
        let err = destination.write_batch(&batch).await.unwrap_err();

        match err {
            SinkError::Db(db) => assert!(db.is_unique_violation()),
            other => panic!("unexpected error {other:?}"),
        }
        assert_row_count("people", 0).await;
    }

    // Scenario: batch of missing and found entries written twice.
    // Expected Outcome: first write persists found rows only; second write fails.
    #[traced_test]
    #[tokio::test]
    #[ignore = "requires a local postgres"]
    async fn tc05_batch_write_is_not_repeatable() {
        reset_postgres_schema().await;
        let destination = destination().await;

        let batch = Batch::new(
            1,
            vec![found(1), FetchedRecord::Missing { id: 2 }, found(3)],
        );
        assert_eq!(destination.write_batch(&batch).await.unwrap(), 2);
        assert!(destination.write_batch(&batch).await.is_err());
        assert_eq!(get_ids("people").await, vec![1, 3]);

        let empty = Batch::new(2, vec![FetchedRecord::Missing { id: 4 }]);
        assert_eq!(destination.write_batch(&empty).await.unwrap(), 0);
        assert_row_count("people", 2).await;
    }

    // Scenario: cancellation fires before the first round.
    // Expected Outcome: nothing is fetched, the run reports Cancelled.
    #[traced_test]
    #[tokio::test]
    #[ignore = "requires a local postgres"]
    async fn tc06_cancelled_before_first_round() {
        reset_postgres_schema().await;

        let cancel = CancellationToken::new();
        cancel.cancel();
        let summary = run(settings(50, HashSet::new()).await, cancel).await.unwrap();

        assert_eq!(summary.status, RunStatus::Cancelled);
        assert_eq!(summary.metrics.records_fetched, 0);
        assert_table_exists("people", true).await;
        assert_row_count("people", 0).await;
    }

    #[test]
    fn test_rows_are_normalized_for_people() {
        let FetchedRecord::Found(row) = found(9) else {
            panic!("expected a found record");
        };
        assert_eq!(row.field_values.len(), EntitySchema::people().fields.len());
    }
}
