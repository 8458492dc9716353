use syncopate::prelude::*;
use syncopate::sqlite::STORE_FILE_SUFFIX;
use tempfile::tempdir;

#[tokio::test]
async fn file_store_persists_across_reopen() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    {
        let store = Store::builder("notes")
            .directory(dir.path())
            .size_hint(5 * 1024 * 1024)
            .build()
            .await?;
        assert_eq!(store.size_hint(), Some(5 * 1024 * 1024));
        store.create_table("notes", &[("body", "TEXT")]).await?;
        store.write("notes", &Record::new().with("body", "remember")).await?;
    }
    assert!(dir.path().join(format!("notes{STORE_FILE_SUFFIX}")).exists());

    let store = Store::builder("notes").directory(dir.path()).build().await?;
    let rows = store.read("notes", None, None).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("body").and_then(Value::as_text), Some("remember"));

    let mode = store.execute("PRAGMA journal_mode").await?;
    assert_eq!(mode.scalar().and_then(Value::as_text), Some("wal"));
    Ok(())
}

#[tokio::test]
async fn schema_verbs() -> Result<(), StoreError> {
    let store = Store::builder("schema").in_memory().build().await?;
    store.create_table("people", &[("name", "TEXT")]).await?;
    // creating again is a no-op
    store.create_table("people", &[("name", "TEXT")]).await?;

    store.add_column("people", "age", "INTEGER").await?;
    store
        .write("people", &Record::new().with("name", "Ann").with("age", 7))
        .await?;

    store.create_index("people", "age").await?;
    let indexes = store
        .execute("SELECT name FROM sqlite_master WHERE type = 'index' AND name = 'people_age_index'")
        .await?;
    assert_eq!(indexes.results.len(), 1);
    store.drop_index("people", "age").await?;
    let indexes = store
        .execute("SELECT name FROM sqlite_master WHERE type = 'index' AND name = 'people_age_index'")
        .await?;
    assert!(indexes.results.is_empty());

    store.rename_table("people", "persons").await?;
    assert_eq!(store.count("persons", None).await?, 1);
    assert!(store.count("people", None).await.unwrap_err().is_engine_failure());

    store.drop_table("persons").await?;
    store.drop_table("persons").await?;
    assert!(store.read("persons", None, None).await.unwrap_err().is_engine_failure());
    Ok(())
}

#[tokio::test]
async fn invalid_options_are_rejected() {
    let err = Store::builder("").in_memory().build().await.unwrap_err();
    assert!(matches!(err, StoreError::ConfigError(_)));
    let err = Store::builder("x").primary_key(" ").in_memory().build().await.unwrap_err();
    assert!(matches!(err, StoreError::ConfigError(_)));
}
