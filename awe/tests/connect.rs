use awe::prelude::*;
use tempfile::TempDir;

// The pool slot is process-wide, so this binary holds a single test.
#[tokio::test]
async fn test_connect_from_config() {
    let missing = AweConfig::from_yaml_str("database:\n  user: www-data\n", "test").unwrap();
    assert!(matches!(
        awe::connect(&missing).await,
        Err(DataError::Configuration(_))
    ));
    assert!(matches!(pool::global(), Err(DataError::PoolNotInitialized)));

    let dir = TempDir::new().unwrap();
    let yaml = format!(
        "database:\n  driver: sqlite\n  db: {}\n  maxsize: 2\n",
        dir.path().join("app.db").display()
    );
    let config = AweConfig::from_yaml_str(&yaml, "test").unwrap();
    let db = awe::connect(&config).await.unwrap();
    assert_eq!(db.dialect(), awe::awe_data::Dialect::Sqlite);

    for schema in awe::awe_models::register_all() {
        db.execute(&schema.create_table_for(db.dialect()), &[], true).await.unwrap();
    }
    let mut user = User::with_account("e@example.com", "pw", "Eve");
    assert!(user.save(pool::global().unwrap()).await.unwrap().is_exact());
    assert_eq!(
        User::count_by(db, "count(*)", None, vec![]).await.unwrap(),
        Some(Value::Int(1))
    );

    pool::shutdown().await;
}
