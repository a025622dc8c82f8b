use diesel::connection::SimpleConnection;
use pushkind_catalog::domain::category::NewCategory;
use pushkind_catalog::repository::{CategoryWriter, DieselRepository};

mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let db_path = {
        let test_db = common::TestDb::new("test_creates_and_removes_db_files.db");
        let repo = DieselRepository::new(test_db.pool());
        repo.create_category(&NewCategory::new("Tea"))
            .expect("write goes through the WAL");
        let conn = test_db.pool().get();
        assert!(conn.is_ok());
        assert!(test_db.path().exists());
        test_db.path().to_path_buf()
    };

    assert!(!db_path.exists());
    assert!(!db_path.with_extension("db-shm").exists());
    assert!(!db_path.with_extension("db-wal").exists());
}

#[test]
fn test_pooled_connections_enforce_foreign_keys() {
    let test_db = common::TestDb::new("test_pooled_connections_enforce_foreign_keys.db");
    let mut conn = test_db.pool().get().expect("connection");

    let result = conn.batch_execute(
        "INSERT INTO product_categories (product_id, category_id) \
         VALUES ('00000000-0000-0000-0000-000000000001', '00000000-0000-0000-0000-000000000002');",
    );

    assert!(result.is_err(), "dangling link should be rejected");
}
