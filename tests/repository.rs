use pushkind_catalog::domain::category::{CategoryListQuery, NewCategory, UpdateCategory};
use pushkind_catalog::domain::product::{NewProduct, ProductListQuery, UpdateProduct};
use pushkind_catalog::repository::{
    CategoryReader, CategoryWriter, DieselRepository, ProductReader, ProductWriter,
    RepositoryError,
};
use uuid::Uuid;

mod common;

#[test]
fn test_category_repository_crud() {
    let test_db = common::TestDb::new("test_category_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let tea = repo
        .create_category(&NewCategory::new("Tea").with_description("Loose leaf"))
        .unwrap();
    let coffee = repo.create_category(&NewCategory::new("Coffee")).unwrap();

    let (total, items) = repo.list_categories(CategoryListQuery::new()).unwrap();
    assert_eq!(total, 2);
    let names: Vec<_> = items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Coffee", "Tea"]);

    let (total, items) = repo
        .list_categories(CategoryListQuery::new().search("leaf"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, tea.id);

    let (total, items) = repo
        .list_categories(CategoryListQuery::new().paginate(1, 1))
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Tea");

    let updated = repo
        .update_category(tea.id, &UpdateCategory::new("Green tea", None))
        .unwrap();
    assert_eq!(updated.name, "Green tea");
    assert_eq!(updated.description, None);

    let err = repo
        .update_category(Uuid::new_v4(), &UpdateCategory::new("Ghost", None))
        .expect_err("expected update of unknown category to fail");
    assert!(matches!(err, RepositoryError::NotFound));

    let err = repo
        .delete_category(Uuid::new_v4())
        .expect_err("expected delete of unknown category to fail");
    assert!(matches!(err, RepositoryError::NotFound));

    repo.delete_category(coffee.id).unwrap();
    assert!(repo.get_category_by_id(coffee.id).unwrap().is_none());
    assert_eq!(
        repo.get_category_by_id(tea.id).unwrap().map(|c| c.name),
        Some("Green tea".to_string())
    );
}

#[test]
fn test_product_repository_crud() {
    let test_db = common::TestDb::new("test_product_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let new_product = NewProduct::new("Espresso beans")
        .with_sku("ESP-1")
        .with_description("Dark roast");
    let created = repo.create_product_with_categories(&new_product).unwrap();
    assert_eq!(created.id, new_product.id);
    assert_eq!(created.sku.as_deref(), Some("ESP-1"));
    assert!(created.category_ids.is_empty());

    repo.create_product_with_categories(&NewProduct::new("Sencha"))
        .unwrap();

    let (total, items) = repo.list_products(ProductListQuery::new()).unwrap();
    assert_eq!(total, 2);
    assert_eq!(items[0].name, "Espresso beans");
    assert_eq!(items[1].name, "Sencha");

    let (total, items) = repo
        .list_products(ProductListQuery::new().search("roast"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, created.id);

    let updated = repo
        .update_product_with_categories(
            created.id,
            &UpdateProduct::new().name("Espresso").sku(None::<String>),
        )
        .unwrap()
        .expect("product should exist");
    assert_eq!(updated.name, "Espresso");
    assert_eq!(updated.sku, None);
    assert_eq!(updated.description.as_deref(), Some("Dark roast"));

    let missing = repo
        .update_product_with_categories(Uuid::new_v4(), &UpdateProduct::new().name("Ghost"))
        .unwrap();
    assert!(missing.is_none());

    let err = repo
        .delete_product(Uuid::new_v4())
        .expect_err("expected delete of unknown product to fail");
    assert!(matches!(err, RepositoryError::NotFound));

    repo.delete_product(created.id).unwrap();
    assert!(repo.get_product_by_id(created.id).unwrap().is_none());

    let (total_after, items_after) = repo.list_products(ProductListQuery::new()).unwrap();
    assert_eq!(total_after, 1);
    assert_eq!(items_after[0].name, "Sencha");
}

#[test]
fn test_search_treats_wildcards_literally() {
    let test_db = common::TestDb::new("test_search_treats_wildcards_literally.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_category(&NewCategory::new("50% off")).unwrap();
    repo.create_category(&NewCategory::new("500 g packs")).unwrap();
    repo.create_product_with_categories(&NewProduct::new("green_tea"))
        .unwrap();
    repo.create_product_with_categories(&NewProduct::new("greenXtea"))
        .unwrap();

    let (total, items) = repo
        .list_categories(CategoryListQuery::new().search("50%"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].name, "50% off");

    let (total, items) = repo
        .list_products(ProductListQuery::new().search("n_t"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].name, "green_tea");
}
