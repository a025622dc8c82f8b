use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, CategoryListQuery, NewCategory, UpdateCategory};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use crate::pagination::Pagination;

pub use errors::{RepositoryError, RepositoryResult};

pub mod category;
pub mod errors;
pub mod product;
pub mod product_category;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }

    /// Run `f` inside a single write transaction on one pooled connection.
    ///
    /// The functions in [`product_category`] accept the connection handed to
    /// `f`, so several of them can be committed or rolled back together.
    pub fn transaction<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> RepositoryResult<T>,
    {
        let mut conn = self.conn()?;
        conn.immediate_transaction::<T, RepositoryError, _>(f)
    }
}

/// Escape character used by every search pattern built with [`contains_pattern`].
pub(crate) const LIKE_ESCAPE: char = '\\';

/// `LIKE` pattern matching `term` anywhere in a column.
///
/// `%`, `_` and the escape character in `term` match themselves, so the
/// pattern must be used together with `.escape(LIKE_ESCAPE)`.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn get_product_by_id(&self, id: Uuid) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

/// Write operations over product records and their category links.
pub trait ProductWriter {
    /// Insert the product and link it to every category in `new_product.category_ids`.
    fn create_product_with_categories(&self, new_product: &NewProduct)
    -> RepositoryResult<Product>;
    /// Patch the product and replace its category links. `Ok(None)` when the product is unknown.
    fn update_product_with_categories(
        &self,
        product_id: Uuid,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Option<Product>>;
    fn delete_product(&self, product_id: Uuid) -> RepositoryResult<()>;
}

/// Read-only operations over category records.
pub trait CategoryReader {
    fn get_category_by_id(&self, category_id: Uuid) -> RepositoryResult<Option<Category>>;
    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<Category>)>;
}

/// Write operations over category records.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        category_id: Uuid,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
    fn delete_category(&self, category_id: Uuid) -> RepositoryResult<()>;
}

/// Traversal of the product/category relationship in both directions.
pub trait ProductCategoryReader {
    /// Categories linked to `product_id`; empty for an unknown product.
    fn list_categories_for_product(&self, product_id: Uuid) -> RepositoryResult<Vec<Category>>;
    /// One window of the products linked to `category_id`.
    fn list_products_in_category(
        &self,
        category_id: Uuid,
        pagination: Pagination,
    ) -> RepositoryResult<Vec<Product>>;
}

/// Single-link maintenance of the product/category relationship.
pub trait ProductCategoryWriter {
    /// Returns `false` without writing when the link already exists.
    fn add_category_to_product(&self, product_id: Uuid, category_id: Uuid)
    -> RepositoryResult<bool>;
    /// Returns `false` when there was no link to remove.
    fn remove_category_from_product(
        &self,
        product_id: Uuid,
        category_id: Uuid,
    ) -> RepositoryResult<bool>;
}
