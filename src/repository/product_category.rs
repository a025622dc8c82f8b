//! Maintenance and traversal of the `product_categories` junction table.
//!
//! The free functions take the connection they run on, so callers holding a
//! transaction (see [`DieselRepository::transaction`]) can combine them. The
//! trait implementations check a connection out per call and commit each
//! write on its own.

use std::collections::{HashMap, HashSet};

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

use crate::domain::category::Category as DomainCategory;
use crate::domain::product::Product as DomainProduct;
use crate::domain::product_category::{
    NewProductCategory as DomainNewProductCategory, ProductCategory as DomainProductCategory,
};
use crate::models::category::Category as DbCategory;
use crate::models::db_uuid::{DbUuid, db_uuids};
use crate::models::product::Product as DbProduct;
use crate::models::product_category::{
    NewProductCategory as DbNewProductCategory, ProductCategory as DbProductCategory,
};
use crate::pagination::Pagination;
use crate::repository::{
    DieselRepository, ProductCategoryReader, ProductCategoryWriter, RepositoryError,
    RepositoryResult,
};

impl ProductCategoryReader for DieselRepository {
    fn list_categories_for_product(
        &self,
        product_id: Uuid,
    ) -> RepositoryResult<Vec<DomainCategory>> {
        let mut conn = self.conn()?;
        categories_for_product(&mut conn, product_id)
    }

    fn list_products_in_category(
        &self,
        category_id: Uuid,
        pagination: Pagination,
    ) -> RepositoryResult<Vec<DomainProduct>> {
        let mut conn = self.conn()?;
        products_in_category(&mut conn, category_id, pagination)
    }
}

impl ProductCategoryWriter for DieselRepository {
    fn add_category_to_product(
        &self,
        product_id: Uuid,
        category_id: Uuid,
    ) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;

        let added = conn.immediate_transaction::<bool, RepositoryError, _>(|conn| {
            add_category(conn, product_id, category_id)
        })?;

        if added {
            log::debug!("Linked category {category_id} to product {product_id}");
        }

        Ok(added)
    }

    fn remove_category_from_product(
        &self,
        product_id: Uuid,
        category_id: Uuid,
    ) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;

        let removed = conn.immediate_transaction::<bool, RepositoryError, _>(|conn| {
            remove_category(conn, product_id, category_id)
        })?;

        if removed {
            log::debug!("Unlinked category {category_id} from product {product_id}");
        }

        Ok(removed)
    }
}

/// Look up the link between `product_id` and `category_id`.
pub fn find_link(
    conn: &mut SqliteConnection,
    product_id: Uuid,
    category_id: Uuid,
) -> RepositoryResult<Option<DomainProductCategory>> {
    use crate::schema::product_categories;

    let link = product_categories::table
        .find((DbUuid(product_id), DbUuid(category_id)))
        .first::<DbProductCategory>(conn)
        .optional()?;

    Ok(link.map(DomainProductCategory::from))
}

/// Link a category to a product unless the pair is already linked.
///
/// Returns `true` when a row was inserted.
pub fn add_category(
    conn: &mut SqliteConnection,
    product_id: Uuid,
    category_id: Uuid,
) -> RepositoryResult<bool> {
    use crate::schema::product_categories;

    if find_link(conn, product_id, category_id)?.is_some() {
        return Ok(false);
    }

    let new_link = DomainNewProductCategory::new(product_id, category_id);
    diesel::insert_into(product_categories::table)
        .values(&DbNewProductCategory::from(&new_link))
        .execute(conn)?;

    Ok(true)
}

/// Remove the link between a product and a category.
///
/// Returns `true` when a row was deleted.
pub fn remove_category(
    conn: &mut SqliteConnection,
    product_id: Uuid,
    category_id: Uuid,
) -> RepositoryResult<bool> {
    use crate::schema::product_categories;

    let deleted = diesel::delete(
        product_categories::table.find((DbUuid(product_id), DbUuid(category_id))),
    )
    .execute(conn)?;

    Ok(deleted > 0)
}

/// Link every category in `category_ids` to the product, skipping repeated ids.
///
/// Returns the number of rows inserted.
pub fn insert_categories(
    conn: &mut SqliteConnection,
    product_id: Uuid,
    category_ids: &[Uuid],
) -> RepositoryResult<usize> {
    use crate::schema::product_categories;

    let mut inserted = 0;
    for category_id in unique_ids(category_ids) {
        let new_link = DomainNewProductCategory::new(product_id, category_id);
        inserted += diesel::insert_into(product_categories::table)
            .values(&DbNewProductCategory::from(&new_link))
            .execute(conn)?;
    }

    Ok(inserted)
}

/// Drop every link of the product and link it to `category_ids` instead.
///
/// Returns the number of rows inserted.
pub fn replace_categories(
    conn: &mut SqliteConnection,
    product_id: Uuid,
    category_ids: &[Uuid],
) -> RepositoryResult<usize> {
    use crate::schema::product_categories;

    let removed = diesel::delete(
        product_categories::table.filter(product_categories::product_id.eq(DbUuid(product_id))),
    )
    .execute(conn)?;

    let inserted = insert_categories(conn, product_id, category_ids)?;
    log::debug!(
        "Replaced categories of product {product_id}: {removed} removed, {inserted} inserted"
    );

    Ok(inserted)
}

/// Categories linked to the product, ordered by name then id.
pub fn categories_for_product(
    conn: &mut SqliteConnection,
    product_id: Uuid,
) -> RepositoryResult<Vec<DomainCategory>> {
    use crate::schema::{categories, product_categories};

    let rows = categories::table
        .inner_join(product_categories::table)
        .filter(product_categories::product_id.eq(DbUuid(product_id)))
        .order((categories::name.asc(), categories::id.asc()))
        .select(DbCategory::as_select())
        .load::<DbCategory>(conn)?;

    Ok(rows.into_iter().map(DomainCategory::from).collect())
}

/// One window of the products linked to the category, ordered by name then id.
pub fn products_in_category(
    conn: &mut SqliteConnection,
    category_id: Uuid,
    pagination: Pagination,
) -> RepositoryResult<Vec<DomainProduct>> {
    use crate::schema::{product_categories, products};

    let rows = products::table
        .inner_join(product_categories::table)
        .filter(product_categories::category_id.eq(DbUuid(category_id)))
        .order((products::name.asc(), products::id.asc()))
        .offset(pagination.offset_i64())
        .limit(pagination.limit_i64())
        .select(DbProduct::as_select())
        .load::<DbProduct>(conn)?;

    with_category_ids(conn, rows)
}

/// Convert product rows to domain products carrying their category ids.
pub(crate) fn with_category_ids(
    conn: &mut SqliteConnection,
    rows: Vec<DbProduct>,
) -> RepositoryResult<Vec<DomainProduct>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let product_ids: Vec<Uuid> = rows.iter().map(|row| row.id.into()).collect();
    let mut links = load_category_ids_for_products(conn, &product_ids)?;

    let mut products = Vec::with_capacity(rows.len());
    for row in rows {
        let mut product: DomainProduct = row.into();
        product.category_ids = links.remove(&product.id).unwrap_or_default();
        products.push(product);
    }

    Ok(products)
}

fn load_category_ids_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[Uuid],
) -> RepositoryResult<HashMap<Uuid, Vec<Uuid>>> {
    use crate::schema::product_categories;

    let rows = product_categories::table
        .filter(product_categories::product_id.eq_any(db_uuids(product_ids)))
        .order((
            product_categories::created_at.asc(),
            product_categories::category_id.asc(),
        ))
        .load::<DbProductCategory>(conn)?;

    let mut map: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for row in rows {
        map.entry(row.product_id.into())
            .or_default()
            .push(row.category_id.into());
    }

    Ok(map)
}

fn unique_ids(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_ids_keeps_first_occurrence_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();

        assert_eq!(unique_ids(&[a, b, a, c, b]), vec![a, b, c]);
        assert!(unique_ids(&[]).is_empty());
    }
}
