use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
        UpdateProduct as DomainUpdateProduct,
    },
    models::db_uuid::DbUuid,
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    repository::product_category::{insert_categories, replace_categories, with_category_ids},
    repository::{
        DieselRepository, LIKE_ESCAPE, ProductReader, ProductWriter, RepositoryError,
        RepositoryResult, contains_pattern,
    },
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: Uuid) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .find(DbUuid(id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        match product {
            Some(db_product) => Ok(with_category_ids(&mut conn, vec![db_product])?.pop()),
            None => Ok(None),
        }
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(term) = query.search.as_ref() {
                let pattern = contains_pattern(term);
                items = items.filter(
                    products::name
                        .like(pattern.clone())
                        .escape(LIKE_ESCAPE)
                        .or(products::description.like(pattern).escape(LIKE_ESCAPE)),
                );
            }
            items
        };

        // Get the total count before applying pagination
        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((products::name.asc(), products::id.asc()));

        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset_i64())
                .limit(pagination.limit_i64());
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;

        Ok((total, with_category_ids(&mut conn, db_products)?))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product_with_categories(
        &self,
        new_product: &DomainNewProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_new = DbNewProduct::from(new_product);

        conn.immediate_transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let created = diesel::insert_into(products::table)
                .values(&db_new)
                .get_result::<DbProduct>(conn)?;

            let linked = insert_categories(conn, new_product.id, &new_product.category_ids)?;
            log::debug!(
                "Created product {} linked to {linked} categories",
                new_product.id
            );

            with_category_ids(conn, vec![created])?
                .pop()
                .ok_or(RepositoryError::NotFound)
        })
    }

    fn update_product_with_categories(
        &self,
        product_id: Uuid,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        // The scalar patch and the link replacement commit or roll back together.
        conn.immediate_transaction::<Option<DomainProduct>, RepositoryError, _>(|conn| {
            let target = products::table.filter(products::id.eq(DbUuid(product_id)));

            let updated = diesel::update(target)
                .set(&db_updates)
                .get_result::<DbProduct>(conn)
                .optional()?;

            let Some(updated) = updated else {
                return Ok(None);
            };

            replace_categories(conn, product_id, &updates.category_ids)?;

            Ok(with_category_ids(conn, vec![updated])?.pop())
        })
    }

    fn delete_product(&self, product_id: Uuid) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let target = products::table.filter(products::id.eq(DbUuid(product_id)));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
