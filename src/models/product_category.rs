use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product_category::{
    NewProductCategory as DomainNewProductCategory, ProductCategory as DomainProductCategory,
};
use crate::models::db_uuid::DbUuid;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(
    table_name = crate::schema::product_categories,
    primary_key(product_id, category_id)
)]
pub struct ProductCategory {
    pub product_id: DbUuid,
    pub category_id: DbUuid,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_categories)]
pub struct NewProductCategory {
    pub product_id: DbUuid,
    pub category_id: DbUuid,
}

impl From<ProductCategory> for DomainProductCategory {
    fn from(value: ProductCategory) -> Self {
        Self {
            product_id: value.product_id.into(),
            category_id: value.category_id.into(),
            created_at: value.created_at,
        }
    }
}

impl From<&DomainNewProductCategory> for NewProductCategory {
    fn from(value: &DomainNewProductCategory) -> Self {
        Self {
            product_id: value.product_id.into(),
            category_id: value.category_id.into(),
        }
    }
}
