use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain representation linking a product to a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProductCategory {
    /// Identifier of the product filed under the category.
    pub product_id: Uuid,
    /// Identifier of the referenced category.
    pub category_id: Uuid,
    /// Timestamp for when the link was created.
    pub created_at: NaiveDateTime,
}

/// Payload required to link an existing category to a product.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NewProductCategory {
    /// Identifier of the product receiving the category.
    pub product_id: Uuid,
    /// Identifier of the category being attached to the product.
    pub category_id: Uuid,
}

impl NewProductCategory {
    /// Construct a new link payload between a product and a category.
    pub fn new(product_id: Uuid, category_id: Uuid) -> Self {
        Self {
            product_id,
            category_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_link_deserializes_from_json_payload() {
        let product_id = Uuid::new_v4();
        let category_id = Uuid::new_v4();
        let payload = serde_json::json!({
            "product_id": product_id.to_string(),
            "category_id": category_id.to_string(),
        });

        let link: NewProductCategory =
            serde_json::from_value(payload).expect("deserialization should succeed");

        assert_eq!(link, NewProductCategory::new(product_id, category_id));
    }

    #[test]
    fn link_rejects_malformed_ids() {
        let payload = serde_json::json!({
            "product_id": "not-a-uuid",
            "category_id": Uuid::new_v4().to_string(),
        });

        assert!(serde_json::from_value::<NewProductCategory>(payload).is_err());
    }
}
