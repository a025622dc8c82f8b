use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pagination::Pagination;

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: Uuid,
    /// Human-readable name of the product.
    pub name: String,
    /// Optional stock keeping unit identifier.
    pub sku: Option<String>,
    /// Optional longer description shown to users.
    pub description: Option<String>,
    /// Identifiers of the categories the product is linked to.
    pub category_ids: Vec<Uuid>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product together with its category links.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Identifier assigned to the product when the payload is built.
    pub id: Uuid,
    /// Human-readable name of the product.
    pub name: String,
    /// Optional stock keeping unit identifier.
    pub sku: Option<String>,
    /// Optional longer description shown to users.
    pub description: Option<String>,
    /// Categories the product should be linked to once created.
    pub category_ids: Vec<Uuid>,
    /// Timestamp captured when the product payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a new product payload with a fresh identifier and the current timestamp.
    pub fn new(name: impl Into<String>) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sku: None,
            description: None,
            category_ids: Vec::new(),
            updated_at: now,
        }
    }

    /// Attach an SKU identifier to the product payload.
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Attach a descriptive text to the product payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the categories the product is linked to on creation.
    pub fn with_category_ids(mut self, category_ids: impl Into<Vec<Uuid>>) -> Self {
        self.category_ids = category_ids.into();
        self
    }
}

/// Patch data applied when updating an existing product.
///
/// Scalar fields left as `None` keep their stored value. `category_ids` is
/// always the complete set of links the product ends up with.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    /// Optional name update.
    pub name: Option<String>,
    /// Optional SKU update; `Some(None)` clears the value.
    pub sku: Option<Option<String>>,
    /// Optional description update; `Some(None)` clears the value.
    pub description: Option<Option<String>>,
    /// Replacement list of linked categories.
    pub category_ids: Vec<Uuid>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProduct {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProduct {
    /// Create a patch that changes no scalar field and clears every category link.
    pub fn new() -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            name: None,
            sku: None,
            description: None,
            category_ids: Vec::new(),
            updated_at: now,
        }
    }

    /// Update the product name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Update the SKU, using `None` to clear an existing value.
    pub fn sku(mut self, sku: Option<impl Into<String>>) -> Self {
        self.sku = Some(sku.map(|value| value.into()));
        self
    }

    /// Update the product description, using `None` to clear an existing value.
    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = Some(description.map(|value| value.into()));
        self
    }

    /// Replace the product's category links with `category_ids`.
    pub fn category_ids(mut self, category_ids: impl Into<Vec<Uuid>>) -> Self {
        self.category_ids = category_ids.into();
        self
    }
}

/// Query definition used to list catalog products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Optional name or description search term.
    pub search: Option<String>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    /// Construct a query over every product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results by a search term applied to the name or description.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Apply an offset/limit window to the query.
    pub fn paginate(mut self, offset: usize, limit: usize) -> Self {
        self.pagination = Some(Pagination::new(offset, limit));
        self
    }
}
