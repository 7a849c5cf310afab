use chrono::{DateTime, Utc};
use listcrate::{FieldSchema, ListConfig, ListResource, ValueKind};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: String,
    pub brand: String,
    pub price: i32,
    pub stock: i32,
    pub rating: f64,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub static PRODUCT_SCHEMA: FieldSchema = FieldSchema::new(
    &[
        ("name", ValueKind::String),
        ("category", ValueKind::String),
        ("brand", ValueKind::String),
        ("price", ValueKind::Number),
        ("stock", ValueKind::Number),
        ("rating", ValueKind::Number),
        ("featured", ValueKind::Boolean),
        ("created_at", ValueKind::Date),
    ],
    &["name", "description", "brand"],
    "created_at",
);

/// What the list endpoint returns for each product
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub brand: String,
    pub price: i32,
    pub stock: i32,
    pub rating: f64,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            category: model.category,
            brand: model.brand,
            price: model.price,
            stock: model.stock,
            rating: model.rating,
            featured: model.featured,
            created_at: model.created_at,
        }
    }
}

impl ListResource for Product {
    type EntityType = Entity;
    type ColumnType = Column;
    type ListModel = Product;

    const PRIMARY_KEY_COLUMN: Self::ColumnType = Column::Id;
    const RESOURCE_NAME_PLURAL: &'static str = "products";

    fn field_schema() -> &'static FieldSchema {
        &PRODUCT_SCHEMA
    }

    fn columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![
            ("name", Column::Name),
            ("description", Column::Description),
            ("category", Column::Category),
            ("brand", Column::Brand),
            ("price", Column::Price),
            ("stock", Column::Stock),
            ("rating", Column::Rating),
            ("featured", Column::Featured),
            ("created_at", Column::CreatedAt),
        ]
    }

    fn list_config() -> ListConfig {
        ListConfig {
            page_size_whitelist: vec![3, 12],
            ..ListConfig::default()
        }
    }
}
