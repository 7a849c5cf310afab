//! Product catalogue list endpoint over SQLite
//!
//! ```bash
//! cargo run --example product_catalog
//! ```
//!
//! Then try:
//! - <http://localhost:3000/products>
//! - <http://localhost:3000/products?category=hoodies&price_lte=50>
//! - <http://localhost:3000/products?search=zip&page=1>
//! - <http://localhost:3000/products?price_between=1> (400)
//! - <http://localhost:3000/openapi.json>

use chrono::{DateTime, Duration, Utc};
use axum::{Json, routing::get};
use listcrate::openapi::list_paths;
use listcrate::{FieldSchema, ListResource, ValueKind, list_router};
use sea_orm::{ActiveValue, Database, DatabaseConnection, entity::prelude::*};
use serde::Serialize;
use std::env;
use tower_http::trace::TraceLayer;
use utoipa::openapi::{InfoBuilder, OpenApiBuilder};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: i32,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}
impl ActiveModelBehavior for ActiveModel {}

static PRODUCT_SCHEMA: FieldSchema = FieldSchema::new(
    &[
        ("category", ValueKind::String),
        ("price", ValueKind::Number),
        ("stock", ValueKind::Number),
        ("created_at", ValueKind::Date),
    ],
    &["name", "description"],
    "created_at",
);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Product {
    id: Uuid,
    name: String,
    category: String,
    price: i32,
    in_stock: bool,
}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            price: model.price,
            in_stock: model.stock > 0,
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
            ("price", Column::Price),
            ("stock", Column::Stock),
            ("created_at", Column::CreatedAt),
        ]
    }
}

async fn seed(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute(sea_orm::Statement::from_string(
        db.get_database_backend(),
        r"CREATE TABLE IF NOT EXISTS products (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            category TEXT NOT NULL,
            price INTEGER NOT NULL,
            stock INTEGER NOT NULL,
            created_at TEXT NOT NULL
        );"
        .to_owned(),
    ))
    .await?;

    let products = [
        ("Blue Shirt", "Soft cotton tee", "shortsleeves", 15, 10),
        ("Red Hoodie", "Warm zip hoodie", "hoodies", 45, 3),
        ("Grey Sweatshirt", "Classic crew neck", "sweatshirt", 35, 0),
        ("Striped Longsleeve", "Breton stripes", "longsleeves", 28, 7),
        ("Black Hoodie", "Heavyweight fleece", "hoodies", 60, 5),
        ("White Tee", "Everyday basic", "shortsleeves", 8, 30),
        ("Zip Hoodie", "Full zip with pockets", "hoodies", 55, 4),
        ("Vintage Sweatshirt", "Washed fleece", "sweatshirt", 38, 9),
    ];

    let now = Utc::now();
    for ((name, description, category, price, stock), age) in products.into_iter().zip(0_i64..) {
        ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(name.to_string()),
            description: ActiveValue::Set(description.to_string()),
            category: ActiveValue::Set(category.to_string()),
            price: ActiveValue::Set(price),
            stock: ActiveValue::Set(stock),
            created_at: ActiveValue::Set(now - Duration::days(age)),
        }
        .insert(db)
        .await?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "listcrate=debug,tower_http=debug".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    let db: DatabaseConnection = Database::connect(&database_url).await?;
    seed(&db).await?;

    let doc = OpenApiBuilder::new()
        .info(InfoBuilder::new().title("Product catalogue").version("0.1.0"))
        .paths(list_paths::<Product>("/products"))
        .build();

    let app = list_router::<Product>("/products")?
        .route("/openapi.json", get(move || async move { Json(doc) }))
        .with_state(db)
        .layer(TraceLayer::new_for_http());
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    tracing::info!("Listening on http://0.0.0.0:3000/products");
    axum::serve(listener, app).await?;
    Ok(())
}
