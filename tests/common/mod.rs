#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Duration, TimeZone, Utc};
use listcrate::list_router;
use sea_orm::{ActiveModelTrait, ActiveValue, Database, DatabaseConnection, DbErr};
use sea_orm_migration::prelude::*;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub mod product_entity;

use product_entity::{ActiveModel, Product};

// name, description, category, brand, price, stock, rating, featured
type SeedRow = (&'static str, &'static str, &'static str, &'static str, i32, i32, f64, bool);

pub const CATALOGUE: [SeedRow; 14] = [
    ("Blue Shirt", "Soft cotton tee", "shortsleeves", "Acme", 15, 10, 4.5, true),
    ("Red Hoodie", "Warm zip hoodie", "hoodies", "Northwind", 45, 3, 4.0, false),
    ("Grey Sweatshirt", "Classic crew neck", "sweatshirt", "Acme", 35, 0, 3.5, false),
    ("Striped Longsleeve", "Breton stripes", "longsleeves", "Shirtworks", 28, 7, 4.2, true),
    ("Black Hoodie", "Heavyweight fleece hoodie", "hoodies", "Acme", 60, 5, 4.8, true),
    ("White Tee", "Everyday basic shirt", "shortsleeves", "Northwind", 8, 30, 3.9, false),
    ("Green Longsleeve", "Organic cotton", "longsleeves", "Acme", 22, 12, 4.1, false),
    ("Navy Sweatshirt", "Brushed interior", "sweatshirt", "Shirtworks", 40, 2, 4.6, false),
    ("50% Off Tee", "Clearance top", "shortsleeves", "Northwind", 5, 50, 2.5, false),
    ("Zip Hoodie", "Full zip with pockets", "hoodies", "Northwind", 55, 4, 4.3, true),
    ("Pocket Tee", "Chest pocket tee", "shortsleeves", "Acme", 12, 20, 4.0, false),
    ("Oversized Longsleeve", "Relaxed fit", "longsleeves", "Northwind", 30, 6, 3.8, false),
    ("Cropped Hoodie", "Boxy cut hoodie", "hoodies", "Shirtworks", 48, 1, 4.4, false),
    ("Vintage Sweatshirt", "Washed fleece", "sweatshirt", "Acme", 38, 9, 4.7, true),
];

/// Catalogue rows as list models, oldest first
pub fn catalogue_products() -> Vec<Product> {
    let base: DateTime<Utc> = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    CATALOGUE
        .iter()
        .zip(1_i64..)
        .map(
            |(&(name, description, category, brand, price, stock, rating, featured), n)| Product {
                id: Uuid::from_u128(u128::from(n.unsigned_abs())),
                name: name.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                brand: brand.to_string(),
                price,
                stock,
                rating,
                featured,
                created_at: base + Duration::hours(n),
            },
        )
        .collect()
}

/// The catalogue as JSON records for the in-memory executor
pub fn catalogue_records() -> Vec<Value> {
    catalogue_products()
        .into_iter()
        .map(|product| serde_json::to_value(product).unwrap())
        .collect()
}

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    // Run migrations
    Migrator::up(&db, None).await?;

    Ok(db)
}

pub async fn setup_test_db_with_catalogue() -> Result<DatabaseConnection, DbErr> {
    let db = setup_test_db().await?;

    for product in catalogue_products() {
        insert_product(&db, product).await?;
    }

    Ok(db)
}

pub async fn insert_product(db: &DatabaseConnection, product: Product) -> Result<(), DbErr> {
    ActiveModel {
        id: ActiveValue::Set(product.id),
        name: ActiveValue::Set(product.name),
        description: ActiveValue::Set(product.description),
        category: ActiveValue::Set(product.category),
        brand: ActiveValue::Set(product.brand),
        price: ActiveValue::Set(product.price),
        stock: ActiveValue::Set(product.stock),
        rating: ActiveValue::Set(product.rating),
        featured: ActiveValue::Set(product.featured),
        created_at: ActiveValue::Set(product.created_at),
    }
    .insert(db)
    .await?;

    Ok(())
}

pub fn setup_product_app(db: DatabaseConnection) -> Router {
    let api = list_router::<Product>("/products")
        .expect("Product maps every schema field to a column")
        .with_state(db);

    Router::new().nest("/api/v1", api)
}

pub async fn catalogue_app() -> Router {
    let db = setup_test_db_with_catalogue()
        .await
        .expect("Failed to setup test database");
    setup_product_app(db)
}

/// `GET /api/v1/products?{query}`; returns the status, `Content-Range` and JSON body
pub async fn get_products(app: &Router, query: &str) -> (StatusCode, Option<String>, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/v1/products?{query}"))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_range = response
        .headers()
        .get("content-range")
        .map(|value| value.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap();

    (status, content_range, json)
}

/// Names of the items in a successful list response, in response order
pub fn item_names(body: &Value) -> Vec<String> {
    body["items"]
        .as_array()
        .expect("items should be an array")
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect()
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateProductTable)]
    }
}

pub struct CreateProductTable;

#[async_trait::async_trait]
impl MigrationName for CreateProductTable {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_product_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateProductTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(ProductEntity)
            .if_not_exists()
            .col(
                ColumnDef::new(ProductColumn::Id)
                    .uuid()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(ProductColumn::Name).text().not_null())
            .col(ColumnDef::new(ProductColumn::Description).text().not_null())
            .col(ColumnDef::new(ProductColumn::Category).string().not_null())
            .col(ColumnDef::new(ProductColumn::Brand).string().not_null())
            .col(ColumnDef::new(ProductColumn::Price).integer().not_null())
            .col(
                ColumnDef::new(ProductColumn::Stock)
                    .integer()
                    .not_null()
                    .default(0),
            )
            .col(
                ColumnDef::new(ProductColumn::Rating)
                    .double()
                    .not_null()
                    .default(0.0),
            )
            .col(
                ColumnDef::new(ProductColumn::Featured)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(
                ColumnDef::new(ProductColumn::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductEntity).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum ProductColumn {
    Id,
    Name,
    Description,
    Category,
    Brand,
    Price,
    Stock,
    Rating,
    Featured,
    CreatedAt,
}

impl Iden for ProductColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::Name => "name",
                Self::Description => "description",
                Self::Category => "category",
                Self::Brand => "brand",
                Self::Price => "price",
                Self::Stock => "stock",
                Self::Rating => "rating",
                Self::Featured => "featured",
                Self::CreatedAt => "created_at",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct ProductEntity;

impl Iden for ProductEntity {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "products").unwrap();
    }
}
