use sea_orm::{ColumnTrait, EntityTrait};
use serde::Serialize;

use crate::config::ListConfig;
use crate::schema::{FieldSchema, SchemaError};

/// A Sea-ORM entity exposed through a filterable, paginated list endpoint.
///
/// ```rust,ignore
/// impl ListResource for Product {
///     type EntityType = product::Entity;
///     type ColumnType = product::Column;
///     type ListModel = Product;
///
///     const PRIMARY_KEY_COLUMN: Self::ColumnType = product::Column::Id;
///     const RESOURCE_NAME_PLURAL: &'static str = "products";
///
///     fn field_schema() -> &'static FieldSchema {
///         &PRODUCT_SCHEMA
///     }
///
///     fn columns() -> Vec<(&'static str, Self::ColumnType)> {
///         vec![("name", product::Column::Name), ("price", product::Column::Price)]
///     }
/// }
/// ```
pub trait ListResource: Send + Sync + 'static {
    type EntityType: EntityTrait<Model: Sync>;
    type ColumnType: ColumnTrait;
    /// What list responses carry for each record
    type ListModel: From<<Self::EntityType as EntityTrait>::Model> + Serialize + Send;

    /// Tie-breaker after the schema's default order, so paging is stable
    const PRIMARY_KEY_COLUMN: Self::ColumnType;
    const RESOURCE_NAME_PLURAL: &'static str;

    fn field_schema() -> &'static FieldSchema;

    /// Column for every schema field name (filterable, searchable and the default order)
    fn columns() -> Vec<(&'static str, Self::ColumnType)>;

    #[must_use]
    fn column(name: &str) -> Option<Self::ColumnType> {
        Self::columns()
            .into_iter()
            .find(|(field, _)| *field == name)
            .map(|(_, column)| column)
    }

    #[must_use]
    fn list_config() -> ListConfig {
        ListConfig::default()
    }

    /// Validate the field schema, then check every field it names has a column.
    ///
    /// # Errors
    ///
    /// Returns the schema's own [`SchemaError`], or [`SchemaError::UnmappedField`]
    /// for the first filterable, searchable or ordering field without a column.
    fn check_columns() -> Result<(), SchemaError> {
        let schema = Self::field_schema();
        schema.validate()?;

        schema
            .filterable_fields()
            .iter()
            .map(|(name, _)| *name)
            .chain(schema.searchable_fields().iter().copied())
            .chain(std::iter::once(schema.default_order()))
            .find(|name| Self::column(name).is_none())
            .map_or(Ok(()), |name| Err(SchemaError::UnmappedField(name.to_string())))
    }
}
