//! # OpenAPI Description of List Endpoints
//!
//! [`list_paths`] documents the `GET` operation that [`list_router`](crate::list_router)
//! serves: the reserved [`ListParams`] plus one query parameter per field and
//! operator the resource's [`FieldSchema`] accepts.
//!
//! ```rust,ignore
//! let mut doc = ApiDoc::openapi();
//! doc.paths.paths.extend(listcrate::openapi::list_paths::<Product>("/products").paths);
//! ```

use utoipa::IntoParams;
use utoipa::openapi::path::{
    HttpMethod, OperationBuilder, Parameter, ParameterBuilder, ParameterIn, PathItem,
};
use utoipa::openapi::schema::{KnownFormat, ObjectBuilder, SchemaFormat, Type};
use utoipa::openapi::{Paths, PathsBuilder, Required, ResponseBuilder};

use crate::core::ListResource;
use crate::filtering::Operator;
use crate::models::ListParams;
use crate::schema::{FieldSchema, ValueKind};

/// `Paths` holding the list operation for `T` at `path`
#[must_use]
pub fn list_paths<T: ListResource>(path: &str) -> Paths {
    let resource = T::RESOURCE_NAME_PLURAL;

    let operation = OperationBuilder::new()
        .tag(resource)
        .operation_id(Some(format!("list_{resource}")))
        .summary(Some(format!("List {resource}")))
        .description(Some(format!(
            "One page of {resource} matching every filter. `totalMatched` counts the \
             full match set and is the same on every page."
        )))
        .parameters(Some(list_parameters(T::field_schema())))
        .response(
            "200",
            ResponseBuilder::new().description("One page of the match set"),
        )
        .response(
            "400",
            ResponseBuilder::new()
                .description("Undeclared field, invalid operator or value, or page out of range"),
        )
        .response("500", ResponseBuilder::new().description("Storage failure"));

    PathsBuilder::new()
        .path(path, PathItem::new(HttpMethod::Get, operation))
        .build()
}

/// Query parameters a list endpoint over `schema` accepts
#[must_use]
pub fn list_parameters(schema: &FieldSchema) -> Vec<Parameter> {
    let mut parameters = ListParams::into_params(|| Some(ParameterIn::Query));

    for &(field, kind) in schema.filterable_fields() {
        parameters.push(field_parameter(field.to_string(), kind, "Equal to"));

        for operator in Operator::SUFFIXED.into_iter().filter(|op| op.supports(kind)) {
            let description = match operator {
                Operator::In => "Comma-separated list, any of",
                Operator::Ne => "Not equal to",
                Operator::Gt => "Greater than",
                Operator::Gte => "Greater than or equal to",
                Operator::Lt => "Less than",
                Operator::Lte | Operator::Eq => "Less than or equal to",
            };
            let name = format!("{field}_{}", operator.as_str());
            let kind = if operator == Operator::In {
                ValueKind::String
            } else {
                kind
            };
            parameters.push(field_parameter(name, kind, description));
        }
    }

    parameters
}

fn field_parameter(name: String, kind: ValueKind, description: &str) -> Parameter {
    let schema = match kind {
        ValueKind::Number => ObjectBuilder::new().schema_type(Type::Number),
        ValueKind::String => ObjectBuilder::new().schema_type(Type::String),
        ValueKind::Boolean => ObjectBuilder::new().schema_type(Type::Boolean),
        ValueKind::Date => ObjectBuilder::new()
            .schema_type(Type::String)
            .format(Some(SchemaFormat::KnownFormat(KnownFormat::DateTime))),
    };

    ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Query)
        .required(Required::False)
        .description(Some(description))
        .schema(Some(schema))
        .build()
}
