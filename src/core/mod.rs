// Binding between Sea-ORM entities and list endpoints

pub mod traits;

pub use traits::ListResource;
