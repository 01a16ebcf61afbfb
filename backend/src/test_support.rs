//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and behavioural tests (in `tests/`).

pub mod clock;
pub mod counting;
pub mod openapi {
    //! OpenAPI schema traversal helpers.

    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::{Object, Schema};

    /// Extract an `Object` schema, panicking with a diagnostic otherwise.
    pub fn unwrap_object_schema<'a>(schema: &'a RefOr<Schema>, name: &str) -> &'a Object {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj,
            RefOr::Ref(reference) => panic!(
                "schema '{name}' is a $ref to '{}'; resolve the reference first",
                reference.ref_location
            ),
            _ => panic!("schema '{name}' is not an Object"),
        }
    }

    /// Whether the object schema declares `field` as required.
    pub fn is_required(obj: &Object, field: &str) -> bool {
        obj.required.iter().any(|name| name == field)
    }
}
