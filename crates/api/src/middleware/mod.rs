//! Request extractors guarding route groups.
//!
//! - [`admin_key::RequireAdminKey`] -- Requires the management API bearer key.

pub mod admin_key;
