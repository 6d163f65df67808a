//! Business logic services

mod mint;

pub use mint::{check_image_type, validate_request, MintService};
