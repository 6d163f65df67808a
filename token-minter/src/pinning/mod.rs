//! Content-addressed storage for token artwork and metadata

mod pinata;

pub use pinata::{remove_local_file, PinataClient};
