// Shared utility helpers.

pub mod id;

pub use id::generate_id;
