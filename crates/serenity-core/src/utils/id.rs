// Record id generation.
//
// Used by the service layer when the id strategy is `random`; the default
// strategy leaves id generation to the store backend.

/// Generate a unique id using nanoid (21 characters).
pub fn generate_id() -> String {
    nanoid::nanoid!()
}

/// Generate an id with a custom length.
pub fn generate_id_with_length(len: usize) -> String {
    nanoid::nanoid!(len)
}
