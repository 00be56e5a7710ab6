/// The parent side of a one-to-many link. Child ids are kept in a set
/// owned by each parent record.
#[derive(Debug, Clone)]
pub struct HasMany {
    /// Name of the child model
    pub target: String,
}
