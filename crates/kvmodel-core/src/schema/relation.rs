mod belongs_to;
pub use belongs_to::{BelongsTo, BelongsToOptions};

mod has_many;
pub use has_many::HasMany;
