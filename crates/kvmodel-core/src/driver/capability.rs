#[derive(Debug)]
pub struct Capability {
    /// When true, `HashSetIfAbsent` is atomic with respect to concurrent
    /// writers, so unique index entries can be claimed without a race.
    pub atomic_hash_set_if_absent: bool,

    /// When true, data outlives the driver instance.
    pub durable: bool,
}

impl Capability {
    /// In-process memory store capabilities.
    pub const MEMORY: Self = Self {
        atomic_hash_set_if_absent: true,
        durable: false,
    };

    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        atomic_hash_set_if_absent: true,
        durable: true,
    };
}
