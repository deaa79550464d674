// --- Constants for wire limits ---

pub const DEFAULT_MAX_ITEM_SIZE: u64 = 16 * 1024 * 1024; // 16 MiB - single encoded document ceiling
pub const DEFAULT_MAX_BATCH_SIZE: u64 = 48_000_000; // aggregate message payload ceiling
pub const DEFAULT_MESSAGE_ALLOCATION_SIZE: usize = 64 * 1024; // 64 KiB - initial sink capacity per message
