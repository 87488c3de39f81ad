use redb::TableDefinition;

/// Single table holding the cached snapshot.
/// Key: one of the fixed collection keys below
/// Value: JSON-serialized collection as bytes
pub const SNAPSHOT_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("snapshot");

/// Fixed key for the cached fighter collection.
pub const KEY_FIGHTERS: &str = "fighters";

/// Fixed key for the cached fight ledger.
pub const KEY_FIGHTS: &str = "fights";

/// Fixed key for the cached champion assignments.
pub const KEY_CHAMPIONS: &str = "champions";
