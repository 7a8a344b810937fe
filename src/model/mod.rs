mod entry;

pub use entry::{display_name, size_then_name, sort_children, Entry, EntryKind};
