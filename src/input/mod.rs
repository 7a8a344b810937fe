mod keyboard;

pub use keyboard::{key_matches, map_key_to_intent, Intent, ViewMode, PAGE_SIZE};
