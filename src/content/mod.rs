mod entry;
mod normalize;
mod rich_text;

pub use entry::{Asset, AssetIndex, Entry, EntryCollection, Includes, Sys};
pub use normalize::{normalize_entry, repair_image_url, CONTENT_ERROR, NO_CONTENT};
pub use rich_text::{render_rich_text, RichTextError};
