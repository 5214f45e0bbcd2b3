mod list;
mod post;

pub use list::*;
pub use post::*;
