mod blog;
mod health_check;
mod home;
mod newsletter;
mod posts;

pub use blog::*;
pub use health_check::*;
pub use home::*;
pub use newsletter::*;
pub use posts::*;
