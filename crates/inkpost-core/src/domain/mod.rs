//! Domain entities - the core business objects.

mod category;
mod comment;
mod post;
mod user;

pub use category::Category;
pub use comment::Comment;
pub use post::Post;
pub use user::User;
