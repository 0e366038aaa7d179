pub mod link;
pub mod page;
pub mod session;
pub mod user;

pub use link::Entity as LinkEntity;
pub use page::Entity as PageEntity;
pub use session::Entity as SessionEntity;
pub use user::Entity as UserEntity;
