pub use super::companies::Entity as Companies;
pub use super::jobs::Entity as Jobs;
pub use super::users::Entity as Users;
