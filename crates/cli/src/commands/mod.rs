//! CLI Commands

pub mod feedback;
pub mod load;
pub mod relay;
pub mod routes;
pub mod store;
pub mod validate;

pub use self::feedback::FeedbackCommand;
pub use self::load::LoadCommand;
pub use self::relay::RelayCommand;
pub use self::routes::RoutesCommand;
pub use self::store::StoreCommand;
pub use self::validate::ValidateCommand;
