mod alerts;
mod notifications;
mod reports;
mod stats;
mod users;

pub use alerts::*;
pub use notifications::*;
pub use reports::*;
pub use stats::*;
pub use users::*;
