mod alerts;
mod notifications;
mod reports;

pub use alerts::*;
pub use notifications::*;
pub use reports::*;

use crate::{Database, ReferenceDb};
#[cfg(feature = "mongodb")]
use crate::MongoDb;

pub trait AbstractDatabase:
    Sync
    + Send
    + alerts::AbstractAlerts
    + notifications::AbstractNotifications
    + reports::AbstractReports
{
}

impl AbstractDatabase for ReferenceDb {}
#[cfg(feature = "mongodb")]
impl AbstractDatabase for MongoDb {}

impl std::ops::Deref for Database {
    type Target = dyn AbstractDatabase;

    fn deref(&self) -> &Self::Target {
        match &self {
            Database::Reference(dummy) => dummy,
            #[cfg(feature = "mongodb")]
            Database::MongoDb(mongo, fallback, breaker) => {
                if breaker.is_tripped() {
                    fallback
                } else {
                    mongo
                }
            }
        }
    }
}
