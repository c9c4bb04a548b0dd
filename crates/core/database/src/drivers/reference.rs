use std::collections::HashMap;
use std::sync::Arc;

use futures::lock::Mutex;

use beacon_models::v0::{Alert, NotificationRecord, Report};

database_derived!(
    /// Reference implementation
    #[derive(Default)]
    pub struct ReferenceDb {
        pub reports: Arc<Mutex<HashMap<String, Report>>>,
        /// Live alerts, keyed by target id
        pub alerts: Arc<Mutex<HashMap<String, Alert>>>,
        pub notifications: Arc<Mutex<HashMap<String, NotificationRecord>>>,
    }
);
