auto_derived!(
    /// Reviewer resolved from the external user directory
    pub struct User {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Display name
        pub name: String,
        /// Email address notifications may be sent to
        pub email: String,
        /// Moderation permission level
        pub permission_level: u32,
    }
);
