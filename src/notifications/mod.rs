// Notification records and the text that goes into them

pub mod types;
pub mod composer;
pub mod builder;

pub use types::{
    NotificationKind, NotificationOption, NotificationRecord, Severity, ValidationOutcome,
    NOTIFICATION_TITLE, VALIDATOR_NAME,
};
pub use composer::{compose_list, compose_save_gate, compose_single, TextMode, NO_ACCESS_CLAUSE};
pub use builder::NotificationBuilder;
