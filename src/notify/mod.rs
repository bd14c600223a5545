//! Subscriber matching and alert delivery.

mod dispatcher;
mod format;
mod log;
mod matcher;
pub mod telegram;
mod traits;

pub use dispatcher::{DispatchFailure, DispatchReport, NotifyEngine};
pub use format::format_alert;
pub use log::LogNotifier;
pub use matcher::{matches, Alert, AlertBatch};
pub use telegram::TelegramNotifier;
pub use traits::{Notifier, NotifyError};
