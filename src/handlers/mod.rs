pub mod accounts;
pub mod home;
pub mod scrape;

use serde::Serialize;

/// Plain `{"message": "..."}` body for successful actions.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
