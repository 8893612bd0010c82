use serde::Serialize;

/// Colour a notification toast is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationColor {
    /// A mutation was accepted.
    Green,
    /// The server (or local validation) rejected a request.
    Red,
    /// Neutral confirmation, used after deletion.
    Black,
}

impl NotificationColor {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationColor::Green => "green",
            NotificationColor::Red => "red",
            NotificationColor::Black => "black",
        }
    }
}

/// A message for the panel's notification toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub color: NotificationColor,
}

impl Notification {
    pub fn new(message: impl Into<String>, color: NotificationColor) -> Self {
        Self {
            message: message.into(),
            color,
        }
    }

    pub fn green(message: impl Into<String>) -> Self {
        Self::new(message, NotificationColor::Green)
    }

    pub fn red(message: impl Into<String>) -> Self {
        Self::new(message, NotificationColor::Red)
    }

    pub fn black(message: impl Into<String>) -> Self {
        Self::new(message, NotificationColor::Black)
    }
}
