//! Message formatting utilities for client display.

use hohoho_server::infrastructure::dto::websocket::{ButtonDto, NotificationMessage};

const SEPARATOR: &str = "------------------------------------------------------------";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a notification from the bot
    ///
    /// Pinned messages get a 📌 marker; buttons are numbered from 1 so they can
    /// be pressed with `:N`.
    pub fn format_notification(message: &NotificationMessage) -> String {
        let mut output = String::from("\n\n");
        if message.pinned {
            output.push_str("📌 ");
        }
        output.push_str(&message.text);
        output.push('\n');

        if !message.buttons.is_empty() {
            output.push_str(&Self::format_buttons(&message.buttons));
        }

        output.push_str(SEPARATOR);
        output.push('\n');
        output
    }

    /// Format the numbered button list
    pub fn format_buttons(buttons: &[ButtonDto]) -> String {
        let mut output = String::new();
        for (index, button) in buttons.iter().enumerate() {
            output.push_str(&format!("  [{}] {}\n", index + 1, button.label));
        }
        output.push_str("(type :N to press a button)\n");
        output
    }

    /// Format the notice for a button number that is not on screen
    pub fn format_unknown_button(number: usize, available: usize) -> String {
        if available == 0 {
            format!("\nThere is no button {} to press.\n", number)
        } else {
            format!(
                "\nThere is no button {} to press. Choose 1 to {}.\n",
                number, available
            )
        }
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\nReceived binary data: {} bytes\n", byte_count)
    }

    /// Format a raw text message (fallback)
    pub fn format_raw_message(text: &str) -> String {
        format!("\nReceived: {}\n", text)
    }
}
