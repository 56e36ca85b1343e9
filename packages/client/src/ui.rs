//! UI utilities for the client.

use std::io::Write;

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt(user_name: &str) {
    print!("{}> ", user_name);
    std::io::stdout().flush().ok();
}
