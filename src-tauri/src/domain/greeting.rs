//! Usage: Demo greeting returned by the `greet` command.

pub fn greet(name: &str) -> String {
    format!("Hello, {name}! You've been greeted from Rust!")
}
