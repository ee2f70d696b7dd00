//! Progress indicators for long-running operations
//!
//! Spinners draw on stderr and stay hidden when stderr is not a terminal,
//! so piped query output is never interleaved with them.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner for indeterminate operations
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) =
        ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_spinner() {
        let pb = create_spinner("Loading taxonomy tables");
        assert!(!pb.is_finished());
        assert_eq!(pb.message(), "Loading taxonomy tables");
        pb.finish_and_clear();
    }
}
