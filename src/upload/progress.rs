use crate::upload::ProgressSink;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

const TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta}) {msg}";

/// Byte progress bar for uploading `name`.
///
/// # Panics
///
/// Panics if the progress bar template string is invalid (which should not happen with the hardcoded template).
#[must_use]
pub fn progress_bar(file_size: u64, name: &str) -> ProgressBar {
    let pb = ProgressBar::new(file_size);
    #[allow(clippy::expect_used)]
    pb.set_style(
        ProgressStyle::default_bar()
            .template(TEMPLATE)
            .expect("Failed to set progress bar template")
            .progress_chars("#>-"),
    );
    pb.set_message(name.to_string());
    pb
}

/// Sink that moves `pb` to the reported byte count
#[must_use]
pub fn progress_sink(pb: &ProgressBar) -> ProgressSink {
    let pb = pb.clone();
    Arc::new(move |uploaded| pb.set_position(uploaded))
}
