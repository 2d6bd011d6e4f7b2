//! Version command implementation

use crate::cli::Output;

/// Execute the version command
pub fn execute(output: &Output) {
    output.header(&format!(
        "{} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ));
    output.key_value("Description:", env!("CARGO_PKG_DESCRIPTION"), false);
    output.key_value("License:", env!("CARGO_PKG_LICENSE"), false);
    output.key_value("Target:", std::env::consts::ARCH, false);
    output.key_value(
        "Profile:",
        if cfg!(debug_assertions) { "debug" } else { "release" },
        false,
    );
    output.key_value("CPU cores:", &num_cpus::get().to_string(), false);
    output.verbose(&format!("Default minimum threshold: {}", crate::reducer::MIN_THRESHOLD));
}
