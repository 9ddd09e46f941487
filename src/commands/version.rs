//! Command: print version information.

/// Version embedded at build time, falling back to the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("LINK_SKILLS_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the link-skills version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("link-skills {}", version());
}
