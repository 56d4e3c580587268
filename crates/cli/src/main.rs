//! Command-line entry point for `skillsync`.
//!
//! All behavior lives in the library so integration tests can reach it.

fn main() -> std::process::ExitCode {
    skillsync::run()
}
