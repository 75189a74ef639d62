pub mod config;
pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Typed request body from `--input <file>` or, failing that, piped stdin.
pub fn read_request<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    match path {
        Some(p) => file::read_structured(p).map(Some),
        None => stdin::read_stdin(),
    }
}
