//! CLI command implementations.

pub mod cart;
pub mod catalog;

/// Parse a `name=value` option argument.
///
/// # Errors
///
/// Returns a message if there is no `=` or the name is blank.
pub fn parse_option(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("option name is empty in '{raw}'"));
    }
    Ok((name.to_owned(), value.trim().to_owned()))
}
