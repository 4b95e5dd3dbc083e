//! Best-effort description lookup in package definition text.
//!
//! Formulae and casks declare `desc "..."` on a line of their own. This is a
//! line scan for that marker, not a Ruby parser.

/// Marker preceding the description value.
const DESC_MARKER: &str = "desc \"";

/// Returned when no line yields a description.
pub const MISSING_DESCRIPTION: &str = "Description was not found.";

/// Returns the text between the first `desc "` marker and the next `"` on the
/// same line, scanning lines in order.
///
/// A marker line without a closing quote is skipped. Falls back to
/// [`MISSING_DESCRIPTION`].
#[must_use]
pub fn extract_description(content: &str) -> String {
    content
        .lines()
        .find_map(|line| {
            let (_, rest) = line.split_once(DESC_MARKER)?;
            let (value, _) = rest.split_once('"')?;
            Some(value.to_string())
        })
        .unwrap_or_else(|| MISSING_DESCRIPTION.to_string())
}
