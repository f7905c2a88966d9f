// ABOUTME: Removes markdown code-fence wrapping from model replies
// ABOUTME: Applied to every completion before it is parsed as JSON

const FENCE: &str = "```";
const JSON_TAG: &str = "json";

/// Strip a leading code fence (optionally tagged `json`) and a trailing fence,
/// then trim whitespace.
///
/// Does not check that the remainder is valid JSON. Text without fences is
/// only trimmed.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();

    let without_open = match trimmed.strip_prefix(FENCE) {
        Some(rest) => match rest.get(..JSON_TAG.len()) {
            Some(tag) if tag.eq_ignore_ascii_case(JSON_TAG) => &rest[JSON_TAG.len()..],
            _ => rest,
        },
        None => trimmed,
    };

    let without_open = without_open.trim_end();
    without_open
        .strip_suffix(FENCE)
        .unwrap_or(without_open)
        .trim()
}
