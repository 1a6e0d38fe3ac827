use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\-]+").expect("valid non-word pattern"));
static DASH_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\-\-+").expect("valid dash pattern"));

/// Turns an arbitrary string into a lowercase, hyphenated path segment
///
/// ```
/// use campaign_qr_api::url_generator::slug;
///
/// assert_eq!(slug("Hello World!?!"), "hello-world");
/// ```
pub fn slug(value: &str) -> String {
    let lowered = value.to_lowercase();
    let dashed = WHITESPACE.replace_all(&lowered, "-");
    let stripped = NON_WORD.replace_all(&dashed, "");
    let collapsed = DASH_RUNS.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}
