//! String helpers for message formatting.

/// Capitalize the first character of every word.
///
/// Used to turn a world flag such as `"tonberry"` into `"Tonberry"` for the
/// notification text. Any character other than a letter, digit or `_` ends a
/// word, so `"hades-realm"` becomes `"Hades-Realm"`. The rest of each word is
/// left as-is and separators are kept.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(title_case("tonberry"), "Tonberry");
/// assert_eq!(title_case("hades-realm"), "Hades-Realm");
/// ```
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if !(c.is_alphanumeric() || c == '_') {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.push(c);
        }
    }
    out
}
