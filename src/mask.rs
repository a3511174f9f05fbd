use regex::Regex;

use crate::error::EvalError;

/// Anchored, case-insensitive wildcard predicate over entry names.
///
/// `*` matches zero or more characters and `?` matches exactly one. Every
/// other character is a literal — regex metacharacters in the pattern are
/// escaped before translation, so names like `report(final).txt` behave as
/// written.
///
/// The empty pattern is handled one level up: the config layer treats it as
/// "no mask" and never compiles it. Compiled here, `""` would only match the
/// empty name.
#[derive(Debug, Clone)]
pub struct WildcardMask {
    pattern: String,
    regex: Regex,
}

impl WildcardMask {
    /// Translate a wildcard pattern into a full-match predicate.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::InvalidMask`] if the translated pattern fails to
    /// compile. Unreachable for well-formed glob syntax — every metacharacter
    /// is escaped before translation — but propagated rather than panicking.
    pub fn compile(pattern: &str) -> Result<Self, EvalError> {
        let mut translated = String::with_capacity(pattern.len() + 8);
        let mut buf = [0u8; 4];
        for ch in pattern.chars() {
            match ch {
                '*' => translated.push_str(".*"),
                '?' => translated.push('.'),
                _ => translated.push_str(&regex::escape(ch.encode_utf8(&mut buf))),
            }
        }

        let anchored = format!("(?i)^{translated}$");
        let regex =
            Regex::new(&anchored).map_err(|e| EvalError::InvalidMask(e.to_string()))?;

        Ok(Self {
            pattern: pattern.to_owned(),
            regex,
        })
    }

    /// The original wildcard pattern, as supplied.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns `true` if `name` matches the whole pattern, ignoring case.
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_matches_any_run() {
        let mask = WildcardMask::compile("*.txt").unwrap();
        assert!(mask.matches("a.txt"));
        assert!(!mask.matches("a.txt.bak"));
    }

    #[test]
    fn match_is_case_insensitive() {
        let mask = WildcardMask::compile("*.txt").unwrap();
        assert!(mask.matches("A.TXT"));
        assert!(mask.matches("Readme.Txt"));
    }

    #[test]
    fn question_mark_matches_exactly_one() {
        let mask = WildcardMask::compile("file?.log").unwrap();
        assert!(mask.matches("file1.log"));
        assert!(!mask.matches("file10.log"));
        assert!(!mask.matches("file.log"));
    }

    #[test]
    fn lone_star_matches_everything() {
        let mask = WildcardMask::compile("*").unwrap();
        assert!(mask.matches(""));
        assert!(mask.matches("anything at all.bin"));
    }

    #[test]
    fn metacharacters_are_literal() {
        let mask = WildcardMask::compile("report (final)+v2.txt").unwrap();
        assert!(mask.matches("report (final)+v2.txt"));
        assert!(!mask.matches("report (final)Xv2.txt"));
    }

    #[test]
    fn match_is_anchored() {
        let mask = WildcardMask::compile("data").unwrap();
        assert!(mask.matches("data"));
        assert!(!mask.matches("mydata"));
        assert!(!mask.matches("database"));
    }
}
