//! Jump label recognizers
//!
//! Both work on cleaned lines. A label definition is a single token ending in
//! `:`; a label use is the target of a `jump` command. A variable that happens
//! to be named like a label is never either.

use regex::Regex;
use std::sync::LazyLock;

static LABEL_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r##"^[^\s"#:@{}$][^\s"#:]*$"##).expect("label name pattern is valid"));

/// `loop:` -> `Some("loop")`
pub fn detect_defined_label(line: &str) -> Option<&str> {
    let name = line.trim().strip_suffix(':')?;
    LABEL_NAME_RE.is_match(name).then_some(name)
}

/// `jump loop always` -> `Some("loop")`; numeric targets are returned too
pub fn detect_used_label(line: &str) -> Option<&str> {
    let mut tokens = line.split_whitespace();
    if tokens.next()? != "jump" {
        return None;
    }
    let target = tokens.next()?;
    (is_numeric_target(target) || LABEL_NAME_RE.is_match(target)).then_some(target)
}

/// Legacy absolute jump target, e.g. `jump 4 always`
pub fn is_numeric_target(target: &str) -> bool {
    !target.is_empty() && target.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defined_labels() {
        assert_eq!(detect_defined_label("loop:"), Some("loop"));
        assert_eq!(detect_defined_label("  jump_0_:"), Some("jump_0_"));
        assert_eq!(detect_defined_label("set loop: 5"), None);
        assert_eq!(detect_defined_label("x:number"), None);
        assert_eq!(detect_defined_label(":"), None);
        assert_eq!(detect_defined_label("\"str\":"), None);
    }

    #[test]
    fn test_used_labels() {
        assert_eq!(detect_used_label("jump loop always"), Some("loop"));
        assert_eq!(detect_used_label("jump 4 equal x 1"), Some("4"));
        assert_eq!(detect_used_label("set jump loop"), None);
        assert_eq!(detect_used_label("print loop"), None);
        assert_eq!(detect_used_label("jump"), None);
        assert_eq!(detect_used_label("jump \"x\" always"), None);
    }

    #[test]
    fn test_numeric_targets() {
        assert!(is_numeric_target("12"));
        assert!(!is_numeric_target("1a"));
        assert!(!is_numeric_target("-1"));
        assert!(!is_numeric_target(""));
    }
}
