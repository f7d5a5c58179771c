//! Line normalizer
//!
//! Comment removal and tokenization are both quote-aware: nothing inside a
//! double-quoted string literal is ever treated as a comment or a separator.

/// Strip `// ...`, `# ...` and `/* ... */` comments outside string literals
///
/// An unterminated `/*` removes the rest of the line.
pub fn remove_comments(line: &str) -> String {
    let mut output = String::with_capacity(line.len());
    let mut in_string = false;
    let mut chars = line.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        if in_string {
            if c == '"' {
                in_string = false;
            }
            output.push(c);
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                output.push(c);
            }
            '#' => break,
            '/' if line[index + 1..].starts_with('/') => break,
            '/' if line[index + 1..].starts_with('*') => {
                chars.next();
                match line[index + 2..].find("*/") {
                    Some(end) => {
                        let resume = index + 2 + end + 2;
                        while chars.peek().is_some_and(|(i, _)| *i < resume) {
                            chars.next();
                        }
                    }
                    None => break,
                }
            }
            _ => output.push(c),
        }
    }
    output
}

/// Trim spaces and tabs on both ends
pub fn remove_trailing_spaces(line: &str) -> &str {
    line.trim_matches(|c| c == ' ' || c == '\t')
}

/// Comments removed, then padding trimmed
pub fn clean_line(line: &str) -> String {
    remove_trailing_spaces(&remove_comments(line)).to_string()
}

/// Split on whitespace runs outside string literals; quotes stay in the token
pub fn split_into_arguments(line: &str) -> Vec<String> {
    let mut arguments = Vec::new();
    let mut current = String::new();
    let mut in_string = false;

    for c in line.chars() {
        if c == '"' {
            in_string = !in_string;
            current.push(c);
        } else if c.is_whitespace() && !in_string {
            if !current.is_empty() {
                arguments.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        arguments.push(current);
    }
    arguments
}
