//! POSIX shell quoting for rendering remux plans as a single command line

/// Quote one word for a POSIX shell.
///
/// Words made only of safe characters pass through unchanged; anything else
/// is wrapped in single quotes with embedded quotes spliced as `'"'"'`.
pub fn quote<S: AsRef<str>>(word: S) -> String {
    let word = word.as_ref();
    if word.is_empty() {
        return "''".to_string();
    }
    if word.bytes().all(|b| {
        matches!(b,
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' |
            b'_' | b'-' | b'.' | b'/' | b':' | b'@' | b'%' | b'=' | b'+' | b','
        )
    }) {
        return word.to_string();
    }

    let mut out = String::with_capacity(word.len() + 2);
    out.push('\'');
    for ch in word.chars() {
        if ch == '\'' {
            out.push_str("'\"'\"'");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}

/// Quote and join words into one command
pub fn join<I, S>(words: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| quote(w))
        .collect::<Vec<_>>()
        .join(" ")
}
