// src/prompt.rs
use std::io::{self, BufRead, Write};

/// Answers accepted as "yes". The first two keep the Spanish `s/n` prompt usable.
const AFFIRMATIVE: [&str; 5] = ["s", "si", "sí", "y", "yes"];

/// Print `question`, read one line and return it trimmed.
///
/// Returns `None` at end of input.
///
/// # Errors
/// Propagates I/O errors from either stream.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<Option<String>> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    AFFIRMATIVE.contains(&answer.as_str())
}

/// Yes/no question. End of input counts as "no".
///
/// # Errors
/// Propagates I/O errors from either stream.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<bool> {
    Ok(ask(input, output, question)?.is_some_and(|a| is_affirmative(&a)))
}
