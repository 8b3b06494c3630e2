/// Splits an input string into a vector of arguments.
///
/// This tokenizer handles:
/// - Single quotes (`'...'`): Preserves literal contents, backslashes included.
/// - Double quotes (`"..."`): Preserves contents; a backslash only escapes `"` or `\`.
/// - Unquoted text: Split on spaces, a backslash escapes the next character.
///
/// Quoted and unquoted segments that touch are joined into one argument.
/// An unterminated quote runs to the end of the line, and a trailing
/// backslash outside quotes is kept literally.
///
/// # Example
/// ```
/// use shell_repl::tokenize;
///
/// let args = tokenize("echo 'hello world'");
/// assert_eq!(args, vec!["echo", "hello world"]);
/// ```
pub fn tokenize(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut arg = String::new();
    let mut in_single_quotes = false;
    let mut in_double_quotes = false;
    let mut escaped_next = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if escaped_next {
            arg.push(c);
            escaped_next = false;
            continue;
        }

        match c {
            '\\' if in_single_quotes => arg.push(c),
            '\\' if in_double_quotes => match chars.peek() {
                Some('"') | Some('\\') => escaped_next = true,
                _ => arg.push(c),
            },
            '\\' => escaped_next = true,
            '\'' if !in_double_quotes => in_single_quotes = !in_single_quotes,
            '"' if !in_single_quotes => in_double_quotes = !in_double_quotes,
            ' ' if !in_single_quotes && !in_double_quotes => {
                if !arg.is_empty() {
                    args.push(std::mem::take(&mut arg));
                }
            }
            _ => arg.push(c),
        }
    }

    if escaped_next {
        arg.push('\\');
    }
    if !arg.is_empty() {
        args.push(arg);
    }
    args
}

/// Splits a line into its raw command field and the raw argument text.
///
/// The command name is the first space-delimited field, taken before any
/// quote processing. The argument text is everything after the separating
/// spaces, left untouched so each builtin can tokenize it itself.
///
/// Returns `None` for an empty or all-space line.
pub fn split_command(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start_matches(' ');
    if line.is_empty() {
        return None;
    }
    match line.split_once(' ') {
        Some((command, rest)) => Some((command, rest.trim_start_matches(' '))),
        None => Some((line, "")),
    }
}
