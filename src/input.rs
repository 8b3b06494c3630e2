use std::io::{self, BufRead, Write};
use termion::event::Key;
use termion::input::TermRead;
use termion::raw::IntoRawMode;

/// Prompts for and reads lines from the terminal.
///
/// On a TTY the line is edited in raw mode; otherwise stdin is read one
/// buffered line at a time.
pub struct Prompter {
    prompt: String,
    interactive: bool,
}

impl Prompter {
    pub fn new(prompt: impl Into<String>) -> Self {
        Prompter {
            prompt: prompt.into(),
            interactive: termion::is_tty(&io::stdin()),
        }
    }

    /// Returns the next line, or `None` once input is exhausted.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        print!("{}", self.prompt);
        io::stdout().flush()?;

        if self.interactive {
            // Enter raw mode to handle input character by character
            let mut stdout = io::stdout().into_raw_mode()?;
            edit_line(io::stdin().keys(), &mut stdout)
        } else {
            read_buffered(&mut io::stdin().lock())
        }
    }
}

/// Reads one line from a buffered reader, without its line ending.
pub fn read_buffered<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(len);
    Ok(Some(line))
}

/// Minimal line editor over a stream of key presses.
///
/// Ctrl-C discards the line (an empty line is returned so the caller
/// re-prompts); Ctrl-D on an empty line ends input.
pub fn edit_line<K, W>(keys: K, out: &mut W) -> io::Result<Option<String>>
where
    K: IntoIterator<Item = io::Result<Key>>,
    W: Write,
{
    let mut buffer = String::new();

    for key in keys {
        match key? {
            Key::Ctrl('c') => {
                write!(out, "\r\n")?;
                return Ok(Some(String::new()));
            }
            Key::Ctrl('d') => {
                if buffer.is_empty() {
                    write!(out, "\r\n")?;
                    return Ok(None);
                }
            }
            Key::Char('\n') | Key::Char('\r') => {
                write!(out, "\r\n")?;
                return Ok(Some(buffer));
            }
            Key::Backspace => {
                if buffer.pop().is_some() {
                    // Move cursor back, erase char with space, move back again
                    write!(out, "\x08 \x08")?;
                }
            }
            Key::Char(c) => {
                buffer.push(c);
                write!(out, "{}", c)?;
            }
            _ => continue,
        }
        out.flush()?;
    }

    Ok(if buffer.is_empty() { None } else { Some(buffer) })
}
