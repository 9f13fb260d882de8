use std::fs;
use std::io;
use std::path::Path;

/// Read a text file to preload the content field. Windows line endings are
/// normalized so the editor only ever sees `\n`.
pub fn load_content(path: &Path) -> io::Result<String> {
    let raw = fs::read_to_string(path)?;
    Ok(raw.replace("\r\n", "\n"))
}
