use std::path::Path;

/// Keep the last `max_chars` characters of a path for status lines
pub fn shorten_path(path: &Path, max_chars: usize) -> String {
    let text = path.to_string_lossy();
    let count = text.chars().count();
    if count <= max_chars {
        return text.into_owned();
    }
    text.chars().skip(count - max_chars).collect()
}

/// Join path labels for display, `/` for the top level
pub fn display_trail(labels: &[String]) -> String {
    if labels.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", labels.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_path_unchanged() {
        assert_eq!(shorten_path(Path::new("/tmp/a"), 40), "/tmp/a");
    }

    #[test]
    fn test_long_path_keeps_tail() {
        let long = "/very/long/path/that/goes/on/and/on/forever/file.txt";
        let short = shorten_path(Path::new(long), 12);
        assert_eq!(short, "ver/file.txt");
        assert_eq!(short.chars().count(), 12);
    }

    #[test]
    fn test_multibyte_paths() {
        let short = shorten_path(Path::new("/данные/файл"), 4);
        assert_eq!(short, "файл");
    }

    #[test]
    fn test_display_trail() {
        assert_eq!(display_trail(&[]), "/");
        assert_eq!(
            display_trail(&["src".to_string(), "util".to_string()]),
            "/src/util"
        );
    }
}
