use std::path::Path;

/// File name the path token is written to when no other is given.
pub const DEFAULT_TOKEN_FILE: &str = "path_token.txt";

pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("a/b.PNG"), "png"));
        assert!(has_extension(Path::new("b.dct"), "dct"));
        assert!(!has_extension(Path::new("b.png.dct"), "png"));
        assert!(!has_extension(Path::new("b"), "png"));
    }
}
