pub fn prettyprint_usize(x: usize) -> String {
    let num = format!("{}", x);
    let mut result = String::new();
    let mut i = num.len();
    for c in num.chars() {
        result.push(c);
        i -= 1;
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
    }
    result
}

/// Formats a byte count the way the original data-prep scripts did: whole bytes and kilobytes
/// below a megabyte, otherwise megabytes with two decimals.
pub fn prettyprint_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} bytes", bytes);
    }
    let kb = bytes as f64 / 1024.0;
    if kb < 1024.0 {
        return format!("{:.2} KB", kb);
    }
    format!("{:.2} MB", kb / 1024.0)
}

pub fn basename<I: AsRef<std::path::Path>>(path: I) -> String {
    path.as_ref()
        .file_name()
        .map(|x| x.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        for (input, expected) in [
            (0, "0"),
            (999, "999"),
            (1000, "1,000"),
            (5000, "5,000"),
            (1234567, "1,234,567"),
        ] {
            assert_eq!(prettyprint_usize(input), expected);
        }
    }

    #[test]
    fn byte_sizes() {
        assert_eq!(prettyprint_bytes(12), "12 bytes");
        assert_eq!(prettyprint_bytes(2048), "2.00 KB");
        assert_eq!(prettyprint_bytes(3 * 1024 * 1024 + 512 * 1024), "3.50 MB");
    }

    #[test]
    fn basename_of_paths() {
        assert_eq!(basename("data/travis-buildings.json"), "travis-buildings.json");
        assert_eq!(basename("/"), "");
    }
}
