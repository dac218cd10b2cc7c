/// Trim and lowercase. Applied to both the query and every matched field.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Rust CLI \n"), "rust cli");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn normalize_folds_non_ascii_case() {
        assert_eq!(normalize("ÉCOLE"), "école");
    }
}
