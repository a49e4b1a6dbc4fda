//! File name helpers used by rename.

use filedesk_entity::file::model::extension_of;

/// Apply a rename, keeping the current extension when `new_name` has none.
///
/// `("old.pdf", "report")` gives `report.pdf`; `("old.pdf", "report.txt")`
/// keeps `report.txt` as typed.
pub fn with_preserved_extension(current: &str, new_name: &str) -> String {
    if extension_of(new_name).is_some() {
        return new_name.to_string();
    }
    match extension_of(current) {
        Some(ext) => format!("{new_name}.{ext}"),
        None => new_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_preserved_when_missing() {
        assert_eq!(with_preserved_extension("old.pdf", "report"), "report.pdf");
        assert_eq!(with_preserved_extension("foto.JPG", "capa"), "capa.JPG");
    }

    #[test]
    fn test_explicit_extension_wins() {
        assert_eq!(with_preserved_extension("old.pdf", "report.docx"), "report.docx");
    }

    #[test]
    fn test_no_extension_anywhere() {
        assert_eq!(with_preserved_extension("LICENSE", "NOTICE"), "NOTICE");
    }
}
