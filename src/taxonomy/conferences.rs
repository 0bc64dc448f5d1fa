//! Conference-name catalog: file-stem to display name, plus duplicate
//! handling for venues crawled under two stems.

pub const CONFERENCE_NAMES: &[(&str, &str)] = &[
    ("nsdi", "NSDI"),
    ("sigcomm", "SIGCOMM"),
    ("cloud", "SoCC"),
    ("socc", "SoCC"),
    ("eurosys", "EuroSys"),
    ("ic2e", "IC2E"),
    ("icdcs", "ICDCS"),
    ("middleware", "Middleware"),
    ("ieeecloud", "IEEE Cloud"),
    ("ccgrid", "CCGRID"),
    ("europar", "Euro-Par"),
    ("asplos", "ASPLOS"),
    ("atc", "ATC"),
    ("osdi", "OSDI"),
];

/// Display name for a crawled conference stem; unmapped stems pass through.
pub fn display_name(stem: &str) -> &str {
    CONFERENCE_NAMES
        .iter()
        .find(|(raw, _)| raw.eq_ignore_ascii_case(stem))
        .map(|(_, name)| *name)
        .unwrap_or(stem)
}

/// SoCC data is crawled under both "socc" and "cloud"; "cloud" is canonical
/// and the "socc" files are skipped to avoid double counting.
pub fn is_duplicate_stem(stem: &str) -> bool {
    stem.eq_ignore_ascii_case("socc")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("nsdi"), "NSDI");
        assert_eq!(display_name("cloud"), "SoCC");
        assert_eq!(display_name("podc"), "podc");
    }

    #[test]
    fn test_duplicate_stem() {
        assert!(is_duplicate_stem("socc"));
        assert!(is_duplicate_stem("SoCC"));
        assert!(!is_duplicate_stem("cloud"));
    }
}
