//! Validation and escaping for untrusted search input.

/// Platforms a search filter may match on. The empty string is a legal value:
/// catalog rows created before a platform was known carry it.
pub const ALLOWED_PLATFORMS: [&str; 3] = ["ios", "android", ""];

/// A usable game name is any present, non-empty string.
pub fn is_valid_game_name(name: Option<&str>) -> bool {
    matches!(name, Some(s) if !s.is_empty())
}

/// True iff the platform is present and one of [`ALLOWED_PLATFORMS`].
pub fn is_valid_platform(platform: Option<&str>) -> bool {
    matches!(platform, Some(s) if ALLOWED_PLATFORMS.contains(&s))
}

/// Trim a game name and escape LIKE wildcards (`%`, `_`) and the escape
/// character itself so the result can be embedded in a contains-pattern
/// without acting as a pattern.
pub fn sanitize_game_name(name: &str) -> String {
    let trimmed = name.trim();
    let mut out = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_must_be_present_and_non_empty() {
        assert!(is_valid_game_name(Some("Clash of Clans")));
        assert!(is_valid_game_name(Some(" ")));
        assert!(!is_valid_game_name(Some("")));
        assert!(!is_valid_game_name(None));
    }

    #[test]
    fn platform_must_be_in_the_allowed_set() {
        assert!(is_valid_platform(Some("ios")));
        assert!(is_valid_platform(Some("android")));
        assert!(is_valid_platform(Some("")));
        assert!(!is_valid_platform(Some("PS5")));
        assert!(!is_valid_platform(Some("Android")));
        assert!(!is_valid_platform(None));
    }

    #[test]
    fn escapes_every_wildcard_occurrence() {
        assert_eq!(
            sanitize_game_name("50% Off_Game\\"),
            "50\\% Off\\_Game\\\\"
        );
    }

    #[test]
    fn trims_surrounding_whitespace_first() {
        assert_eq!(sanitize_game_name("  mario  "), "mario");
        assert_eq!(sanitize_game_name(" 100%_done "), "100\\%\\_done");
    }

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(sanitize_game_name("Subway Surfers"), "Subway Surfers");
    }
}
