//! Player display names.

use serde::{Deserialize, Serialize};

/// Name used when the player leaves the field blank.
pub const DEFAULT_PLAYER_NAME: &str = "High Roller";

/// Longest name kept, in characters.
pub const MAX_PLAYER_NAME_CHARS: usize = 12;

/// A trimmed, non-empty, length-capped display name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerName(String);

impl PlayerName {
    /// Trim, fall back to the default when empty, and cap the length.
    ///
    /// ```
    /// use cup_shuffle::session::PlayerName;
    ///
    /// assert_eq!(PlayerName::normalize("  Mina  ").as_str(), "Mina");
    /// assert_eq!(PlayerName::normalize("   ").as_str(), "High Roller");
    /// assert_eq!(PlayerName::normalize("abcdefghijklmnop").as_str(), "abcdefghijkl");
    /// ```
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();
        let name = if trimmed.is_empty() {
            DEFAULT_PLAYER_NAME
        } else {
            trimmed
        };
        Self(name.chars().take(MAX_PLAYER_NAME_CHARS).collect())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multibyte_truncation() {
        let name = PlayerName::normalize("가나다라마바사아자차카타파하");
        assert_eq!(name.as_str().chars().count(), 12);
        assert_eq!(name.as_str(), "가나다라마바사아자차카타");
    }

    #[test]
    fn test_truncation_can_leave_trailing_space() {
        // Trimming happens before the cap, as a player would type it.
        let name = PlayerName::normalize("abcdefghijk lmn");
        assert_eq!(name.as_str(), "abcdefghijk ");
    }

    #[test]
    fn test_empty_uses_default() {
        assert_eq!(PlayerName::normalize("").as_str(), DEFAULT_PLAYER_NAME);
        assert_eq!(PlayerName::normalize("\t\n").to_string(), DEFAULT_PLAYER_NAME);
    }
}
