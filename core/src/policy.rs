use serde::{Deserialize, Serialize};

/// How readily revealed numbers open their covered neighbors.
///
/// The policy is supplied by the caller on every action, so it can change
/// between moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscoveryPolicy {
    /// Numbers never open their neighbors.
    Manual,
    /// A number opens its neighbors when exactly that many are flagged.
    Easy,
    /// A number opens its neighbors when at least that many are flagged.
    Normal,
    /// A number always opens its neighbors.
    Hard,
    /// Flags are trusted: any satisfied number opens its neighbors on its own,
    /// both when revealed and when a nearby flag changes.
    Automatic,
}

impl DiscoveryPolicy {
    pub const ALL: [Self; 5] = [
        Self::Manual,
        Self::Easy,
        Self::Normal,
        Self::Hard,
        Self::Automatic,
    ];

    /// Whether activating a revealed `count` with `flagged` adjacent flags
    /// opens its covered neighbors.
    pub const fn allows_chord(self, count: u8, flagged: u8) -> bool {
        match self {
            Self::Easy => flagged == count,
            Self::Normal => flagged >= count,
            Self::Hard => true,
            Self::Manual | Self::Automatic => false,
        }
    }

    pub const fn is_automatic(self) -> bool {
        matches!(self, Self::Automatic)
    }
}

impl Default for DiscoveryPolicy {
    fn default() -> Self {
        Self::Easy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DiscoveryPolicy::*;

    #[test]
    fn chord_permissions() {
        assert!(Easy.allows_chord(2, 2));
        assert!(!Easy.allows_chord(2, 1));
        assert!(!Easy.allows_chord(2, 3));

        assert!(Normal.allows_chord(2, 2));
        assert!(Normal.allows_chord(2, 3));
        assert!(!Normal.allows_chord(2, 1));

        assert!(Hard.allows_chord(3, 0));

        for policy in [Manual, Automatic] {
            assert!(!policy.allows_chord(1, 1));
        }
    }

    #[test]
    fn only_automatic_trusts_flags() {
        let automatic: usize = DiscoveryPolicy::ALL
            .iter()
            .filter(|policy| policy.is_automatic())
            .count();
        assert_eq!(automatic, 1);
        assert_eq!(DiscoveryPolicy::default(), Easy);
    }
}
