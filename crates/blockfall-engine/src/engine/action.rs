use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A discrete input to the game reducer.
///
/// Player input and the fall timer are both turned into actions before they
/// reach [`GameState::update`](crate::GameState::update).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Shift one column left.
    Left,
    /// Shift one column right.
    Right,
    /// Soft drop: fall one row, locking if the block has landed.
    Down,
    /// Rotate 90° clockwise in place.
    Rotate,
    /// Timer step; behaves like `Down`.
    Tick,
    /// Hard drop: fall to the resting row and lock at once.
    Drop,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown action {token:?}")]
pub struct ParseActionError {
    token: String,
}

impl ParseActionError {
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl Action {
    pub const ALL: [Self; 6] = [
        Self::Left,
        Self::Right,
        Self::Down,
        Self::Rotate,
        Self::Tick,
        Self::Drop,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Down => "down",
            Self::Rotate => "rotate",
            Self::Tick => "tick",
            Self::Drop => "drop",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseActionError {
                token: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_actions() {
        for action in Action::ALL {
            assert_eq!(action.to_string().parse::<Action>(), Ok(action));
        }
        assert_eq!("DROP".parse::<Action>(), Ok(Action::Drop));
    }

    #[test]
    fn test_parse_unknown_action() {
        let err = "hold".parse::<Action>().unwrap_err();
        assert_eq!(err.token(), "hold");
        assert_eq!(err.to_string(), "unknown action \"hold\"");
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Action::Rotate).unwrap(), "\"rotate\"");
        assert_eq!(
            serde_json::from_str::<Vec<Action>>("[\"tick\",\"left\"]").unwrap(),
            vec![Action::Tick, Action::Left]
        );
    }
}
