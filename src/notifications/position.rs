// SPDX-License-Identifier: MPL-2.0
//! Screen anchors for notification containers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the six screen locations a container occupies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    Top,
    #[default]
    TopRight,
    BottomLeft,
    Bottom,
    BottomRight,
}

/// Direction a dismissed toast slides away towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDirection {
    Left,
    Right,
    Up,
    Down,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::TopLeft,
        Position::Top,
        Position::TopRight,
        Position::BottomLeft,
        Position::Bottom,
        Position::BottomRight,
    ];

    /// Returns the kebab-case name (`"top-right"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::Top => "top",
            Position::TopRight => "top-right",
            Position::BottomLeft => "bottom-left",
            Position::Bottom => "bottom",
            Position::BottomRight => "bottom-right",
        }
    }

    #[must_use]
    pub fn is_top(self) -> bool {
        matches!(self, Position::TopLeft | Position::Top | Position::TopRight)
    }

    /// Returns whether the anchor is centered on its edge rather than in a corner.
    #[must_use]
    pub fn is_centered(self) -> bool {
        matches!(self, Position::Top | Position::Bottom)
    }

    /// Corners slide out sideways; centered anchors slide back off their edge.
    #[must_use]
    pub fn exit_direction(self) -> ExitDirection {
        match self {
            Position::TopLeft | Position::BottomLeft => ExitDirection::Left,
            Position::TopRight | Position::BottomRight => ExitDirection::Right,
            Position::Top => ExitDirection::Up,
            Position::Bottom => ExitDirection::Down,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown notification position: {0:?}")]
pub struct UnknownPosition(pub String);

impl FromStr for Position {
    type Err = UnknownPosition;

    /// Accepts kebab, snake and camel case, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "topleft" => Ok(Position::TopLeft),
            "top" => Ok(Position::Top),
            "topright" => Ok(Position::TopRight),
            "bottomleft" => Ok(Position::BottomLeft),
            "bottom" => Ok(Position::Bottom),
            "bottomright" => Ok(Position::BottomRight),
            _ => Err(UnknownPosition(s.to_string())),
        }
    }
}

/// A position as supplied by a caller: either already typed or a name to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionSpec {
    Anchor(Position),
    Named(String),
}

impl PositionSpec {
    /// Resolves to a concrete anchor, substituting `fallback` for unknown names.
    pub fn resolve(&self, fallback: Position) -> Position {
        match self {
            PositionSpec::Anchor(position) => *position,
            PositionSpec::Named(name) => name.parse().unwrap_or_else(|err: UnknownPosition| {
                tracing::warn!("{err}, using {fallback}");
                fallback
            }),
        }
    }
}

impl From<Position> for PositionSpec {
    fn from(position: Position) -> Self {
        PositionSpec::Anchor(position)
    }
}

impl From<&str> for PositionSpec {
    fn from(name: &str) -> Self {
        PositionSpec::Named(name.to_string())
    }
}

impl From<String> for PositionSpec {
    fn from(name: String) -> Self {
        PositionSpec::Named(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_kebab_name() {
        for position in Position::ALL {
            assert_eq!(position.as_str().parse::<Position>(), Ok(position));
        }
    }

    #[test]
    fn parsing_ignores_case_and_separators() {
        assert_eq!("TopRight".parse::<Position>(), Ok(Position::TopRight));
        assert_eq!("bottom_left".parse::<Position>(), Ok(Position::BottomLeft));
        assert_eq!(" Bottom ".parse::<Position>(), Ok(Position::Bottom));
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!("center".parse::<Position>().is_err());
        assert!("".parse::<Position>().is_err());
    }

    #[test]
    fn named_spec_falls_back_on_unknown_name() {
        let spec = PositionSpec::from("sideways");
        assert_eq!(spec.resolve(Position::Bottom), Position::Bottom);

        let spec = PositionSpec::from("top-left");
        assert_eq!(spec.resolve(Position::Bottom), Position::TopLeft);
    }

    #[test]
    fn exit_direction_follows_anchor_side() {
        assert_eq!(Position::TopLeft.exit_direction(), ExitDirection::Left);
        assert_eq!(Position::BottomRight.exit_direction(), ExitDirection::Right);
        assert_eq!(Position::Top.exit_direction(), ExitDirection::Up);
        assert_eq!(Position::Bottom.exit_direction(), ExitDirection::Down);
    }

    #[test]
    fn serde_uses_kebab_case() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            position: Position,
        }
        let encoded = toml::to_string(&Wrapper {
            position: Position::BottomRight,
        })
        .expect("serialize");
        assert!(encoded.contains("bottom-right"));
    }
}
