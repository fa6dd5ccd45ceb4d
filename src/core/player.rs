//! Players and roster construction.
//!
//! ## PlayerId
//!
//! Stable 1-based identifier. Seat order equals id order.
//!
//! ## Roster
//!
//! Built from a requested player count. Requests are clamped to
//! `MIN_PLAYERS..=MAX_PLAYERS`; a request for one player yields a human in
//! seat 1 and an automated opponent in seat 2.

use serde::{Deserialize, Serialize};

use crate::board::Square;

/// Smallest roster a match is played with.
pub const MIN_PLAYERS: usize = 2;

/// Largest roster a match is played with.
pub const MAX_PLAYERS: usize = 4;

/// Default (color, icon) per seat.
pub const DEFAULT_MARKERS: [(&str, &str); MAX_PLAYERS] = [
    ("#00a3c4", "🔥"),
    ("#f56565", "🤖"),
    ("#805ad5", "👾"),
    ("#1a202c", "🏴‍☠️"),
];

/// Player identifier. The first player is `PlayerId(1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// The id of the player sitting at 0-based `seat`.
    #[must_use]
    pub const fn from_seat(seat: usize) -> Self {
        Self(seat as u8 + 1)
    }

    /// 0-based seat index. Ids are 1-based; the invalid id 0 maps to seat 0.
    #[must_use]
    pub const fn seat(self) -> usize {
        (self.0 as usize).saturating_sub(1)
    }

    /// Iterate over all player IDs for a roster of `player_count`.
    ///
    /// ```
    /// use snake_ladder::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(3)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count).map(PlayerId::from_seat)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Who rolls for a player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Controller {
    /// Rolls on user input.
    #[default]
    Human,
    /// Rolls on its own after a think delay.
    Automated,
}

/// How a player's token is drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// CSS-style hex color.
    pub color: String,
    /// Glyph drawn on the token.
    pub icon: String,
}

impl Marker {
    pub fn new(color: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            icon: icon.into(),
        }
    }

    /// Default marker for a 0-based seat. Cycles past the last default.
    #[must_use]
    pub fn for_seat(seat: usize) -> Self {
        let (color, icon) = DEFAULT_MARKERS[seat % DEFAULT_MARKERS.len()];
        Self::new(color, icon)
    }
}

/// A seat in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub marker: Marker,
    /// Only the turn engine moves this.
    pub position: Square,
    pub controller: Controller,
}

impl Player {
    /// A player on the start square with default name and marker.
    #[must_use]
    pub fn new(id: PlayerId, controller: Controller) -> Self {
        Self {
            id,
            name: Self::default_name(id, controller),
            marker: Marker::for_seat(id.seat()),
            position: Square::START,
            controller,
        }
    }

    /// "Player N" for humans, "Bot N" for automated seats.
    #[must_use]
    pub fn default_name(id: PlayerId, controller: Controller) -> String {
        match controller {
            Controller::Human => format!("Player {}", id.0),
            Controller::Automated => format!("Bot {}", id.0),
        }
    }

    #[must_use]
    pub fn is_automated(&self) -> bool {
        self.controller == Controller::Automated
    }
}

/// Per-seat customisation applied on top of the defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerOverrides {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub automated: Option<bool>,
}

impl PlayerOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn automated(mut self, automated: bool) -> Self {
        self.automated = Some(automated);
        self
    }

    fn apply(&self, player: &mut Player) {
        if let Some(automated) = self.automated {
            let controller = if automated { Controller::Automated } else { Controller::Human };
            if controller != player.controller {
                player.controller = controller;
                player.name = Player::default_name(player.id, controller);
            }
        }
        if let Some(name) = &self.name {
            player.name.clone_from(name);
        }
        if let Some(color) = &self.color {
            player.marker.color.clone_from(color);
        }
        if let Some(icon) = &self.icon {
            player.marker.icon.clone_from(icon);
        }
    }
}

/// The ordered seats of a match. Always holds `MIN_PLAYERS..=MAX_PLAYERS`.
///
/// Deserialization goes through the same rules as `for_player_count`: the
/// seat count is clamped, ids follow seat order and every token starts on
/// `Square::START`. Only names, markers and controllers are taken from the
/// input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RosterSeats")]
pub struct Roster {
    players: Vec<Player>,
}

#[derive(Deserialize)]
struct RosterSeats {
    players: Vec<Player>,
}

impl From<RosterSeats> for Roster {
    fn from(seats: RosterSeats) -> Self {
        let mut roster = Self::for_player_count(seats.players.len());
        for (player, loaded) in roster.players.iter_mut().zip(seats.players) {
            player.name = loaded.name;
            player.marker = loaded.marker;
            player.controller = loaded.controller;
        }
        roster
    }
}

impl Roster {
    /// Build the default roster for a requested player count.
    ///
    /// ```
    /// use snake_ladder::core::{Controller, Roster};
    ///
    /// let solo = Roster::for_player_count(1);
    /// assert_eq!(solo.len(), 2);
    /// assert_eq!(solo.players()[1].controller, Controller::Automated);
    /// ```
    #[must_use]
    pub fn for_player_count(requested: usize) -> Self {
        let solo = requested == 1;
        let count = requested.clamp(MIN_PLAYERS, MAX_PLAYERS);

        let players = PlayerId::all(count)
            .map(|id| {
                let controller = if solo && id.seat() > 0 {
                    Controller::Automated
                } else {
                    Controller::Human
                };
                Player::new(id, controller)
            })
            .collect();

        Self { players }
    }

    /// Build a roster from an untrusted request string (e.g. a URL segment).
    ///
    /// Anything that does not parse as a count falls back to `MIN_PLAYERS`.
    #[must_use]
    pub fn from_request(requested: &str) -> Self {
        let count = requested.trim().parse().unwrap_or(MIN_PLAYERS);
        Self::for_player_count(count)
    }

    /// Build a roster and apply per-seat overrides in seat order.
    ///
    /// Extra overrides beyond the roster size are ignored.
    #[must_use]
    pub fn with_overrides(requested: usize, overrides: &[PlayerOverrides]) -> Self {
        let mut roster = Self::for_player_count(requested);
        for (player, seat_overrides) in roster.players.iter_mut().zip(overrides) {
            seat_overrides.apply(player);
        }
        roster
    }

    /// Apply overrides to one seat. Unknown ids are ignored.
    #[must_use]
    pub fn with_override(mut self, id: PlayerId, overrides: &PlayerOverrides) -> Self {
        if let Some(player) = self.players.iter_mut().find(|p| p.id == id) {
            overrides.apply(player);
        }
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Always false: a roster holds at least `MIN_PLAYERS`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub(crate) fn into_players(self) -> Vec<Player> {
        self.players
    }
}
