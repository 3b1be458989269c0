//! Character catalog
//!
//! Closed table of playable classes. Stats are resolved once when the player
//! is created and never change afterwards.

use serde::{Deserialize, Serialize};

/// RGB color for HUD and sprite tinting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Playable character classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CharacterClass {
    #[default]
    Soldier,
    Commando,
    Tank,
    Assassin,
}

/// Per-class stat block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterStats {
    pub max_health: u32,
    /// Units per tick per held direction
    pub speed: f32,
    pub color: Color,
    /// Damage dealt by each player projectile
    pub damage: u32,
}

impl CharacterClass {
    /// All classes in selection order (hotkeys 1-4)
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Soldier,
        CharacterClass::Commando,
        CharacterClass::Tank,
        CharacterClass::Assassin,
    ];

    pub fn stats(&self) -> CharacterStats {
        match self {
            CharacterClass::Soldier => CharacterStats {
                max_health: 100,
                speed: 3.0,
                color: Color::rgb(0, 0, 255),
                damage: 25,
            },
            CharacterClass::Commando => CharacterStats {
                max_health: 75,
                speed: 4.0,
                color: Color::rgb(0, 255, 0),
                damage: 20,
            },
            CharacterClass::Tank => CharacterStats {
                max_health: 150,
                speed: 2.0,
                color: Color::rgb(128, 0, 128),
                damage: 30,
            },
            CharacterClass::Assassin => CharacterStats {
                max_health: 80,
                speed: 3.5,
                color: Color::rgb(255, 140, 0),
                damage: 35,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Soldier => "Soldier",
            CharacterClass::Commando => "Commando",
            CharacterClass::Tank => "Tank",
            CharacterClass::Assassin => "Assassin",
        }
    }

    /// Short description shown on the selection card
    pub fn tagline(&self) -> &'static str {
        match self {
            CharacterClass::Soldier => "Balanced",
            CharacterClass::Commando => "Fast & Agile",
            CharacterClass::Tank => "High Health",
            CharacterClass::Assassin => "High Damage",
        }
    }

    /// Selection hotkey, 1-based
    pub fn hotkey(&self) -> u8 {
        match self {
            CharacterClass::Soldier => 1,
            CharacterClass::Commando => 2,
            CharacterClass::Tank => 3,
            CharacterClass::Assassin => 4,
        }
    }

    pub fn from_hotkey(key: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.hotkey() == key)
    }

    /// Parse a class by name (case-insensitive) or hotkey digit
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(key) = s.parse::<u8>() {
            return Self::from_hotkey(key);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s))
    }
}
