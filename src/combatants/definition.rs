//! Combatant and spell templates - normalized static data.
//!
//! A `CombatantTemplate` holds the stat block of a kind of creature
//! (e.g. "Goblin"). Templates come from an external ingestion pipeline
//! already normalized; this crate only consumes them. Instance-specific
//! data (current HP, effects, initiative) lives in `Combatant`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the six ability scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// All abilities in stat-block order.
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Short key used by stat blocks ("str", "dex", ...).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Ability::Strength => "str",
            Ability::Dexterity => "dex",
            Ability::Constitution => "con",
            Ability::Intelligence => "int",
            Ability::Wisdom => "wis",
            Ability::Charisma => "cha",
        }
    }
}

impl FromStr for Ability {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "str" | "strength" => Ok(Ability::Strength),
            "dex" | "dexterity" => Ok(Ability::Dexterity),
            "con" | "constitution" => Ok(Ability::Constitution),
            "int" | "intelligence" => Ok(Ability::Intelligence),
            "wis" | "wisdom" => Ok(Ability::Wisdom),
            "cha" | "charisma" => Ok(Ability::Charisma),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// The six ability scores of a stat block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbilityScores {
    #[serde(alias = "str")]
    pub strength: i32,
    #[serde(alias = "dex")]
    pub dexterity: i32,
    #[serde(alias = "con")]
    pub constitution: i32,
    #[serde(alias = "int")]
    pub intelligence: i32,
    #[serde(alias = "wis")]
    pub wisdom: i32,
    #[serde(alias = "cha")]
    pub charisma: i32,
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::uniform(10)
    }
}

impl AbilityScores {
    /// All six scores set to the same value.
    #[must_use]
    pub const fn uniform(score: i32) -> Self {
        Self {
            strength: score,
            dexterity: score,
            constitution: score,
            intelligence: score,
            wisdom: score,
            charisma: score,
        }
    }

    /// Get a single score.
    #[must_use]
    pub const fn score(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    /// Set a single score (builder pattern).
    #[must_use]
    pub fn with(mut self, ability: Ability, score: i32) -> Self {
        match ability {
            Ability::Strength => self.strength = score,
            Ability::Dexterity => self.dexterity = score,
            Ability::Constitution => self.constitution = score,
            Ability::Intelligence => self.intelligence = score,
            Ability::Wisdom => self.wisdom = score,
            Ability::Charisma => self.charisma = score,
        }
        self
    }

    /// Ability modifier: `floor((score - 10) / 2)`.
    #[must_use]
    pub const fn modifier(&self, ability: Ability) -> i32 {
        ability_modifier(self.score(ability))
    }
}

/// Modifier for a raw ability score, rounding toward negative infinity.
#[must_use]
pub const fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// A damaging attack from a stat block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    pub name: String,
    /// Damage dice, `NdM`.
    pub damage: String,
    #[serde(default)]
    pub damage_type: String,
    #[serde(default)]
    pub to_hit_bonus: i32,
}

impl Attack {
    /// Create an attack with no damage type or to-hit bonus.
    pub fn new(name: impl Into<String>, damage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            damage: damage.into(),
            damage_type: String::new(),
            to_hit_bonus: 0,
        }
    }

    /// Set the damage type.
    #[must_use]
    pub fn with_damage_type(mut self, damage_type: impl Into<String>) -> Self {
        self.damage_type = damage_type.into();
        self
    }

    /// Set the to-hit bonus.
    #[must_use]
    pub fn with_to_hit(mut self, bonus: i32) -> Self {
        self.to_hit_bonus = bonus;
        self
    }
}

/// A stat-block action that does not deal damage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonAttackAction {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A spell a combatant knows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub name: String,
    #[serde(default)]
    pub level: u8,
    #[serde(default)]
    pub save_dc: i32,
    #[serde(default)]
    pub description: String,
}

impl Spell {
    /// Create a spell.
    pub fn new(name: impl Into<String>, level: u8, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level,
            save_dc: 0,
            description: description.into(),
        }
    }

    /// Set the save DC.
    #[must_use]
    pub fn with_save_dc(mut self, dc: i32) -> Self {
        self.save_dc = dc;
        self
    }
}

/// A normalized spell-list record.
///
/// Carries the extra tags the ingestion pipeline extracts. Only the
/// fields of `Spell` take part in combat resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellTemplate {
    pub name: String,
    #[serde(default)]
    pub level: u8,
    /// Save DC used when the caster's stat block gives none.
    #[serde(default)]
    pub save_dc: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub damage_inflict: Vec<String>,
    #[serde(default)]
    pub saving_throw: Vec<String>,
}

impl SpellTemplate {
    /// The known-spell record for this template.
    #[must_use]
    pub fn to_spell(&self) -> Spell {
        Spell {
            name: self.name.clone(),
            level: self.level,
            save_dc: self.save_dc,
            description: self.description.clone(),
        }
    }
}

impl From<&SpellTemplate> for Spell {
    fn from(template: &SpellTemplate) -> Self {
        template.to_spell()
    }
}

/// Static combatant definition.
///
/// ## Example
///
/// ```
/// use combat_tracker::combatants::{Ability, AbilityScores, Attack, CombatantTemplate};
///
/// let goblin = CombatantTemplate::new("Goblin", 7, 15)
///     .with_scores(AbilityScores::default().with(Ability::Dexterity, 14))
///     .with_attack(Attack::new("Scimitar", "1d6").with_damage_type("slashing"));
///
/// assert_eq!(goblin.ability_scores.modifier(Ability::Dexterity), 2);
/// assert_eq!(goblin.attacks.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantTemplate {
    pub name: String,
    /// Average hit points; becomes both current and max HP on spawn.
    #[serde(alias = "hp")]
    pub hp_average: i32,
    #[serde(alias = "ac")]
    pub armor_class: i32,
    #[serde(default)]
    pub ability_scores: AbilityScores,
    #[serde(default)]
    pub attacks: Vec<Attack>,
    #[serde(default)]
    pub non_attack_actions: Vec<NonAttackAction>,
    #[serde(default)]
    pub known_spells: Vec<Spell>,
}

impl CombatantTemplate {
    /// Create a template with default ability scores and no actions.
    #[must_use]
    pub fn new(name: impl Into<String>, hp_average: i32, armor_class: i32) -> Self {
        Self {
            name: name.into(),
            hp_average,
            armor_class,
            ability_scores: AbilityScores::default(),
            attacks: Vec::new(),
            non_attack_actions: Vec::new(),
            known_spells: Vec::new(),
        }
    }

    /// Set ability scores (builder pattern).
    #[must_use]
    pub fn with_scores(mut self, scores: AbilityScores) -> Self {
        self.ability_scores = scores;
        self
    }

    /// Add an attack (builder pattern).
    #[must_use]
    pub fn with_attack(mut self, attack: Attack) -> Self {
        self.attacks.push(attack);
        self
    }

    /// Add a non-attack action (builder pattern).
    #[must_use]
    pub fn with_action(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.non_attack_actions.push(NonAttackAction {
            name: name.into(),
            description: description.into(),
        });
        self
    }

    /// Add a known spell (builder pattern).
    #[must_use]
    pub fn with_spell(mut self, spell: Spell) -> Self {
        self.known_spells.push(spell);
        self
    }
}
