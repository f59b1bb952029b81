//! Template catalog for name lookup.
//!
//! The `TemplateCatalog` holds the normalized combatant and spell
//! templates an encounter can draw from. Names are matched
//! case-insensitively.

use rustc_hash::FxHashMap;

use super::definition::{CombatantTemplate, SpellTemplate};

/// Catalog of combatant and spell templates.
///
/// ## Example
///
/// ```
/// use combat_tracker::combatants::{CombatantTemplate, TemplateCatalog};
///
/// let mut catalog = TemplateCatalog::new();
/// catalog.register_combatant(CombatantTemplate::new("Goblin", 7, 15));
///
/// let found = catalog.combatant("goblin").unwrap();
/// assert_eq!(found.name, "Goblin");
/// ```
#[derive(Clone, Debug, Default)]
pub struct TemplateCatalog {
    combatants: FxHashMap<String, CombatantTemplate>,
    spells: FxHashMap<String, SpellTemplate>,
}

fn catalog_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl TemplateCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a combatant template.
    ///
    /// Returns the template previously registered under the same name.
    pub fn register_combatant(&mut self, template: CombatantTemplate) -> Option<CombatantTemplate> {
        self.combatants.insert(catalog_key(&template.name), template)
    }

    /// Register a spell template.
    ///
    /// Returns the template previously registered under the same name.
    pub fn register_spell(&mut self, template: SpellTemplate) -> Option<SpellTemplate> {
        self.spells.insert(catalog_key(&template.name), template)
    }

    /// Get a combatant template by name.
    #[must_use]
    pub fn combatant(&self, name: &str) -> Option<&CombatantTemplate> {
        self.combatants.get(&catalog_key(name))
    }

    /// Get a spell template by name.
    #[must_use]
    pub fn spell(&self, name: &str) -> Option<&SpellTemplate> {
        self.spells.get(&catalog_key(name))
    }

    /// Number of combatant templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    /// Check if the catalog has no combatant templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    /// Combatant templates sorted by name.
    #[must_use]
    pub fn combatants(&self) -> Vec<&CombatantTemplate> {
        let mut all: Vec<_> = self.combatants.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// Find combatant templates matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CombatantTemplate>
    where
        F: Fn(&CombatantTemplate) -> bool,
    {
        self.combatants.values().filter(move |t| predicate(t))
    }
}

impl Extend<CombatantTemplate> for TemplateCatalog {
    fn extend<I: IntoIterator<Item = CombatantTemplate>>(&mut self, iter: I) {
        for template in iter {
            self.register_combatant(template);
        }
    }
}

impl Extend<SpellTemplate> for TemplateCatalog {
    fn extend<I: IntoIterator<Item = SpellTemplate>>(&mut self, iter: I) {
        for template in iter {
            self.register_spell(template);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spell(name: &str) -> SpellTemplate {
        SpellTemplate {
            name: name.into(),
            level: 1,
            save_dc: 12,
            description: String::new(),
            damage_inflict: vec![],
            saving_throw: vec![],
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut catalog = TemplateCatalog::new();
        assert!(catalog.register_combatant(CombatantTemplate::new("Orc", 15, 13)).is_none());

        assert_eq!(catalog.combatant(" ORC ").unwrap().hp_average, 15);
        assert!(catalog.combatant("Troll").is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_register_replaces() {
        let mut catalog = TemplateCatalog::new();
        catalog.register_combatant(CombatantTemplate::new("Orc", 15, 13));

        let previous = catalog.register_combatant(CombatantTemplate::new("orc", 20, 13));
        assert_eq!(previous.unwrap().hp_average, 15);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.combatant("Orc").unwrap().hp_average, 20);
    }

    #[test]
    fn test_spells() {
        let mut catalog = TemplateCatalog::new();
        catalog.extend(vec![spell("Bless"), spell("Bane")]);

        assert_eq!(catalog.spell("bless").unwrap().save_dc, 12);
        assert!(catalog.spell("Wish").is_none());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_sorted_and_find() {
        let mut catalog = TemplateCatalog::new();
        catalog.extend(vec![
            CombatantTemplate::new("Zombie", 22, 8),
            CombatantTemplate::new("Kobold", 5, 12),
            CombatantTemplate::new("Ghoul", 22, 12),
        ]);

        let names: Vec<_> = catalog.combatants().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Ghoul", "Kobold", "Zombie"]);

        let tough: Vec<_> = catalog.find(|t| t.hp_average > 20).collect();
        assert_eq!(tough.len(), 2);
    }
}
