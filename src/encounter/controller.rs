//! The encounter controller.

use im::{OrdSet, Vector};
use tracing::{debug, warn};

use super::notify::{Notice, Notifier, NullNotifier};
use crate::combatants::{Ability, Attack, Combatant, CombatantTemplate, Spell, TemplateCatalog};
use crate::core::{
    CombatState, CombatantId, DiceRng, DiceSource, EffectError, EventRecord, Phase, TrackerConfig,
};
use crate::effects::{ConcentrationMonitor, EffectDraft, EffectSpec, EffectTracker, StatusEffect};
use crate::rules::{
    parse_hp_input, ActionResolver, HpChange, HpResolver, InitiativePrompt, InitiativeScheduler,
    NoPrompt, SavingThrowReport, TargetHit, TurnChange,
};

/// One running encounter.
///
/// Owns the `CombatState` together with its collaborators (dice, the
/// manual initiative prompt, the notification sink) and exposes every
/// combat command. Each command runs to completion before returning, so
/// callers never observe a half-applied action.
pub struct Encounter {
    state: CombatState,
    config: TrackerConfig,
    catalog: TemplateCatalog,
    dice: Box<dyn DiceSource>,
    prompt: Box<dyn InitiativePrompt>,
    notifier: Box<dyn Notifier>,
}

impl std::fmt::Debug for Encounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encounter")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

impl Default for Encounter {
    fn default() -> Self {
        EncounterBuilder::new().build()
    }
}

impl Encounter {
    /// Create an encounter with the given config and default collaborators.
    #[must_use]
    pub fn new(config: TrackerConfig) -> Self {
        EncounterBuilder::new().config(config).build()
    }

    // === Roster ===

    /// Add a fresh instance of `template` to the end of the turn order.
    pub fn add_combatant(&mut self, template: &CombatantTemplate) -> CombatantId {
        self.state.add(template)
    }

    /// Add a combatant by catalog name.
    pub fn add_from_catalog(&mut self, name: &str) -> Option<CombatantId> {
        let Some(template) = self.catalog.combatant(name) else {
            debug!(name, "no catalog template");
            return None;
        };
        Some(self.state.add(template))
    }

    /// Remove a combatant from the turn order and the concentration set.
    pub fn remove_combatant(&mut self, id: CombatantId) -> Option<Combatant> {
        self.state.remove(id)
    }

    /// Flip the favorite flag.
    pub fn toggle_favorite(&mut self, id: CombatantId) -> Option<bool> {
        self.state.toggle_favorite(id)
    }

    // === Turns ===

    /// Roll initiative and sort the roster.
    pub fn roll_initiative(&mut self) -> Vec<(CombatantId, i32)> {
        InitiativeScheduler::roll_initiative(
            &mut self.state,
            self.dice.as_mut(),
            self.prompt.as_mut(),
        )
    }

    /// End the acting combatant's turn.
    pub fn end_turn(&mut self) -> Option<TurnChange> {
        InitiativeScheduler::end_turn(&mut self.state)
    }

    // === Hit points ===

    /// Apply a signed HP change (negative is damage).
    pub fn modify_hp(&mut self, amount: i32, id: CombatantId) -> Option<HpChange> {
        let change = HpResolver::modify_hp(
            &mut self.state,
            amount,
            id,
            self.config.min_concentration_dc,
            self.dice.as_mut(),
        );
        if let Some(check) = change.and_then(|c| c.concentration) {
            self.notifier.notify(&Notice::Concentration(check));
        }
        change
    }

    /// Apply an HP change typed as text. Unparsable text is a no-op.
    pub fn modify_hp_input(&mut self, input: &str, id: CombatantId) -> Option<HpChange> {
        self.modify_hp(parse_hp_input(input), id)
    }

    // === Concentration and effects ===

    /// Flip concentration for a combatant.
    pub fn toggle_concentration(&mut self, id: CombatantId) -> Option<bool> {
        ConcentrationMonitor::toggle(&mut self.state, id)
    }

    /// Attach a status effect.
    pub fn add_effect(&mut self, effect: &EffectSpec, id: CombatantId) -> Option<StatusEffect> {
        EffectTracker::add_effect(&mut self.state, effect, id, &self.config)
    }

    /// Validate a custom effect form and attach it.
    ///
    /// A rejected draft leaves the encounter unchanged.
    pub fn add_custom_effect(
        &mut self,
        draft: &EffectDraft,
        id: CombatantId,
    ) -> Result<Option<StatusEffect>, EffectError> {
        let spec = draft.validate().inspect_err(|err| {
            warn!(%id, error = %err, "custom effect rejected");
        })?;
        Ok(self.add_effect(&spec, id))
    }

    // === Actions ===

    /// Roll a saving throw and report it.
    pub fn roll_saving_throw(
        &mut self,
        id: CombatantId,
        ability: Ability,
    ) -> Option<SavingThrowReport> {
        let report =
            ActionResolver::roll_saving_throw(&self.state, id, ability, self.dice.as_mut())?;
        self.notifier.notify(&Notice::SavingThrow(report.clone()));
        Some(report)
    }

    /// Resolve an attack against each target.
    pub fn resolve_attack(&mut self, attack: &Attack, targets: &[CombatantId]) -> Vec<TargetHit> {
        let hits = ActionResolver::resolve_attack(
            &mut self.state,
            attack,
            targets,
            &self.config,
            self.dice.as_mut(),
        );
        self.notify_checks(&hits);
        hits
    }

    /// Resolve a spell against each target.
    pub fn resolve_spell(&mut self, spell: &Spell, targets: &[CombatantId]) -> Vec<TargetHit> {
        let hits = ActionResolver::resolve_spell(
            &mut self.state,
            spell,
            targets,
            &self.config,
            self.dice.as_mut(),
        );
        self.notify_checks(&hits);
        hits
    }

    /// Resolve one of the acting combatant's attacks by name.
    ///
    /// Returns `None` if nobody is acting or the attack is unknown.
    pub fn acting_attack(
        &mut self,
        attack_name: &str,
        targets: &[CombatantId],
    ) -> Option<Vec<TargetHit>> {
        let attack = self.state.acting()?.attack(attack_name)?.clone();
        Some(self.resolve_attack(&attack, targets))
    }

    /// Cast one of the acting combatant's known spells by name.
    ///
    /// Returns `None` if nobody is acting or the spell is unknown.
    pub fn acting_spell(
        &mut self,
        spell_name: &str,
        targets: &[CombatantId],
    ) -> Option<Vec<TargetHit>> {
        let spell = self.state.acting()?.spell(spell_name)?.clone();
        Some(self.resolve_spell(&spell, targets))
    }

    fn notify_checks(&mut self, hits: &[TargetHit]) {
        for check in hits.iter().filter_map(|h| h.change.and_then(|c| c.concentration)) {
            self.notifier.notify(&Notice::Concentration(check));
        }
    }

    // === Queries ===

    /// The roster in turn order.
    #[must_use]
    pub fn roster(&self) -> &Vector<Combatant> {
        self.state.turn_order()
    }

    /// Get a combatant.
    #[must_use]
    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.state.get(id)
    }

    /// The acting combatant (none before initiative).
    #[must_use]
    pub fn acting(&self) -> Option<&Combatant> {
        self.state.acting()
    }

    /// IDs currently concentrating.
    #[must_use]
    pub fn concentrating(&self) -> &OrdSet<CombatantId> {
        self.state.concentrating()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.state.round()
    }

    /// Event history, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<EventRecord> {
        self.state.history()
    }

    /// Read-only view of the full state.
    #[must_use]
    pub fn state(&self) -> &CombatState {
        &self.state
    }

    /// O(1) copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> CombatState {
        self.state.clone()
    }

    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut TemplateCatalog {
        &mut self.catalog
    }
}

/// Builder for creating an `Encounter`.
pub struct EncounterBuilder {
    config: TrackerConfig,
    catalog: TemplateCatalog,
    dice: Option<Box<dyn DiceSource>>,
    prompt: Box<dyn InitiativePrompt>,
    notifier: Box<dyn Notifier>,
}

impl Default for EncounterBuilder {
    fn default() -> Self {
        Self {
            config: TrackerConfig::default(),
            catalog: TemplateCatalog::new(),
            dice: None,
            prompt: Box::new(NoPrompt),
            notifier: Box::new(NullNotifier),
        }
    }
}

impl EncounterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn catalog(mut self, catalog: TemplateCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Use a specific dice source instead of one seeded from the config.
    pub fn dice(mut self, dice: impl DiceSource + 'static) -> Self {
        self.dice = Some(Box::new(dice));
        self
    }

    pub fn prompt(mut self, prompt: impl InitiativePrompt + 'static) -> Self {
        self.prompt = Box::new(prompt);
        self
    }

    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Build the encounter.
    pub fn build(self) -> Encounter {
        let dice: Box<dyn DiceSource> = match self.dice {
            Some(dice) => dice,
            None => Box::new(match self.config.seed {
                Some(seed) => DiceRng::new(seed),
                None => DiceRng::from_entropy(),
            }),
        };
        let state = CombatState::new().with_history_limit(self.config.history_limit);

        Encounter {
            state,
            config: self.config,
            catalog: self.catalog,
            dice,
            prompt: self.prompt,
            notifier: self.notifier,
        }
    }
}
