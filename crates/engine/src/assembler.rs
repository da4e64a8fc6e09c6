//! Character assembly.
//!
//! Runs the resolvers in dependency order against one source character and
//! writes their results into a blank sheet from the template. A resolver
//! that fails leaves its field at the template value and reports a
//! diagnostic; the rest of the sheet is still derived.

use std::sync::Arc;

use charsheet_domain::game_systems::dictionary::{AdjustmentKind, ADJUSTMENT_TYPE_CONDITION, ADJUSTMENT_TYPE_DAMAGE};
use charsheet_domain::{DerivedCharacter, ImportSettings, SourceCharacter};

use crate::diagnostics::{DiagnosticSink, TracingDiagnostics, CATEGORY_DERIVE};
use crate::error::DeriveError;
use crate::items::{classify_inventory, ItemContext, ItemParserRegistry};
use crate::resolvers::{
    abilities, bonuses, defense, details, features, proficiency, resources, spells, vitals, DerivationContext,
};
use crate::template::{DefaultTemplate, TemplateProvider};

/// Derives sheets. Holds no per-character state, so one assembler can
/// derive any number of characters.
pub struct CharacterAssembler {
    template: Arc<dyn TemplateProvider>,
    diagnostics: Arc<dyn DiagnosticSink>,
    settings: ImportSettings,
    registry: ItemParserRegistry,
}

impl Default for CharacterAssembler {
    fn default() -> Self {
        Self::new(ImportSettings::default())
    }
}

impl CharacterAssembler {
    /// Default template, tracing diagnostics and every built-in item parser.
    pub fn new(settings: ImportSettings) -> Self {
        Self {
            template: Arc::new(DefaultTemplate),
            diagnostics: Arc::new(TracingDiagnostics),
            settings,
            registry: ItemParserRegistry::new(),
        }
    }

    pub fn with_template(mut self, template: Arc<dyn TemplateProvider>) -> Self {
        self.template = template;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_registry(mut self, registry: ItemParserRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    pub fn derive(&self, character: &SourceCharacter) -> DerivedCharacter {
        let ctx = DerivationContext::new(character, &self.settings, self.diagnostics.as_ref());
        let mut sheet = self.template.blank(&character.name);

        if let Some(abilities) = self.isolate("abilities", abilities::resolve_abilities(&ctx)) {
            sheet.abilities = abilities;
        }
        let abilities = sheet.abilities.clone();
        let prof = vitals::resolve_proficiency_bonus(&ctx);
        sheet.attributes.prof = prof;

        // Features
        let proficiency_names = proficiency::proficiency_names(&ctx);
        sheet.flags = features::resolve_flags(&ctx, proficiency_names.clone());

        // Proficiencies and senses
        if let Some(skills) = self.isolate("skills", proficiency::resolve_skills(&ctx, &abilities, prof)) {
            sheet.skills = skills;
        }
        let senses = proficiency::resolve_senses(&ctx);
        sheet.traits.senses = proficiency::render_senses(&senses);
        sheet.token = details::resolve_token(&senses);
        let traits = &mut sheet.traits;
        traits.size = proficiency::resolve_size(&ctx);
        traits.languages = proficiency::resolve_languages(&ctx);
        traits.armor_prof = proficiency::resolve_armor_proficiencies(&proficiency_names);
        traits.weapon_prof = proficiency::resolve_weapon_proficiencies(&proficiency_names);
        traits.tool_prof = proficiency::resolve_tool_proficiencies(&ctx, &proficiency_names);
        traits.di = proficiency::resolve_adjustments(&ctx, AdjustmentKind::Immunity, ADJUSTMENT_TYPE_DAMAGE);
        traits.dr = proficiency::resolve_adjustments(&ctx, AdjustmentKind::Resistance, ADJUSTMENT_TYPE_DAMAGE);
        traits.dv = proficiency::resolve_adjustments(&ctx, AdjustmentKind::Vulnerability, ADJUSTMENT_TYPE_DAMAGE);
        traits.ci = proficiency::resolve_adjustments(&ctx, AdjustmentKind::Immunity, ADJUSTMENT_TYPE_CONDITION);

        // Vitals
        let attributes = &mut sheet.attributes;
        if let Some(hp) = self.isolate("hp", vitals::resolve_hit_points(&ctx, &abilities)) {
            attributes.hp = hp;
        }
        attributes.hd = vitals::resolve_hit_dice(&ctx);
        attributes.death = vitals::resolve_death_saves(&ctx);
        attributes.exhaustion = vitals::resolve_exhaustion(&ctx);
        attributes.inspiration = character.inspiration;
        let alert = sheet.flags.initiative_alert;
        if let Some(init) = self.isolate("init", vitals::resolve_initiative(&ctx, &abilities, alert)) {
            attributes.init = init;
        }
        if let Some(speed) = self.isolate("speed", vitals::resolve_speed(&ctx)) {
            attributes.speed = speed;
        }

        // Defense
        if let Some(ac) = self.isolate("ac", defense::resolve_armor_class(&ctx, &abilities)) {
            attributes.ac = ac;
        }

        // Spells
        if let Some(ability) = self.isolate("spellcasting", spells::resolve_spellcasting(&ctx, &abilities)) {
            attributes.spellcasting = ability.map(|a| a.key().to_string()).unwrap_or_default();
            attributes.spelldc = spells::spell_save_dc(&abilities, ability, prof);
        }
        if let Some(slots) = self.isolate("spells", spells::resolve_spell_slots(&ctx)) {
            sheet.spells = slots;
        }

        if let Some(bonuses) = self.isolate("bonuses", bonuses::resolve_bonuses(&ctx, &abilities)) {
            sheet.bonuses = bonuses;
        }
        sheet.resources = resources::resolve_resources(&ctx);
        sheet.details = details::resolve_details(&ctx);
        sheet.currency = details::resolve_currency(&ctx);

        // Items last: parsers read abilities and proficiencies off the sheet.
        let items = {
            let item_ctx = ItemContext {
                character,
                sheet: &sheet,
                index: &ctx.index,
            };
            classify_inventory(&item_ctx, &self.registry, &self.settings, self.diagnostics.as_ref())
        };
        sheet.items = items;

        tracing::info!(
            character = %character.name,
            level = sheet.details.level,
            ac = sheet.attributes.ac.value,
            hp = sheet.attributes.hp.max,
            items = sheet.items.len(),
            "Derived character sheet"
        );
        sheet
    }

    /// Keep a resolver's failure to its own field.
    fn isolate<T>(&self, field: &str, result: Result<T, DeriveError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.diagnostics
                    .report(CATEGORY_DERIVE, &format!("{} kept its default: {}", field, err));
                None
            }
        }
    }
}
