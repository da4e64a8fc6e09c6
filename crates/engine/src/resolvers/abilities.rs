//! Ability scores and saving throw proficiency.

use charsheet_domain::game_systems::ability_modifier;
use charsheet_domain::source::StatEntry;
use charsheet_domain::{Abilities, Ability, AbilityScore};

use super::DerivationContext;
use crate::error::DeriveError;
use crate::modifier_index::EffectOrigin;

/// Restrictions under which a "set" effect replaces the score.
const SET_SCORE_RESTRICTIONS: &[&str] = &["", "if not already higher"];

pub fn resolve_abilities(ctx: &DerivationContext<'_>) -> Result<Abilities, DeriveError> {
    let mut abilities = Abilities::default();
    for ability in Ability::ALL {
        abilities.set(ability, resolve_score(ctx, ability));
    }
    Ok(abilities)
}

fn resolve_score(ctx: &DerivationContext<'_>, ability: Ability) -> AbilityScore {
    let ch = ctx.character;
    let id = ability.id();
    let score_subtype = ability.score_subtype();

    let override_value = stat_value(&ch.override_stats, id);
    let value = if override_value > 0 {
        override_value
    } else {
        let bonus: i32 = ctx
            .index
            .query("bonus")
            .sub_type(&score_subtype)
            .effects()
            .filter(|e| e.entity_id == Some(i64::from(id)))
            .map(|e| e.value_or_zero())
            .sum();
        let raised_maximum: i32 = ctx
            .index
            .query("bonus")
            .sub_type("ability-score-maximum")
            .effects()
            .filter(|e| e.stat_id == Some(id))
            .map(|e| e.value_or_zero())
            .sum();
        let set_to = ctx
            .index
            .query("set")
            .sub_type(&score_subtype)
            .restricted_to(SET_SCORE_RESTRICTIONS)
            .effects()
            .map(|e| e.value_or_zero())
            .fold(0, i32::max);

        let calculated = stat_value(&ch.stats, id) + stat_value(&ch.bonus_stats, id) + bonus + raised_maximum;
        calculated.max(set_to)
    };

    let saving_throw = ability.saving_throw_subtype();
    let proficient = ctx
        .index
        .query("proficiency")
        .sub_type(&saving_throw)
        .origins(&[EffectOrigin::Class])
        .any();

    AbilityScore {
        value,
        min: 3,
        modifier: ability_modifier(value),
        proficient: u8::from(proficient),
    }
}

/// Entries with ids outside 1..6 are never looked up; a missing entry is 0.
fn stat_value(entries: &[StatEntry], id: u8) -> i32 {
    entries
        .iter()
        .find(|s| s.id == id)
        .and_then(|s| s.value)
        .unwrap_or(0)
}
