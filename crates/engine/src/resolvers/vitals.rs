//! Hit points, hit dice, death saves, exhaustion, initiative, proficiency
//! bonus and speed.

use charsheet_domain::game_systems::dictionary::movement_type;
use charsheet_domain::game_systems::proficiency_bonus;
use charsheet_domain::sheet::{DeathSaveTally, HitPoints, Initiative, Speed};
use charsheet_domain::{Abilities, Ability};

use super::DerivationContext;
use crate::diagnostics::CATEGORY_DERIVE;
use crate::error::DeriveError;
use crate::modifier_index::{EffectOrigin, UNRESTRICTED};

/// `conditions[].id` of exhaustion.
const EXHAUSTION_CONDITION: u8 = 4;

/// Initiative bonus the Alert feat grants, kept apart from the rest.
const ALERT_BONUS: i32 = 5;

/// Fast Movement and similar only apply out of heavy armor.
const SPEED_RESTRICTIONS: &[&str] = &[""];
const SPEED_RESTRICTIONS_UNENCUMBERED: &[&str] = &["", "while you aren’t wearing heavy armor"];

pub fn resolve_hit_points(ctx: &DerivationContext<'_>, abilities: &Abilities) -> Result<HitPoints, DeriveError> {
    let ch = ctx.character;
    let total_level = ctx.total_level();
    let constitution = abilities.modifier(Ability::Con) * total_level;

    let mut per_level = 0;
    for indexed in ctx
        .index
        .query("bonus")
        .sub_type("hit-points-per-level")
        .restricted_to(UNRESTRICTED)
        .iter()
    {
        let effect = indexed.effect;
        let levels = if indexed.origin == EffectOrigin::Class {
            match effect.component_id.and_then(|id| ch.class_by_feature_id(id)) {
                Some(class) => class.level,
                None => {
                    ctx.report(
                        CATEGORY_DERIVE,
                        &format!(
                            "hp: no class owns feature {}, scaling by total level",
                            effect.component_id.map_or_else(|| "undefined".to_string(), |id| id.to_string())
                        ),
                    );
                    total_level
                }
            }
        } else {
            total_level
        };
        per_level += levels * effect.value_or_zero();
    }

    let base = ch.base_hit_points.unwrap_or(0) + per_level;
    let bonus = ch.bonus_hit_points.unwrap_or(0);
    let removed = ch.removed_hit_points.unwrap_or(0);
    let temp = ch.temporary_hit_points.unwrap_or(0);
    let max = constitution + base + bonus;
    let value = match ch.override_hit_points.filter(|o| *o != 0) {
        Some(override_hp) => override_hp - removed,
        None => max - removed,
    };

    Ok(HitPoints {
        value,
        min: 0,
        max,
        temp,
        tempmax: temp,
    })
}

/// Unspent hit dice.
pub fn resolve_hit_dice(ctx: &DerivationContext<'_>) -> i32 {
    let classes = &ctx.character.classes;
    classes.iter().map(|c| c.level).sum::<i32>() - classes.iter().map(|c| c.hit_dice_used).sum::<i32>()
}

pub fn resolve_death_saves(ctx: &DerivationContext<'_>) -> DeathSaveTally {
    let saves = &ctx.character.death_saves;
    DeathSaveTally {
        success: saves.success_count.unwrap_or(0),
        failure: saves.fail_count.unwrap_or(0),
    }
}

pub fn resolve_exhaustion(ctx: &DerivationContext<'_>) -> i32 {
    ctx.character
        .conditions
        .iter()
        .find(|c| c.id == EXHAUSTION_CONDITION)
        .and_then(|c| c.level)
        .unwrap_or(0)
}

/// Unconditioned initiative bonuses. With Alert the host adds the +5 on
/// its own, so it moves from `value` to `bonus`.
pub fn resolve_initiative(
    ctx: &DerivationContext<'_>,
    abilities: &Abilities,
    alert: bool,
) -> Result<Initiative, DeriveError> {
    let value = ctx.index.unconditioned_sum("bonus", "initiative", abilities)?;
    let (value, bonus) = if alert {
        (value.offset(-ALERT_BONUS), ALERT_BONUS)
    } else {
        (value, 0)
    };
    Ok(Initiative {
        value,
        bonus,
        modifier: abilities.modifier(Ability::Dex),
    })
}

pub fn resolve_proficiency_bonus(ctx: &DerivationContext<'_>) -> i32 {
    proficiency_bonus(ctx.total_level())
}

/// Walking speed plus every other movement type as "Fly 30 ft, Swim 30 ft".
pub fn resolve_speed(ctx: &DerivationContext<'_>) -> Result<Speed, DeriveError> {
    let ch = ctx.character;
    let mut speeds: Vec<(&str, i32)> = ch
        .race
        .weight_speeds
        .normal
        .entries()
        .into_iter()
        .filter(|(_, distance)| *distance != 0)
        .collect();

    let restrictions = if ctx.wears_heavy_armor() {
        SPEED_RESTRICTIONS
    } else {
        SPEED_RESTRICTIONS_UNENCUMBERED
    };
    let bonus: i32 = ctx
        .index
        .query("bonus")
        .sub_type("speed")
        .restricted_to(restrictions)
        .effects()
        .map(|e| e.value_or_zero())
        .sum();

    for (kind, distance) in speeds.iter_mut() {
        let innate_subtype = format!("innate-speed-{}ing", kind);
        let innate = ctx
            .index
            .query("set")
            .sub_type(&innate_subtype)
            .origins(&[EffectOrigin::Race])
            .effects()
            .map(|e| e.value_or_zero())
            .fold(*distance, i32::max);
        *distance = innate + bonus;
    }

    if !ctx.wears_armor() {
        let unarmored: i32 = ctx
            .index
            .query("bonus")
            .sub_type("unarmored-movement")
            .origins(&[EffectOrigin::Class])
            .effects()
            .map(|e| e.value_or_zero())
            .sum();
        for (_, distance) in speeds.iter_mut() {
            *distance += unarmored;
        }
    }

    // a null distance arrives as 0 and sets nothing
    for custom in ch.custom_speeds.iter().filter(|c| c.distance != 0) {
        let kind = movement_type(custom.movement_id)
            .ok_or_else(|| DeriveError::missing_reference("speed", "movement type", custom.movement_id))?;
        match speeds.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, distance)) => *distance = custom.distance,
            None => speeds.push((kind, custom.distance)),
        }
    }

    let walk = speeds.iter().find(|(k, _)| *k == "walk").map_or(0, |(_, d)| *d);
    let special = speeds
        .iter()
        .filter(|(k, _)| *k != "walk")
        .map(|(k, d)| format!("{} {} ft", capitalize(k), d))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(Speed {
        value: format!("{} ft", walk),
        special,
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
