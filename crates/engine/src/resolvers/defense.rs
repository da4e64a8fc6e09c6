//! Armor class.
//!
//! Every worn armor (plus synthesized unarmored and natural armor options)
//! is paired with every worn shield, or with no shield when none is worn.
//! Each pairing gets a value from its armor type; the best one wins. The
//! racial baseline is always a candidate, so there is always a value.

use charsheet_domain::game_systems::{race_armor_exception, Exception};
use charsheet_domain::sheet::{ArmorClass, ArmorClassOption};
use charsheet_domain::{Abilities, Ability, ArmorType, InventoryEntry};

use super::DerivationContext;
use crate::error::DeriveError;
use crate::items::armor::equipped_armor_class;
use crate::items::ArmorCandidate;
use crate::modifier_index::{effect_value, sum, EffectOrigin, UNRESTRICTED};

/// AC with no armor and no rules.
const BASE_ARMOR_CLASS: i32 = 10;

pub fn resolve_armor_class(ctx: &DerivationContext<'_>, abilities: &Abilities) -> Result<ArmorClass, DeriveError> {
    let dex = abilities.modifier(Ability::Dex);
    let (worn, gear): (Vec<&InventoryEntry>, Vec<&InventoryEntry>) = ctx
        .equipped()
        .partition(|entry| entry.definition.filter_type.as_deref() == Some("Armor"));

    let gear_ac: i32 = gear.iter().map(|entry| equipped_armor_class(entry)).sum();
    let unarmored_bonus = sum(
        ctx.index
            .query("bonus")
            .sub_type("unarmored-armor-class")
            .restricted_to(UNRESTRICTED)
            .effects(),
        abilities,
    )?
    .flat_part();

    let mut candidates: Vec<ArmorCandidate> = worn.iter().map(|entry| ArmorCandidate::from_entry(entry)).collect();
    let mut misc = 0;
    if worn.is_empty() {
        for origin in [EffectOrigin::Class, EffectOrigin::Race] {
            if let Some(ac) = best_unarmored_ac(ctx, abilities, origin)? {
                candidates.push(ArmorCandidate::synthetic(ArmorType::UnarmoredDefense, ac));
            }
        }
    } else {
        // Defense fighting style and the like
        misc += sum(
            ctx.index
                .query("bonus")
                .sub_type("armored-armor-class")
                .origins(&[EffectOrigin::Class, EffectOrigin::Race])
                .granted()
                .effects(),
            abilities,
        )?
        .flat_part();
    }
    misc += sum(
        ctx.index
            .query("bonus")
            .sub_type("armor-class")
            .restricted_to(UNRESTRICTED)
            .effects(),
        abilities,
    )?
    .flat_part();
    candidates.push(racial_candidate(ctx, abilities)?);

    let (shields, armors): (Vec<ArmorCandidate>, Vec<ArmorCandidate>) =
        candidates.into_iter().partition(ArmorCandidate::is_shield);

    let mut options = Vec::new();
    for armor in &armors {
        let pairs: Vec<(String, i32)> = if shields.is_empty() {
            vec![(armor.name.clone(), armor.armor_class)]
        } else {
            shields
                .iter()
                .map(|shield| {
                    (
                        format!("{} + {}", armor.name, shield.name),
                        armor.armor_class + shield.armor_class,
                    )
                })
                .collect()
        };
        for (name, base) in pairs {
            let value = match armor.kind {
                ArmorType::NaturalArmor | ArmorType::UnarmoredDefense => {
                    let bonus = if shields.is_empty() { unarmored_bonus } else { 0 };
                    base + bonus + gear_ac + misc
                }
                ArmorType::HeavyArmor => base + gear_ac + misc,
                ArmorType::MediumArmor => base + dex.min(2) + gear_ac + misc,
                _ => base + dex + gear_ac + misc,
            };
            options.push(ArmorClassOption { name, value });
        }
    }

    let value = options
        .iter()
        .map(|o| o.value)
        .max()
        .unwrap_or(BASE_ARMOR_CLASS + dex);
    tracing::debug!(
        character = %ctx.character.name,
        ac = value,
        options = options.len(),
        gear = gear_ac,
        misc,
        "Resolved armor class"
    );
    Ok(ArmorClass {
        value,
        candidates: options,
    })
}

/// Best `set/unarmored-armor-class` AC from one origin:
/// 10 + DEX + (the effect's ability modifier, or its value).
fn best_unarmored_ac(
    ctx: &DerivationContext<'_>,
    abilities: &Abilities,
    origin: EffectOrigin,
) -> Result<Option<i32>, DeriveError> {
    let dex = abilities.modifier(Ability::Dex);
    let mut best = None;
    for effect in ctx
        .index
        .query("set")
        .sub_type("unarmored-armor-class")
        .origins(&[origin])
        .granted()
        .effects()
    {
        let ac = BASE_ARMOR_CLASS + dex + effect_value(effect, abilities)?.flat_part();
        best = best.max(Some(ac));
    }
    Ok(best)
}

/// Natural armor for the races that have it, plain unarmored for the rest.
fn racial_candidate(ctx: &DerivationContext<'_>, abilities: &Abilities) -> Result<ArmorCandidate, DeriveError> {
    let natural = match race_armor_exception(&ctx.character.race.full_name) {
        Some(Exception::NaturalArmorFromUnarmoredAc) => best_unarmored_ac(ctx, abilities, EffectOrigin::Race)?,
        Some(Exception::NaturalArmorFromMinimumBase) => ctx
            .index
            .query("set")
            .sub_type("minimum-base-armor")
            .origins(&[EffectOrigin::Race])
            .granted()
            .effects()
            .map(|e| e.value_or_zero())
            .max(),
        _ => None,
    };
    Ok(match natural {
        Some(ac) => ArmorCandidate::synthetic(ArmorType::NaturalArmor, ac),
        None => ArmorCandidate::synthetic(ArmorType::Unarmored, BASE_ARMOR_CLASS),
    })
}
