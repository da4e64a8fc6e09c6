//! Skills, senses, languages, armor/weapon/tool proficiencies, damage and
//! condition adjustments, and size.

use std::collections::BTreeMap;

use charsheet_domain::game_systems::dictionary::{
    adjustment_value, custom_adjustment_value, language_key, sense_name, size_key, AdjustmentKind,
    ARMOR_PROFICIENCIES, NAMED_TOOLS, NAMED_WEAPONS, SKILLS, TOOL_PROFICIENCIES, WEAPON_PROFICIENCIES,
};
use charsheet_domain::sheet::{SkillScore, TraitSet};
use charsheet_domain::{Abilities, ProficiencyLevel, Rounding};

use super::DerivationContext;
use crate::diagnostics::CATEGORY_DERIVE;
use crate::error::DeriveError;
use crate::modifier_index::{sum, EffectOrigin, UNRESTRICTED};

/// `customProficiencies[].type`
const CUSTOM_TOOL: u8 = 2;
const CUSTOM_LANGUAGE: u8 = 3;

pub fn resolve_skills(
    ctx: &DerivationContext<'_>,
    abilities: &Abilities,
    proficiency_bonus: i32,
) -> Result<BTreeMap<String, SkillScore>, DeriveError> {
    let half_proficient = ctx
        .index
        .query("half-proficiency")
        .sub_type("ability-checks")
        .origins(&[EffectOrigin::Class])
        .any();

    let mut skills = BTreeMap::new();
    for skill in SKILLS {
        let named = |kind: &str| {
            ctx.index
                .query(kind)
                .including_items()
                .iter()
                .any(|indexed| indexed.effect.friendly_subtype_name == skill.label)
        };
        let checks_subtype = skill.ability.ability_checks_subtype();
        let round_up = ctx
            .index
            .query("half-proficiency-round-up")
            .sub_type(&checks_subtype)
            .origins(&[EffectOrigin::Class])
            .any();

        let level = if named("expertise") {
            ProficiencyLevel::Expert
        } else if named("proficiency") {
            ProficiencyLevel::Proficient
        } else if half_proficient || round_up {
            ProficiencyLevel::Half
        } else {
            ProficiencyLevel::None
        };
        let rounding = if round_up { Rounding::Up } else { Rounding::Down };

        let bonus_subtype = skill.label.to_lowercase();
        let bonus = sum(
            ctx.index
                .query("bonus")
                .sub_type(&bonus_subtype)
                .restricted_to(UNRESTRICTED)
                .effects(),
            abilities,
        )?
        .flat_part();
        let modifier = abilities.modifier(skill.ability) + level.contribution(proficiency_bonus, rounding) + bonus;

        skills.insert(
            skill.key.to_string(),
            SkillScore {
                label: skill.label.to_string(),
                ability: skill.ability,
                value: level,
                modifier,
                bonus,
                passive: 10 + modifier,
            },
        );
    }
    Ok(skills)
}

/// A sense and its range in feet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sense {
    pub name: String,
    pub range: i32,
}

/// Custom senses first (a custom darkvision replaces the racial one), then
/// the racial darkvision, then item senses, which stack onto a sense of
/// the same name. Sorted by name. Entries with an unknown sense id are
/// reported and skipped.
pub fn resolve_senses(ctx: &DerivationContext<'_>) -> Vec<Sense> {
    let mut senses: Vec<Sense> = Vec::new();
    for custom in &ctx.character.custom_senses {
        let Some(range) = custom.distance.filter(|d| *d != 0) else {
            continue;
        };
        let Some(name) = known_sense(ctx, i64::from(custom.sense_id)) else {
            continue;
        };
        senses.push(Sense {
            name: name.to_string(),
            range,
        });
    }

    if !senses.iter().any(|s| s.name == "Darkvision") {
        for effect in ctx.index.query("set-base").sub_type("darkvision").effects() {
            senses.push(Sense {
                name: effect.friendly_subtype_name.clone(),
                range: effect.value_or_zero(),
            });
        }
    }

    for effect in ctx
        .index
        .query("sense")
        .origins(&[EffectOrigin::Item])
        .effects()
    {
        let Some(name) = known_sense(ctx, effect.entity_id.unwrap_or(0)) else {
            continue;
        };
        match senses.iter_mut().find(|s| s.name == name) {
            Some(sense) => sense.range += effect.value_or_zero(),
            None => senses.push(Sense {
                name: name.to_string(),
                range: effect.value_or_zero(),
            }),
        }
    }

    senses.sort_by(|a, b| a.name.cmp(&b.name));
    senses
}

fn known_sense(ctx: &DerivationContext<'_>, id: i64) -> Option<&'static str> {
    let name = u8::try_from(id).ok().and_then(sense_name);
    if name.is_none() {
        ctx.report(CATEGORY_DERIVE, &format!("senses: no sense with id {}, skipped", id));
    }
    name
}

/// "Darkvision: 60 ft., Tremorsense: 10 ft."
pub fn render_senses(senses: &[Sense]) -> String {
    senses
        .iter()
        .map(|s| format!("{}: {} ft.", s.name, s.range))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn resolve_languages(ctx: &DerivationContext<'_>) -> TraitSet {
    let mut languages = TraitSet::default();
    let mut custom: Vec<String> = Vec::new();
    for effect in ctx.index.query("language").effects() {
        match language_key(&effect.friendly_subtype_name) {
            Some(key) => languages.value.push(key.to_string()),
            None => custom.push(effect.friendly_subtype_name.clone()),
        }
    }
    custom.extend(
        ctx.character
            .custom_proficiencies
            .iter()
            .filter(|p| p.kind == CUSTOM_LANGUAGE)
            .map(|p| p.name.clone()),
    );
    languages.custom = custom.iter().map(|c| capitalize(c)).collect::<Vec<_>>().join(", ");
    languages
}

/// Friendly names of every proficiency effect, in index order.
pub fn proficiency_names(ctx: &DerivationContext<'_>) -> Vec<String> {
    ctx.index
        .query("proficiency")
        .effects()
        .map(|e| e.friendly_subtype_name.clone())
        .collect()
}

pub fn resolve_armor_proficiencies(names: &[String]) -> TraitSet {
    proficiency_set(names, &ARMOR_PROFICIENCIES, &[], &[])
}

pub fn resolve_weapon_proficiencies(names: &[String]) -> TraitSet {
    proficiency_set(names, &WEAPON_PROFICIENCIES, &NAMED_WEAPONS, &[])
}

pub fn resolve_tool_proficiencies(ctx: &DerivationContext<'_>, names: &[String]) -> TraitSet {
    let extra: Vec<String> = ctx
        .character
        .custom_proficiencies
        .iter()
        .filter(|p| p.kind == CUSTOM_TOOL)
        .map(|p| p.name.clone())
        .collect();
    proficiency_set(names, &TOOL_PROFICIENCIES, &NAMED_TOOLS, &extra)
}

/// Group names become keys; individually named items become custom text.
fn proficiency_set(names: &[String], groups: &[(&str, &str)], named: &[&str], extra: &[String]) -> TraitSet {
    let mut set = TraitSet::default();
    let mut custom: Vec<&str> = Vec::new();
    for name in names {
        if let Some((_, key)) = groups.iter().find(|(group, _)| group == name) {
            if !set.value.iter().any(|v| v == key) {
                set.value.push(key.to_string());
            }
        } else if named.contains(&name.as_str()) && !custom.contains(&name.as_str()) {
            custom.push(name);
        }
    }
    for name in extra {
        if !custom.contains(&name.as_str()) {
            custom.push(name);
        }
    }
    set.custom = custom.join(";");
    set
}

/// Damage (`type_id` 2) or condition (`type_id` 1) adjustments of one kind.
pub fn resolve_adjustments(ctx: &DerivationContext<'_>, kind: AdjustmentKind, type_id: u8) -> TraitSet {
    let mut set = TraitSet::default();
    for effect in ctx.index.query(kind.effect_kind()).granted().effects() {
        if let Some(value) = adjustment_value(type_id, &effect.sub_type) {
            set.value.push(value.to_string());
        }
    }
    for adjustment in ctx.character.custom_defense_adjustments.iter().filter(|a| a.kind == type_id) {
        if let Some(value) = custom_adjustment_value(type_id, kind, adjustment.id) {
            set.value.push(value.to_string());
        }
    }
    set
}

pub fn resolve_size(ctx: &DerivationContext<'_>) -> String {
    ctx.character
        .race
        .size
        .as_deref()
        .and_then(size_key)
        .unwrap_or("med")
        .to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolvers::abilities::resolve_abilities;
    use crate::diagnostics::{CollectingDiagnostics, MockDiagnosticSink};
    use crate::resolvers::testing::{context, SETTINGS};
    use crate::test_fixtures::{characters, effect, proficiency, CharacterBuilder};
    use charsheet_domain::game_systems::dictionary::{ADJUSTMENT_TYPE_CONDITION, ADJUSTMENT_TYPE_DAMAGE};
    use charsheet_domain::SourceCharacter;
    use serde_json::json;

    fn skills(ch: &SourceCharacter, prof: i32) -> BTreeMap<String, SkillScore> {
        let ctx = context(ch);
        let abilities = resolve_abilities(&ctx).expect("abilities");
        resolve_skills(&ctx, &abilities, prof).expect("skills")
    }

    #[test]
    fn skills_without_proficiency_are_the_ability_modifier() {
        let ch = CharacterBuilder::new("Plain").stats([12, 14, 10, 8, 16, 10]).build();
        let skills = skills(&ch, 2);
        assert_eq!(skills.len(), 18);
        assert_eq!(skills["acr"].modifier, 2);
        assert_eq!(skills["arc"].modifier, -1);
        assert_eq!(skills["prc"].modifier, 3);
        assert_eq!(skills["prc"].passive, 13);
        assert_eq!(skills["prc"].value, ProficiencyLevel::None);
    }

    #[test]
    fn proficiency_expertise_and_bonus() {
        let mut expertise = proficiency("stealth", "Stealth");
        expertise["type"] = json!("expertise");
        let ch = CharacterBuilder::new("Rogue")
            .stats([10, 16, 10, 10, 10, 10])
            .modifier("background", proficiency("insight", "Insight"))
            .modifier("class", expertise)
            .modifier("feat", effect("bonus", "perception", 1))
            .build();
        let skills = skills(&ch, 3);
        assert_eq!(skills["ins"].value, ProficiencyLevel::Proficient);
        assert_eq!(skills["ins"].modifier, 3);
        assert_eq!(skills["ste"].value, ProficiencyLevel::Expert);
        assert_eq!(skills["ste"].modifier, 9);
        assert_eq!(skills["prc"].bonus, 1);
        assert_eq!(skills["prc"].modifier, 1);
    }

    #[test]
    fn half_proficiency_rounds_down_unless_round_up() {
        let jack = CharacterBuilder::new("Bard")
            .modifier("class", effect("half-proficiency", "ability-checks", 0))
            .build();
        assert_eq!(skills(&jack, 5)["ath"].modifier, 2);
        assert_eq!(skills(&jack, 5)["ath"].value, ProficiencyLevel::Half);

        let athlete = CharacterBuilder::new("Champion")
            .modifier("class", effect("half-proficiency-round-up", "strength-ability-checks", 0))
            .build();
        let skills = skills(&athlete, 5);
        assert_eq!(skills["ath"].modifier, 3);
        assert_eq!(skills["acr"].modifier, 0);
    }

    #[test]
    fn item_proficiency_counts_for_skills() {
        let ch = CharacterBuilder::new("Booted")
            .item(json!({
                "id": 1, "equipped": true,
                "definition": { "name": "Boots of Elvenkind", "filterType": "Wondrous item",
                                "grantedModifiers": [proficiency("stealth", "Stealth")] }
            }))
            .build();
        assert_eq!(skills(&ch, 2)["ste"].value, ProficiencyLevel::Proficient);
    }

    #[test]
    fn senses_merge_custom_racial_and_items() {
        let mut darkvision = effect("set-base", "darkvision", 60);
        darkvision["friendlySubtypeName"] = json!("Darkvision");
        let mut item_sense = effect("sense", "darkvision", 30);
        item_sense["entityId"] = json!(2);
        let ch = CharacterBuilder::new("Seer")
            .modifier("race", darkvision)
            .set("customSenses", json!([
                { "senseId": 3, "distance": 10 },
                { "senseId": 1, "distance": null },
            ]))
            .item(json!({
                "id": 1, "equipped": true,
                "definition": { "name": "Goggles of Night", "filterType": "Wondrous item",
                                "grantedModifiers": [item_sense] }
            }))
            .build();
        let senses = resolve_senses(&context(&ch));
        assert_eq!(render_senses(&senses), "Darkvision: 90 ft., Tremorsense: 10 ft.");
    }

    #[test]
    fn custom_darkvision_replaces_racial() {
        let mut darkvision = effect("set-base", "darkvision", 60);
        darkvision["friendlySubtypeName"] = json!("Darkvision");
        let ch = CharacterBuilder::new("Seer")
            .modifier("race", darkvision)
            .set("customSenses", json!([{ "senseId": 2, "distance": 120 }]))
            .build();
        let senses = resolve_senses(&context(&ch));
        assert_eq!(senses, vec![Sense { name: "Darkvision".to_string(), range: 120 }]);
    }

    #[test]
    fn unknown_sense_id_is_reported_and_skipped() {
        let mut darkvision = effect("set-base", "darkvision", 60);
        darkvision["friendlySubtypeName"] = json!("Darkvision");
        let ch = CharacterBuilder::new("Odd")
            .modifier("race", darkvision)
            .set("customSenses", json!([{ "senseId": 42, "distance": 10 }]))
            .build();
        let mut sink = MockDiagnosticSink::new();
        sink.expect_report()
            .withf(|category, message| category == "derive" && message.contains("42"))
            .times(1)
            .return_const(());
        let ctx = DerivationContext::new(&ch, &SETTINGS, &sink);
        assert_eq!(render_senses(&resolve_senses(&ctx)), "Darkvision: 60 ft.");
    }

    #[test]
    fn unknown_item_sense_keeps_the_rest() {
        let mut item_sense = effect("sense", "unknown", 30);
        item_sense["entityId"] = json!(77);
        let ch = CharacterBuilder::new("Odd")
            .set("customSenses", json!([{ "senseId": 3, "distance": 10 }]))
            .item(json!({
                "id": 1, "equipped": true,
                "definition": { "name": "Strange Lens", "filterType": "Wondrous item",
                                "grantedModifiers": [item_sense] }
            }))
            .build();
        let diagnostics = CollectingDiagnostics::new();
        let ctx = DerivationContext::new(&ch, &SETTINGS, &diagnostics);
        assert_eq!(render_senses(&resolve_senses(&ctx)), "Tremorsense: 10 ft.");
        assert_eq!(diagnostics.entries().len(), 1);
    }

    #[test]
    fn languages_known_and_custom() {
        let mut common = effect("language", "common", 0);
        common["friendlySubtypeName"] = json!("Common");
        let mut sahuagin = effect("language", "sahuagin", 0);
        sahuagin["friendlySubtypeName"] = json!("Sahuagin");
        let ch = CharacterBuilder::new("Polyglot")
            .modifier("race", common)
            .modifier("background", sahuagin)
            .set("customProficiencies", json!([{ "name": "old tongue", "type": 3 }, { "name": "Whittling", "type": 2 }]))
            .build();
        let languages = resolve_languages(&context(&ch));
        assert_eq!(languages.value, vec!["common".to_string()]);
        assert_eq!(languages.custom, "Sahuagin, Old tongue");
    }

    #[test]
    fn proficiency_groups_and_named_items() {
        let ch = CharacterBuilder::new("Fighter")
            .modifier("class", proficiency("light-armor", "Light Armor"))
            .modifier("class", proficiency("shields", "Shields"))
            .modifier("class", proficiency("martial-weapons", "Martial Weapons"))
            .modifier("race", proficiency("longsword", "Longsword"))
            .modifier("race", proficiency("light-armor", "Light Armor"))
            .modifier("background", proficiency("thieves-tools", "Thieves' Tools"))
            .modifier("background", proficiency("dice-set", "Dice Set"))
            .set("customProficiencies", json!([{ "name": "Whittling Knife", "type": 2 }]))
            .build();
        let ctx = context(&ch);
        let names = proficiency_names(&ctx);
        assert_eq!(names.len(), 7);

        let armor = resolve_armor_proficiencies(&names);
        assert_eq!(armor.value, vec!["lgt".to_string(), "shl".to_string()]);
        let weapons = resolve_weapon_proficiencies(&names);
        assert_eq!(weapons.value, vec!["mar".to_string()]);
        assert_eq!(weapons.custom, "Longsword");
        let tools = resolve_tool_proficiencies(&ctx, &names);
        assert_eq!(tools.value, vec!["thief".to_string()]);
        assert_eq!(tools.custom, "Dice Set;Whittling Knife");
    }

    #[test]
    fn damage_and_condition_adjustments() {
        let ch = CharacterBuilder::new("Tiefling")
            .modifier("race", effect("resistance", "fire", 0))
            .modifier("feat", effect("resistance", "charmed", 0))
            .modifier("race", effect("immunity", "poisoned", 0))
            .set("customDefenseAdjustments", json!([
                { "id": 2, "type": 2 },
                { "id": 2, "type": 1 },
            ]))
            .build();
        let ctx = context(&ch);
        let dr = resolve_adjustments(&ctx, AdjustmentKind::Resistance, ADJUSTMENT_TYPE_DAMAGE);
        assert_eq!(dr.value, vec!["fire".to_string(), "piercing".to_string()]);
        let ci = resolve_adjustments(&ctx, AdjustmentKind::Immunity, ADJUSTMENT_TYPE_CONDITION);
        assert_eq!(ci.value, vec!["poisoned".to_string(), "charmed".to_string()]);
        let dv = resolve_adjustments(&ctx, AdjustmentKind::Vulnerability, ADJUSTMENT_TYPE_DAMAGE);
        assert!(dv.value.is_empty());
    }

    #[test]
    fn size_defaults_to_medium() {
        let small = CharacterBuilder::new("Gnome")
            .set("race", json!({ "fullName": "Rock Gnome", "size": "Small" }))
            .build();
        assert_eq!(resolve_size(&context(&small)), "sm");
        let odd = CharacterBuilder::new("Odd").set("race", json!({ "size": "Colossal" })).build();
        assert_eq!(resolve_size(&context(&odd)), "med");
    }

    #[test]
    fn monk_fixture_sees_in_the_dark() {
        let senses = resolve_senses(&context(&characters::monk_5()));
        assert_eq!(render_senses(&senses), "Darkvision: 60 ft.");
    }
}
