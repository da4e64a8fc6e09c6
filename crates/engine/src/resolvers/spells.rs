//! Spellcasting ability, save DC and spell slots.

use charsheet_domain::game_systems::{multiclass_spell_slots, MAX_LEVEL};
use charsheet_domain::sheet::{PactSlots, SlotPool, SpellSlots};
use charsheet_domain::source::{CharacterClass, SpellRules};
use charsheet_domain::{Abilities, Ability};

use super::DerivationContext;
use crate::error::DeriveError;

/// Highest-modifier casting ability among the classes that know spells.
/// Earlier classes win ties. `None` for non-casters.
pub fn resolve_spellcasting(
    ctx: &DerivationContext<'_>,
    abilities: &Abilities,
) -> Result<Option<Ability>, DeriveError> {
    let mut best: Option<(Ability, i32)> = None;
    for class_spells in &ctx.character.class_spells {
        let class = ctx
            .character
            .class_by_id(class_spells.character_class_id)
            .ok_or_else(|| {
                DeriveError::missing_reference("spellcasting", "class", class_spells.character_class_id)
            })?;
        let Some(ability) = casting_ability(class) else {
            continue;
        };
        let modifier = abilities.modifier(ability);
        if best.is_none_or(|(_, m)| modifier > m) {
            best = Some((ability, modifier));
        }
    }
    Ok(best.map(|(ability, _)| ability))
}

/// Class ability first; some subclasses (Arcane Trickster) bring their own.
fn casting_ability(class: &CharacterClass) -> Option<Ability> {
    class
        .definition
        .spell_casting_ability_id
        .and_then(Ability::from_id)
        .or_else(|| {
            class
                .subclass_definition
                .as_ref()
                .and_then(|s| s.spell_casting_ability_id)
                .and_then(Ability::from_id)
        })
}

pub fn spell_save_dc(abilities: &Abilities, spellcasting: Option<Ability>, proficiency_bonus: i32) -> i32 {
    match spellcasting {
        Some(ability) => 8 + abilities.modifier(ability) + proficiency_bonus,
        None => 10,
    }
}

/// One casting class's share of the slot math.
#[derive(Debug)]
struct Caster<'a> {
    class: &'a CharacterClass,
    rules: Option<&'a SpellRules>,
    caster_level: i32,
    cantrips: i32,
}

impl<'a> Caster<'a> {
    fn new(class: &'a CharacterClass) -> Self {
        // Third-casters keep their tables on the subclass.
        let rules = class.definition.spell_rules.as_ref().or_else(|| {
            class
                .subclass_definition
                .as_ref()
                .and_then(|s| s.spell_rules.as_ref())
        });
        let caster_level = rules
            .and_then(|r| r.multi_class_spell_slot_divisor)
            .filter(|d| *d > 0)
            .map_or(0, |divisor| class.level / divisor);
        let cantrips = rules
            .and_then(|r| level_entry(&r.level_cantrips_known_maxes, class.level))
            .copied()
            .unwrap_or(0);
        Self {
            class,
            rules,
            caster_level,
            cantrips,
        }
    }

    /// The class's own slot row at its level (or the last row it has).
    fn own_row(&self) -> [i32; 9] {
        let mut row = [0; 9];
        let level = self.class.level.min(MAX_LEVEL);
        if let Some(slots) = self.rules.and_then(|r| level_entry(&r.level_spell_slots, level)) {
            for (slot, value) in row.iter_mut().zip(slots) {
                *slot = *value;
            }
        }
        row
    }
}

fn level_entry<T>(table: &[T], level: i32) -> Option<&T> {
    let index = usize::try_from(level.max(0)).ok()?;
    table.get(index).or_else(|| table.last())
}

pub fn resolve_spell_slots(ctx: &DerivationContext<'_>) -> Result<SpellSlots, DeriveError> {
    let character = ctx.character;
    let casters: Vec<Caster<'_>> = character
        .classes
        .iter()
        .filter(|c| c.can_cast_spells())
        .map(Caster::new)
        .collect();

    let mut slots = SpellSlots::default();
    let (pact, shared): (Vec<&Caster<'_>>, Vec<&Caster<'_>>) = casters
        .iter()
        .partition(|c| ctx.settings.is_pact_caster(&c.class.definition.name));

    for caster in &pact {
        let row = caster.own_row();
        let Some((index, &max)) = row
            .iter()
            .enumerate()
            .max_by(|(ia, a), (ib, b)| a.cmp(b).then(ib.cmp(ia)))
            .filter(|(_, max)| **max > 0)
        else {
            continue;
        };
        let level = u8::try_from(index + 1).unwrap_or(u8::MAX);
        let used = character
            .pact_magic
            .iter()
            .find(|p| p.level == level)
            .map_or(0, |p| p.used);
        slots.pact = PactSlots {
            value: max - used,
            max,
            level,
        };
    }

    let row = match shared.as_slice() {
        [single] => single.own_row(),
        _ => {
            let caster_level: i32 = shared.iter().map(|c| c.caster_level).sum();
            multiclass_spell_slots(caster_level.min(MAX_LEVEL))?
        }
    };
    let cantrips: i32 = casters.iter().map(|c| c.cantrips).sum();

    for (level, pool) in slots.levels.iter_mut().enumerate() {
        let max = if level == 0 { cantrips } else { row[level - 1] };
        let used: i32 = character
            .spell_slots
            .iter()
            .filter(|s| usize::from(s.level) == level)
            .map(|s| s.used)
            .sum();
        *pool = SlotPool::new(max, used);
    }

    tracing::debug!(
        character = %character.name,
        casters = casters.len(),
        pact = pact.len(),
        pact_max = slots.pact.max,
        "Resolved spell slots"
    );
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolvers::abilities::resolve_abilities;
    use crate::resolvers::testing::context;
    use crate::test_fixtures::{characters, class, spell_rules, CharacterBuilder};
    use charsheet_domain::SourceCharacter;
    use serde_json::{json, Value};

    const WIZARD_5: [i32; 9] = [4, 3, 2, 0, 0, 0, 0, 0, 0];

    fn slots(ch: &SourceCharacter) -> SpellSlots {
        resolve_spell_slots(&context(ch)).expect("slots")
    }

    fn with_casting_ability(mut class: Value, ability_id: u8) -> Value {
        class["definition"]["spellCastingAbilityId"] = json!(ability_id);
        class
    }

    #[test]
    fn non_casters_have_no_slots() {
        let ch = CharacterBuilder::new("Fighter").class(class(1, "Fighter", 5, Value::Null)).build();
        let slots = slots(&ch);
        assert_eq!(slots, SpellSlots::default());
        let ctx = context(&ch);
        let abilities = resolve_abilities(&ctx).expect("abilities");
        assert_eq!(resolve_spellcasting(&ctx, &abilities).expect("ability"), None);
        assert_eq!(spell_save_dc(&abilities, None, 3), 10);
    }

    #[test]
    fn single_caster_uses_its_own_row() {
        // A row no multiclass level has, so a table mix-up would show.
        let ch = CharacterBuilder::new("Paladin")
            .class(class(1, "Paladin", 5, spell_rules(2, 0, &[4, 2, 0, 0, 0, 0, 0, 0, 0])))
            .set("spellSlots", json!([{ "level": 1, "used": 1, "available": 4 }]))
            .build();
        let slots = slots(&ch);
        assert_eq!(slots.level(1), SlotPool { value: 3, max: 4 });
        assert_eq!(slots.level(2), SlotPool { value: 2, max: 2 });
        assert_eq!(slots.level(3).max, 0);
    }

    #[test]
    fn single_caster_past_its_table_uses_the_last_row() {
        let rules = json!({
            "multiClassSpellSlotDivisor": 1,
            "levelCantripsKnownMaxes": [0, 3, 3],
            "levelSpellSlots": [[0, 0, 0, 0, 0, 0, 0, 0, 0], [2, 0, 0, 0, 0, 0, 0, 0, 0], [3, 0, 0, 0, 0, 0, 0, 0, 0]],
        });
        let ch = CharacterBuilder::new("Short").class(class(1, "Wizard", 7, rules)).build();
        let slots = slots(&ch);
        assert_eq!(slots.level(0).max, 3);
        assert_eq!(slots.level(1).max, 3);
    }

    #[test]
    fn multiclass_casters_share_the_table() {
        let ch = CharacterBuilder::new("Gish")
            .class(class(1, "Wizard", 5, spell_rules(1, 4, &WIZARD_5)))
            .class(class(2, "Paladin", 4, spell_rules(2, 0, &[3, 0, 0, 0, 0, 0, 0, 0, 0])))
            .build();
        // 5 + 4 / 2 = caster level 7
        let slots = slots(&ch);
        assert_eq!(slots.level(0).max, 4);
        assert_eq!(
            (1..=9).map(|l| slots.level(l).max).collect::<Vec<_>>(),
            vec![4, 3, 3, 1, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn caster_level_is_clamped_to_twenty() {
        let ch = CharacterBuilder::new("Archmage")
            .class(class(1, "Wizard", 20, spell_rules(1, 5, &WIZARD_5)))
            .class(class(2, "Sorcerer", 20, spell_rules(1, 6, &WIZARD_5)))
            .build();
        let slots = slots(&ch);
        assert_eq!(slots.level(9).max, 1);
        assert_eq!(slots.level(0).max, 11);
    }

    #[test]
    fn pact_magic_is_its_own_pool() {
        let ch = CharacterBuilder::new("Hexblade")
            .class(class(1, "Warlock", 5, spell_rules(0, 3, &[0, 0, 2, 0, 0, 0, 0, 0, 0])))
            .class(class(2, "Wizard", 3, spell_rules(1, 3, &[4, 2, 0, 0, 0, 0, 0, 0, 0])))
            .set("pactMagic", json!([{ "level": 3, "used": 1, "available": 2 }]))
            .build();
        let slots = slots(&ch);
        assert_eq!(slots.pact, PactSlots { value: 1, max: 2, level: 3 });
        // The wizard is the only shared caster, so its own row applies.
        assert_eq!(slots.level(1).max, 4);
        assert_eq!(slots.level(2).max, 2);
        assert_eq!(slots.level(3).max, 0);
        assert_eq!(slots.level(0).max, 6);
    }

    #[test]
    fn spellcasting_ability_takes_the_best_modifier() {
        let ch = CharacterBuilder::new("Mixed")
            .stats([10, 10, 10, 16, 10, 18])
            .class(with_casting_ability(class(1, "Wizard", 3, spell_rules(1, 3, &WIZARD_5)), 4))
            .class(with_casting_ability(class(2, "Sorcerer", 2, spell_rules(1, 4, &WIZARD_5)), 6))
            .set("classSpells", json!([{ "characterClassId": 1 }, { "characterClassId": 2 }]))
            .build();
        let ctx = context(&ch);
        let abilities = resolve_abilities(&ctx).expect("abilities");
        let ability = resolve_spellcasting(&ctx, &abilities).expect("ability");
        assert_eq!(ability, Some(Ability::Cha));
        assert_eq!(spell_save_dc(&abilities, ability, 3), 15);
    }

    #[test]
    fn first_class_wins_ties_and_subclass_ability_counts() {
        let mut trickster = class(2, "Rogue", 3, Value::Null);
        trickster["subclassDefinition"] = json!({
            "id": 901, "name": "Arcane Trickster", "canCastSpells": true, "spellCastingAbilityId": 4,
        });
        let ch = CharacterBuilder::new("Tied")
            .stats([10, 10, 10, 14, 14, 10])
            .class(with_casting_ability(class(1, "Cleric", 1, spell_rules(1, 3, &WIZARD_5)), 5))
            .class(trickster)
            .set("classSpells", json!([{ "characterClassId": 1 }, { "characterClassId": 2 }]))
            .build();
        let ctx = context(&ch);
        let abilities = resolve_abilities(&ctx).expect("abilities");
        assert_eq!(resolve_spellcasting(&ctx, &abilities).expect("ability"), Some(Ability::Wis));
    }

    #[test]
    fn unknown_class_spells_entry_fails() {
        let ch = CharacterBuilder::new("Ghost").set("classSpells", json!([{ "characterClassId": 9 }])).build();
        let ctx = context(&ch);
        let abilities = resolve_abilities(&ctx).expect("abilities");
        let err = resolve_spellcasting(&ctx, &abilities).expect_err("missing class");
        assert_eq!(err.to_string(), "spellcasting: no class with id 9");
    }

    #[test]
    fn warlock_fighter_fixture() {
        let slots = slots(&characters::warlock_fighter());
        assert_eq!(slots.pact.max, 2);
        assert_eq!(slots.pact.level, 3);
        assert_eq!(slots.level(0).max, 3);
        assert!((1..=9).all(|l| slots.level(l).max == 0));
    }
}
