//! Rule-exception flags for the host's automation.

use charsheet_domain::game_systems::{exceptions_where, Exception, Trigger};
use charsheet_domain::sheet::SheetFlags;
use charsheet_domain::SourceCharacter;

use super::DerivationContext;

pub fn resolve_flags(ctx: &DerivationContext<'_>, proficiencies: Vec<String>) -> SheetFlags {
    let character = ctx.character;
    let mut flags = SheetFlags {
        total_levels: ctx.total_level(),
        proficiencies,
        initiative_adv: ctx.index.query("advantage").sub_type("initiative").any(),
        initiative_half_prof: ctx.index.query("half-proficiency").sub_type("initiative").any(),
        ..SheetFlags::default()
    };

    for exception in exceptions_where(|trigger| triggered(character, trigger)) {
        match exception {
            Exception::PowerfulBuild => flags.powerful_build = true,
            Exception::SavageAttacks => flags.savage_attacks = true,
            Exception::HalflingLucky => flags.halfling_lucky = true,
            Exception::ElvenAccuracy => flags.elven_accuracy = true,
            Exception::InitiativeAlert => flags.initiative_alert = true,
            Exception::ObservantFeat => flags.observant_feat = true,
            Exception::RemarkableAthlete => flags.remarkable_athlete = true,
            Exception::JackOfAllTrades => flags.jack_of_all_trades = true,
            Exception::ReliableTalent => flags.reliable_talent = true,
            Exception::WeaponCriticalThreshold(threshold) => {
                flags.weapon_critical_threshold = flags.weapon_critical_threshold.min(threshold);
            }
            // armor and weapons handle these
            Exception::NaturalArmorFromUnarmoredAc
            | Exception::NaturalArmorFromMinimumBase
            | Exception::WeaponDamagePart(..)
            | Exception::MeleeWeaponFlag(_) => {}
        }
    }

    tracing::debug!(
        character = %character.name,
        levels = flags.total_levels,
        crit = flags.weapon_critical_threshold,
        alert = flags.initiative_alert,
        "Resolved feature flags"
    );
    flags
}

/// Whether the character has what a sheet-level trigger names. Option and
/// item triggers only apply to individual weapons.
fn triggered(character: &SourceCharacter, trigger: &Trigger) -> bool {
    match *trigger {
        Trigger::RacialTrait(name) => character.has_racial_trait(name),
        Trigger::Feat(name) => character.has_feat(name),
        Trigger::ClassFeature(name) => character.classes.iter().any(|c| c.has_feature(name, false)),
        Trigger::SubclassFeature(name) => character.classes.iter().any(|c| c.has_feature(name, true)),
        Trigger::Race(_) | Trigger::ChosenOption(_) | Trigger::ItemFeature(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolvers::testing::context;
    use crate::test_fixtures::{characters, class, effect, CharacterBuilder};
    use serde_json::{json, Value};

    fn champion(level: i32) -> Value {
        let mut fighter = class(1, "Fighter", level, Value::Null);
        fighter["subclassDefinition"] = json!({
            "id": 900,
            "name": "Champion",
            "classFeatures": [
                { "id": 1, "name": "Improved Critical", "requiredLevel": 3 },
                { "id": 2, "name": "Remarkable Athlete", "requiredLevel": 7 },
                { "id": 3, "name": "Superior Critical", "requiredLevel": 15 },
            ],
        });
        fighter
    }

    #[test]
    fn empty_character_has_default_flags() {
        let ch = CharacterBuilder::new("Nobody").build();
        let flags = resolve_flags(&context(&ch), Vec::new());
        assert_eq!(flags, SheetFlags::default());
    }

    #[test]
    fn critical_threshold_follows_the_best_feature() {
        let flags = |level| resolve_flags(&context(&CharacterBuilder::new("Champ").class(champion(level)).build()), Vec::new());
        assert_eq!(flags(2).weapon_critical_threshold, 20);
        assert_eq!(flags(3).weapon_critical_threshold, 19);
        assert!(!flags(3).remarkable_athlete);
        assert!(flags(7).remarkable_athlete);
        assert_eq!(flags(15).weapon_critical_threshold, 18);
    }

    #[test]
    fn class_race_and_feat_triggers() {
        let mut bard = class(2, "Bard", 2, Value::Null);
        bard["definition"]["classFeatures"] = json!([{ "id": 10, "name": "Jack of All Trades", "requiredLevel": 2 }]);
        let ch = CharacterBuilder::new("Halfling Bard")
            .class(bard)
            .set("race", json!({ "fullName": "Lightfoot Halfling", "baseName": "Halfling",
                                  "racialTraits": [{ "definition": { "name": "Lucky" } }] }))
            .set("feats", json!([{ "definition": { "name": "Observant" } }]))
            .modifier("class", effect("advantage", "initiative", 0))
            .build();
        let flags = resolve_flags(&context(&ch), vec!["Light Armor".to_string()]);
        assert!(flags.jack_of_all_trades);
        assert!(flags.halfling_lucky);
        assert!(flags.observant_feat);
        assert!(flags.initiative_adv);
        assert!(!flags.initiative_half_prof);
        assert!(!flags.reliable_talent);
        assert_eq!(flags.total_levels, 2);
        assert_eq!(flags.proficiencies, vec!["Light Armor".to_string()]);
    }

    #[test]
    fn warlock_fighter_is_alert() {
        let flags = resolve_flags(&context(&characters::warlock_fighter()), Vec::new());
        assert!(flags.initiative_alert);
        assert_eq!(flags.total_levels, 6);
    }
}
