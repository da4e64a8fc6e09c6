//! Index over every rule effect a character has.
//!
//! Built once per derivation. Effects keep their origin so resolvers can
//! limit a query to, say, class and race effects. Item effects are the
//! granted modifiers of equipped items whose magic is available (no
//! attunement needed, or attuned); they only show up in queries that ask
//! for them.

use std::collections::HashMap;

use charsheet_domain::{Abilities, Ability, BonusExpr, RuleEffect, SourceCharacter};

use crate::error::DeriveError;

/// Where an effect came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectOrigin {
    Class,
    Race,
    Background,
    Feat,
    Item,
}

impl EffectOrigin {
    /// Character-level origins, queried by default.
    pub const BASE: [EffectOrigin; 4] = [Self::Class, Self::Race, Self::Background, Self::Feat];
    pub const ALL: [EffectOrigin; 5] = [
        Self::Class,
        Self::Race,
        Self::Background,
        Self::Feat,
        Self::Item,
    ];
}

/// Restriction allow-list for unconditioned effects only.
pub const UNRESTRICTED: &[&str] = &[""];

#[derive(Debug, Clone, Copy)]
pub struct IndexedEffect<'a> {
    pub origin: EffectOrigin,
    pub effect: &'a RuleEffect,
}

#[derive(Debug, Default)]
pub struct ModifierIndex<'a> {
    effects: Vec<IndexedEffect<'a>>,
    by_kind: HashMap<&'a str, Vec<usize>>,
}

impl<'a> ModifierIndex<'a> {
    pub fn build(character: &'a SourceCharacter) -> Self {
        let groups = &character.modifiers;
        let item_effects = character
            .inventory
            .iter()
            .filter(|entry| entry.equipped && entry.effects_available())
            .flat_map(|entry| &entry.definition.granted_modifiers);

        let mut index = Self::default();
        index.extend(EffectOrigin::Class, &groups.class);
        index.extend(EffectOrigin::Race, &groups.race);
        index.extend(EffectOrigin::Background, &groups.background);
        index.extend(EffectOrigin::Feat, &groups.feat);
        index.extend(EffectOrigin::Item, item_effects);

        tracing::debug!(
            character = %character.name,
            effects = index.effects.len(),
            kinds = index.by_kind.len(),
            "Indexed rule effects"
        );
        index
    }

    fn extend(&mut self, origin: EffectOrigin, effects: impl IntoIterator<Item = &'a RuleEffect>) {
        for effect in effects {
            let slot = self.effects.len();
            self.effects.push(IndexedEffect { origin, effect });
            self.by_kind.entry(effect.kind.as_str()).or_default().push(slot);
        }
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Start a query for effects of one `type`.
    pub fn query<'q>(&'q self, kind: &'q str) -> EffectQuery<'q, 'a> {
        EffectQuery {
            index: self,
            kind,
            sub_type: None,
            restrictions: None,
            origins: &EffectOrigin::BASE,
            granted_only: false,
        }
    }

    /// Effects of `kind` (and `sub_type`, when given) across the character
    /// origins whose restriction is in `restrictions`, when given.
    pub fn filter_base(
        &self,
        kind: &str,
        sub_type: Option<&str>,
        restrictions: Option<&[&str]>,
    ) -> Vec<&'a RuleEffect> {
        let mut query = self.query(kind);
        if let Some(sub_type) = sub_type {
            query = query.sub_type(sub_type);
        }
        if let Some(restrictions) = restrictions {
            query = query.restricted_to(restrictions);
        }
        query.collect()
    }

    /// Sum of the matching unconditioned effects.
    pub fn unconditioned_sum(
        &self,
        kind: &str,
        sub_type: &str,
        abilities: &Abilities,
    ) -> Result<BonusExpr, DeriveError> {
        sum(
            self.query(kind)
                .sub_type(sub_type)
                .restricted_to(UNRESTRICTED)
                .effects(),
            abilities,
        )
    }
}

/// A filter over the index. Defaults: character origins only, any
/// restriction, granted or not.
#[derive(Debug, Clone, Copy)]
pub struct EffectQuery<'q, 'a> {
    index: &'q ModifierIndex<'a>,
    kind: &'q str,
    sub_type: Option<&'q str>,
    restrictions: Option<&'q [&'q str]>,
    origins: &'q [EffectOrigin],
    granted_only: bool,
}

impl<'q, 'a> EffectQuery<'q, 'a> {
    pub fn sub_type(mut self, sub_type: &'q str) -> Self {
        self.sub_type = Some(sub_type);
        self
    }

    /// Keep effects whose restriction text is in `restrictions` (`null`
    /// counts as `""`).
    pub fn restricted_to(mut self, restrictions: &'q [&'q str]) -> Self {
        self.restrictions = Some(restrictions);
        self
    }

    pub fn origins(mut self, origins: &'q [EffectOrigin]) -> Self {
        self.origins = origins;
        self
    }

    /// Also match active item effects.
    pub fn including_items(self) -> Self {
        self.origins(&EffectOrigin::ALL)
    }

    pub fn granted(mut self) -> Self {
        self.granted_only = true;
        self
    }

    pub fn iter(self) -> impl Iterator<Item = IndexedEffect<'a>> + 'q {
        let slots = self
            .index
            .by_kind
            .get(self.kind)
            .map(Vec::as_slice)
            .unwrap_or_default();
        slots
            .iter()
            .map(move |&slot| self.index.effects[slot])
            .filter(move |indexed| self.matches(indexed))
    }

    pub fn effects(self) -> impl Iterator<Item = &'a RuleEffect> + 'q {
        self.iter().map(|indexed| indexed.effect)
    }

    pub fn collect(self) -> Vec<&'a RuleEffect> {
        self.effects().collect()
    }

    pub fn any(self) -> bool {
        self.iter().next().is_some()
    }

    fn matches(&self, indexed: &IndexedEffect<'a>) -> bool {
        let effect = indexed.effect;
        self.origins.contains(&indexed.origin)
            && (!self.granted_only || effect.is_granted)
            && self.sub_type.is_none_or(|s| effect.sub_type == s)
            && self
                .restrictions
                .is_none_or(|allowed| allowed.contains(&effect.restriction_text()))
    }
}

/// Combine effects into one bonus.
///
/// An effect with a `statId` is worth that ability's current modifier, one
/// with dice is worth its dice string, anything else its `value`.
pub fn sum<'e>(
    effects: impl IntoIterator<Item = &'e RuleEffect>,
    abilities: &Abilities,
) -> Result<BonusExpr, DeriveError> {
    let mut total = BonusExpr::default();
    for effect in effects {
        total += effect_value(effect, abilities)?;
    }
    Ok(total)
}

/// What one effect is worth; see [`sum`].
pub fn effect_value(effect: &RuleEffect, abilities: &Abilities) -> Result<BonusExpr, DeriveError> {
    match effect.stat_id.filter(|id| *id != 0) {
        Some(stat_id) => {
            let ability = Ability::from_id(stat_id)
                .ok_or_else(|| DeriveError::missing_reference("modifier", "ability", stat_id))?;
            Ok(BonusExpr::flat(abilities.modifier(ability)))
        }
        None => Ok(match effect.dice_string() {
            Some(dice) => BonusExpr::dice(dice),
            None => BonusExpr::flat(effect.value_or_zero()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{ac_ring, dice_effect, effect, restricted, stat_effect, CharacterBuilder};
    use charsheet_domain::AbilityScore;

    fn abilities_with_dex(modifier: i32) -> Abilities {
        let mut abilities = Abilities::default();
        abilities.set(
            Ability::Dex,
            AbilityScore {
                value: 10 + modifier * 2,
                modifier,
                ..AbilityScore::default()
            },
        );
        abilities
    }

    #[test]
    fn filter_base_matches_kind_subtype_and_restriction() {
        let ch = CharacterBuilder::new("Filter")
            .modifier("class", effect("bonus", "speed", 10))
            .modifier("race", restricted(effect("bonus", "speed", 5), "while flying"))
            .modifier("feat", effect("bonus", "initiative", 5))
            .modifier("background", effect("set", "speed", 40))
            .build();
        let index = ModifierIndex::build(&ch);
        assert_eq!(index.len(), 4);

        assert_eq!(index.filter_base("bonus", None, None).len(), 3);
        assert_eq!(index.filter_base("bonus", Some("speed"), None).len(), 2);
        let plain = index.filter_base("bonus", Some("speed"), Some(UNRESTRICTED));
        assert_eq!(plain.len(), 1);
        assert_eq!(plain[0].value, Some(10));
        assert!(index.filter_base("damage", None, None).is_empty());
    }

    #[test]
    fn null_restriction_counts_as_empty() {
        let mut bonus = effect("bonus", "armor-class", 1);
        bonus["restriction"] = serde_json::Value::Null;
        let ch = CharacterBuilder::new("Null").modifier("feat", bonus).build();
        let index = ModifierIndex::build(&ch);
        assert_eq!(index.filter_base("bonus", Some("armor-class"), Some(UNRESTRICTED)).len(), 1);
    }

    #[test]
    fn item_effects_only_when_requested_and_available() {
        let ch = CharacterBuilder::new("Rings")
            .item(ac_ring(1, 1, true, true))
            .item(ac_ring(2, 2, true, false))
            .build();
        let index = ModifierIndex::build(&ch);
        assert!(!index.query("bonus").any());
        let found = index.query("bonus").including_items().collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, Some(1));
    }

    #[test]
    fn origins_and_granted_narrow_the_query() {
        let mut ungranted = effect("set", "unarmored-armor-class", 3);
        ungranted["isGranted"] = serde_json::json!(false);
        let ch = CharacterBuilder::new("Origins")
            .modifier("class", ungranted)
            .modifier("race", effect("set", "unarmored-armor-class", 2))
            .build();
        let index = ModifierIndex::build(&ch);
        let query = index.query("set").sub_type("unarmored-armor-class");
        assert_eq!(query.origins(&[EffectOrigin::Class]).collect().len(), 1);
        assert_eq!(query.granted().collect().len(), 1);
        assert_eq!(query.granted().origins(&[EffectOrigin::Class]).collect().len(), 0);
    }

    #[test]
    fn sum_keeps_dice_and_flat_apart() {
        let ch = CharacterBuilder::new("Sum")
            .modifier("class", effect("bonus", "melee-attacks", 1))
            .modifier("feat", dice_effect("bonus", "melee-attacks", "1d4"))
            .modifier("race", stat_effect("bonus", "melee-attacks", 2))
            .build();
        let index = ModifierIndex::build(&ch);
        let total = sum(index.filter_base("bonus", None, None), &abilities_with_dex(3))
            .expect("sum");
        assert_eq!(total.formula(), "1d4 + 4");

        let dice_only = sum(index.query("bonus").origins(&[EffectOrigin::Feat]).effects(), &Abilities::default())
            .expect("sum");
        assert_eq!(dice_only.formula(), "1d4");
        assert_eq!(sum(Vec::new(), &Abilities::default()).expect("sum").formula(), "0");
    }

    #[test]
    fn unknown_stat_id_is_a_missing_reference() {
        let ch = CharacterBuilder::new("Bad")
            .modifier("class", stat_effect("bonus", "initiative", 9))
            .build();
        let index = ModifierIndex::build(&ch);
        let err = index
            .unconditioned_sum("bonus", "initiative", &Abilities::default())
            .expect_err("stat 9 does not exist");
        assert!(matches!(err, DeriveError::MissingReference { kind: "ability", .. }));
    }
}
