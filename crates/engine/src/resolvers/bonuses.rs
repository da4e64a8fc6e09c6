//! Global bonuses: ability checks, saves, attack rolls and spell DC.

use charsheet_domain::sheet::{AbilityBonuses, AttackBonus, Bonuses, SpellBonus};
use charsheet_domain::{Abilities, BonusExpr};

use super::DerivationContext;
use crate::error::DeriveError;

pub fn resolve_bonuses(ctx: &DerivationContext<'_>, abilities: &Abilities) -> Result<Bonuses, DeriveError> {
    let bonus = |sub_type: &str| ctx.index.unconditioned_sum("bonus", sub_type, abilities);
    let attack = |sub_types: &[&str]| -> Result<AttackBonus, DeriveError> {
        let mut attack = BonusExpr::default();
        for &sub_type in sub_types {
            attack += bonus(sub_type)?;
        }
        Ok(AttackBonus {
            attack,
            damage: BonusExpr::default(),
        })
    };

    let check = bonus("ability-checks")?;
    Ok(Bonuses {
        abilities: AbilityBonuses {
            skill: check.clone(),
            check,
            save: bonus("saving-throws")?,
        },
        rsak: attack(&["spell-attacks", "ranged-spell-attacks"])?,
        msak: attack(&["spell-attacks", "melee-spell-attacks"])?,
        mwak: attack(&["melee-attacks", "weapon-attacks", "melee-weapon-attacks"])?,
        rwak: attack(&["ranged-attacks", "weapon-attacks", "ranged-weapon-attacks"])?,
        spell: SpellBonus {
            dc: bonus("spell-save-dc")?,
        },
    })
}
