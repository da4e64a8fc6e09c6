//! Magic item charges and spells.

use charsheet_domain::sheet::{MagicItemFlags, MagicItemSpell};
use charsheet_domain::source::ItemSpell;
use charsheet_domain::InventoryEntry;

use super::gear::reset_key;

/// Flags for items with charges or spells; `None` for everything else.
///
/// `item_spells` is the character's `spells.item`; a spell belongs to the
/// item whose definition id matches its `componentId`.
pub fn magic_item_flags(entry: &InventoryEntry, item_spells: &[ItemSpell]) -> Option<MagicItemFlags> {
    let spells: Vec<MagicItemSpell> = item_spells
        .iter()
        .filter(|spell| spell.component_id == entry.definition.id)
        .map(|spell| MagicItemSpell {
            name: spell.definition.name.clone(),
            level: spell.definition.level,
            consumption: spell
                .limited_use
                .as_ref()
                .and_then(|l| l.min_number_consumed)
                .unwrap_or(1),
        })
        .collect();

    let limited_use = entry.limited_use.as_ref();
    let charges = limited_use.map_or(0, |l| l.max());
    if charges == 0 && spells.is_empty() {
        return None;
    }

    Some(MagicItemFlags {
        enabled: true,
        charges,
        recharge: limited_use
            .and_then(|l| l.reset_type_description.clone())
            .unwrap_or_default(),
        recharge_type: reset_key(limited_use.and_then(|l| l.reset_type))
            .unwrap_or("")
            .to_string(),
        spells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wand_with_spells_and_charges() {
        let wand: InventoryEntry = serde_json::from_value(json!({
            "id": 3,
            "definition": { "id": 777, "name": "Wand of Web", "filterType": "Wand" },
            "limitedUse": { "maxUses": 7, "numberUsed": 0, "resetType": 3,
                            "resetTypeDescription": "1d6 + 1 at dawn" }
        }))
        .expect("entry");
        let spells: Vec<ItemSpell> = serde_json::from_value(json!([
            { "componentId": 777, "definition": { "name": "Web", "level": 2 },
              "limitedUse": { "minNumberConsumed": 1 } },
            { "componentId": 12, "definition": { "name": "Fireball", "level": 3 } }
        ]))
        .expect("spells");

        let flags = magic_item_flags(&wand, &spells).expect("flags");
        assert!(flags.enabled);
        assert_eq!(flags.charges, 7);
        assert_eq!(flags.recharge, "1d6 + 1 at dawn");
        assert_eq!(flags.recharge_type, "day");
        assert_eq!(
            flags.spells,
            vec![MagicItemSpell { name: "Web".to_string(), level: 2, consumption: 1 }]
        );
    }

    #[test]
    fn mundane_items_have_no_flags() {
        let rope: InventoryEntry = serde_json::from_value(json!({
            "id": 4, "definition": { "id": 40, "name": "Rope, Hempen (50 feet)", "filterType": "Other Gear" }
        }))
        .expect("entry");
        assert!(magic_item_flags(&rope, &[]).is_none());
    }
}
