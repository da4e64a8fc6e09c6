//! Name, price and weight overrides from `characterValues`.

use charsheet_domain::game_systems::dictionary::{item_override, ItemOverride};
use charsheet_domain::source::CharacterValue;
use charsheet_domain::InventoryEntry;

/// Copy of the inventory with every override applied. The source records
/// are left as they are.
pub fn apply_custom_values(inventory: &[InventoryEntry], values: &[CharacterValue]) -> Vec<InventoryEntry> {
    inventory
        .iter()
        .map(|entry| {
            let mut entry = entry.clone();
            for value in values.iter().filter(|v| v.has_value() && v.targets(entry.id)) {
                let (Some(field), Some(scalar)) = (item_override(value.type_id), value.value.as_ref()) else {
                    continue;
                };
                let def = &mut entry.definition;
                match field {
                    ItemOverride::Name => def.name = scalar.as_text(),
                    ItemOverride::Price => def.cost = scalar.as_f64().or(def.cost),
                    ItemOverride::Weight => def.weight = scalar.as_f64().or(def.weight),
                }
            }
            entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn overrides_apply_to_the_targeted_item_only() {
        let inventory: Vec<InventoryEntry> = serde_json::from_value(json!([
            { "id": 55, "definition": { "name": "Longsword", "cost": 15.0, "weight": 3.0 } },
            { "id": 56, "definition": { "name": "Dagger", "cost": 2.0, "weight": 1.0 } }
        ]))
        .expect("inventory");
        let values: Vec<CharacterValue> = serde_json::from_value(json!([
            { "typeId": 8, "value": "Oathkeeper", "valueId": "55" },
            { "typeId": 19, "value": 250, "valueId": 55 },
            { "typeId": 22, "value": "", "valueId": 55 },
            { "typeId": 28, "value": true, "valueId": 56, "valueTypeId": 1439493548 }
        ]))
        .expect("values");

        let updated = apply_custom_values(&inventory, &values);
        assert_eq!(updated[0].definition.name, "Oathkeeper");
        assert_eq!(updated[0].definition.cost, Some(250.0));
        assert_eq!(updated[0].definition.weight, Some(3.0));
        assert_eq!(updated[1].definition.name, "Dagger");
        assert_eq!(inventory[0].definition.name, "Longsword");
    }
}
