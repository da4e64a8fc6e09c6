//! Limited-use trackers for the three resource slots.

use charsheet_domain::sheet::{Resource, Resources};

use super::DerivationContext;

/// `limitedUse.resetType`
const RESET_SHORT_REST: u8 = 1;
const RESET_LONG_REST: u8 = 2;

/// Race, class and feat actions with uses, most uses first. Only the first
/// `settings.resource_trackers` (at most three) fill a slot.
pub fn resolve_resources(ctx: &DerivationContext<'_>) -> Resources {
    let actions = &ctx.character.actions;
    let mut trackers: Vec<Resource> = actions
        .race
        .iter()
        .chain(&actions.class)
        .chain(&actions.feat)
        .filter_map(|action| {
            let limited = action.limited_use.as_ref().filter(|l| l.max() != 0)?;
            let reset = limited.reset_type;
            Some(Resource {
                label: action.name.clone(),
                value: limited.max() - limited.used(),
                max: limited.max(),
                sr: reset == Some(RESET_SHORT_REST),
                lr: matches!(reset, Some(RESET_SHORT_REST | RESET_LONG_REST)),
            })
        })
        .collect();
    // stable, so ties keep race/class/feat order
    trackers.sort_by(|a, b| b.max.cmp(&a.max));

    let mut resources = Resources::default();
    for (slot, tracker) in resources
        .slots_mut()
        .into_iter()
        .zip(trackers)
        .take(ctx.settings.resource_trackers)
    {
        *slot = tracker;
    }
    resources
}
