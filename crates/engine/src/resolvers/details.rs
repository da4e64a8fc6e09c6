//! Background, experience, alignment, personality and biography, plus the
//! currency and token vision blocks.

use charsheet_domain::game_systems::dictionary::{alignment_name, DEFAULT_ALIGNMENT_ID};
use charsheet_domain::game_systems::xp_bounds;
use charsheet_domain::sheet::{Biography, Currency, Details, Experience, TokenVision};
use charsheet_domain::source::{Background, BackgroundFeatureBlock, PersonalityTraits};

use super::proficiency::Sense;
use super::DerivationContext;
use crate::diagnostics::CATEGORY_DERIVE;

pub fn resolve_details(ctx: &DerivationContext<'_>) -> Details {
    let character = ctx.character;
    let traits = &character.traits;
    let (min, max) = xp_bounds(ctx.total_level());
    let biography = biography_html(
        &character.background,
        character.notes.backstory.as_deref(),
        traits,
    );
    Details {
        background: background_name(&character.background),
        xp: Experience {
            value: character.current_xp.unwrap_or(0),
            min,
            max,
        },
        personality_trait: paragraphs(traits.personality_traits.as_deref()),
        ideal: paragraphs(traits.ideals.as_deref()),
        bond: paragraphs(traits.bonds.as_deref()),
        flaw: paragraphs(traits.flaws.as_deref()),
        alignment: alignment(ctx),
        biography: Biography {
            public: biography.clone(),
            value: biography,
        },
        race: character.race.full_name.clone(),
        level: ctx.total_level(),
    }
}

fn background_name(background: &Background) -> String {
    if background.has_custom_background {
        background
            .custom_background
            .as_ref()
            .and_then(|c| c.name.clone())
            .unwrap_or_default()
    } else {
        background
            .definition
            .as_ref()
            .map(|d| d.name.clone())
            .unwrap_or_default()
    }
}

fn alignment(ctx: &DerivationContext<'_>) -> String {
    let id = ctx
        .character
        .alignment_id
        .filter(|id| *id != 0)
        .unwrap_or(DEFAULT_ALIGNMENT_ID);
    match alignment_name(id) {
        Some(name) => name.to_string(),
        None => {
            ctx.report(
                CATEGORY_DERIVE,
                &format!("alignment: no alignment with id {}, using Neutral", id),
            );
            alignment_name(DEFAULT_ALIGNMENT_ID).unwrap_or_default().to_string()
        }
    }
}

/// One `<p>` per non-empty line.
fn paragraphs(text: Option<&str>) -> String {
    text.unwrap_or_default()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("<p>{}</p>", line))
        .collect()
}

fn biography_html(background: &Background, backstory: Option<&str>, traits: &PersonalityTraits) -> String {
    let mut html = String::new();

    if background.has_custom_background {
        if let Some(custom) = &background.custom_background {
            if let Some(name) = custom.name.as_deref().filter(|n| !n.is_empty()) {
                html.push_str(&format!("<h1>{}</h1>", name));
            }
            if let Some(description) = custom.description.as_deref().filter(|d| !d.is_empty()) {
                html.push_str(&format!("<p>{}</p>", description));
            }
            if let Some(features) = &custom.features_background {
                push_feature_block(&mut html, features);
                // characteristics often repeat the feature block
                if let Some(characteristics) = custom
                    .characteristics_background
                    .as_ref()
                    .filter(|c| c.entity_type_id != features.entity_type_id)
                {
                    push_feature_block(&mut html, characteristics);
                }
            }
        }
    } else if let Some(definition) = &background.definition {
        html.push_str(&format!("<h1>{}</h1>", definition.name));
        html.push_str(&definition.short_description.replace("\r\n", ""));
        if let Some(feature) = definition.feature_name.as_deref().filter(|f| !f.is_empty()) {
            html.push_str(&format!("<h2>{}</h2>", feature));
            html.push_str(&definition.feature_description.replace("\r\n", ""));
        }
    }

    if let Some(backstory) = backstory {
        html.push_str(&format!("<h2>Backstory</h2><p>{}</p>", backstory));
    }

    let sections: String = [
        ("Personality Traits", &traits.personality_traits),
        ("Ideals", &traits.ideals),
        ("Bonds", &traits.bonds),
        ("Flaws", &traits.flaws),
    ]
    .into_iter()
    .filter_map(|(heading, text)| {
        let text = text.as_deref().filter(|t| !t.is_empty())?;
        Some(format!("<h2>{}</h2>{}", heading, paragraphs(Some(text))))
    })
    .collect();
    if !sections.is_empty() {
        html.push_str("<h1>Traits</h1>");
        html.push_str(&sections);
    }
    html
}

fn push_feature_block(html: &mut String, block: &BackgroundFeatureBlock) {
    html.push_str(&format!("<h2>{}</h2>", block.name));
    html.push_str(&block.short_description.replace("\r\n", ""));
    html.push_str(&format!("<h3>{}</h3>", block.feature_name));
    html.push_str(&block.feature_description.replace("\r\n", ""));
}

pub fn resolve_currency(ctx: &DerivationContext<'_>) -> Currency {
    let c = &ctx.character.currencies;
    Currency {
        pp: c.pp,
        gp: c.gp,
        ep: c.ep,
        sp: c.sp,
        cp: c.cp,
    }
}

/// Bright sight from truesight or blindsight, dim sight from darkvision.
pub fn resolve_token(senses: &[Sense]) -> TokenVision {
    let range = |names: &[&str]| {
        senses
            .iter()
            .filter(|s| names.contains(&s.name.as_str()))
            .map(|s| s.range)
            .max()
            .unwrap_or(0)
    };
    TokenVision {
        bright_sight: range(&["Truesight", "Blindsight"]),
        dim_sight: range(&["Darkvision"]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MockDiagnosticSink;
    use crate::resolvers::testing::{context, SETTINGS};
    use crate::test_fixtures::{class, CharacterBuilder};
    use serde_json::{json, Value};

    #[test]
    fn empty_character_details() {
        let ch = CharacterBuilder::new("Blank").build();
        let details = resolve_details(&context(&ch));
        assert_eq!(details.background, "");
        assert_eq!(details.alignment, "Neutral");
        assert_eq!(details.xp, Experience { value: 0, min: 0, max: 300 });
        assert_eq!(details.personality_trait, "");
        assert_eq!(details.biography.value, "");
        assert_eq!(details.race, "Human");
        assert_eq!(details.level, 0);
    }

    #[test]
    fn standard_background_and_traits() {
        let ch = CharacterBuilder::new("Acolyte")
            .class(class(1, "Cleric", 3, Value::Null))
            .set("currentXp", json!(1200))
            .set("alignmentId", json!(1))
            .set("background", json!({
                "hasCustomBackground": false,
                "definition": {
                    "name": "Acolyte",
                    "shortDescription": "<p>Temple raised.</p>\r\n",
                    "featureName": "Shelter of the Faithful",
                    "featureDescription": "<p>Free healing.</p>",
                },
            }))
            .set("traits", json!({ "personalityTraits": "Kind.\n\nPatient.", "ideals": null, "bonds": "", "flaws": "Proud." }))
            .set("notes", json!({ "backstory": "Left the temple." }))
            .build();
        let details = resolve_details(&context(&ch));
        assert_eq!(details.background, "Acolyte");
        assert_eq!(details.alignment, "Lawful Good");
        assert_eq!(details.xp, Experience { value: 1200, min: 900, max: 2700 });
        assert_eq!(details.personality_trait, "<p>Kind.</p><p>Patient.</p>");
        assert_eq!(details.ideal, "");
        assert_eq!(
            details.biography.value,
            "<h1>Acolyte</h1><p>Temple raised.</p><h2>Shelter of the Faithful</h2><p>Free healing.</p>\
             <h2>Backstory</h2><p>Left the temple.</p>\
             <h1>Traits</h1><h2>Personality Traits</h2><p>Kind.</p><p>Patient.</p><h2>Flaws</h2><p>Proud.</p>"
        );
        assert_eq!(details.biography.public, details.biography.value);
    }

    #[test]
    fn custom_background_skips_repeated_characteristics() {
        let block = |name: &str, entity_type: i64| {
            json!({ "name": name, "shortDescription": "", "featureName": "Feature",
                    "featureDescription": "Text", "entityTypeId": entity_type })
        };
        let custom = |characteristics_type: i64| {
            CharacterBuilder::new("Wanderer")
                .set("background", json!({
                    "hasCustomBackground": true,
                    "customBackground": {
                        "name": "Wanderer",
                        "description": "Walks a lot.",
                        "featuresBackground": block("Outlander", 1),
                        "characteristicsBackground": block("Sailor", characteristics_type),
                    },
                }))
                .build()
        };

        let same = resolve_details(&context(&custom(1)));
        assert_eq!(same.background, "Wanderer");
        assert_eq!(
            same.biography.value,
            "<h1>Wanderer</h1><p>Walks a lot.</p><h2>Outlander</h2><h3>Feature</h3>Text"
        );
        let different = resolve_details(&context(&custom(2)));
        assert!(different.biography.value.ends_with("<h2>Sailor</h2><h3>Feature</h3>Text"));
    }

    #[test]
    fn unknown_alignment_reports_and_falls_back() {
        let ch = CharacterBuilder::new("Odd").set("alignmentId", json!(42)).build();
        let mut sink = MockDiagnosticSink::new();
        sink.expect_report()
            .withf(|category, message| category == "derive" && message.contains("42"))
            .times(1)
            .return_const(());
        let ctx = DerivationContext::new(&ch, &SETTINGS, &sink);
        assert_eq!(resolve_details(&ctx).alignment, "Neutral");
    }

    #[test]
    fn currency_passes_through() {
        let ch = CharacterBuilder::new("Rich")
            .set("currencies", json!({ "pp": 1, "gp": 25, "ep": 0, "sp": 7, "cp": 130 }))
            .build();
        assert_eq!(
            resolve_currency(&context(&ch)),
            Currency { pp: 1, gp: 25, ep: 0, sp: 7, cp: 130 }
        );
    }

    #[test]
    fn token_vision_from_senses() {
        let senses = vec![
            Sense { name: "Blindsight".to_string(), range: 10 },
            Sense { name: "Darkvision".to_string(), range: 60 },
            Sense { name: "Truesight".to_string(), range: 30 },
        ];
        assert_eq!(resolve_token(&senses), TokenVision { bright_sight: 30, dim_sight: 60 });
        assert_eq!(resolve_token(&[]), TokenVision::default());
    }
}
