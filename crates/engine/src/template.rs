//! Blank sheet provider.

use charsheet_domain::DerivedCharacter;

/// Supplies the blank sheet a derivation starts from. Fields whose resolver
/// fails keep the template's value.
pub trait TemplateProvider: Send + Sync {
    fn blank(&self, name: &str) -> DerivedCharacter;
}

/// Host defaults: all abilities 10, speed 30 ft, medium size, crits on 20.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTemplate;

impl TemplateProvider for DefaultTemplate {
    fn blank(&self, name: &str) -> DerivedCharacter {
        let mut sheet = DerivedCharacter {
            name: name.to_string(),
            ..DerivedCharacter::default()
        };
        sheet.attributes.ac.value = 10;
        sheet.attributes.spelldc = 10;
        sheet.attributes.prof = 2;
        sheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charsheet_domain::Ability;

    #[test]
    fn default_template_is_a_plain_commoner() {
        let sheet = DefaultTemplate.blank("Nobody");
        assert_eq!(sheet.name, "Nobody");
        assert_eq!(sheet.abilities.value(Ability::Str), 10);
        assert_eq!(sheet.attributes.ac.value, 10);
        assert_eq!(sheet.attributes.speed.value, "30 ft");
        assert_eq!(sheet.flags.weapon_critical_threshold, 20);
    }
}
