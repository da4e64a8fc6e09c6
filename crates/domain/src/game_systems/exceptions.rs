//! Named rule exceptions.
//!
//! Some races, features and feats change derivation in ways the generic
//! effect records do not express. They are listed here as data so the
//! resolvers never compare against names inline.

/// Where the trigger name is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// `race.fullName`
    Race(&'static str),
    /// `race.racialTraits[].definition.name`
    RacialTrait(&'static str),
    /// `feats[].definition.name`
    Feat(&'static str),
    /// Class feature unlocked at the class's level.
    ClassFeature(&'static str),
    /// Subclass feature unlocked at the class's level.
    SubclassFeature(&'static str),
    /// Class/race/feat option chosen by name.
    ChosenOption(&'static str),
    /// Class feature bound to an item through `characterValues`/options.
    ItemFeature(&'static str),
}

/// What the trigger does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exception {
    /// Natural armor at the best race unarmored AC value.
    NaturalArmorFromUnarmoredAc,
    /// Natural armor at the best race minimum-base-armor value.
    NaturalArmorFromMinimumBase,
    PowerfulBuild,
    SavageAttacks,
    HalflingLucky,
    ElvenAccuracy,
    InitiativeAlert,
    ObservantFeat,
    WeaponCriticalThreshold(u8),
    RemarkableAthlete,
    JackOfAllTrades,
    ReliableTalent,
    /// Extra damage part `(formula, damage type)` on the bound weapon.
    WeaponDamagePart(&'static str, &'static str),
    /// Class feature flag recorded on melee weapons.
    MeleeWeaponFlag(&'static str),
}

pub const RULE_EXCEPTIONS: &[(Trigger, Exception)] = &[
    (Trigger::Race("Lizardfolk"), Exception::NaturalArmorFromUnarmoredAc),
    (Trigger::Race("Tortle"), Exception::NaturalArmorFromMinimumBase),
    (Trigger::RacialTrait("Powerful Build"), Exception::PowerfulBuild),
    (Trigger::RacialTrait("Equine Build"), Exception::PowerfulBuild),
    (Trigger::RacialTrait("Savage Attacks"), Exception::SavageAttacks),
    (Trigger::RacialTrait("Lucky"), Exception::HalflingLucky),
    (Trigger::Feat("Elven Accuracy"), Exception::ElvenAccuracy),
    (Trigger::Feat("Alert"), Exception::InitiativeAlert),
    (Trigger::Feat("Observant"), Exception::ObservantFeat),
    (Trigger::SubclassFeature("Improved Critical"), Exception::WeaponCriticalThreshold(19)),
    (Trigger::SubclassFeature("Superior Critical"), Exception::WeaponCriticalThreshold(18)),
    (Trigger::SubclassFeature("Remarkable Athlete"), Exception::RemarkableAthlete),
    (Trigger::ClassFeature("Jack of All Trades"), Exception::JackOfAllTrades),
    (Trigger::ClassFeature("Reliable Talent"), Exception::ReliableTalent),
    (Trigger::ItemFeature("Lifedrinker"), Exception::WeaponDamagePart("@mod", "necrotic")),
    (Trigger::ChosenOption("Great Weapon Fighting"), Exception::MeleeWeaponFlag("greatWeaponFighting")),
    (Trigger::ChosenOption("Dueling"), Exception::MeleeWeaponFlag("Dueling")),
];

/// Exceptions whose trigger satisfies `pred`, in table order.
pub fn exceptions_where(pred: impl Fn(&Trigger) -> bool) -> impl Iterator<Item = Exception> {
    RULE_EXCEPTIONS
        .iter()
        .filter(move |(trigger, _)| pred(trigger))
        .map(|(_, exception)| *exception)
}

/// The armor exception for a race, if any.
pub fn race_armor_exception(race_name: &str) -> Option<Exception> {
    exceptions_where(|t| matches!(t, Trigger::Race(name) if *name == race_name)).next()
}
