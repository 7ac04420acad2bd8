use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Ar,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale {0:?}, expected one of: en, ar")]
pub struct UnsupportedLocaleError(pub String);

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    pub fn is_rtl(self) -> bool {
        self == Locale::Ar
    }

    /// Picks the first supported language from an Accept-Language style list
    /// such as `"ar-EG,en;q=0.9"`, or English when nothing matches.
    pub fn negotiate(header: &str) -> Locale {
        header
            .split(',')
            .filter_map(|entry| entry.split(';').next())
            .find_map(|tag| tag.trim().parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for Locale {
    type Err = UnsupportedLocaleError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        // Only the primary subtag matters, "ar-EG" and "ar_EG" are both Arabic
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Ok(Locale::En),
            "ar" => Ok(Locale::Ar),
            _ => Err(UnsupportedLocaleError(tag.to_owned())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    MyGarden,
    AllPlants,
    WaterToday,
    NoPlants,
    NothingToWater,
    PlantAdded,
    PlantRemoved,
    PlantDetails,
    Nickname,
    Species,
    Location,
    LastWatered,
    NextWatering,
    WateringSchedule,
    WateringInterval,
    DaysUntilWatering,
    DaysOverdue,
    WateringDue,
    Watered,
    WateringHistory,
    NoWateringHistory,
    FertilizingSchedule,
    FertilizingInterval,
    LastFertilized,
    NextFertilizing,
    DaysUntilFertilizing,
    FertilizingDue,
    Fertilized,
    PlantUpdated,
    Never,
    Days,
}

impl Key {
    pub const ALL: &'static [Key] = &[
        Key::MyGarden,
        Key::AllPlants,
        Key::WaterToday,
        Key::NoPlants,
        Key::NothingToWater,
        Key::PlantAdded,
        Key::PlantRemoved,
        Key::PlantDetails,
        Key::Nickname,
        Key::Species,
        Key::Location,
        Key::LastWatered,
        Key::NextWatering,
        Key::WateringSchedule,
        Key::WateringInterval,
        Key::DaysUntilWatering,
        Key::DaysOverdue,
        Key::WateringDue,
        Key::Watered,
        Key::WateringHistory,
        Key::NoWateringHistory,
        Key::FertilizingSchedule,
        Key::FertilizingInterval,
        Key::LastFertilized,
        Key::NextFertilizing,
        Key::DaysUntilFertilizing,
        Key::FertilizingDue,
        Key::Fertilized,
        Key::PlantUpdated,
        Key::Never,
        Key::Days,
    ];
}

static EN: &[(Key, &str)] = &[
    (Key::MyGarden, "My Garden"),
    (Key::AllPlants, "All Plants"),
    (Key::WaterToday, "Plants to water today"),
    (Key::NoPlants, "No plants added yet."),
    (Key::NothingToWater, "Nothing needs watering today."),
    (Key::PlantAdded, "Plant added"),
    (Key::PlantRemoved, "Plant removed"),
    (Key::PlantDetails, "Plant Details"),
    (Key::Nickname, "Nickname"),
    (Key::Species, "Species"),
    (Key::Location, "Location"),
    (Key::LastWatered, "Last Watered"),
    (Key::NextWatering, "Next Watering"),
    (Key::WateringSchedule, "Watering Schedule"),
    (Key::WateringInterval, "Custom Watering Interval"),
    (Key::DaysUntilWatering, "Days until next watering"),
    (Key::DaysOverdue, "Days overdue"),
    (Key::WateringDue, "Watering due!"),
    (Key::Watered, "Watered"),
    (Key::WateringHistory, "Watering History"),
    (Key::NoWateringHistory, "No waterings recorded yet."),
    (Key::FertilizingSchedule, "Fertilizing Schedule"),
    (Key::FertilizingInterval, "Fertilizing Interval"),
    (Key::LastFertilized, "Last Fertilized"),
    (Key::NextFertilizing, "Next Fertilizing"),
    (Key::DaysUntilFertilizing, "Days until next fertilizing"),
    (Key::FertilizingDue, "Fertilizing due!"),
    (Key::Fertilized, "Fertilized"),
    (Key::PlantUpdated, "Plant updated"),
    (Key::Never, "never"),
    (Key::Days, "days"),
];

// Missing entries fall back to English
static AR: &[(Key, &str)] = &[
    (Key::MyGarden, "حديقتي"),
    (Key::AllPlants, "جميع النباتات"),
    (Key::WaterToday, "نباتات تحتاج للري اليوم"),
    (Key::NoPlants, "لم تضف أي نباتات بعد."),
    (Key::PlantAdded, "تمت إضافة النبات"),
    (Key::PlantRemoved, "تمت إزالة النبات"),
    (Key::PlantDetails, "تفاصيل النبات"),
    (Key::Nickname, "الاسم المستعار"),
    (Key::Species, "النوع"),
    (Key::Location, "الموقع"),
    (Key::LastWatered, "آخر ري"),
    (Key::WateringSchedule, "جدول الري"),
    (Key::WateringInterval, "فترة ري مخصصة"),
    (Key::DaysUntilWatering, "أيام حتى الري القادم"),
    (Key::WateringDue, "موعد الري!"),
    (Key::Watered, "تم الري"),
    (Key::WateringHistory, "سجل الري"),
    (Key::FertilizingSchedule, "جدول التسميد"),
    (Key::FertilizingInterval, "فترة التسميد"),
    (Key::LastFertilized, "آخر تسميد"),
    (Key::FertilizingDue, "موعد التسميد!"),
    (Key::Fertilized, "تم التسميد"),
    (Key::PlantUpdated, "تم تحديث النبات"),
    (Key::Days, "أيام"),
];

fn table(locale: Locale) -> &'static [(Key, &'static str)] {
    match locale {
        Locale::En => EN,
        Locale::Ar => AR,
    }
}

fn lookup(locale: Locale, key: Key) -> Option<&'static str> {
    table(locale)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, text)| *text)
}

pub fn localize(key: Key, locale: Locale) -> &'static str {
    lookup(locale, key)
        .or_else(|| lookup(Locale::En, key))
        // Every key has an English entry, checked by tests
        .unwrap_or_default()
}
