//! # Labels Module
//!
//! User-facing texts for progress views and timeline entries, per locale.

use crate::timeline::Milestone;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language of every generated label and formatted date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            "ru" | "ru-ru" => Ok(Self::Ru),
            other => Err(format!("unsupported locale '{other}' (expected en or ru)")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::En => f.write_str("en"),
            Self::Ru => f.write_str("ru"),
        }
    }
}

/// Adult sub-stages shown by the progress view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AdultPhase {
    Emergence,
    Maturation,
    MatingFlight,
    Insemination,
    LayingCheck,
}

/// Genitive month names, as used after a day number.
const RU_MONTHS: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

impl Locale {
    pub(crate) fn day_title(self, day: i64) -> String {
        match self {
            Self::En => format!("Day {day}"),
            Self::Ru => format!("День {day}"),
        }
    }

    pub(crate) fn remaining_days(self, days: i64) -> String {
        match self {
            Self::En => format!("{days} days remaining"),
            Self::Ru => format!("Осталось {days} дней"),
        }
    }

    pub(crate) fn egg_stage(self) -> &'static str {
        match self {
            Self::En => "Egg stage",
            Self::Ru => "Стадия яйца",
        }
    }

    pub(crate) fn larva_stage(self) -> &'static str {
        match self {
            Self::En => "Larva stage",
            Self::Ru => "Стадия личинки",
        }
    }

    pub(crate) fn pupa_stage(self) -> &'static str {
        match self {
            Self::En => "Pupa stage",
            Self::Ru => "Стадия куколки",
        }
    }

    pub(crate) fn adult_phase(self, phase: AdultPhase) -> &'static str {
        match (self, phase) {
            (Self::En, AdultPhase::Emergence) => "Queen emergence",
            (Self::En, AdultPhase::Maturation) => "Maturation",
            (Self::En, AdultPhase::MatingFlight) => "Mating flight",
            (Self::En, AdultPhase::Insemination) => "Insemination",
            (Self::En, AdultPhase::LayingCheck) => "Laying-check",
            (Self::Ru, AdultPhase::Emergence) => "Выход из маточника",
            (Self::Ru, AdultPhase::Maturation) => "Созревание",
            (Self::Ru, AdultPhase::MatingFlight) => "Брачный облёт",
            (Self::Ru, AdultPhase::Insemination) => "Осеменение",
            (Self::Ru, AdultPhase::LayingCheck) => "Проверка яйцекладки",
        }
    }

    pub(crate) fn completed_title(self) -> &'static str {
        match self {
            Self::En => "Completed",
            Self::Ru => "Завершено",
        }
    }

    pub(crate) fn completed_description(self) -> &'static str {
        match self {
            Self::En => "Queen developed successfully",
            Self::Ru => "Матка успешно развилась",
        }
    }

    pub(crate) fn cycle_complete(self) -> &'static str {
        match self {
            Self::En => "Cycle complete",
            Self::Ru => "Цикл завершён",
        }
    }

    /// Title and description of a timeline milestone.
    pub(crate) fn milestone(self, milestone: Milestone) -> (String, &'static str) {
        match self {
            Self::En => en_milestone(milestone),
            Self::Ru => ru_milestone(milestone),
        }
    }

    /// "day month-name", e.g. `12 June` or `12 июня`.
    pub fn format_day_month(self, date: NaiveDate) -> String {
        match self {
            Self::En => date.format("%-d %B").to_string(),
            Self::Ru => {
                let month = RU_MONTHS[date.month0() as usize];
                format!("{} {month}", date.day())
            }
        }
    }
}

fn en_milestone(milestone: Milestone) -> (String, &'static str) {
    let (title, description) = match milestone {
        Milestone::EggStanding => ("Egg: Day 1", "Egg is laid and stands upright"),
        Milestone::EggTilted => ("Egg: Day 2", "Egg tilts over"),
        Milestone::EggLying => ("Egg: Day 3", "Egg lies on the bottom of the cell"),
        Milestone::Hatch => ("Larva: Hatching", "Larva hatches from the egg"),
        Milestone::Feeding(day) => {
            return (
                format!("Larva: Day {day}"),
                "Active feeding with royal jelly",
            );
        }
        Milestone::Sealed => ("Cell sealing", "Worker bees seal the cell"),
        Milestone::PupaStart => ("Pupa", "Pupa stage begins"),
        Milestone::Selection => ("Queen cell selection", "Recommended day for selecting cells"),
        Milestone::PupaEnd => ("Awaiting emergence", "Pupa stage ends"),
        Milestone::Emergence => ("Queen emergence", "Emergence period begins"),
        Milestone::Maturation => ("Maturation", "Maturation period begins"),
        Milestone::MatingFlight => ("Mating flight", "Mating flight period begins"),
        Milestone::Insemination => ("Insemination", "Period of laying unfertilized eggs"),
        Milestone::CheckLayingStart => ("Laying check", "Brood check begins"),
        Milestone::CheckLayingEnd => ("Check complete", "Brood check period ends"),
    };
    (title.to_string(), description)
}

fn ru_milestone(milestone: Milestone) -> (String, &'static str) {
    let (title, description) = match milestone {
        Milestone::EggStanding => ("Яйцо: День 1", "Яйцо отложено и стоит вертикально"),
        Milestone::EggTilted => ("Яйцо: День 2", "Яйцо наклоняется"),
        Milestone::EggLying => ("Яйцо: День 3", "Яйцо лежит на дне ячейки"),
        Milestone::Hatch => ("Личинка: Вылупление", "Из яйца вылупляется личинка"),
        Milestone::Feeding(day) => {
            return (
                format!("Личинка: День {day}"),
                "Активное кормление маточным молочком",
            );
        }
        Milestone::Sealed => ("Запечатывание ячейки", "Рабочие пчёлы запечатывают ячейку"),
        Milestone::PupaStart => ("Куколка", "Начало стадии куколки"),
        Milestone::Selection => ("Отбор маточников", "Рекомендуемый день для отбора"),
        Milestone::PupaEnd => ("Ожидание выхода", "Конец стадии куколки"),
        Milestone::Emergence => ("Выход матки", "Начало периода выхода матки"),
        Milestone::Maturation => ("Созревание", "Начало периода созревания"),
        Milestone::MatingFlight => ("Брачный облёт", "Начало периода облётов"),
        Milestone::Insemination => ("Осеменение", "Период откладки неоплодотворенных яиц"),
        Milestone::CheckLayingStart => ("Проверка яйцекладки", "Начало проверки на засев"),
        Milestone::CheckLayingEnd => ("Завершение проверки", "Конец периода проверки"),
    };
    (title.to_string(), description)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn locale_parses_case_insensitively() {
        assert_eq!("EN".parse::<Locale>(), Ok(Locale::En));
        assert_eq!(" ru ".parse::<Locale>(), Ok(Locale::Ru));
        assert_eq!("ru-RU".parse::<Locale>(), Ok(Locale::Ru));
        assert!("de".parse::<Locale>().is_err());
    }

    #[test]
    fn locale_display_roundtrips_through_from_str() {
        for locale in [Locale::En, Locale::Ru] {
            assert_eq!(locale.to_string().parse::<Locale>(), Ok(locale));
        }
    }

    #[test]
    fn english_day_month() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        assert_eq!(Locale::En.format_day_month(date), "12 June");
    }

    #[test]
    fn russian_day_month_uses_genitive() {
        let june = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let may = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        assert_eq!(Locale::Ru.format_day_month(june), "2 июня");
        assert_eq!(Locale::Ru.format_day_month(may), "31 мая");
    }

    #[test]
    fn feeding_titles_carry_day_number() {
        let (title, _) = Locale::En.milestone(Milestone::Feeding(3));
        assert_eq!(title, "Larva: Day 3");
        let (title, _) = Locale::Ru.milestone(Milestone::Feeding(5));
        assert_eq!(title, "Личинка: День 5");
    }

    #[test]
    fn remaining_days_text() {
        assert_eq!(Locale::En.remaining_days(4), "4 days remaining");
        assert_eq!(Locale::Ru.remaining_days(4), "Осталось 4 дней");
    }
}
