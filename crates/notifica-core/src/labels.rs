//! Localized inbox labels and relative timestamps.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Supported label locales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// Brazilian Portuguese (primary locale)
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    /// English
    #[serde(rename = "en")]
    En,
}

impl Locale {
    /// The BCP 47 tag used on the wire and in config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PtBr => "pt-BR",
            Self::En => "en",
        }
    }

    /// Label table for this locale.
    #[must_use]
    pub fn labels(self) -> &'static Labels {
        match self {
            Self::PtBr => &LABELS_PT_BR,
            Self::En => &LABELS_EN,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt-br" | "pt_br" | "pt" => Ok(Self::PtBr),
            "en" | "en-us" | "en_us" => Ok(Self::En),
            other => Err(Error::Configuration(format!(
                "unsupported locale '{other}' (expected pt-BR or en)"
            ))),
        }
    }
}

/// Label table for one locale, optionally with caller overrides applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub locale: Locale,
    pub notifications: Cow<'static, str>,
    pub mark_all_as_read: Cow<'static, str>,
    pub load_more: Cow<'static, str>,
    pub empty_title: Cow<'static, str>,
    pub empty_description: Cow<'static, str>,
    pub just_now: Cow<'static, str>,
    pub yesterday: Cow<'static, str>,
    /// Replacement wording for the counted phrases; `{n}` is the count.
    pub minutes_ago_template: Option<Cow<'static, str>>,
    pub hours_ago_template: Option<Cow<'static, str>>,
    pub days_ago_template: Option<Cow<'static, str>>,
}

pub static LABELS_PT_BR: Labels = Labels {
    locale: Locale::PtBr,
    notifications: Cow::Borrowed("Notificações"),
    mark_all_as_read: Cow::Borrowed("Marcar todas como lidas"),
    load_more: Cow::Borrowed("Carregar mais"),
    empty_title: Cow::Borrowed("Nenhuma notificação"),
    empty_description: Cow::Borrowed("Quando você receber notificações, elas aparecerão aqui."),
    just_now: Cow::Borrowed("agora"),
    yesterday: Cow::Borrowed("ontem"),
    minutes_ago_template: None,
    hours_ago_template: None,
    days_ago_template: None,
};

pub static LABELS_EN: Labels = Labels {
    locale: Locale::En,
    notifications: Cow::Borrowed("Notifications"),
    mark_all_as_read: Cow::Borrowed("Mark all as read"),
    load_more: Cow::Borrowed("Load more"),
    empty_title: Cow::Borrowed("No notifications"),
    empty_description: Cow::Borrowed("When you receive notifications, they'll appear here."),
    just_now: Cow::Borrowed("just now"),
    yesterday: Cow::Borrowed("yesterday"),
    minutes_ago_template: None,
    hours_ago_template: None,
    days_ago_template: None,
};

/// Per-field replacements layered over a locale's table.
///
/// Unset fields keep the locale wording. The counted phrases take a template
/// such as `"{n} min atrás"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelOverrides {
    #[serde(default)]
    pub notifications: Option<String>,
    #[serde(default)]
    pub mark_all_as_read: Option<String>,
    #[serde(default)]
    pub load_more: Option<String>,
    #[serde(default)]
    pub empty_title: Option<String>,
    #[serde(default)]
    pub empty_description: Option<String>,
    #[serde(default)]
    pub just_now: Option<String>,
    #[serde(default)]
    pub yesterday: Option<String>,
    #[serde(default)]
    pub minutes_ago: Option<String>,
    #[serde(default)]
    pub hours_ago: Option<String>,
    #[serde(default)]
    pub days_ago: Option<String>,
}

impl LabelOverrides {
    /// Read `NOTIFICA_LABEL_<FIELD>` variables, e.g. `NOTIFICA_LABEL_LOAD_MORE`.
    pub fn from_lookup(read: impl Fn(&str) -> Option<String>) -> Self {
        let field = |name: &str| read(&format!("NOTIFICA_LABEL_{name}"));
        Self {
            notifications: field("NOTIFICATIONS"),
            mark_all_as_read: field("MARK_ALL_AS_READ"),
            load_more: field("LOAD_MORE"),
            empty_title: field("EMPTY_TITLE"),
            empty_description: field("EMPTY_DESCRIPTION"),
            just_now: field("JUST_NOW"),
            yesterday: field("YESTERDAY"),
            minutes_ago: field("MINUTES_AGO"),
            hours_ago: field("HOURS_AGO"),
            days_ago: field("DAYS_AGO"),
        }
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            notifications: other.notifications.or(self.notifications),
            mark_all_as_read: other.mark_all_as_read.or(self.mark_all_as_read),
            load_more: other.load_more.or(self.load_more),
            empty_title: other.empty_title.or(self.empty_title),
            empty_description: other.empty_description.or(self.empty_description),
            just_now: other.just_now.or(self.just_now),
            yesterday: other.yesterday.or(self.yesterday),
            minutes_ago: other.minutes_ago.or(self.minutes_ago),
            hours_ago: other.hours_ago.or(self.hours_ago),
            days_ago: other.days_ago.or(self.days_ago),
        }
    }
}

fn pick(value: Option<&String>, base: &Cow<'static, str>) -> Cow<'static, str> {
    value.map_or_else(|| base.clone(), |value| Cow::Owned(value.clone()))
}

fn pick_template(
    value: Option<&String>,
    base: Option<&Cow<'static, str>>,
) -> Option<Cow<'static, str>> {
    value
        .map(|value| Cow::Owned(value.clone()))
        .or_else(|| base.cloned())
}

impl Labels {
    /// Copy of this table with every set override applied.
    #[must_use]
    pub fn with_overrides(&self, overrides: &LabelOverrides) -> Self {
        Self {
            locale: self.locale,
            notifications: pick(overrides.notifications.as_ref(), &self.notifications),
            mark_all_as_read: pick(overrides.mark_all_as_read.as_ref(), &self.mark_all_as_read),
            load_more: pick(overrides.load_more.as_ref(), &self.load_more),
            empty_title: pick(overrides.empty_title.as_ref(), &self.empty_title),
            empty_description: pick(overrides.empty_description.as_ref(), &self.empty_description),
            just_now: pick(overrides.just_now.as_ref(), &self.just_now),
            yesterday: pick(overrides.yesterday.as_ref(), &self.yesterday),
            minutes_ago_template: pick_template(
                overrides.minutes_ago.as_ref(),
                self.minutes_ago_template.as_ref(),
            ),
            hours_ago_template: pick_template(
                overrides.hours_ago.as_ref(),
                self.hours_ago_template.as_ref(),
            ),
            days_ago_template: pick_template(
                overrides.days_ago.as_ref(),
                self.days_ago_template.as_ref(),
            ),
        }
    }

    #[must_use]
    pub fn minutes_ago(&self, minutes: i64) -> String {
        if let Some(template) = &self.minutes_ago_template {
            return fill_count(template, minutes);
        }
        match self.locale {
            Locale::PtBr => format!("há {minutes} min"),
            Locale::En => format!("{minutes}m ago"),
        }
    }

    #[must_use]
    pub fn hours_ago(&self, hours: i64) -> String {
        if let Some(template) = &self.hours_ago_template {
            return fill_count(template, hours);
        }
        match (self.locale, hours) {
            (Locale::PtBr, 1) => "há 1 hora".to_string(),
            (Locale::PtBr, _) => format!("há {hours} horas"),
            (Locale::En, _) => format!("{hours}h ago"),
        }
    }

    #[must_use]
    pub fn days_ago(&self, days: i64) -> String {
        if let Some(template) = &self.days_ago_template {
            return fill_count(template, days);
        }
        match self.locale {
            Locale::PtBr => format!("há {days} dias"),
            Locale::En => format!("{days}d ago"),
        }
    }

    /// Calendar date used once a timestamp is too old for relative wording.
    #[must_use]
    pub fn date(&self, at: DateTime<Utc>) -> String {
        match self.locale {
            Locale::PtBr => at.format("%d/%m/%Y").to_string(),
            Locale::En => at.format("%-m/%-d/%Y").to_string(),
        }
    }
}

fn fill_count(template: &str, count: i64) -> String {
    template.replace("{n}", &count.to_string())
}

/// Render `at` relative to `now` ("just now", "5m ago", "yesterday", ...).
#[must_use]
pub fn format_relative_time(at: DateTime<Utc>, now: DateTime<Utc>, labels: &Labels) -> String {
    let elapsed = now.signed_duration_since(at);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        labels.just_now.to_string()
    } else if minutes < 60 {
        labels.minutes_ago(minutes)
    } else if hours < 24 {
        labels.hours_ago(hours)
    } else if days == 1 {
        labels.yesterday.to_string()
    } else if days < 30 {
        labels.days_ago(days)
    } else {
        labels.date(at)
    }
}
