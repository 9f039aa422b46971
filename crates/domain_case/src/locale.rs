//! Localized stage labels
//!
//! Status badges and timeline titles are available in English and Russian.
//! Messages come from the Fluent resources under `locales/`; a missing message
//! falls back to the English text of the stage descriptor.

use std::fmt;
use std::str::FromStr;

use fluent::{FluentBundle, FluentResource};
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::error::CaseError;
use crate::stage::describe;
use crate::status::CaseStatus;

const EN_RESOURCE: &str = include_str!("../locales/en.ftl");
const RU_RESOURCE: &str = include_str!("../locales/ru.ftl");

/// Display language of the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    pub fn language_tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
        }
    }

    /// The other language, as offered by the language switcher
    pub fn toggle(self) -> Self {
        match self {
            Locale::En => Locale::Ru,
            Locale::Ru => Locale::En,
        }
    }

    fn resource(self) -> &'static str {
        match self {
            Locale::En => EN_RESOURCE,
            Locale::Ru => RU_RESOURCE,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.language_tag())
    }
}

impl FromStr for Locale {
    type Err = CaseError;

    /// Accepts a bare language (`ru`) or a full tag (`en-US`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s.split(['-', '_']).next().unwrap_or_default().to_lowercase();
        match primary.as_str() {
            "en" => Ok(Locale::En),
            "ru" => Ok(Locale::Ru),
            _ => Err(CaseError::Localization(format!("unsupported locale: {}", s))),
        }
    }
}

/// Localized labels for every stage in one language
pub struct StageCatalog {
    locale: Locale,
    bundle: FluentBundle<FluentResource>,
}

impl fmt::Debug for StageCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageCatalog")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl StageCatalog {
    /// Loads the catalog for `locale`
    ///
    /// # Errors
    ///
    /// `CaseError::Localization` if the bundled resource fails to parse.
    pub fn new(locale: Locale) -> Result<Self, CaseError> {
        let language: LanguageIdentifier = locale
            .language_tag()
            .parse()
            .map_err(|e| CaseError::Localization(format!("{:?}", e)))?;

        let resource = FluentResource::try_new(locale.resource().to_string())
            .map_err(|(_, errors)| {
                CaseError::Localization(format!("{} parse errors in {} resource", errors.len(), locale))
            })?;

        let mut bundle = FluentBundle::new(vec![language]);
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| {
                CaseError::Localization(format!("{} errors adding {} resource", errors.len(), locale))
            })?;

        Ok(Self { locale, bundle })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Badge label for a status
    pub fn status_label(&self, status: CaseStatus) -> String {
        self.message(&message_id("status", status))
            .unwrap_or_else(|| describe(status).label.to_string())
    }

    /// Timeline title for a status
    pub fn timeline_title(&self, status: CaseStatus) -> String {
        self.message(&message_id("timeline", status))
            .unwrap_or_else(|| describe(status).title.to_string())
    }

    fn message(&self, id: &str) -> Option<String> {
        let message = self.bundle.get_message(id)?;
        let pattern = message.value()?;
        let mut errors = Vec::new();
        let value = self.bundle.format_pattern(pattern, None, &mut errors);
        if errors.is_empty() {
            Some(value.into_owned())
        } else {
            None
        }
    }
}

fn message_id(group: &str, status: CaseStatus) -> String {
    format!("{}-{}", group, status.as_str().replace('_', "-"))
}
