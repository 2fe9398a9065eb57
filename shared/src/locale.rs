use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Locale {
    En,
    De,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    #[error("document has no language attribute")]
    Missing,
    #[error("unsupported document language '{0}'")]
    Unsupported(String),
}

/// Submit button labels for the two phases of a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusText {
    pub sending: &'static str,
    pub sent: &'static str,
}

const EN_STATUS: StatusText = StatusText { sending: "Sending ...", sent: "Sent!" };
const DE_STATUS: StatusText = StatusText { sending: "Sendet ...", sent: "Gesendet!" };

impl Locale {
    /// Parses the `lang` attribute of the document root.
    ///
    /// Only the primary subtag is considered, so `de-AT` resolves to `De`.
    /// Anything outside the two known locales is an error rather than a
    /// silent fallback.
    pub fn from_lang_attribute(lang: Option<&str>) -> Result<Self, LocaleError> {
        let lang = lang.map(str::trim).filter(|lang| !lang.is_empty()).ok_or(LocaleError::Missing)?;
        let primary = lang.split(['-', '_']).next().unwrap_or(lang);
        Self::from_code(primary).ok_or_else(|| LocaleError::Unsupported(lang.to_string()))
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "en" => Some(Locale::En),
            "de" => Some(Locale::De),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
        }
    }

    pub fn status_text(self) -> StatusText {
        match self {
            Locale::En => EN_STATUS,
            Locale::De => DE_STATUS,
        }
    }
}

/// Picks the page language for a visitor from their `Accept-Language` header.
///
/// The first two characters of the header are compared against `supported`
/// ignoring ASCII case, so `DE` picks `de`. Anything else gets `default`.
pub fn negotiate_language<'a>(accept_language: Option<&str>, supported: &'a [String], default: &'a str) -> &'a str {
    let Some(prefix) = accept_language.and_then(|header| header.get(..2)) else {
        return default;
    };
    let prefix = prefix.to_ascii_lowercase();
    supported
        .iter()
        .find(|lang| **lang == prefix)
        .map(String::as_str)
        .unwrap_or(default)
}

pub fn redirect_location(lang: &str) -> String {
    format!("/{lang}/index.html")
}
