//! Voice selection.

use super::backend::Voice;

/// Picks the voice to use for `locale` (e.g. `en-CA`).
///
/// Within the locale's language family the exact locale wins, then any
/// regional variant, then the first family voice. Without a family match
/// the first available voice is used; with no voices at all, `None`
/// leaves the choice to the platform.
pub fn select_voice(voices: &[Voice], locale: &str) -> Option<Voice> {
    let wanted = normalize(locale);
    let family = language_family(&wanted);

    let in_family: Vec<&Voice> = voices
        .iter()
        .filter(|v| language_family(&normalize(&v.lang)) == family)
        .collect();

    if in_family.is_empty() {
        return voices.first().cloned();
    }

    in_family
        .iter()
        .find(|v| normalize(&v.lang) == wanted)
        .or_else(|| in_family.iter().find(|v| normalize(&v.lang).contains('-')))
        .or_else(|| in_family.first())
        .map(|v| (*v).clone())
}

fn normalize(tag: &str) -> String {
    tag.trim().replace('_', "-").to_lowercase()
}

fn language_family(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(lang: &str) -> Voice {
        Voice {
            id: lang.to_string(),
            name: lang.to_string(),
            lang: lang.to_string(),
        }
    }

    #[test]
    fn exact_locale_preferred() {
        let voices = [voice("en"), voice("en-GB"), voice("en_CA")];
        assert_eq!(select_voice(&voices, "en-CA"), Some(voice("en_CA")));
    }

    #[test]
    fn regional_variant_before_bare_family() {
        let voices = [voice("fr-FR"), voice("en"), voice("en-us")];
        assert_eq!(select_voice(&voices, "en-CA"), Some(voice("en-us")));
    }

    #[test]
    fn bare_family_voice_when_no_region() {
        let voices = [voice("de"), voice("en")];
        assert_eq!(select_voice(&voices, "en-CA"), Some(voice("en")));
    }

    #[test]
    fn falls_back_to_first_voice() {
        let voices = [voice("de-DE"), voice("fr-FR")];
        assert_eq!(select_voice(&voices, "en-CA"), Some(voice("de-DE")));
    }

    #[test]
    fn no_voices_means_platform_default() {
        assert_eq!(select_voice(&[], "en-CA"), None);
    }
}
