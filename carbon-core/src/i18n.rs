//! UI string tables.
//!
//! Each locale is an embedded JSON document of nested objects; keys address
//! leaves with dots (`result.total`), array elements with their index
//! (`quiz.questions.q1.choices.2`). A key missing from the active locale is
//! looked up in [`Locale::FALLBACK`], and a key missing from both comes back
//! unchanged.

use std::fmt;

use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    En,
    #[default]
    Zh,
}

impl Locale {
    pub const FALLBACK: Locale = Locale::Zh;

    pub fn all() -> &'static [Locale] {
        &[Locale::En, Locale::Zh]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }

    /// Accepts bare codes and region-tagged ones (`zh-TW`, `en_US.UTF-8`).
    pub fn parse(tag: &str) -> Option<Self> {
        let lang = tag
            .trim()
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::all().iter().copied().find(|l| l.code() == lang)
    }

    fn source(&self) -> &'static str {
        match self {
            Locale::En => include_str!("../locales/en.json"),
            Locale::Zh => include_str!("../locales/zh.json"),
        }
    }

    fn table(&self) -> Value {
        serde_json::from_str(self.source()).unwrap_or_else(|err| {
            warn!(locale = self.code(), error = %err, "locale table is not valid JSON");
            Value::Object(serde_json::Map::new())
        })
    }
}

impl fmt::Display for Locale {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.code())
    }
}

fn lookup<'a>(
    table: &'a Value,
    key: &str,
) -> Option<&'a str> {
    let mut current = table;
    for segment in key.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    current.as_str()
}

/// Replaces every `{{name}}` with its value in a single pass over
/// `template`, so substituted values are never scanned again. Unknown
/// placeholders stay.
pub fn interpolate(
    template: &str,
    params: &[(&str, &str)],
) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            rest = &rest[start..];
            break;
        };
        let name = &after[..end];
        match params.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push_str("{{");
                out.push_str(name);
                out.push_str("}}");
            }
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

#[derive(Debug, Clone)]
pub struct Translator {
    locale: Locale,
    table: Value,
    fallback: Value,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl Translator {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            table: locale.table(),
            fallback: Locale::FALLBACK.table(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(
        &mut self,
        locale: Locale,
    ) {
        if locale != self.locale {
            self.locale = locale;
            self.table = locale.table();
        }
    }

    /// `true` when either table has a string at `key`.
    pub fn has(
        &self,
        key: &str,
    ) -> bool {
        lookup(&self.table, key).is_some() || lookup(&self.fallback, key).is_some()
    }

    pub fn translate(
        &self,
        key: &str,
        params: &[(&str, &str)],
    ) -> String {
        match lookup(&self.table, key).or_else(|| lookup(&self.fallback, key)) {
            Some(template) => interpolate(template, params),
            None => key.to_string(),
        }
    }

    /// [`translate`](Self::translate) without parameters.
    pub fn t(
        &self,
        key: &str,
    ) -> String {
        self.translate(key, &[])
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::*;

    fn leaf_keys(
        value: &Value,
        prefix: &str,
        out: &mut BTreeSet<String>,
    ) {
        let join = |segment: &str| {
            if prefix.is_empty() {
                segment.to_string()
            } else {
                format!("{prefix}.{segment}")
            }
        };
        match value {
            Value::Object(map) => {
                for (k, v) in map {
                    leaf_keys(v, &join(k), out);
                }
            }
            Value::Array(items) => {
                for (i, v) in items.iter().enumerate() {
                    leaf_keys(v, &join(&i.to_string()), out);
                }
            }
            _ => {
                out.insert(prefix.to_string());
            }
        }
    }

    #[test]
    fn both_tables_parse_and_share_their_keys() {
        let mut en = BTreeSet::new();
        let mut zh = BTreeSet::new();
        leaf_keys(&Locale::En.table(), "", &mut en);
        leaf_keys(&Locale::Zh.table(), "", &mut zh);

        assert!(!en.is_empty());
        assert_eq!(en, zh);
    }

    #[test]
    fn locale_tags_are_parsed_leniently() {
        assert_eq!(Locale::parse("en"), Some(Locale::En));
        assert_eq!(Locale::parse("zh-TW"), Some(Locale::Zh));
        assert_eq!(Locale::parse("EN_us.UTF-8"), Some(Locale::En));
        assert_eq!(Locale::parse("fr"), None);
    }

    #[test]
    fn nested_keys_and_params() {
        let t = Translator::new(Locale::En);

        assert_eq!(
            t.translate("dashboard.greeting", &[("name", "Alice")]),
            "Hello, Alice!"
        );
    }

    #[test]
    fn array_elements_are_addressable() {
        let t = Translator::new(Locale::En);

        assert_eq!(t.t("quiz.questions.q1.choices.1"), "Natural gas");
    }

    #[test]
    fn missing_key_falls_back_to_the_key_itself() {
        let t = Translator::new(Locale::En);

        assert_eq!(t.t("no.such.key"), "no.such.key");
        assert!(!t.has("no.such.key"));
    }

    #[test]
    fn missing_translation_falls_back_to_default_locale() {
        let t = Translator {
            locale: Locale::En,
            table: serde_json::json!({ "app": {} }),
            fallback: Locale::FALLBACK.table(),
        };

        assert_eq!(t.t("app.title"), Translator::new(Locale::Zh).t("app.title"));
    }

    #[test]
    fn non_string_leaf_is_not_a_translation() {
        let table = serde_json::json!({ "a": { "b": 3 } });

        assert_eq!(lookup(&table, "a.b"), None);
        assert_eq!(lookup(&table, "a"), None);
    }

    #[test]
    fn substituted_values_are_not_expanded_again() {
        assert_eq!(
            interpolate(
                "Error: {{message}} ({{name}})",
                &[("message", "hi {{name}}"), ("name", "alice")]
            ),
            "Error: hi {{name}} (alice)"
        );
    }

    #[test]
    fn unterminated_placeholder_is_left_as_is() {
        assert_eq!(interpolate("{{a}} and {{b", &[("a", "1")]), "1 and {{b");
    }

    #[test]
    fn interpolation_keeps_unknown_placeholders() {
        assert_eq!(
            interpolate("{{a}} and {{b}}", &[("a", "1")]),
            "1 and {{b}}"
        );
    }

    #[test]
    fn switching_locale_changes_output() {
        let mut t = Translator::new(Locale::Zh);
        let zh = t.t("nav.logout");

        t.set_locale(Locale::En);

        assert_eq!(t.locale(), Locale::En);
        assert_ne!(t.t("nav.logout"), zh);
    }
}
