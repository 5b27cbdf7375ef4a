//! Localization seam.
//!
//! The clock and the renderer look strings up through [`Localize`]; the file
//! backed implementation lives in the store crate. Lookups never fail: a
//! missing list is empty and a missing template echoes its key and arguments.

/// Season names used when no translation provides `time.seasons`.
pub const FALLBACK_SEASONS: [&str; 4] = ["Spring", "Summer", "Autumn", "Winter"];

/// Weekday names used when no translation provides `time.weekdays`.
pub const FALLBACK_WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub trait Localize: Send + Sync {
    /// Ordered list for `category.key`, empty when absent.
    fn get_list(&self, category: &str, key: &str) -> Vec<String>;

    /// Template for `category.key` with `{name}` placeholders filled in.
    fn format(&self, category: &str, key: &str, vars: &[(&str, &str)]) -> String;
}

/// Localizer with no tables: empty lists, echoed keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocale;

impl Localize for NoLocale {
    fn get_list(&self, _category: &str, _key: &str) -> Vec<String> {
        Vec::new()
    }

    fn format(&self, _category: &str, key: &str, vars: &[(&str, &str)]) -> String {
        echo_key(key, vars)
    }
}

/// Replace every `{name}` in `template` with its value from `vars`.
///
/// Unknown placeholders are left as written.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match vars.iter().find(|(k, _)| *k == name) {
                    Some((_, v)) => out.push_str(v),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Fallback text for a missing template: `"key: a=1, b=2"`.
pub fn echo_key(key: &str, vars: &[(&str, &str)]) -> String {
    if vars.is_empty() {
        return key.to_string();
    }
    let args: Vec<String> = vars.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{key}: {}", args.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_substitution() {
        assert_eq!(
            fill_template("{season} {day}", &[("season", "Spring"), ("day", "3")]),
            "Spring 3"
        );
        assert_eq!(fill_template("{missing}!", &[]), "{missing}!");
        assert_eq!(fill_template("open {brace", &[]), "open {brace");
    }

    #[test]
    fn no_locale_echoes() {
        assert!(NoLocale.get_list("time", "seasons").is_empty());
        assert_eq!(NoLocale.format("ui", "hint", &[]), "hint");
        assert_eq!(
            NoLocale.format("ui", "saved", &[("x", "1"), ("y", "2")]),
            "saved: x=1, y=2"
        );
    }
}
