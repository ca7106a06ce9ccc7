//! Route name inflection: mapping logical route names to their
//! locale-specific variants and back.

/// Strategy converting between logical and locale-specific route names.
///
/// `recognize` must invert `inflect`: for any logical name `n` and locale `l`,
/// `recognize(&inflect(n, l), l) == Some(n)`. Recognition is tied to the given
/// locale and returns `None` when the name does not carry that locale.
pub trait RouteNameInflector: Send + Sync {
    /// Locale-specific name of `name` for `locale`.
    fn inflect(&self, name: &str, locale: &str) -> String;

    /// Logical name of a locale-specific `name` for `locale`, if it is one.
    fn recognize(&self, name: &str, locale: &str) -> Option<String>;
}

/// Default strategy: appends `.{locale}` to the logical name.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostfixInflector;

impl PostfixInflector {
    pub fn new() -> Self {
        Self
    }
}

impl RouteNameInflector for PostfixInflector {
    fn inflect(&self, name: &str, locale: &str) -> String {
        format!("{}.{}", name, locale)
    }

    fn recognize(&self, name: &str, locale: &str) -> Option<String> {
        if locale.is_empty() {
            return None;
        }

        name.strip_suffix(locale)
            .and_then(|rest| rest.strip_suffix('.'))
            .filter(|logical| !logical.is_empty())
            .map(str::to_string)
    }
}
