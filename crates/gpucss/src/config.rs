//! Immutable transformation settings.

use crate::transform::GpuProperty;

/// Property substrings targeted when no list is given.
pub const DEFAULT_TARGET_PROPERTIES: [&str; 3] = ["animation", "transition", "@keyframes"];

/// Which declarations to inject and which rule blocks receive them.
///
/// Lists are ordered sets of substrings: entries are trimmed, empty entries
/// are dropped, and repeated entries keep their first position. A value is
/// never mutated by the engine; the `with_*` methods return a new value.
///
/// # Examples
///
/// ```
/// use gpucss::Configuration;
///
/// let config = Configuration::default()
///     .with_perspective(false)
///     .with_exclude_selectors([".no-gpu", "", " .no-gpu "]);
///
/// assert!(!config.enable_perspective());
/// assert_eq!(config.exclude_selectors(), [".no-gpu"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Configuration {
    enable_transform: bool,
    enable_will_change: bool,
    enable_backface: bool,
    enable_perspective: bool,
    exclude_selectors: Vec<String>,
    target_properties: Vec<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            enable_transform: true,
            enable_will_change: true,
            enable_backface: true,
            enable_perspective: true,
            exclude_selectors: Vec::new(),
            target_properties: normalize_entries(DEFAULT_TARGET_PROPERTIES),
        }
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration that injects nothing and matches nothing.
    pub fn disabled() -> Self {
        Self {
            enable_transform: false,
            enable_will_change: false,
            enable_backface: false,
            enable_perspective: false,
            exclude_selectors: Vec::new(),
            target_properties: Vec::new(),
        }
    }

    /// Builds the selector lists from comma-separated option strings such as
    /// `".no-gpu, #legacy"` and `"animation, transition"`.
    pub fn from_lists(exclude_selectors: &str, target_properties: &str) -> Self {
        Self::default()
            .with_exclude_selectors(exclude_selectors.split(','))
            .with_target_properties(target_properties.split(','))
    }

    pub fn with_transform(mut self, enabled: bool) -> Self {
        self.enable_transform = enabled;
        self
    }

    pub fn with_will_change(mut self, enabled: bool) -> Self {
        self.enable_will_change = enabled;
        self
    }

    pub fn with_backface(mut self, enabled: bool) -> Self {
        self.enable_backface = enabled;
        self
    }

    pub fn with_perspective(mut self, enabled: bool) -> Self {
        self.enable_perspective = enabled;
        self
    }

    /// Replaces the exclusion list.
    pub fn with_exclude_selectors<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude_selectors = normalize_entries(entries);
        self
    }

    /// Replaces the target property list.
    pub fn with_target_properties<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.target_properties = normalize_entries(entries);
        self
    }

    pub fn enable_transform(&self) -> bool {
        self.enable_transform
    }

    pub fn enable_will_change(&self) -> bool {
        self.enable_will_change
    }

    pub fn enable_backface(&self) -> bool {
        self.enable_backface
    }

    pub fn enable_perspective(&self) -> bool {
        self.enable_perspective
    }

    pub fn exclude_selectors(&self) -> &[String] {
        &self.exclude_selectors
    }

    pub fn target_properties(&self) -> &[String] {
        &self.target_properties
    }

    pub fn is_enabled(&self, property: GpuProperty) -> bool {
        match property {
            GpuProperty::Transform => self.enable_transform,
            GpuProperty::WillChange => self.enable_will_change,
            GpuProperty::BackfaceVisibility => self.enable_backface,
            GpuProperty::Perspective => self.enable_perspective,
        }
    }

    /// Enabled injections in their fixed output order.
    pub fn enabled_properties(&self) -> impl Iterator<Item = GpuProperty> + '_ {
        GpuProperty::ALL
            .into_iter()
            .filter(|property| self.is_enabled(*property))
    }
}

fn normalize_entries<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry.as_ref().trim();
        if !entry.is_empty() && !out.iter().any(|seen| seen == entry) {
            out.push(entry.to_string());
        }
    }
    out
}
