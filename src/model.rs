use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Grid edge length. The launcher grid is always 3x3.
pub const GRID_SIZE: usize = 3;

/// Total number of slots in the grid.
pub const SLOT_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Action category of a configured slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    App,
    Folder,
    Url,
    Command,
}

impl SlotKind {
    /// Parses a configured `type` string, case-insensitively.
    /// Unrecognized values yield `None`: the slot stays inert instead of
    /// failing the whole config file.
    pub fn parse(value: &str) -> Option<SlotKind> {
        match value.trim().to_ascii_lowercase().as_str() {
            "app" => Some(SlotKind::App),
            "folder" => Some(SlotKind::Folder),
            "url" => Some(SlotKind::Url),
            "command" => Some(SlotKind::Command),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SlotKind::App => "app",
            SlotKind::Folder => "folder",
            SlotKind::Url => "url",
            SlotKind::Command => "command",
        }
    }
}

/// One of the nine launcher entries.
///
/// Every field is optional; an entry can also be entirely absent (`null` in
/// the config file), which is distinct from a slot with empty fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Declared action category. Serialized as the `type` field.
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_kind",
        deserialize_with = "deserialize_kind"
    )]
    pub kind: Option<SlotKind>,

    /// Executable/path, folder path, URL or shell command text, depending
    /// on `kind`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Relative or absolute icon path. Resolving and painting it is the
    /// presentation layer's job.
    #[serde(
        rename = "iconPath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub icon_path: Option<String>,
}

impl Slot {
    pub fn new(
        title: impl Into<String>,
        kind: SlotKind,
        target: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            kind: Some(kind),
            target: Some(target.into()),
            icon_path: None,
        }
    }

    pub fn with_icon(mut self, icon_path: impl Into<String>) -> Self {
        self.icon_path = Some(icon_path.into());
        self
    }

    /// The target with surrounding whitespace stripped, if it is non-blank.
    pub fn target_text(&self) -> Option<&str> {
        self.target
            .as_deref()
            .map(str::trim)
            .filter(|target| !target.is_empty())
    }
}

fn serialize_kind<S: Serializer>(
    kind: &Option<SlotKind>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match kind {
        Some(kind) => serializer.serialize_some(kind.as_str()),
        None => serializer.serialize_none(),
    }
}

fn deserialize_kind<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<SlotKind>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(SlotKind::parse))
}

/// The ordered sequence of nine slot-or-absent entries.
///
/// Normalization keeps the length at exactly [`SLOT_COUNT`]; every other
/// part of the crate relies on that invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotConfig {
    #[serde(default)]
    pub slots: Vec<Option<Slot>>,
}

impl SlotConfig {
    /// Pads a short slot list with absent entries and truncates a long one
    /// to the first nine. Idempotent.
    pub fn normalize(&mut self) {
        self.slots.resize(SLOT_COUNT, None);
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Slot at `index`, if the index is in range and the entry is present.
    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing_is_case_insensitive() {
        assert_eq!(SlotKind::parse("app"), Some(SlotKind::App));
        assert_eq!(SlotKind::parse("APP"), Some(SlotKind::App));
        assert_eq!(SlotKind::parse("Folder"), Some(SlotKind::Folder));
        assert_eq!(SlotKind::parse(" url "), Some(SlotKind::Url));
        assert_eq!(SlotKind::parse("COMMAND"), Some(SlotKind::Command));
    }

    #[test]
    fn test_unknown_kind_is_inert_not_an_error() {
        assert_eq!(SlotKind::parse("applet"), None);
        assert_eq!(SlotKind::parse(""), None);

        let slot: Slot =
            serde_json::from_str(r#"{"title":"X","type":"applet","target":"x"}"#).unwrap();
        assert_eq!(slot.kind, None);
        assert_eq!(slot.title.as_deref(), Some("X"));
    }

    #[test]
    fn test_slot_field_names_match_schema() {
        let slot = Slot::new("Terminal", SlotKind::App, "x-terminal-emulator")
            .with_icon("icons/terminal.png");

        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["type"], "app");
        assert_eq!(json["iconPath"], "icons/terminal.png");

        let loaded: Slot = serde_json::from_value(json).unwrap();
        assert_eq!(loaded, slot);
    }

    #[test]
    fn test_target_text_treats_blank_as_absent() {
        let mut slot = Slot::new("X", SlotKind::App, "   ");
        assert_eq!(slot.target_text(), None);

        slot.target = Some(" vlc ".to_string());
        assert_eq!(slot.target_text(), Some("vlc"));

        slot.target = None;
        assert_eq!(slot.target_text(), None);
    }

    #[test]
    fn test_normalize_pads_and_truncates() {
        let mut short = SlotConfig {
            slots: vec![Some(Slot::new("A", SlotKind::App, "a")), None, None],
        };
        short.normalize();
        assert_eq!(short.slots.len(), SLOT_COUNT);
        assert!(short.slots[3..].iter().all(Option::is_none));

        let mut long = SlotConfig {
            slots: (0..12)
                .map(|i| Some(Slot::new(format!("S{i}"), SlotKind::App, "a")))
                .collect(),
        };
        long.normalize();
        assert_eq!(long.slots.len(), SLOT_COUNT);
        assert_eq!(
            long.slots[8].as_ref().and_then(|s| s.title.as_deref()),
            Some("S8")
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut config = SlotConfig::default();
        config.normalize();
        let once = config.clone();
        config.normalize();
        assert_eq!(config, once);
    }

    #[test]
    fn test_get_is_total() {
        let config = SlotConfig::default().normalized();
        assert!(config.get(0).is_none());
        assert!(config.get(8).is_none());
        assert!(config.get(100).is_none());
    }
}
