//! Key Translation Table: relay key names to injectable key actions.
//!
//! The guest's browser reports keys by their DOM `KeyboardEvent.key` value
//! (`"a"`, `"Enter"`, `"ArrowLeft"`, `"F5"`).  The host injects keys either
//! as literal text or as a Virtual-Key stroke with modifiers held.  This
//! module decides which, and resolves the Virtual-Key code.
//!
//! # Rules (applied in order)
//!
//! 1. A single printable character with neither Ctrl nor Alt held is typed as
//!    text.  Its case already encodes Shift.  The one exception is an ASCII
//!    letter with Shift held, which takes the key-code path so that Shift is
//!    pressed explicitly.
//! 2. Otherwise the name is uppercased; a single alphanumeric character gets
//!    the `VK_` prefix (`a` → `VK_A`).
//! 3. Protocol spellings that differ from the Virtual-Key names are rewritten
//!    through [`KEY_ALIASES`].
//! 4. The result is looked up in [`VIRTUAL_KEY_NAMES`].  A miss is an error.
//! 5. Shift, Ctrl and Alt (in that order) form the modifier set of the stroke.

pub mod virtual_key;

pub use virtual_key::{VirtualKeyCode, VIRTUAL_KEY_NAMES};

use thiserror::Error;

/// Protocol key names whose Virtual-Key spelling differs.
///
/// Names absent from this table pass through unchanged.
pub const KEY_ALIASES: &[(&str, &str)] = &[
    ("BACKSPACE", "BACK"),
    ("ENTER", "RETURN"),
    ("ALT", "MENU"),
    ("ARROWLEFT", "LEFT"),
    ("ARROWRIGHT", "RIGHT"),
    ("ARROWUP", "UP"),
    ("ARROWDOWN", "DOWN"),
];

/// Errors produced by key translation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyMapError {
    /// The key name does not resolve to any injectable Virtual-Key code.
    #[error("unknown key {raw:?} (looked up as {resolved:?})")]
    UnknownKey {
        /// The key name as received from the relay.
        raw: String,
        /// The normalised name that was looked up.
        resolved: String,
    },
}

/// Modifier keys held during a key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierSet {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl ModifierSet {
    /// Creates a modifier set from the three flags carried by `key-down`.
    pub fn new(shift: bool, ctrl: bool, alt: bool) -> Self {
        Self { shift, ctrl, alt }
    }

    /// Returns `true` if no modifier is held.
    pub fn is_empty(self) -> bool {
        !(self.shift || self.ctrl || self.alt)
    }

    /// Returns the Virtual-Key codes of the held modifiers, in press order
    /// (Shift, Ctrl, Alt).
    pub fn codes(self) -> impl DoubleEndedIterator<Item = VirtualKeyCode> {
        [
            (self.shift, VirtualKeyCode::Shift),
            (self.ctrl, VirtualKeyCode::Control),
            (self.alt, VirtualKeyCode::Menu),
        ]
        .into_iter()
        .filter_map(|(held, code)| held.then_some(code))
    }
}

/// What the input simulator should do for one `key-down` envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Type the character as text.
    Text(char),
    /// Press the modifiers, stroke `code`, release the modifiers.
    Stroke {
        code: VirtualKeyCode,
        modifiers: ModifierSet,
    },
}

/// Translates a relay key name and its modifiers into a [`KeyAction`].
///
/// # Errors
///
/// Returns [`KeyMapError::UnknownKey`] if the normalised name is not an
/// injectable key.
///
/// # Example
///
/// ```rust
/// use cloudpc_core::keymap::{translate, KeyAction, ModifierSet, VirtualKeyCode};
///
/// assert_eq!(translate("a", ModifierSet::default()), Ok(KeyAction::Text('a')));
/// assert_eq!(
///     translate("Enter", ModifierSet::default()),
///     Ok(KeyAction::Stroke { code: VirtualKeyCode::Return, modifiers: ModifierSet::default() })
/// );
/// ```
pub fn translate(raw_key: &str, modifiers: ModifierSet) -> Result<KeyAction, KeyMapError> {
    if let Some(ch) = single_char(raw_key) {
        let shifted_letter = modifiers.shift && ch.is_ascii_alphabetic();
        if !ch.is_control() && !modifiers.ctrl && !modifiers.alt && !shifted_letter {
            return Ok(KeyAction::Text(ch));
        }
    }

    let mut name = raw_key.to_uppercase();
    if single_char(&name).is_some_and(char::is_alphanumeric) {
        name.insert_str(0, "VK_");
    }

    let resolved = KEY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name.as_str(), |&(_, target)| target);

    let code = VirtualKeyCode::from_name(resolved).ok_or_else(|| KeyMapError::UnknownKey {
        raw: raw_key.to_string(),
        resolved: resolved.to_string(),
    })?;

    Ok(KeyAction::Stroke { code, modifiers })
}

/// Returns the only character of `s`, or `None` if `s` is empty or longer.
fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn none() -> ModifierSet {
        ModifierSet::default()
    }

    fn stroke(code: VirtualKeyCode, modifiers: ModifierSet) -> KeyAction {
        KeyAction::Stroke { code, modifiers }
    }

    // ── Rule 1: literal text ──────────────────────────────────────────────────

    #[test]
    fn test_lowercase_letter_without_modifiers_is_text() {
        assert_eq!(translate("a", none()), Ok(KeyAction::Text('a')));
    }

    #[test]
    fn test_punctuation_with_shift_is_text() {
        // Shift is already reflected in the character itself.
        let shift = ModifierSet::new(true, false, false);
        assert_eq!(translate("!", shift), Ok(KeyAction::Text('!')));
    }

    #[test]
    fn test_space_and_non_ascii_are_text() {
        assert_eq!(translate(" ", none()), Ok(KeyAction::Text(' ')));
        assert_eq!(translate("é", none()), Ok(KeyAction::Text('é')));
    }

    #[test]
    fn test_uppercase_letter_without_shift_is_text() {
        assert_eq!(translate("A", none()), Ok(KeyAction::Text('A')));
    }

    // ── Rule 2: VK_ prefix ────────────────────────────────────────────────────

    #[test]
    fn test_shifted_letter_is_a_shift_stroke() {
        // Arrange
        let shift = ModifierSet::new(true, false, false);

        // Act
        let action = translate("A", shift);

        // Assert
        assert_eq!(action, Ok(stroke(VirtualKeyCode::VkA, shift)));
    }

    #[test]
    fn test_ctrl_letter_is_uppercased_and_prefixed() {
        let ctrl = ModifierSet::new(false, true, false);
        assert_eq!(translate("c", ctrl), Ok(stroke(VirtualKeyCode::VkC, ctrl)));
    }

    #[test]
    fn test_alt_digit_is_prefixed() {
        let alt = ModifierSet::new(false, false, true);
        assert_eq!(translate("4", alt), Ok(stroke(VirtualKeyCode::Vk4, alt)));
    }

    // ── Rule 3: aliases ───────────────────────────────────────────────────────

    #[test]
    fn test_enter_maps_to_return() {
        assert_eq!(translate("Enter", none()), Ok(stroke(VirtualKeyCode::Return, none())));
    }

    #[test]
    fn test_every_alias_resolves() {
        let cases = [
            ("Backspace", VirtualKeyCode::Back),
            ("Alt", VirtualKeyCode::Menu),
            ("ArrowLeft", VirtualKeyCode::Left),
            ("ArrowRight", VirtualKeyCode::Right),
            ("ArrowUp", VirtualKeyCode::Up),
            ("ArrowDown", VirtualKeyCode::Down),
        ];
        for (raw, expected) in cases {
            assert_eq!(translate(raw, none()), Ok(stroke(expected, none())), "{raw}");
        }
    }

    #[test]
    fn test_names_outside_alias_table_pass_through() {
        assert_eq!(translate("Tab", none()), Ok(stroke(VirtualKeyCode::Tab, none())));
        assert_eq!(translate("Escape", none()), Ok(stroke(VirtualKeyCode::Escape, none())));
        assert_eq!(translate("F5", none()), Ok(stroke(VirtualKeyCode::F5, none())));
        assert_eq!(translate("Shift", none()), Ok(stroke(VirtualKeyCode::Shift, none())));
        assert_eq!(translate("Control", none()), Ok(stroke(VirtualKeyCode::Control, none())));
    }

    // ── Rule 4: unknown keys ──────────────────────────────────────────────────

    #[test]
    fn test_unknown_name_is_an_error() {
        let result = translate("PageUp", none());
        assert_eq!(
            result,
            Err(KeyMapError::UnknownKey {
                raw: "PageUp".to_string(),
                resolved: "PAGEUP".to_string(),
            })
        );
    }

    #[test]
    fn test_ctrl_punctuation_is_unknown() {
        let ctrl = ModifierSet::new(false, true, false);
        assert!(matches!(translate(";", ctrl), Err(KeyMapError::UnknownKey { .. })));
    }

    #[test]
    fn test_empty_key_is_unknown() {
        assert!(translate("", none()).is_err());
    }

    // ── Rule 5: modifiers ─────────────────────────────────────────────────────

    #[test]
    fn test_modifier_codes_are_in_shift_ctrl_alt_order() {
        let all = ModifierSet::new(true, true, true);
        let codes: Vec<_> = all.codes().collect();
        assert_eq!(
            codes,
            vec![VirtualKeyCode::Shift, VirtualKeyCode::Control, VirtualKeyCode::Menu]
        );
    }

    #[test]
    fn test_partial_modifier_set() {
        let codes: Vec<_> = ModifierSet::new(false, true, true).codes().collect();
        assert_eq!(codes, vec![VirtualKeyCode::Control, VirtualKeyCode::Menu]);
        assert!(ModifierSet::default().is_empty());
        assert_eq!(ModifierSet::default().codes().count(), 0);
    }

    #[test]
    fn test_translation_is_deterministic() {
        let ctrl_alt = ModifierSet::new(false, true, true);
        assert_eq!(translate("Delete", ctrl_alt), translate("Delete", ctrl_alt));
    }
}
