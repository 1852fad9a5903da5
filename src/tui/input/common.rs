use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ---------------------------------------------------------------------------
// Kitty keyboard protocol normalizer

/// Map a base key to its US-layout shifted symbol.
/// Returns None if the key is not a shiftable symbol (or is already shifted).
pub(super) fn shift_symbol(c: char) -> Option<char> {
    match c {
        '1' => Some('!'),
        '2' => Some('@'),
        '3' => Some('#'),
        '/' => Some('?'),
        '-' => Some('_'),
        '=' => Some('+'),
        ',' => Some('<'),
        '.' => Some('>'),
        _ => None,
    }
}

/// Normalize key events from terminals using the kitty keyboard protocol.
///
/// Kitty protocol sends `Char(lowercase) + SHIFT` instead of `Char(UPPERCASE) + SHIFT`,
/// and `Char(base_symbol) + SHIFT` instead of `Char(shifted_symbol)`.
/// Traditional terminals already send the shifted character, so this is a
/// no-op for them.
pub(super) fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
    {
        if c.is_ascii_lowercase() {
            key.code = KeyCode::Char(c.to_ascii_uppercase());
        } else if let Some(shifted) = shift_symbol(c) {
            key.code = KeyCode::Char(shifted);
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
    }
    key
}

/// Printable character typed without Ctrl/Alt, for text entry
pub(super) fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kitty_shift_letters_become_uppercase() {
        let key = normalize_key(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::SHIFT));
        assert_eq!(key.code, KeyCode::Char('E'));
        assert!(key.modifiers.contains(KeyModifiers::SHIFT));
    }

    #[test]
    fn kitty_shift_symbols_are_resolved() {
        let key = normalize_key(KeyEvent::new(KeyCode::Char('/'), KeyModifiers::SHIFT));
        assert_eq!(key.code, KeyCode::Char('?'));
        assert_eq!(key.modifiers, KeyModifiers::NONE);
    }

    #[test]
    fn typed_char_ignores_control_chords() {
        assert_eq!(
            typed_char(&KeyEvent::new(KeyCode::Char('a'), KeyModifiers::SHIFT)),
            Some('a')
        );
        assert_eq!(
            typed_char(&KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            None
        );
    }
}
