use easel_protocol::SharedStr;

/// A pressed key, as delivered to [`Scene::on_key_down`](crate::scene::Scene::on_key_down).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Character(char),
    /// Any other named key (`"ArrowLeft"`, `"Tab"`, ...).
    Named(SharedStr),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            // "Esc" is what older browsers report.
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Character(c),
                    _ => Key::Named(key.into()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_and_legacy_esc() {
        assert_eq!(Key::from_dom("Escape"), Key::Escape);
        assert_eq!(Key::from_dom("Esc"), Key::Escape);
    }

    #[test]
    fn characters_and_named_keys() {
        assert_eq!(Key::from_dom("a"), Key::Character('a'));
        assert_eq!(Key::from_dom("한"), Key::Character('한'));
        assert_eq!(Key::from_dom(" "), Key::Space);
        assert_eq!(Key::from_dom("ArrowLeft"), Key::Named("ArrowLeft".into()));
    }
}
