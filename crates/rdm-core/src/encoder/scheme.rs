/// Word-encoding algorithms. Several named input methods share one algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Two leading fragments, fixed length 4.
    Erbi,
    /// Single lead per character, fixed length 4.
    Wubi,
    /// Variable length 3–6 with a phonetic tail.
    Xkjd6,
}

/// (id, display name, algorithm) for every supported input method.
const SCHEME_NAMES: &[(&str, &str, Scheme)] = &[
    ("erbi", "二笔 | 两笔", Scheme::Erbi),
    ("huma", "虎码", Scheme::Wubi),
    ("wubi", "五笔", Scheme::Wubi),
    ("wubi86", "86五笔", Scheme::Wubi),
    ("xhyx", "小鹤音形", Scheme::Wubi),
    ("xkjd6", "星空键道6", Scheme::Xkjd6),
];

/// A code position: (selected character, character of its fragment).
type Slot = (usize, usize);

impl Scheme {
    /// Look up a scheme by id or display name.
    pub fn from_name(name: &str) -> Option<Scheme> {
        SCHEME_NAMES
            .iter()
            .find(|(id, display, _)| *id == name || *display == name)
            .map(|&(_, _, scheme)| scheme)
    }

    /// (id, display name) of every supported input method.
    pub fn names() -> impl Iterator<Item = (&'static str, &'static str)> {
        SCHEME_NAMES.iter().map(|&(id, display, _)| (id, display))
    }

    /// How many leading characters of a single-character code take part in
    /// word encoding.
    pub const fn fragment_len(self) -> usize {
        match self {
            Scheme::Erbi | Scheme::Wubi => 2,
            Scheme::Xkjd6 => 3,
        }
    }

    /// (min, max) word code length.
    pub const fn len_range(self) -> (usize, usize) {
        match self {
            Scheme::Erbi | Scheme::Wubi => (4, 4),
            Scheme::Xkjd6 => (3, 6),
        }
    }

    pub const fn is_variable(self) -> bool {
        let (min, max) = self.len_range();
        min != max
    }

    /// Code layout for a word with `k` selected characters.
    pub(super) fn slots(self, k: usize) -> &'static [Slot] {
        match (self, k) {
            (Scheme::Erbi | Scheme::Wubi, 2) => &[(0, 0), (0, 1), (1, 0), (1, 1)],
            (Scheme::Erbi, 3) => &[(0, 0), (0, 1), (1, 0), (2, 0)],
            (Scheme::Wubi, 3) => &[(0, 0), (1, 0), (2, 0), (2, 1)],
            (Scheme::Erbi | Scheme::Wubi, 4) => &[(0, 0), (1, 0), (2, 0), (3, 0)],
            (Scheme::Xkjd6, 2) => &[(0, 0), (0, 1), (1, 0), (1, 1), (0, 2), (1, 2)],
            (Scheme::Xkjd6, 3) => &[(0, 0), (1, 0), (2, 0), (0, 2), (1, 2), (2, 2)],
            (Scheme::Xkjd6, 4) => &[(0, 0), (1, 0), (2, 0), (3, 0), (0, 2), (1, 2)],
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Scheme::from_name("erbi"), Some(Scheme::Erbi));
        assert_eq!(Scheme::from_name("二笔 | 两笔"), Some(Scheme::Erbi));
        assert_eq!(Scheme::from_name("虎码"), Some(Scheme::Wubi));
        assert_eq!(Scheme::from_name("xhyx"), Some(Scheme::Wubi));
        assert_eq!(Scheme::from_name("86五笔"), Some(Scheme::Wubi));
        assert_eq!(Scheme::from_name("星空键道6"), Some(Scheme::Xkjd6));
        assert_eq!(Scheme::from_name("cangjie"), None);
    }

    #[test]
    fn test_slots_stay_within_fragment() {
        for scheme in [Scheme::Erbi, Scheme::Wubi, Scheme::Xkjd6] {
            let (_, max) = scheme.len_range();
            for k in 2..=4 {
                let slots = scheme.slots(k);
                assert_eq!(slots.len(), max, "{scheme:?} k={k}");
                assert!(slots
                    .iter()
                    .all(|&(c, p)| c < k && p < scheme.fragment_len()));
            }
            assert!(scheme.slots(1).is_empty());
        }
    }

    #[test]
    fn test_variable() {
        assert!(!Scheme::Erbi.is_variable());
        assert!(!Scheme::Wubi.is_variable());
        assert!(Scheme::Xkjd6.is_variable());
    }
}
