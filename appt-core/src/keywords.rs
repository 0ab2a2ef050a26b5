use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::RwLock;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Keyword {
    Next,
    This,
    Today,
    Tomorrow,
    Yesterday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

pub struct Keywords;

impl Keywords {
    /// Returns the **global keyword registry** (input → canonical).
    ///
    /// The registry is:
    /// - **Initialized once** on first access (via [`once_cell::sync::Lazy`]).
    /// - **Thread-safe** (wrapped in [`RwLock`]): many readers or one writer.
    /// - **Lowercased**: all keys are stored lowercased for case-insensitive lookups.
    ///
    /// Besides the canonical spellings, the common three-letter weekday
    /// abbreviations are seeded as built-in synonyms (`mon`, `fri`, ...).
    ///
    /// You normally **don't call this directly**; use [`extend`](Self::extend)
    /// to add synonyms and [`matches`](Self::matches) for checks.
    fn registry() -> &'static RwLock<HashMap<String, Keyword>> {
        static REGISTRY: Lazy<RwLock<HashMap<String, Keyword>>> = Lazy::new(|| {
            let mut m = HashMap::new();
            for keyword in Keyword::iter() {
                m.insert(keyword.as_ref().to_string(), keyword);
            }
            let abbreviations = [
                ("mon", Keyword::Monday),
                ("tue", Keyword::Tuesday),
                ("tues", Keyword::Tuesday),
                ("wed", Keyword::Wednesday),
                ("thu", Keyword::Thursday),
                ("thur", Keyword::Thursday),
                ("thurs", Keyword::Thursday),
                ("fri", Keyword::Friday),
                ("sat", Keyword::Saturday),
                ("sun", Keyword::Sunday),
            ];
            for (abbr, keyword) in abbreviations {
                m.insert(abbr.to_string(), keyword);
            }

            RwLock::new(m)
        });
        &REGISTRY
    }

    /// Extends the global registry with user-defined **synonyms**.
    ///
    /// Each pair is `(alias, target)`. The `target` must be a **known** keyword already
    /// in the registry (typically a canonical spelling or an existing synonym that maps
    /// to a canonical). If `target` isn't known, the pair is ignored silently.
    ///
    /// All keys are normalized to **lowercase** to keep lookups case-insensitive.
    ///
    /// Typical call site: during `Config::load()`, after reading `[synonyms]`
    /// from `config.toml`:
    ///
    /// ```toml
    /// [synonyms]
    /// tmrw = "tomorrow"
    /// manana = "tomorrow"
    /// ```
    pub fn extend(synonyms: &[(String, String)]) {
        let mut reg = Self::registry().write().unwrap();
        for (alias, target) in synonyms {
            if let Some(&canonical) = reg.get(&target.to_ascii_lowercase()) {
                reg.insert(alias.to_ascii_lowercase(), canonical);
            }
        }
    }

    /// Returns `true` if `word` is a canonical word (eg "today").
    pub fn is_canonical(word: &str) -> bool {
        Keyword::iter().any(|key| key.as_ref() == word)
    }

    /// Returns `true` if `input` equals (case-insensitively) the given **canonical keyword**
    /// or any of its registered synonyms.
    pub fn matches(keyword: Keyword, input: &str) -> bool {
        let reg = Self::registry().read().unwrap();
        reg.get(&input.to_ascii_lowercase())
            .map(|&canon| canon == keyword)
            .unwrap_or(false)
    }

    /// Finds the earliest whole-word occurrence of `keyword` within `input`,
    /// searching the canonical spelling and every registered synonym.
    ///
    /// Returns the byte offset of the match, or `None` if the keyword does not
    /// appear as a whole word (substrings of longer words never match).
    pub fn find_position(keyword: Keyword, input: &str) -> Option<usize> {
        let lower = input.to_ascii_lowercase();
        let reg = Self::registry().read().unwrap();
        let mut earliest: Option<usize> = None;
        for (alias, &canon) in reg.iter() {
            if canon != keyword {
                continue;
            }
            let pattern = format!(r"\b{}\b", regex::escape(alias));
            let re = Regex::new(&pattern).unwrap();
            if let Some(m) = re.find(&lower) {
                earliest = Some(earliest.map_or(m.start(), |e| e.min(m.start())));
            }
        }
        earliest
    }
}
