//! Static lookup tables for name normalization and decomposition.
//!
//! All tables are ordinary immutable data built into the binary and loaded
//! once for the process lifetime. The German mapping table is *ordered*:
//! transliteration tests entries in table order and the first match wins,
//! so reordering entries changes behavior.

/// A single Germanic character replacement.
#[derive(Debug, Clone, Copy)]
pub struct GermanMapping {
    /// UTF-8 character to replace.
    pub from: char,
    /// ASCII replacement sequence.
    pub to: &'static str,
}

/// Ordered Germanic character mappings for ASCII transliteration.
pub const GERMAN_ASCII_MAPPINGS: [GermanMapping; 6] = [
    GermanMapping { from: 'ü', to: "ue" },
    GermanMapping { from: 'ö', to: "oe" },
    GermanMapping { from: 'ä', to: "ae" },
    GermanMapping { from: 'ß', to: "ss" },
    GermanMapping { from: 'ø', to: "o" },
    GermanMapping { from: 'å', to: "aa" },
];

/// Honorifics and suffixes stripped from the front and back of a token list.
pub const REMOVABLE_TOKENS: [&str; 15] = [
    "jr", "sr", "ii", "iii", "iv", "v", "phd", "md", "esq", "dr", "mr", "mrs",
    "ms", "prof", "sir",
];

/// Surname particles. The first token matching this set binds itself and
/// every following token into the last-name sequence.
pub const SURNAME_PARTICLES: [&str; 27] = [
    "santa", "san", "st", "von", "van", "de", "der", "dello", "vander", "del",
    "de la", "vom", "dela", "de los", "dos", "la", "los", "le", "du", "di",
    "da", "mac", "al", "abu", "bin", "ibn", "della",
];

/// Formal first names mapped to their common nickname variants.
///
/// Lookup is exact over already-lowercased input; no fuzzy or partial
/// matching. Pulled from the training pipeline's nickname list.
pub const NICKNAME_MAPPINGS: [(&str, &[&str]); 63] = [
    ("alexander", &["alex"]),
    ("andrew", &["andy"]),
    ("anne", &["annie", "nancy"]),
    ("arthur", &["art"]),
    ("benjamin", &["ben"]),
    ("william", &["bill", "will"]),
    ("robert", &["bob", "bobby", "rob"]),
    ("catherine", &["cathy"]),
    ("charles", &["charlie", "chuck"]),
    ("daniel", &["dan", "danny"]),
    ("david", &["dave"]),
    ("donald", &["don"]),
    ("edward", &["ed", "eddie"]),
    ("elizabeth", &["eliza", "liz", "liza"]),
    ("eleanor", &["ellie"]),
    ("francis", &["frank"]),
    ("frederick", &["fred"]),
    ("gerald", &["gary", "jerry"]),
    ("gregory", &["greg"]),
    ("harold", &["harry", "hal"]),
    ("john", &["jack", "johnny"]),
    ("jacob", &["jake"]),
    ("janet", &["jan"]),
    ("jeffrey", &["jeff"]),
    ("jennifer", &["jen", "jenny"]),
    ("james", &["jim", "jimmy"]),
    ("joseph", &["joe", "joey", "jody"]),
    ("jonathan", &["jon"]),
    ("joshua", &["josh"]),
    ("joy", &["joyce"]),
    ("judith", &["judy"]),
    ("katherine", &["kate", "kathy"]),
    ("kenneth", &["ken"]),
    ("lawrence", &["larry"]),
    ("lewis", &["lou"]),
    ("margaret", &["maggie", "marge"]),
    ("martin", &["marty"]),
    ("matthew", &["matt"]),
    ("megan", &["meg"]),
    ("melvin", &["mel"]),
    ("michael", &["mike"]),
    ("nicholas", &["nick"]),
    ("patrick", &["pat"]),
    ("peter", &["pete"]),
    ("philip", &["phil"]),
    ("richard", &["rick", "rich"]),
    ("ronald", &["ron"]),
    ("samuel", &["sam"]),
    ("steven", &["steve"]),
    ("susan", &["sue"]),
    ("theodore", &["ted"]),
    ("terence", &["terry"]),
    ("timothy", &["tim"]),
    ("thomas", &["tom"]),
    ("anthony", &["tony"]),
    ("victor", &["vic"]),
    ("zachary", &["zack", "zak"]),
    ("nastya", &["nastia"]),
    ("douglas", &["doug"]),
    ("mitchell", &["mitch"]),
    ("wesley", &["wes"]),
    ("patricia", &["tricia"]),
    ("rajiv", &["raj"]),
];

/// Finds nickname variants for a formal first name.
///
/// Returns an empty slice when the name has no known nicknames.
#[must_use]
pub fn find_nicknames(formal_name: &str) -> &'static [&'static str] {
    for &(formal, nicknames) in &NICKNAME_MAPPINGS {
        if formal == formal_name {
            return nicknames;
        }
    }
    &[]
}
