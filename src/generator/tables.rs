//! The character and word tables behind the sixteen techniques.
//!
//! These are versioned data assets, not tunables: the set of candidates the
//! generator can reach is exactly the closure of these tables, and the test
//! suite pins their sizes and samples of their contents. Extend them in new
//! releases, do not reshuffle them.

/// Unicode look-alikes per ASCII letter, most convincing first. The
/// generator uses at most the first three per character to bound fan-out.
///
/// Lowercase covers the full alphabet; uppercase only the letters with a
/// well-known Cyrillic capital double, since domain labels are lowercased
/// before generation anyway.
pub static HOMOGLYPHS: &[(char, &[char])] = &[
    ('a', &['а', 'à', 'á', 'â', 'ã', 'ä', 'ɑ']),
    ('b', &['ƅ', 'ḅ', 'ɓ']),
    ('c', &['с', 'ç', 'ć', 'ĉ', 'ċ']),
    ('d', &['ԁ', 'ď', 'đ', 'ɗ']),
    ('e', &['е', 'è', 'é', 'ê', 'ë', 'ė']),
    ('f', &['ƒ', 'ḟ']),
    ('g', &['ɡ', 'ġ', 'ğ', 'ǵ']),
    ('h', &['һ', 'ḥ', 'ħ', 'ĥ']),
    ('i', &['і', 'ì', 'í', 'î', 'ï', 'ı']),
    ('j', &['ј', 'ĵ', 'ɉ']),
    ('k', &['ḳ', 'ķ', 'ƙ']),
    ('l', &['ӏ', 'ḷ', 'ļ', 'ĺ']),
    ('m', &['ṃ', 'ḿ', 'ɱ']),
    ('n', &['ո', 'ṅ', 'ñ', 'ń']),
    ('o', &['о', 'ο', 'ò', 'ó', 'ô', 'õ', 'ö']),
    ('p', &['р', 'ρ', 'ṗ']),
    ('q', &['ԛ', 'ɋ']),
    ('r', &['ŕ', 'ř', 'ṛ', 'ɼ']),
    ('s', &['ѕ', 'ś', 'ş', 'š']),
    ('t', &['ṭ', 'ť', 'ţ', 'ƭ']),
    ('u', &['υ', 'ս', 'ù', 'ú', 'û', 'ü']),
    ('v', &['ν', 'ѵ', 'ṿ']),
    ('w', &['ѡ', 'ŵ', 'ẁ', 'ẃ']),
    ('x', &['х', 'ẋ', 'ẍ']),
    ('y', &['у', 'ý', 'ÿ', 'ŷ']),
    ('z', &['ź', 'ż', 'ž', 'ʐ']),
    ('A', &['А']),
    ('B', &['В']),
    ('C', &['С']),
    ('E', &['Е']),
    ('H', &['Н']),
    ('K', &['К']),
    ('M', &['М']),
    ('O', &['О']),
    ('P', &['Р']),
    ('T', &['Т']),
    ('X', &['Х']),
];

/// Digit and symbol substitutions in the leetspeak tradition.
pub static LEETSPEAK: &[(char, &[char])] = &[
    ('a', &['4', '@']),
    ('b', &['8', '6']),
    ('e', &['3']),
    ('g', &['9']),
    ('i', &['1', '!']),
    ('l', &['1']),
    ('o', &['0']),
    ('s', &['5', '$']),
    ('t', &['7']),
    ('z', &['2']),
];

/// QWERTY neighbours per key, nearest first. The typo technique uses at
/// most the first two per key.
pub static QWERTY_NEIGHBOURS: &[(char, &[char])] = &[
    ('q', &['w', 'a']),
    ('w', &['q', 'e', 's']),
    ('e', &['w', 'r', 'd']),
    ('r', &['e', 't', 'f']),
    ('t', &['r', 'g', 'y']),
    ('y', &['t', 'u', 'h']),
    ('u', &['y', 'i', 'o']),
    ('i', &['u', 'o', 'p']),
    ('o', &['i', 'p']),
    ('p', &['o']),
    ('a', &['q', 's', 'z']),
    ('s', &['a', 'w', 'd', 'z']),
    ('d', &['s', 'e', 'f', 'x']),
    ('f', &['d', 'g', 'r', 'c']),
    ('g', &['f', 't', 'h', 'v']),
    ('h', &['g', 'y', 'j', 'b']),
    ('j', &['h', 'u', 'k', 'n']),
    ('k', &['j', 'u', 'l', 'm']),
    ('l', &['k', 'm']),
    ('z', &['a', 's', 'x']),
    ('x', &['z', 's', 'd', 'c']),
    ('c', &['x', 'd', 'f', 'v']),
    ('v', &['c', 'f', 'g', 'b']),
    ('b', &['v', 'g', 'h', 'n']),
    ('n', &['b', 'h', 'j', 'm']),
    ('m', &['n', 'j', 'k']),
];

/// Sound-alike letter group rewrites, applied to the first occurrence only.
pub static PHONETIC_RULES: &[(&str, &str)] = &[
    ("ph", "f"),
    ("f", "ph"),
    ("ck", "k"),
    ("ck", "c"),
    ("k", "ck"),
    ("c", "ck"),
    ("s", "c"),
    ("s", "z"),
    ("c", "s"),
    ("z", "s"),
    ("x", "ks"),
    ("x", "cks"),
    ("w", "vv"),
    ("w", "uu"),
    ("oo", "u"),
    ("u", "oo"),
    ("i", "y"),
    ("y", "i"),
    ("er", "or"),
    ("or", "er"),
];

/// Swap-in top-level domains: generic, country-code, and multi-label combos.
pub static ALTERNATIVE_TLDS: &[&str] = &[
    "com", "net", "org", "info", "biz", "co", "io", "me", "app", "dev", "tech", "online", "site",
    "store", "shop", "xyz", "cloud", "us", "uk", "ca", "de", "fr", "es", "it", "nl", "pl", "ru",
    "cn", "jp", "au", "br", "in", "co.uk", "org.uk", "com.au", "co.jp", "co.in", "com.br",
    "com.cn", "co.nz",
];

/// Words attackers bolt onto the front of a brand. Entries keep the
/// separator they are usually seen with; the technique strips it before
/// concatenating.
pub static PHISHING_PREFIXES: &[&str] = &[
    "www.",
    "secure-",
    "login-",
    "signin-",
    "my-",
    "account-",
    "verify-",
    "update-",
    "support-",
    "service-",
    "mail-",
    "portal-",
    "online-",
    "auth-",
    "official-",
];

/// Words attackers bolt onto the end of a brand; leading separator is
/// stripped before concatenating.
pub static PHISHING_SUFFIXES: &[&str] = &[
    "-login",
    "-signin",
    "-secure",
    "-verify",
    "-support",
    "-account",
    "-update",
    "-service",
    "-online",
    "-portal",
    "-official",
    "-app",
    "-team",
    "-help",
];

/// Labels used to dress the target up as a subdomain of a generic host.
pub static SUBDOMAIN_LABELS: &[&str] = &["login", "secure", "account", "auth", "my", "portal"];

pub static VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

/// Characters worth trying in the insertion technique: vowels plus the most
/// frequent consonants.
pub static INSERTION_CHARS: &[char] = &['a', 'e', 'i', 'o', 'u', 'r', 's', 't', 'n', 'l'];

pub fn homoglyphs_for(c: char) -> Option<&'static [char]> {
    HOMOGLYPHS.iter().find(|(k, _)| *k == c).map(|(_, v)| *v)
}

pub fn leetspeak_for(c: char) -> Option<&'static [char]> {
    LEETSPEAK.iter().find(|(k, _)| *k == c).map(|(_, v)| *v)
}

pub fn qwerty_neighbours_for(c: char) -> Option<&'static [char]> {
    QWERTY_NEIGHBOURS.iter().find(|(k, _)| *k == c).map(|(_, v)| *v)
}
