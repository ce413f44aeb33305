//! ExFAT name sanitisation.
//!
//! ExFAT rejects control characters and `/ \ : * ? " < > |` in names and
//! caps a single name at 255 characters. [`sanitise`] maps any name onto one
//! that satisfies both rules while keeping its extension intact, and
//! [`Renames`] records every name that had to change.
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ffi::OsStr;

/// Longest name ExFAT accepts, counted in characters.
pub const MAX_NAME_LEN: usize = 255;

/// Characters ExFAT refuses in a name, on top of the control range.
const FORBIDDEN: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Returns `true` if `c` may appear in an ExFAT name.
#[must_use]
pub fn is_allowed(c: char) -> bool {
    c >= ' ' && !FORBIDDEN.contains(&c)
}

/// Split `name` into stem and extension.
///
/// The extension is everything from the last `.` onwards, unless that dot is
/// the first or the last character, in which case there is no extension
/// (`.bashrc`, `notes.`).
///
/// # Examples
///
/// ```
/// use exfat_mirror::sanitise::split_extension;
///
/// assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
/// assert_eq!(split_extension(".bashrc"), (".bashrc", ""));
/// assert_eq!(split_extension("notes."), ("notes.", ""));
/// ```
#[must_use]
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(i) if i > 0 && i + 1 < name.len() => name.split_at(i),
        _ => (name, ""),
    }
}

/// Sanitise a single file or directory name for ExFAT.
///
/// Drops disallowed characters, then cuts the stem from the right until
/// stem and extension together fit in [`MAX_NAME_LEN`] characters. An
/// extension that alone exceeds the limit cannot be kept, so the whole name
/// is cut instead. Borrows `name` when nothing had to change.
///
/// Works on names only; path separators are treated as illegal characters.
///
/// # Examples
///
/// ```
/// use exfat_mirror::sanitise::sanitise;
///
/// assert_eq!(sanitise("weird<>name.txt"), "weirdname.txt");
/// assert_eq!(sanitise("plain.txt"), "plain.txt");
/// ```
#[must_use]
pub fn sanitise(name: &str) -> Cow<'_, str> {
    let cleaned: String = name.chars().filter(|&c| is_allowed(c)).collect();
    let (stem, extension) = split_extension(&cleaned);
    let extension_len = extension.chars().count();

    let result = if extension_len > MAX_NAME_LEN {
        cleaned.chars().take(MAX_NAME_LEN).collect()
    } else {
        let mut out: String = stem.chars().take(MAX_NAME_LEN - extension_len).collect();
        out.push_str(extension);
        out
    };

    if result == name {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(result)
    }
}

/// Record of every name that sanitisation changed during a run.
///
/// Each distinct original is stored once, keyed by the original name, so
/// iteration order is stable regardless of the order the walk met them in.
/// Two originals mapping to the same sanitised name are both recorded; the
/// mirror does nothing else about such collisions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Renames {
    map: BTreeMap<String, String>,
}

impl Renames {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitise `name`, recording the mapping if the name changed.
    pub fn sanitise(&mut self, name: &str) -> String {
        self.sanitise_os(OsStr::new(name))
    }

    /// Sanitise a name as the filesystem listed it.
    ///
    /// Names that are not valid UTF-8 are converted lossily first. The
    /// result is compared against the raw name, so a lossy conversion counts
    /// as a rename even when no disallowed character was dropped. Such names
    /// are keyed by their lossy form.
    pub fn sanitise_os(&mut self, name: &OsStr) -> String {
        let lossy = name.to_string_lossy();
        let renamed = sanitise(&lossy).into_owned();
        if name != renamed.as_str() {
            self.map
                .entry(lossy.into_owned())
                .or_insert_with(|| renamed.clone());
        }
        renamed
    }

    /// Sanitised name recorded for `original`, if it was renamed.
    #[must_use]
    pub fn get(&self, original: &str) -> Option<&str> {
        self.map.get(original).map(String::as_str)
    }

    /// Number of distinct renamed originals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no name has been renamed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over `(original, sanitised)` pairs ordered by original name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    /// Names that exercise every rule at once.
    fn awkward_names() -> Vec<String> {
        vec![
            String::new(),
            "plain.txt".to_string(),
            "weird<>name.txt".to_string(),
            "tab\there".to_string(),
            "what?.md".to_string(),
            "a:b|c*d\"e.txt".to_string(),
            "back\\slash/forward".to_string(),
            ".hidden".to_string(),
            "trailing.".to_string(),
            "???".to_string(),
            "a".repeat(300) + ".txt",
            "ü".repeat(300) + ".jpeg",
            "x.".to_string() + &"e".repeat(300),
            "dots.in.the.stem".repeat(30) + ".tar.gz",
            "\u{7}bell\u{1f}.log".to_string(),
        ]
    }

    #[test]
    fn drops_forbidden_characters() {
        assert_eq!(sanitise("weird<>name.txt"), "weirdname.txt");
        assert_eq!(sanitise("a:b|c*d\"e.txt"), "abcde.txt");
        assert_eq!(sanitise("back\\slash/forward"), "backslashforward");
    }

    #[test]
    fn drops_control_characters() {
        assert_eq!(sanitise("tab\there"), "tabhere");
        assert_eq!(sanitise("\u{7}bell\u{1f}.log"), "bell.log");
    }

    #[test]
    fn keeps_delete_and_non_ascii() {
        assert_eq!(sanitise("del\u{7f}.txt"), "del\u{7f}.txt");
        assert_eq!(sanitise("café – notes.txt"), "café – notes.txt");
    }

    #[test]
    fn clean_name_is_borrowed() {
        assert!(matches!(sanitise("plain.txt"), Cow::Borrowed("plain.txt")));
    }

    #[test]
    fn long_name_keeps_extension() {
        let name = "a".repeat(300) + ".txt";
        let out = sanitise(&name);
        assert!(out.ends_with(".txt"));
        assert_eq!(out.chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn long_name_counts_characters_not_bytes() {
        let name = "ü".repeat(300) + ".jpeg";
        let out = sanitise(&name);
        assert_eq!(out.chars().count(), MAX_NAME_LEN);
        assert!(out.ends_with(".jpeg"));
    }

    #[test]
    fn only_final_suffix_is_the_extension() {
        let name = "dots.in.the.stem".repeat(30) + ".tar.gz";
        let out = sanitise(&name);
        assert_eq!(out.chars().count(), MAX_NAME_LEN);
        assert!(out.ends_with(".gz"));
    }

    #[test]
    fn name_at_limit_is_untouched() {
        let name = "b".repeat(251) + ".txt";
        assert_eq!(sanitise(&name), name.as_str());
    }

    #[test]
    fn oversized_extension_cuts_whole_name() {
        let name = "x.".to_string() + &"e".repeat(300);
        let out = sanitise(&name);
        assert_eq!(out.chars().count(), MAX_NAME_LEN);
        assert!(out.starts_with("x.e"));
    }

    #[test]
    fn name_of_only_forbidden_characters_becomes_empty() {
        assert_eq!(sanitise("???"), "");
    }

    #[test]
    fn split_extension_rules() {
        assert_eq!(split_extension("a.txt"), ("a", ".txt"));
        assert_eq!(split_extension("a.b.c"), ("a.b", ".c"));
        assert_eq!(split_extension("noext"), ("noext", ""));
        assert_eq!(split_extension(".bashrc"), (".bashrc", ""));
        assert_eq!(split_extension("trailing."), ("trailing.", ""));
        assert_eq!(split_extension(""), ("", ""));
    }

    #[test]
    fn sanitise_is_idempotent() {
        for name in awkward_names() {
            let once = sanitise(&name).into_owned();
            let twice = sanitise(&once).into_owned();
            assert_eq!(once, twice, "not idempotent for {name:?}");
        }
    }

    #[test]
    fn sanitised_names_fit_exfat_rules() {
        for name in awkward_names() {
            let out = sanitise(&name);
            assert!(
                out.chars().count() <= MAX_NAME_LEN,
                "too long for {name:?}"
            );
            assert!(
                out.chars().all(is_allowed),
                "illegal character left in {out:?}"
            );
        }
    }

    #[test]
    fn renames_record_only_changed_names() {
        let mut renames = Renames::new();
        assert_eq!(renames.sanitise("fine.txt"), "fine.txt");
        assert!(renames.is_empty());

        assert_eq!(renames.sanitise("what?.md"), "what.md");
        assert_eq!(renames.len(), 1);
        assert_eq!(renames.get("what?.md"), Some("what.md"));
        assert_eq!(renames.get("fine.txt"), None);
    }

    #[cfg(unix)]
    #[test]
    fn renames_record_lossy_conversion() {
        use std::os::unix::ffi::OsStrExt as _;

        let mut renames = Renames::new();
        let raw = OsStr::from_bytes(b"caf\xe9.txt");
        assert_eq!(renames.sanitise_os(raw), "caf\u{fffd}.txt");
        assert_eq!(renames.get("caf\u{fffd}.txt"), Some("caf\u{fffd}.txt"));
        assert_eq!(renames.len(), 1);
    }

    #[test]
    fn renames_skip_unchanged_os_names() {
        let mut renames = Renames::new();
        assert_eq!(renames.sanitise_os(OsStr::new("fine.txt")), "fine.txt");
        assert!(renames.is_empty());
    }

    #[test]
    fn renames_store_each_original_once() {
        let mut renames = Renames::new();
        renames.sanitise("a|b");
        renames.sanitise("a|b");
        assert_eq!(renames.len(), 1);
    }

    #[test]
    fn renames_keep_colliding_originals_apart() {
        let mut renames = Renames::new();
        renames.sanitise("x?y");
        renames.sanitise("x*y");
        let pairs: Vec<_> = renames.iter().collect();
        assert_eq!(pairs, vec![("x*y", "xy"), ("x?y", "xy")]);
    }
}
