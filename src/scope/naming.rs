//! Random names for scope directories and the files placed inside them.
use std::path::{Component, Path};

use rand::Rng;

/// Tag used when no usable prefix is supplied.
pub const DEFAULT_PREFIX: &str = "temp_scope";

/// Number of hex characters appended to the prefix.
pub const SUFFIX_LEN: usize = 6;

const FILE_NAME_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const FILE_STEM_LEN: usize = 8;
const FILE_EXTENSION_LEN: usize = 3;

/// Returns the prefix unless it is missing, empty or only whitespace.
pub fn normalize_prefix(prefix: Option<&str>) -> &str {
    match prefix {
        Some(prefix) if !prefix.trim().is_empty() => prefix,
        _ => DEFAULT_PREFIX,
    }
}

/// A prefix is usable when `<prefix>-` is a single plain path component,
/// so the scope directory always lands directly inside its root.
pub fn is_valid_prefix(prefix: &str) -> bool {
    let name = format!("{prefix}-");
    let mut components = Path::new(&name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Six lowercase hex characters cut from a fresh random 128-bit identifier.
fn hex_fragment() -> String {
    let id = rand::rng().random::<u128>();
    let mut hex = format!("{id:032x}");
    hex.truncate(SUFFIX_LEN);
    hex
}

/// Candidate directory name: `<prefix>-<6 hex chars>`.
pub fn directory_name(prefix: &str) -> String {
    format!("{}-{}", prefix, hex_fragment())
}

fn random_chars(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(FILE_NAME_CHARSET[rng.random_range(0..FILE_NAME_CHARSET.len())]))
        .collect()
}

/// Random 8.3 style file name such as `k2x9qf0a.m3p`.
pub fn file_name() -> String {
    format!(
        "{}.{}",
        random_chars(FILE_STEM_LEN),
        random_chars(FILE_EXTENSION_LEN)
    )
}
