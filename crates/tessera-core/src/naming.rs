//! Derived output names.
//!
//! Every derivative is named after its source by inserting an operation
//! suffix between the stem and the extension:
//! - `photos/cat.jpg` + `-400x300` → `photos/cat-400x300.jpg`
//! - `photos/cat.jpg` + `-watermark` → `photos/cat-watermark.jpg`
//! - `README` + `-x` → `README-x`
//!
//! The extension is everything from the last `.` of the final `/`-separated
//! path element, so dots in directory names are never mistaken for one.

/// Suffix for fixed-size thumbnails.
pub const THUMBNAIL_SUFFIX: &str = "-400x300";

/// Suffix for watermarked derivatives.
pub const WATERMARK_SUFFIX: &str = "-watermark";

/// Extension of `name` including the leading dot, or `""` if there is none.
pub fn extension(name: &str) -> &str {
    let file_start = name.rfind('/').map_or(0, |i| i + 1);
    match name[file_start..].rfind('.') {
        Some(dot) => &name[file_start + dot..],
        None => "",
    }
}

/// `name` with its extension removed.
pub fn strip_extension(name: &str) -> &str {
    &name[..name.len() - extension(name).len()]
}

/// Insert `suffix` before the extension of `name`.
pub fn with_suffix(name: &str, suffix: &str) -> String {
    let ext = extension(name);
    let mut derived = String::with_capacity(name.len() + suffix.len());
    derived.push_str(strip_extension(name));
    derived.push_str(suffix);
    derived.push_str(ext);
    derived
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: stripping a suffixed name yields the stem plus the suffix.
        #[test]
        fn test_prop_suffix_then_strip(stem in "[a-zA-Z0-9_/-]{0,20}", ext in "[a-z0-9]{1,5}") {
            let name = format!("{stem}.{ext}");
            let derived = with_suffix(&name, "-x");

            prop_assert_eq!(strip_extension(&derived), format!("{}-x", strip_extension(&name)));
            prop_assert_eq!(extension(&derived), extension(&name));
        }

        /// Property: stem and extension always reassemble the original name.
        #[test]
        fn test_prop_parts_reassemble(name in "\\PC{0,30}") {
            prop_assert_eq!(format!("{}{}", strip_extension(&name), extension(&name)), name);
        }
    }
}
