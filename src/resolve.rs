//! Source-to-destination path mapping.
use std::path::{Component, Path, PathBuf};

use crate::error::MirrorError;
use crate::sanitise::Renames;

/// Map `path` (somewhere under `src_root`) to its place under `dst_root`.
///
/// Every component below `src_root` is sanitised through `renames`; the
/// roots themselves are used verbatim. Passing `src_root` itself yields
/// `dst_root`.
///
/// # Errors
///
/// Returns [`MirrorError::OutsideSource`] if `path` does not start with the
/// components of `src_root`, or if the remainder climbs back out of it
/// (`..`). Returns [`MirrorError::UnusableName`] if a component sanitises to
/// an empty name, `.` or `..`, which would fold the destination into its
/// parent or climb out of `dst_root`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use exfat_mirror::resolve::destination;
/// use exfat_mirror::sanitise::Renames;
///
/// let mut renames = Renames::new();
/// let dest = destination(
///     Path::new("/src"),
///     Path::new("/dst"),
///     Path::new("/src/a/b?.txt"),
///     &mut renames,
/// )
/// .unwrap();
/// assert_eq!(dest, Path::new("/dst/a/b.txt"));
/// ```
pub fn destination(
    src_root: &Path,
    dst_root: &Path,
    path: &Path,
    renames: &mut Renames,
) -> Result<PathBuf, MirrorError> {
    let outside = || MirrorError::OutsideSource {
        path: path.to_path_buf(),
        root: src_root.to_path_buf(),
    };

    let relative = path.strip_prefix(src_root).map_err(|_| outside())?;

    let mut dest = dst_root.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(name) => {
                let segment = renames.sanitise_os(name);
                if matches!(segment.as_str(), "" | "." | "..") {
                    return Err(MirrorError::UnusableName {
                        path: path.to_path_buf(),
                        sanitised: segment,
                    });
                }
                dest.push(segment);
            }
            Component::CurDir => {}
            _ => return Err(outside()),
        }
    }
    Ok(dest)
}
