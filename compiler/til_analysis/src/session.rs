//! The analysis driver.
//!
//! A [`Session`] owns the source registry and a cache of processed files
//! for one run. Processing a file parses it, recursively processes its
//! includes, then runs the gather, equip, and validation passes in order.
//!
//! The cache is keyed by resolved path, so a file included along several
//! paths of a diamond-shaped graph is processed once and every includer
//! links the same [`FileData`]. Files currently being processed are tracked
//! separately to turn include cycles into diagnostics instead of infinite
//! recursion.

use std::path::{Component, Path, PathBuf};
use std::rc::Rc;
use std::{fs, io};

use rustc_hash::{FxHashMap, FxHashSet};
use til_diagnostic::{Diagnostics, ErrorCode};
use til_ir::SourceMap;

use crate::filedata::FileData;
use crate::{equip, gather, validate};

/// The default extension applied to include paths that lack one.
const TYPE_EXT: &str = ".type";

/// Knobs for one analysis run.
#[derive(Default, Debug)]
pub struct Options {
    /// Treat an `auto:` expression as satisfying `complete`, silencing the
    /// missing-case warning for such maps.
    pub auto_covers_complete: bool,
}

/// State for one analysis run.
pub struct Session {
    pub sources: SourceMap,
    pub options: Options,
    cache: FxHashMap<PathBuf, Rc<FileData>>,
    in_progress: FxHashSet<PathBuf>,
}

impl Session {
    pub fn new(options: Options) -> Self {
        Session {
            sources: SourceMap::new(),
            options,
            cache: FxHashMap::default(),
            in_progress: FxHashSet::default(),
        }
    }

    /// Process one file from disk, includes and all.
    ///
    /// Include files that cannot be read become diagnostics; only failure
    /// to read `path` itself is returned as an error.
    pub fn process_path(&mut self, path: &Path, diags: &mut Diagnostics) -> io::Result<Rc<FileData>> {
        let text = fs::read_to_string(path)?;
        Ok(self.process_text(path, text, diags))
    }

    /// Process source text registered under `path`.
    ///
    /// The path is still used as the cache key and to resolve relative
    /// includes, but nothing is read from disk for this file.
    pub fn process_text(&mut self, path: &Path, text: String, diags: &mut Diagnostics) -> Rc<FileData> {
        let key = normalize(path);
        if let Some(cached) = self.cache.get(&key) {
            return Rc::clone(cached);
        }
        tracing::debug!(path = %path.display(), "processing type file");
        self.in_progress.insert(key.clone());

        let file = self.sources.add(path.display().to_string(), text);
        let tree = til_parse::parse(file, &self.sources.file(file).text, diags);
        let mut fd = FileData::new(file, tree);

        self.resolve_includes(&mut fd, path, diags);

        gather::gather(&mut fd, diags);
        equip::equip_basic_sizes(&mut fd, diags);
        equip::equip_struct_members(&mut fd, diags);
        equip::equip_enum_underlying(&mut fd, diags);
        equip::equip_enum_members(&mut fd, diags);
        equip::equip_map_types(&mut fd, diags);
        equip::equip_map_cases(&mut fd, diags);
        validate::check_duplicate_members(&fd, diags);
        validate::check_duplicate_cases(&fd, diags);
        validate::check_complete(&fd, self.options.auto_covers_complete, diags);

        self.in_progress.remove(&key);
        let rc = Rc::new(fd);
        self.cache.insert(key, Rc::clone(&rc));
        rc
    }

    /// Process each `@include` and link its data into `fd`.
    ///
    /// Include paths are relative to the including file and get the
    /// `.type` extension when they lack one.
    fn resolve_includes(&mut self, fd: &mut FileData, path: &Path, diags: &mut Diagnostics) {
        let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let entries: Vec<_> = fd
            .tree
            .children(fd.tree.root)
            .filter(|(_, n)| n.has_tag("include"))
            .map(|(_, n)| (n.string.clone(), n.span))
            .collect();

        for (raw, span) in entries {
            let mut rel = raw;
            if !rel.ends_with(TYPE_EXT) {
                rel.push_str(TYPE_EXT);
            }
            let target = normalize(&base.join(&rel));

            if self.in_progress.contains(&target) {
                diags.error(
                    ErrorCode::E1016,
                    fd.file,
                    span,
                    format!("include cycle detected through `{}`", target.display()),
                );
                continue;
            }
            let cached = self.cache.get(&target).map(Rc::clone);
            let included = if let Some(cached) = cached {
                cached
            } else {
                match fs::read_to_string(&target) {
                    Ok(text) => self.process_text(&target, text, diags),
                    Err(err) => {
                        diags.error(
                            ErrorCode::E1017,
                            fd.file,
                            span,
                            format!(
                                "could not read the include file `{}`: {err}",
                                target.display()
                            ),
                        );
                        continue;
                    }
                }
            };
            // Including the same file twice adds nothing.
            if fd.includes.iter().any(|inc| Rc::ptr_eq(inc, &included)) {
                continue;
            }
            fd.include_paths.push(rel);
            fd.includes.push(included);
        }
    }
}

/// Fold `.` and `..` components lexically, without touching the filesystem.
///
/// Cache and cycle-detection keys must agree for every spelling of the same
/// file, or a cycle written through `..` would grow the path on every hop
/// instead of being caught.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                ) && out.pop();
                if !popped {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}
