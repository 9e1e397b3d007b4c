//! Per-file registries and chained symbol lookup.
//!
//! Each processed file owns its tree, its type and map registries, and a
//! symbol table over both. Includes are links to the already-processed
//! [`FileData`] of each included file; lookups walk the local table first,
//! then each include link depth-first. A visited set keyed by [`FileId`]
//! keeps diamond-shaped include graphs from being searched (or reported)
//! twice.

use std::rc::Rc;

use rustc_hash::FxHashSet;
use til_ir::{FileId, Span, Tree};

use crate::types::{MapInfo, TypeInfo, TypeRef};

/// What a name refers to. Types and maps share one namespace.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Symbol {
    /// Index into [`FileData::types`].
    Type(u32),
    /// Index into [`FileData::maps`].
    Map(u32),
}

/// Everything the pipeline knows about one processed file.
#[derive(Debug)]
pub struct FileData {
    pub file: FileId,
    pub tree: Tree,
    pub types: Vec<TypeInfo>,
    pub maps: Vec<MapInfo>,
    pub symbols: rustc_hash::FxHashMap<String, Symbol>,
    /// Processed data of each `@include`d file, in declaration order.
    pub includes: Vec<Rc<FileData>>,
    /// Include paths as written (with the default extension applied), kept
    /// for the emitter's `#include` lines.
    pub include_paths: Vec<String>,
}

impl FileData {
    pub fn new(file: FileId, tree: Tree) -> Self {
        FileData {
            file,
            tree,
            types: Vec::new(),
            maps: Vec::new(),
            symbols: rustc_hash::FxHashMap::default(),
            includes: Vec::new(),
            include_paths: Vec::new(),
        }
    }

    /// Resolve a name to a type, searching this file then its include chain.
    ///
    /// A name bound to a map does not resolve as a type; the shared
    /// namespace means the map shadows any type of the same name further
    /// down the chain.
    pub fn resolve_type(&self, name: &str) -> Option<TypeRef> {
        let mut visited = FxHashSet::default();
        self.resolve_type_inner(name, &mut visited)
    }

    fn resolve_type_inner(&self, name: &str, visited: &mut FxHashSet<u32>) -> Option<TypeRef> {
        if !visited.insert(self.file.0) {
            return None;
        }
        if let Some(symbol) = self.symbols.get(name) {
            return match *symbol {
                Symbol::Type(index) => Some(TypeRef {
                    file: self.file,
                    index,
                }),
                Symbol::Map(_) => None,
            };
        }
        self.includes
            .iter()
            .find_map(|inc| inc.resolve_type_inner(name, visited))
    }

    /// Find where a name is already bound, for duplicate-symbol reports.
    pub fn find_symbol(&self, name: &str) -> Option<(FileId, Span)> {
        let mut visited = FxHashSet::default();
        self.find_symbol_inner(name, &mut visited)
    }

    fn find_symbol_inner(&self, name: &str, visited: &mut FxHashSet<u32>) -> Option<(FileId, Span)> {
        if !visited.insert(self.file.0) {
            return None;
        }
        if let Some(symbol) = self.symbols.get(name) {
            let span = match *symbol {
                Symbol::Type(index) => self.types[index as usize].span,
                Symbol::Map(index) => self.maps[index as usize].span,
            };
            return Some((self.file, span));
        }
        self.includes
            .iter()
            .find_map(|inc| inc.find_symbol_inner(name, visited))
    }

    /// Dereference a [`TypeRef`], searching this file then its include chain
    /// for the owning registry.
    pub fn get_type(&self, r: TypeRef) -> Option<&TypeInfo> {
        let mut visited = FxHashSet::default();
        self.owner_of(r.file, &mut visited)
            .and_then(|fd| fd.types.get(r.index as usize))
    }

    fn owner_of(&self, file: FileId, visited: &mut FxHashSet<u32>) -> Option<&FileData> {
        if !visited.insert(self.file.0) {
            return None;
        }
        if self.file == file {
            return Some(self);
        }
        self.includes
            .iter()
            .find_map(|inc| inc.owner_of(file, visited))
    }
}
