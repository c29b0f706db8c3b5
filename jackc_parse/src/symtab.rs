use jackc_err::sym_err::{SymErr, SymErrTy};
use std::{collections::HashMap, fmt};

/// Storage role of a declared name. The kind decides which scope the name
/// lives in and which counter its index comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymKind {
    Static,
    Field,
    Arg,
    Local,
}

impl SymKind {
    /// True if names of this kind live in the class scope.
    pub fn is_class_level(&self) -> bool {
        matches!(self, SymKind::Static | SymKind::Field)
    }
}

impl fmt::Display for SymKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let pretty = match self {
            SymKind::Static => "static",
            SymKind::Field => "field",
            SymKind::Arg => "argument",
            SymKind::Local => "local",
        };

        write!(f, "{}", pretty)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymEntry {
    /// Declared type: a primitive type name or a class name.
    pub ty: String,
    pub kind: SymKind,
    pub idx: usize,
}

/// Scope is a map of names to their declarations.
type Scope = HashMap<String, SymEntry>;

#[derive(Debug, Default)]
pub struct SymTab {
    /// Statics and fields. Lives for the whole source unit.
    class_scope: Scope,

    /// Arguments and locals. Reset at the start of every subroutine.
    sub_scope: Scope,

    /// Next index for each kind.
    counts: HashMap<SymKind, usize>,
}

impl SymTab {
    pub fn new() -> SymTab {
        SymTab::default()
    }

    /// Clears the subroutine scope and its argument/local counters. The class
    /// scope is left untouched.
    pub fn start_subroutine(&mut self) {
        self.sub_scope.clear();
        self.counts.remove(&SymKind::Arg);
        self.counts.remove(&SymKind::Local);
    }

    /// Store a symbol in the scope implied by its kind and return the index
    /// assigned to it. Names must be unique within their scope.
    pub fn define(&mut self, name: &str, ty: &str, kind: SymKind) -> Result<usize, SymErr> {
        let scope = match kind.is_class_level() {
            true => &mut self.class_scope,
            false => &mut self.sub_scope,
        };

        if scope.contains_key(name) {
            return Err(SymErr::new(SymErrTy::DuplicateDecl(name.to_string())));
        }

        let count = self.counts.entry(kind).or_insert(0);
        let idx = *count;
        *count += 1;

        scope.insert(
            String::from(name),
            SymEntry {
                ty: String::from(ty),
                kind,
                idx,
            },
        );

        Ok(idx)
    }

    /// Get a symbol from the table. The subroutine scope is checked first, so
    /// locals and arguments shadow class level names of the same spelling.
    /// Returns None if the symbol doesn't exist.
    pub fn retrieve(&self, name: &str) -> Option<&SymEntry> {
        self.sub_scope
            .get(name)
            .or_else(|| self.class_scope.get(name))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.retrieve(name).is_some()
    }

    pub fn kind_of(&self, name: &str) -> Result<SymKind, SymErr> {
        self.lookup(name).map(|entry| entry.kind)
    }

    pub fn type_of(&self, name: &str) -> Result<&str, SymErr> {
        self.lookup(name).map(|entry| entry.ty.as_str())
    }

    pub fn index_of(&self, name: &str) -> Result<usize, SymErr> {
        self.lookup(name).map(|entry| entry.idx)
    }

    /// Number of names of the given kind defined so far in the active scopes.
    pub fn var_count(&self, kind: SymKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Class level entries ordered by kind, then index.
    pub fn class_entries(&self) -> Vec<(&str, &SymEntry)> {
        sorted(&self.class_scope)
    }

    /// Subroutine level entries ordered by kind, then index.
    pub fn sub_entries(&self) -> Vec<(&str, &SymEntry)> {
        sorted(&self.sub_scope)
    }

    fn lookup(&self, name: &str) -> Result<&SymEntry, SymErr> {
        self.retrieve(name)
            .ok_or_else(|| SymErr::new(SymErrTy::Undeclared(name.to_string())))
    }
}

fn sorted(scope: &Scope) -> Vec<(&str, &SymEntry)> {
    let mut entries: Vec<(&str, &SymEntry)> = scope
        .iter()
        .map(|(name, entry)| (name.as_str(), entry))
        .collect();
    entries.sort_by_key(|(_, entry)| (entry.kind, entry.idx));
    entries
}
