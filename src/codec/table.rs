//! Codec tables — the static field set of one concrete type.
//!
//! A derived type's table names its parent and adds entries; it never
//! copies or replaces the parent. The flattened view is computed once on
//! first use and shared by every instance.

use std::sync::OnceLock;

use hashbrown::HashMap;
use smallvec::SmallVec;

use super::FieldCodec;

/// Ordered, inheritable field codec table. Declare as a `static`.
#[derive(Debug)]
pub struct CodecTable {
    parent: Option<&'static CodecTable>,
    fields: &'static [FieldCodec],
    resolved: OnceLock<Resolved>,
}

#[derive(Debug)]
struct Resolved {
    order: Vec<&'static FieldCodec>,
    index: HashMap<&'static str, usize>,
}

impl CodecTable {
    /// Root table with no parent.
    pub const fn new(fields: &'static [FieldCodec]) -> Self {
        Self { parent: None, fields, resolved: OnceLock::new() }
    }

    /// Table extending `parent` with `fields`.
    ///
    /// An entry whose name collides with an inherited one replaces it in
    /// the inherited position.
    pub const fn extends(parent: &'static CodecTable, fields: &'static [FieldCodec]) -> Self {
        Self { parent: Some(parent), fields, resolved: OnceLock::new() }
    }

    pub fn parent(&self) -> Option<&'static CodecTable> {
        self.parent
    }

    /// Entries declared directly on this table, excluding inherited ones.
    pub fn own_fields(&self) -> &'static [FieldCodec] {
        self.fields
    }

    pub fn get(&self, name: &str) -> Option<&'static FieldCodec> {
        let resolved = self.resolved();
        resolved.index.get(name).map(|&pos| resolved.order[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolved().index.contains_key(name)
    }

    /// All entries, root ancestor first, each table in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static FieldCodec> + '_ {
        self.resolved().order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.resolved().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn resolved(&self) -> &Resolved {
        self.resolved.get_or_init(|| {
            let mut chain: SmallVec<[&CodecTable; 4]> = SmallVec::new();
            let mut current = Some(self);
            while let Some(table) = current {
                chain.push(table);
                current = table.parent;
            }

            let mut order: Vec<&'static FieldCodec> = Vec::new();
            let mut index: HashMap<&'static str, usize> = HashMap::new();
            for table in chain.iter().rev() {
                for field in table.fields {
                    match index.get(field.name) {
                        Some(&pos) => order[pos] = field,
                        None => {
                            index.insert(field.name, order.len());
                            order.push(field);
                        }
                    }
                }
            }
            Resolved { order, index }
        })
    }
}
