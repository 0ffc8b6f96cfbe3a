use std::collections::BTreeMap;

use crate::node::{Kind, Node};

/// Why a kind is banned: the ancestor that opened it and where.
#[derive(Debug, Clone, Copy)]
pub struct Ban<'a> {
    pub opened_by: &'a Node,
    pub depth: usize,
}

/// The non-repeatable kinds open above the node being validated.
///
/// Sets are values: [`BanSet::with`] returns an extended copy and leaves the
/// receiver untouched, so siblings never see each other's bans.
#[derive(Debug, Clone, Default)]
pub struct BanSet<'a> {
    bans: BTreeMap<Kind, Ban<'a>>,
}

impl<'a> BanSet<'a> {
    pub fn empty() -> Self {
        BanSet::default()
    }

    pub fn get(&self, kind: Kind) -> Option<&Ban<'a>> {
        self.bans.get(&kind)
    }

    pub fn contains(&self, kind: Kind) -> bool {
        self.bans.contains_key(&kind)
    }

    pub fn with(&self, kind: Kind, ban: Ban<'a>) -> BanSet<'a> {
        let mut bans = self.bans.clone();
        bans.insert(kind, ban);
        BanSet { bans }
    }

    pub fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        self.bans.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.bans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bans.is_empty()
    }
}
