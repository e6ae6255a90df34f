//! Non-owning handles to records inside a [`crate::NetworkFile`].
//!
//! A handle is the position of a record in its owning sequence. Handles are
//! cheap to copy and never keep a record alive. Records that other records
//! point at must be removed through the `NetworkFile::remove_*` operations,
//! which move later handles down with their records.

use serde::{Deserialize, Serialize};

macro_rules! entity_ref {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(usize);

        impl $name {
            #[inline]
            pub fn new(index: usize) -> Self {
                $name(index)
            }
            #[inline]
            pub fn index(&self) -> usize {
                self.0
            }
        }
    };
}

entity_ref!(
    /// Handle to a [`crate::System`].
    SystemRef
);
entity_ref!(
    /// Handle to a [`crate::Region`].
    RegionRef
);
entity_ref!(
    /// Handle to an [`crate::Area`].
    AreaRef
);
entity_ref!(
    /// Handle to a [`crate::Line`].
    LineRef
);
entity_ref!(
    /// Handle to a [`crate::DcLink`].
    DcLinkRef
);
entity_ref!(
    /// Handle to a [`crate::DcBus`].
    DcBusRef
);

/// Which bus sequence a [`BusRef`] points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusKind {
    Regular,
    /// Fictitious star point of a three-winding transformer.
    MiddlePoint,
}

/// Handle to a regular or middle point [`crate::Bus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusRef {
    pub kind: BusKind,
    pub index: usize,
}

impl BusRef {
    #[inline]
    pub fn regular(index: usize) -> Self {
        BusRef {
            kind: BusKind::Regular,
            index,
        }
    }
    #[inline]
    pub fn middle_point(index: usize) -> Self {
        BusRef {
            kind: BusKind::MiddlePoint,
            index,
        }
    }
}

/// Which transformer sequence a [`TransformerRef`] points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformerKind {
    TwoWinding,
    /// Winding of a three-winding transformer's star equivalent.
    Equivalent,
}

/// Handle to a two-winding or equivalent [`crate::Transformer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransformerRef {
    pub kind: TransformerKind,
    pub index: usize,
}

impl TransformerRef {
    #[inline]
    pub fn two_winding(index: usize) -> Self {
        TransformerRef {
            kind: TransformerKind::TwoWinding,
            index,
        }
    }
    #[inline]
    pub fn equivalent(index: usize) -> Self {
        TransformerRef {
            kind: TransformerKind::Equivalent,
            index,
        }
    }
}
