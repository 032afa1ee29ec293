//! Record types held by a preparsed descriptor

use serde::{Deserialize, Serialize};

/// Report direction a report item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Input,
    Output,
    Feature,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [ReportKind::Input, ReportKind::Output, ReportKind::Feature];
}

/// Collection type as declared by the main `Collection` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Physical,
    #[default]
    Application,
    Logical,
    Report,
    NamedArray,
    UsageSwitch,
    UsageModifier,
    VendorDefined(u8),
}

impl CollectionKind {
    /// Map the raw `Collection` item data byte.
    pub fn from_raw(value: u8) -> Self {
        match value {
            0x00 => CollectionKind::Physical,
            0x01 => CollectionKind::Application,
            0x02 => CollectionKind::Logical,
            0x03 => CollectionKind::Report,
            0x04 => CollectionKind::NamedArray,
            0x05 => CollectionKind::UsageSwitch,
            0x06 => CollectionKind::UsageModifier,
            other => CollectionKind::VendorDefined(other),
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            CollectionKind::Physical => 0x00,
            CollectionKind::Application => 0x01,
            CollectionKind::Logical => 0x02,
            CollectionKind::Report => 0x03,
            CollectionKind::NamedArray => 0x04,
            CollectionKind::UsageSwitch => 0x05,
            CollectionKind::UsageModifier => 0x06,
            CollectionKind::VendorDefined(raw) => raw,
        }
    }
}

/// A usage, or an inclusive usage range, scoped to the owning item's usage page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageDescriptor {
    Single(u32),
    Range { minimum: u32, maximum: u32 },
}

impl UsageDescriptor {
    pub fn range(minimum: u32, maximum: u32) -> Self {
        UsageDescriptor::Range { minimum, maximum }
    }

    /// Inclusive `(minimum, maximum)` bounds. A single usage is a range of one.
    pub fn bounds(&self) -> (u32, u32) {
        match *self {
            UsageDescriptor::Single(usage) => (usage, usage),
            UsageDescriptor::Range { minimum, maximum } => (minimum, maximum),
        }
    }

    pub fn contains(&self, usage: u32) -> bool {
        let (minimum, maximum) = self.bounds();
        minimum <= usage && usage <= maximum
    }

    pub fn is_range(&self) -> bool {
        matches!(self, UsageDescriptor::Range { .. })
    }

    /// `false` only for a range whose minimum exceeds its maximum.
    pub fn is_well_formed(&self) -> bool {
        let (minimum, maximum) = self.bounds();
        minimum <= maximum
    }
}

/// One field group within a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportItem {
    pub report_kind: ReportKind,
    pub usage_page: u32,
    pub parent_collection: usize,
    pub first_usage_descriptor: usize,
    /// Precomputed by the descriptor decoder from the main item's data bits.
    pub is_variable: bool,
    /// Protocol-level report ID, 0 when the descriptor declares none.
    pub report_id: u8,
}

/// A node of the collection hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub kind: CollectionKind,
    /// `None` for a top-level collection.
    pub parent: Option<usize>,
    pub(crate) report_items: Vec<usize>,
}

impl Collection {
    pub fn new(kind: CollectionKind, parent: Option<usize>) -> Self {
        Self {
            kind,
            parent,
            report_items: Vec::new(),
        }
    }

    /// Indices of the report items this collection directly owns, ascending.
    pub fn report_items(&self) -> &[usize] {
        &self.report_items
    }

    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}
