use serde::Serialize;

/// Registration details of the block, as the editor lists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockMetadata {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
    pub attributes_version: u32,
}

pub const BLOCK_METADATA: BlockMetadata = BlockMetadata {
    name: "pwn-bestseller/bestseller-block",
    title: "Bestseller Display",
    description: "Display bestselling books by genre",
    icon: "book-alt",
    category: "widgets",
    attributes_version: crate::attributes::ATTRIBUTES_VERSION,
};

/// JSON schema of the persisted attributes.
#[cfg(feature = "schemars")]
pub fn attributes_schema() -> schemars::Schema {
    schemars::schema_for!(crate::attributes::BlockAttributes)
}
