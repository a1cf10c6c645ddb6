//! Configuration types for TypeScript emission.

/// How a `["null", T]` field is declared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Optional {
    /// `name?: T`
    #[default]
    Undefined,
    /// `name: T | null`
    Null,
}

/// How Avro enums are declared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnumStyle {
    /// `type Suit = "HEARTS" | "SPADES"`
    #[default]
    Union,
    /// `enum Suit { Hearts = "HEARTS", ... }`
    Enum,
}

/// Configuration for TypeScript emission.
#[derive(Clone, Debug)]
pub struct Config {
    /// Whether to export types
    pub(crate) export: bool,
    pub(crate) optional: Optional,
    pub(crate) enums: EnumStyle,
    /// Comment placed at the top of every file, one `//` line per line
    pub(crate) header: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export: true,
            optional: Optional::default(),
            enums: EnumStyle::default(),
            header: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to export types.
    pub fn export(mut self, value: bool) -> Self {
        self.export = value;
        self
    }

    pub fn optional(mut self, value: Optional) -> Self {
        self.optional = value;
        self
    }

    pub fn enums(mut self, value: EnumStyle) -> Self {
        self.enums = value;
        self
    }

    pub fn header(mut self, value: Option<String>) -> Self {
        self.header = value;
        self
    }
}
