use super::Flags;

/// Binary encoding of the parameter document.
///
/// Both versions carry the same logical schema. Version 1 is the big endian
/// Wii U form, version 2 the little endian Switch form. The version is fixed
/// when a document is created and never derived from its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaVersion {
    V1,
    V2,
}

impl SchemaVersion {
    pub const fn number(self) -> u32 {
        match self {
            SchemaVersion::V1 => 1,
            SchemaVersion::V2 => 2,
        }
    }

    pub const fn from_number(number: u32) -> Option<Self> {
        match number {
            1 => Some(SchemaVersion::V1),
            2 => Some(SchemaVersion::V2),
            _ => None,
        }
    }

    pub const fn flags(self) -> Flags {
        match self {
            SchemaVersion::V1 => Flags::UTF8,
            SchemaVersion::V2 => Flags::LITTLE_ENDIAN.union(Flags::UTF8),
        }
    }

    pub const fn is_little_endian(self) -> bool {
        matches!(self, SchemaVersion::V2)
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_roundtrip() {
        for version in [SchemaVersion::V1, SchemaVersion::V2] {
            assert_eq!(SchemaVersion::from_number(version.number()), Some(version));
        }
        assert_eq!(SchemaVersion::from_number(3), None);
    }

    #[test]
    fn test_flags() {
        assert_eq!(SchemaVersion::V1.flags(), Flags::UTF8);
        assert_eq!(SchemaVersion::V2.flags().bits(), 0b11);
        assert!(SchemaVersion::V2.is_little_endian());
        assert!(!SchemaVersion::V1.is_little_endian());
    }
}
