use rustc_hash::FxHashMap;

/// Name of a list, object or parameter.
///
/// The binary format only keeps the CRC-32 of the name. Names read back from
/// a file carry their text only when it could be resolved through a
/// [`NameTable`]. Equality and hashing go through the CRC alone.
#[derive(Debug, Clone)]
pub struct Name {
    hash: u32,
    text: Option<String>,
}

impl Name {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();

        Self {
            hash: crc32fast::hash(text.as_bytes()),
            text: Some(text),
        }
    }

    pub const fn from_hash(hash: u32) -> Self {
        Self { hash, text: None }
    }

    #[inline(always)]
    pub const fn hash(&self) -> u32 {
        self.hash
    }

    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn matches(&self, text: &str) -> bool {
        self.hash == crc32fast::hash(text.as_bytes())
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Name {}

impl std::hash::Hash for Name {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::hash::Hash::hash(&self.hash, state);
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Name {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.text {
            Some(text) => f.write_str(text),
            None => write!(f, "0x{:08x}", self.hash),
        }
    }
}

/// Reverse lookup from name hashes to known strings.
#[derive(Debug, Default)]
pub struct NameTable {
    names: FxHashMap<u32, String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut table = Self::new();
        for name in names {
            table.add(name);
        }
        table
    }

    pub fn add(&mut self, text: &str) {
        self.names
            .insert(crc32fast::hash(text.as_bytes()), text.to_string());
    }

    pub fn resolve(&self, hash: u32) -> Name {
        match self.names.get(&hash) {
            Some(text) => Name {
                hash,
                text: Some(text.clone()),
            },
            None => Name::from_hash(hash),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
