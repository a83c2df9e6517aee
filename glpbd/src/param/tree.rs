use std::fmt::Write as _;

use crate::Result;

use super::{
    Name, ParameterValue, SchemaVersion,
    consts::{PIO_TYPE, PIO_VERSION},
    reader, writer,
};

pub const ROOT_LIST: &str = "param_root";

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterObject {
    name: Name,
    parameters: Vec<(Name, ParameterValue)>,
}

impl ParameterObject {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    /// Appends a parameter, consuming and returning the object.
    pub fn with(mut self, name: impl Into<Name>, value: impl Into<ParameterValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Replaces the value of an existing parameter in place, or appends it.
    pub fn set(&mut self, name: impl Into<Name>, value: impl Into<ParameterValue>) {
        let name = name.into();
        let value = value.into();

        match self.parameters.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.parameters.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.parameters
            .iter()
            .find(|(key, _)| key.matches(name))
            .map(|(_, value)| value)
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn parameters(&self) -> impl ExactSizeIterator<Item = (&Name, &ParameterValue)> {
        self.parameters.iter().map(|(name, value)| (name, value))
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterList {
    name: Name,
    objects: Vec<ParameterObject>,
    lists: Vec<ParameterList>,
}

/// A child of a [`ParameterList`].
#[derive(Debug, Clone, Copy)]
pub enum ParameterNode<'a> {
    List(&'a ParameterList),
    Object(&'a ParameterObject),
}

impl ParameterNode<'_> {
    pub fn name(&self) -> &Name {
        match self {
            ParameterNode::List(list) => list.name(),
            ParameterNode::Object(object) => object.name(),
        }
    }
}

impl ParameterList {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
            lists: Vec::new(),
        }
    }

    pub fn with_object(mut self, object: ParameterObject) -> Self {
        self.objects.push(object);
        self
    }

    pub fn with_list(mut self, list: ParameterList) -> Self {
        self.lists.push(list);
        self
    }

    pub fn push_object(&mut self, object: ParameterObject) {
        self.objects.push(object);
    }

    pub fn push_list(&mut self, list: ParameterList) {
        self.lists.push(list);
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn objects(&self) -> &[ParameterObject] {
        &self.objects
    }

    pub fn lists(&self) -> &[ParameterList] {
        &self.lists
    }

    pub fn object(&self, name: &str) -> Option<&ParameterObject> {
        self.objects.iter().find(|object| object.name().matches(name))
    }

    pub fn list(&self, name: &str) -> Option<&ParameterList> {
        self.lists.iter().find(|list| list.name().matches(name))
    }

    /// Objects first, then sub-lists, each in insertion order.
    pub fn children(&self) -> impl Iterator<Item = ParameterNode<'_>> {
        self.objects
            .iter()
            .map(ParameterNode::Object)
            .chain(self.lists.iter().map(ParameterNode::List))
    }

    fn write_tree(&self, out: &mut String, depth: usize) -> std::fmt::Result {
        let indent = "  ".repeat(depth);
        writeln!(out, "{indent}{}:", self.name)?;

        for child in self.children() {
            match child {
                ParameterNode::Object(object) => {
                    writeln!(out, "{indent}  {}:", object.name())?;
                    for (name, value) in object.parameters() {
                        writeln!(out, "{indent}    {name}: {value}")?;
                    }
                }
                ParameterNode::List(list) => list.write_tree(out, depth + 1)?,
            }
        }

        Ok(())
    }
}

impl std::fmt::Display for ParameterList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = String::new();
        self.write_tree(&mut out, 0)?;
        f.write_str(&out)
    }
}

/// A complete parameter document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterIo {
    version: SchemaVersion,
    pio_type: String,
    pio_version: u32,
    root: ParameterList,
}

impl ParameterIo {
    pub fn new(version: SchemaVersion) -> Self {
        Self::with_root(version, ParameterList::new(ROOT_LIST))
    }

    pub fn with_root(version: SchemaVersion, root: ParameterList) -> Self {
        Self {
            version,
            pio_type: PIO_TYPE.to_string(),
            pio_version: PIO_VERSION,
            root,
        }
    }

    pub(crate) fn from_parts(
        version: SchemaVersion,
        pio_type: String,
        pio_version: u32,
        root: ParameterList,
    ) -> Self {
        Self {
            version,
            pio_type,
            pio_version,
            root,
        }
    }

    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    pub fn pio_type(&self) -> &str {
        &self.pio_type
    }

    pub fn pio_version(&self) -> u32 {
        self.pio_version
    }

    pub fn root(&self) -> &ParameterList {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut ParameterList {
        &mut self.root
    }

    /// Encodes the document. Identical trees always produce identical bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        writer::write_document(self)
    }

    /// Encodes the document and wraps it in a Yaz0 container.
    pub fn to_compressed_bytes(&self) -> Result<Vec<u8>> {
        let data = self.to_bytes()?;
        Ok(glpbd_yaz0::compress(&data)?)
    }

    /// Parses a document, Yaz0 wrapped or not.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if glpbd_yaz0::is_compressed(data) {
            let data = glpbd_yaz0::decompress(data)?;
            return reader::read_document(&data);
        }

        reader::read_document(data)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut object = ParameterObject::new("param_obj")
            .with("index", 0i32)
            .with("type", 0i32);
        object.set("index", 4i32);

        let names: Vec<String> = object.parameters().map(|(n, _)| n.to_string()).collect();
        assert_eq!(names, ["index", "type"]);
        assert_eq!(object.get("index"), Some(&ParameterValue::Int(4)));
        assert_eq!(object.len(), 2);
    }

    #[test]
    fn test_children_order() {
        let list = ParameterList::new("param_root")
            .with_list(ParameterList::new("b_0"))
            .with_object(ParameterObject::new("root_grid"))
            .with_object(ParameterObject::new("param_obj"));

        let names: Vec<String> = list.children().map(|c| c.name().to_string()).collect();
        assert_eq!(names, ["root_grid", "param_obj", "b_0"]);
        assert!(list.list("b_0").is_some());
        assert!(list.object("grid").is_none());
    }

    #[test]
    fn test_display_tree() {
        let list = ParameterList::new("param_root").with_list(
            ParameterList::new("b_0")
                .with_object(ParameterObject::new("grid").with("voxel_step_pos", Vec3::ONE)),
        );

        assert_eq!(
            list.to_string(),
            "param_root:\n  b_0:\n    grid:\n      voxel_step_pos: [1, 1, 1]\n"
        );
    }

    #[test]
    fn test_new_document() {
        let pio = ParameterIo::new(SchemaVersion::V2);

        assert_eq!(pio.version(), SchemaVersion::V2);
        assert_eq!(pio.pio_type(), "glpbd");
        assert_eq!(pio.pio_version(), 0);
        assert!(pio.root().name().matches("param_root"));
    }
}
