use crate::attribute::Attribute;
use infraguard_types::SourceRange;

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    /// Block type keyword: `resource`, `data`, `module`, or a nested block name.
    pub kind: String,
    pub labels: Vec<String>,
    pub range: SourceRange,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Block>,
}

impl Block {
    pub fn new<I, S>(kind: impl Into<String>, labels: I, range: SourceRange) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: kind.into(),
            labels: labels.into_iter().map(Into::into).collect(),
            range,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn resource(type_label: &str, name: &str, range: SourceRange) -> Self {
        Self::new("resource", [type_label, name], range)
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_child(mut self, child: Block) -> Self {
        self.children.push(child);
        self
    }

    /// First label, e.g. `aws_s3_bucket` for a resource.
    pub fn type_label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }

    pub fn name_label(&self) -> Option<&str> {
        self.labels.last().map(String::as_str)
    }

    /// Address used in messages and references, e.g. `aws_s3_bucket.logs`.
    pub fn full_name(&self) -> String {
        let joined = self.labels.join(".");
        match self.kind.as_str() {
            "resource" => joined,
            "data" => format!("data.{joined}"),
            "variable" => format!("var.{joined}"),
            "module" => format!("module.{joined}"),
            _ if joined.is_empty() => self.kind.clone(),
            kind => format!("{kind}.{joined}"),
        }
    }

    pub fn is_resource_type(&self, type_label: &str) -> bool {
        self.kind == "resource" && self.type_label() == Some(type_label)
    }

    /// Attribute lookup; dotted paths descend through nested blocks
    /// (`network_acls.default_action`).
    pub fn attribute(&self, path: &str) -> Option<&Attribute> {
        match path.rsplit_once('.') {
            None => self.attributes.iter().find(|a| a.name == path),
            Some((parents, name)) => {
                let mut current = self;
                for segment in parents.split('.') {
                    current = current.block(segment)?;
                }
                current.attributes.iter().find(|a| a.name == name)
            }
        }
    }

    pub fn block(&self, kind: &str) -> Option<&Block> {
        self.children.iter().find(|b| b.kind == kind)
    }

    pub fn blocks<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Block> + 'a {
        self.children.iter().filter(move |b| b.kind == kind)
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.attribute(name).is_some() || self.block(name).is_some()
    }

    pub fn missing_child(&self, name: &str) -> bool {
        !self.has_child(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(start: u32, end: u32) -> SourceRange {
        SourceRange::new("main.tf", start, end)
    }

    fn key_vault() -> Block {
        Block::resource("azurerm_key_vault", "vault", r(1, 12))
            .with_attribute(Attribute::new("name", "kv", r(2, 2)))
            .with_child(
                Block::new("network_acls", Vec::<String>::new(), r(4, 7))
                    .with_attribute(Attribute::new("bypass", "AzureServices", r(5, 5)))
                    .with_attribute(Attribute::new("default_action", "Deny", r(6, 6))),
            )
    }

    #[test]
    fn names_follow_address_syntax() {
        assert_eq!(key_vault().full_name(), "azurerm_key_vault.vault");
        assert_eq!(
            Block::new("data", ["aws_iam_policy", "p"], r(1, 1)).full_name(),
            "data.aws_iam_policy.p"
        );
        assert_eq!(Block::new("module", ["vpc"], r(1, 1)).full_name(), "module.vpc");
        assert_eq!(
            Block::new("locals", Vec::<String>::new(), r(1, 1)).full_name(),
            "locals"
        );
    }

    #[test]
    fn dotted_attribute_lookup_descends_into_nested_blocks() {
        let b = key_vault();
        assert_eq!(
            b.attribute("network_acls.default_action")
                .and_then(|a| a.as_str()),
            Some("Deny")
        );
        assert_eq!(b.attribute("network_acls.default_action").map(|a| a.range.start_line), Some(6));
        assert!(b.attribute("network_acls.missing").is_none());
        assert!(b.attribute("missing_block.default_action").is_none());
        assert_eq!(b.attribute("name").and_then(|a| a.as_str()), Some("kv"));
    }

    #[test]
    fn child_presence_checks_attributes_and_blocks() {
        let b = key_vault();
        assert!(b.has_child("name"));
        assert!(b.has_child("network_acls"));
        assert!(b.missing_child("network_rules"));
        assert_eq!(b.blocks("network_acls").count(), 1);
        assert!(b.is_resource_type("azurerm_key_vault"));
        assert!(!b.is_resource_type("azurerm_storage_account"));
    }
}
