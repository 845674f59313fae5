use crate::block::Block;
use infraguard_inline_suppressions::{IgnoreDirective, attach_to_blocks, parse_ignores};
use infraguard_types::SourceRange;

/// One scanned configuration module (a directory of files, or a called module).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Module {
    pub name: String,
    pub blocks: Vec<Block>,
    pub ignores: Vec<IgnoreDirective>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blocks: Vec::new(),
            ignores: Vec::new(),
        }
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn with_blocks(mut self, blocks: impl IntoIterator<Item = Block>) -> Self {
        self.blocks.extend(blocks);
        self
    }

    /// Harvest ignore directives from the text of one source file.
    ///
    /// Call after the file's blocks have been added so directives can be bound
    /// to the block they precede.
    pub fn with_source(mut self, path: &str, source: &str) -> Self {
        let mut directives = parse_ignores(path, source);
        attach_to_blocks(&mut directives, &self.block_ranges());
        self.ignores.extend(directives);
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn ignores(&self) -> &[IgnoreDirective] {
        &self.ignores
    }

    pub fn block_ranges(&self) -> Vec<SourceRange> {
        self.blocks.iter().map(|b| b.range.clone()).collect()
    }

    pub fn resources_of_type<'a>(&'a self, type_label: &'a str) -> impl Iterator<Item = &'a Block> + 'a {
        self.blocks
            .iter()
            .filter(move |b| b.is_resource_type(type_label))
    }

    /// Resources of `type_label` whose `attribute` refers to `target`,
    /// e.g. every `azurerm_postgresql_configuration` whose `server_name`
    /// points at a given server.
    pub fn referencing_blocks<'a>(
        &'a self,
        target: &Block,
        type_label: &'a str,
        attribute: &str,
    ) -> Vec<&'a Block> {
        let address = target.full_name();
        self.resources_of_type(type_label)
            .filter(|candidate| {
                candidate
                    .attribute(attribute)
                    .and_then(|a| a.reference())
                    .is_some_and(|r| refers_to(r, &address))
            })
            .collect()
    }
}

fn refers_to(reference: &str, address: &str) -> bool {
    reference
        .strip_prefix(address)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.') || rest.starts_with('['))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{Attribute, Value};

    fn r(start: u32, end: u32) -> SourceRange {
        SourceRange::new("db.tf", start, end)
    }

    fn config(name: &str, server_ref: &str, start: u32) -> Block {
        Block::resource("azurerm_postgresql_configuration", name, r(start, start + 4))
            .with_attribute(Attribute::new(
                "server_name",
                Value::Reference(server_ref.to_string()),
                r(start + 1, start + 1),
            ))
    }

    #[test]
    fn finds_blocks_referencing_target_through_attribute() {
        let server = Block::resource("azurerm_postgresql_server", "example", r(1, 10));
        let module = Module::new("root")
            .with_block(server.clone())
            .with_block(config("a", "azurerm_postgresql_server.example.name", 12))
            .with_block(config("b", "azurerm_postgresql_server.example2.name", 18))
            .with_block(config("c", "azurerm_postgresql_server.example", 24));

        let referencing = module.referencing_blocks(
            &server,
            "azurerm_postgresql_configuration",
            "server_name",
        );
        let names: Vec<String> = referencing.iter().map(|b| b.full_name()).collect();
        assert_eq!(
            names,
            vec![
                "azurerm_postgresql_configuration.a",
                "azurerm_postgresql_configuration.c"
            ]
        );
    }

    #[test]
    fn harvests_and_attaches_source_directives() {
        let source = "\n# tfsec:ignore:AZU018\nresource \"azurerm_postgresql_server\" \"example\" {\n}\n";
        let module = Module::new("root")
            .with_block(Block::resource("azurerm_postgresql_server", "example", r(3, 4)))
            .with_source("db.tf", source);

        assert_eq!(module.ignores().len(), 1);
        assert_eq!(module.ignores()[0].annotated, Some(r(3, 4)));
    }
}
