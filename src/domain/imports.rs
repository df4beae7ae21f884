// Import bindings: local alias -> original exported name.
// The module source path is not retained; only the alias matters for
// resolution inside the file.

use indexmap::IndexMap;

#[derive(Debug, Default)]
pub struct ImportTable {
    bindings: IndexMap<String, String>,
}

impl ImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a local alias to the name it was imported as. Re-importing
    /// under the same alias overwrites; the last binding wins.
    pub fn bind(&mut self, alias: &str, original: &str) {
        self.bindings
            .insert(alias.to_string(), original.to_string());
    }

    pub fn has(&self, alias: &str) -> bool {
        self.bindings.contains_key(alias)
    }

    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.bindings.get(alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_binding_wins() {
        let mut table = ImportTable::new();
        table.bind("Button", "Button");
        table.bind("Button", "BaseButton");

        assert_eq!(table.resolve("Button"), Some("BaseButton"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_unbound_alias() {
        let table = ImportTable::new();
        assert!(!table.has("Missing"));
        assert_eq!(table.resolve("Missing"), None);
    }
}
