/// Feature properties carried over from the source data, as string pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentProperties {
    pub pairs: Vec<(String, String)>,
}

impl ComponentProperties {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ComponentProperties;

    #[test]
    fn get_returns_first_match() {
        let props = ComponentProperties::new(vec![
            ("name".into(), "B".into()),
            ("style".into(), "arrow".into()),
        ]);
        assert_eq!(props.get("style"), Some("arrow"));
        assert_eq!(props.get("missing"), None);
    }
}
