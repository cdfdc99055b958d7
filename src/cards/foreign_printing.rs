use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForeignPrinting {
    pub multiverse_id: u32,
    pub name: String,
    pub language: String,
}

impl ForeignPrinting {
    pub fn new(multiverse_id: u32, name: &str, language: &str) -> Self {
        Self {
            multiverse_id,
            name: name.to_string(),
            language: language.to_string(),
        }
    }
}

/// Two printings are the same when they share a source id
impl PartialEq for ForeignPrinting {
    fn eq(&self, other: &Self) -> bool {
        self.multiverse_id == other.multiverse_id
    }
}

impl Eq for ForeignPrinting {}
