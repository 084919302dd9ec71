use serde::{Deserialize, Serialize};

use models::package::{parse_price, NewPackage};

pub use models::package::Model as Package;

/// Validated create/update payload.
pub type PackageInput = NewPackage;

/// Raw admin form submission. Every field arrives as text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageForm {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub features: String,
    #[serde(default, alias = "whatsapp_message")]
    pub contact_message_template: String,
}

impl PackageForm {
    /// Coerce and validate the form before it reaches persistence.
    pub fn into_input(self) -> Result<PackageInput, models::errors::ModelError> {
        let input = NewPackage {
            price: parse_price(&self.price)?,
            category: self.category.trim().to_string(),
            name: self.name.trim().to_string(),
            features: self.features,
            contact_message_template: self.contact_message_template,
        };
        input.validate()?;
        Ok(input)
    }
}

/// Packages sharing one category string, in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub packages: Vec<Package>,
}

/// Group packages by exact category equality. Groups appear in
/// first-seen order and keep the incoming package order.
pub fn group_by_category(packages: Vec<Package>) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for p in packages {
        match groups.iter_mut().find(|g| g.category == p.category) {
            Some(g) => g.packages.push(p),
            None => groups.push(CategoryGroup { category: p.category.clone(), packages: vec![p] }),
        }
    }
    groups
}
