use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Names keyed by BCP 47 language tag, in declared order
pub type Names = IndexMap<String, String>;

/// Optional fields that may be backfilled from vocabulary data.
/// Values already present are never replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrichment {
    #[serde(default, alias = "wikipedia_url", skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default)]
    pub names: Names,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spice_heat_level: Option<u8>,
    #[serde(flatten)]
    pub enrichment: Enrichment,

    /// Markup produced by segmentation of the primary name
    #[serde(rename = "_annotated_name", default, skip_serializing_if = "Option::is_none")]
    pub annotated_name: Option<String>,
}

impl MenuItem {
    pub fn name(&self, lang: &str) -> Option<&str> {
        self.names
            .get(lang)
            .map(String::as_str)
            .filter(|n| !n.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuSection {
    #[serde(default)]
    pub names: Names,
    #[serde(default, alias = "menu_items")]
    pub items: Vec<MenuItem>,
    #[serde(flatten)]
    pub enrichment: Enrichment,

    #[serde(rename = "_annotated_name", default, skip_serializing_if = "Option::is_none")]
    pub annotated_name: Option<String>,
    /// Fragment identifier derived from the primary name
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub anchor_id: Option<String>,
    #[serde(rename = "_name_all_langs", default, skip_serializing_if = "Option::is_none")]
    pub name_all_langs: Option<String>,
}

impl MenuSection {
    pub fn name(&self, lang: &str) -> Option<&str> {
        self.names
            .get(lang)
            .map(String::as_str)
            .filter(|n| !n.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_footer: Option<String>,
    #[serde(default)]
    pub sections: Vec<MenuSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Menu {
    pub language_codes: Vec<String>,
    #[serde(default)]
    pub pages: Vec<MenuPage>,

    /// Languages the rendered page shows; see [`Menu::display_language_codes`]
    #[serde(rename = "_display_language_codes", default, skip_serializing_if = "Vec::is_empty")]
    pub display_languages: Vec<String>,
}

impl Menu {
    /// First declared language
    pub fn primary_language(&self) -> Option<&str> {
        self.language_codes.first().map(String::as_str)
    }

    /// Declared languages with English appended when missing
    pub fn display_language_codes(&self) -> Vec<String> {
        let mut codes = self.language_codes.clone();
        if !codes.iter().any(|c| c == "en") {
            codes.push("en".to_string());
        }
        codes
    }

    /// Store [`Menu::display_language_codes`] for the written document
    pub fn fill_display_languages(&mut self) {
        self.display_languages = self.display_language_codes();
    }

    pub fn sections(&self) -> impl Iterator<Item = &MenuSection> {
        self.pages.iter().flat_map(|p| p.sections.iter())
    }

    pub fn sections_mut(&mut self) -> impl Iterator<Item = &mut MenuSection> {
        self.pages.iter_mut().flat_map(|p| p.sections.iter_mut())
    }

    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.sections().flat_map(|s| s.items.iter())
    }
}

/// A parsed restaurant menu document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuDocument {
    /// Identifier of the rendered document, usually its output file name
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<Menu>,
}

impl MenuDocument {
    pub fn primary_language(&self) -> Option<&str> {
        self.menu.as_ref().and_then(Menu::primary_language)
    }

    /// Primary-language item names in document order, repeats included
    pub fn primary_item_names(&self) -> Vec<&str> {
        let Some(menu) = &self.menu else {
            return Vec::new();
        };
        let Some(lang) = menu.primary_language() else {
            return Vec::new();
        };
        menu.items().filter_map(|item| item.name(lang)).collect()
    }
}
