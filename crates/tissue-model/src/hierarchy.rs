//! Folder/leaf hierarchy used to annotate exported tissues with a path.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A node of the tissue hierarchy tree.
///
/// Folders group tissues for display; leaves name a tissue. The tree is a
/// read-only input to export, so it is modelled as an owned value rather
/// than a parent-linked graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HierarchyItem {
    Folder {
        name: String,
        #[serde(default)]
        children: Vec<HierarchyItem>,
    },
    Tissue {
        name: String,
    },
}

impl HierarchyItem {
    pub fn folder(name: impl Into<String>, children: Vec<HierarchyItem>) -> Self {
        Self::Folder {
            name: name.into(),
            children,
        }
    }

    pub fn tissue(name: impl Into<String>) -> Self {
        Self::Tissue { name: name.into() }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Folder { name, .. } | Self::Tissue { name } => name,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder { .. })
    }

    pub fn children(&self) -> &[HierarchyItem] {
        match self {
            Self::Folder { children, .. } => children,
            Self::Tissue { .. } => &[],
        }
    }

    /// Map every leaf name to its ancestor folder path, `self` excluded.
    ///
    /// Folder names are listed from the nearest ancestor outwards and joined
    /// with `/`; leaves directly under `self` get an empty path. When a name
    /// occurs on several leaves, the first one in depth-first order wins.
    pub fn leaf_paths(&self) -> HashMap<String, String> {
        let mut paths = HashMap::new();
        let mut ancestors = Vec::new();
        for child in self.children() {
            collect_leaf_paths(child, &mut ancestors, &mut paths);
        }
        paths
    }
}

fn collect_leaf_paths<'a>(
    item: &'a HierarchyItem,
    ancestors: &mut Vec<&'a str>,
    paths: &mut HashMap<String, String>,
) {
    match item {
        HierarchyItem::Folder { name, children } => {
            ancestors.push(name);
            for child in children {
                collect_leaf_paths(child, ancestors, paths);
            }
            ancestors.pop();
        }
        HierarchyItem::Tissue { name } => {
            let path = ancestors.iter().rev().copied().collect::<Vec<_>>().join("/");
            paths.entry(name.clone()).or_insert(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> HierarchyItem {
        HierarchyItem::folder(
            "Tissues",
            vec![
                HierarchyItem::tissue("Skin"),
                HierarchyItem::folder(
                    "Organs",
                    vec![
                        HierarchyItem::folder("Heart", vec![HierarchyItem::tissue("Heart_lumen")]),
                        HierarchyItem::tissue("Liver"),
                    ],
                ),
                HierarchyItem::folder("Other", vec![HierarchyItem::tissue("Liver")]),
            ],
        )
    }

    #[test]
    fn test_paths_exclude_root_and_list_nearest_folder_first() {
        let paths = tree().leaf_paths();
        assert_eq!(paths.get("Skin").map(String::as_str), Some(""));
        assert_eq!(paths.get("Liver").map(String::as_str), Some("Organs"));
        assert_eq!(
            paths.get("Heart_lumen").map(String::as_str),
            Some("Heart/Organs")
        );
        assert!(!paths.contains_key("Organs"));
    }

    #[test]
    fn test_deserializes_tagged_json() {
        let json = r#"{"kind":"folder","name":"root","children":[{"kind":"tissue","name":"Bone"}]}"#;
        let item: HierarchyItem = serde_json::from_str(json).expect("parse hierarchy");
        assert!(item.is_folder());
        assert_eq!(item.children()[0].name(), "Bone");
    }
}
