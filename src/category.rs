//! Scene categories and the category index.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::types::SceneId;
use crate::{Error, Result};

/// Motion pattern of a ground-truth scene.
///
/// Categories are non-exclusive: a scene may carry several tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Static = 1,
    Linear = 2,
    ForcedNonLinear = 3,
    NonLinear = 4,
}

impl Category {
    /// All categories in tag order.
    pub const ALL: [Category; 4] = [
        Category::Static,
        Category::Linear,
        Category::ForcedNonLinear,
        Category::NonLinear,
    ];

    /// Numeric tag as stored in scene metadata.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Human readable name.
    pub fn name(self) -> &'static str {
        match self {
            Category::Static => "static",
            Category::Linear => "linear",
            Category::ForcedNonLinear => "forced_non_linear",
            Category::NonLinear => "non_linear",
        }
    }
}

impl TryFrom<u8> for Category {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            1 => Ok(Category::Static),
            2 => Ok(Category::Linear),
            3 => Ok(Category::ForcedNonLinear),
            4 => Ok(Category::NonLinear),
            other => Err(Error::UnknownCategory(other)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Mapping from category to the ids of the scenes tagged with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryIndex {
    scenes: BTreeMap<Category, BTreeSet<SceneId>>,
}

impl CategoryIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from per-scene tag lists.
    ///
    /// Tags outside the four known categories are ignored.
    pub fn from_tags<'a, I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = (SceneId, T)>,
        T: IntoIterator<Item = &'a u8>,
    {
        let mut index = Self::new();
        for (scene_id, scene_tags) in tags {
            for &tag in scene_tags {
                if let Ok(category) = Category::try_from(tag) {
                    index.insert(category, scene_id);
                }
            }
        }
        index
    }

    /// Tag a scene with a category.
    pub fn insert(&mut self, category: Category, scene_id: SceneId) {
        self.scenes.entry(category).or_default().insert(scene_id);
    }

    /// Whether `scene_id` belongs to `category`.
    pub fn contains(&self, category: Category, scene_id: SceneId) -> bool {
        self.scenes
            .get(&category)
            .is_some_and(|ids| ids.contains(&scene_id))
    }

    /// Number of scenes tagged with `category`.
    pub fn len(&self, category: Category) -> usize {
        self.scenes.get(&category).map_or(0, BTreeSet::len)
    }

    /// Whether no scene carries any category.
    pub fn is_empty(&self) -> bool {
        self.scenes.values().all(BTreeSet::is_empty)
    }

    /// Categories of a scene, in tag order.
    pub fn categories_of(&self, scene_id: SceneId) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(move |&category| self.contains(category, scene_id))
    }
}
