//! Scene sources consumed by the evaluator.
//!
//! Parsing of trajectory files lives outside this crate; any loader only has
//! to implement [`SceneReader`].

use std::collections::BTreeMap;

use crate::category::CategoryIndex;
use crate::types::{Scene, SceneId};

/// Source of scenes and their category tags.
pub trait SceneReader {
    /// Scenes in the reader's native order.
    fn scenes(&self) -> &[Scene];

    /// Category tags of a scene (empty if the scene is untagged).
    fn tags(&self, scene_id: SceneId) -> &[u8];

    /// Category index built from the tags of every scene.
    fn category_index(&self) -> CategoryIndex {
        CategoryIndex::from_tags(self.scenes().iter().map(|s| (s.id, self.tags(s.id))))
    }
}

/// A reader over scenes that are already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReader {
    scenes: Vec<Scene>,
    tags: BTreeMap<SceneId, Vec<u8>>,
}

impl InMemoryReader {
    /// Create an empty reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader from untagged scenes.
    pub fn from_scenes(scenes: Vec<Scene>) -> Self {
        Self {
            scenes,
            tags: BTreeMap::new(),
        }
    }

    /// Append a scene with its category tags.
    pub fn push(&mut self, scene: Scene, tags: Vec<u8>) {
        if !tags.is_empty() {
            self.tags.insert(scene.id, tags);
        }
        self.scenes.push(scene);
    }

    /// Builder-style variant of [`push`](Self::push).
    pub fn with_scene(mut self, scene: Scene, tags: Vec<u8>) -> Self {
        self.push(scene, tags);
        self
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the reader holds no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

impl SceneReader for InMemoryReader {
    fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    fn tags(&self, scene_id: SceneId) -> &[u8] {
        self.tags.get(&scene_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::types::TrackRow;

    #[test]
    fn test_category_index_from_reader() {
        let scene = |id| Scene::new(id, vec![TrackRow::new(0, 1, 0.0, 0.0)], Vec::new());
        let reader = InMemoryReader::new()
            .with_scene(scene(10), vec![1, 3])
            .with_scene(scene(11), vec![])
            .with_scene(scene(12), vec![3]);

        let index = reader.category_index();
        assert_eq!(reader.len(), 3);
        assert_eq!(index.len(Category::Static), 1);
        assert_eq!(index.len(Category::ForcedNonLinear), 2);
        assert!(reader.tags(11).is_empty());
    }
}
