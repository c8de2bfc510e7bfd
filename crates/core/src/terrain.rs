//! Terrain catalog and per-cell layer stacks.
//! A cell always carries exactly one base layer plus any number of object
//! layers; walkability is the conjunction of every layer.

use std::fmt;
use std::iter;

use serde::{Deserialize, Serialize};

use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainKind {
    Grass,
    Road,
    Wall,
    Tree,
    Bush,
    Flowers,
}

/// Render ordering bucket, lowest drawn first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DepthCategory {
    Base = 0,
    Decoration = 1,
    Object = 2,
    Tall = 3,
}

#[derive(Debug, PartialEq, Eq)]
pub struct TerrainType {
    pub kind: TerrainKind,
    pub id: &'static str,
    pub description: &'static str,
    pub walkable: bool,
    pub variations: u8,
    pub is_base: bool,
    pub depth: DepthCategory,
}

pub static TERRAIN_CATALOG: [TerrainType; 6] = [
    TerrainType {
        kind: TerrainKind::Grass,
        id: "grass",
        description: "Grass",
        walkable: true,
        variations: 4,
        is_base: true,
        depth: DepthCategory::Base,
    },
    TerrainType {
        kind: TerrainKind::Road,
        id: "road",
        description: "Dirt Road",
        walkable: true,
        variations: 3,
        is_base: true,
        depth: DepthCategory::Base,
    },
    TerrainType {
        kind: TerrainKind::Wall,
        id: "wall",
        description: "Brick Wall",
        walkable: false,
        variations: 2,
        is_base: true,
        depth: DepthCategory::Base,
    },
    TerrainType {
        kind: TerrainKind::Tree,
        id: "tree",
        description: "Tree",
        walkable: false,
        variations: 3,
        is_base: false,
        depth: DepthCategory::Tall,
    },
    TerrainType {
        kind: TerrainKind::Bush,
        id: "bush",
        description: "Bush",
        walkable: false,
        variations: 2,
        is_base: false,
        depth: DepthCategory::Object,
    },
    TerrainType {
        kind: TerrainKind::Flowers,
        id: "flowers",
        description: "Flowers",
        walkable: true,
        variations: 3,
        is_base: false,
        depth: DepthCategory::Decoration,
    },
];

impl TerrainKind {
    pub fn descriptor(self) -> &'static TerrainType {
        let index = match self {
            TerrainKind::Grass => 0,
            TerrainKind::Road => 1,
            TerrainKind::Wall => 2,
            TerrainKind::Tree => 3,
            TerrainKind::Bush => 4,
            TerrainKind::Flowers => 5,
        };
        &TERRAIN_CATALOG[index]
    }

    pub fn is_walkable(self) -> bool {
        self.descriptor().walkable
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TerrainError {
    #[error("{0:?} is not a base terrain type")]
    NotBase(TerrainKind),
    #[error("{0:?} is a base terrain and cannot be added as an object")]
    NotObject(TerrainKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerId {
    Base,
    Object(TerrainKind),
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerId::Base => write!(f, "base"),
            LayerId::Object(kind) => write!(f, "object_{}", kind.descriptor().id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    base: TerrainKind,
    // Insertion order; overwriting an object keeps its slot.
    objects: Vec<TerrainKind>,
}

impl Cell {
    pub fn new(base: TerrainKind) -> Result<Self, TerrainError> {
        if !base.descriptor().is_base {
            return Err(TerrainError::NotBase(base));
        }
        Ok(Self { base, objects: Vec::new() })
    }

    pub fn set_base(&mut self, kind: TerrainKind) -> Result<(), TerrainError> {
        if !kind.descriptor().is_base {
            return Err(TerrainError::NotBase(kind));
        }
        self.base = kind;
        Ok(())
    }

    pub fn add_object(&mut self, kind: TerrainKind) -> Result<(), TerrainError> {
        if kind.descriptor().is_base {
            return Err(TerrainError::NotObject(kind));
        }
        if !self.objects.contains(&kind) {
            self.objects.push(kind);
        }
        Ok(())
    }

    pub fn remove_object(&mut self, kind: TerrainKind) {
        self.objects.retain(|object| *object != kind);
    }

    pub fn base(&self) -> TerrainKind {
        self.base
    }

    pub fn has_object(&self, kind: TerrainKind) -> bool {
        self.objects.contains(&kind)
    }

    pub fn layers(&self) -> impl Iterator<Item = (LayerId, TerrainKind)> + '_ {
        iter::once((LayerId::Base, self.base))
            .chain(self.objects.iter().map(|kind| (LayerId::Object(*kind), *kind)))
    }

    pub fn is_walkable(&self) -> bool {
        self.layers().all(|(_, kind)| kind.is_walkable())
    }
}

/// Render depth for one layer. Base layers always sit at the bottom.
pub fn layer_depth(layer: LayerId) -> DepthCategory {
    match layer {
        LayerId::Base => DepthCategory::Base,
        LayerId::Object(kind) => kind.descriptor().depth,
    }
}

/// Sprite variation for a cell. Purely cosmetic, stable for a given position.
pub fn variation_for(pos: Pos, variations: u8) -> u8 {
    if variations == 0 {
        return 0;
    }
    let mut mixed = (pos.x as u32 as u64) ^ ((pos.y as u32 as u64) << 32);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^= mixed >> 33;
    (mixed % u64::from(variations)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_matches_descriptor_lookup() {
        for descriptor in &TERRAIN_CATALOG {
            assert_eq!(descriptor.kind.descriptor(), descriptor);
        }
    }

    #[test]
    fn set_base_overwrites_only_the_base_layer() {
        let mut cell = Cell::new(TerrainKind::Grass).expect("grass is a base");
        cell.add_object(TerrainKind::Flowers).expect("flowers are an object");

        cell.set_base(TerrainKind::Road).expect("road is a base");

        let layers: Vec<_> = cell.layers().collect();
        assert_eq!(
            layers,
            vec![
                (LayerId::Base, TerrainKind::Road),
                (LayerId::Object(TerrainKind::Flowers), TerrainKind::Flowers)
            ]
        );
    }

    #[test]
    fn set_base_with_object_type_is_rejected_and_cell_unchanged() {
        let mut cell = Cell::new(TerrainKind::Grass).expect("grass is a base");
        let before = cell.clone();

        assert_eq!(cell.set_base(TerrainKind::Tree), Err(TerrainError::NotBase(TerrainKind::Tree)));
        assert_eq!(cell, before);
    }

    #[test]
    fn add_object_with_base_type_is_rejected() {
        let mut cell = Cell::new(TerrainKind::Road).expect("road is a base");
        assert_eq!(
            cell.add_object(TerrainKind::Wall),
            Err(TerrainError::NotObject(TerrainKind::Wall))
        );
        assert_eq!(cell.layers().count(), 1);
    }

    #[test]
    fn cell_cannot_be_created_on_an_object_type() {
        assert_eq!(Cell::new(TerrainKind::Bush), Err(TerrainError::NotBase(TerrainKind::Bush)));
    }

    #[test]
    fn walkability_requires_every_layer_to_be_walkable() {
        let mut cell = Cell::new(TerrainKind::Grass).expect("grass is a base");
        assert!(cell.is_walkable());

        cell.add_object(TerrainKind::Flowers).expect("flowers are an object");
        assert!(cell.is_walkable());

        cell.add_object(TerrainKind::Tree).expect("tree is an object");
        assert!(!cell.is_walkable());

        cell.remove_object(TerrainKind::Tree);
        assert!(cell.is_walkable());

        cell.set_base(TerrainKind::Wall).expect("wall is a base");
        assert!(!cell.is_walkable());
    }

    #[test]
    fn re_adding_an_object_keeps_its_original_slot() {
        let mut cell = Cell::new(TerrainKind::Grass).expect("grass is a base");
        cell.add_object(TerrainKind::Bush).expect("bush");
        cell.add_object(TerrainKind::Flowers).expect("flowers");
        cell.add_object(TerrainKind::Bush).expect("bush again");

        let ids: Vec<String> = cell.layers().map(|(layer, _)| layer.to_string()).collect();
        assert_eq!(ids, vec!["base", "object_bush", "object_flowers"]);
    }

    #[test]
    fn removing_a_missing_object_is_a_no_op() {
        let mut cell = Cell::new(TerrainKind::Grass).expect("grass is a base");
        cell.remove_object(TerrainKind::Tree);
        cell.remove_object(TerrainKind::Grass);
        assert_eq!(cell.base(), TerrainKind::Grass);
        assert_eq!(cell.layers().count(), 1);
    }

    #[test]
    fn object_depths_follow_the_catalog() {
        assert_eq!(layer_depth(LayerId::Base), DepthCategory::Base);
        assert_eq!(layer_depth(LayerId::Object(TerrainKind::Flowers)), DepthCategory::Decoration);
        assert_eq!(layer_depth(LayerId::Object(TerrainKind::Bush)), DepthCategory::Object);
        assert_eq!(layer_depth(LayerId::Object(TerrainKind::Tree)), DepthCategory::Tall);
    }

    #[test]
    fn variation_is_stable_and_in_range() {
        for y in 0..15 {
            for x in 0..15 {
                let pos = Pos::new(x, y);
                let first = variation_for(pos, 4);
                assert!(first < 4);
                assert_eq!(first, variation_for(pos, 4));
            }
        }
        assert_eq!(variation_for(Pos::new(3, 3), 0), 0);
    }
}
