use std::rc::Rc;

use crate::math::hex_to_linear;

/// Flat-colored surface description. Never mutated once registered.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Packed sRGB source color
    pub hex: u32,
    /// Linear RGB used for shading
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
}

impl Material {
    pub fn new(hex: u32, roughness: f32, metalness: f32) -> Self {
        Self {
            hex,
            color: hex_to_linear(hex),
            roughness,
            metalness,
        }
    }

    /// Matte, non-metallic finish of the cut-paper parts
    pub fn paper(hex: u32) -> Self {
        Self::new(hex, 0.85, 0.0)
    }
}

/// Logical color names the puppet is painted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Swatch {
    Stage,
    Orange,
    Black,
    White,
    Pink,
}

impl Swatch {
    pub const ALL: [Swatch; 5] = [
        Swatch::Stage,
        Swatch::Orange,
        Swatch::Black,
        Swatch::White,
        Swatch::Pink,
    ];

    fn material(self) -> Material {
        match self {
            Swatch::Stage => Material::new(0xd5d5d5, 0.9, 0.0),
            Swatch::Orange => Material::paper(0xf7931e),
            Swatch::Black => Material::paper(0x000000),
            Swatch::White => Material::paper(0xffffff),
            Swatch::Pink => Material::paper(0xff6f91),
        }
    }
}

const SWATCH_COUNT: usize = Swatch::ALL.len();

/// One shared instance per swatch. Lookups hand out references to that
/// instance, so parts of the same color share identity.
#[derive(Debug)]
pub struct MaterialRegistry {
    materials: [Rc<Material>; SWATCH_COUNT],
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self {
            materials: Swatch::ALL.map(|swatch| Rc::new(swatch.material())),
        }
    }

    pub fn get(&self, swatch: Swatch) -> Rc<Material> {
        Rc::clone(&self.materials[swatch as usize])
    }

    /// Number of live references to a swatch's material, registry included
    pub fn share_count(&self, swatch: Swatch) -> usize {
        Rc::strong_count(&self.materials[swatch as usize])
    }
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_is_matte_and_non_metallic() {
        let m = Material::paper(0xf7931e);
        assert_eq!(m.roughness, 0.85);
        assert_eq!(m.metalness, 0.0);
        assert_eq!(m.hex, 0xf7931e);
    }

    #[test]
    fn test_registry_hands_out_shared_instances() {
        let registry = MaterialRegistry::new();
        let a = registry.get(Swatch::Orange);
        let b = registry.get(Swatch::Orange);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(registry.share_count(Swatch::Orange), 3);
    }

    #[test]
    fn test_swatches_are_distinct() {
        let registry = MaterialRegistry::new();
        assert!(!Rc::ptr_eq(&registry.get(Swatch::Black), &registry.get(Swatch::White)));
        assert_eq!(registry.get(Swatch::Stage).roughness, 0.9);
        assert_eq!(registry.get(Swatch::Pink).hex, 0xff6f91);
    }

    #[test]
    fn test_swatch_index_matches_table_order() {
        for (i, swatch) in Swatch::ALL.iter().enumerate() {
            assert_eq!(*swatch as usize, i);
        }
    }
}
