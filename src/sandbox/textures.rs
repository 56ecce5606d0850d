//! Procedural floor and sphere texture sets
//!
//! Each named set is synthesized into a diffuse and a metallic-roughness
//! image from pixel buffers. One floor set and one sphere set are picked at
//! random per run, so the scene looks a little different every launch.

use bevy::image::{ImageAddressMode, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use rand::Rng;

pub const TEXTURE_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloorTextureSet {
    ClayRoof,
    DryRiverbed,
    WoodCabinet,
    ConcreteLayers,
    RockyTerrain,
}

impl FloorTextureSet {
    pub fn all() -> &'static [FloorTextureSet] {
        &[
            FloorTextureSet::ClayRoof,
            FloorTextureSet::DryRiverbed,
            FloorTextureSet::WoodCabinet,
            FloorTextureSet::ConcreteLayers,
            FloorTextureSet::RockyTerrain,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            FloorTextureSet::ClayRoof => "clay roof",
            FloorTextureSet::DryRiverbed => "dry riverbed",
            FloorTextureSet::WoodCabinet => "wood cabinet",
            FloorTextureSet::ConcreteLayers => "concrete layers",
            FloorTextureSet::RockyTerrain => "rocky terrain",
        }
    }

    /// Base and accent colors of the set, as sRGB bytes.
    fn palette(&self) -> ([u8; 3], [u8; 3]) {
        match self {
            FloorTextureSet::ClayRoof => ([178, 86, 56], [140, 62, 40]),
            FloorTextureSet::DryRiverbed => ([148, 132, 108], [110, 96, 76]),
            FloorTextureSet::WoodCabinet => ([120, 82, 48], [92, 60, 34]),
            FloorTextureSet::ConcreteLayers => ([150, 150, 148], [118, 118, 116]),
            FloorTextureSet::RockyTerrain => ([124, 116, 104], [88, 82, 72]),
        }
    }

    fn roughness(&self) -> u8 {
        match self {
            FloorTextureSet::ClayRoof => 180,
            FloorTextureSet::DryRiverbed => 220,
            FloorTextureSet::WoodCabinet => 150,
            FloorTextureSet::ConcreteLayers => 200,
            FloorTextureSet::RockyTerrain => 235,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SphereTextureSet {
    Rubber,
    Denim,
    Snow,
}

impl SphereTextureSet {
    pub fn all() -> &'static [SphereTextureSet] {
        &[
            SphereTextureSet::Rubber,
            SphereTextureSet::Denim,
            SphereTextureSet::Snow,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            SphereTextureSet::Rubber => "rubber",
            SphereTextureSet::Denim => "denim",
            SphereTextureSet::Snow => "snow",
        }
    }

    fn palette(&self) -> ([u8; 3], [u8; 3]) {
        match self {
            SphereTextureSet::Rubber => ([52, 52, 56], [38, 38, 42]),
            SphereTextureSet::Denim => ([62, 88, 130], [46, 68, 104]),
            SphereTextureSet::Snow => ([235, 240, 246], [214, 222, 232]),
        }
    }

    fn roughness(&self) -> u8 {
        match self {
            SphereTextureSet::Rubber => 230,
            SphereTextureSet::Denim => 210,
            SphereTextureSet::Snow => 160,
        }
    }
}

/// The texture sets chosen for this run.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SelectedTextures {
    pub floor: FloorTextureSet,
    pub sphere: SphereTextureSet,
}

impl SelectedTextures {
    pub fn random(rng: &mut impl Rng) -> Self {
        let floors = FloorTextureSet::all();
        let spheres = SphereTextureSet::all();
        Self {
            floor: floors[rng.gen_range(0..floors.len())],
            sphere: spheres[rng.gen_range(0..spheres.len())],
        }
    }
}

/// Handles to the generated scene textures, filled in during preload.
#[derive(Resource, Default)]
pub struct SceneTextures {
    pub floor_diffuse: Option<Handle<Image>>,
    pub floor_rough: Option<Handle<Image>>,
    pub sphere_diffuse: Option<Handle<Image>>,
    pub sphere_rough: Option<Handle<Image>>,
}

/// Small integer hash, used as deterministic per-texel noise.
fn hash_noise(x: u32, y: u32, seed: u32) -> f32 {
    let mut h = x.wrapping_mul(374_761_393) ^ y.wrapping_mul(668_265_263) ^ seed;
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    ((h ^ (h >> 16)) & 0xffff) as f32 / 65_535.0
}

fn mix(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
}

fn rgba_image(data: Vec<u8>) -> Image {
    let mut image = Image::new(
        Extent3d {
            width: TEXTURE_SIZE as u32,
            height: TEXTURE_SIZE as u32,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    );
    // Floor UVs repeat, so tile in both directions.
    image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
        address_mode_u: ImageAddressMode::Repeat,
        address_mode_v: ImageAddressMode::Repeat,
        ..default()
    });
    image
}

/// Diffuse map: the set's palette blended through tile-pattern noise.
pub fn generate_diffuse(base: [u8; 3], accent: [u8; 3], seed: u32) -> Image {
    let size = TEXTURE_SIZE;
    let mut data = vec![0u8; size * size * 4];
    for y in 0..size {
        for x in 0..size {
            // Coarse cells plus per-texel grain.
            let cell = hash_noise((x / 32) as u32, (y / 32) as u32, seed);
            let grain = hash_noise(x as u32, y as u32, seed ^ 0x9e37);
            let t = (cell * 0.7 + grain * 0.3).clamp(0.0, 1.0);
            let i = (y * size + x) * 4;
            data[i] = mix(base[0], accent[0], t);
            data[i + 1] = mix(base[1], accent[1], t);
            data[i + 2] = mix(base[2], accent[2], t);
            data[i + 3] = 255;
        }
    }
    rgba_image(data)
}

/// Metallic-roughness map: roughness in G, metallic (zero) in B.
pub fn generate_roughness(roughness: u8, seed: u32) -> Image {
    let size = TEXTURE_SIZE;
    let mut data = vec![0u8; size * size * 4];
    for y in 0..size {
        for x in 0..size {
            let grain = hash_noise(x as u32, y as u32, seed);
            let r = mix(roughness.saturating_sub(20), roughness, grain);
            let i = (y * size + x) * 4;
            data[i] = 0;
            data[i + 1] = r;
            data[i + 2] = 0;
            data[i + 3] = 255;
        }
    }
    rgba_image(data)
}

pub fn generate_floor_diffuse(set: FloorTextureSet) -> Image {
    let (base, accent) = set.palette();
    generate_diffuse(base, accent, 0x51a7)
}

pub fn generate_floor_roughness(set: FloorTextureSet) -> Image {
    generate_roughness(set.roughness(), 0x51a8)
}

pub fn generate_sphere_diffuse(set: SphereTextureSet) -> Image {
    let (base, accent) = set.palette();
    generate_diffuse(base, accent, 0x2c11)
}

pub fn generate_sphere_roughness(set: SphereTextureSet) -> Image {
    generate_roughness(set.roughness(), 0x2c12)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_images_have_expected_size() {
        let image = generate_floor_diffuse(FloorTextureSet::WoodCabinet);
        assert_eq!(image.width() as usize, TEXTURE_SIZE);
        assert_eq!(image.height() as usize, TEXTURE_SIZE);
    }

    #[test]
    fn test_roughness_lands_in_green_channel() {
        let image = generate_sphere_roughness(SphereTextureSet::Rubber);
        let data = image.data.as_ref().expect("image should carry pixel data");
        assert_eq!(data.len(), TEXTURE_SIZE * TEXTURE_SIZE * 4);
        // R and B stay zero; G carries roughness.
        assert_eq!(data[0], 0);
        assert!(data[1] > 0);
        assert_eq!(data[2], 0);
    }

    #[test]
    fn test_random_selection_is_always_valid() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let selected = SelectedTextures::random(&mut rng);
            assert!(FloorTextureSet::all().contains(&selected.floor));
            assert!(SphereTextureSet::all().contains(&selected.sphere));
        }
    }

    #[test]
    fn test_hash_noise_is_deterministic_and_bounded() {
        for x in 0..16 {
            for y in 0..16 {
                let a = hash_noise(x, y, 7);
                let b = hash_noise(x, y, 7);
                assert_eq!(a, b);
                assert!((0.0..=1.0).contains(&a));
            }
        }
    }
}
