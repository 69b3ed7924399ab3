//! MTL (Material Template Library) file parser
//!
//! Parses the Wavefront .mtl files referenced by OBJ meshes, so a mesh can
//! carry its own material into the scene.

use std::collections::HashMap;

use super::{AssetError, FileResolver};
use crate::foundation::math::Color;
use crate::render::MaterialParams;

/// Parsed MTL material data
#[derive(Debug, Clone, PartialEq)]
pub struct MtlData {
    /// Material name
    pub name: String,
    /// Ambient color (Ka)
    pub ambient: Color,
    /// Diffuse color (Kd)
    pub diffuse: Color,
    /// Specular color (Ks)
    pub specular: Color,
    /// Emission color (Ke)
    pub emission: Color,
    /// Dissolve/opacity (d), 1.0 = opaque
    pub dissolve: f32,
    /// PBR roughness (Pr)
    pub roughness: Option<f64>,
    /// PBR metalness (Pm)
    pub metalness: Option<f64>,
    /// Diffuse texture map (map_Kd)
    pub diffuse_map: Option<String>,
    /// Bump/normal map (map_Bump or bump)
    pub normal_map: Option<String>,
    /// Roughness map (map_Pr)
    pub roughness_map: Option<String>,
    /// Metalness map (map_Pm)
    pub metalness_map: Option<String>,
}

impl Default for MtlData {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Color::WHITE,
            diffuse: Color::gray(0.8),
            specular: Color::gray(0.5),
            emission: Color::BLACK,
            dissolve: 1.0,
            roughness: None,
            metalness: None,
            diffuse_map: None,
            normal_map: None,
            roughness_map: None,
            metalness_map: None,
        }
    }
}

impl MtlData {
    /// Convert to renderer material parameters.
    ///
    /// Texture paths are resolved through `resolver`; maps that cannot be
    /// found are dropped with a warning.
    pub fn to_material_params(&self, resolver: &dyn FileResolver) -> MaterialParams {
        let resolve = |map: &Option<String>| {
            map.as_deref().and_then(|path| {
                let found = resolver.find_file(path);
                if found.is_none() {
                    log::warn!("Material '{}': unable to find texture [{}]", self.name, path);
                }
                found
            })
        };

        let mut diffuse = self.diffuse;
        diffuse.a = self.dissolve;

        MaterialParams {
            ambient: self.ambient,
            diffuse,
            specular: self.specular,
            emissive: self.emission,
            roughness: self.roughness,
            metalness: self.metalness,
            texture: resolve(&self.diffuse_map),
            normal_map: resolve(&self.normal_map),
            roughness_map: resolve(&self.roughness_map),
            metalness_map: resolve(&self.metalness_map),
            environment_map: None,
        }
    }
}

/// MTL file parser
pub struct MtlParser;

impl MtlParser {
    /// Parse MTL file contents into a map of material name -> MtlData
    pub fn parse(contents: &str) -> Result<HashMap<String, MtlData>, AssetError> {
        let mut materials = HashMap::new();
        let mut current: Option<MtlData> = None;

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let Some(command) = tokens.next() else {
                continue;
            };

            if command == "newmtl" {
                if let Some(mat) = current.take() {
                    materials.insert(mat.name.clone(), mat);
                }
                let name = tokens.next().ok_or_else(|| {
                    AssetError::Parse(format!("Line {}: newmtl missing material name", line_num + 1))
                })?;
                current = Some(MtlData {
                    name: name.to_string(),
                    ..MtlData::default()
                });
                continue;
            }

            // Statements before the first newmtl have nothing to apply to
            let Some(mat) = current.as_mut() else {
                continue;
            };

            match command {
                "Ka" => mat.ambient = Self::parse_color(&mut tokens, line_num, command)?,
                "Kd" => mat.diffuse = Self::parse_color(&mut tokens, line_num, command)?,
                "Ks" => mat.specular = Self::parse_color(&mut tokens, line_num, command)?,
                "Ke" => mat.emission = Self::parse_color(&mut tokens, line_num, command)?,
                "d" => mat.dissolve = Self::parse_f32(&mut tokens, line_num, command)?,
                "Tr" => mat.dissolve = 1.0 - Self::parse_f32(&mut tokens, line_num, command)?,
                "Pr" => {
                    mat.roughness = Some(Self::parse_float(&mut tokens, line_num, command)?);
                }
                "Pm" => {
                    mat.metalness = Some(Self::parse_float(&mut tokens, line_num, command)?);
                }
                "map_Kd" => mat.diffuse_map = Some(Self::parse_texture_path(&mut tokens, line_num, command)?),
                "map_Bump" | "bump" | "norm" => {
                    mat.normal_map = Some(Self::parse_texture_path(&mut tokens, line_num, command)?);
                }
                "map_Pr" => mat.roughness_map = Some(Self::parse_texture_path(&mut tokens, line_num, command)?),
                "map_Pm" => mat.metalness_map = Some(Self::parse_texture_path(&mut tokens, line_num, command)?),
                _ => {}
            }
        }

        if let Some(mat) = current {
            materials.insert(mat.name.clone(), mat);
        }

        Ok(materials)
    }

    fn parse_color<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<Color, AssetError>
    where
        I: Iterator<Item = &'a str>,
    {
        let r = Self::parse_f32(tokens, line_num, command)?;
        let g = Self::parse_f32(tokens, line_num, command)?;
        let b = Self::parse_f32(tokens, line_num, command)?;
        Ok(Color::rgb(r, g, b))
    }

    fn parse_f32<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<f32, AssetError>
    where
        I: Iterator<Item = &'a str>,
    {
        Self::parse_float(tokens, line_num, command)
    }

    fn parse_float<'a, I, T>(tokens: &mut I, line_num: usize, command: &str) -> Result<T, AssetError>
    where
        I: Iterator<Item = &'a str>,
        T: std::str::FromStr,
    {
        let token = tokens
            .next()
            .ok_or_else(|| AssetError::Parse(format!("Line {}: {} missing value", line_num + 1, command)))?;
        token.parse::<T>().map_err(|_| {
            AssetError::Parse(format!(
                "Line {}: {} invalid float value '{}'",
                line_num + 1,
                command,
                token
            ))
        })
    }

    /// Texture paths may contain spaces, so the rest of the line is taken
    fn parse_texture_path<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<String, AssetError>
    where
        I: Iterator<Item = &'a str>,
    {
        let path: Vec<&str> = tokens.collect();
        if path.is_empty() {
            return Err(AssetError::Parse(format!(
                "Line {}: {} missing texture path",
                line_num + 1,
                command
            )));
        }
        Ok(path.join(" "))
    }
}
