//! Material densities, weight estimation and scaling to a target weight.
//!
//! Volumes are in mm³ and densities in g/cm³, so
//! `grams = volume_mm3 / 1000 × density`.
//!
//! # Example
//!
//! ```
//! use mesh_gauge::material::{Material, estimate_weight};
//!
//! let silver = Material::lookup("sterling silver 925").unwrap();
//! let weight = estimate_weight(1000.0, silver.density);
//! assert_eq!(weight.display, "10.36 g");
//! ```

use crate::error::{MeshError, MeshResult};
use crate::measure::Dimensions;

/// A named material with its density.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Material {
    /// Display name.
    pub name: &'static str,
    /// Density in g/cm³.
    pub density: f64,
}

const fn material(name: &'static str, density: f64) -> Material {
    Material { name, density }
}

/// Built-in material table, in display order.
pub const MATERIALS: &[Material] = &[
    material("24 Carat Gold (999)", 19.32),
    material("22 Carat Gold (916)", 17.7),
    material("18K Yellow Gold 3N", 15.5),
    material("18K Rose Gold", 15.0),
    material("18K White Gold (Pd)", 15.0),
    material("18K White Gold (Ag)", 14.7),
    material("14K Yellow Gold N2", 13.58),
    material("14K Rose Gold", 13.2),
    material("14K White Gold", 13.0),
    material("10K Gold", 11.6),
    material("9K Gold", 10.8),
    material("Pure Platinum (999)", 21.45),
    material("Platinum 950", 20.64),
    material("Platinum 900", 20.0),
    material("Pure Palladium (999)", 12.02),
    material("Palladium 950", 11.5),
    material("Pure Silver (999)", 10.49),
    material("Sterling Silver 925", 10.36),
    material("Copper Cu", 8.96),
    material("Brass UZ36", 8.5),
    material("Bronze", 8.8),
    material("316L Stainless Steel", 8.0),
    material("Grade 2 Titanium", 4.51),
    material("Aluminium", 2.7),
    material("Standard Resin", 1.2),
    material("Diamond", 3.52),
    material("Sapphire / Ruby", 4.0),
    material("Emerald", 2.75),
    material("Quartz", 2.65),
];

impl Material {
    /// Find a material by name or slug, ignoring case.
    ///
    /// `"Sterling Silver 925"`, `"sterling silver 925"` and
    /// `"sterling-silver-925"` all resolve to the same entry.
    pub fn lookup(name: &str) -> Option<&'static Material> {
        let wanted = slugify(name);
        MATERIALS
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name.trim()) || m.slug() == wanted)
    }

    /// Lowercase, hyphen-separated form of the name.
    pub fn slug(&self) -> String {
        slugify(self.name)
    }

    /// Weight of `volume_mm3` of this material.
    pub fn weight_of(&self, volume_mm3: f64) -> WeightEstimate {
        estimate_weight(volume_mm3, self.density)
    }
}

fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Estimated weight with its human-readable form.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightEstimate {
    /// Weight in grams.
    pub grams: f64,
    /// `"12.34 g"`, `"1.234 kg"`, or `"--"` when not computable.
    pub display: String,
}

impl WeightEstimate {
    /// Weight in kilograms.
    #[inline]
    pub fn kilograms(&self) -> f64 {
        self.grams / 1000.0
    }
}

impl std::fmt::Display for WeightEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display)
    }
}

/// Estimate weight from a volume in mm³ and a density in g/cm³.
///
/// Non-positive or non-finite inputs give zero grams displayed as `"--"`.
pub fn estimate_weight(volume_mm3: f64, density_g_cm3: f64) -> WeightEstimate {
    if !is_positive(volume_mm3) || !is_positive(density_g_cm3) {
        return WeightEstimate {
            grams: 0.0,
            display: "--".to_string(),
        };
    }

    let grams = mm3_to_cm3(volume_mm3) * density_g_cm3;
    let display = if grams >= 1000.0 {
        format!("{:.3} kg", grams / 1000.0)
    } else {
        format!("{:.2} g", grams)
    };
    WeightEstimate { grams, display }
}

/// Convert mm³ to cm³.
#[inline]
pub fn mm3_to_cm3(volume_mm3: f64) -> f64 {
    volume_mm3 / 1000.0
}

/// Convert mm² to cm².
#[inline]
pub fn mm2_to_cm2(area_mm2: f64) -> f64 {
    area_mm2 / 100.0
}

/// Uniform scale factor that turns `current_grams` into `target_grams`.
///
/// Weight grows with the cube of the linear scale, so the factor is
/// `(target / current)^(1/3)`.
pub fn scale_for_target_weight(current_grams: f64, target_grams: f64) -> MeshResult<f64> {
    if !is_positive(current_grams) {
        return Err(MeshError::invalid_parameter(
            "current_weight",
            format!("must be positive, got {current_grams}"),
        ));
    }
    if !is_positive(target_grams) {
        return Err(MeshError::invalid_parameter(
            "target_weight",
            format!("must be positive, got {target_grams}"),
        ));
    }
    Ok((target_grams / current_grams).cbrt())
}

/// Properties of a model after a uniform scale.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaledProperties {
    /// Linear scale factor.
    pub factor: f64,
    /// Dimensions scale linearly.
    pub dimensions: Dimensions,
    /// Volume in mm³ scales with the cube of the factor.
    pub volume: f64,
    /// Weight of the scaled volume, when a density is known.
    pub weight: Option<WeightEstimate>,
}

impl ScaledProperties {
    /// Scale `dimensions` and `volume` by `factor`.
    pub fn new(dimensions: &Dimensions, volume: f64, factor: f64) -> Self {
        Self {
            factor,
            dimensions: dimensions.scaled(factor),
            volume: volume * factor.powi(3),
            weight: None,
        }
    }

    /// Attach the weight of the scaled volume at `density_g_cm3`.
    pub fn with_density(mut self, density_g_cm3: f64) -> Self {
        self.weight = Some(estimate_weight(self.volume, density_g_cm3));
        self
    }

    /// Scaled volume in cm³.
    #[inline]
    pub fn volume_cm3(&self) -> f64 {
        mm3_to_cm3(self.volume)
    }
}

#[inline]
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
