//! Subcommand implementations.

pub mod analyze;
pub mod annotate;
pub mod materials;
pub mod measure;
pub mod scale;

use anyhow::{Result, bail};
use clap::Args;
use mesh_gauge::Material;

/// Material selection shared by commands that compute weight.
#[derive(Args, Debug, Clone, Default)]
#[group(multiple = false)]
pub struct DensityArgs {
    /// Material name from `mesh-gauge materials` (case-insensitive)
    #[arg(long)]
    pub material: Option<String>,

    /// Density in g/cm³
    #[arg(long)]
    pub density: Option<f64>,
}

/// A resolved density with the label to print next to weights.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDensity {
    pub label: String,
    pub density: f64,
}

impl DensityArgs {
    /// Resolve the flags, if any were given.
    pub fn resolve(&self) -> Result<Option<ResolvedDensity>> {
        if let Some(name) = &self.material {
            let Some(material) = Material::lookup(name) else {
                bail!("unknown material {name:?}; run `mesh-gauge materials` for the list");
            };
            return Ok(Some(ResolvedDensity {
                label: material.name.to_string(),
                density: material.density,
            }));
        }

        match self.density {
            Some(density) if density.is_finite() && density > 0.0 => Ok(Some(ResolvedDensity {
                label: format!("{density} g/cm³"),
                density,
            })),
            Some(density) => bail!("density must be positive, got {density}"),
            None => Ok(None),
        }
    }

    /// Like [`DensityArgs::resolve`], but one of the flags is mandatory.
    pub fn require(&self) -> Result<ResolvedDensity> {
        match self.resolve()? {
            Some(resolved) => Ok(resolved),
            None => bail!("either --material or --density is required"),
        }
    }
}
